//! User Directory Module
//!
//! Adapter over the school's user directory. The messaging core treats it as
//! read-only: it validates identities against it and lists candidates for
//! contact search. The only writer is the roster import run at startup.

pub mod users;
pub mod roster;

pub use users::{list_all, list_by_role, lookup, require, upsert_user};
pub use roster::import_roster;
