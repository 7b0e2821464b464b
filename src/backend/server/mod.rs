//! Server Module
//!
//! Initializes and configures the Axum HTTP server.
//!
//! - **`state`** - Application state structure and `FromRef` implementations
//! - **`config`** - Database connection and migrations
//! - **`init`** - Server initialization and app creation
//!
//! # Initialization Flow
//!
//! 1. **Database**: open the SQLite pool and migrate the schema
//! 2. **Directory**: import the roster file when `ROSTER_PATH` is set
//! 3. **State**: build the messaging store and `AppState`
//! 4. **Router**: configure all routes and middleware
//! 5. **Background Tasks**: periodic cleanup of idle conversation locks
//!
//! # Example
//!
//! ```rust,no_run
//! use classchat::backend::server::create_app;
//! use classchat::shared::AppConfig;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = AppConfig::from_env()?;
//! let app = create_app(&config).await?;
//! # Ok(())
//! # }
//! ```

/// Application state management
pub mod state;

/// Database loading
pub mod config;

/// Server initialization
pub mod init;

pub use init::create_app;
pub use state::AppState;
