//! Contact search
//!
//! Lists directory users a requester could message, optionally narrowed by role
//! and a username substring. People the requester already talks to come first;
//! within each group the directory order is kept.

use std::collections::HashSet;

use super::MessagingStore;
use crate::backend::directory;
use crate::backend::error::BackendResult;
use crate::shared::messaging::{ContactEntry, RoleFilter};

impl MessagingStore {
    /// Search the directory for contacts of `requester`
    ///
    /// An empty (or whitespace-only) query matches everyone. Matching is a
    /// case-insensitive substring test on the username. The requester is never
    /// listed.
    pub async fn search_contacts(
        &self,
        requester: &str,
        query: &str,
        filter: RoleFilter,
    ) -> BackendResult<Vec<ContactEntry>> {
        let candidates = match filter.role() {
            Some(role) => directory::list_by_role(&self.pool, role).await?,
            None => directory::list_all(&self.pool).await?,
        };

        let existing: HashSet<String> = self
            .recent_conversations(requester)
            .await?
            .into_iter()
            .map(|entry| entry.counterpart)
            .collect();

        let needle = query.trim().to_lowercase();
        let mut contacts: Vec<ContactEntry> = candidates
            .into_iter()
            .filter(|user| user.username != requester)
            .filter(|user| needle.is_empty() || user.username.to_lowercase().contains(&needle))
            .map(|user| ContactEntry {
                has_existing_conversation: existing.contains(&user.username),
                username: user.username,
                role: user.role,
                profile_picture_url: user.profile_picture_url,
            })
            .collect();

        // Stable: directory order survives inside each group
        contacts.sort_by_key(|contact| !contact.has_existing_conversation);

        tracing::debug!(
            "Contact search by {} ({:?}, {:?}): {} results",
            requester,
            query,
            filter,
            contacts.len()
        );
        Ok(contacts)
    }
}
