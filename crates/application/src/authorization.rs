use tracing::{debug, warn};

use domain::roster::normalize_member_id;

use crate::roster::RosterQuery;

/// Decides whether a sender may run bot commands in a group
///
/// Every check queries the roster again; operator status can change between
/// messages. Any roster failure denies access.
#[derive(Clone)]
pub struct AuthorizationGate {
    roster: RosterQuery,
}

impl AuthorizationGate {
    pub fn new(roster: RosterQuery) -> Self {
        Self { roster }
    }

    pub async fn is_operator(&self, sender_id: &str, group_id: &str) -> bool {
        let participants = match self.roster.fetch(group_id).await {
            Ok(participants) => participants,
            Err(e) => {
                warn!(group_id = %group_id, sender_id = %sender_id, error = %e, "Roster query failed, denying command");
                return false;
            }
        };

        let sender = normalize_member_id(sender_id);
        let allowed = participants
            .iter()
            .find(|p| normalize_member_id(&p.member_id) == sender)
            .is_some_and(|p| p.role.is_operator());

        debug!(group_id = %group_id, sender_id = %sender, allowed, "Authorization checked");
        allowed
    }
}
