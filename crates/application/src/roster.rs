use std::sync::Arc;
use std::time::Duration;

use domain::roster::{GroupRoster, Participant};
use domain::CollaboratorError;

/// Roster lookups with an optional upper bound on how long the transport may take
#[derive(Clone)]
pub struct RosterQuery {
    roster: Arc<dyn GroupRoster>,
    timeout: Option<Duration>,
}

impl RosterQuery {
    pub fn new(roster: Arc<dyn GroupRoster>, timeout: Option<Duration>) -> Self {
        Self { roster, timeout }
    }

    pub async fn fetch(&self, group_id: &str) -> Result<Vec<Participant>, CollaboratorError> {
        let call = self.roster.fetch_group_roster(group_id);
        match self.timeout {
            Some(limit) => tokio::time::timeout(limit, call).await.map_err(|_| {
                CollaboratorError::Unavailable(format!(
                    "roster query for {} timed out after {:?}",
                    group_id, limit
                ))
            })?,
            None => call.await,
        }
    }
}
