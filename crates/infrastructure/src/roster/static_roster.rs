use std::collections::HashMap;

use async_trait::async_trait;
use domain::CollaboratorError;
use domain::roster::{GroupRoster, Participant};

use crate::config::GroupConfig;

/// Roster served from configuration instead of a live chat session
#[derive(Debug, Clone, Default)]
pub struct StaticGroupRoster {
    groups: HashMap<String, Vec<Participant>>,
}

impl StaticGroupRoster {
    pub fn from_config(groups: &[GroupConfig]) -> Self {
        Self {
            groups: groups
                .iter()
                .map(|g| (g.group_id.clone(), g.participants.clone()))
                .collect(),
        }
    }

    pub fn group_count(&self) -> usize {
        self.groups.len()
    }
}

#[async_trait]
impl GroupRoster for StaticGroupRoster {
    async fn fetch_group_roster(
        &self,
        group_id: &str,
    ) -> Result<Vec<Participant>, CollaboratorError> {
        self.groups
            .get(group_id)
            .cloned()
            .ok_or_else(|| CollaboratorError::Failed(format!("unknown group {}", group_id)))
    }
}
