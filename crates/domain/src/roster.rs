use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::CollaboratorError;

/// Role of a participant inside a group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ParticipantRole {
    #[default]
    Member,
    Admin,
    SuperAdmin,
}

impl ParticipantRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Member => "member",
            Self::Admin => "admin",
            Self::SuperAdmin => "super_admin",
        }
    }

    /// Admins and super admins may run bot commands
    pub fn is_operator(&self) -> bool {
        matches!(self, Self::Admin | Self::SuperAdmin)
    }
}

/// One entry of a group's roster
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    pub member_id: String,
    #[serde(default)]
    pub role: ParticipantRole,
}

impl Participant {
    pub fn new(member_id: impl Into<String>, role: ParticipantRole) -> Self {
        Self {
            member_id: member_id.into(),
            role,
        }
    }
}

/// Normalize a member id so the same user compares equal across devices.
///
/// `"919111111111:12@S.WhatsApp.net"` -> `"919111111111@s.whatsapp.net"`
pub fn normalize_member_id(member_id: &str) -> String {
    let member_id = member_id.trim().to_lowercase();
    match member_id.split_once('@') {
        Some((user, server)) => {
            let user = user.split(':').next().unwrap_or(user);
            format!("{}@{}", user, server)
        }
        None => member_id,
    }
}

/// Local part of a member id, as shown after `@` in mention text
pub fn mention_handle(member_id: &str) -> &str {
    member_id.split('@').next().unwrap_or(member_id)
}

/// Live view of a group's members and roles, owned by the chat transport
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GroupRoster: Send + Sync {
    async fn fetch_group_roster(&self, group_id: &str)
    -> Result<Vec<Participant>, CollaboratorError>;
}
