use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use domain::command::{Command, CommandParser};
use domain::roster::{GroupRoster, normalize_member_id};
use domain::tag::{PhoneNumber, TagName};
use domain::{InboundMessage, Reply};

use crate::authorization::AuthorizationGate;
use crate::reply::ReplyFormatter;
use crate::roster::RosterQuery;
use crate::tag::TagStore;

/// Runs one inbound message through parse -> authorize -> execute -> reply
///
/// Every path ends in either a reply or `None` (not a command); errors never
/// escape. The store sits behind a mutex so load-modify-persist cycles never
/// interleave.
pub struct CommandDispatcher {
    parser: CommandParser,
    store: Mutex<TagStore>,
    gate: AuthorizationGate,
    roster: RosterQuery,
}

impl CommandDispatcher {
    pub fn new(
        store: TagStore,
        roster: Arc<dyn GroupRoster>,
        collaborator_timeout: Option<Duration>,
    ) -> Self {
        let roster = RosterQuery::new(roster, collaborator_timeout);
        Self {
            parser: CommandParser::new(),
            store: Mutex::new(store),
            gate: AuthorizationGate::new(roster.clone()),
            roster,
        }
    }

    pub async fn dispatch(&self, message: &InboundMessage) -> Option<Reply> {
        let command = self.parser.parse(&message.text)?;
        let kind = command.kind();
        let sender_id = normalize_member_id(&message.sender_id);
        debug!(group_id = %message.group_id, sender_id = %sender_id, command = %kind, "Command received");

        if !self.gate.is_operator(&sender_id, &message.group_id).await {
            warn!(group_id = %message.group_id, sender_id = %sender_id, command = %kind, "Unauthorized command");
            return Some(ReplyFormatter::denied(kind));
        }

        let reply = self.execute(command, &message.group_id, &sender_id).await;
        info!(group_id = %message.group_id, sender_id = %sender_id, command = %kind, mentions = reply.mentions.len(), "Command executed");
        Some(reply)
    }

    async fn execute(&self, command: Command, group_id: &str, sender_id: &str) -> Reply {
        match command {
            Command::TagAll => match self.roster.fetch(group_id).await {
                Ok(participants) => ReplyFormatter::tag_all(&participants, sender_id),
                Err(e) => {
                    warn!(group_id = %group_id, error = %e, "Failed to fetch roster for tagall");
                    ReplyFormatter::tag_all_failed()
                }
            },
            Command::CustomTag { tag } => {
                let store = self.store.lock().await;
                match store.resolve(&tag) {
                    Some((name, members)) => ReplyFormatter::custom_tag(name, members, sender_id),
                    None => ReplyFormatter::custom_tag_empty(&tag),
                }
            }
            Command::Push { numbers, tag } => {
                let report = self.store.lock().await.add_members(&tag, &numbers).await;
                info!(tag = %tag, added = report.added.len(), duplicates = report.duplicates.len(), invalid = report.invalid.len(), "PUSH applied");
                ReplyFormatter::pushed(&tag, &report)
            }
            Command::Pop { numbers, tag } => {
                match self.store.lock().await.remove_members(&tag, &numbers).await {
                    Ok(report) => {
                        info!(tag = %tag, removed = report.removed.len(), not_found = report.not_found.len(), "POP applied");
                        ReplyFormatter::popped(&tag, &report)
                    }
                    Err(e) => {
                        debug!(tag = %tag, error = %e, "POP on missing tag");
                        ReplyFormatter::pop_missing_tag(&tag)
                    }
                }
            }
            Command::Rename { old, new } => match self.store.lock().await.rename(&old, &new).await {
                Ok(report) => {
                    info!(old = %old, new = %new, count = report.count, "RENAME applied");
                    ReplyFormatter::renamed(&report)
                }
                Err(e) => {
                    debug!(old = %old, new = %new, error = %e, "RENAME rejected");
                    ReplyFormatter::rename_failed(&e)
                }
            },
            Command::Malformed(kind) => ReplyFormatter::usage(kind),
        }
    }

    /// Members saved under `tag`
    pub async fn members(&self, tag: &TagName) -> Option<Vec<PhoneNumber>> {
        self.store.lock().await.get(tag).map(<[PhoneNumber]>::to_vec)
    }

    /// Tag names with member counts
    pub async fn tags(&self) -> Vec<(TagName, usize)> {
        self.store.lock().await.tags()
    }
}
