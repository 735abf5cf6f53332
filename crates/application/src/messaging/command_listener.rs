use std::sync::Arc;

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

use domain::{InboundMessage, ReplySender};

use super::CommandDispatcher;

/// Feeds inbound chat messages to the dispatcher one at a time
pub struct CommandListener {
    dispatcher: Arc<CommandDispatcher>,
    sender: Arc<dyn ReplySender>,
    cancel_token: CancellationToken,
}

impl CommandListener {
    pub fn new(
        dispatcher: Arc<CommandDispatcher>,
        sender: Arc<dyn ReplySender>,
        cancel_token: CancellationToken,
    ) -> Self {
        Self {
            dispatcher,
            sender,
            cancel_token,
        }
    }

    /// Process messages until the channel closes or the token is cancelled
    pub async fn start(&self, mut rx: mpsc::Receiver<InboundMessage>) {
        info!("Listening for commands");

        loop {
            tokio::select! {
                _ = self.cancel_token.cancelled() => {
                    info!("Command listener cancelled");
                    break;
                }
                msg = rx.recv() => match msg {
                    Some(message) => self.handle_message(&message).await,
                    None => {
                        warn!("Inbound message channel closed");
                        break;
                    }
                },
            }
        }
    }

    /// Dispatch one message and deliver its reply, if any
    pub async fn handle_message(&self, message: &InboundMessage) {
        let Some(reply) = self.dispatcher.dispatch(message).await else {
            return;
        };

        if let Err(e) = self.sender.send_reply(&message.group_id, &reply).await {
            error!(group_id = %message.group_id, error = %e, "Failed to send reply");
        }
    }
}
