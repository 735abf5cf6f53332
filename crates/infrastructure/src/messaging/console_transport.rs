use anyhow::Result;
use async_trait::async_trait;
use domain::{CollaboratorError, InboundMessage, Reply, ReplySender};
use serde::Serialize;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tokio::sync::{Mutex, mpsc};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Status updates share the message stream but are never commands
pub const STATUS_BROADCAST: &str = "status@broadcast";

/// Parse one JSON line into an inbound message.
///
/// Returns `None` for blank lines, status broadcasts and blank texts.
pub fn parse_inbound_line(line: &str) -> Result<Option<InboundMessage>> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }

    let message: InboundMessage = serde_json::from_str(line)?;
    if message.group_id == STATUS_BROADCAST || message.text.trim().is_empty() {
        return Ok(None);
    }
    Ok(Some(message))
}

/// Read JSON-line messages from `reader` and forward them to `tx`
///
/// Stops at end of input, when the receiver is gone, or on cancellation.
pub async fn read_messages<R>(
    reader: R,
    tx: mpsc::Sender<InboundMessage>,
    cancel_token: CancellationToken,
) -> Result<()>
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = reader.lines();

    loop {
        let line = tokio::select! {
            _ = cancel_token.cancelled() => break,
            line = lines.next_line() => line?,
        };

        let Some(line) = line else {
            info!("Console input closed");
            break;
        };

        match parse_inbound_line(&line) {
            Ok(Some(message)) => {
                debug!(group_id = %message.group_id, sender_id = %message.sender_id, "Inbound message");
                if tx.send(message).await.is_err() {
                    warn!("Dispatcher channel closed, stopping console reader");
                    break;
                }
            }
            Ok(None) => {}
            Err(e) => warn!(error = %e, "Ignoring malformed console input line"),
        }
    }

    Ok(())
}

#[derive(Serialize)]
struct OutboundLine<'a> {
    group_id: &'a str,
    text: &'a str,
    mentions: &'a [String],
}

/// Writes each reply as one JSON line
pub struct JsonLineReplySender<W> {
    writer: Mutex<W>,
}

impl<W> JsonLineReplySender<W>
where
    W: AsyncWrite + Unpin + Send,
{
    pub fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }

    pub fn into_inner(self) -> W {
        self.writer.into_inner()
    }
}

impl JsonLineReplySender<tokio::io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(tokio::io::stdout())
    }
}

#[async_trait]
impl<W> ReplySender for JsonLineReplySender<W>
where
    W: AsyncWrite + Unpin + Send,
{
    async fn send_reply(&self, group_id: &str, reply: &Reply) -> Result<(), CollaboratorError> {
        let line = OutboundLine {
            group_id,
            text: &reply.text,
            mentions: &reply.mentions,
        };
        let mut payload =
            serde_json::to_vec(&line).map_err(|e| CollaboratorError::Failed(e.to_string()))?;
        payload.push(b'\n');

        let mut writer = self.writer.lock().await;
        writer
            .write_all(&payload)
            .await
            .map_err(|e| CollaboratorError::Failed(e.to_string()))?;
        writer
            .flush()
            .await
            .map_err(|e| CollaboratorError::Failed(e.to_string()))?;
        Ok(())
    }
}
