//! UI channel transport: one JSON message per line in, one JSON message per line out.

use std::fmt::Debug;

use futures::future::BoxFuture;
use serde::{Serialize, de::DeserializeOwned};
use tokio::{
    io::{self, AsyncBufReadExt, AsyncRead, AsyncWrite, AsyncWriteExt, BufReader},
    sync::mpsc,
    task::JoinHandle,
};
use tracing::{debug, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::error::ServiceError;

/// What the runtime does after a message has been handled.
#[derive(Debug, PartialEq)]
pub enum Flow<T> {
    /// Keep reading, optionally sending a reply first.
    Continue(Option<T>),
    /// Stop reading and close the plugin.
    Close,
}

/// Message handler of one plugin.
pub trait PluginHandler: Send {
    /// Messages accepted from the UI.
    type Inbound: DeserializeOwned + Debug + Send;
    /// Messages sent to the UI.
    type Outbound: Serialize + Debug + Send;

    /// Handle one message to completion.
    fn handle(&mut self, message: Self::Inbound) -> BoxFuture<'_, Flow<Self::Outbound>>;
    /// Reply sent when an inbound line is not a valid message.
    fn rejection(&self, message: String) -> Self::Outbound;
    /// Called once when the channel ends, whether by close message or end of input.
    fn on_close(&mut self);
}

#[derive(Debug)]
struct WriterClosed;

/// Drive `handler` with the messages read from `reader` until a close message or end of input.
///
/// Replies go through a dedicated writer task so a slow UI never blocks message handling.
/// Messages are handled strictly one after another.
pub async fn run_channel<R, W, H>(reader: R, writer: W, handler: &mut H) -> Result<(), ServiceError>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin + Send + 'static,
    H: PluginHandler,
{
    let (outbound_tx, outbound_rx) = mpsc::unbounded_channel::<String>();
    let writer_task = spawn_writer(writer, outbound_rx);

    let mut lines = BufReader::new(reader).lines();
    let outcome = loop {
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => {
                info!("ui channel reached end of input");
                break Ok(());
            }
            Err(err) => break Err(ServiceError::Channel(err)),
        };
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let message = match serde_json::from_str::<H::Inbound>(line) {
            Ok(message) => message,
            Err(err) => {
                warn!(error = %err, payload = %line, "failed to parse ui message");
                let reply = handler.rejection(format!("malformed message: {err}"));
                if send_message(&outbound_tx, &reply).is_err() {
                    break Ok(());
                }
                continue;
            }
        };

        debug!(?message, "received ui message");
        match handler.handle(message).await {
            Flow::Continue(Some(reply)) => {
                if send_message(&outbound_tx, &reply).is_err() {
                    warn!("ui writer closed; stopping");
                    break Ok(());
                }
            }
            Flow::Continue(None) => {}
            Flow::Close => {
                info!("close requested by ui");
                break Ok(());
            }
        }
    };

    handler.on_close();
    let written = finalize(writer_task, outbound_tx).await;
    outcome.and(written)
}

/// Configure tracing so logs go to stderr, leaving stdout to the UI channel.
pub fn init_tracing() {
    let env_filter =
        tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into());
    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn spawn_writer<W>(
    mut writer: W,
    mut outbound_rx: mpsc::UnboundedReceiver<String>,
) -> JoinHandle<io::Result<()>>
where
    W: AsyncWrite + Unpin + Send + 'static,
{
    tokio::spawn(async move {
        while let Some(line) = outbound_rx.recv().await {
            writer.write_all(line.as_bytes()).await?;
            writer.write_all(b"\n").await?;
            writer.flush().await?;
        }
        writer.shutdown().await
    })
}

fn send_message<T>(tx: &mpsc::UnboundedSender<String>, value: &T) -> Result<(), WriterClosed>
where
    T: Serialize + Debug,
{
    let payload = match serde_json::to_string(value) {
        Ok(payload) => payload,
        Err(err) => {
            warn!(error = %err, "failed to serialize message `{value:?}`");
            return Ok(());
        }
    };

    tx.send(payload).map_err(|_| WriterClosed)
}

async fn finalize(
    writer_task: JoinHandle<io::Result<()>>,
    outbound_tx: mpsc::UnboundedSender<String>,
) -> Result<(), ServiceError> {
    drop(outbound_tx);
    match writer_task.await {
        Ok(result) => result.map_err(ServiceError::Channel),
        Err(err) => {
            warn!(error = %err, "ui writer task failed");
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::FutureExt;
    use serde::Deserialize;
    use tokio::io::AsyncReadExt;

    #[derive(Debug, Deserialize)]
    #[serde(tag = "type", rename_all = "kebab-case")]
    enum EchoInbound {
        Say { text: String },
        Silent,
        Bye,
    }

    #[derive(Debug, Serialize)]
    #[serde(tag = "type", rename_all = "kebab-case")]
    enum EchoOutbound {
        Said { text: String },
        Error { message: String },
    }

    #[derive(Default)]
    struct Echo {
        handled: usize,
        closed: usize,
    }

    impl PluginHandler for Echo {
        type Inbound = EchoInbound;
        type Outbound = EchoOutbound;

        fn handle(&mut self, message: EchoInbound) -> BoxFuture<'_, Flow<EchoOutbound>> {
            async move {
                self.handled += 1;
                match message {
                    EchoInbound::Say { text } => Flow::Continue(Some(EchoOutbound::Said { text })),
                    EchoInbound::Silent => Flow::Continue(None),
                    EchoInbound::Bye => Flow::Close,
                }
            }
            .boxed()
        }

        fn rejection(&self, message: String) -> EchoOutbound {
            EchoOutbound::Error { message }
        }

        fn on_close(&mut self) {
            self.closed += 1;
        }
    }

    async fn run(input: &str, handler: &mut Echo) -> Vec<serde_json::Value> {
        let (writer, mut reader) = io::duplex(64 * 1024);
        run_channel(input.as_bytes(), writer, handler).await.unwrap();

        let mut output = String::new();
        reader.read_to_string(&mut output).await.unwrap();
        output
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect()
    }

    #[tokio::test]
    async fn replies_in_order_and_skips_blank_lines() {
        let mut echo = Echo::default();
        let input = "{\"type\":\"say\",\"text\":\"a\"}\n\n{\"type\":\"silent\"}\n{\"type\":\"say\",\"text\":\"b\"}\n";
        let output = run(input, &mut echo).await;

        assert_eq!(
            output,
            [
                serde_json::json!({ "type": "said", "text": "a" }),
                serde_json::json!({ "type": "said", "text": "b" }),
            ]
        );
        assert_eq!(echo.handled, 3);
        assert_eq!(echo.closed, 1);
    }

    #[tokio::test]
    async fn close_message_stops_reading() {
        let mut echo = Echo::default();
        let input = "{\"type\":\"bye\"}\n{\"type\":\"say\",\"text\":\"late\"}\n";
        let output = run(input, &mut echo).await;

        assert!(output.is_empty());
        assert_eq!(echo.handled, 1);
        assert_eq!(echo.closed, 1);
    }

    #[tokio::test]
    async fn malformed_lines_are_answered_with_error() {
        let mut echo = Echo::default();
        let output = run("not json\n{\"type\":\"say\",\"text\":\"ok\"}\n", &mut echo).await;

        assert_eq!(output.len(), 2);
        assert_eq!(output[0]["type"], "error");
        assert!(
            output[0]["message"]
                .as_str()
                .unwrap()
                .starts_with("malformed message")
        );
        assert_eq!(output[1]["text"], "ok");
    }
}
