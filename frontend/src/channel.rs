use armsim_console_core::{ClientError, Result, Transport};
use futures::channel::mpsc::{self, UnboundedSender};
use futures::stream::SplitStream;
use futures::{SinkExt, StreamExt};
use gloo_net::websocket::{futures::WebSocket, Message};
use wasm_bindgen_futures::spawn_local;

/// Write half of the socket, fed through an unbounded queue so sends never block.
#[derive(Clone)]
pub struct SocketTransport {
    tx: UnboundedSender<Message>,
}

impl Transport for SocketTransport {
    fn send_text(&self, text: String) -> Result<()> {
        self.tx
            .unbounded_send(Message::Text(text))
            .map_err(|_| ClientError::closed("socket writer stopped"))
    }
}

pub type Inbound = SplitStream<WebSocket>;

/// Opens the socket and spawns its writer task.
pub fn connect(url: &str) -> Result<(SocketTransport, Inbound)> {
    let ws = WebSocket::open(url).map_err(|e| ClientError::closed(format!("{url}: {e}")))?;
    let (mut write, read) = ws.split();
    let (tx, mut rx) = mpsc::unbounded();

    spawn_local(async move {
        while let Some(msg) = rx.next().await {
            if write.send(msg).await.is_err() {
                break;
            }
        }
    });

    Ok((SocketTransport { tx }, read))
}
