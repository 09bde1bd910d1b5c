//! Duplex channel abstraction and the WebSocket implementation.

use async_trait::async_trait;
use futures_util::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio_tungstenite::tungstenite::protocol::Message;
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};
use tracing::debug;

use crate::error::SessionError;

/// A message-oriented, ordered, bidirectional channel carrying one
/// envelope frame per logical message.
///
/// `recv` returning `None` means the peer closed the channel; an `Err`
/// item is a transport failure. Ordering is the transport's contract and
/// is what makes fragment arrival order safe to treat as playback order.
#[async_trait]
pub trait DuplexChannel: Send {
    async fn send(&mut self, frame: String) -> Result<(), SessionError>;

    async fn recv(&mut self) -> Option<Result<String, SessionError>>;

    /// Close the channel. Safe to call more than once.
    async fn close(&mut self) -> Result<(), SessionError>;
}

/// WebSocket-backed duplex channel. Text frames carry envelopes; ping,
/// pong, and binary frames are not part of the protocol and are dropped.
pub struct WsChannel {
    inner: WebSocketStream<MaybeTlsStream<TcpStream>>,
}

impl WsChannel {
    /// Establish a connection to a synthesis endpoint. Authentication
    /// headers and retry policy belong to the caller's connection-setup
    /// layer, not here.
    pub async fn connect(url: &str) -> Result<Self, SessionError> {
        let (inner, _) = connect_async(url)
            .await
            .map_err(|e| SessionError::Connection(e.to_string()))?;
        debug!(url, "channel connected");
        Ok(Self { inner })
    }
}

#[async_trait]
impl DuplexChannel for WsChannel {
    async fn send(&mut self, frame: String) -> Result<(), SessionError> {
        self.inner
            .send(Message::Text(frame.into()))
            .await
            .map_err(|e| SessionError::Connection(e.to_string()))
    }

    async fn recv(&mut self) -> Option<Result<String, SessionError>> {
        loop {
            match self.inner.next().await? {
                Ok(Message::Text(text)) => return Some(Ok(text.to_string())),
                Ok(Message::Close(_)) => return None,
                Ok(_) => continue,
                Err(e) => return Some(Err(SessionError::Connection(e.to_string()))),
            }
        }
    }

    async fn close(&mut self) -> Result<(), SessionError> {
        use tokio_tungstenite::tungstenite::Error as WsError;
        match self.inner.close(None).await {
            Ok(()) | Err(WsError::ConnectionClosed) | Err(WsError::AlreadyClosed) => Ok(()),
            Err(e) => Err(SessionError::Connection(e.to_string())),
        }
    }
}
