use async_trait::async_trait;
use axum::extract::ws::{Message, WebSocket};
use futures_util::{SinkExt, StreamExt, stream::SplitSink};
use tokio::task::JoinHandle;

use crate::query_console::domain::{
    model::events::query_stream_event::QueryStreamEvent,
    services::query_stream_service::{QueryStreamEventSink, StreamTransportError},
};

/// Writes stream frames as JSON text messages.
///
/// The read half is drained in the background so control frames are answered
/// and a peer close is observed as a failed send.
pub struct WebSocketQueryStreamSink {
    writer: SplitSink<WebSocket, Message>,
    reader: JoinHandle<()>,
}

impl WebSocketQueryStreamSink {
    pub fn new(socket: WebSocket) -> Self {
        let (writer, mut read) = socket.split();
        let reader = tokio::spawn(async move {
            while let Some(message) = read.next().await {
                match message {
                    Ok(Message::Close(_)) | Err(_) => break,
                    Ok(_) => {}
                }
            }
        });

        Self { writer, reader }
    }

    pub async fn close(mut self) {
        let _ = self.writer.send(Message::Close(None)).await;
        let _ = self.writer.close().await;
        self.reader.abort();
    }
}

#[async_trait]
impl QueryStreamEventSink for WebSocketQueryStreamSink {
    async fn send_event(&mut self, event: QueryStreamEvent) -> Result<(), StreamTransportError> {
        let payload =
            serde_json::to_string(&event).map_err(|e| StreamTransportError(e.to_string()))?;

        self.writer
            .send(Message::Text(payload))
            .await
            .map_err(|e| StreamTransportError(e.to_string()))
    }
}
