//! Persistent notification subscription.

use bytes::Bytes;
use futures_util::StreamExt;
use futures_util::stream::BoxStream;
use reqwest::Client;
use url::Url;

use super::StreamError;
use super::sse::SseDecoder;
use crate::objects::NotificationEvent;

/// A live subscription to `GET /notifications/stream/`.
///
/// One subscription exists for the session's lifetime. Connection
/// recovery is not handled here: when the transport ends, the stream
/// ends.
pub struct NotificationStream {
    body: BoxStream<'static, reqwest::Result<Bytes>>,
    decoder: SseDecoder,
}

impl NotificationStream {
    /// Open the subscription against `base_url`.
    pub(crate) async fn connect(http: &Client, base_url: &Url) -> Result<Self, StreamError> {
        let url = base_url.join("/notifications/stream/")?;

        let resp = http
            .get(url)
            .header("Accept", "text/event-stream")
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(StreamError::Refused { status });
        }

        Ok(Self {
            body: resp.bytes_stream().boxed(),
            decoder: SseDecoder::new(),
        })
    }

    /// Wait for the next pushed notification.
    ///
    /// Malformed payloads are returned as [`StreamError::Decode`] so the
    /// caller can drop them and keep reading. `None` means the transport
    /// has closed the stream.
    pub async fn next_event(&mut self) -> Option<Result<NotificationEvent, StreamError>> {
        loop {
            while let Some(payload) = self.decoder.next_frame() {
                // Keep-alive frames carry no data.
                if payload.is_empty() {
                    continue;
                }
                return Some(
                    serde_json::from_str(&payload)
                        .map_err(|source| StreamError::Decode { payload, source }),
                );
            }

            match self.body.next().await {
                Some(Ok(chunk)) => self.decoder.push(&chunk),
                Some(Err(e)) => return Some(Err(StreamError::Http(e))),
                None => return None,
            }
        }
    }
}
