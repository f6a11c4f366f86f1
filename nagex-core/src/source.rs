//! Data-source seams over the SDK clients.
//!
//! Processors stay generic over these traits so tests can substitute
//! scripted sources for the real HTTP client.

use async_trait::async_trait;

use nagex_sdk::client::{FetchError, NotificationStream, OrderClient, StreamError, UpdateError};
use nagex_sdk::objects::{NotificationEvent, OrderId, OrderStatus, StatusResult};

/// Read/write access to the order status endpoints.
#[async_trait]
pub trait StatusSource: Send + Sync {
    /// Read the current status of an order.
    async fn fetch_status(&self, order_id: &OrderId) -> Result<StatusResult, FetchError>;

    /// Request a status change for an order.
    async fn update_status(
        &self,
        order_id: &OrderId,
        new_status: OrderStatus,
    ) -> Result<StatusResult, UpdateError>;
}

#[async_trait]
impl StatusSource for OrderClient {
    async fn fetch_status(&self, order_id: &OrderId) -> Result<StatusResult, FetchError> {
        OrderClient::fetch_status(self, order_id).await
    }

    async fn update_status(
        &self,
        order_id: &OrderId,
        new_status: OrderStatus,
    ) -> Result<StatusResult, UpdateError> {
        OrderClient::update_status(self, order_id, new_status).await
    }
}

/// A sequence of pushed notifications.
#[async_trait]
pub trait NotificationSource: Send {
    /// Next pushed event; `None` when the transport has ended the
    /// stream.
    async fn next_event(&mut self) -> Option<Result<NotificationEvent, StreamError>>;
}

#[async_trait]
impl NotificationSource for NotificationStream {
    async fn next_event(&mut self) -> Option<Result<NotificationEvent, StreamError>> {
        NotificationStream::next_event(self).await
    }
}
