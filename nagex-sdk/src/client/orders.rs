//! Typed HTTP client for the order-tracking endpoints.

use std::sync::Arc;

use reqwest::Client;
use url::Url;

use super::{FetchError, NotificationStream, StreamError, UpdateError};
use crate::csrf::CsrfTokenSource;
use crate::objects::{LocationReport, OrderId, OrderStatus, StatusResult};

/// Typed HTTP client for the order service.
///
/// Holds no mutable state of its own: results are handed back to the
/// caller, and the CSRF token is re-read from the [`CsrfTokenSource`]
/// on every mutating request so rotated tokens stay fresh.
#[derive(Clone)]
pub struct OrderClient {
    http: Client,
    base_url: Url,
    csrf: Arc<dyn CsrfTokenSource>,
}

impl OrderClient {
    /// Create a new `OrderClient`.
    ///
    /// * `base_url` – root URL of the order service.
    /// * `csrf` – source of the anti-forgery token for mutating calls.
    pub fn new(base_url: Url, csrf: Arc<dyn CsrfTokenSource>) -> Self {
        Self {
            http: Client::new(),
            base_url,
            csrf,
        }
    }

    /// Replace the default `reqwest::Client` with a custom one.
    pub fn with_http_client(mut self, client: Client) -> Self {
        self.http = client;
        self
    }

    /// `GET /orders/{order_id}/status/` — read the current status.
    pub async fn fetch_status(&self, order_id: &OrderId) -> Result<StatusResult, FetchError> {
        let url = self.base_url.join(&format!("/orders/{order_id}/status/"))?;

        let resp = self.http.get(url).send().await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(FetchError::Api { status, body });
        }
        let bytes = resp.bytes().await?;
        serde_json::from_slice(&bytes).map_err(FetchError::Json)
    }

    /// `POST /orders/{order_id}/status/update/` — operator status change.
    ///
    /// The anti-forgery token is read at call time; the call fails with
    /// [`UpdateError::MissingCsrfToken`] when none is available.
    pub async fn update_status(
        &self,
        order_id: &OrderId,
        new_status: OrderStatus,
    ) -> Result<StatusResult, UpdateError> {
        let token = self.csrf.token().ok_or(UpdateError::MissingCsrfToken)?;
        let url = self
            .base_url
            .join(&format!("/orders/{order_id}/status/update/"))?;

        let resp = self
            .http
            .post(url)
            .form(&[
                ("status", new_status.as_str()),
                ("csrfmiddlewaretoken", token.as_str()),
            ])
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(UpdateError::Rejected { status, body });
        }
        let bytes = resp.bytes().await?;
        serde_json::from_slice(&bytes).map_err(UpdateError::Json)
    }

    /// `POST /delivery/location/update/` — fire-and-forget location
    /// report for delivery agents.
    pub async fn report_location(&self, report: &LocationReport) -> Result<(), UpdateError> {
        let token = self.csrf.token().ok_or(UpdateError::MissingCsrfToken)?;
        let url = self.base_url.join("/delivery/location/update/")?;

        let resp = self
            .http
            .post(url)
            .form(&[
                ("latitude", report.latitude.to_string()),
                ("longitude", report.longitude.to_string()),
                ("csrfmiddlewaretoken", token),
            ])
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(UpdateError::Rejected { status, body });
        }
        Ok(())
    }

    /// `GET /notifications/stream/` — open the push notification stream.
    pub async fn notifications(&self) -> Result<NotificationStream, StreamError> {
        NotificationStream::connect(&self.http, &self.base_url).await
    }
}
