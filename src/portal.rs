//! Billing portal client
//!
//! This module implements the two-step exchange with the consumer web portal:
//! fetch a one-time challenge value, then submit it alongside the consumer
//! number to retrieve the current bill document. Fetches are throttled to the
//! configured minimum interval, and every transport fault is absorbed into the
//! returned outcome so the caller keeps the previous document.

use crate::bill::{self, BillField};
use crate::config::{AccountConfig, Config};
use crate::error::{BillwatchError, Result};
use crate::logging::{LogContext, StructuredLogger, get_logger_with_context};
use serde_json::Value;
use std::time::{Duration, Instant};

/// Result of one refresh attempt. Faults never propagate as errors; the
/// outcome carries the diagnostic and the caller decides how to surface it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The exchange completed and a fresh document replaced the previous one
    Updated,
    /// Called again before the minimum interval elapsed; no network traffic
    Throttled,
    /// The cycle was aborted; the previous document is untouched
    Failed { reason: String },
}

/// Client for the billing portal, owning the current bill document
pub struct PortalClient {
    base_url: String,
    account: AccountConfig,
    timeout: Duration,
    min_interval: Duration,
    last_attempt: Option<Instant>,
    document: Option<Value>,
    logger: StructuredLogger,
}

impl PortalClient {
    /// Create a client from validated configuration
    pub fn new(config: &Config) -> Self {
        let logger = get_logger_with_context(
            LogContext::new("portal")
                .with_field("consumer", config.account.consumer_number.clone()),
        );
        Self {
            base_url: config.portal.base_url.trim_end_matches('/').to_string(),
            account: config.account.clone(),
            timeout: Duration::from_secs(config.portal.timeout_seconds),
            min_interval: Duration::from_secs(config.poll_interval_minutes * 60),
            last_attempt: None,
            document: None,
            logger,
        }
    }

    /// Run one fetch cycle unless the minimum interval has not yet elapsed.
    ///
    /// The attempt timestamp is stamped at the start of every non-throttled
    /// cycle, so failed cycles also wait out the interval before the next try.
    pub async fn refresh_if_due(&mut self) -> FetchOutcome {
        if let Some(at) = self.last_attempt
            && at.elapsed() < self.min_interval
        {
            return FetchOutcome::Throttled;
        }
        self.refresh_now().await
    }

    /// Run one fetch cycle immediately, bypassing the interval gate.
    /// Still stamps the attempt time, so the gate re-arms afterwards.
    pub async fn refresh_now(&mut self) -> FetchOutcome {
        self.last_attempt = Some(Instant::now());

        match self.run_exchange().await {
            Ok(doc) => {
                self.logger.info("Fetched bill document from portal");
                self.document = Some(doc);
                FetchOutcome::Updated
            }
            Err(e) => FetchOutcome::Failed {
                reason: e.to_string(),
            },
        }
    }

    /// The two dependent calls of one cycle, sharing a cookie session.
    /// The challenge token is scoped to this call and dropped on every path.
    async fn run_exchange(&self) -> Result<Value> {
        let session = reqwest::Client::builder()
            .cookie_store(true)
            .timeout(self.timeout)
            .build()?;

        self.logger.debug("Requesting challenge value");
        let token = self.fetch_challenge(&session).await?;
        self.submit_bill_request(&session, &token).await
    }

    async fn fetch_challenge(&self, session: &reqwest::Client) -> Result<String> {
        let resp = session
            .get(self.action_url())
            .query(&[
                ("uiActionName", "RefreshCaptchaViewPay"),
                ("IsAjax", "true"),
                ("FormName", "NewConnection"),
            ])
            .send()
            .await?;

        if !resp.status().is_success() {
            return Err(BillwatchError::portal(format!(
                "challenge endpoint returned {}",
                resp.status()
            )));
        }

        let value: Value = resp.json().await?;
        Ok(challenge_text(&value))
    }

    async fn submit_bill_request(
        &self,
        session: &reqwest::Client,
        token: &str,
    ) -> Result<Value> {
        // BuNumber is accepted in configuration but the portal matches on the
        // consumer number alone; the submitted field stays blank.
        let form = [
            ("txtInput", token),
            ("BuNumber", ""),
            ("ConsumerNo", self.account.consumer_number.as_str()),
        ];

        let resp = session
            .post(self.action_url())
            .query(&[("uiActionName", "postViewPayBill"), ("IsAjax", "true")])
            .form(&form)
            .send()
            .await?;

        let doc: Value = resp.json().await?;
        Ok(doc)
    }

    fn action_url(&self) -> String {
        format!("{}/wss", self.base_url)
    }

    /// The current bill document, if any successful fetch has completed
    pub fn document(&self) -> Option<&Value> {
        self.document.as_ref()
    }

    /// Extract one field from the current document
    pub fn field(&self, field: BillField) -> Option<Value> {
        self.document
            .as_ref()
            .and_then(|doc| bill::extract(doc, field))
    }
}

/// Render the parsed challenge body as the form value to echo back.
/// Strings are used as-is; any other JSON value keeps its JSON rendering.
fn challenge_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn test_config(base_url: &str) -> Config {
        let mut config = Config::default();
        config.account.consumer_number = "170020034907".to_string();
        config.account.business_unit = "4637".to_string();
        config.account.consumer_type = "2".to_string();
        config.portal.base_url = base_url.to_string();
        config.portal.timeout_seconds = 2;
        config
    }

    #[test]
    fn challenge_text_keeps_strings_and_renders_numbers() {
        assert_eq!(challenge_text(&json!("12345")), "12345");
        assert_eq!(challenge_text(&json!(12345)), "12345");
    }

    #[test]
    fn action_url_tolerates_trailing_slash() {
        let with = PortalClient::new(&test_config("http://portal.test/wss/"));
        let without = PortalClient::new(&test_config("http://portal.test/wss"));
        assert_eq!(with.action_url(), "http://portal.test/wss/wss");
        assert_eq!(without.action_url(), "http://portal.test/wss/wss");
    }

    #[tokio::test]
    async fn failed_cycle_still_arms_the_throttle() {
        // Port 1 refuses connections, so the first cycle fails fast
        let mut client = PortalClient::new(&test_config("http://127.0.0.1:1/"));
        let first = client.refresh_if_due().await;
        assert!(matches!(first, FetchOutcome::Failed { .. }));
        assert_eq!(client.document(), None);

        let second = client.refresh_if_due().await;
        assert_eq!(second, FetchOutcome::Throttled);
    }

    #[tokio::test]
    async fn field_is_none_before_first_fetch() {
        let client = PortalClient::new(&test_config("http://127.0.0.1:1/"));
        assert_eq!(client.field(BillField::BillAmount), None);
    }
}
