//! HTTP collaborators: report POST and catalog GET over a ureq agent.
//!
//! Both are synchronous and block the tick loop while in flight. The agent
//! carries an overall timeout so a stuck request only stalls sampling for
//! a bounded time. There is no retry.

use std::time::Duration;

use stockbox_traits::{Ack, CatalogEntry, CatalogSource, ReportEvent, ReportSink};

use crate::catalog::parse_catalog_json;
use crate::error::{HwError, Result};
use crate::payload::ReportPayload;

fn build_agent(timeout: Duration) -> ureq::Agent {
    ureq::AgentBuilder::new()
        .timeout(timeout)
        .user_agent(concat!("stockbox/", env!("CARGO_PKG_VERSION")))
        .build()
}

fn map_ureq(e: ureq::Error) -> HwError {
    match e {
        ureq::Error::Status(code, _) => HwError::Status(code),
        ureq::Error::Transport(t) => HwError::Transport(t.to_string()),
    }
}

fn check_url(url: &str) -> Result<()> {
    if url.starts_with("http://") || url.starts_with("https://") {
        Ok(())
    } else {
        Err(HwError::Transport(format!(
            "url must start with http:// or https://: {url}"
        )))
    }
}

/// Posts each report as one JSON object.
pub struct HttpReportSink {
    agent: ureq::Agent,
    url: String,
    zone: String,
}

impl HttpReportSink {
    pub fn new(url: impl Into<String>, zone: impl Into<String>, timeout: Duration) -> Result<Self> {
        let url = url.into();
        check_url(&url)?;
        Ok(Self {
            agent: build_agent(timeout),
            url,
            zone: zone.into(),
        })
    }
}

impl ReportSink for HttpReportSink {
    fn submit(
        &mut self,
        event: &ReportEvent,
    ) -> std::result::Result<Ack, Box<dyn std::error::Error + Send + Sync>> {
        let body = ReportPayload::new(event, &self.zone).to_json();
        let resp = self
            .agent
            .post(&self.url)
            .set("Content-Type", "application/json")
            .send_string(&body)
            .map_err(map_ureq)?;
        let status = resp.status();
        if !(200..300).contains(&status) {
            return Err(Box::new(HwError::Status(status)));
        }
        tracing::debug!(status, url = %self.url, "report posted");
        Ok(Ack { status })
    }
}

/// Fetches the catalog document with a GET.
pub struct HttpCatalogSource {
    agent: ureq::Agent,
    url: String,
}

impl HttpCatalogSource {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let url = url.into();
        check_url(&url)?;
        Ok(Self {
            agent: build_agent(timeout),
            url,
        })
    }
}

impl CatalogSource for HttpCatalogSource {
    fn fetch_all(
        &mut self,
    ) -> std::result::Result<Vec<CatalogEntry>, Box<dyn std::error::Error + Send + Sync>> {
        let resp = self.agent.get(&self.url).call().map_err(map_ureq)?;
        let text = resp.into_string().map_err(HwError::from)?;
        let entries = parse_catalog_json(&text)?;
        tracing::debug!(url = %self.url, count = entries.len(), "catalog fetched");
        Ok(entries)
    }
}
