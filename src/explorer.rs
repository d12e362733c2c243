//! Helium explorer API client
//!
//! Three resources are read for a hotspot:
//! - `/v1/hotspots/{id}` metadata (name, online status, reward scale)
//! - `/v1/hotspots/{id}/witnesses` witness list, only its length is kept
//! - `/v1/hotspots/{id}/activity` cursor paginated activity log
//!
//! Every response is wrapped in a `{"data": ..}` envelope. Unknown hotspots
//! are reported either with a 404 or with an `error` field in the payload.

use std::time::Duration;

use reqwest::{Client, StatusCode, Url};
use serde::de::{DeserializeOwned, IgnoredAny};
use serde::Deserialize;
use tracing::{debug, info};

use crate::error::{Result, TrackerError};
use crate::hotspot::{HotspotInfo, Status};
use crate::rewards::ActivityRecord;

pub const DEFAULT_EXPLORER_URL: &str = "https://api.helium.io";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

const USER_AGENT: &str = concat!("hotspot-tracker/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Deserialize)]
struct Envelope<T> {
    data: T,
}

#[derive(Debug, Deserialize)]
struct ActivityPage {
    #[serde(default)]
    data: Vec<ActivityRecord>,
    #[serde(default)]
    cursor: Option<String>,
}

#[derive(Debug, Deserialize)]
struct HotspotData {
    name: String,
    status: HotspotStatusData,
    reward_scale: f64,
}

#[derive(Debug, Deserialize)]
struct HotspotStatusData {
    online: String,
}

/// Explorer API client
pub struct ExplorerClient {
    client: Client,
    base_url: String,
}

impl ExplorerClient {
    pub fn new(base_url: &str, timeout: Duration) -> Self {
        // Fall back to a default client if the builder fails
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// `{base}/v1/hotspots/{id}[/{resource}]`, with the id kept as a single
    /// percent-encoded path segment.
    fn hotspot_url(&self, id: &str, resource: Option<&str>) -> Result<Url> {
        if id.trim().is_empty() {
            return Err(TrackerError::InvalidWallet(id.to_string()));
        }

        let mut url =
            Url::parse(&self.base_url).map_err(|_| TrackerError::BaseUrl(self.base_url.clone()))?;
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|_| TrackerError::BaseUrl(self.base_url.clone()))?;
            segments.pop_if_empty().extend(["v1", "hotspots"]).push(id);
            if let Some(resource) = resource {
                segments.push(resource);
            }
        }
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        resource: &'static str,
        url: Url,
        query: &[(&str, &str)],
    ) -> Result<T> {
        debug!("GET {} ({})", url, resource);
        let resp = self
            .client
            .get(url)
            .query(query)
            .send()
            .await
            .map_err(TrackerError::transport(resource))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(TrackerError::Http { resource, status });
        }

        let body = resp
            .bytes()
            .await
            .map_err(TrackerError::transport(resource))?;
        serde_json::from_slice(&body).map_err(|e| TrackerError::malformed(resource, e))
    }

    /// Look up hotspot metadata. Fails with `InvalidWallet` for unknown ids.
    pub async fn fetch_hotspot(&self, id: &str) -> Result<HotspotInfo> {
        let url = self.hotspot_url(id, None)?;
        let payload = match self.get_json::<serde_json::Value>("hotspot", url, &[]).await {
            Ok(payload) => payload,
            Err(TrackerError::Http { status, .. })
                if status == StatusCode::NOT_FOUND || status == StatusCode::BAD_REQUEST =>
            {
                return Err(TrackerError::InvalidWallet(id.to_string()));
            }
            Err(e) => return Err(e),
        };

        if reports_error(&payload) {
            return Err(TrackerError::InvalidWallet(id.to_string()));
        }

        let envelope: Envelope<HotspotData> =
            serde_json::from_value(payload).map_err(|e| TrackerError::malformed("hotspot", e))?;
        let data = envelope.data;

        info!("Found hotspot {} ({})", data.name, data.status.online);
        Ok(HotspotInfo {
            name: data.name,
            status: Status::from_api(&data.status.online),
            reward_scale: data.reward_scale,
        })
    }

    /// Number of witnesses currently recorded for the hotspot
    pub async fn fetch_witness_count(&self, id: &str) -> Result<usize> {
        let url = self.hotspot_url(id, Some("witnesses"))?;
        let envelope: Envelope<Vec<IgnoredAny>> = self.get_json("witnesses", url, &[]).await?;
        Ok(envelope.data.len())
    }

    /// Most recent page of the activity log, newest first.
    ///
    /// The first request only yields the pagination cursor; the page itself
    /// comes from a second request with that cursor. Older pages are never
    /// fetched.
    pub async fn fetch_latest_activity(&self, id: &str) -> Result<Vec<ActivityRecord>> {
        let url = self.hotspot_url(id, Some("activity"))?;
        let head: ActivityPage = self.get_json("activity", url.clone(), &[]).await?;

        let Some(cursor) = head.cursor else {
            debug!("Activity response carried no cursor, using it as the page");
            return Ok(head.data);
        };

        let page: ActivityPage = self
            .get_json("activity", url, &[("cursor", cursor.as_str())])
            .await?;
        debug!("Fetched {} activity records", page.data.len());
        Ok(page.data)
    }
}

/// The explorer signals unknown ids with an `error` field, either at the top
/// level or inside `data`.
fn reports_error(payload: &serde_json::Value) -> bool {
    let has_error = |v: &serde_json::Value| v.get("error").is_some_and(|e| !e.is_null());
    has_error(payload) || payload.get("data").is_some_and(has_error)
}
