//! Spot price lookup against the CoinGecko simple price API

use std::collections::HashMap;
use std::time::Duration;

use reqwest::Client;
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use tracing::debug;

use crate::error::{Result, TrackerError};

pub const DEFAULT_PRICE_URL: &str = "https://api.coingecko.com";
pub const DEFAULT_ASSET_ID: &str = "helium";

/// `{"helium": {"eur": 12.34}}`
type SimplePrice = HashMap<String, HashMap<String, f64>>;

pub struct PriceClient {
    client: Client,
    base_url: String,
}

impl PriceClient {
    pub fn new(base_url: &str, timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Price of one unit of `asset` in `currency`
    pub async fn spot_price(&self, asset: &str, currency: &str) -> Result<Decimal> {
        let url = format!("{}/api/v3/simple/price", self.base_url);
        let resp = self
            .client
            .get(&url)
            .query(&[("ids", asset), ("vs_currencies", currency)])
            .send()
            .await
            .map_err(TrackerError::transport("price"))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(TrackerError::Http {
                resource: "price",
                status,
            });
        }

        let quotes: SimplePrice = resp
            .json()
            .await
            .map_err(|e| TrackerError::malformed("price", e))?;

        let quote = quotes
            .get(asset)
            .and_then(|q| q.get(currency))
            .copied()
            .ok_or_else(|| TrackerError::Price {
                asset: asset.to_string(),
                currency: currency.to_string(),
            })?;
        debug!("{} price: {} {}", asset, quote, currency);

        Decimal::from_f64(quote).ok_or_else(|| {
            TrackerError::malformed("price", format!("{} is not a valid price", quote))
        })
    }
}
