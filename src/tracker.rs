//! Fetch, aggregate and price a single hotspot
//!
//! Requests run strictly one after another. An unknown hotspot aborts before
//! anything else is requested; a failed price lookup only drops the fiat
//! figure from the report.

use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{info, warn};

use crate::error::Result;
use crate::explorer::ExplorerClient;
use crate::hotspot::{Currency, Hotspot, Timespan};
use crate::price::PriceClient;
use crate::rewards;

#[derive(Debug, Clone)]
pub struct TrackRequest {
    pub wallet_id: String,
    pub timespan: Timespan,
    pub currency: Currency,
    /// Price API id of the reward token
    pub asset_id: String,
    pub fiat_decimals: u32,
}

/// Everything the terminal report needs
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub hotspot: Hotspot,
    pub timespan: Timespan,
    pub currency: Currency,
    pub price: Option<Decimal>,
    pub fiat_total: Option<Decimal>,
}

pub async fn track(
    explorer: &ExplorerClient,
    prices: &PriceClient,
    request: &TrackRequest,
) -> Result<Report> {
    let id = request.wallet_id.as_str();

    let info = explorer.fetch_hotspot(id).await?;
    let witness_count = explorer.fetch_witness_count(id).await?;
    info!("{} has {} witnesses", info.name, witness_count);

    let activity = explorer.fetch_latest_activity(id).await?;
    let summary = rewards::aggregate(&activity, request.timespan.window())?;
    info!(
        "{} rewards in the last {} out of {} activity records",
        summary.rewards.len(),
        request.timespan,
        activity.len()
    );

    let hotspot = Hotspot::new(info, witness_count, summary);

    let price = match prices
        .spot_price(&request.asset_id, request.currency.code())
        .await
    {
        Ok(price) => Some(price),
        Err(e) => {
            warn!("Price lookup failed, omitting fiat total: {}", e);
            None
        }
    };
    let fiat_total = price.map(|p| fiat_value(hotspot.window_total, p, request.fiat_decimals));

    Ok(Report {
        hotspot,
        timespan: request.timespan,
        currency: request.currency,
        price,
        fiat_total,
    })
}

pub fn fiat_value(tokens: Decimal, price: Decimal, decimals: u32) -> Decimal {
    (tokens * price).round_dp(decimals)
}
