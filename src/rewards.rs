//! Reward aggregation
//!
//! Walks one page of hotspot activity (newest first, as the explorer returns
//! it) and collects the reward events that fall inside the look-back window.
//!
//! The explorer reports amounts in bones, the smallest HNT unit. HNT carries
//! 8 decimals, so `100_000_000` bones make one HNT.

use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Result, TrackerError};

/// Number of decimals of the HNT token
pub const HNT_DECIMALS: u32 = 8;

/// Bones per HNT
pub const BONES_PER_HNT: u64 = 10u64.pow(HNT_DECIMALS);

/// One entry of the activity log.
///
/// Only reward transactions carry `rewards`; every other chain event is
/// skipped by the aggregator.
#[derive(Debug, Clone, Deserialize)]
pub struct ActivityRecord {
    #[serde(default)]
    pub time: Option<i64>,
    #[serde(default)]
    pub rewards: Option<Vec<RawReward>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawReward {
    /// Amount in bones
    pub amount: u64,
    #[serde(rename = "type")]
    pub kind: String,
}

impl ActivityRecord {
    fn first_reward(&self) -> Option<&RawReward> {
        self.rewards.as_ref().and_then(|r| r.first())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RewardEvent {
    pub time: DateTime<Utc>,
    /// Amount in HNT
    pub amount: Decimal,
    pub kind: String,
}

/// Look-back window ending at aggregation time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    pub duration: Duration,
}

impl TimeWindow {
    pub fn new(duration: Duration) -> Self {
        Self { duration }
    }

    pub fn start(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        now - self.duration
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RewardSummary {
    pub rewards: Vec<RewardEvent>,
    pub total: Decimal,
}

/// Convert an on-chain amount in bones to HNT. Exact, no floating point.
pub fn bones_to_hnt(bones: u64) -> Decimal {
    Decimal::from_i128_with_scale(bones as i128, HNT_DECIMALS)
}

/// Aggregate rewards inside `window`, anchored to the current time.
pub fn aggregate(records: &[ActivityRecord], window: TimeWindow) -> Result<RewardSummary> {
    aggregate_at(records, window, Utc::now())
}

/// Aggregate rewards inside `window`, anchored to `now`.
///
/// Records must be ordered newest first. Iteration stops at the first reward
/// older than the window start; an event exactly at the window start is kept.
/// Only the first reward entry of a record is counted.
pub fn aggregate_at(
    records: &[ActivityRecord],
    window: TimeWindow,
    now: DateTime<Utc>,
) -> Result<RewardSummary> {
    let window_start = window.start(now);
    let mut summary = RewardSummary::default();

    for record in records {
        let Some(reward) = record.first_reward() else {
            continue;
        };

        let timestamp = record
            .time
            .ok_or_else(|| TrackerError::malformed("activity", "reward record without `time`"))?;
        let time = DateTime::from_timestamp(timestamp, 0).ok_or_else(|| {
            TrackerError::malformed("activity", format!("timestamp {} out of range", timestamp))
        })?;

        if time < window_start {
            debug!("Reached reward at {} before window start {}", time, window_start);
            break;
        }

        let amount = bones_to_hnt(reward.amount);
        summary.total += amount;
        summary.rewards.push(RewardEvent {
            time,
            amount,
            kind: reward.kind.clone(),
        });
    }

    debug!(
        "Aggregated {} rewards totalling {} HNT",
        summary.rewards.len(),
        summary.total
    );
    Ok(summary)
}
