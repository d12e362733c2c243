//! Hotspot model and the enumerated report options

use std::fmt;

use chrono::Duration;
use clap::ValueEnum;
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::rewards::{RewardEvent, RewardSummary, TimeWindow};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Online,
    Offline,
}

impl Status {
    /// Anything the explorer reports other than "online" counts as offline
    pub fn from_api(value: &str) -> Self {
        if value.eq_ignore_ascii_case("online") {
            Status::Online
        } else {
            Status::Offline
        }
    }

    pub fn is_online(&self) -> bool {
        *self == Status::Online
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Online => write!(f, "online"),
            Status::Offline => write!(f, "offline"),
        }
    }
}

/// Look-back window selectable on the command line
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize)]
pub enum Timespan {
    #[default]
    #[value(name = "24h")]
    #[serde(rename = "24h")]
    Day,
    #[value(name = "48h")]
    #[serde(rename = "48h")]
    TwoDays,
    #[value(name = "7d")]
    #[serde(rename = "7d")]
    Week,
    #[value(name = "14d")]
    #[serde(rename = "14d")]
    TwoWeeks,
    #[value(name = "30d")]
    #[serde(rename = "30d")]
    Month,
}

impl Timespan {
    pub fn duration(&self) -> Duration {
        match self {
            Timespan::Day => Duration::days(1),
            Timespan::TwoDays => Duration::days(2),
            Timespan::Week => Duration::days(7),
            Timespan::TwoWeeks => Duration::days(14),
            Timespan::Month => Duration::days(30),
        }
    }

    pub fn window(&self) -> TimeWindow {
        TimeWindow::new(self.duration())
    }

    pub fn label(&self) -> &'static str {
        match self {
            Timespan::Day => "24h",
            Timespan::TwoDays => "48h",
            Timespan::Week => "7d",
            Timespan::TwoWeeks => "14d",
            Timespan::Month => "30d",
        }
    }
}

impl fmt::Display for Timespan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Currency {
    #[default]
    Eur,
    Usd,
}

impl Currency {
    /// Currency code as understood by the price API
    pub fn code(&self) -> &'static str {
        match self {
            Currency::Eur => "eur",
            Currency::Usd => "usd",
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::Eur => "€",
            Currency::Usd => "$",
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Hotspot metadata as returned by the explorer lookup
#[derive(Debug, Clone, PartialEq)]
pub struct HotspotInfo {
    pub name: String,
    pub status: Status,
    /// Reward scale as a fraction in [0, 1]
    pub reward_scale: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Hotspot {
    pub name: String,
    pub status: Status,
    /// Reward scale in percent, rounded to 2 decimals
    pub reward_scale: Decimal,
    pub witness_count: usize,
    pub rewards: Vec<RewardEvent>,
    pub window_total: Decimal,
}

impl Hotspot {
    pub fn new(info: HotspotInfo, witness_count: usize, summary: RewardSummary) -> Self {
        Self {
            name: info.name,
            status: info.status,
            reward_scale: scale_to_percent(info.reward_scale),
            witness_count,
            rewards: summary.rewards,
            window_total: summary.total,
        }
    }

    /// Explorer names are dash separated animal names, e.g. `fancy-red-fox`.
    /// Returns `Fancy Red Fox`.
    pub fn display_name(&self) -> String {
        self.name
            .split('-')
            .filter(|word| !word.is_empty())
            .map(title_case)
            .collect::<Vec<_>>()
            .join(" ")
    }
}

fn title_case(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

fn scale_to_percent(fraction: f64) -> Decimal {
    let percent = Decimal::from_f64(fraction * 100.0).unwrap_or_default();
    percent.round_dp(2).clamp(Decimal::ZERO, Decimal::ONE_HUNDRED)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn info(name: &str, scale: f64) -> HotspotInfo {
        HotspotInfo {
            name: name.to_string(),
            status: Status::Online,
            reward_scale: scale,
        }
    }

    #[test]
    fn test_display_name() {
        let hotspot = Hotspot::new(info("fancy-red-fox", 1.0), 0, RewardSummary::default());
        assert_eq!(hotspot.display_name(), "Fancy Red Fox");

        let hotspot = Hotspot::new(info("BIG--blue-WHALE", 1.0), 0, RewardSummary::default());
        assert_eq!(hotspot.display_name(), "Big Blue Whale");
    }

    #[test]
    fn test_reward_scale_in_percent() {
        let hotspot = Hotspot::new(info("a-b-c", 0.8327), 3, RewardSummary::default());
        assert_eq!(hotspot.reward_scale, dec!(83.27));
        assert_eq!(hotspot.witness_count, 3);

        let hotspot = Hotspot::new(info("a-b-c", 1.0), 0, RewardSummary::default());
        assert_eq!(hotspot.reward_scale, dec!(100));

        let hotspot = Hotspot::new(info("a-b-c", 0.0), 0, RewardSummary::default());
        assert_eq!(hotspot.reward_scale, Decimal::ZERO);
    }

    #[test]
    fn test_status_from_api() {
        assert_eq!(Status::from_api("online"), Status::Online);
        assert_eq!(Status::from_api("ONLINE"), Status::Online);
        assert_eq!(Status::from_api("offline"), Status::Offline);
        assert_eq!(Status::from_api("unknown"), Status::Offline);
        assert!(Status::Online.is_online());
    }

    #[test]
    fn test_timespan_durations() {
        assert_eq!(Timespan::default(), Timespan::Day);
        assert_eq!(Timespan::Day.duration(), Duration::hours(24));
        assert_eq!(Timespan::TwoDays.duration(), Duration::hours(48));
        assert_eq!(Timespan::Month.duration(), Duration::days(30));
        assert_eq!(Timespan::Week.to_string(), "7d");
    }

    #[test]
    fn test_timespan_parses_cli_names() {
        assert_eq!(Timespan::from_str("14d", false), Ok(Timespan::TwoWeeks));
        assert_eq!(Timespan::from_str("48h", false), Ok(Timespan::TwoDays));
        assert!(Timespan::from_str("1y", false).is_err());
    }

    #[test]
    fn test_currency() {
        assert_eq!(Currency::default(), Currency::Eur);
        assert_eq!(Currency::Eur.symbol(), "€");
        assert_eq!(Currency::Usd.code(), "usd");
        assert_eq!(Currency::from_str("usd", false), Ok(Currency::Usd));
    }
}
