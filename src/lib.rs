//! Hotspot Tracker - Helium hotspot status and rewards at a glance
//!
//! Looks up a single hotspot on the Helium explorer API and reports its
//! online status, reward scale, witness count and the rewards it earned over
//! a recent window, with the total converted to a fiat currency.
//!
//! # How it works
//!
//! 1. The hotspot metadata is fetched; an unknown id aborts the run
//! 2. The witness list is fetched and counted
//! 3. The latest page of activity is fetched (cursor first, then the page)
//! 4. Rewards are aggregated newest first until one falls outside the window
//! 5. The window total is priced through CoinGecko
//!
//! Amounts on chain are integers in bones; 1 HNT = 100,000,000 bones.

pub mod config;
pub mod error;
pub mod explorer;
pub mod hotspot;
pub mod price;
pub mod rewards;
pub mod tracker;

pub use config::Config;
pub use error::TrackerError;
pub use explorer::ExplorerClient;
pub use hotspot::{Currency, Hotspot, HotspotInfo, Status, Timespan};
pub use price::PriceClient;
pub use rewards::{aggregate, bones_to_hnt, ActivityRecord, RewardEvent, RewardSummary, TimeWindow};
pub use tracker::{track, Report, TrackRequest};
