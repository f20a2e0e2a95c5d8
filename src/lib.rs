//! RoyaleAPI client: typed players, clans and tournaments with a local rate
//! governor and per-resource expiring caches.
//!
//! ```no_run
//! use royale_client::{ClientConfig, RequestOptions, RoyaleClient};
//!
//! # async fn run() -> royale_client::ClientResult<()> {
//! let config = ClientConfig {
//!     token: Some("my-token".to_string()),
//!     ..Default::default()
//! };
//! let client = RoyaleClient::new(config)?;
//! let clan = client.clans().get_data("#2CCCP", &RequestOptions::none()).await?;
//! println!("{:?}", clan.name);
//! # Ok(())
//! # }
//! ```

pub mod apis;
pub mod cache;
pub mod client;
pub mod clock;
pub mod config;
pub mod errors;
pub mod logger;
pub mod stores;
pub mod structures;
pub mod tags;

pub use apis::{ApiFetcher, ApiRequest, RateLimitInfo, RateLimiter, RequestOptions, RoyaleApiClient};
pub use cache::{CacheCapacity, CacheStats, ExpiringStore};
pub use client::RoyaleClient;
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{ClientConfig, Config};
pub use errors::{ClientError, ClientResult};
pub use stores::{ClanSearch, ClanStore, PlayerStore, TournamentStore};
pub use tags::normalize_tag;
