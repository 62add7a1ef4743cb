//! American Soccer Analysis API Client
//!
//! This library fetches entity collections (players, managers, stadiums,
//! referees, teams) and derived statistics (expected goals, expected
//! passing, goals added, salaries) from the American Soccer Analysis API
//! across five American soccer leagues, and resolves human-readable names
//! to API identifiers through approximate string matching.
//!
//! # Examples
//!
//! ```rust,no_run
//! use asa_client::{Client, EntityQuery, League, StatQuery};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), asa_client::ApiError> {
//!     let client = Client::new()?;
//!
//!     // Mix explicit identifiers with fuzzy names; names are resolved
//!     // against a cached index of every player in the API.
//!     let players = client
//!         .get_players(
//!             EntityQuery::new()
//!                 .leagues([League::Mls])
//!                 .name("Carles Gil")
//!                 .id("9z5kZlqRQA"),
//!         )
//!         .await?;
//!
//!     for player in &players {
//!         println!("{}", player["player_name"]);
//!     }
//!
//!     // Statistics endpoints take arbitrary parameters; camelCase keys
//!     // are converted to the API's snake_case.
//!     let shooters = client
//!         .get_players_xgoals(
//!             StatQuery::new()
//!                 .leagues([League::Mls, League::Nwsl])
//!                 .param("minimumShots", 20)
//!                 .param("seasonName", "2024"),
//!         )
//!         .await?;
//!     println!("{} qualifying players", shooters.len());
//!
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod client;
pub mod constants;
pub mod error;
pub mod models;
pub mod query;

mod cache;
mod matcher;

// Re-export the public surface for convenience
pub use client::{Client, ClientBuilder};
pub use error::ApiError;
pub use models::{EntityRecord, EntityType, League};
pub use query::{EntityQuery, StatQuery};

/// Current version of the library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
