//! HTTP plumbing: client construction, URL building and the league fan-out

pub mod fetch;
pub mod http_client;
pub mod urls;

pub use fetch::fetch_across_leagues;
pub use http_client::create_http_client_with_timeout;
pub use urls::{build_entity_url, build_stat_url};
