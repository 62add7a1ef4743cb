//! Crate-wide constants and configuration values
//!
//! Centralizes the API endpoint layout and the defaults used by
//! [`crate::ClientBuilder`] so nothing is scattered as magic values.

/// Root of the American Soccer Analysis API, without the version segment
pub const BASE_URL: &str = "https://app.americansocceranalysis.com/api";

/// API version segment appended to the base URL
pub const API_VERSION: &str = "v1";

/// Maximum match distance a fuzzy name lookup may have and still be accepted.
/// Scores are distances in `[0, 1]` where 0 is an exact match, so the top
/// candidate is accepted only when its score is strictly below this value.
pub const DEFAULT_MAX_MATCH_SCORE: f64 = 0.35;

/// Default timeout for HTTP requests in seconds
pub const DEFAULT_HTTP_TIMEOUT_SECONDS: u64 = 30;

/// Maximum number of idle connections per host in the HTTP client pool
pub const HTTP_POOL_MAX_IDLE_PER_HOST: usize = 100;
