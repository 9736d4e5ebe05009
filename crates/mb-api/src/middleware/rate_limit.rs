//! Per-client rate limits, keyed by IP.
//!
//! The key is taken from `X-Forwarded-For`/`X-Real-IP` when present and the
//! peer address otherwise, so the server must be started with connect info.

/// Credential endpoints: one token every 200ms, burst of 10
pub const AUTH_REPLENISH_MS: u64 = 200;
pub const AUTH_BURST_SIZE: u32 = 10;

/// Topic, goal and stats endpoints: one token every 50ms, burst of 50
pub const GENERAL_REPLENISH_MS: u64 = 50;
pub const GENERAL_BURST_SIZE: u32 = 50;

/// Build a `tower_governor` layer that replenishes one request every
/// `$replenish_ms` milliseconds and allows bursts of `$burst`.
#[macro_export]
macro_rules! make_rate_limit_layer {
    ($replenish_ms:expr, $burst:expr) => {
        ::tower_governor::GovernorLayer::new(
            ::tower_governor::governor::GovernorConfigBuilder::default()
                .key_extractor(::tower_governor::key_extractor::SmartIpKeyExtractor)
                .per_millisecond($replenish_ms)
                .burst_size($burst)
                .use_headers()
                .finish()
                .expect("rate limit quota must be non-zero"),
        )
    };
}
