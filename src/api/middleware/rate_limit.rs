//! Per-client rate limiting using a token bucket.

use governor::clock::QuantaInstant;
use governor::middleware::NoOpMiddleware;
use std::sync::Arc;
use tower_governor::{
    GovernorLayer,
    governor::{GovernorConfig, GovernorConfigBuilder},
    key_extractor::{KeyExtractor, PeerIpKeyExtractor, SmartIpKeyExtractor},
};

/// Sustained requests per second per client.
const PER_SECOND: u64 = 5;
/// Requests a client may issue at once before being throttled.
const BURST_SIZE: u32 = 50;

type Layer<K> = GovernorLayer<K, NoOpMiddleware<QuantaInstant>, axum::body::Body>;

fn config<K: KeyExtractor>(key_extractor: K) -> Arc<GovernorConfig<K, NoOpMiddleware<QuantaInstant>>> {
    Arc::new(
        GovernorConfigBuilder::default()
            .key_extractor(key_extractor)
            .per_second(PER_SECOND)
            .burst_size(BURST_SIZE)
            .finish()
            .expect("rate limit quota constants are non-zero"),
    )
}

/// Rate limiter keyed by the socket peer address.
///
/// Requests exceeding the limit receive `429 Too Many Requests`. The router
/// must be served with `into_make_service_with_connect_info::<SocketAddr>`.
pub fn layer() -> Layer<PeerIpKeyExtractor> {
    GovernorLayer::new(config(PeerIpKeyExtractor))
}

/// Rate limiter keyed by `X-Forwarded-For` / `X-Real-IP` / `Forwarded`,
/// falling back to the peer address.
///
/// Only safe behind a trusted reverse proxy that overwrites these headers.
pub fn proxy_layer() -> Layer<SmartIpKeyExtractor> {
    GovernorLayer::new(config(SmartIpKeyExtractor))
}
