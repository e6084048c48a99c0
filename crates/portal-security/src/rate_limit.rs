//! Per-client login rate limiting

use std::net::IpAddr;
use std::num::NonZeroU32;
use std::time::Duration;

use governor::clock::{Clock, DefaultClock};
use governor::{DefaultKeyedRateLimiter, Quota, RateLimiter};
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Error, Debug)]
#[error("Too many attempts, retry in {}s", .retry_after.as_secs().max(1))]
pub struct RateLimitExceeded {
    pub retry_after: Duration,
}

/// Keyed token bucket over client IPs.
///
/// Owned by the application state; callers periodically invoke
/// [`LoginRateLimiter::purge_stale`] to drop idle buckets.
pub struct LoginRateLimiter {
    limiter: DefaultKeyedRateLimiter<IpAddr>,
    clock: DefaultClock,
}

impl LoginRateLimiter {
    pub fn new(per_minute: u32, burst: u32) -> Self {
        let per_minute = NonZeroU32::new(per_minute).unwrap_or(NonZeroU32::MIN);
        let burst = NonZeroU32::new(burst).unwrap_or(NonZeroU32::MIN);
        let quota = Quota::per_minute(per_minute).allow_burst(burst);
        debug!("Login rate limiter: {}/min, burst {}", per_minute, burst);

        Self {
            limiter: RateLimiter::keyed(quota),
            clock: DefaultClock::default(),
        }
    }

    pub fn check(&self, ip: IpAddr) -> Result<(), RateLimitExceeded> {
        self.limiter.check_key(&ip).map_err(|not_until| {
            let retry_after = not_until.wait_time_from(self.clock.now());
            warn!("Login rate limit exceeded for {}", ip);
            RateLimitExceeded { retry_after }
        })
    }

    pub fn purge_stale(&self) {
        self.limiter.retain_recent();
        self.limiter.shrink_to_fit();
    }

    pub fn tracked_clients(&self) -> usize {
        self.limiter.len()
    }
}
