//! Location provider seam.
//!
//! The orchestrator only needs one `(lat, lon)` fix per refresh cycle. Real
//! positioning hardware and permission UX live outside this crate; what ships
//! here is the collaborator trait, a static provider fed from configuration,
//! and the cache/timeout wrapper that implements the one-shot request
//! contract (15 s timeout, 60 s cache age by default).

use std::time::{Duration, Instant};

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::types::{Coordinate, LocationError};

#[async_trait]
pub trait LocationProvider: Send + Sync {
    /// One-shot location request: a fix or an error, once per invocation.
    async fn locate(&self) -> Result<Coordinate, LocationError>;
}

/// Provider that always reports the same configured coordinate.
#[derive(Debug, Clone)]
pub struct StaticLocation {
    coord: Coordinate,
}

impl StaticLocation {
    pub fn new(coord: Coordinate) -> Self {
        Self { coord }
    }
}

#[async_trait]
impl LocationProvider for StaticLocation {
    async fn locate(&self) -> Result<Coordinate, LocationError> {
        Ok(self.coord)
    }
}

/// Wrapper applying the request contract to any provider: a fix younger than
/// `max_cache_age` is reused without touching the inner provider, and a fresh
/// request is abandoned after `timeout`.
pub struct CachedLocation<P> {
    inner: P,
    timeout: Duration,
    max_cache_age: Duration,
    last_fix: Mutex<Option<(Instant, Coordinate)>>,
}

impl<P> CachedLocation<P> {
    pub fn new(inner: P, timeout: Duration, max_cache_age: Duration) -> Self {
        Self {
            inner,
            timeout,
            max_cache_age,
            last_fix: Mutex::new(None),
        }
    }
}

#[async_trait]
impl<P: LocationProvider> LocationProvider for CachedLocation<P> {
    async fn locate(&self) -> Result<Coordinate, LocationError> {
        if let Some((at, coord)) = *self.last_fix.lock() {
            if at.elapsed() <= self.max_cache_age {
                tracing::debug!(age_ms = at.elapsed().as_millis() as u64, "reusing cached fix");
                return Ok(coord);
            }
        }

        match tokio::time::timeout(self.timeout, self.inner.locate()).await {
            Ok(Ok(coord)) => {
                *self.last_fix.lock() = Some((Instant::now(), coord));
                Ok(coord)
            }
            Ok(Err(e)) => Err(e),
            Err(_) => Err(LocationError::Timeout),
        }
    }
}
