use std::collections::HashMap;

use async_trait::async_trait;

use crate::util;

/// What a distance lookup returns for an origin/destination pair.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RouteEstimate {
    pub km: f64,
    pub origin_normalized: String,
    pub destination_normalized: String,
    /// Best-effort toll total along the route; zero when the provider
    /// does not know.
    pub estimated_tolls: f64,
}

/// Seam to the external distance service. Estimates are best effort: a
/// provider may return zero distance rather than fail, and the quoter
/// treats both the same way.
#[async_trait]
pub trait RouteEstimator: Send + Sync {
    async fn estimate(&self, origin: &str, destination: &str) -> Result<RouteEstimate, String>;

    /// Returns a stable name for logging/metrics.
    fn name(&self) -> &str {
        util::short_type_name(std::any::type_name::<Self>())
    }
}

/// Table-backed estimator for tests and offline batch runs. Keys are
/// `"origin|destination"` exactly as queried.
#[derive(Default)]
pub struct FixedRouteEstimator {
    routes: HashMap<String, RouteEstimate>,
}

impl FixedRouteEstimator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_route(mut self, origin: &str, destination: &str, estimate: RouteEstimate) -> Self {
        self.routes
            .insert(format!("{}|{}", origin, destination), estimate);
        self
    }
}

#[async_trait]
impl RouteEstimator for FixedRouteEstimator {
    async fn estimate(&self, origin: &str, destination: &str) -> Result<RouteEstimate, String> {
        self.routes
            .get(&format!("{}|{}", origin, destination))
            .cloned()
            .ok_or_else(|| format!("no route from '{}' to '{}'", origin, destination))
    }
}
