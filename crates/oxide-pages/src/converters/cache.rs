//! Memoized nested-router output.

use super::vue_router::VueRoute;

/// Routes produced for one tree generation and one options fingerprint.
#[derive(Debug, Clone)]
pub(crate) struct CachedRoutes {
    generation: u64,
    fingerprint: String,
    routes: Vec<VueRoute>,
}

impl CachedRoutes {
    pub(crate) fn new(generation: u64, fingerprint: String, routes: Vec<VueRoute>) -> Self {
        Self {
            generation,
            fingerprint,
            routes,
        }
    }

    /// Returns the stored routes if they were produced for this state.
    pub(crate) fn get(&self, generation: u64, fingerprint: &str) -> Option<&[VueRoute]> {
        (self.generation == generation && self.fingerprint == fingerprint)
            .then_some(self.routes.as_slice())
    }
}
