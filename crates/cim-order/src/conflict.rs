//! Route collision and separation predicates.

use rustc_hash::FxHashSet;

use cim_core::{PlanConfig, RouteId};

/// Decides whether two vehicles may cross the conflict zone simultaneously.
///
/// Holds the configured set of colliding route pairs and the safety
/// separation threshold.  Both predicates are pure; the pair set is stored
/// with both orderings so `routes_collide` is symmetric by construction.
#[derive(Clone, Debug)]
pub struct ConflictModel {
    colliding: FxHashSet<(RouteId, RouteId)>,
    threshold: f64,
}

impl ConflictModel {
    /// Build from unordered route pairs and a separation threshold (metres).
    pub fn new(pairs: &[(RouteId, RouteId)], threshold: f64) -> Self {
        let mut colliding = FxHashSet::default();
        for &(a, b) in pairs {
            colliding.insert((a, b));
            colliding.insert((b, a));
        }
        Self { colliding, threshold }
    }

    /// Build from the planner configuration.
    pub fn from_config(config: &PlanConfig) -> Self {
        Self::new(&config.colliding_routes, config.collision_distance_thresh)
    }

    /// Safety separation threshold, metres.
    #[inline]
    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// `true` if the two routes cross inside the conflict zone.
    #[inline]
    pub fn routes_collide(&self, a: RouteId, b: RouteId) -> bool {
        self.colliding.contains(&(a, b))
    }

    /// `true` iff the two (adjusted) distances are strictly more than the
    /// threshold apart.
    #[inline]
    pub fn far_enough(&self, dist_a: f64, dist_b: f64) -> bool {
        (dist_a - dist_b).abs() > self.threshold
    }

    /// An adjustment is required only when the routes collide *and* the
    /// vehicles are not far enough apart.  Non-colliding routes never
    /// require one regardless of proximity.
    #[inline]
    pub fn requires_adjustment(
        &self,
        route_a: RouteId,
        dist_a: f64,
        route_b: RouteId,
        dist_b: f64,
    ) -> bool {
        self.routes_collide(route_a, route_b) && !self.far_enough(dist_a, dist_b)
    }
}
