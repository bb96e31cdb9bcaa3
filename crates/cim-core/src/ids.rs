//! Identifier types for the planner's three namespaces.
//!
//! Routes are small integers: the collision matrix is configured as pairs of
//! route numbers, so `RouteId` is a typed integer wrapper.  Vehicle and edge
//! identifiers come from the external traffic feed as strings and are kept
//! as opaque equality keys — in particular an `EdgeId` (the vehicle's live
//! lane/edge) is *not* derivable from its `RouteId` and must never be
//! compared against one.

use std::fmt;

// ── RouteId ───────────────────────────────────────────────────────────────────

/// A planned-path identifier, used for collision-pair lookup.
///
/// `u16` keeps pair sets compact; intersections have a handful of routes.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RouteId(pub u16);

impl fmt::Display for RouteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RouteId({})", self.0)
    }
}

/// Generate an opaque string-keyed ID wrapper for feed-supplied identifiers.
macro_rules! string_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident;) => {
        $(#[$attr])*
        #[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        $vis struct $name(pub String);

        impl $name {
            /// Borrow the raw identifier string.
            #[inline]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_owned())
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                // pad() honours width/alignment flags so IDs line up in
                // formatted tables.
                f.pad(&self.0)
            }
        }
    };
}

string_id! {
    /// A vehicle identifier as supplied by the external feed (e.g. `veh_3`).
    pub struct VehicleId;
}

string_id! {
    /// The vehicle's current lane/edge — a live position key, distinct from
    /// its route.  Treated as an opaque equality key throughout.
    pub struct EdgeId;
}
