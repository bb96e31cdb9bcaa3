//! `cim-core` — foundational types for the `rust_cim` intersection planner.
//!
//! This crate is a dependency of every other `cim-*` crate.  It intentionally
//! has no `cim-*` dependencies and minimal external ones (only `rand` and
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module       | Contents                                            |
//! |--------------|-----------------------------------------------------|
//! | [`ids`]      | `RouteId`, `VehicleId`, `EdgeId`                    |
//! | [`snapshot`] | `VehicleState`, `Snapshot`                          |
//! | [`config`]   | `PlanConfig`, `OrderMode`                           |
//! | [`rng`]      | `SearchRng` (deterministic, child-derivable)        |
//! | [`error`]    | `CimError`, `CimResult`                             |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                              |
//! |---------|-----------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types. |

pub mod config;
pub mod error;
pub mod ids;
pub mod rng;
pub mod snapshot;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::{OrderMode, PlanConfig};
pub use error::{CimError, CimResult};
pub use ids::{EdgeId, RouteId, VehicleId};
pub use rng::SearchRng;
pub use snapshot::{Snapshot, VehicleState};
