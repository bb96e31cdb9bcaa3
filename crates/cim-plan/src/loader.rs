//! CSV snapshot loader.
//!
//! # CSV format
//!
//! One row per vehicle, capture order preserved:
//!
//! ```csv
//! vehicle_id,route,edge,distance
//! veh_0,0,approach_n_0,14.2
//! veh_1,2,approach_s_0,11.8
//! veh_2,1,approach_n_0,22.0
//! ```
//!
//! `route` is the numeric route identifier used by the colliding-pair set;
//! `edge` is the vehicle's live lane/edge string, kept verbatim.  `distance`
//! must be finite and ≥ 0: the conflict zone cannot be behind the vehicle,
//! and a NaN distance can never satisfy the separation check no matter how
//! many adjustments are applied, so resolution would not terminate.

use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use cim_core::{EdgeId, RouteId, Snapshot, VehicleId, VehicleState};

use crate::{PlanError, PlanResult};

// ── CSV record ────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct SnapshotRecord {
    vehicle_id: String,
    route:      u16,
    edge:       String,
    distance:   f64,
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load a planning snapshot from a CSV file.
pub fn load_snapshot_csv(path: &Path) -> PlanResult<Snapshot> {
    let file = std::fs::File::open(path).map_err(PlanError::Io)?;
    load_snapshot_reader(file)
}

/// Like [`load_snapshot_csv`] but accepts any `Read` source.
///
/// Useful for testing (pass a `std::io::Cursor`) or for feeds that hand
/// over captures in memory.
pub fn load_snapshot_reader<R: Read>(reader: R) -> PlanResult<Snapshot> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut snapshot = Snapshot::new();

    for result in csv_reader.deserialize::<SnapshotRecord>() {
        let row = result.map_err(|e| PlanError::Parse(e.to_string()))?;
        if !row.distance.is_finite() || row.distance < 0.0 {
            return Err(PlanError::Parse(format!(
                "vehicle {} has invalid distance {} (must be finite and ≥ 0)",
                row.vehicle_id, row.distance
            )));
        }
        snapshot.insert(
            VehicleId(row.vehicle_id),
            VehicleState {
                route: RouteId(row.route),
                edge: EdgeId(row.edge),
                distance: row.distance,
            },
        );
    }

    Ok(snapshot)
}
