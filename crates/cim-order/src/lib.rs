//! `cim-order` — route conflict model and passing-order evaluation.
//!
//! # Crate layout
//!
//! | Module       | Contents                                            |
//! |--------------|-----------------------------------------------------|
//! | [`conflict`] | `ConflictModel` — route collision + separation      |
//! | [`order`]    | `PassingOrder`, `OrderEntry`, adjustment resolution |
//!
//! # Adjustment model (summary)
//!
//! An *adjustment* is one discrete unit of scheduled delay.  A vehicle with
//! adjustment `k` behaves, for conflict purposes, as if it were
//! `k * threshold` metres further from the conflict zone:
//!
//! ```text
//! adjusted_distance = distance + threshold * adjustment
//! ```
//!
//! [`PassingOrder::resolve`] walks a candidate order front to back and
//! applies the minimal increments needed so that no vehicle enters the zone
//! within `threshold` of a conflicting predecessor.  All computation here is
//! pure: given a well-formed snapshot it cannot fail.

pub mod conflict;
pub mod order;


pub use conflict::ConflictModel;
pub use order::{OrderEntry, PassingOrder};
