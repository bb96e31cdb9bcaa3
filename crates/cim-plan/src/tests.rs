//! Unit tests for planning, consensus, and the snapshot loader.

use std::io::Cursor;

use cim_core::{
    EdgeId, OrderMode, PlanConfig, RouteId, SearchRng, Snapshot, VehicleId, VehicleState,
};
use cim_order::{ConflictModel, PassingOrder};
use cim_search::{MctsConfig, SearchState};

use crate::{
    load_snapshot_reader, plan_snapshot, plan_with_consensus, ConsensusAggregator,
    IntersectionState, OrderGenerator, OrderStrategy, PlanError,
};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn vehicle(route: u16, edge: &str, distance: f64) -> VehicleState {
    VehicleState {
        route: RouteId(route),
        edge: EdgeId::from(edge),
        distance,
    }
}

fn snapshot(entries: &[(&str, u16, &str, f64)]) -> Snapshot {
    entries
        .iter()
        .map(|&(id, route, edge, distance)| (VehicleId::from(id), vehicle(route, edge, distance)))
        .collect()
}

fn model(pairs: &[(u16, u16)], threshold: f64) -> ConflictModel {
    let pairs: Vec<_> = pairs
        .iter()
        .map(|&(a, b)| (RouteId(a), RouteId(b)))
        .collect();
    ConflictModel::new(&pairs, threshold)
}

fn order_ids(order: &PassingOrder) -> Vec<&str> {
    order.entries().iter().map(|e| e.vehicle.as_str()).collect()
}

// ── IntersectionState ─────────────────────────────────────────────────────────

#[cfg(test)]
mod state {
    use super::*;

    #[test]
    fn actions_are_per_edge_leads() {
        let m = model(&[], 5.0);
        // Two edges: n carries a(10) ahead of c(25); s carries b(12).
        let snap = snapshot(&[
            ("a", 0, "e_n", 10.0),
            ("b", 2, "e_s", 12.0),
            ("c", 1, "e_n", 25.0),
        ]);
        let state = IntersectionState::from_snapshot(&snap, &m);

        let actions = state.possible_actions();
        assert_eq!(actions, vec![VehicleId::from("a"), VehicleId::from("b")]);
    }

    #[test]
    fn trailing_vehicle_never_offered_while_leader_remains() {
        let m = model(&[], 5.0);
        let snap = snapshot(&[
            ("far", 0, "e_n", 30.0),
            ("near", 1, "e_n", 5.0),
            ("mid", 2, "e_n", 15.0),
        ]);
        let mut state = IntersectionState::from_snapshot(&snap, &m);

        // Same edge throughout: vehicles must come out nearest-first.
        let mut scheduled = Vec::new();
        while !state.is_terminal() {
            let actions = state.possible_actions();
            assert_eq!(actions.len(), 1);
            state = state.apply(&actions[0]);
            scheduled.push(actions[0].clone());
        }
        let ids: Vec<_> = scheduled.iter().map(|v| v.as_str()).collect();
        assert_eq!(ids, ["near", "mid", "far"]);
    }

    #[test]
    fn apply_moves_vehicle_from_remaining_to_prefix() {
        let m = model(&[], 5.0);
        let snap = snapshot(&[("a", 0, "e_n", 10.0), ("b", 1, "e_s", 12.0)]);
        let state = IntersectionState::from_snapshot(&snap, &m);
        assert_eq!(state.remaining_count(), 2);
        assert!(!state.is_terminal());

        let next = state.apply(&VehicleId::from("b"));
        assert_eq!(next.remaining_count(), 1);
        // The source state is untouched.
        assert_eq!(state.remaining_count(), 2);

        let last = next.apply(&VehicleId::from("a"));
        assert!(last.is_terminal());
        assert_eq!(order_ids(&last.into_order()), ["b", "a"]);
    }

    #[test]
    fn reward_is_negated_total_adjustment() {
        let m = model(&[(0, 2)], 5.0);
        let snap = snapshot(&[("a", 0, "e_n", 10.0), ("b", 2, "e_n", 12.0)]);
        let state = IntersectionState::from_snapshot(&snap, &m)
            .apply(&VehicleId::from("a"))
            .apply(&VehicleId::from("b"));

        // b conflicts with a → one bump.
        assert_eq!(state.reward(), -1.0);
    }
}

// ── OrderGenerator ────────────────────────────────────────────────────────────

#[cfg(test)]
mod generator {
    use super::*;

    #[test]
    fn fcfs_sorts_by_distance() {
        let generator = OrderGenerator::new(model(&[], 5.0), OrderStrategy::Fcfs);
        let snap = snapshot(&[
            ("far", 0, "e_n", 30.0),
            ("near", 1, "e_s", 5.0),
            ("mid", 2, "e_w", 15.0),
        ]);
        let order = generator.plan(&snap, SearchRng::new(0)).unwrap();
        assert_eq!(order_ids(&order), ["near", "mid", "far"]);
    }

    #[test]
    fn fcfs_resolves_the_worked_scenario() {
        // A(route 0, 10), B(route 2, 12), C(route 1, 20), all on one edge,
        // colliding pair {0, 2}, threshold 5.
        let generator = OrderGenerator::new(model(&[(0, 2)], 5.0), OrderStrategy::Fcfs);
        let snap = snapshot(&[
            ("A", 0, "e_n", 10.0),
            ("B", 2, "e_n", 12.0),
            ("C", 1, "e_n", 20.0),
        ]);
        let order = generator.plan(&snap, SearchRng::new(0)).unwrap();

        assert_eq!(order_ids(&order), ["A", "B", "C"]);
        assert_eq!(order.adjustment_of(&VehicleId::from("A")), Some(0));
        assert_eq!(order.adjustment_of(&VehicleId::from("B")), Some(1));
        assert_eq!(order.adjustment_of(&VehicleId::from("C")), Some(1));
        assert_eq!(order.total_adjustment(), 2);
    }

    #[test]
    fn mcts_covers_every_vehicle_once() {
        let generator = OrderGenerator::new(
            model(&[(0, 2)], 5.0),
            OrderStrategy::Mcts(MctsConfig::iteration_limited(50)),
        );
        let snap = snapshot(&[
            ("a", 0, "e_n", 10.0),
            ("b", 2, "e_s", 12.0),
            ("c", 1, "e_n", 25.0),
            ("d", 2, "e_w", 8.0),
        ]);
        let order = generator.plan(&snap, SearchRng::new(4)).unwrap();

        let mut ids = order_ids(&order);
        ids.sort_unstable();
        assert_eq!(ids, ["a", "b", "c", "d"]);
    }

    #[test]
    fn mcts_beats_fcfs_when_a_cheaper_order_exists() {
        // FCFS gives [a, b, c] at cost 3; scheduling c (same edge as a,
        // non-colliding route) before b costs only 2.  The search space has
        // three terminal orders, so a few hundred rounds explore them all.
        let pairs = &[(0, 2)];
        let snap = snapshot(&[
            ("a", 2, "e_s", 10.0),
            ("b", 0, "e_n", 12.0),
            ("c", 2, "e_s", 16.0),
        ]);

        let fcfs = OrderGenerator::new(model(pairs, 5.0), OrderStrategy::Fcfs);
        let fcfs_order = fcfs.plan(&snap, SearchRng::new(0)).unwrap();
        assert_eq!(fcfs_order.total_adjustment(), 3);

        let mcts = OrderGenerator::new(
            model(pairs, 5.0),
            OrderStrategy::Mcts(MctsConfig::iteration_limited(500)),
        );
        let mcts_order = mcts.plan(&snap, SearchRng::new(21)).unwrap();
        assert_eq!(order_ids(&mcts_order), ["a", "c", "b"]);
        assert_eq!(mcts_order.total_adjustment(), 2);
    }
}

// ── Consensus ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod consensus {
    use super::*;

    fn resolved(entries: &[(&str, u16, &str, f64)], m: &ConflictModel) -> PassingOrder {
        let mut order = PassingOrder::from_snapshot(&snapshot(entries));
        order.resolve(m);
        order
    }

    #[test]
    fn majority_wins() {
        let m = model(&[(0, 2)], 5.0);
        let popular = &[("a", 0, "e_n", 10.0), ("b", 1, "e_s", 12.0)];
        let fringe = &[("b", 1, "e_s", 12.0), ("a", 0, "e_n", 10.0)];

        let mut tally = ConsensusAggregator::new();
        tally.cast(resolved(popular, &m));
        tally.cast(resolved(popular, &m));
        tally.cast(resolved(fringe, &m));
        assert_eq!(tally.candidate_count(), 2);

        let outcome = tally.winner().unwrap();
        assert_eq!(outcome.votes, 2);
        assert_eq!(order_ids(&outcome.order), ["a", "b"]);
    }

    #[test]
    fn vote_tie_breaks_on_lowest_total_adjustment() {
        let m = model(&[(0, 2)], 5.0);
        // Conflicting pair: cost 1.  Non-conflicting routes: cost 0.
        let costly = resolved(&[("a", 0, "e_n", 10.0), ("b", 2, "e_s", 12.0)], &m);
        let free = resolved(&[("b", 2, "e_s", 12.0), ("c", 1, "e_n", 10.0)], &m);
        assert_eq!(costly.total_adjustment(), 1);
        assert_eq!(free.total_adjustment(), 0);

        let mut tally = ConsensusAggregator::new();
        tally.cast(costly);
        tally.cast(free);

        let outcome = tally.winner().unwrap();
        assert_eq!(outcome.votes, 1);
        assert_eq!(outcome.order.total_adjustment(), 0);
        assert_eq!(order_ids(&outcome.order), ["b", "c"]);
    }

    #[test]
    fn empty_tally_has_no_winner() {
        assert!(ConsensusAggregator::new().winner().is_none());
    }

    #[test]
    fn zero_agents_is_a_config_error() {
        let generator = OrderGenerator::new(
            model(&[], 5.0),
            OrderStrategy::Mcts(MctsConfig::iteration_limited(5)),
        );
        let snap = snapshot(&[("a", 0, "e_n", 10.0)]);
        let mut rng = SearchRng::new(0);
        let err = plan_with_consensus(&generator, &snap, 0, &mut rng).unwrap_err();
        assert!(matches!(err, PlanError::Config(_)));
    }

    #[test]
    fn consensus_is_deterministic_for_a_seed() {
        let snap = snapshot(&[
            ("a", 0, "e_n", 10.0),
            ("b", 2, "e_s", 12.0),
            ("c", 1, "e_n", 25.0),
        ]);
        let run = || {
            let generator = OrderGenerator::new(
                model(&[(0, 2)], 5.0),
                OrderStrategy::Mcts(MctsConfig::iteration_limited(60)),
            );
            let mut rng = SearchRng::new(17);
            plan_with_consensus(&generator, &snap, 4, &mut rng).unwrap()
        };
        let first = run();
        let second = run();
        assert_eq!(first.order.signature(), second.order.signature());
        assert_eq!(first.votes, second.votes);
        assert!(first.votes >= 1 && first.votes <= 4);
    }
}

// ── plan_snapshot ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod cycle {
    use super::*;

    fn config(mode: OrderMode) -> PlanConfig {
        PlanConfig {
            collision_distance_thresh: 5.0,
            colliding_routes: vec![(RouteId(0), RouteId(2))],
            mode,
            mcts_time_ms: 5,
            seed: 99,
        }
    }

    #[test]
    fn fcfs_mode_reports_zero_votes() {
        let snap = snapshot(&[("a", 0, "e_n", 10.0), ("b", 2, "e_s", 12.0)]);
        let outcome = plan_snapshot(&config(OrderMode::FirstComeFirstServed), &snap).unwrap();
        assert_eq!(outcome.votes, 0);
        assert_eq!(order_ids(&outcome.order), ["a", "b"]);
        assert_eq!(outcome.order.total_adjustment(), 1);
    }

    #[test]
    fn mcts_mode_votes_once_per_vehicle() {
        let snap = snapshot(&[
            ("a", 0, "e_n", 10.0),
            ("b", 2, "e_s", 12.0),
            ("c", 1, "e_w", 25.0),
        ]);
        let outcome = plan_snapshot(&config(OrderMode::MonteCarloTreeSearch), &snap).unwrap();
        assert!(outcome.votes >= 1 && outcome.votes <= 3);
        assert_eq!(outcome.order.len(), 3);
    }

    #[test]
    fn empty_snapshot_plans_nothing() {
        let outcome =
            plan_snapshot(&config(OrderMode::MonteCarloTreeSearch), &Snapshot::new()).unwrap();
        assert!(outcome.order.is_empty());
        assert_eq!(outcome.votes, 0);
    }
}

// ── Loader ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod loader {
    use super::*;

    const SNAPSHOT_CSV: &str = "\
vehicle_id,route,edge,distance
veh_0,0,approach_n_0,14.2
veh_1,2,approach_s_0,11.8
veh_2,1,approach_n_0,22.0
";

    #[test]
    fn loads_rows_in_capture_order() {
        let snap = load_snapshot_reader(Cursor::new(SNAPSHOT_CSV)).unwrap();
        assert_eq!(snap.len(), 3);

        let ids: Vec<_> = snap.vehicle_ids().map(|v| v.as_str()).collect();
        assert_eq!(ids, ["veh_0", "veh_1", "veh_2"]);

        let v1 = snap.get(&VehicleId::from("veh_1")).unwrap();
        assert_eq!(v1.route, RouteId(2));
        assert_eq!(v1.edge, EdgeId::from("approach_s_0"));
        assert_eq!(v1.distance, 11.8);
    }

    #[test]
    fn negative_distance_is_rejected() {
        let csv = "vehicle_id,route,edge,distance\nveh_0,0,e_n,-1.0\n";
        let err = load_snapshot_reader(Cursor::new(csv)).unwrap_err();
        assert!(matches!(err, PlanError::Parse(_)));
    }

    #[test]
    fn non_finite_distance_is_rejected() {
        // A NaN distance never satisfies the separation check for any
        // adjustment count, so it must not reach the evaluator.
        for bad in ["NaN", "inf", "-inf"] {
            let csv = format!("vehicle_id,route,edge,distance\nveh_0,0,e_n,{bad}\n");
            let err = load_snapshot_reader(Cursor::new(csv.as_bytes())).unwrap_err();
            assert!(matches!(err, PlanError::Parse(_)), "admitted distance {bad}");
        }
    }

    #[test]
    fn malformed_row_is_rejected() {
        let csv = "vehicle_id,route,edge,distance\nveh_0,not_a_route,e_n,1.0\n";
        let err = load_snapshot_reader(Cursor::new(csv)).unwrap_err();
        assert!(matches!(err, PlanError::Parse(_)));
    }

    #[test]
    fn loaded_snapshot_plans_end_to_end() {
        let snap = load_snapshot_reader(Cursor::new(SNAPSHOT_CSV)).unwrap();
        let generator = OrderGenerator::new(model(&[(0, 2)], 5.0), OrderStrategy::Fcfs);
        let order = generator.plan(&snap, SearchRng::new(0)).unwrap();
        // veh_1 (11.8) first, then veh_0 (14.2) conflicts with it.
        assert_eq!(order_ids(&order), ["veh_1", "veh_0", "veh_2"]);
        assert_eq!(order.adjustment_of(&VehicleId::from("veh_0")), Some(1));
    }
}
