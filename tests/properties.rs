//! Property-based tests for the universal invariants.
//!
//! Nets are generated directly (skipping PNML) as small, already-1-safe
//! matrices: every entry of `I`, `O` and `M0` is drawn from `{0,1}`, so every
//! generated net trivially satisfies the 1-safeness precondition the
//! symbolic encoding assumes.

use proptest::collection::vec;
use proptest::prelude::*;

use petri_symbolic::marking::{fire, is_enabled};
use petri_symbolic::net::{Matrix, Net, PlaceId, TransitionId};
use petri_symbolic::{explicit, symbolic};

const MAX_PLACES: usize = 4;
const MAX_TRANS: usize = 3;

fn arbitrary_net() -> impl Strategy<Value = Net> {
    (2..=MAX_PLACES, 1..=MAX_TRANS).prop_flat_map(|(p, t)| {
        let bits = vec(0u32..=1, p * t);
        let m0 = vec(0u32..=1, p);
        (bits.clone(), bits, m0).prop_map(move |(i_bits, o_bits, m0)| {
            let mut i = Matrix::zeros(p, t);
            let mut o = Matrix::zeros(p, t);
            for pi in 0..p {
                for ti in 0..t {
                    i.set(PlaceId(pi), TransitionId(ti), i_bits[pi * t + ti]);
                    o.set(PlaceId(pi), TransitionId(ti), o_bits[pi * t + ti]);
                }
            }
            let place_ids = (0..p).map(|x| format!("p{x}")).collect();
            let trans_ids = (0..t).map(|x| format!("t{x}")).collect();
            Net::new(place_ids, trans_ids, vec![None; p], vec![None; t], i, o, m0).unwrap()
        })
    })
}

proptest! {
    /// Invariants 1-3, 8: explicit/symbolic agreement, M0 membership,
    /// closure under firing, and idempotence across fresh engines.
    #[test]
    fn reachability_invariants(net in arbitrary_net()) {
        let explicit_set = explicit::reachable(&net);
        let reach = symbolic::reachable(&net, symbolic::DEFAULT_MAX_ITERATIONS).unwrap();

        prop_assert_eq!(explicit_set.len() as u128, reach.count);

        let symbolic_models: Vec<Vec<u32>> = reach
            .reach
            .models(&reach.cur_vars)
            .into_iter()
            .flat_map(|assignment| expand_dont_cares(&assignment))
            .collect();
        for model in &symbolic_models {
            prop_assert!(explicit_set.contains(model));
        }

        prop_assert!(explicit_set.contains(&net.m0));

        for marking in &explicit_set {
            for trans in net.transitions() {
                if is_enabled(&net, marking, trans) {
                    let successor = fire(&net, marking, trans).unwrap();
                    prop_assert!(explicit_set.contains(&successor));
                }
            }
        }

        let reach_again = symbolic::reachable(&net, symbolic::DEFAULT_MAX_ITERATIONS).unwrap();
        prop_assert_eq!(reach.count, reach_again.count);
    }

    /// Invariants 4-5: deadlock soundness and completeness.
    #[test]
    fn deadlock_invariants(net in arbitrary_net()) {
        let reach = symbolic::reachable(&net, symbolic::DEFAULT_MAX_ITERATIONS).unwrap();
        let explicit_set = explicit::reachable(&net);

        match petri_symbolic::deadlock::find(&net, &reach) {
            Some(marking) => {
                prop_assert!(explicit_set.contains(&marking));
                prop_assert!(net.transitions().all(|t| !is_enabled(&net, &marking, t)));
            }
            None => {
                for marking in &explicit_set {
                    prop_assert!(net.transitions().any(|t| is_enabled(&net, marking, t)));
                }
            }
        }
    }

    /// Invariant 6: optimiser optimality.
    #[test]
    fn optimiser_invariant(net in arbitrary_net(), c in vec(-3i64..=3, MAX_PLACES)) {
        let reach = symbolic::reachable(&net, symbolic::DEFAULT_MAX_ITERATIONS).unwrap();
        let explicit_set = explicit::reachable(&net);
        let c = &c[..net.num_places()];

        let (best_marking, best_value) = petri_symbolic::optimize::maximise(&net, &reach, c).unwrap().unwrap();

        prop_assert!(explicit_set.contains(&best_marking));
        let recomputed: i64 = best_marking.iter().zip(c.iter()).map(|(&m, &ci)| m as i64 * ci).sum();
        prop_assert_eq!(recomputed, best_value);

        for marking in &explicit_set {
            let value: i64 = marking.iter().zip(c.iter()).map(|(&m, &ci)| m as i64 * ci).sum();
            prop_assert!(value <= best_value);
        }
    }
}

/// Expands a partial BDD assignment (`None` entries are don't-cares) into
/// every concrete completion.
fn expand_dont_cares(assignment: &[Option<bool>]) -> Vec<Vec<u32>> {
    let dont_cares: Vec<usize> =
        assignment.iter().enumerate().filter_map(|(i, v)| if v.is_none() { Some(i) } else { None }).collect();
    let base: Vec<u32> = assignment.iter().map(|v| v.unwrap_or(false) as u32).collect();

    let completions = 1u32 << dont_cares.len();
    (0..completions)
        .map(|mask| {
            let mut marking = base.clone();
            for (bit, &idx) in dont_cares.iter().enumerate() {
                marking[idx] = (mask >> bit) & 1;
            }
            marking
        })
        .collect()
}
