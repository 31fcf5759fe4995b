//! The symbolic reachability engine (§4.3): the hard part. Builds one
//! transition relation per transition, then runs a breadth-first symbolic
//! fixpoint over the net's reachable set.
//!
//! Preconditions: `net` has already passed [`crate::net::Net::validate`]
//! so every arc weight and initial-marking entry is in `{0,1}`.

use std::collections::HashMap;

use tracing::{debug, instrument};

use crate::bdd::{Bdd, BddEngine, BddVar};
use crate::error::{PetriError, Result};
use crate::net::Net;

/// Safety-net iteration cap (§4.3): reaching it without convergence is a
/// defined failure, not a silent truncation.
pub const DEFAULT_MAX_ITERATIONS: usize = 10_000;

/// Everything the symbolic engine produces, bundled with the `BddEngine`
/// that owns the node table it lives in — deadlock and maximisation need
/// the same engine to keep interpreting `reach`'s variables correctly.
pub struct SymbolicReachability {
    pub engine: BddEngine,
    pub reach: Bdd,
    pub count: u128,
    /// `x_0..x_{P-1}` in place order, the only variables `reach` ranges
    /// over (§4.3 step 5).
    pub cur_vars: Vec<BddVar>,
}

fn marking_bdd(engine: &BddEngine, cur_vars: &[BddVar], marking: &[u32]) -> Bdd {
    let mut acc = engine.mk_true();
    for (&var, &value) in cur_vars.iter().zip(marking.iter()) {
        let literal = if value == 1 { engine.mk_var(var) } else { engine.mk_not_var(var) };
        acc = acc.and(&literal);
    }
    acc
}

/// Builds `T_t`, the transition relation for a single transition, per the
/// per-place clause table in §3.
fn transition_relation(
    engine: &BddEngine,
    net: &Net,
    trans: crate::net::TransitionId,
    cur_vars: &[BddVar],
    next_vars: &[BddVar],
) -> Bdd {
    let mut rel = engine.mk_true();
    for (i, place) in net.places().enumerate() {
        let iw = net.i.get(place, trans);
        let ow = net.o.get(place, trans);
        let cur = cur_vars[i];
        let next = next_vars[i];
        let clause = match (iw, ow) {
            (0, 0) => {
                let both_set = engine.mk_var(cur).and(&engine.mk_var(next));
                let both_clear = engine.mk_not_var(cur).and(&engine.mk_not_var(next));
                both_set.or(&both_clear)
            }
            (1, 0) => engine.mk_var(cur).and(&engine.mk_not_var(next)),
            (0, 1) => engine.mk_not_var(cur).and(&engine.mk_var(next)),
            (1, 1) => engine.mk_var(cur).and(&engine.mk_var(next)),
            (iw, ow) => {
                unreachable!("unvalidated arc weight I={iw} O={ow}, expected Net::validate to reject non-1-safe nets first")
            }
        };
        rel = rel.and(&clause);
    }
    rel
}

/// `reachable(net, max_iterations) -> (R, count)` (§4.3's contract).
#[instrument(
    skip_all,
    fields(places = net.num_places(), transitions = net.num_transitions(), max_iterations)
)]
pub fn reachable(net: &Net, max_iterations: usize) -> Result<SymbolicReachability> {
    let p = net.num_places();
    // Interleaved ordering x_0, x_0', x_1, x_1', ... so that, once all
    // current variables are abstracted away, the remaining primed
    // variables retain the same relative order as their unprimed
    // counterparts (§4.0) — which is what makes the rename below a pure
    // relabelling rather than a reordering.
    let engine = BddEngine::new((2 * p) as u16);
    let cur_vars: Vec<BddVar> = (0..p).map(|i| engine.var((2 * i) as u16)).collect();
    let next_vars: Vec<BddVar> = (0..p).map(|i| engine.var((2 * i + 1) as u16)).collect();

    let mut reach = marking_bdd(&engine, &cur_vars, &net.m0);

    if net.num_transitions() == 0 {
        let count = reach.model_count(&cur_vars);
        return Ok(SymbolicReachability { engine, reach, count, cur_vars });
    }

    let relations: Vec<Bdd> = net
        .transitions()
        .map(|t| transition_relation(&engine, net, t, &cur_vars, &next_vars))
        .collect();

    let rename_next_to_cur: HashMap<BddVar, BddVar> =
        next_vars.iter().copied().zip(cur_vars.iter().copied()).collect();

    let mut iteration = 0usize;
    loop {
        iteration += 1;
        if iteration > max_iterations {
            return Err(PetriError::FixpointDiverged(max_iterations));
        }

        let mut post_next = engine.mk_false();
        for rel in &relations {
            let pairs = reach.and(rel);
            let abstracted = pairs.exists_all(&cur_vars);
            post_next = post_next.or(&abstracted);
        }
        let post = post_next.rename(&rename_next_to_cur);
        let new_reach = reach.or(&post);

        debug!(iteration, count = %new_reach.model_count(&cur_vars), "fixpoint iteration");

        let converged = new_reach.equivalent(&reach);
        reach = new_reach;
        if converged {
            break;
        }
    }

    let count = reach.model_count(&cur_vars);
    Ok(SymbolicReachability { engine, reach, count, cur_vars })
}
