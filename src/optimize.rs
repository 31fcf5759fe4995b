//! Linear objective maximisation over the reachable set (§4.5):
//! `argmax_{M in R} c . M`.
//!
//! Each satisfying path of `R`'s BDD already fixes some places and leaves
//! others as don't-cares; since a don't-care place can be completed to
//! either `0` or `1` while staying on the same (reachable) path, the
//! optimal completion is greedy: set it to `1` when `c_i > 0`, `0`
//! otherwise. Ties keep whichever candidate was encountered first.

use tracing::instrument;

use crate::error::{PetriError, Result};
use crate::marking::Marking;
use crate::net::Net;
use crate::symbolic::SymbolicReachability;

/// Maximises `c . M` over every marking represented by `reach`. Returns
/// `None` only if the net has no reachable marking at all, which cannot
/// happen once `M0` is always a member of `R`.
#[instrument(skip_all, fields(places = net.num_places()))]
pub fn maximise(net: &Net, reach: &SymbolicReachability, c: &[i64]) -> Result<Option<(Marking, i64)>> {
    if c.len() != net.num_places() {
        return Err(PetriError::Usage(format!(
            "objective vector has {} entries, net has {} places",
            c.len(),
            net.num_places()
        )));
    }

    let mut best: Option<(Marking, i64)> = None;
    for assignment in reach.reach.models(&reach.cur_vars) {
        let marking: Marking = assignment
            .iter()
            .enumerate()
            .map(|(i, v)| match v {
                Some(b) => *b as u32,
                None => {
                    if c[i] > 0 {
                        1
                    } else {
                        0
                    }
                }
            })
            .collect();

        let value: i64 = marking.iter().zip(c.iter()).map(|(&m, &ci)| m as i64 * ci).sum();

        let is_better = match &best {
            Some((_, best_value)) => value > *best_value,
            None => true,
        };
        if is_better {
            best = Some((marking, value));
        }
    }
    Ok(best)
}
