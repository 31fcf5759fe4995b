//! Deadlock detection (§4.4): no transition enabled in a reached marking.
//!
//! Rather than an ILP over the symbolic relation, this walks the reachable
//! set's BDD directly: each satisfying path is a partial assignment with
//! some places left as don't-cares (levels skipped along that path), and
//! every completion of those don't-cares is itself a reachable marking
//! (the BDD only records which variables constrain membership, not which
//! concrete markings exist at a don't-care level — so every completion must
//! be tried). Enabledness is then checked directly against the net, which
//! is cheaper than encoding it symbolically for a one-shot query.

use tracing::{debug, instrument};

use crate::marking::{is_deadlock, Marking};
use crate::net::Net;
use crate::symbolic::SymbolicReachability;

/// Returns the first deadlocked marking found in `reach`, or `None` if
/// every reachable marking has an enabled transition.
#[instrument(skip_all, fields(places = net.num_places()))]
pub fn find(net: &Net, reach: &SymbolicReachability) -> Option<Marking> {
    for assignment in reach.reach.models(&reach.cur_vars) {
        let dont_cares: Vec<usize> = assignment
            .iter()
            .enumerate()
            .filter_map(|(i, v)| if v.is_none() { Some(i) } else { None })
            .collect();

        let mut base = vec![0u32; net.num_places()];
        for (i, v) in assignment.iter().enumerate() {
            if let Some(b) = v {
                base[i] = *b as u32;
            }
        }

        let completions = 1u64 << dont_cares.len();
        for mask in 0..completions {
            let mut marking = base.clone();
            for (bit, &idx) in dont_cares.iter().enumerate() {
                marking[idx] = ((mask >> bit) & 1) as u32;
            }
            if is_deadlock(net, &marking) {
                debug!(?marking, "deadlock found");
                return Some(marking);
            }
        }
    }
    None
}
