//! Explicit reachability enumeration. This is the oracle the symbolic
//! engine is checked against in tests (§4.2); nothing else in the core
//! consumes its output.

use ahash::AHashSet;
use tracing::{debug, instrument};

use crate::marking::{fire, Marking};
use crate::net::Net;

/// Closed breadth-first search over markings, starting from `net.m0`.
/// Termination is guaranteed by the bounded state space (at most `2^P`
/// markings for a 1-safe net).
#[instrument(skip_all, fields(places = net.num_places(), transitions = net.num_transitions()))]
pub fn reachable(net: &Net) -> AHashSet<Marking> {
    let mut visited: AHashSet<Marking> = AHashSet::default();
    let mut frontier = vec![net.m0.clone()];
    visited.insert(net.m0.clone());

    while let Some(marking) = frontier.pop() {
        for trans in net.transitions() {
            if let Some(next) = fire(net, &marking, trans) {
                if visited.insert(next.clone()) {
                    frontier.push(next);
                }
            }
        }
    }

    debug!(count = visited.len(), "explicit reachability enumeration complete");
    visited
}
