//! Shared marking arithmetic used by the explicit enumerator and the
//! deadlock analyser: enabledness and firing over a 1-safe marking vector.

use crate::net::{Net, TransitionId};

/// A concrete marking: one entry per place, each in `{0,1}`.
pub type Marking = Vec<u32>;

/// Transition `trans` is enabled in `marking` iff every place it consumes
/// from already holds a token, and firing it would not push a second token
/// into a place that isn't also being consumed from (the 1-safe encoding's
/// self-loop clause handles consume-and-reproduce on the same place; this
/// guards only the genuine overflow case of a bare produce arc landing on an
/// already-marked place). See §3's per-place clause table and §4.4.
pub fn is_enabled(net: &Net, marking: &[u32], trans: TransitionId) -> bool {
    for place in net.places() {
        let iw = net.i.get(place, trans);
        if iw == 1 && marking[place.0] == 0 {
            return false;
        }
        let ow = net.o.get(place, trans);
        if ow == 1 && iw == 0 && marking[place.0] == 1 {
            return false;
        }
    }
    true
}

/// Fires `trans` from `marking`, returning the successor marking, or `None`
/// if the transition is not enabled. The result is always a valid `{0,1}`
/// vector when `trans` is enabled, by construction of [`is_enabled`].
pub fn fire(net: &Net, marking: &[u32], trans: TransitionId) -> Option<Marking> {
    if !is_enabled(net, marking, trans) {
        return None;
    }
    let mut next = marking.to_vec();
    for place in net.places() {
        let iw = net.i.get(place, trans);
        let ow = net.o.get(place, trans);
        next[place.0] = marking[place.0] - iw + ow;
    }
    Some(next)
}

/// `marking` is a deadlock iff no transition in `net` is enabled.
pub fn is_deadlock(net: &Net, marking: &[u32]) -> bool {
    net.transitions().all(|t| !is_enabled(net, marking, t))
}
