//! Structural and 1-safeness validation for a freshly loaded [`Net`].

use super::Net;
use crate::error::{PetriError, Result};
use ahash::AHashSet;
use tracing::warn;

/// The outcome of a successful (possibly lenient) validation pass.
#[derive(Debug, Default, Clone)]
pub struct Validation {
    /// Non-fatal findings: isolated places/transitions, and (lenient mode
    /// only) structural errors that would otherwise have aborted the run.
    pub warnings: Vec<String>,
}

pub(super) fn run(net: &Net, strict: bool) -> Result<Validation> {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    if net.place_ids.is_empty() {
        errors.push("no places found in net".to_string());
    }
    if net.trans_ids.is_empty() {
        errors.push("no transitions found in net".to_string());
    }

    let unique_places: AHashSet<&String> = net.place_ids.iter().collect();
    if unique_places.len() != net.place_ids.len() {
        errors.push("duplicate place ids detected".to_string());
    }
    let unique_trans: AHashSet<&String> = net.trans_ids.iter().collect();
    if unique_trans.len() != net.trans_ids.len() {
        errors.push("duplicate transition ids detected".to_string());
    }

    for (idx, &m) in net.m0.iter().enumerate() {
        // m0 is u32 so it cannot be negative; a value > 1 breaks 1-safeness.
        if m > 1 {
            errors.push(format!(
                "place '{}' has initial marking {} outside {{0,1}} (1-safeness precondition)",
                net.place_ids[idx], m
            ));
        }
    }

    let p = net.place_ids.len();
    let t = net.trans_ids.len();
    if net.i.rows() != p || net.i.cols() != t {
        errors.push(format!(
            "I matrix size mismatch: expected {}x{}, got {}x{}",
            p, t, net.i.rows(), net.i.cols()
        ));
    }
    if net.o.rows() != p || net.o.cols() != t {
        errors.push(format!(
            "O matrix size mismatch: expected {}x{}, got {}x{}",
            p, t, net.o.rows(), net.o.cols()
        ));
    }

    if net.i.rows() == p && net.i.cols() == t && net.o.rows() == p && net.o.cols() == t {
        for ti in 0..t {
            let trans = net.transition(ti);
            for pi in 0..p {
                let place = net.place(pi);
                let iw = net.i.get(place, trans);
                let ow = net.o.get(place, trans);
                if iw > 1 || ow > 1 {
                    errors.push(format!(
                        "arc between '{}' and '{}' has weight outside {{0,1}} (1-safeness precondition)",
                        net.place_ids[pi], net.trans_ids[ti]
                    ));
                }
            }
        }

        for ti in 0..t {
            let trans = net.transition(ti);
            let touched = (0..p).any(|pi| {
                let place = net.place(pi);
                net.i.get(place, trans) != 0 || net.o.get(place, trans) != 0
            });
            if !touched {
                warnings.push(format!(
                    "transition '{}' is isolated (no input nor output arcs)",
                    net.trans_ids[ti]
                ));
            }
        }
        for pi in 0..p {
            let place = net.place(pi);
            let touched = (0..t).any(|ti| {
                let trans = net.transition(ti);
                net.i.get(place, trans) != 0 || net.o.get(place, trans) != 0
            });
            if !touched {
                warnings.push(format!("place '{}' is isolated (no arcs)", net.place_ids[pi]));
            }
        }
    }

    if !errors.is_empty() {
        if strict {
            return Err(PetriError::Validation(errors));
        }
        for e in &errors {
            warn!(target: "petri_symbolic::validate", "{e}");
        }
        warnings.extend(errors);
    }

    for w in &warnings {
        warn!(target: "petri_symbolic::validate", "{w}");
    }

    Ok(Validation { warnings })
}
