//! End-to-end scenarios S1-S6.

use petri_symbolic::error::PetriError;
use petri_symbolic::net::{Matrix, Net};
use petri_symbolic::{deadlock, explicit, optimize, symbolic};

fn net(
    num_places: usize,
    num_trans: usize,
    arcs_in: &[(usize, usize)],
    arcs_out: &[(usize, usize)],
    m0: Vec<u32>,
) -> Net {
    let mut i = Matrix::zeros(num_places, num_trans);
    let mut o = Matrix::zeros(num_places, num_trans);
    for &(p, t) in arcs_in {
        i.increment(petri_symbolic::net::PlaceId(p), petri_symbolic::net::TransitionId(t));
    }
    for &(p, t) in arcs_out {
        o.increment(petri_symbolic::net::PlaceId(p), petri_symbolic::net::TransitionId(t));
    }
    let place_ids = (0..num_places).map(|p| format!("p{p}")).collect();
    let trans_ids = (0..num_trans).map(|t| format!("t{t}")).collect();
    let place_names = vec![None; num_places];
    let trans_names = vec![None; num_trans];
    Net::new(place_ids, trans_ids, place_names, trans_names, i, o, m0).unwrap()
}

/// S1 - producer/consumer.
#[test]
fn s1_producer_consumer() {
    let n = net(2, 2, &[(0, 0), (1, 1)], &[(1, 0), (0, 1)], vec![1, 0]);
    n.validate(true).unwrap();

    let reach = symbolic::reachable(&n, symbolic::DEFAULT_MAX_ITERATIONS).unwrap();
    assert_eq!(reach.count, 2);

    let explicit_set = explicit::reachable(&n);
    assert_eq!(explicit_set.len(), 2);
    assert!(explicit_set.contains(&vec![1, 0]));
    assert!(explicit_set.contains(&vec![0, 1]));

    assert!(deadlock::find(&n, &reach).is_none());

    let (marking, value) = optimize::maximise(&n, &reach, &[3, 5]).unwrap().unwrap();
    assert_eq!(value, 5);
    assert_eq!(marking, vec![0, 1]);
}

/// S2 - immediate deadlock.
#[test]
fn s2_immediate_deadlock() {
    let n = net(2, 1, &[(0, 0)], &[], vec![0, 0]);
    n.validate(true).unwrap();

    let reach = symbolic::reachable(&n, symbolic::DEFAULT_MAX_ITERATIONS).unwrap();
    assert_eq!(reach.count, 1);

    let deadlocked = deadlock::find(&n, &reach).unwrap();
    assert_eq!(deadlocked, vec![0, 0]);

    let (_, value) = optimize::maximise(&n, &reach, &[1, 1]).unwrap().unwrap();
    assert_eq!(value, 0);
}

/// S3 - isolated place.
#[test]
fn s3_isolated_place() {
    let n = net(3, 2, &[(0, 0), (1, 1)], &[(1, 0), (0, 1)], vec![1, 0, 0]);
    let validation = n.validate(true).unwrap();
    assert!(validation.warnings.iter().any(|w| w.contains("p2")));

    let reach = symbolic::reachable(&n, symbolic::DEFAULT_MAX_ITERATIONS).unwrap();
    assert_eq!(reach.count, 2);

    let explicit_set = explicit::reachable(&n);
    assert_eq!(explicit_set.len(), 2);
    assert!(explicit_set.contains(&vec![1, 0, 0]));
    assert!(explicit_set.contains(&vec![0, 1, 0]));

    assert!(deadlock::find(&n, &reach).is_none());

    let (_, value) = optimize::maximise(&n, &reach, &[1, 1, 10]).unwrap().unwrap();
    assert_eq!(value, 1);
}

/// S4 - two-place synchronisation.
#[test]
fn s4_two_place_sync() {
    let n = net(2, 2, &[(0, 0), (1, 0)], &[(0, 1), (1, 1)], vec![1, 1]);
    n.validate(true).unwrap();

    let reach = symbolic::reachable(&n, symbolic::DEFAULT_MAX_ITERATIONS).unwrap();
    assert_eq!(reach.count, 2);

    let explicit_set = explicit::reachable(&n);
    assert!(explicit_set.contains(&vec![1, 1]));
    assert!(explicit_set.contains(&vec![0, 0]));

    assert!(deadlock::find(&n, &reach).is_none());

    let (_, value) = optimize::maximise(&n, &reach, &[1, 1]).unwrap().unwrap();
    assert_eq!(value, 2);
}

/// S5 - max-iteration cap tripped.
///
/// A single place with a self-loop transition (consume and reproduce)
/// never changes the reachable set after the first iteration, so a cap of
/// `0` guarantees divergence before the fixpoint is even checked once.
#[test]
fn s5_max_iteration_cap_tripped() {
    let n = net(1, 1, &[(0, 0)], &[(0, 0)], vec![1]);
    n.validate(true).unwrap();

    let result = symbolic::reachable(&n, 0);
    assert!(matches!(result, Err(PetriError::FixpointDiverged(0))));
}

/// S6 - PNML parse round-trip with multi-digit ids and out-of-order arcs.
#[test]
fn s6_parse_round_trip() {
    let xml = r#"<?xml version="1.0"?>
<pnml xmlns="http://www.pnml.org/version-2009/grammar/pnml">
  <net id="net1" type="http://www.pnml.org/version-2009/grammar/ptnet">
    <page id="page1">
      <arc id="a1" source="t10" target="p20"/>
      <place id="p10">
        <name><text>first</text></name>
        <initialMarking><text>1</text></initialMarking>
      </place>
      <place id="p20">
        <name><text>second</text></name>
      </place>
      <transition id="t10">
        <name><text>fire</text></name>
      </transition>
      <arc id="a0" source="p10" target="t10"/>
    </page>
  </net>
</pnml>"#;

    let n = petri_symbolic::net::pnml::parse_str(xml).unwrap();
    assert_eq!(n.place_ids, vec!["p10", "p20"]);
    assert_eq!(n.trans_ids, vec!["t10"]);
    assert_eq!(n.m0, vec![1, 0]);

    // p10 -> t10 is an input arc: I[p10, t10] = 1.
    assert_eq!(n.i.get(petri_symbolic::net::PlaceId(0), petri_symbolic::net::TransitionId(0)), 1);
    assert_eq!(n.i.get(petri_symbolic::net::PlaceId(1), petri_symbolic::net::TransitionId(0)), 0);
    // t10 -> p20 is an output arc: O[p20, t10] = 1.
    assert_eq!(n.o.get(petri_symbolic::net::PlaceId(1), petri_symbolic::net::TransitionId(0)), 1);
    assert_eq!(n.o.get(petri_symbolic::net::PlaceId(0), petri_symbolic::net::TransitionId(0)), 0);
}

/// Empty net (T=0): the fixpoint loop is never entered; `R` is exactly
/// `{M0}` (§4.3 edge cases).
#[test]
fn empty_net_no_transitions() {
    let n = net(2, 0, &[], &[], vec![1, 0]);
    n.validate(true).unwrap();

    let reach = symbolic::reachable(&n, symbolic::DEFAULT_MAX_ITERATIONS).unwrap();
    assert_eq!(reach.count, 1);
    assert!(deadlock::find(&n, &reach).is_some());
}

/// A mismatched objective vector length is a usage error, not a panic.
#[test]
fn maximise_rejects_wrong_length_objective() {
    let n = net(2, 2, &[(0, 0), (1, 1)], &[(1, 0), (0, 1)], vec![1, 0]);
    let reach = symbolic::reachable(&n, symbolic::DEFAULT_MAX_ITERATIONS).unwrap();
    let result = optimize::maximise(&n, &reach, &[1, 2, 3]);
    assert!(matches!(result, Err(PetriError::Usage(_))));
}

/// A missing PNML path surfaces as `InputNotFound`, not a generic I/O error.
#[test]
fn missing_pnml_file_reports_input_not_found() {
    let result = petri_symbolic::net::pnml::load("/nonexistent/path/to/a.pnml");
    assert!(matches!(result, Err(PetriError::InputNotFound(_))));
}

/// Matrix shape mismatches against |M0| are rejected, never silently
/// transposed (§8 property 7).
#[test]
fn orientation_mismatch_is_rejected() {
    let transposed_i = Matrix::zeros(2, 3); // 2 transitions x 3 places, wrong way round
    let o = Matrix::zeros(3, 2);
    let result = Net::new(
        vec!["p0".into(), "p1".into(), "p2".into()],
        vec!["t0".into(), "t1".into()],
        vec![None; 3],
        vec![None; 2],
        transposed_i,
        o,
        vec![0, 0, 0],
    );
    assert!(matches!(result, Err(PetriError::Orientation { .. })));
}
