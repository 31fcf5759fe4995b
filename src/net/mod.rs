//! The net model: places, transitions, arc matrices and the initial marking.
//!
//! A [`Net`] is built once (either by [`pnml`] parsing or directly via
//! [`Net::new`]) and is immutable afterwards; every downstream analysis
//! borrows it read-only.

pub mod pnml;
mod validate;

use crate::error::{PetriError, Result};
use derive_more::Display;

pub use validate::Validation;

/// Index of a place within a [`Net`]. Positions are assigned in document
/// order by the PNML loader and never change afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
#[display(fmt = "p{}", _0)]
pub struct PlaceId(pub usize);

/// Index of a transition within a [`Net`]. See [`PlaceId`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
#[display(fmt = "t{}", _0)]
pub struct TransitionId(pub usize);

/// A dense `P x T` matrix of non-negative integer arc weights.
///
/// The canonical orientation throughout this crate is places-by-rows,
/// transitions-by-columns (`I, O : P x T`), chosen because it matches the
/// vector equation `M' = M - I*e_t + O*e_t` directly (§9 of the design
/// notes). A matrix produced in the transposed shape is never silently
/// transposed; it is rejected as [`PetriError::Orientation`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Matrix {
    rows: usize,
    cols: usize,
    data: Vec<u32>,
}

impl Matrix {
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Matrix { rows, cols, data: vec![0; rows * cols] }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn get(&self, place: PlaceId, trans: TransitionId) -> u32 {
        self.data[place.0 * self.cols + trans.0]
    }

    pub fn set(&mut self, place: PlaceId, trans: TransitionId, value: u32) {
        self.data[place.0 * self.cols + trans.0] = value;
    }

    pub fn increment(&mut self, place: PlaceId, trans: TransitionId) {
        self.data[place.0 * self.cols + trans.0] += 1;
    }

    /// Checks `rows == expected_rows` and raises an [`PetriError::Orientation`]
    /// otherwise, without ever attempting a defensive transpose.
    fn expect_shape(&self, expected_rows: usize, expected_cols: usize) -> Result<()> {
        if self.rows != expected_rows || self.cols != expected_cols {
            return Err(PetriError::Orientation {
                rows: self.rows,
                cols: self.cols,
                n_places: expected_rows,
            });
        }
        Ok(())
    }
}

/// An immutable, validated (or not-yet-validated) 1-safe Petri net.
#[derive(Debug, Clone)]
pub struct Net {
    pub place_ids: Vec<String>,
    pub trans_ids: Vec<String>,
    pub place_names: Vec<Option<String>>,
    pub trans_names: Vec<Option<String>>,
    pub i: Matrix,
    pub o: Matrix,
    pub m0: Vec<u32>,
}

impl Net {
    pub fn new(
        place_ids: Vec<String>,
        trans_ids: Vec<String>,
        place_names: Vec<Option<String>>,
        trans_names: Vec<Option<String>>,
        i: Matrix,
        o: Matrix,
        m0: Vec<u32>,
    ) -> Result<Self> {
        let p = place_ids.len();
        let t = trans_ids.len();
        i.expect_shape(p, t)?;
        o.expect_shape(p, t)?;
        if m0.len() != p {
            return Err(PetriError::Orientation { rows: m0.len(), cols: 1, n_places: p });
        }
        Ok(Net { place_ids, trans_ids, place_names, trans_names, i, o, m0 })
    }

    pub fn num_places(&self) -> usize {
        self.place_ids.len()
    }

    pub fn num_transitions(&self) -> usize {
        self.trans_ids.len()
    }

    pub fn place(&self, idx: usize) -> PlaceId {
        PlaceId(idx)
    }

    pub fn transition(&self, idx: usize) -> TransitionId {
        TransitionId(idx)
    }

    pub fn places(&self) -> impl Iterator<Item = PlaceId> {
        (0..self.place_ids.len()).map(PlaceId)
    }

    pub fn transitions(&self) -> impl Iterator<Item = TransitionId> {
        (0..self.trans_ids.len()).map(TransitionId)
    }

    /// Validates the net's internal consistency and 1-safeness precondition.
    ///
    /// In strict mode, any error aborts with [`PetriError::Validation`].
    /// In lenient mode, errors are downgraded to logged warnings. Isolated
    /// places/transitions are always non-fatal warnings (§4.1).
    pub fn validate(&self, strict: bool) -> Result<Validation> {
        validate::run(self, strict)
    }
}
