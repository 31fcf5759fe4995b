//! Symbolic reachability analysis for 1-safe Place/Transition Petri nets.
//!
//! The pipeline runs leaves-first: [`net`] (PNML loading, validation) feeds
//! both [`explicit`] (an oracle used only by tests) and [`symbolic`] (the
//! BDD-based reachability engine, built on [`bdd`]); the reachable set
//! [`symbolic`] produces then feeds [`deadlock`] and [`optimize`].

pub mod bdd;
pub mod deadlock;
pub mod error;
pub mod explicit;
pub mod marking;
pub mod net;
pub mod optimize;
pub mod symbolic;

pub use error::{PetriError, Result};
pub use net::Net;
