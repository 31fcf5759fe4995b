//! A minimal in-crate ROBDD package (§4.0): just enough BDD machinery for
//! the symbolic reachability engine, with no Petri-net-specific knowledge.
//!
//! Nodes live in a single append-only table owned by a [`BddEngine`]; a
//! [`Bdd`] is a cheap handle into that table (an `Rc` plus a root pointer).
//! Two `Bdd`s are only ever compared or combined if they came from the same
//! engine — mixing handles from different engines panics, the same way
//! mixing pointers from two different allocators would be a bug, not a
//! recoverable error.

mod manager;
mod node;

use std::collections::HashMap;
use std::rc::Rc;

pub use node::BddVar;
use node::{FALSE, TRUE};

use manager::BddManager;

/// Owns the shared node table for one analysis run. Not `Send`/`Sync`
/// (§5): the core is single-threaded, so an independent analysis simply
/// constructs its own `BddEngine`.
pub struct BddEngine {
    manager: Rc<BddManager>,
}

impl BddEngine {
    /// Allocates `num_vars` variables in a fixed order (index 0 is closest
    /// to the root). The order never changes for the lifetime of this
    /// engine.
    pub fn new(num_vars: u16) -> Self {
        BddEngine { manager: Rc::new(BddManager::new(num_vars)) }
    }

    pub fn var(&self, index: u16) -> BddVar {
        self.manager.var(index)
    }

    pub fn mk_true(&self) -> Bdd {
        self.wrap(TRUE)
    }

    pub fn mk_false(&self) -> Bdd {
        self.wrap(FALSE)
    }

    pub fn mk_var(&self, var: BddVar) -> Bdd {
        let root = self.manager.mk_var(var);
        self.wrap(root)
    }

    pub fn mk_not_var(&self, var: BddVar) -> Bdd {
        let root = self.manager.mk_not_var(var);
        self.wrap(root)
    }

    fn wrap(&self, root: node::NodePtr) -> Bdd {
        Bdd { manager: self.manager.clone(), root }
    }
}

/// A reduced ordered binary decision diagram: an immutable value, cheap to
/// clone, produced and combined by pure operations on its engine's shared
/// node table (§3).
#[derive(Clone)]
pub struct Bdd {
    manager: Rc<BddManager>,
    root: node::NodePtr,
}

impl Bdd {
    pub fn is_false(&self) -> bool {
        self.root == FALSE
    }

    pub fn is_true(&self) -> bool {
        self.root == TRUE
    }

    fn same_engine(&self, other: &Bdd) {
        assert!(Rc::ptr_eq(&self.manager, &other.manager), "Bdd values from different engines");
    }

    pub fn and(&self, other: &Bdd) -> Bdd {
        self.same_engine(other);
        Bdd { manager: self.manager.clone(), root: self.manager.and(self.root, other.root) }
    }

    pub fn or(&self, other: &Bdd) -> Bdd {
        self.same_engine(other);
        Bdd { manager: self.manager.clone(), root: self.manager.or(self.root, other.root) }
    }

    pub fn not(&self) -> Bdd {
        Bdd { manager: self.manager.clone(), root: self.manager.not(self.root) }
    }

    /// Existentially abstracts every variable in `vars` from `self`.
    pub fn exists_all(&self, vars: &[BddVar]) -> Bdd {
        let mut root = self.root;
        for &v in vars {
            root = self.manager.exists(root, v);
        }
        Bdd { manager: self.manager.clone(), root }
    }

    /// Renames variables according to `mapping` (§4.0's "compose").
    pub fn rename(&self, mapping: &HashMap<BddVar, BddVar>) -> Bdd {
        Bdd { manager: self.manager.clone(), root: self.manager.rename(self.root, mapping) }
    }

    /// Semantic equivalence. Since both BDDs share a canonicalising
    /// manager, this is a pointer comparison (§4.3).
    pub fn equivalent(&self, other: &Bdd) -> bool {
        Rc::ptr_eq(&self.manager, &other.manager) && self.root == other.root
    }

    pub fn model_count(&self, vars: &[BddVar]) -> u128 {
        self.manager.model_count(self.root, vars)
    }

    /// Every satisfying path over `vars`, as a partial assignment (`None`
    /// marks a don't-care variable on that path).
    pub fn models(&self, vars: &[BddVar]) -> Vec<Vec<Option<bool>>> {
        self.manager.enumerate(self.root, vars)
    }
}
