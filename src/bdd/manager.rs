//! The shared, append-only node table and the recursive BDD operations
//! (`ite`, `restrict`, `exists`, `rename`, model counting and enumeration)
//! that work over it.
//!
//! Every operation that creates a node goes through [`BddManager::mk_node`],
//! which hash-conses via `unique`: structurally identical sub-BDDs are
//! always represented by the same pointer, which is what makes semantic
//! equivalence a pointer comparison (§4.3) and model counting/enumeration
//! a simple table walk.

use std::cell::RefCell;
use std::collections::HashMap;

use ahash::RandomState;

use super::node::{is_terminal, BddVar, Node, NodePtr, FALSE, TRUE};

pub struct BddManager {
    nodes: RefCell<Vec<Node>>,
    unique: RefCell<HashMap<(BddVar, NodePtr, NodePtr), NodePtr, RandomState>>,
    ite_cache: RefCell<HashMap<(NodePtr, NodePtr, NodePtr), NodePtr, RandomState>>,
    restrict_cache: RefCell<HashMap<(NodePtr, BddVar, bool), NodePtr, RandomState>>,
    num_vars: u16,
}

impl BddManager {
    pub fn new(num_vars: u16) -> Self {
        // Terminal nodes occupy fixed slots 0 and 1; their `var`/`low`/`high`
        // fields are never read (every accessor checks `is_terminal` first).
        let nodes = vec![
            Node { var: BddVar(u16::MAX), low: FALSE, high: FALSE },
            Node { var: BddVar(u16::MAX), low: TRUE, high: TRUE },
        ];
        BddManager {
            nodes: RefCell::new(nodes),
            unique: RefCell::new(HashMap::default()),
            ite_cache: RefCell::new(HashMap::default()),
            restrict_cache: RefCell::new(HashMap::default()),
            num_vars,
        }
    }

    pub fn var(&self, index: u16) -> BddVar {
        assert!(index < self.num_vars, "variable index {index} out of range");
        BddVar(index)
    }

    fn node(&self, p: NodePtr) -> Node {
        self.nodes.borrow()[p as usize]
    }

    fn top_var(&self, p: NodePtr) -> Option<BddVar> {
        if is_terminal(p) {
            None
        } else {
            Some(self.node(p).var)
        }
    }

    /// Hash-consed node creation with the standard reduction rule: a node
    /// whose two children are identical is redundant and collapses to that
    /// child.
    fn mk_node(&self, var: BddVar, low: NodePtr, high: NodePtr) -> NodePtr {
        if low == high {
            return low;
        }
        let key = (var, low, high);
        if let Some(&p) = self.unique.borrow().get(&key) {
            return p;
        }
        let ptr = {
            let mut nodes = self.nodes.borrow_mut();
            let ptr = nodes.len() as NodePtr;
            nodes.push(Node { var, low, high });
            ptr
        };
        self.unique.borrow_mut().insert(key, ptr);
        ptr
    }

    pub fn mk_var(&self, var: BddVar) -> NodePtr {
        self.mk_node(var, FALSE, TRUE)
    }

    pub fn mk_not_var(&self, var: BddVar) -> NodePtr {
        self.mk_node(var, TRUE, FALSE)
    }

    fn cofactors(&self, p: NodePtr, var: BddVar) -> (NodePtr, NodePtr) {
        match self.top_var(p) {
            Some(v) if v == var => (self.node(p).low, self.node(p).high),
            _ => (p, p),
        }
    }

    fn min_var(&self, f: NodePtr, g: NodePtr, h: NodePtr) -> BddVar {
        [f, g, h]
            .into_iter()
            .filter_map(|p| self.top_var(p))
            .min()
            .expect("ite called with all-terminal arguments")
    }

    /// If-then-else: the single kernel every connective reduces to.
    /// `ite(f, TRUE, FALSE) == f`, `ite(f, g, g) == g`, otherwise recurse
    /// on the cofactors of the topmost variable among `f`, `g`, `h`.
    fn ite(&self, f: NodePtr, g: NodePtr, h: NodePtr) -> NodePtr {
        if f == TRUE {
            return g;
        }
        if f == FALSE {
            return h;
        }
        if g == h {
            return g;
        }
        if g == TRUE && h == FALSE {
            return f;
        }

        let key = (f, g, h);
        if let Some(&r) = self.ite_cache.borrow().get(&key) {
            return r;
        }

        let top = self.min_var(f, g, h);
        let (f0, f1) = self.cofactors(f, top);
        let (g0, g1) = self.cofactors(g, top);
        let (h0, h1) = self.cofactors(h, top);
        let low = self.ite(f0, g0, h0);
        let high = self.ite(f1, g1, h1);
        let result = self.mk_node(top, low, high);

        self.ite_cache.borrow_mut().insert(key, result);
        result
    }

    pub fn and(&self, f: NodePtr, g: NodePtr) -> NodePtr {
        self.ite(f, g, FALSE)
    }

    pub fn or(&self, f: NodePtr, g: NodePtr) -> NodePtr {
        self.ite(f, TRUE, g)
    }

    pub fn not(&self, f: NodePtr) -> NodePtr {
        self.ite(f, FALSE, TRUE)
    }

    /// Shannon cofactor of `f` with respect to `var` fixed to `value`.
    fn restrict(&self, f: NodePtr, var: BddVar, value: bool) -> NodePtr {
        if is_terminal(f) {
            return f;
        }
        let key = (f, var, value);
        if let Some(&r) = self.restrict_cache.borrow().get(&key) {
            return r;
        }
        let node = self.node(f);
        let result = if node.var > var {
            // `f` is ordered strictly after `var`, so it cannot mention it.
            f
        } else if node.var == var {
            if value {
                node.high
            } else {
                node.low
            }
        } else {
            let low = self.restrict(node.low, var, value);
            let high = self.restrict(node.high, var, value);
            self.mk_node(node.var, low, high)
        };
        self.restrict_cache.borrow_mut().insert(key, result);
        result
    }

    /// Existential abstraction of a single variable: `∃var. f`.
    pub fn exists(&self, f: NodePtr, var: BddVar) -> NodePtr {
        let lo = self.restrict(f, var, false);
        let hi = self.restrict(f, var, true);
        self.or(lo, hi)
    }

    /// Renames variables in `f` according to `mapping` (identity if absent).
    /// Valid only when `mapping` preserves the relative order of whichever
    /// variables actually appear in `f` — true for the primed-to-unprimed
    /// rename the symbolic engine performs (§4.0's interleaved ordering).
    pub fn rename(&self, f: NodePtr, mapping: &HashMap<BddVar, BddVar>) -> NodePtr {
        let mut memo = HashMap::new();
        self.rename_rec(f, mapping, &mut memo)
    }

    fn rename_rec(
        &self,
        f: NodePtr,
        mapping: &HashMap<BddVar, BddVar>,
        memo: &mut HashMap<NodePtr, NodePtr>,
    ) -> NodePtr {
        if is_terminal(f) {
            return f;
        }
        if let Some(&r) = memo.get(&f) {
            return r;
        }
        let node = self.node(f);
        let new_var = *mapping.get(&node.var).unwrap_or(&node.var);
        let low = self.rename_rec(node.low, mapping, memo);
        let high = self.rename_rec(node.high, mapping, memo);
        let result = self.mk_node(new_var, low, high);
        memo.insert(f, result);
        result
    }

    fn level_of(&self, p: NodePtr, levels: &HashMap<BddVar, usize>, n: usize) -> usize {
        match self.top_var(p) {
            Some(v) => levels[&v],
            None => n,
        }
    }

    fn count_rec(
        &self,
        node: NodePtr,
        levels: &HashMap<BddVar, usize>,
        n: usize,
        memo: &mut HashMap<NodePtr, u128>,
    ) -> u128 {
        if node == FALSE {
            return 0;
        }
        if node == TRUE {
            return 1;
        }
        if let Some(&c) = memo.get(&node) {
            return c;
        }
        let nd = self.node(node);
        let my_level = levels[&nd.var];
        let low_level = self.level_of(nd.low, levels, n);
        let high_level = self.level_of(nd.high, levels, n);
        let low_count = self.count_rec(nd.low, levels, n, memo) << (low_level - my_level - 1);
        let high_count = self.count_rec(nd.high, levels, n, memo) << (high_level - my_level - 1);
        let total = low_count + high_count;
        memo.insert(node, total);
        total
    }

    /// Number of satisfying assignments of `f` over exactly the variables
    /// in `var_order` (don't-care variables skipped along a path each
    /// double the count, per the standard weighted BDD model-count
    /// algorithm).
    pub fn model_count(&self, f: NodePtr, var_order: &[BddVar]) -> u128 {
        let n = var_order.len();
        if f == FALSE {
            return 0;
        }
        if f == TRUE {
            return 1u128 << n;
        }
        let levels: HashMap<BddVar, usize> =
            var_order.iter().enumerate().map(|(i, &v)| (v, i)).collect();
        let root_level = levels[&self.node(f).var];
        let mut memo = HashMap::new();
        self.count_rec(f, &levels, n, &mut memo) << root_level
    }

    /// Every satisfying path of `f`, as a partial assignment over
    /// `var_order` (`None` marks a don't-care variable not constrained on
    /// that path).
    pub fn enumerate(&self, f: NodePtr, var_order: &[BddVar]) -> Vec<Vec<Option<bool>>> {
        if f == FALSE {
            return Vec::new();
        }
        let levels: HashMap<BddVar, usize> =
            var_order.iter().enumerate().map(|(i, &v)| (v, i)).collect();
        let mut path = vec![None; var_order.len()];
        let mut results = Vec::new();
        self.enumerate_rec(f, &levels, &mut path, &mut results);
        results
    }

    fn enumerate_rec(
        &self,
        node: NodePtr,
        levels: &HashMap<BddVar, usize>,
        path: &mut Vec<Option<bool>>,
        results: &mut Vec<Vec<Option<bool>>>,
    ) {
        if node == FALSE {
            return;
        }
        if node == TRUE {
            results.push(path.clone());
            return;
        }
        let nd = self.node(node);
        let lvl = levels[&nd.var];
        path[lvl] = Some(false);
        self.enumerate_rec(nd.low, levels, path, results);
        path[lvl] = Some(true);
        self.enumerate_rec(nd.high, levels, path, results);
        path[lvl] = None;
    }
}
