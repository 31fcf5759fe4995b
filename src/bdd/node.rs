//! Node representation for the array-based, hash-consed BDD table.

/// Index into the shared node table. `0` and `1` are the two terminal
/// nodes (`FALSE`, `TRUE`) and are always present.
pub type NodePtr = u32;

pub const FALSE: NodePtr = 0;
pub const TRUE: NodePtr = 1;

/// A variable in the BDD's fixed ordering, identified by its position.
/// Lower indices sit closer to the root; the manager that created a
/// `BddVar` is the only thing that can meaningfully interpret it.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct BddVar(pub(crate) u16);

impl BddVar {
    pub fn index(self) -> u16 {
        self.0
    }
}

/// A decision node: branch on `var`, taking `low` when it is `false` and
/// `high` when it is `true`. Terminal nodes use a sentinel `var` that is
/// never read (every traversal checks `is_terminal` first).
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Node {
    pub var: BddVar,
    pub low: NodePtr,
    pub high: NodePtr,
}

pub fn is_terminal(p: NodePtr) -> bool {
    p == FALSE || p == TRUE
}
