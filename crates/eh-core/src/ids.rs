//! Integer id types for the graph arenas.
//!
//! `NodeId` and `EdgeId` are thin `u32` wrappers: a node id can never be
//! handed to an edge lookup by mistake, yet both still order, hash, and
//! copy like the plain integers they are.  An id is a slot number into the
//! owning arena — `id.index()` is the `Vec` subscript — and `u32::MAX` is
//! reserved as the not-assigned sentinel.

use std::fmt;

/// Define a `u32`-backed id with an `INVALID` sentinel and a short display
/// tag (`n3`, `e17`, …).
macro_rules! typed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident($inner:ty), $tag:literal) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        $vis struct $name(pub $inner);

        impl $name {
            /// Reserved not-assigned value; never a real slot.
            pub const INVALID: $name = $name(<$inner>::MAX);

            /// The arena slot this id points at.
            #[inline(always)]
            pub fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl Default for $name {
            /// [`Self::INVALID`], so a slot that was never assigned cannot
            /// masquerade as id 0.
            fn default() -> Self {
                Self::INVALID
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($tag, "{}"), self.0)
            }
        }
    };
}

typed_id! {
    /// Arena index of a road-graph node.
    pub struct NodeId(u32), "n"
}

typed_id! {
    /// Arena index of a directed road-graph edge.
    pub struct EdgeId(u32), "e"
}
