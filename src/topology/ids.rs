//! `NodeId` and `ElemId`: strong, zero-cost handles into a mesh arena
//!
//! Elements reference nodes, and refined children reference their parent,
//! by index rather than by pointer. Both handles are `repr(transparent)`
//! wrappers around `u32` so they hash, order and serialize like plain
//! integers while staying distinct at the type level.

use std::fmt;

/// Handle of a node in a mesh node store.
#[derive(
    Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize,
)]
#[repr(transparent)]
pub struct NodeId(u32);

/// Handle of an element in a mesh arena.
#[derive(
    Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize,
)]
#[repr(transparent)]
pub struct ElemId(u32);

macro_rules! arena_id {
    ($name:ident) => {
        impl $name {
            /// Creates a handle from a raw arena index.
            #[inline]
            pub const fn new(raw: u32) -> Self {
                $name(raw)
            }

            /// Returns the raw index.
            #[inline]
            pub const fn get(self) -> u32 {
                self.0
            }

            /// Returns the raw index as `usize` for slice access.
            #[inline]
            pub const fn index(self) -> usize {
                self.0 as usize
            }

            #[inline]
            pub(crate) fn from_index(index: usize) -> Self {
                $name(u32::try_from(index).expect("arena exceeds u32 index space"))
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.debug_tuple(stringify!($name)).field(&self.0).finish()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<$name> for u32 {
            #[inline]
            fn from(id: $name) -> u32 {
                id.0
            }
        }
    };
}

arena_id!(NodeId);
arena_id!(ElemId);
