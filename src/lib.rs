//! String-keyed trees addressed by node names or absolute paths.
//!
//! Two trees are provided:
//!
//! * [`NameTree`] identifies every node by its label. Labels are unique in
//!   the whole tree.
//! * [`PathTree`] identifies every node by its absolute path, i.e. the
//!   delimiter-joined labels from the root to the node. The same label can
//!   appear at many places, but no two nodes share a path.
//!
//! Both keep the children of a node in ascending order and can render
//! themselves as a box-drawing diagram.
//!
//! # Examples
//!
//! ```
//! use pathtree::{NodeRef, OnConflict, PathTree, RemoveMode};
//!
//! let mut tree = PathTree::new();
//! tree.append_all(&["a.b.c", "a.d.c"], OnConflict::Raise)?;
//!
//! assert_eq!(
//!     tree.search(&NodeRef::name("c")).map(|m| m.into_paths()),
//!     Some(vec!["a.b.c".to_owned(), "a.d.c".to_owned()])
//! );
//!
//! assert!(tree.remove(&NodeRef::name("b"), RemoveMode::RemoveOne));
//! assert_eq!(
//!     tree.tree_structure(),
//!     "a\n├ c\n└ d\n  └ c"
//! );
//! # Ok::<_, pathtree::TreeError>(())
//! ```
#![no_std]
#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

mod anchor;
mod config;
mod error;
mod hierarchy;
pub mod name_tree;
pub mod order;
pub mod path;
pub mod path_tree;
pub mod queue;
mod render;

pub use self::anchor::{NodeRef, OnConflict, RemoveMode, SortMode};
pub use self::config::{TreeConfig, DEFAULT_DELIMITER, DEFAULT_ROOT_LABEL};
pub use self::error::TreeError;
pub use self::name_tree::NameTree;
pub use self::order::sort_length_order;
pub use self::path::Delimiter;
pub use self::path_tree::PathTree;
pub use self::queue::{Capacity, DoubleStackQueue};
pub use self::render::{TreeDiagram, EMPTY_TREE};
