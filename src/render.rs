//! Tree diagram printer.

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use crate::hierarchy::Hierarchy;

/// Text printed for a tree without nodes.
pub const EMPTY_TREE: &str = "<empty tree>";

/// Continuation of an ancestor which has following siblings.
const EXTENSION: &str = "│ ";
/// Column of an ancestor which was the last child.
const BLANK: &str = "  ";
/// Connector of a node followed by siblings.
const TEE: &str = "├ ";
/// Connector of the last child.
const CORNER: &str = "└ ";

/// Box-drawing diagram of a tree.
///
/// Children are printed in ascending order, two columns deeper than their
/// parent:
///
/// ```text
/// a
/// ├ b
/// │ └ c
/// │   └ d
/// └ d
///   └ c
/// ```
///
/// The traversal uses an explicit stack, so deep trees do not grow the call
/// stack.
pub struct TreeDiagram<'a> {
    /// Tree to print.
    hier: &'a dyn Hierarchy,
}

impl<'a> TreeDiagram<'a> {
    /// Creates a new `TreeDiagram` for the tree.
    pub(crate) fn new(hier: &'a dyn Hierarchy) -> Self {
        Self { hier }
    }
}

impl fmt::Display for TreeDiagram<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let root = match self.hier.root_key() {
            Some(v) => v,
            None => return f.write_str(EMPTY_TREE),
        };

        let mut stack: Vec<(usize, String)> = Vec::new();
        stack.push((0, root.into()));
        // Number of nodes per depth which are pushed but not yet printed.
        // When a node is printed, the pending nodes at the depth of an
        // ancestor are exactly the following siblings of that ancestor.
        let mut pending: Vec<usize> = Vec::new();
        pending.push(0);

        let mut is_first_line = true;
        while let Some((depth, key)) = stack.pop() {
            if is_first_line {
                is_first_line = false;
            } else {
                f.write_str("\n")?;
            }
            if depth > 0 {
                pending[depth] -= 1;
                for &rest in &pending[1..depth] {
                    f.write_str(if rest > 0 { EXTENSION } else { BLANK })?;
                }
                f.write_str(if pending[depth] > 0 { TEE } else { CORNER })?;
            }
            f.write_str(self.hier.label(&key))?;

            let children = self.hier.child_keys(&key);
            if children.is_empty() {
                continue;
            }
            if pending.len() <= depth + 1 {
                pending.push(0);
            }
            debug_assert_eq!(
                pending[depth + 1],
                0,
                "[consistency] nodes deeper than the current one must all be printed"
            );
            pending[depth + 1] = children.len();
            // Push in descending order so that the smallest is popped first.
            stack.extend(children.into_iter().rev().map(|child| (depth + 1, child)));
        }

        Ok(())
    }
}

impl fmt::Debug for TreeDiagram<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TreeDiagram")
            .field("root", &self.hier.root_key())
            .finish()
    }
}
