use crate::tree::Tree;

/// Helper struct for traversing the tree depth first.
///
/// Doing a non-recursive depth first traversal requires a stack, which is
/// owned by this instance. So reusing the same walker many times avoids
/// unnecessary allocations.
#[derive(Default)]
pub struct DepthWalker {
    stack: Vec<(usize, Option<usize>)>,
}

impl DepthWalker {
    pub fn new() -> DepthWalker {
        DepthWalker { stack: vec![] }
    }

    /// Get an iterator that walks the nodes of `tree` starting from the
    /// root. Every node is visited before its operands, and the operands are
    /// visited in operand order. The iterator yields the index of the node
    /// and the index of its parent.
    pub fn walk<'a>(&'a mut self, tree: &'a Tree) -> DepthIterator<'a> {
        self.stack.clear();
        self.stack.reserve(tree.len());
        self.stack.push((tree.root_index(), None));
        DepthIterator { walker: self, tree }
    }
}

/// Iterator that walks the tree depth first.
///
/// The lifetime of this iterator is bound to the lifetime of the tree it's
/// traversing. That's why this is a separate struct from `DepthWalker`, so
/// the same walker can be used for multiple traversals, even on different
/// trees.
pub struct DepthIterator<'a> {
    walker: &'a mut DepthWalker,
    tree: &'a Tree,
}

impl Iterator for DepthIterator<'_> {
    type Item = (usize, Option<usize>);

    fn next(&mut self) -> Option<Self::Item> {
        let (index, parent) = self.walker.stack.pop()?;
        // Push in reverse order because last in first out.
        self.walker.stack.extend(
            self.tree
                .operands(index)
                .iter()
                .rev()
                .map(|child| (*child, Some(index))),
        );
        Some((index, parent))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{defexpr, registry::Registry};

    #[test]
    fn t_depth_traverse() {
        let reg = Registry::standard();
        let mut walker = DepthWalker::new();
        {
            let tree = defexpr!(reg, (+ (^ x 2.) (neg y))).unwrap();
            let a: Vec<_> = walker.walk(&tree).collect();
            assert_eq!(
                a,
                vec![
                    (5, None),
                    (2, Some(5)),
                    (0, Some(2)),
                    (1, Some(2)),
                    (4, Some(5)),
                    (3, Some(4)),
                ]
            );
            // Make sure two successive traversals yield the same nodes.
            let b: Vec<_> = walker.walk(&tree).collect();
            assert_eq!(a, b);
        }
        {
            // Make sure the same DepthWalker can be used on multiple trees.
            let tree = defexpr!(reg, (if (< x 0) (neg x) (sqrt x))).unwrap();
            let a: Vec<_> = walker.walk(&tree).collect();
            let tree2 = tree.clone();
            let b: Vec<_> = walker.walk(&tree2).collect();
            assert_eq!(a, b);
            assert_eq!(a.len(), tree.len());
        }
    }
}
