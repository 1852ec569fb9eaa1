use crate::registry::Entry;
use std::sync::Arc;

/// Runtime value produced by evaluating an expression.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Value {
    Bool(bool),
    Integer(i64),
    Real(f64),
}
use Value::*;

/// Represents a node in an expression `Tree`.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Literal(Value),
    Variable(String),
    /// Application of an operator to the nodes at the given indices.
    Operator(Arc<Entry>, Box<[usize]>),
    /// Application of a function to the nodes at the given indices.
    Function(Arc<Entry>, Box<[usize]>),
}

use Node::*;

impl Node {
    /// Indices of the operands of this node.
    pub fn operands(&self) -> &[usize] {
        match self {
            Literal(_) | Variable(_) => &[],
            Operator(_, inputs) | Function(_, inputs) => inputs,
        }
    }

    /// The registry entry of the operator or function applied by this node.
    pub fn entry(&self) -> Option<&Entry> {
        match self {
            Literal(_) | Variable(_) => None,
            Operator(entry, _) | Function(entry, _) => Some(entry),
        }
    }
}

/// Represents an expression.
///
/// The nodes are stored in post-order: the operands of every node appear
/// before the node itself, the subtrees of the operands appear one after the
/// other in operand order, and the root is the last node. Trees are only
/// created through the constructors in this crate, which always produce this
/// layout, so two trees are structurally equal iff their nodes are equal.
/// Trees are immutable once constructed.
#[derive(Debug, Clone, PartialEq)]
pub struct Tree {
    nodes: Vec<Node>,
}

impl Tree {
    /// Create a tree representing a literal value.
    pub fn literal(value: impl Into<Value>) -> Tree {
        Tree {
            nodes: vec![Literal(value.into())],
        }
    }

    /// Create a tree representing a variable with the given `name`.
    pub fn variable(name: impl Into<String>) -> Tree {
        Tree {
            nodes: vec![Variable(name.into())],
        }
    }

    /// Apply `entry` to `operands`. The caller must have checked the arity.
    pub(crate) fn application(entry: Arc<Entry>, operands: Vec<Tree>) -> Tree {
        debug_assert_eq!(entry.arity(), operands.len());
        let len = operands.iter().map(|t| t.len()).sum::<usize>() + 1;
        let mut nodes = Vec::with_capacity(len);
        let mut inputs = Vec::with_capacity(operands.len());
        for operand in operands {
            push_nodes(&mut nodes, operand);
            // The root of the operand is its last node.
            inputs.push(nodes.len() - 1);
        }
        let inputs = inputs.into_boxed_slice();
        nodes.push(if entry.is_function() {
            Function(entry, inputs)
        } else {
            Operator(entry, inputs)
        });
        Tree { nodes }
    }

    /// The number of nodes in this tree.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Index of the root node. This is the last node of the tree.
    pub fn root_index(&self) -> usize {
        self.nodes.len() - 1
    }

    /// Get a reference to root of the tree.
    pub fn root(&self) -> &Node {
        &self.nodes[self.root_index()]
    }

    /// Get a reference to the node at `index`.
    pub fn node(&self, index: usize) -> &Node {
        &self.nodes[index]
    }

    /// Reference to the nodes of this tree.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Indices of the operands of the node at `index`, in operand order.
    pub fn operands(&self, index: usize) -> &[usize] {
        self.nodes[index].operands()
    }

    /// Index of the first node of the subtree rooted at `index`.
    fn subtree_start(&self, index: usize) -> usize {
        // Because of the post-order layout, the subtree of a node starts where
        // the subtree of its first operand starts.
        let mut first = index;
        while let Some(&child) = self.nodes[first].operands().first() {
            first = child;
        }
        first
    }

    /// Copy the subtree rooted at the node at `index` into a new tree.
    pub fn subtree(&self, index: usize) -> Tree {
        let start = self.subtree_start(index);
        Tree {
            nodes: self.nodes[start..=index]
                .iter()
                .map(|node| shifted(node, |i| i - start))
                .collect(),
        }
    }

    /// Get a unique list of all variable names in this tree. The names
    /// appear in the same order as they first appear in the tree.
    pub fn variables(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for node in &self.nodes {
            if let Variable(name) = node {
                if !names.contains(&name.as_str()) {
                    names.push(name);
                }
            }
        }
        names
    }
}

fn shifted<F: Fn(usize) -> usize>(node: &Node, shift: F) -> Node {
    match node {
        Literal(value) => Literal(*value),
        Variable(name) => Variable(name.clone()),
        Operator(entry, inputs) => {
            Operator(entry.clone(), inputs.iter().map(|i| shift(*i)).collect())
        }
        Function(entry, inputs) => {
            Function(entry.clone(), inputs.iter().map(|i| shift(*i)).collect())
        }
    }
}

/// Move the nodes of `other` to the end of `nodes`, shifting their operand
/// indices accordingly.
fn push_nodes(nodes: &mut Vec<Node>, other: Tree) {
    let offset = nodes.len();
    if offset == 0 {
        nodes.extend(other.nodes);
    } else {
        nodes.extend(other.nodes.iter().map(|node| shifted(node, |i| i + offset)));
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Real(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Integer(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Integer(value as i64)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Bool(value)
    }
}

impl From<Value> for Tree {
    fn from(value: Value) -> Self {
        Self::literal(value)
    }
}

impl From<f64> for Tree {
    fn from(value: f64) -> Self {
        Self::literal(value)
    }
}

impl From<i64> for Tree {
    fn from(value: i64) -> Self {
        Self::literal(value)
    }
}

impl From<i32> for Tree {
    fn from(value: i32) -> Self {
        Self::literal(value)
    }
}

impl From<bool> for Tree {
    fn from(value: bool) -> Self {
        Self::literal(value)
    }
}

impl From<&str> for Tree {
    fn from(name: &str) -> Self {
        Self::variable(name)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{defexpr, registry::Registry};

    #[test]
    fn t_leaves() {
        let x = Tree::variable("x");
        assert_eq!(x.len(), 1);
        assert_eq!(x.root(), &Variable("x".to_string()));
        let two = Tree::literal(2);
        assert_eq!(two.nodes(), &[Literal(Integer(2))]);
        assert_eq!(Tree::literal(2.5).root(), &Literal(Real(2.5)));
        assert_eq!(Tree::from(true).root(), &Literal(Bool(true)));
    }

    #[test]
    fn t_post_order_layout() {
        let reg = Registry::standard();
        let tree = defexpr!(reg, (* (+ x 2) (neg y))).unwrap();
        assert_eq!(tree.len(), 6);
        assert_eq!(tree.node(0), &Variable("x".to_string()));
        assert_eq!(tree.node(1), &Literal(Integer(2)));
        assert_eq!(tree.operands(2), &[0, 1]);
        assert_eq!(tree.node(3), &Variable("y".to_string()));
        assert_eq!(tree.operands(4), &[3]);
        assert_eq!(tree.operands(5), &[2, 4]);
        assert_eq!(tree.root_index(), 5);
        assert_eq!(tree.root().entry().map(|e| e.symbol()), Some("*"));
    }

    #[test]
    fn t_structural_equality() {
        let reg = Registry::standard();
        let a = defexpr!(reg, (+ x (* 2 y))).unwrap();
        let b = defexpr!(reg, (+ x (* 2 y))).unwrap();
        assert_eq!(a, b);
        // Different operand order.
        assert_ne!(a, defexpr!(reg, (+ (* 2 y) x)).unwrap());
        // Different literal.
        assert_ne!(a, defexpr!(reg, (+ x (* 3 y))).unwrap());
        // Different variable.
        assert_ne!(a, defexpr!(reg, (+ x (* 2 z))).unwrap());
        // Different operator.
        assert_ne!(a, defexpr!(reg, (- x (* 2 y))).unwrap());
        // Integer and real literals are different values.
        assert_ne!(Tree::literal(2), Tree::literal(2.0));
    }

    #[test]
    fn t_subtree() {
        let reg = Registry::standard();
        let tree = defexpr!(reg, (- (sqrt (+ x 1)) (* y 2))).unwrap();
        let root = tree.root_index();
        let [lhs, rhs] = tree.operands(root) else {
            panic!("Expecting two operands");
        };
        assert_eq!(tree.subtree(*lhs), defexpr!(reg, (sqrt (+ x 1))).unwrap());
        assert_eq!(tree.subtree(*rhs), defexpr!(reg, (* y 2)).unwrap());
        assert_eq!(tree.subtree(root), tree);
        assert_eq!(tree.subtree(0), Tree::variable("x"));
    }

    #[test]
    fn t_variables() {
        let reg = Registry::standard();
        let tree = defexpr!(reg, (* (+ x y) (+ a x))).unwrap();
        assert_eq!(tree.variables(), vec!["x", "y", "a"]);
        assert!(Tree::literal(1).variables().is_empty());
    }
}
