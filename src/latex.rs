use crate::{
    registry::{Assoc, Entry},
    tree::{
        Node::{self, *},
        Tree,
        Value::{self, *},
    },
};

/// Delimiters used to group the notation of an operand.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum Grouping {
    /// `(` and `)`.
    #[default]
    Parens,
    /// `\left(` and `\right)`, which grow with their contents.
    Sized,
}

impl Grouping {
    fn wrap(&self, latex: String) -> String {
        match self {
            Grouping::Parens => format!("({latex})"),
            Grouping::Sized => format!("\\left({latex}\\right)"),
        }
    }
}

/// Produces the latex notation of trees.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub struct Renderer {
    grouping: Grouping,
}

impl Renderer {
    pub fn new(grouping: Grouping) -> Renderer {
        Renderer { grouping }
    }

    /// Produce the latex notation of `tree`.
    ///
    /// The nodes are visited in post-order, so the notation of every node is
    /// produced from the already produced notations of its operands, and
    /// independently of its parent. The parent decides whether to group
    /// them.
    pub fn render(&self, tree: &Tree) -> String {
        // Every node is the operand of exactly one parent, so its notation
        // can be moved out.
        self.compose(tree, |latex, i| std::mem::take(&mut latex[i]))
            .pop()
            .unwrap_or_default()
    }

    /// The notation of every node of `tree`, indexed like the nodes.
    pub(crate) fn notations(&self, tree: &Tree) -> Vec<String> {
        self.compose(tree, |latex, i| latex[i].clone())
    }

    fn compose<F>(&self, tree: &Tree, mut operand: F) -> Vec<String>
    where
        F: FnMut(&mut [String], usize) -> String,
    {
        let nodes = tree.nodes();
        let mut latex: Vec<String> = Vec::with_capacity(nodes.len());
        for node in nodes {
            let lx = match node {
                Literal(value) => literal_latex(value),
                Variable(name) => name.clone(),
                Operator(entry, inputs) | Function(entry, inputs) => {
                    let operands: Vec<String> = inputs
                        .iter()
                        .enumerate()
                        .map(|(pos, &i)| {
                            let lx = operand(latex.as_mut_slice(), i);
                            if needs_grouping(entry, pos, &nodes[i], &lx) {
                                self.grouping.wrap(lx)
                            } else {
                                lx
                            }
                        })
                        .collect();
                    entry.template().fill(&operands)
                }
            };
            latex.push(lx);
        }
        latex
    }
}

impl Tree {
    /// Produce the latex notation for the tree, using plain parentheses for
    /// grouping.
    pub fn to_latex(&self) -> String {
        Renderer::default().render(self)
    }
}

/// Canonical latex of a literal value. Integers are written in decimal. Real
/// numbers use the shortest representation that round trips to the same
/// number, without an exponent.
fn literal_latex(value: &Value) -> String {
    match value {
        Bool(true) => "\\text{true}".to_string(),
        Bool(false) => "\\text{false}".to_string(),
        Integer(val) => val.to_string(),
        Real(val) if val.is_nan() => "\\mathrm{NaN}".to_string(),
        Real(val) if val.is_infinite() => {
            if val.is_sign_positive() {
                "\\infty".to_string()
            } else {
                "-\\infty".to_string()
            }
        }
        Real(val) => val.to_string(),
    }
}

/// Look at the operand `child` in position `pos` of an application of
/// `parent`, and decide if its `latex` should be wrapped in grouping
/// delimiters.
///
/// Operators of equal strength are read left to right. So an operand in the
/// leading position is only left as is if both operators read left to right,
/// and an operand in any other position only if it applies the same
/// associative operator as the parent.
fn needs_grouping(parent: &Entry, pos: usize, child: &Node, latex: &str) -> bool {
    let (Some(strength), Some(assoc)) = (parent.strength(), parent.assoc()) else {
        // Delimited and function notation enclose their operands.
        return false;
    };
    if parent.template().is_braced(pos) {
        return false;
    }
    match child {
        Literal(_) => latex.starts_with('-'),
        Variable(_) | Function(..) => false,
        Operator(entry, _) => {
            let Some(cs) = entry.strength() else {
                // Delimited.
                return false;
            };
            if pos > 0 && latex.starts_with('-') {
                // Avoid `a - -b`.
                return true;
            }
            if cs != strength {
                return cs < strength;
            }
            if entry.symbol() == parent.symbol() {
                !assoc.associates(pos, parent.arity())
            } else if pos == 0 {
                let child_assoc = entry.assoc().unwrap_or(Assoc::None);
                !(assoc.associates(0, parent.arity()) && child_assoc.associates(0, entry.arity()))
            } else {
                true
            }
        }
    }
}
