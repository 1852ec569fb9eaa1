use crate::{
    error::Error,
    tree::{
        Node::*,
        Tree,
        Value::{self, *},
    },
};
use rustc_hash::FxHashMap;

impl Value {
    /// The name of the type of this value, for error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Bool(_) => "bool",
            Integer(_) => "integer",
            Real(_) => "real",
        }
    }

    /// Numeric value as a real number. Integers are converted.
    pub fn real(&self) -> Result<f64, Error> {
        match self {
            Integer(val) => Ok(*val as f64),
            Real(val) => Ok(*val),
            Bool(_) => Err(Error::TypeMismatch {
                expected: "number",
                found: self.type_name(),
            }),
        }
    }

    pub fn integer(&self) -> Result<i64, Error> {
        match self {
            Integer(val) => Ok(*val),
            Bool(_) | Real(_) => Err(Error::TypeMismatch {
                expected: "integer",
                found: self.type_name(),
            }),
        }
    }

    pub fn boolean(&self) -> Result<bool, Error> {
        match self {
            Bool(val) => Ok(*val),
            Integer(_) | Real(_) => Err(Error::TypeMismatch {
                expected: "bool",
                found: self.type_name(),
            }),
        }
    }
}

impl PartialEq<f64> for Value {
    fn eq(&self, other: &f64) -> bool {
        match self {
            Real(val) => val == other,
            Integer(val) => *val as f64 == *other,
            Bool(_) => false,
        }
    }
}

impl PartialEq<i64> for Value {
    fn eq(&self, other: &i64) -> bool {
        match self {
            Integer(val) => val == other,
            Real(_) | Bool(_) => false,
        }
    }
}

impl PartialEq<bool> for Value {
    fn eq(&self, other: &bool) -> bool {
        match self {
            Bool(flag) => flag == other,
            Integer(_) | Real(_) => false,
        }
    }
}

/// Values of variables, supplied when evaluating an expression.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Context {
    values: FxHashMap<String, Value>,
}

impl Context {
    pub fn new() -> Context {
        Context::default()
    }

    /// Bind the variable `name` to `value`, replacing the previous value if
    /// any.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.values.insert(name.into(), value.into());
    }

    /// Same as `set`, but consumes and returns the context for chaining.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Context {
        self.set(name, value);
        self
    }

    pub fn get(&self, name: &str) -> Option<Value> {
        self.values.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<N: Into<String>, V: Into<Value>> FromIterator<(N, V)> for Context {
    fn from_iter<I: IntoIterator<Item = (N, V)>>(iter: I) -> Self {
        Context {
            values: iter
                .into_iter()
                .map(|(name, value)| (name.into(), value.into()))
                .collect(),
        }
    }
}

/// This can be used to compute the value of a tree.
///
/// The nodes of a tree are in post-order, so they're evaluated in a single
/// pass from the first node to the root. This evaluates the operands of every
/// application from left to right, before the application itself. The
/// evaluator owns the buffer holding the values of the nodes, so reusing the
/// same evaluator for many contexts avoids allocations.
pub struct Evaluator<'a> {
    tree: &'a Tree,
    regs: Vec<Value>,
    args: Vec<Value>,
}

impl<'a> Evaluator<'a> {
    /// Create a new evaluator for `tree`.
    pub fn new(tree: &'a Tree) -> Evaluator<'a> {
        Evaluator {
            tree,
            regs: Vec::with_capacity(tree.len()),
            args: Vec::new(),
        }
    }

    /// Run the evaluator and return the value of the tree. The result may
    /// contain the value, or an error. `UnboundVariable(name)` error means
    /// the variable `name` has no value in `ctx`.
    pub fn run(&mut self, ctx: &Context) -> Result<Value, Error> {
        let tree = self.tree;
        self.regs.clear();
        for node in tree.nodes() {
            let value = match node {
                Literal(value) => *value,
                Variable(name) => ctx
                    .get(name)
                    .ok_or_else(|| Error::UnboundVariable(name.clone()))?,
                Operator(entry, inputs) | Function(entry, inputs) => {
                    self.args.clear();
                    self.args.extend(inputs.iter().map(|i| self.regs[*i]));
                    entry.apply(&self.args).map_err(|e| Error::Rule {
                        symbol: entry.symbol().to_string(),
                        source: Box::new(e),
                    })?
                }
            };
            self.regs.push(value);
        }
        // Trees are never empty.
        Ok(self.regs[tree.root_index()])
    }
}

impl Tree {
    /// Compute the value of this tree, with the variables bound to their
    /// values in `ctx`.
    pub fn eval(&self, ctx: &Context) -> Result<Value, Error> {
        Evaluator::new(self).run(ctx)
    }

    /// Compute the value of this tree without binding any variables. This is
    /// how a tree is used as ordinary executable code.
    pub fn call(&self) -> Result<Value, Error> {
        self.eval(&Context::new())
    }
}
