use crate::{
    eval::Context,
    tree::{Tree, Value},
};
use rustc_hash::FxHashMap;

/// What a name in a `Namespace` is bound to.
#[derive(Debug, Clone, PartialEq)]
pub enum Binding {
    Expr(Tree),
    Value(Value),
}

impl From<Tree> for Binding {
    fn from(tree: Tree) -> Self {
        Binding::Expr(tree)
    }
}

impl From<Value> for Binding {
    fn from(value: Value) -> Self {
        Binding::Value(value)
    }
}

impl From<f64> for Binding {
    fn from(value: f64) -> Self {
        Binding::Value(value.into())
    }
}

impl From<i64> for Binding {
    fn from(value: i64) -> Self {
        Binding::Value(value.into())
    }
}

impl From<i32> for Binding {
    fn from(value: i32) -> Self {
        Binding::Value(value.into())
    }
}

impl From<bool> for Binding {
    fn from(value: bool) -> Self {
        Binding::Value(value.into())
    }
}

/// Ordered collection of named bindings, like the names defined at the top
/// level of a module or a notebook cell. Names keep the position in which
/// they were first bound.
#[derive(Debug, Clone, Default)]
pub struct Namespace {
    bindings: Vec<(String, Binding)>,
    index: FxHashMap<String, usize>,
}

impl Namespace {
    pub fn new() -> Namespace {
        Namespace::default()
    }

    /// Bind `name` to `binding`. Binding a name that is already bound
    /// replaces the old binding, without changing its position.
    pub fn bind(&mut self, name: impl Into<String>, binding: impl Into<Binding>) {
        let name = name.into();
        let binding = binding.into();
        match self.index.get(&name) {
            Some(&i) => self.bindings[i].1 = binding,
            None => {
                self.index.insert(name.clone(), self.bindings.len());
                self.bindings.push((name, binding));
            }
        }
    }

    /// Same as `bind`, but consumes and returns the namespace to allow
    /// chaining.
    pub fn with(mut self, name: impl Into<String>, binding: impl Into<Binding>) -> Namespace {
        self.bind(name, binding);
        self
    }

    pub fn get(&self, name: &str) -> Option<&Binding> {
        self.index.get(name).map(|&i| &self.bindings[i].1)
    }

    /// Iterate over all the bindings in the order they were declared.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Binding)> {
        self.bindings
            .iter()
            .map(|(name, binding)| (name.as_str(), binding))
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// All the names bound to expressions, in declaration order.
    pub fn exprs(&self) -> Vec<(&str, &Tree)> {
        self.iter()
            .filter_map(|(name, binding)| match binding {
                Binding::Expr(tree) => Some((name, tree)),
                Binding::Value(_) => None,
            })
            .collect()
    }

    /// Context made of the names bound to plain values. This is the context
    /// in which the expressions of the namespace are evaluated.
    pub fn context(&self) -> Context {
        self.iter()
            .filter_map(|(name, binding)| match binding {
                Binding::Value(value) => Some((name, *value)),
                Binding::Expr(_) => None,
            })
            .collect()
    }
}

/// Collect all the expressions bound in `namespace`, in declaration order,
/// paired with their names.
pub fn collect(namespace: &Namespace) -> Vec<(&str, &Tree)> {
    namespace.exprs()
}
