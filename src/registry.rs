use crate::{
    error::Error,
    template::Template,
    tree::{Tree, Value},
    vocab,
};
use rustc_hash::FxHashMap;
use std::sync::{Arc, OnceLock};

/// Evaluation rule of a symbol. It receives the values of the operands in
/// operand order, and there are always exactly as many values as the arity
/// of the symbol.
pub type Rule = Arc<dyn Fn(&[Value]) -> Result<Value, Error> + Send + Sync>;

/// The operand positions in which an operator associates with itself, or with
/// other operators of the same binding strength.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Assoc {
    /// Only the first operand, like `a - b - c`.
    Left,
    /// Only the last operand, like `a^{b^{c}}`.
    Right,
    /// Every operand, like `a + b + c`.
    Both,
    /// No operand, like `a < b`.
    None,
}

impl Assoc {
    /// Check if the operator associates in position `index` of `arity`
    /// operands.
    pub fn associates(&self, index: usize, arity: usize) -> bool {
        match self {
            Assoc::Left => index == 0,
            Assoc::Right => index + 1 == arity,
            Assoc::Both => true,
            Assoc::None => false,
        }
    }
}

/// How the application of a symbol is written in latex.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notation {
    /// Operator notation given by a template. Operands that bind weaker than
    /// the operator are wrapped in grouping delimiters.
    Operator {
        template: String,
        strength: u8,
        assoc: Assoc,
    },
    /// Operator notation given by a template that encloses all of its
    /// operands, like `\dfrac{{{0}}}{{{1}}}` or `\left|{0}\right|`. Neither
    /// the operands nor the node itself ever need grouping.
    Delimited { template: String },
    /// Function application notation: `name\left(a, b\right)`.
    Function { name: String },
}

impl Notation {
    pub fn operator(template: &str, strength: u8, assoc: Assoc) -> Notation {
        Notation::Operator {
            template: template.to_string(),
            strength,
            assoc,
        }
    }

    pub fn delimited(template: &str) -> Notation {
        Notation::Delimited {
            template: template.to_string(),
        }
    }

    pub fn function(name: &str) -> Notation {
        Notation::Function {
            name: name.to_string(),
        }
    }

    fn template(&self, arity: usize) -> Result<Template, String> {
        let template = match self {
            Notation::Operator { template, .. } | Notation::Delimited { template } => {
                Template::parse(template)?
            }
            Notation::Function { name } => Template::function(name, arity),
        };
        template.check_arity(arity)?;
        Ok(template)
    }
}

/// Definition of a symbol: its arity, notation and evaluation rule.
pub struct Entry {
    symbol: String,
    arity: usize,
    notation: Notation,
    template: Template,
    rule: Rule,
}

impl Entry {
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn arity(&self) -> usize {
        self.arity
    }

    pub fn notation(&self) -> &Notation {
        &self.notation
    }

    /// Check if applications of this symbol are function applications, as
    /// opposed to operator applications.
    pub fn is_function(&self) -> bool {
        matches!(self.notation, Notation::Function { .. })
    }

    /// Binding strength of the operator, if it has operator notation.
    pub fn strength(&self) -> Option<u8> {
        match &self.notation {
            Notation::Operator { strength, .. } => Some(*strength),
            Notation::Delimited { .. } | Notation::Function { .. } => None,
        }
    }

    pub fn assoc(&self) -> Option<Assoc> {
        match &self.notation {
            Notation::Operator { assoc, .. } => Some(*assoc),
            Notation::Delimited { .. } | Notation::Function { .. } => None,
        }
    }

    pub(crate) fn template(&self) -> &Template {
        &self.template
    }

    /// Compute the result of the rule on the values of the operands.
    pub fn apply(&self, values: &[Value]) -> Result<Value, Error> {
        (self.rule)(values)
    }
}

impl PartialEq for Entry {
    /// Entries are compared by their definition. Rules can't be compared, and
    /// a registry never holds two entries with the same symbol.
    fn eq(&self, other: &Self) -> bool {
        self.symbol == other.symbol && self.arity == other.arity && self.notation == other.notation
    }
}

impl std::fmt::Debug for Entry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Entry")
            .field("symbol", &self.symbol)
            .field("arity", &self.arity)
            .field("notation", &self.notation)
            .finish_non_exhaustive()
    }
}

/// Maps symbols to their definitions. This is how the vocabulary of
/// expressions is extended: new operators and functions are registered here,
/// the tree itself only knows about literals, variables and applications.
#[derive(Default)]
pub struct Registry {
    entries: FxHashMap<String, Arc<Entry>>,
}

static GLOBAL: OnceLock<Registry> = OnceLock::new();

impl Registry {
    /// Create an empty registry.
    pub fn new() -> Registry {
        Registry {
            entries: FxHashMap::default(),
        }
    }

    /// Create a registry with the standard vocabulary of arithmetic,
    /// comparison, logical operators and elementary functions.
    pub fn standard() -> Registry {
        let mut reg = Registry::new();
        vocab::register_standard(&mut reg);
        reg
    }

    /// Process wide registry with the standard vocabulary. It is initialized
    /// on first use and immutable after that.
    pub fn global() -> &'static Registry {
        GLOBAL.get_or_init(Registry::standard)
    }

    /// Register `symbol` with the given arity, notation and evaluation
    /// rule. Registering a symbol again with the same arity and notation does
    /// nothing and keeps the rule from the first registration. Registering it
    /// with a different arity or notation is an error.
    pub fn register<F>(
        &mut self,
        symbol: &str,
        arity: usize,
        notation: Notation,
        rule: F,
    ) -> Result<(), Error>
    where
        F: Fn(&[Value]) -> Result<Value, Error> + Send + Sync + 'static,
    {
        if let Some(existing) = self.entries.get(symbol) {
            return if existing.arity == arity && existing.notation == notation {
                Ok(())
            } else {
                Err(Error::ConflictingRegistration {
                    symbol: symbol.to_string(),
                })
            };
        }
        let template = notation
            .template(arity)
            .map_err(|reason| Error::InvalidTemplate {
                symbol: symbol.to_string(),
                reason,
            })?;
        self.entries.insert(
            symbol.to_string(),
            Arc::new(Entry {
                symbol: symbol.to_string(),
                arity,
                notation,
                template,
                rule: Arc::new(rule),
            }),
        );
        Ok(())
    }

    /// Get the definition of `symbol`.
    pub fn lookup(&self, symbol: &str) -> Result<&Arc<Entry>, Error> {
        self.entries
            .get(symbol)
            .ok_or_else(|| Error::UnknownSymbol(symbol.to_string()))
    }

    pub fn contains(&self, symbol: &str) -> bool {
        self.entries.contains_key(symbol)
    }

    /// All registered symbols, sorted.
    pub fn symbols(&self) -> Vec<&str> {
        let mut symbols: Vec<&str> = self.entries.keys().map(|s| s.as_str()).collect();
        symbols.sort_unstable();
        symbols
    }

    /// Create a tree that applies `symbol` to `operands`.
    pub fn apply(&self, symbol: &str, operands: Vec<Tree>) -> Result<Tree, Error> {
        let entry = self.lookup(symbol)?;
        if operands.len() != entry.arity {
            return Err(Error::ArityMismatch {
                symbol: symbol.to_string(),
                expected: entry.arity,
                actual: operands.len(),
            });
        }
        Ok(Tree::application(entry.clone(), operands))
    }
}
