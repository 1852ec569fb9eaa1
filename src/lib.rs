pub mod collect;
pub mod docs;
pub mod error;
pub mod eval;
pub mod latex;
pub mod registry;
pub mod tree;
pub mod walk;

mod io;
mod macros;
mod template;
mod vocab;


pub use collect::{Binding, Namespace, collect};
pub use error::Error;
pub use eval::{Context, Evaluator};
pub use latex::{Grouping, Renderer};
pub use registry::{Assoc, Entry, Notation, Registry, Rule};
pub use tree::{Node, Tree, Value};
pub use walk::DepthWalker;
