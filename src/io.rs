use crate::{
    latex::Renderer,
    tree::{Node, Node::*, Tree, Value, Value::*},
    walk::DepthWalker,
};

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Bool(val) => write!(f, "{}", val),
            Integer(val) => write!(f, "{}", val),
            Real(val) => write!(f, "{}", val),
        }
    }
}

impl std::fmt::Display for Tree {
    /// Writes one line per node, from the root down, with the operands of
    /// every node indented under it. Applications also show their notation.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let notations = Renderer::default().notations(self);
        // Indentation of the lines of the operands of every node.
        let mut indents: Vec<String> = vec![String::new(); self.len()];
        let mut walker = DepthWalker::new();
        writeln!(f)?;
        for (index, parent) in walker.walk(self) {
            if let Some(pi) = parent {
                let last = self.operands(pi).last() == Some(&index);
                let (branch, indent) = if last {
                    (" └── ", "     ")
                } else {
                    (" ├── ", " │   ")
                };
                write!(f, "{}{}", indents[pi], branch)?;
                indents[index] = format!("{}{}", indents[pi], indent);
            }
            let node = self.node(index);
            write!(f, "[{}] {}", index, node)?;
            if node.entry().is_some() {
                write!(f, ": {}", notations[index])?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl std::fmt::Display for Node {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Literal(value) => write!(f, "Literal({})", value),
            Variable(name) => write!(f, "Variable({})", name),
            Operator(entry, inputs) | Function(entry, inputs) => {
                write!(f, "{}(", entry.symbol())?;
                for (i, input) in inputs.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", input)?;
                }
                write!(f, ")")
            }
        }
    }
}
