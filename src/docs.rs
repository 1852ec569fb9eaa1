//! Formatting of expressions for documents and notebooks. Every expression
//! is shown as display math, optionally next to its value.

use crate::{collect::Namespace, error::Error};

/// Wrap `latex` in display math delimiters.
pub fn display_math(latex: &str) -> String {
    format!("$${latex}$$")
}

/// Format the rows, each a list of cells, as an HTML table.
pub fn table(rows: &[Vec<String>]) -> String {
    let mut out = String::from("<table class=\"lemma-table\">");
    for row in rows {
        out.push_str("<tr>");
        for cell in row {
            out.push_str("<td style=\"font-size: 14px; padding: 20px;\">");
            out.push_str(cell);
            out.push_str("</td>");
        }
        out.push_str("</tr>");
    }
    out.push_str("</table>");
    out
}

/// HTML table with one row for every expression in `namespace`, holding the
/// notation of the expression and its value. The expressions are evaluated
/// in the context of the values bound in the namespace.
pub fn expr_table(namespace: &Namespace) -> Result<String, Error> {
    let ctx = namespace.context();
    let rows = namespace
        .exprs()
        .into_iter()
        .map(|(_, tree)| Ok(vec![display_math(&tree.to_latex()), tree.eval(&ctx)?.to_string()]))
        .collect::<Result<Vec<_>, Error>>()?;
    Ok(table(&rows))
}

/// Markdown document with one section for every expression in
/// `namespace`. Each section has the name of the expression as the heading,
/// followed by its notation, and its value if `with_values` is true.
pub fn markdown(namespace: &Namespace, with_values: bool) -> Result<String, Error> {
    let ctx = namespace.context();
    let mut sections = Vec::new();
    for (name, tree) in namespace.exprs() {
        let mut section = format!("### {name}\n\n{}\n", display_math(&tree.to_latex()));
        if with_values {
            section.push_str(&format!("\n= {}\n", tree.eval(&ctx)?));
        }
        sections.push(section);
    }
    Ok(sections.join("\n"))
}
