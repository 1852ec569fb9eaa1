use std::fmt::Write;

/// A piece of a notation template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Piece {
    /// Literal latex.
    Text(String),
    /// The notation of the operand with the given index.
    Operand(usize),
}

/// Parsed notation template. A template is literal latex with `{N}`
/// placeholders for the notation of the operand `N`. Literal braces are
/// written as `{{` and `}}`, the same way as in `format!` strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Template {
    pieces: Vec<Piece>,
}

impl Template {
    pub fn parse(template: &str) -> Result<Template, String> {
        let mut pieces = Vec::new();
        let mut text = String::new();
        let mut chars = template.chars().peekable();
        while let Some(c) = chars.next() {
            match c {
                '{' => {
                    if chars.next_if_eq(&'{').is_some() {
                        text.push('{');
                        continue;
                    }
                    let mut digits = String::new();
                    loop {
                        match chars.next() {
                            Some('}') => break,
                            Some(d) if d.is_ascii_digit() => digits.push(d),
                            Some(other) => {
                                return Err(format!("unexpected `{other}` inside a placeholder"));
                            }
                            None => return Err("unterminated placeholder".to_string()),
                        }
                    }
                    let index = digits
                        .parse::<usize>()
                        .map_err(|_| "placeholders must contain an operand index".to_string())?;
                    if !text.is_empty() {
                        pieces.push(Piece::Text(std::mem::take(&mut text)));
                    }
                    pieces.push(Piece::Operand(index));
                }
                '}' => {
                    if chars.next_if_eq(&'}').is_some() {
                        text.push('}');
                    } else {
                        return Err("unmatched `}`, write `}}` for a literal brace".to_string());
                    }
                }
                _ => text.push(c),
            }
        }
        if !text.is_empty() {
            pieces.push(Piece::Text(text));
        }
        Ok(Template { pieces })
    }

    /// Template for function application notation: `name\left(a, b\right)`.
    pub fn function(name: &str, arity: usize) -> Template {
        let mut pieces = Vec::with_capacity(2 * arity + 1);
        pieces.push(Piece::Text(format!("{name}\\left(")));
        for i in 0..arity {
            if i > 0 {
                pieces.push(Piece::Text(", ".to_string()));
            }
            pieces.push(Piece::Operand(i));
        }
        pieces.push(Piece::Text("\\right)".to_string()));
        Template { pieces }
    }

    /// Make sure every placeholder refers to an operand, and every operand
    /// appears in the template.
    pub fn check_arity(&self, arity: usize) -> Result<(), String> {
        let mut seen = vec![false; arity];
        for piece in &self.pieces {
            if let Piece::Operand(i) = piece {
                match seen.get_mut(*i) {
                    Some(flag) => *flag = true,
                    None => {
                        return Err(format!(
                            "placeholder {{{i}}} is out of range for {arity} operand(s)"
                        ));
                    }
                }
            }
        }
        match seen.iter().position(|flag| !flag) {
            Some(missing) => Err(format!("operand {missing} does not appear in the template")),
            None => Ok(()),
        }
    }

    /// Check if every occurrence of the operand `index` is enclosed in a
    /// latex group, i.e. written as `{{{index}}}`. The notation of such an
    /// operand never needs grouping delimiters.
    pub fn is_braced(&self, index: usize) -> bool {
        let mut found = false;
        for (i, piece) in self.pieces.iter().enumerate() {
            if *piece != Piece::Operand(index) {
                continue;
            }
            found = true;
            let before = match i.checked_sub(1).map(|b| &self.pieces[b]) {
                Some(Piece::Text(text)) => text.ends_with('{') && !text.ends_with("\\{"),
                _ => false,
            };
            let after = match self.pieces.get(i + 1) {
                Some(Piece::Text(text)) => text.starts_with('}'),
                _ => false,
            };
            if !(before && after) {
                return false;
            }
        }
        found
    }

    /// Interleave the notations of the operands with the literal latex.
    pub fn fill(&self, operands: &[String]) -> String {
        let mut out = String::new();
        for piece in &self.pieces {
            match piece {
                Piece::Text(text) => out.push_str(text),
                // Operand indices were checked at registration.
                Piece::Operand(i) => out.push_str(&operands[*i]),
            }
        }
        out
    }
}

impl std::fmt::Display for Template {
    /// Writes the template back in its source form.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for piece in &self.pieces {
            match piece {
                Piece::Text(text) => {
                    for c in text.chars() {
                        match c {
                            '{' => f.write_str("{{")?,
                            '}' => f.write_str("}}")?,
                            _ => f.write_char(c)?,
                        }
                    }
                }
                Piece::Operand(i) => write!(f, "{{{i}}}")?,
            }
        }
        Ok(())
    }
}
