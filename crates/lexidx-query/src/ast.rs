use std::fmt;

/// Parsed boolean query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    Term(String),
    /// Two or more operands, intersected left to right.
    And(Vec<Expr>),
    /// Two or more operands, united left to right.
    Or(Vec<Expr>),
    Not(Box<Expr>),
    /// Parenthesized sub-expression.
    Group(Box<Expr>),
    /// A primary that could not be parsed; matches nothing.
    Empty,
}

impl Expr {
    pub fn term(lemma: impl Into<String>) -> Self { Expr::Term(lemma.into()) }

    pub fn not(inner: Expr) -> Self { Expr::Not(Box::new(inner)) }

    pub fn group(inner: Expr) -> Self { Expr::Group(Box::new(inner)) }

    /// A single operand is returned unwrapped.
    pub fn and(mut operands: Vec<Expr>) -> Self {
        if operands.len() == 1 { operands.remove(0) } else { Expr::And(operands) }
    }

    /// A single operand is returned unwrapped.
    pub fn or(mut operands: Vec<Expr>) -> Self {
        if operands.len() == 1 { operands.remove(0) } else { Expr::Or(operands) }
    }

    /// Lemmas the expression looks up, in order of appearance.
    pub fn terms(&self) -> Vec<&str> {
        let mut out = Vec::new();
        self.collect_terms(&mut out);
        out
    }

    fn collect_terms<'a>(&'a self, out: &mut Vec<&'a str>) {
        match self {
            Expr::Term(term) => out.push(term),
            Expr::And(operands) | Expr::Or(operands) => operands.iter().for_each(|e| e.collect_terms(out)),
            Expr::Not(inner) | Expr::Group(inner) => inner.collect_terms(out),
            Expr::Empty => {}
        }
    }
}

fn write_joined(f: &mut fmt::Formatter<'_>, operands: &[Expr], op: &str) -> fmt::Result {
    for (i, operand) in operands.iter().enumerate() {
        if i > 0 { write!(f, " {op} ")?; }
        write!(f, "{operand}")?;
    }
    Ok(())
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Term(term) => f.write_str(term),
            Expr::And(operands) => write_joined(f, operands, "AND"),
            Expr::Or(operands) => write_joined(f, operands, "OR"),
            Expr::Not(inner) => write!(f, "NOT {inner}"),
            Expr::Group(inner) => write!(f, "({inner})"),
            Expr::Empty => f.write_str("<empty>"),
        }
    }
}
