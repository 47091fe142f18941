use crate::ast::Expr;
use crate::token::{tokenize, Token};

/// Result of parsing a token stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedQuery {
    pub expr: Expr,
    /// Tokens after the top-level expression that the grammar could not
    /// attach, e.g. a stray `)` or a second term with no operator. They are
    /// ignored by evaluation.
    pub trailing: Vec<Token>,
}

impl ParsedQuery {
    /// Trailing tokens joined back into query text.
    pub fn trailing_text(&self) -> String {
        self.trailing.iter().map(Token::to_string).collect::<Vec<_>>().join(" ")
    }
}

/// Deepest chain of `(` and `NOT` the parser descends into. A primary that
/// would open one more level becomes `Expr::Empty` and the rest of the input
/// is left as trailing tokens.
pub const MAX_NESTING: usize = 256;

/// Recursive-descent parse of `tokens`.
///
/// Parsing is lenient and never fails: a missing `)` is closed by end of
/// input, and a primary that cannot start at the current token (an operator,
/// `)` or end of input) becomes `Expr::Empty` without consuming anything.
/// Nesting is capped at `MAX_NESTING`, which keeps parsing, evaluation and
/// dropping of the tree within a bounded stack.
pub fn parse(tokens: &[Token]) -> ParsedQuery {
    let mut parser = Parser { tokens, pos: 0, depth: 0 };
    let expr = parser.parse_or();
    ParsedQuery { expr, trailing: tokens[parser.pos..].to_vec() }
}

pub fn parse_query(query: &str) -> ParsedQuery { parse(&tokenize(query)) }

struct Parser<'t> {
    tokens: &'t [Token],
    pos: usize,
    depth: usize,
}

impl<'t> Parser<'t> {
    fn peek(&self) -> Option<&'t Token> { self.tokens.get(self.pos) }

    fn advance(&mut self) {
        if self.pos < self.tokens.len() { self.pos += 1; }
    }

    fn eat(&mut self, expected: &Token) -> bool {
        if self.peek() == Some(expected) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn nested(&mut self, parse: impl FnOnce(&mut Self) -> Expr) -> Expr {
        self.depth += 1;
        let expr = parse(self);
        self.depth -= 1;
        expr
    }

    fn parse_or(&mut self) -> Expr {
        let mut operands = vec![self.parse_and()];
        while self.eat(&Token::Or) {
            operands.push(self.parse_and());
        }
        Expr::or(operands)
    }

    fn parse_and(&mut self) -> Expr {
        let mut operands = vec![self.parse_primary()];
        while self.eat(&Token::And) {
            operands.push(self.parse_primary());
        }
        Expr::and(operands)
    }

    fn parse_primary(&mut self) -> Expr {
        match self.peek() {
            Some(Token::LParen | Token::Not) if self.depth >= MAX_NESTING => Expr::Empty,
            Some(Token::Term(term)) => {
                self.advance();
                Expr::term(term.as_str())
            }
            Some(Token::LParen) => {
                self.advance();
                let inner = self.nested(Self::parse_or);
                self.eat(&Token::RParen);
                Expr::group(inner)
            }
            Some(Token::Not) => {
                self.advance();
                Expr::not(self.nested(Self::parse_primary))
            }
            Some(Token::And | Token::Or | Token::RParen) | None => Expr::Empty,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(s: &str) -> Expr { Expr::term(s) }

    #[test]
    fn and_binds_tighter_than_or() {
        let parsed = parse_query("a OR b AND c OR d");
        assert_eq!(parsed.expr, Expr::Or(vec![t("a"), Expr::And(vec![t("b"), t("c")]), t("d")]));
        assert!(parsed.trailing.is_empty());
    }

    #[test]
    fn not_binds_tightest() {
        assert_eq!(parse_query("NOT a AND b").expr, Expr::And(vec![Expr::not(t("a")), t("b")]));
        assert_eq!(parse_query("NOT NOT a").expr, Expr::not(Expr::not(t("a"))));
    }

    #[test]
    fn groups_nest() {
        assert_eq!(
            parse_query("(a OR b) AND NOT (c)").expr,
            Expr::And(vec![Expr::group(Expr::Or(vec![t("a"), t("b")])), Expr::not(Expr::group(t("c")))])
        );
    }

    #[test]
    fn missing_close_paren_is_implicit() {
        let parsed = parse_query("(a AND (b OR c");
        assert_eq!(
            parsed.expr,
            Expr::group(Expr::And(vec![t("a"), Expr::group(Expr::Or(vec![t("b"), t("c")]))]))
        );
        assert!(parsed.trailing.is_empty());
    }

    #[test]
    fn misplaced_operators_become_empty() {
        assert_eq!(parse_query("").expr, Expr::Empty);
        assert_eq!(parse_query("AND a").expr, Expr::And(vec![Expr::Empty, t("a")]));
        assert_eq!(parse_query("a OR").expr, Expr::Or(vec![t("a"), Expr::Empty]));
        assert_eq!(parse_query("NOT").expr, Expr::not(Expr::Empty));
        assert_eq!(parse_query("()").expr, Expr::group(Expr::Empty));
    }

    #[test]
    fn unattached_tokens_are_trailing() {
        let parsed = parse_query("a b");
        assert_eq!(parsed.expr, t("a"));
        assert_eq!(parsed.trailing, vec![Token::Term("b".into())]);

        let parsed = parse_query("a ) OR b");
        assert_eq!(parsed.expr, t("a"));
        assert_eq!(parsed.trailing.len(), 3);

        let parsed = parse_query(") a");
        assert_eq!(parsed.expr, Expr::Empty);
        assert_eq!(parsed.trailing, vec![Token::RParen, Token::Term("a".into())]);
        assert_eq!(parsed.trailing_text(), ") a");
    }

    #[test]
    fn nesting_is_capped() {
        let within = format!("{}a{}", "(".repeat(MAX_NESTING), ")".repeat(MAX_NESTING));
        let parsed = parse_query(&within);
        assert_eq!(parsed.expr.terms(), vec!["a"]);
        assert!(parsed.trailing.is_empty());

        let beyond = format!("{}a", "(".repeat(MAX_NESTING + 1));
        let parsed = parse_query(&beyond);
        assert!(parsed.expr.terms().is_empty());
        assert_eq!(parsed.trailing_text(), "( a");

        let parsed = parse_query(&"NOT ".repeat(MAX_NESTING + 5));
        assert_eq!(parsed.trailing.len(), 5);
    }

    #[test]
    fn terms_follow_query_order() {
        assert_eq!(parse_query("b AND (NOT a OR c) AND b").expr.terms(), vec!["b", "a", "c", "b"]);
    }

    #[test]
    fn display_reparses_to_same_tree() {
        for query in ["a AND (b OR NOT c)", "NOT (a AND b) OR c AND d", "((a))"] {
            let expr = parse_query(query).expr;
            assert_eq!(parse_query(&expr.to_string()).expr, expr, "{query} -> {expr}");
        }
    }
}
