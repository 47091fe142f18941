use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// Lower-cased search term.
    Term(String),
    And,
    Or,
    Not,
    LParen,
    RParen,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Term(term) => f.write_str(term),
            Token::And => f.write_str("AND"),
            Token::Or => f.write_str("OR"),
            Token::Not => f.write_str("NOT"),
            Token::LParen => f.write_str("("),
            Token::RParen => f.write_str(")"),
        }
    }
}

const KEYWORDS: [(&str, Token); 3] = [("and", Token::And), ("or", Token::Or), ("not", Token::Not)];

/// Split a raw query into tokens. Never fails; blank input gives no tokens.
///
/// Parentheses always stand alone. A run of other non-space characters is a
/// term unless it starts with `AND`, `OR` or `NOT` (any case) followed by a
/// word boundary, in which case the keyword becomes an operator and whatever
/// follows it in the run becomes a term: `android` is one term, `AND-x` is
/// `And` then `-x`.
pub fn tokenize(query: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut rest = query;
    loop {
        rest = rest.trim_start();
        let Some(c) = rest.chars().next() else { break };
        match c {
            '(' | ')' => {
                tokens.push(if c == '(' { Token::LParen } else { Token::RParen });
                rest = &rest[1..];
            }
            _ => {
                let end = rest.find(|c: char| c.is_whitespace() || c == '(' || c == ')').unwrap_or(rest.len());
                let (run, tail) = rest.split_at(end);
                lex_run(run, &mut tokens);
                rest = tail;
            }
        }
    }
    tokens
}

fn lex_run(run: &str, tokens: &mut Vec<Token>) {
    match leading_keyword(run) {
        Some((op, remainder)) => {
            tokens.push(op);
            if !remainder.is_empty() {
                tokens.push(Token::Term(remainder.to_lowercase()));
            }
        }
        None => tokens.push(Token::Term(run.to_lowercase())),
    }
}

fn leading_keyword(run: &str) -> Option<(Token, &str)> {
    KEYWORDS.iter().find_map(|(keyword, op)| {
        let head = run.get(..keyword.len())?;
        let remainder = &run[keyword.len()..];
        let at_boundary = remainder.chars().next().map_or(true, |c| !is_word_char(c));
        (head.eq_ignore_ascii_case(keyword) && at_boundary).then(|| (op.clone(), remainder))
    })
}

fn is_word_char(c: char) -> bool { c.is_alphanumeric() || c == '_' }
