use lexidx_core::{InvertedIndex, PostingSet, Universe};

use crate::ast::Expr;

/// Evaluates an `Expr` against one index and universe snapshot.
#[derive(Debug, Clone, Copy)]
pub struct Evaluator<'a> {
    index: &'a InvertedIndex,
    universe: &'a Universe,
}

impl<'a> Evaluator<'a> {
    pub fn new(index: &'a InvertedIndex, universe: &'a Universe) -> Self {
        Self { index, universe }
    }

    pub fn evaluate(&self, expr: &Expr) -> PostingSet {
        match expr {
            Expr::Term(lemma) => self.index.get(lemma).cloned().unwrap_or_default(),
            Expr::And(operands) => {
                let mut operands = operands.iter();
                let Some(first) = operands.next() else { return PostingSet::new() };
                let mut acc = self.evaluate(first);
                for operand in operands {
                    // Once empty, further intersections cannot add anything back.
                    if acc.is_empty() { break; }
                    acc = &acc & &self.evaluate(operand);
                }
                acc
            }
            Expr::Or(operands) => {
                let mut acc = PostingSet::new();
                for operand in operands {
                    acc.extend(self.evaluate(operand));
                }
                acc
            }
            Expr::Not(inner) => {
                let excluded = self.evaluate(inner);
                self.universe.ids().difference(&excluded).copied().collect()
            }
            Expr::Group(inner) => self.evaluate(inner),
            Expr::Empty => PostingSet::new(),
        }
    }
}
