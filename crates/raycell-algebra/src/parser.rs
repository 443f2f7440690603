//! Recursive-descent parser building rule trees from token streams.
//!
//! Grammar (implicit AND binds tighter than `:`):
//!
//! ```text
//! expression   := intersection (':' intersection)*
//! intersection := factor factor*
//! factor       := signed-id | '#' cell-id | '#' '(' expression ')' | '(' expression ')'
//! ```

use crate::error::AlgebraError;
use crate::lexer::{Lexer, Token};
use crate::rule::{Rule, Sense};

impl Rule {
    /// Build a rule tree from a cell-algebra expression.
    pub fn from_expression(text: &str) -> Result<Self, AlgebraError> {
        let tokens = Lexer::new(text).tokenize()?;
        let mut parser = Parser { tokens, pos: 0 };
        let rule = parser.expression()?;
        if parser.pos != parser.tokens.len() {
            // Only an unmatched ')' can be left over.
            return Err(AlgebraError::Unbalanced);
        }
        Ok(rule)
    }
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    fn peek(&self) -> Option<Token> {
        self.tokens.get(self.pos).copied()
    }

    fn advance(&mut self) -> Option<Token> {
        let token = self.peek();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn expression(&mut self) -> Result<Rule, AlgebraError> {
        let mut node = self.intersection()?;
        while self.peek() == Some(Token::Colon) {
            self.advance();
            let right = self.intersection()?;
            node = Rule::union(node, right);
        }
        Ok(node)
    }

    fn intersection(&mut self) -> Result<Rule, AlgebraError> {
        let mut node = self.factor()?;
        while matches!(
            self.peek(),
            Some(Token::Literal(_) | Token::CellRef(_) | Token::Hash | Token::LParen)
        ) {
            let right = self.factor()?;
            node = Rule::intersection(node, right);
        }
        Ok(node)
    }

    fn factor(&mut self) -> Result<Rule, AlgebraError> {
        match self.advance() {
            Some(Token::Literal(signed)) => {
                if signed == 0 {
                    return Err(AlgebraError::ZeroSurfaceId);
                }
                let sense = if signed < 0 {
                    Sense::Negative
                } else {
                    Sense::Positive
                };
                Ok(Rule::clause(signed.abs(), sense))
            }
            Some(Token::CellRef(id)) => Ok(Rule::CellRef(id)),
            Some(Token::Hash) => {
                // The lexer only emits a bare Hash before '('.
                match self.advance() {
                    Some(Token::LParen) => {
                        let inner = self.expression()?;
                        self.expect_rparen()?;
                        Ok(Rule::complement(inner))
                    }
                    _ => Err(AlgebraError::BareComplement),
                }
            }
            Some(Token::LParen) => {
                let inner = self.expression()?;
                self.expect_rparen()?;
                Ok(inner)
            }
            Some(Token::Colon) => Err(AlgebraError::MisplacedOperator),
            Some(Token::RParen) => Err(AlgebraError::Unbalanced),
            None => {
                if self.tokens.is_empty() {
                    Err(AlgebraError::Empty)
                } else {
                    Err(AlgebraError::UnexpectedEnd)
                }
            }
        }
    }

    fn expect_rparen(&mut self) -> Result<(), AlgebraError> {
        match self.advance() {
            Some(Token::RParen) => Ok(()),
            _ => Err(AlgebraError::Unbalanced),
        }
    }
}
