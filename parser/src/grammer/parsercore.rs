use super::token::{Pos, Token};
use crate::error::ParseError;
use std::iter::Peekable;

/// Deepest parenthesis nesting accepted in one expression.
pub const MAX_DEPTH: usize = 256;

pub struct Parser<I: Iterator<Item = Token>> {
    tokens: Peekable<I>,
    last: Pos,
    depth: usize,
}

impl<I: Iterator<Item = Token>> Parser<I> {
    pub fn new(tokens: I) -> Self {
        Parser {
            tokens: tokens.peekable(),
            last: Pos::default(),
            depth: 0,
        }
    }
}

impl<I: Iterator<Item = Token>> Parser<I> {
    /// Peek : Watch next token without consuming it
    pub fn peek(&mut self) -> Option<&Token> {
        self.tokens.peek()
    }

    /// Next : Consume next token and return it
    pub fn next(&mut self) -> Option<Token> {
        let token = self.tokens.next();
        if let Some(token) = &token {
            self.last = token.pos;
        }
        token
    }

    /// Peek and check next token is match with condition
    pub fn check_if<F: Fn(&Token) -> bool>(&mut self, cond: F) -> bool {
        match self.tokens.peek() {
            Some(token) => cond(token),
            None => false,
        }
    }

    /// Consume if next token is match with condition
    pub fn consume_if<F: Fn(&Token) -> bool>(&mut self, cond: F) -> Option<Token> {
        if self.check_if(cond) {
            self.next()
        } else {
            None
        }
    }

    /// Next token must be match with condition
    pub fn expect_tobe<F: Fn(&Token) -> bool>(
        &mut self,
        cond: F,
        expected: &str,
    ) -> Result<Token, ParseError> {
        match self.consume_if(cond) {
            Some(token) => Ok(token),
            None => Err(self.unexpected(expected)),
        }
    }

    /// Open a nested group at the next token, failing past `MAX_DEPTH`
    pub fn enter(&mut self) -> Result<(), ParseError> {
        if self.depth >= MAX_DEPTH {
            return Err(self.unexpected("shallower expression"));
        }
        self.depth += 1;
        Ok(())
    }

    /// Close the group opened by `enter`
    pub fn leave(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    /// Error describing the next token (or the end of input) against `expected`
    pub fn unexpected(&mut self, expected: &str) -> ParseError {
        let last = self.last;
        match self.peek() {
            Some(token) => ParseError::UnexpectedToken {
                expected: expected.to_string(),
                found: token.kind.clone(),
                pos: token.pos,
            },
            None => ParseError::UnexpectedEOF {
                expected: expected.to_string(),
                pos: last,
            },
        }
    }
}

#[macro_export]
macro_rules! check {
    ($parser:expr, $kind:pat) => {
        $parser.check_if(|token| matches!(&token.kind, $kind))
    };
}

#[macro_export]
macro_rules! expect {
    ($parser:expr, $kind:pat, $expected:expr) => {
        $parser.expect_tobe(|token| matches!(&token.kind, $kind), $expected)
    };
}

#[macro_export]
macro_rules! optional {
    ($parser:expr, $kind:pat) => {
        $parser.consume_if(|token| matches!(&token.kind, $kind))
    };
}

/// element { delimiter element }
#[macro_export]
macro_rules! repeat {
    ($parser:expr, $elem:expr, $delimiter:pat) => {{
        let mut items = vec![$elem?];
        while $crate::optional!($parser, $delimiter).is_some() {
            items.push($elem?);
        }
        items
    }};
}
