use mips_ast::{NumberKind, NumberValue};
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub pos: Pos,
}

impl Token {
    pub fn new(kind: TokenKind, pos: Pos) -> Self {
        Token { kind, pos }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    // Single character tokens
    Colon,   // ':'
    Comma,   // ','
    Plus,    // '+'
    Minus,   // '-'
    Star,    // '*'
    Slash,   // '/'
    Percent, // '%'
    LParen,  // '('
    RParen,  // ')'

    // Words
    Ident(String),     // main, li, add.s
    Register(String),  // $t0, $8
    Directive(String), // .text, .word

    // Literals
    Number(NumberKind, NumberValue),
    Text(String),

    // End of a source line
    Newline,
}

/// 1-based source position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Pos {
    pub line: usize,
    pub column: usize,
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Colon => write!(f, "`:`"),
            TokenKind::Comma => write!(f, "`,`"),
            TokenKind::Plus => write!(f, "`+`"),
            TokenKind::Minus => write!(f, "`-`"),
            TokenKind::Star => write!(f, "`*`"),
            TokenKind::Slash => write!(f, "`/`"),
            TokenKind::Percent => write!(f, "`%`"),
            TokenKind::LParen => write!(f, "`(`"),
            TokenKind::RParen => write!(f, "`)`"),
            TokenKind::Ident(s) => write!(f, "identifier `{}`", s),
            TokenKind::Register(s) => write!(f, "register `{}`", s),
            TokenKind::Directive(s) => write!(f, "directive `{}`", s),
            TokenKind::Number(_, v) => write!(f, "number `{}`", v),
            TokenKind::Text(s) => write!(f, "string {:?}", s),
            TokenKind::Newline => write!(f, "end of line"),
        }
    }
}
