use crate::grammer::token::{Pos, TokenKind};
use color_print::cformat;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
#[error("{kind}")]
pub struct LexError {
    pub kind: LexErrorKind,
    pub pos: Pos,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum LexErrorKind {
    #[error("Malformed number literal: `{0}`")]
    MalformedNumber(String),

    #[error("Unterminated string literal")]
    UnterminatedString,

    #[error("Invalid escape sequence: `\\{0}`")]
    InvalidEscape(char),

    #[error("Register name required after `$`")]
    EmptyRegister,

    #[error("Directive name required after `.`")]
    EmptyDirective,

    #[error("Unexpected character: `{0}`")]
    UnexpectedChar(char),
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    #[error("Expected {expected}, found {found}")]
    UnexpectedToken {
        expected: String,
        found: TokenKind,
        pos: Pos,
    },

    #[error("Expected {expected}, found end of input")]
    UnexpectedEOF { expected: String, pos: Pos },

    #[error("Unknown directive: `{name}`")]
    UnknownDirective { name: String, pos: Pos },
}

#[derive(Debug, Clone, PartialEq, Error)]
#[error("Re-defined label: `{name}` (first defined at {first})")]
pub struct DuplicateLabelError {
    pub name: String,
    pub pos: Pos,
    pub first: Pos,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    #[error("{}: {0}", .0.pos)]
    Lex(#[from] LexError),

    #[error("{}: {0}", .0.pos())]
    Parse(#[from] ParseError),

    #[error("{}: {0}", .0.pos)]
    DuplicateLabel(#[from] DuplicateLabelError),
}

impl ParseError {
    pub fn pos(&self) -> Pos {
        match self {
            ParseError::UnexpectedToken { pos, .. }
            | ParseError::UnexpectedEOF { pos, .. }
            | ParseError::UnknownDirective { pos, .. } => *pos,
        }
    }
}

impl Error {
    pub fn pos(&self) -> Pos {
        match self {
            Error::Lex(e) => e.pos,
            Error::Parse(e) => e.pos(),
            Error::DuplicateLabel(e) => e.pos,
        }
    }

    /// Diagnostic with the offending source line and a caret under the column.
    pub fn diag(&self, source: &str) -> String {
        let pos = self.pos();
        let message = match self {
            Error::Lex(e) => e.to_string(),
            Error::Parse(e) => e.to_string(),
            Error::DuplicateLabel(e) => e.to_string(),
        };
        let line_content = source
            .lines()
            .nth(pos.line.saturating_sub(1))
            .unwrap_or("");
        let caret = " ".repeat(pos.column.saturating_sub(1));

        let mut out = Vec::new();
        out.push(cformat!("<red,bold>error</>: {}", message));
        out.push(cformat!("     <blue>--></> <underline>{}</>", pos));
        out.push(cformat!("      <blue>|</>"));
        out.push(cformat!(" <blue>{:>4} |</> {}", pos.line, line_content));
        out.push(cformat!("      <blue>|</> {}<red,bold>^</>", caret));
        out.join("\n")
    }

    pub fn print_diag(&self, source: &str) {
        eprintln!("{}", self.diag(source));
    }
}
