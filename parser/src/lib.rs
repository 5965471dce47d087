pub mod builder;
pub mod dump;
pub mod error;
pub mod grammer;
pub mod resolver;

pub use builder::ProgramBuilder;
pub use error::{DuplicateLabelError, Error, LexError, LexErrorKind, ParseError};
pub use grammer::lexer::Lexer;
pub use grammer::parsercore::Parser;
pub use grammer::stmt::Stmt;
pub use grammer::token::{Pos, Token, TokenKind};
pub use resolver::Resolver;

use log::debug;
use mips_ast::Program;

/// Parse MIPS assembly source into a `Program`.
///
/// All or nothing: the first lexical, syntactic or duplicate-label error
/// aborts the parse and no partial tree is returned.
pub fn parse(source: &str) -> Result<Program, Error> {
    let tokens = Lexer::new(source).parse()?;
    debug!("lexed {} tokens", tokens.len());

    let stmts = Parser::new(tokens.into_iter()).parse()?;
    debug!("parsed {} statements", stmts.len());

    let program = resolver::resolve(stmts)?;
    debug!(
        "resolved {} segments, {} labels",
        program.segments.len(),
        program.labels.len()
    );
    Ok(program)
}
