pub mod lexer;
pub mod parser;
pub mod parsercore;
pub mod stmt;
pub mod token;
