use super::token::Pos;
use mips_ast::{Data, Instruction};

/// One parsed statement, in source order.
#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    Segment(String),          // ".text" | ".data"
    Label(String, Pos),       // ident ":"
    Instruction(Instruction), // ident [ operand { "," operand } ]
    Data(Data),               // data-mode values
}
