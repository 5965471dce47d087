pub mod display;
pub mod entry;
pub mod operand;
pub mod program;

pub use entry::{Arity, Data, DataMode, DataValue, Entry, Instruction};
pub use operand::{BinaryOp, NumberKind, NumberValue, Operand, RegisterKind};
pub use program::{Directive, Label, Program, Segment, DATA, TEXT};
