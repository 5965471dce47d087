use crate::entry::{Data, Entry, Instruction};
use crate::operand::{NumberKind, NumberValue, Operand};
use std::fmt;

// Renders nodes back as assembly source.

impl fmt::Display for NumberValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NumberValue::Int(v) => write!(f, "{}", v),
            // Debug keeps the fraction: 80.0 instead of 80
            NumberValue::Float(v) => write!(f, "{:?}", v),
        }
    }
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operand::Register { value, .. } => write!(f, "{}", value),
            Operand::Number {
                kind: NumberKind::Hex,
                value: NumberValue::Int(v),
            } => {
                if *v < 0 {
                    write!(f, "-0x{:X}", v.unsigned_abs())
                } else {
                    write!(f, "0x{:X}", v)
                }
            }
            Operand::Number { value, .. } => write!(f, "{}", value),
            Operand::Identifier { value } => write!(f, "{}", value),
            Operand::String { value } => write!(f, "\"{}\"", escape(value)),
            Operand::Binary {
                operator,
                left,
                right,
            } => {
                let wrap = |child: &Operand, strict: bool| match child {
                    Operand::Binary { operator: inner, .. } => {
                        inner.precedence() < operator.precedence()
                            || (strict && inner.precedence() == operator.precedence())
                    }
                    _ => false,
                };
                if wrap(left, false) {
                    write!(f, "({})", left)?;
                } else {
                    write!(f, "{}", left)?;
                }
                write!(f, " {} ", operator)?;
                if wrap(right, true) {
                    write!(f, "({})", right)
                } else {
                    write!(f, "{}", right)
                }
            }
            Operand::Indexed { offset, base } => match offset {
                Some(offset) => write!(f, "{}({})", offset, base),
                None => write!(f, "({})", base),
            },
        }
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.opcode)?;
        write_list(f, self.operands())
    }
}

impl fmt::Display for Data {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.mode)?;
        write_list(f, self.value.values())
    }
}

impl fmt::Display for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Entry::Instruction(inst) => fmt::Display::fmt(inst, f),
            Entry::Data(data) => fmt::Display::fmt(data, f),
        }
    }
}

fn write_list(f: &mut fmt::Formatter<'_>, items: &[Operand]) -> fmt::Result {
    for (idx, item) in items.iter().enumerate() {
        let sep = if idx == 0 { " " } else { ", " };
        write!(f, "{}{}", sep, item)?;
    }
    Ok(())
}

fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            '\0' => out.push_str("\\0"),
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            ch => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use crate::entry::{Data, DataMode, DataValue, Instruction};
    use crate::operand::{BinaryOp, Operand};

    #[test]
    fn test_instruction() {
        let inst = Instruction::new("li", vec![Operand::register("$v0"), Operand::int(4)]);
        assert_eq!(inst.to_string(), "li $v0, 4");
        assert_eq!(Instruction::new("syscall", vec![]).to_string(), "syscall");
    }

    #[test]
    fn test_indexed() {
        let inst = Instruction::new(
            "lw",
            vec![
                Operand::register("$t0"),
                Operand::indexed(Some(Operand::int(-4)), Operand::register("$sp")),
            ],
        );
        assert_eq!(inst.to_string(), "lw $t0, -4($sp)");
    }

    #[test]
    fn test_data() {
        let data = Data {
            mode: DataMode::Byte,
            value: DataValue::List(vec![Operand::int(4), Operand::int(5), Operand::hex(255)]),
        };
        assert_eq!(data.to_string(), ".byte 4, 5, 0xFF");

        let data = Data {
            mode: DataMode::Asciiz,
            value: DataValue::Scalar(Operand::string("hi\n")),
        };
        assert_eq!(data.to_string(), ".asciiz \"hi\\n\"");
    }

    #[test]
    fn test_binary_parens() {
        let sum = Operand::binary(BinaryOp::Add, Operand::int(1), Operand::int(2));
        let expr = Operand::binary(BinaryOp::Mul, sum.clone(), Operand::int(3));
        assert_eq!(expr.to_string(), "(1 + 2) * 3");

        let expr = Operand::binary(BinaryOp::Sub, Operand::int(10), sum);
        assert_eq!(expr.to_string(), "10 - (1 + 2)");

        let expr = Operand::binary(BinaryOp::Mul, Operand::int(40), Operand::int(2));
        assert_eq!(expr.to_string(), "40 * 2");
    }

    #[test]
    fn test_float() {
        assert_eq!(Operand::float(80.0).to_string(), "80.0");
        assert_eq!(Operand::float(230.5).to_string(), "230.5");
    }
}
