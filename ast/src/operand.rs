use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Argument of an instruction or value of a data directive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Operand {
    Register {
        value: String,
        kind: RegisterKind,
    },
    Number {
        kind: NumberKind,
        value: NumberValue,
    },
    Identifier {
        value: String,
    },
    String {
        value: String,
    },
    Binary {
        operator: BinaryOp,
        left: Box<Operand>,
        right: Box<Operand>,
    },
    /// `offset(base)`, e.g. `4($sp)` or `($sp)`
    Indexed {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        offset: Option<Box<Operand>>,
        base: Box<Operand>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumString, Display)]
pub enum RegisterKind {
    Name,   // $t0
    Number, // $8
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumString, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum NumberKind {
    Decimal, // 42, 230.5
    Hex,     // 0x15
}

/// Literal value as written, never folded.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NumberValue {
    Int(i64),
    Float(f64),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumString, Display)]
pub enum BinaryOp {
    #[serde(rename = "+")]
    #[strum(serialize = "+")]
    Add,
    #[serde(rename = "-")]
    #[strum(serialize = "-")]
    Sub,
    #[serde(rename = "*")]
    #[strum(serialize = "*")]
    Mul,
    #[serde(rename = "/")]
    #[strum(serialize = "/")]
    Div,
    #[serde(rename = "%")]
    #[strum(serialize = "%")]
    Mod,
}

impl BinaryOp {
    /// Binding strength, higher binds tighter.
    pub fn precedence(&self) -> u8 {
        match self {
            BinaryOp::Add | BinaryOp::Sub => 1,
            BinaryOp::Mul | BinaryOp::Div | BinaryOp::Mod => 2,
        }
    }
}

impl NumberValue {
    pub fn negate(self) -> Self {
        match self {
            NumberValue::Int(v) => NumberValue::Int(-v),
            NumberValue::Float(v) => NumberValue::Float(-v),
        }
    }
}

impl Operand {
    /// `$t0` is a named register, `$8` a numbered one.
    pub fn register(name: &str) -> Operand {
        let digits = name.trim_start_matches('$');
        let kind = if !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit()) {
            RegisterKind::Number
        } else {
            RegisterKind::Name
        };
        Operand::Register {
            value: name.to_string(),
            kind,
        }
    }

    pub fn int(value: i64) -> Operand {
        Operand::Number {
            kind: NumberKind::Decimal,
            value: NumberValue::Int(value),
        }
    }

    pub fn hex(value: i64) -> Operand {
        Operand::Number {
            kind: NumberKind::Hex,
            value: NumberValue::Int(value),
        }
    }

    pub fn float(value: f64) -> Operand {
        Operand::Number {
            kind: NumberKind::Decimal,
            value: NumberValue::Float(value),
        }
    }

    pub fn ident(name: &str) -> Operand {
        Operand::Identifier {
            value: name.to_string(),
        }
    }

    pub fn string(text: &str) -> Operand {
        Operand::String {
            value: text.to_string(),
        }
    }

    pub fn binary(operator: BinaryOp, left: Operand, right: Operand) -> Operand {
        Operand::Binary {
            operator,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn indexed(offset: Option<Operand>, base: Operand) -> Operand {
        Operand::Indexed {
            offset: offset.map(Box::new),
            base: Box::new(base),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_register_kind() {
        assert!(matches!(
            Operand::register("$v0"),
            Operand::Register { kind: RegisterKind::Name, .. }
        ));
        assert!(matches!(
            Operand::register("$31"),
            Operand::Register { kind: RegisterKind::Number, .. }
        ));
    }

    #[test]
    fn test_number_json() {
        let num = serde_json::to_value(Operand::int(4)).unwrap();
        assert_eq!(num, json!({ "type": "Number", "kind": "decimal", "value": 4 }));

        let num = serde_json::to_value(Operand::hex(0x15)).unwrap();
        assert_eq!(num, json!({ "type": "Number", "kind": "hex", "value": 21 }));

        let num = serde_json::to_value(Operand::float(230.5)).unwrap();
        assert_eq!(num, json!({ "type": "Number", "kind": "decimal", "value": 230.5 }));
    }

    #[test]
    fn test_binary_json() {
        let expr = Operand::binary(BinaryOp::Mul, Operand::int(40), Operand::int(2));
        assert_eq!(
            serde_json::to_value(&expr).unwrap(),
            json!({
                "type": "Binary",
                "operator": "*",
                "left": { "type": "Number", "kind": "decimal", "value": 40 },
                "right": { "type": "Number", "kind": "decimal", "value": 2 }
            })
        );
    }

    #[test]
    fn test_indexed_without_offset() {
        let op = Operand::indexed(None, Operand::register("$sp"));
        assert_eq!(
            serde_json::to_value(&op).unwrap(),
            json!({
                "type": "Indexed",
                "base": { "type": "Register", "value": "$sp", "kind": "Name" }
            })
        );
    }

    #[test]
    fn test_operator_from_str() {
        assert_eq!("*".parse::<BinaryOp>().unwrap(), BinaryOp::Mul);
        assert_eq!(BinaryOp::Sub.to_string(), "-");
        assert!(BinaryOp::Mul.precedence() > BinaryOp::Add.precedence());
    }

    #[test]
    fn test_negate() {
        assert_eq!(NumberValue::Int(4).negate(), NumberValue::Int(-4));
        assert_eq!(NumberValue::Float(0.5).negate(), NumberValue::Float(-0.5));
    }
}
