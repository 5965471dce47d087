use crate::operand::Operand;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// One addressable element of a segment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Entry {
    Instruction(Instruction),
    Data(Data),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Instruction {
    pub opcode: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operands: Option<Vec<Operand>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Data {
    pub mode: DataMode,
    pub value: DataValue,
}

/// Data directives. Segment switches (`.text`, `.data`) are not data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumString, Display)]
pub enum DataMode {
    #[serde(rename = ".word")]
    #[strum(serialize = ".word")]
    Word,
    #[serde(rename = ".half")]
    #[strum(serialize = ".half")]
    Half,
    #[serde(rename = ".byte")]
    #[strum(serialize = ".byte")]
    Byte,
    #[serde(rename = ".float")]
    #[strum(serialize = ".float")]
    Float,
    #[serde(rename = ".double")]
    #[strum(serialize = ".double")]
    Double,
    #[serde(rename = ".ascii")]
    #[strum(serialize = ".ascii")]
    Ascii,
    #[serde(rename = ".asciiz")]
    #[strum(serialize = ".asciiz")]
    Asciiz,
    #[serde(rename = ".space")]
    #[strum(serialize = ".space")]
    Space,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    /// Exactly one string literal
    Text,
    /// Exactly one expression
    Single,
    /// One or more comma-separated expressions
    List,
}

impl DataMode {
    pub fn arity(&self) -> Arity {
        match self {
            DataMode::Ascii | DataMode::Asciiz => Arity::Text,
            DataMode::Space => Arity::Single,
            DataMode::Word | DataMode::Half | DataMode::Byte | DataMode::Float | DataMode::Double => {
                Arity::List
            }
        }
    }
}

/// A single value stays scalar, `.byte 4, 5, 7` becomes a list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DataValue {
    List(Vec<Operand>),
    Scalar(Operand),
}

impl DataValue {
    pub fn from_values(mut values: Vec<Operand>) -> Option<DataValue> {
        match values.len() {
            0 => None,
            1 => values.pop().map(DataValue::Scalar),
            _ => Some(DataValue::List(values)),
        }
    }

    pub fn values(&self) -> &[Operand] {
        match self {
            DataValue::List(values) => values,
            DataValue::Scalar(value) => std::slice::from_ref(value),
        }
    }
}

impl Instruction {
    pub fn new(opcode: &str, operands: Vec<Operand>) -> Self {
        Instruction {
            opcode: opcode.to_string(),
            operands: if operands.is_empty() {
                None
            } else {
                Some(operands)
            },
        }
    }

    pub fn operands(&self) -> &[Operand] {
        self.operands.as_deref().unwrap_or(&[])
    }
}

impl Entry {
    pub fn as_instruction(&self) -> Option<&Instruction> {
        match self {
            Entry::Instruction(inst) => Some(inst),
            Entry::Data(_) => None,
        }
    }

    pub fn as_data(&self) -> Option<&Data> {
        match self {
            Entry::Data(data) => Some(data),
            Entry::Instruction(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_instruction_without_operands() {
        let entry = Entry::Instruction(Instruction::new("syscall", vec![]));
        assert_eq!(
            serde_json::to_value(&entry).unwrap(),
            json!({ "type": "Instruction", "opcode": "syscall" })
        );
    }

    #[test]
    fn test_data_scalar_and_list() {
        let scalar = DataValue::from_values(vec![Operand::int(27)]).unwrap();
        assert!(matches!(scalar, DataValue::Scalar(_)));

        let list = DataValue::from_values(vec![Operand::int(4), Operand::int(5)]).unwrap();
        assert_eq!(list.values().len(), 2);

        assert!(DataValue::from_values(vec![]).is_none());
    }

    #[test]
    fn test_data_json() {
        let entry = Entry::Data(Data {
            mode: DataMode::Asciiz,
            value: DataValue::Scalar(Operand::string("Value")),
        });
        let value = serde_json::to_value(&entry).unwrap();
        assert_eq!(
            value,
            json!({
                "type": "Data",
                "mode": ".asciiz",
                "value": { "type": "String", "value": "Value" }
            })
        );
        let back: Entry = serde_json::from_value(value).unwrap();
        assert_eq!(back, entry);
    }

    #[test]
    fn test_mode_arity() {
        assert_eq!(".space".parse::<DataMode>().unwrap().arity(), Arity::Single);
        assert_eq!(DataMode::Ascii.arity(), Arity::Text);
        assert_eq!(DataMode::Byte.arity(), Arity::List);
        assert!(".text".parse::<DataMode>().is_err());
    }
}
