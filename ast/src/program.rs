use crate::entry::Entry;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub const TEXT: &str = ".text";
pub const DATA: &str = ".data";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename = "Program")]
pub struct Program {
    pub segments: IndexMap<String, Segment>,
    pub labels: IndexMap<String, Label>,
    pub directives: Vec<Directive>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    /// The index of an entry is its address.
    pub instructions: Vec<Entry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Label {
    /// May equal the segment length for a label with nothing after it.
    pub address: usize,
    /// Owning segment. Kept out of the JSON form, so it is empty after
    /// `Program::from_json`.
    #[serde(skip_serializing, default)]
    pub segment: String,
}

/// Segment switch record, one per `.text` / `.data` in the source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Directive {
    Segment { value: String },
}

impl Program {
    pub fn segment(&self, name: &str) -> Option<&Segment> {
        self.segments.get(name)
    }

    pub fn label(&self, name: &str) -> Option<&Label> {
        self.labels.get(name)
    }

    /// Entry a label points at, `None` for a label past the last entry.
    pub fn label_entry(&self, name: &str) -> Option<&Entry> {
        let label = self.labels.get(name)?;
        self.segments
            .get(&label.segment)?
            .instructions
            .get(label.address)
    }

    /// Label names grouped by `(segment, address)`, each group in declaration order.
    pub fn labels_by_address(&self) -> HashMap<(&str, usize), Vec<&str>> {
        let mut index: HashMap<(&str, usize), Vec<&str>> = HashMap::new();
        for (name, label) in &self.labels {
            index
                .entry((label.segment.as_str(), label.address))
                .or_default()
                .push(name.as_str());
        }
        index
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

impl Segment {
    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    pub fn get(&self, address: usize) -> Option<&Entry> {
        self.instructions.get(address)
    }
}

impl Directive {
    pub fn segment(name: &str) -> Self {
        Directive::Segment {
            value: name.to_string(),
        }
    }
}
