use indexmap::IndexMap;
use mips_ast::{Directive, Entry, Label, Program, Segment};

/// Collects segments, labels and segment switches into a `Program`.
#[derive(Debug, Default)]
pub struct ProgramBuilder {
    segments: IndexMap<String, Segment>,
    labels: IndexMap<String, Label>,
    directives: Vec<Directive>,
}

impl ProgramBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Segment by name, created empty on first use.
    pub fn segment(&mut self, name: &str) -> &mut Segment {
        self.segments.entry(name.to_string()).or_default()
    }

    /// Length of a segment, zero when it does not exist yet.
    pub fn len(&self, name: &str) -> usize {
        self.segments.get(name).map_or(0, |s| s.instructions.len())
    }

    /// Append an entry and return its address.
    pub fn push(&mut self, segment: &str, entry: Entry) -> usize {
        let segment = self.segment(segment);
        segment.instructions.push(entry);
        segment.instructions.len() - 1
    }

    pub fn bind(&mut self, name: String, segment: &str, address: usize) -> Option<Label> {
        let label = Label {
            address,
            segment: segment.to_string(),
        };
        self.labels.insert(name, label)
    }

    pub fn directive(&mut self, directive: Directive) {
        self.directives.push(directive);
    }

    pub fn build(self) -> Program {
        Program {
            segments: self.segments,
            labels: self.labels,
            directives: self.directives,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mips_ast::{Instruction, DATA, TEXT};

    #[test]
    fn test_segments_keep_first_seen_order() {
        let mut builder = ProgramBuilder::new();
        builder.segment(DATA);
        builder.segment(TEXT);
        builder.segment(DATA);
        let program = builder.build();
        assert_eq!(program.segments.keys().collect::<Vec<_>>(), vec![DATA, TEXT]);
    }

    #[test]
    fn test_push_returns_address() {
        let mut builder = ProgramBuilder::new();
        let nop = Entry::Instruction(Instruction::new("nop", vec![]));
        assert_eq!(builder.len(TEXT), 0);
        assert_eq!(builder.push(TEXT, nop.clone()), 0);
        assert_eq!(builder.push(TEXT, nop), 1);
        assert_eq!(builder.len(TEXT), 2);
    }

    #[test]
    fn test_build_keeps_everything() {
        let mut builder = ProgramBuilder::new();
        builder.directive(Directive::segment(TEXT));
        builder.segment(TEXT);
        assert!(builder.bind("main".to_string(), TEXT, 0).is_none());
        let program = builder.build();
        assert_eq!(program.directives, vec![Directive::segment(TEXT)]);
        assert_eq!(program.labels["main"].address, 0);
        assert!(program.segments[TEXT].is_empty());
    }
}
