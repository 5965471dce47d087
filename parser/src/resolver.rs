use crate::builder::ProgramBuilder;
use crate::error::DuplicateLabelError;
use crate::grammer::stmt::Stmt;
use crate::grammer::token::Pos;
use log::trace;
use mips_ast::{Directive, Entry, Program, TEXT};
use std::collections::HashMap;

/// Walks statements in order, appending entries to the current segment
/// and binding labels to the segment length at their declaration.
pub struct Resolver {
    builder: ProgramBuilder,
    current: String,
    // Declared since the last flush, all share one address
    pending: Vec<String>,
    declared: HashMap<String, Pos>,
}

impl Resolver {
    pub fn new() -> Self {
        Resolver {
            builder: ProgramBuilder::new(),
            current: TEXT.to_string(),
            pending: Vec::new(),
            declared: HashMap::new(),
        }
    }

    pub fn step(&mut self, stmt: Stmt) -> Result<(), DuplicateLabelError> {
        match stmt {
            Stmt::Segment(name) => {
                self.flush();
                trace!("switch to segment {}", name);
                self.builder.segment(&name);
                self.builder.directive(Directive::segment(&name));
                self.current = name;
            }
            Stmt::Label(name, pos) => {
                if let Some(first) = self.declared.get(&name) {
                    return Err(DuplicateLabelError {
                        name,
                        pos,
                        first: *first,
                    });
                }
                self.declared.insert(name.clone(), pos);
                self.pending.push(name);
            }
            Stmt::Instruction(inst) => self.append(Entry::Instruction(inst)),
            Stmt::Data(data) => self.append(Entry::Data(data)),
        }
        Ok(())
    }

    pub fn finish(mut self) -> Program {
        self.flush();
        self.builder.build()
    }

    fn append(&mut self, entry: Entry) {
        self.flush();
        let address = self.builder.push(&self.current, entry);
        trace!("{}[{}] appended", self.current, address);
    }

    /// Nothing was appended since the pending labels were declared, so the
    /// current length is the length they saw.
    fn flush(&mut self) {
        if self.pending.is_empty() {
            return;
        }
        // Owning segment must exist even when nothing follows
        self.builder.segment(&self.current);
        let address = self.builder.len(&self.current);
        for name in self.pending.drain(..) {
            trace!("label {} = {}[{}]", name, self.current, address);
            self.builder.bind(name, &self.current, address);
        }
    }
}

impl Default for Resolver {
    fn default() -> Self {
        Self::new()
    }
}

pub fn resolve(stmts: Vec<Stmt>) -> Result<Program, DuplicateLabelError> {
    let mut resolver = Resolver::new();
    for stmt in stmts {
        resolver.step(stmt)?;
    }
    Ok(resolver.finish())
}
