use color_print::cformat;
use mips_ast::{Entry, Program};

/// Coloured listing of every segment with addresses and labels.
pub fn cformat_program(program: &Program) -> String {
    let labels = program.labels_by_address();
    let mut lines = Vec::new();
    for (name, segment) in &program.segments {
        lines.push(format!(
            "{}+------[{}]{}",
            "-".repeat(7),
            name,
            "-".repeat(40usize.saturating_sub(name.len()))
        ));
        // One past the end shows trailing labels
        for address in 0..=segment.len() {
            for label in labels.get(&(name.as_str(), address)).into_iter().flatten() {
                lines.push(cformat!("{:7}| <g>{}:</>", "", label));
            }
            if let Some(entry) = segment.get(address) {
                lines.push(format!("[{:04}] |   {}", address, cformat_entry(entry)));
            }
        }
    }
    lines.join("\n")
}

fn cformat_entry(entry: &Entry) -> String {
    match entry {
        Entry::Instruction(inst) => {
            let operands = inst
                .operands()
                .iter()
                .map(|op| op.to_string())
                .collect::<Vec<_>>()
                .join(", ");
            cformat!("<red>{:<8}</><blue>{}</>", inst.opcode, operands)
        }
        Entry::Data(data) => {
            let values = data
                .value
                .values()
                .iter()
                .map(|v| v.to_string())
                .collect::<Vec<_>>()
                .join(", ");
            cformat!("<c>{:<8}</><y>{}</>", data.mode.to_string(), values)
        }
    }
}
