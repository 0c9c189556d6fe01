//! Typst source for an [`IntakeDocument`]
//!
//! Every piece of record text is emitted as a Typst string literal, never as
//! raw markup, so characters like `#`, `*` or `$` in a patient's input print
//! as themselves.

use std::fmt::Write;

use super::model::{Block, Cell, IntakeDocument, TableRow};

/// Embedded family that is always present
pub const FALLBACK_FAMILY: &str = "Libertinus Serif";

const PREAMBLE: &str = r#"#set page(paper: "a4", margin: (top: 40pt, bottom: 40pt, left: 50pt, right: 50pt))
#set par(leading: 0.8em)
"#;

/// Render the document as Typst source.
///
/// `families` is the font priority list; every entry must be known to the
/// font book or the compiler warns about it.
pub fn to_markup(doc: &IntakeDocument, families: &[String]) -> String {
    let mut out = String::from(PREAMBLE);

    let list = families
        .iter()
        .map(|f| quote(f))
        .chain(std::iter::once(quote(FALLBACK_FAMILY)))
        .collect::<Vec<_>>()
        .join(", ");
    // Trailing comma keeps a single entry an array
    let _ = writeln!(out, "#set text(font: ({list},), size: 11pt, lang: \"zh\", region: \"tw\")");
    out.push('\n');

    for block in &doc.blocks {
        write_block(&mut out, block);
        out.push_str("\n\n");
    }

    out
}

fn write_block(out: &mut String, block: &Block) {
    match block {
        Block::Title(text) => {
            let _ = write!(
                out,
                "#align(center, text(size: 18pt, weight: \"bold\", {}))",
                quote(text)
            );
        }
        Block::Rule => out.push_str("#line(length: 100%, stroke: 0.5pt)"),
        Block::Heading(text) => {
            let _ = write!(
                out,
                "#v(4pt)\n#text(size: 13pt, weight: \"bold\", {})",
                quote(text)
            );
        }
        Block::FieldTable(rows) => write_table(out, rows),
        Block::Field(cell) => {
            let _ = write!(out, "#{}", quote(&format!("{}：{}", cell.label, cell.value)));
        }
        Block::Line(text) => {
            let _ = write!(out, "#{}", quote(text));
        }
        Block::Image {
            path,
            width_pt,
            height_pt,
        } => {
            let _ = write!(
                out,
                "#image({}, width: {width_pt}pt, height: {height_pt}pt, fit: \"stretch\")",
                quote(path)
            );
        }
        Block::Spacer => out.push_str("#v(12pt)"),
    }
}

fn write_table(out: &mut String, rows: &[TableRow]) {
    out.push_str("#table(\n");
    out.push_str("  columns: (auto, 1fr, auto, 1fr),\n");
    out.push_str("  inset: 6pt,\n");
    out.push_str("  stroke: 0.5pt,\n");
    out.push_str("  fill: (x, _) => if calc.even(x) { luma(240) },\n");

    for row in rows {
        match row {
            TableRow::Pair(left, right) => {
                let _ = writeln!(out, "  {}, {},", cell(left), cell(right));
            }
            TableRow::Wide(wide) => {
                let _ = writeln!(
                    out,
                    "  {}, table.cell(colspan: 3, {}),",
                    quote(wide.label),
                    quote(&wide.value)
                );
            }
        }
    }

    out.push(')');
}

fn cell(cell: &Cell) -> String {
    format!("{}, {}", quote(cell.label), quote(&cell.value))
}

/// A Typst string literal holding `text`
pub fn quote(text: &str) -> String {
    let mut quoted = String::with_capacity(text.len() + 2);
    quoted.push('"');
    for c in text.chars() {
        match c {
            '\\' => quoted.push_str("\\\\"),
            '"' => quoted.push_str("\\\""),
            '\n' => quoted.push_str("\\n"),
            '\r' => quoted.push_str("\\r"),
            '\t' => quoted.push_str("\\t"),
            c if c.is_control() => {
                let _ = write!(quoted, "\\u{{{:x}}}", c as u32);
            }
            c => quoted.push(c),
        }
    }
    quoted.push('"');
    quoted
}
