//! Block model of an intake document
//!
//! The builder produces this, the markup writer consumes it, and tests read
//! it back as plain text without going through the compiler.

/// One label/value pair in the basic-info table
#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    pub label: &'static str,
    pub value: String,
}

impl Cell {
    pub fn new(label: &'static str, value: impl Into<String>) -> Self {
        Self {
            label,
            value: value.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum TableRow {
    /// Two pairs side by side
    Pair(Cell, Cell),
    /// One pair whose value spans the remaining columns
    Wide(Cell),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    Title(String),
    Rule,
    Heading(String),
    FieldTable(Vec<TableRow>),
    Field(Cell),
    Line(String),
    Image {
        /// Virtual path of an entry in [`IntakeDocument::assets`]
        path: String,
        width_pt: f64,
        height_pt: f64,
    },
    Spacer,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct IntakeDocument {
    pub blocks: Vec<Block>,
    /// Binary files the blocks reference, keyed by virtual path
    pub assets: Vec<(String, Vec<u8>)>,
}

impl IntakeDocument {
    pub fn push(&mut self, block: Block) {
        self.blocks.push(block);
    }

    pub fn attach(&mut self, path: impl Into<String>, bytes: Vec<u8>) {
        self.assets.push((path.into(), bytes));
    }

    /// Printed text, one entry per visual line. Images and rules are left out.
    pub fn plain_text(&self) -> Vec<String> {
        let mut lines = Vec::new();
        for block in &self.blocks {
            match block {
                Block::Title(text) | Block::Heading(text) | Block::Line(text) => {
                    lines.push(text.clone())
                }
                Block::Field(cell) => lines.push(super::lexicon::field(cell.label, &cell.value)),
                Block::FieldTable(rows) => {
                    for row in rows {
                        match row {
                            TableRow::Pair(left, right) => {
                                lines.push(super::lexicon::field(left.label, &left.value));
                                lines.push(super::lexicon::field(right.label, &right.value));
                            }
                            TableRow::Wide(cell) => {
                                lines.push(super::lexicon::field(cell.label, &cell.value))
                            }
                        }
                    }
                }
                Block::Spacer => lines.push(String::new()),
                Block::Rule | Block::Image { .. } => {}
            }
        }
        lines
    }
}
