use comfy_table::presets::ASCII_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, Table};
use keyanneal::layout::{KeyDescriptor, LayoutDocument};

// The eight most common letters in English text.
const HIGHLIGHTS: [&str; 8] = ["e", "t", "a", "o", "i", "n", "s", "h"];

pub fn print_layout(name: &str, doc: &LayoutDocument) {
    println!("\nLayout: {}", name);
    println!("{}", layout_grid(doc));
}

/// One table row per layout row, each cell padded to three columns per unit
/// of key width.
pub fn layout_grid(doc: &LayoutDocument) -> Table {
    let mut table = Table::new();
    table.load_preset(ASCII_FULL);

    for row in &doc.layout {
        let cells: Vec<Cell> = row
            .iter()
            .map(|desc| {
                let width = cell_width(desc.width);
                let cell = Cell::new(format!("{:^width$}", key_label(desc), width = width))
                    .set_alignment(CellAlignment::Center);
                if is_highlighted(desc) {
                    cell.fg(Color::Red).add_attribute(Attribute::Bold)
                } else {
                    cell
                }
            })
            .collect();
        table.add_row(cells);
    }
    table
}

fn key_label(desc: &KeyDescriptor) -> String {
    let base = desc
        .base
        .as_deref()
        .or(desc.name.as_deref())
        .unwrap_or(" ");
    match desc.shift.as_deref() {
        Some(shift) if !shift.is_empty() && shift != base => format!("{} {}", base, shift),
        _ => base.to_string(),
    }
}

fn cell_width(width: Option<f64>) -> usize {
    (width.unwrap_or(1.0) * 3.0).round().max(1.0) as usize
}

fn is_highlighted(desc: &KeyDescriptor) -> bool {
    desc.base
        .as_deref()
        .is_some_and(|base| HIGHLIGHTS.contains(&base))
}
