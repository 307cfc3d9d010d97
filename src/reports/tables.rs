use comfy_table::presets::ASCII_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use keyanneal::layout::{improvement_pct, ScoreBreakdown};

pub fn print_score_comparison(results: &[(String, ScoreBreakdown)]) {
    println!("\n{}", score_table(results));
}

/// Score terms per layout, with the improvement of each over the first row.
pub fn score_table(results: &[(String, ScoreBreakdown)]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);

    table.set_header(vec![
        Cell::new("Layout").add_attribute(Attribute::Bold),
        Cell::new("Ergonomic"),
        Cell::new("Bigram"),
        Cell::new("Total").fg(Color::Cyan),
        Cell::new("vs. first").fg(Color::Green),
    ]);

    for i in 1..=4 {
        if let Some(col) = table.column_mut(i) {
            col.set_cell_alignment(CellAlignment::Right);
        }
    }

    let baseline = results.first().map(|(_, b)| b.total);

    for (i, (name, b)) in results.iter().enumerate() {
        let vs_first = if i == 0 {
            "-".to_string()
        } else {
            format_improvement(baseline.and_then(|base| improvement_pct(base, b.total)))
        };
        table.add_row(vec![
            Cell::new(name).add_attribute(Attribute::Bold),
            Cell::new(format!("{:.2}", b.ergonomic)),
            Cell::new(format!("{:.2}", b.bigram)),
            Cell::new(format!("{:.2}", b.total)).fg(Color::Cyan),
            Cell::new(vs_first),
        ]);
    }
    table
}

pub fn format_improvement(pct: Option<f64>) -> String {
    match pct {
        Some(p) => format!("{:+.2}%", p),
        None => "n/a".to_string(),
    }
}
