mod grid;
mod tables;

pub use self::grid::print_layout as print_layout_grid;
pub use self::tables::{format_improvement, print_score_comparison};
