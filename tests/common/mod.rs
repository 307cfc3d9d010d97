#![allow(dead_code)] // Not every test binary uses every helper.

use keyanneal::config::ScoringWeights;
use keyanneal::corpus::FrequencyModel;
use keyanneal::layout::{KeyDescriptor, Layout, LayoutDocument};

/// Builder for small hand-made layout documents.
#[derive(Default)]
pub struct LayoutBuilder {
    rows: Vec<Vec<KeyDescriptor>>,
}

impl LayoutBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a new row; subsequent keys land in it.
    pub fn row(mut self) -> Self {
        self.rows.push(Vec::new());
        self
    }

    pub fn key(mut self, base: &str, shift: &str, x: f64, y: f64) -> Self {
        self.current_row()
            .push(KeyDescriptor::printable(base, shift, x, y));
        self
    }

    pub fn fixed(mut self, name: &str, x: f64, y: f64, width: f64) -> Self {
        self.current_row()
            .push(KeyDescriptor::fixed(name, x, y).with_width(width));
        self
    }

    pub fn document(self) -> LayoutDocument {
        LayoutDocument { layout: self.rows }
    }

    pub fn build(self, model: &FrequencyModel) -> Layout {
        Layout::from_document(&self.document(), model).expect("valid test layout")
    }

    fn current_row(&mut self) -> &mut Vec<KeyDescriptor> {
        if self.rows.is_empty() {
            self.rows.push(Vec::new());
        }
        self.rows.last_mut().unwrap()
    }
}

/// A compact ANSI-like board: number row, three letter rows, and a few
/// fixed modifier keys.
pub fn qwerty_document() -> LayoutDocument {
    let mut b = LayoutBuilder::new().row();
    for (i, (base, shift)) in [
        ("1", "!"),
        ("2", "@"),
        ("3", "#"),
        ("4", "$"),
        ("5", "%"),
        ("6", "^"),
        ("7", "&"),
        ("8", "*"),
        ("9", "("),
        ("0", ")"),
    ]
    .iter()
    .enumerate()
    {
        b = b.key(base, shift, 1.0 + i as f64, 0.0);
    }

    b = b.row().fixed("Tab", 0.0, 1.0, 1.5);
    for (i, c) in "qwertyuiop".chars().enumerate() {
        let lower = c.to_string();
        b = b.key(&lower, &lower.to_uppercase(), 1.5 + i as f64, 1.0);
    }
    b = b.key("[", "{", 11.5, 1.0);

    b = b.row().fixed("Caps", 0.0, 2.0, 1.75);
    for (i, c) in "asdfghjkl".chars().enumerate() {
        let lower = c.to_string();
        b = b.key(&lower, &lower.to_uppercase(), 1.75 + i as f64, 2.0);
    }
    b = b.key(";", ":", 10.75, 2.0).key("'", "\"", 11.75, 2.0);

    b = b.row().fixed("Shift", 0.0, 3.0, 2.25);
    for (i, c) in "zxcvbnm".chars().enumerate() {
        let lower = c.to_string();
        b = b.key(&lower, &lower.to_uppercase(), 2.25 + i as f64, 3.0);
    }
    b = b
        .key(",", "<", 9.25, 3.0)
        .key(".", ">", 10.25, 3.0)
        .key("/", "?", 11.25, 3.0);

    b.row().fixed("Space", 4.0, 4.0, 6.25).document()
}

pub fn sample_corpus() -> &'static str {
    "the quick brown fox jumps over the lazy dog.\n\
     fn main() { println!(\"hello, world!\"); }\n\
     let x = vec![1, 2, 3]; // sum is 6\n\
     She sells sea shells; the shells she sells are surely seashells?\n"
}

/// Only the bigram term, with the given penalties and no balance scaling.
pub fn bigram_only_weights(same_finger: f64, same_hand: f64) -> ScoringWeights {
    ScoringWeights {
        row_weight: 0.0,
        finger_weight: 0.0,
        bigram_weight: 1.0,
        same_finger_penalty: same_finger,
        same_hand_penalty: same_hand,
    }
}

pub fn assert_close(a: f64, b: f64) {
    let tol = 1e-9 * a.abs().max(b.abs()).max(1.0);
    assert!((a - b).abs() <= tol, "{} != {}", a, b);
}
