pub mod anneal;
pub mod merge_corpus;
pub mod render;
pub mod score;
