use crate::error::{KaResult, KeyAnnealError};
use fnv::FnvHashMap;
use std::fs;
use std::path::Path;
use tracing::{debug, warn};
use walkdir::WalkDir;

/// Case-folds a single character. Characters whose lowercase form expands to
/// several chars keep the first one.
#[inline]
pub fn fold(c: char) -> char {
    c.to_lowercase().next().unwrap_or(c)
}

/// Single-character and in-line bigram counts derived from a corpus.
#[derive(Debug, Clone, Default)]
pub struct FrequencyModel {
    unigrams: FnvHashMap<char, u64>,
    bigrams: FnvHashMap<(char, char), u64>,
    total_chars: u64,
}

impl FrequencyModel {
    pub fn from_text(text: &str) -> Self {
        let mut unigrams: FnvHashMap<char, u64> = FnvHashMap::default();
        let mut bigrams: FnvHashMap<(char, char), u64> = FnvHashMap::default();
        let mut total_chars = 0;

        for c in text.chars() {
            *unigrams.entry(fold(c)).or_default() += 1;
            total_chars += 1;
        }

        for line in text.lines() {
            let mut chars = line.chars().map(fold);
            let Some(mut prev) = chars.next() else {
                continue;
            };
            for next in chars {
                *bigrams.entry((prev, next)).or_default() += 1;
                prev = next;
            }
        }

        debug!(
            "Corpus Stats: {} chars, {} distinct chars, {} distinct bigrams",
            total_chars,
            unigrams.len(),
            bigrams.len()
        );

        Self {
            unigrams,
            bigrams,
            total_chars,
        }
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> KaResult<Self> {
        let text = fs::read_to_string(path)?;
        Ok(Self::from_text(&text))
    }

    pub fn unigram(&self, c: char) -> u64 {
        self.unigrams.get(&c).copied().unwrap_or(0)
    }

    pub fn bigram(&self, first: char, second: char) -> u64 {
        self.bigrams.get(&(first, second)).copied().unwrap_or(0)
    }

    /// Frequency of a symbol string. Only single-char symbols occur in the
    /// unigram table; anything longer counts as zero.
    pub fn symbol_frequency(&self, symbol: &str) -> u64 {
        let mut chars = symbol.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => self.unigram(fold(c)),
            _ => 0,
        }
    }

    pub fn unigrams(&self) -> impl Iterator<Item = (char, u64)> + '_ {
        self.unigrams.iter().map(|(&c, &n)| (c, n))
    }

    pub fn bigrams(&self) -> impl Iterator<Item = ((char, char), u64)> + '_ {
        self.bigrams.iter().map(|(&pair, &n)| (pair, n))
    }

    pub fn bigram_count(&self) -> usize {
        self.bigrams.len()
    }

    pub fn total_chars(&self) -> u64 {
        self.total_chars
    }
}

/// Concatenates every non-hidden file below `dir` into one corpus, one
/// newline after each file. Unreadable or non-UTF-8 files are skipped.
pub fn merge_directory<P: AsRef<Path>>(dir: P) -> KaResult<String> {
    let dir = dir.as_ref();
    if !dir.is_dir() {
        return Err(KeyAnnealError::Config(format!(
            "{} is not a directory",
            dir.display()
        )));
    }

    let mut merged = String::new();
    let mut merged_files = 0;

    for entry in WalkDir::new(dir).sort_by_file_name() {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                warn!("Skipping unreadable entry: {}", e);
                continue;
            }
        };
        if !entry.file_type().is_file() || entry.file_name().to_string_lossy().starts_with('.') {
            continue;
        }

        match fs::read_to_string(entry.path()) {
            Ok(content) => {
                merged.push_str(&content);
                merged.push('\n');
                merged_files += 1;
            }
            Err(e) => warn!("Skipping file due to an error: {:?} ({})", entry.path(), e),
        }
    }

    debug!("Merged {} files into corpus", merged_files);
    Ok(merged)
}
