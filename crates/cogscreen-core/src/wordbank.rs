//! Word bank sources and selection of the session's five words.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::WordBankError;
use crate::random::RandomSource;

/// Number of words memorized per session.
pub const WORD_COUNT: usize = 5;

/// Words used when no word bank is available.
pub const DEFAULT_WORDS: [&str; WORD_COUNT] = ["apple", "table", "penny", "garden", "finger"];

/// A provider of candidate words.
pub trait WordSource: Send {
    /// The raw candidate pool.
    fn candidates(&self) -> Result<Vec<String>, WordBankError>;
}

/// Newline-separated word list on disk.
#[derive(Debug, Clone)]
pub struct FileWordSource {
    path: PathBuf,
}

impl FileWordSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl WordSource for FileWordSource {
    fn candidates(&self) -> Result<Vec<String>, WordBankError> {
        let content = std::fs::read_to_string(&self.path).map_err(|source| WordBankError::Io {
            path: self.path.clone(),
            source,
        })?;
        let words: Vec<String> = content
            .lines()
            .map(str::trim)
            .filter(|w| !w.is_empty())
            .map(str::to_string)
            .collect();
        if words.is_empty() {
            return Err(WordBankError::Empty);
        }
        Ok(words)
    }
}

/// In-memory pool, also used when no word bank is configured.
#[derive(Debug, Clone, Default)]
pub struct StaticWordSource {
    words: Vec<String>,
}

impl StaticWordSource {
    pub fn new<S: Into<String>>(words: impl IntoIterator<Item = S>) -> Self {
        Self {
            words: words.into_iter().map(Into::into).collect(),
        }
    }

    /// The built-in default list.
    pub fn defaults() -> Self {
        Self::new(DEFAULT_WORDS)
    }
}

impl WordSource for StaticWordSource {
    fn candidates(&self) -> Result<Vec<String>, WordBankError> {
        if self.words.is_empty() {
            return Err(WordBankError::Empty);
        }
        Ok(self.words.clone())
    }
}

/// The five words of a session. Stored lower-case; matching is
/// case-insensitive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordSet {
    words: Vec<String>,
}

impl WordSet {
    pub fn new<S: AsRef<str>>(words: impl IntoIterator<Item = S>) -> Self {
        Self {
            words: words
                .into_iter()
                .map(|w| w.as_ref().trim().to_lowercase())
                .collect(),
        }
    }

    /// The built-in default set.
    pub fn defaults() -> Self {
        Self::new(DEFAULT_WORDS)
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Case-insensitive membership.
    pub fn contains(&self, token: &str) -> bool {
        let token = token.to_lowercase();
        self.words.iter().any(|w| *w == token)
    }

    /// Upper-case words for display.
    pub fn display_words(&self) -> Vec<String> {
        self.words.iter().map(|w| w.to_uppercase()).collect()
    }
}

/// Whether a word is a good memorization candidate: 4 to 8 letters.
pub fn is_memorable(word: &str) -> bool {
    let len = word.chars().count();
    (4..=8).contains(&len) && word.chars().all(char::is_alphabetic)
}

/// Choose the session's words from a source.
///
/// Prefers memorable words; falls back to the whole pool when fewer than
/// five qualify, and to [`DEFAULT_WORDS`] when the source fails or offers
/// fewer than five distinct words.
pub fn select_words(source: &dyn WordSource, rng: &mut dyn RandomSource) -> WordSet {
    let pool = match source.candidates() {
        Ok(pool) => pool,
        Err(e) => {
            tracing::warn!("word bank unavailable, using default words: {e}");
            return WordSet::defaults();
        }
    };

    let pool = distinct(pool);
    let good: Vec<String> = pool.iter().filter(|w| is_memorable(w)).cloned().collect();
    let mut chosen = if good.len() < WORD_COUNT { pool } else { good };

    if chosen.len() < WORD_COUNT {
        tracing::warn!(
            "word bank has only {} distinct words, using default words",
            chosen.len()
        );
        return WordSet::defaults();
    }

    rng.shuffle(&mut chosen);
    chosen.truncate(WORD_COUNT);
    WordSet::new(chosen)
}

/// Drop case-insensitive duplicates, keeping first occurrences.
fn distinct(pool: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    pool.into_iter()
        .map(|w| w.trim().to_string())
        .filter(|w| !w.is_empty() && seen.insert(w.to_lowercase()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::{ScriptedRandom, StdRandom};

    #[test]
    fn memorable_words() {
        assert!(is_memorable("apple"));
        assert!(is_memorable("elephant"));
        assert!(!is_memorable("cat"));
        assert!(!is_memorable("butterfly"));
        assert!(!is_memorable("ice-cream"));
        assert!(!is_memorable("r2d2"));
    }

    #[test]
    fn prefers_memorable_words() {
        let source = StaticWordSource::new([
            "ox", "river", "a", "candle", "moon", "butterfly", "pencil", "cloud",
        ]);
        let mut rng = ScriptedRandom::default();
        let set = select_words(&source, &mut rng);
        assert_eq!(set.words(), ["river", "candle", "moon", "pencil", "cloud"]);
    }

    #[test]
    fn falls_back_to_full_pool() {
        let source = StaticWordSource::new(["ox", "river", "cat", "dog", "moon", "sun"]);
        let mut rng = ScriptedRandom::default();
        let set = select_words(&source, &mut rng);
        assert_eq!(set.words(), ["ox", "river", "cat", "dog", "moon"]);
    }

    #[test]
    fn too_small_pool_uses_defaults() {
        let source = StaticWordSource::new(["river", "River", "moon"]);
        let mut rng = ScriptedRandom::default();
        assert_eq!(select_words(&source, &mut rng), WordSet::defaults());
    }

    #[test]
    fn missing_file_uses_defaults() {
        let source = FileWordSource::new("/definitely/not/here/words.txt");
        let mut rng = StdRandom::seeded(3);
        assert_eq!(select_words(&source, &mut rng), WordSet::defaults());
    }

    #[test]
    fn file_source_reads_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("words.txt");
        std::fs::write(&path, "river\n\n  candle \nmoon\npencil\ncloud\nharbor\n").unwrap();

        let source = FileWordSource::new(&path);
        assert_eq!(source.candidates().unwrap().len(), 6);

        let mut rng = StdRandom::seeded(11);
        let set = select_words(&source, &mut rng);
        assert_eq!(set.len(), WORD_COUNT);
        let unique: HashSet<_> = set.words().iter().collect();
        assert_eq!(unique.len(), WORD_COUNT);
    }

    #[test]
    fn empty_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("words.txt");
        std::fs::write(&path, "\n  \n").unwrap();
        assert!(matches!(
            FileWordSource::new(&path).candidates(),
            Err(WordBankError::Empty)
        ));
    }

    #[test]
    fn word_set_matching_is_case_insensitive() {
        let set = WordSet::new(["Apple", "TABLE"]);
        assert!(set.contains("apple"));
        assert!(set.contains("Table"));
        assert!(!set.contains("chair"));
        assert_eq!(set.display_words(), vec!["APPLE", "TABLE"]);
    }
}
