use crate::utils::error::{DrillError, Result};
use crate::utils::stop_words::is_stop_word;
use regex::Regex;
use std::collections::{BTreeSet, HashMap};
use std::fmt;
use std::ops::Deref;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Text {
    text: String,
}

impl Text {
    pub fn new(text: &str) -> Self {
        Self {
            text: text.trim().to_string(),
        }
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| DrillError::ProcessingError {
            message: format!("File not found: {} ({})", path.display(), e),
        })?;
        Ok(Self::new(&content))
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// 轉小寫並去除 ASCII 標點後切字
    fn words(&self) -> Vec<String> {
        self.text
            .to_lowercase()
            .chars()
            .filter(|c| !c.is_ascii_punctuation())
            .collect::<String>()
            .split_whitespace()
            .map(str::to_string)
            .collect()
    }

    pub fn word_frequency(&self, word: &str) -> Option<usize> {
        let target = word.to_lowercase();
        let count = self.words().iter().filter(|w| **w == target).count();
        (count > 0).then_some(count)
    }

    /// 同次數時以最早出現者為準
    pub fn most_common_word(&self) -> Option<String> {
        let words = self.words();
        let mut counts: HashMap<&str, usize> = HashMap::new();
        for w in &words {
            *counts.entry(w.as_str()).or_default() += 1;
        }

        let mut best: Option<(&str, usize)> = None;
        for w in &words {
            let count = counts[w.as_str()];
            if best.map_or(true, |(_, c)| count > c) {
                best = Some((w.as_str(), count));
            }
        }
        best.map(|(w, _)| w.to_string())
    }

    pub fn unique_words(&self) -> Vec<String> {
        self.words()
            .into_iter()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}

impl fmt::Display for Text {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// 可就地清理內容的 `Text`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextModification {
    inner: Text,
}

fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

impl TextModification {
    pub fn new(text: &str) -> Self {
        Self {
            inner: Text::new(text),
        }
    }

    pub fn remove_punctuation(&mut self) -> &str {
        let replaced: String = self
            .inner
            .text
            .chars()
            .map(|c| if c.is_ascii_punctuation() { ' ' } else { c })
            .collect();
        self.inner.text = collapse_whitespace(&replaced);
        &self.inner.text
    }

    pub fn remove_stop_words(&mut self) -> &str {
        let kept: Vec<&str> = self
            .inner
            .text
            .split_whitespace()
            .filter(|w| !is_stop_word(w))
            .collect();
        self.inner.text = kept.join(" ");
        &self.inner.text
    }

    pub fn remove_special_characters(&mut self) -> Result<&str> {
        let special = Regex::new(r"[^A-Za-z0-9\s]").map_err(|e| DrillError::ProcessingError {
            message: format!("Invalid pattern: {}", e),
        })?;
        let replaced = special.replace_all(&self.inner.text, " ");
        self.inner.text = collapse_whitespace(&replaced);
        Ok(&self.inner.text)
    }
}

impl Deref for TextModification {
    type Target = Text;

    fn deref(&self) -> &Text {
        &self.inner
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const SAMPLE: &str = "
The Witcher Geralt of Rivia wandered through the dark forests of Kaedwen.
Monsters lurked behind every shadow, yet Geralt's silver sword gleamed.
";

    #[test]
    fn test_analysis() {
        let text = Text::new(SAMPLE);
        assert!(text.as_str().starts_with("The Witcher"));
        assert_eq!(text.word_frequency("THE"), Some(2));
        assert_eq!(text.word_frequency("geralt"), Some(1));
        assert_eq!(text.word_frequency("ciri"), None);
        assert_eq!(text.most_common_word().as_deref(), Some("the"));

        let unique = text.unique_words();
        assert_eq!(unique.first().map(String::as_str), Some("behind"));
        assert!(unique.contains(&"geralts".to_string()));
    }

    #[test]
    fn test_most_common_tie_keeps_first_seen() {
        assert_eq!(
            Text::new("wolf cat cat wolf").most_common_word().as_deref(),
            Some("wolf")
        );
        assert_eq!(Text::new("   ").most_common_word(), None);
    }

    #[test]
    fn test_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "  Silver sword, silver moon.  ").unwrap();
        let text = Text::from_file(file.path()).unwrap();
        assert_eq!(text.word_frequency("silver"), Some(2));
        assert!(Text::from_file("/no/such/file.txt").is_err());
    }

    #[test]
    fn test_modifications() {
        let mut t = TextModification::new("Hello,   world! It's  the end...");
        assert_eq!(t.remove_punctuation(), "Hello world It s the end");

        let mut t = TextModification::new("The wolf and the sword");
        assert_eq!(t.remove_stop_words(), "wolf sword");

        let mut t = TextModification::new("blood & fire ©2025 CDPR™ — coin ($)");
        assert_eq!(
            t.remove_special_characters().unwrap(),
            "blood fire 2025 CDPR coin"
        );
        assert_eq!(t.word_frequency("coin"), Some(1));
    }
}
