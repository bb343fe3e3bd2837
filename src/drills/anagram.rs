use crate::utils::error::{DrillError, Result};
use crate::utils::prompt::Prompter;
use std::io::{BufRead, Write};
use std::path::Path;

/// 以字詞清單查詢變位詞（anagram）
#[derive(Debug, Clone)]
pub struct AnagramChecker {
    words: Vec<String>,
}

fn letter_signature(word: &str) -> Vec<char> {
    let mut letters: Vec<char> = word.to_lowercase().chars().collect();
    letters.sort_unstable();
    letters
}

fn is_alphabetic_word(word: &str) -> bool {
    !word.is_empty() && word.chars().all(char::is_alphabetic)
}

impl AnagramChecker {
    pub fn from_words(content: &str) -> Result<Self> {
        let words: Vec<String> = content
            .split_whitespace()
            .map(str::to_lowercase)
            .collect();
        if words.is_empty() {
            return Err(DrillError::ValidationError {
                message: "The word list is empty. Cannot proceed.".to_string(),
            });
        }
        tracing::debug!("📖 Loaded {} words", words.len());
        Ok(Self { words })
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            tracing::error!("❌ Word list {} could not be read: {}", path.display(), e);
            e
        })?;
        Self::from_words(&content)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn is_valid_word(&self, word: &str) -> bool {
        let word = word.to_lowercase();
        self.words.iter().any(|w| *w == word)
    }

    pub fn is_anagram(&self, first: &str, second: &str) -> bool {
        is_alphabetic_word(first)
            && is_alphabetic_word(second)
            && letter_signature(first) == letter_signature(second)
    }

    /// 依清單順序回傳，包含單字本身
    pub fn get_anagrams(&self, word: &str) -> Vec<String> {
        if !is_alphabetic_word(word) {
            return Vec::new();
        }
        let target = letter_signature(word);
        self.words
            .iter()
            .filter(|w| is_alphabetic_word(w) && letter_signature(w) == target)
            .cloned()
            .collect()
    }
}

/// 只接受一個純字母的單字
pub fn parse_single_word(raw: &str) -> std::result::Result<String, String> {
    let word = raw.trim();
    if word.contains(char::is_whitespace) {
        return Err("Error: Please enter exactly one word.".to_string());
    }
    if !is_alphabetic_word(word) {
        return Err("Error: Only alphabetic characters are allowed.".to_string());
    }
    Ok(word.to_string())
}

pub fn prompt_word<R: BufRead, W: Write>(prompter: &mut Prompter<R, W>) -> Result<Option<String>> {
    prompter.ask_until("Enter a word: ", parse_single_word)
}

pub fn run_anagram_menu<R: BufRead, W: Write>(
    prompter: &mut Prompter<R, W>,
    checker: &AnagramChecker,
) -> Result<()> {
    prompter.say("Welcome to Anagram checker")?;
    loop {
        prompter.say("")?;
        prompter.say("1) Get anagrams for a word")?;
        prompter.say("2) Exit")?;
        let Some(choice) = prompter.ask("Select an option: ")? else {
            return Ok(());
        };

        match choice.trim() {
            "1" => {
                let Some(word) = prompt_word(prompter)? else {
                    return Ok(());
                };
                if checker.is_valid_word(&word) {
                    prompter.say("This is a valid English word.")?;
                } else {
                    prompter.say("This is not a valid English word.")?;
                }

                let anagrams = checker.get_anagrams(&word);
                if anagrams.is_empty() {
                    prompter.say(format!(
                        "No anagrams found for this word '{}' in the list.",
                        word
                    ))?;
                } else {
                    prompter.say(format!("\n{}", "=".repeat(80)))?;
                    prompter.say(format!("YOUR WORD: \"{}\"", word))?;
                    prompter.say(format!(
                        "Anagrams for your word: {}.",
                        anagrams.join(", ")
                    ))?;
                    prompter.say("=".repeat(80))?;
                }
            }
            "2" => {
                prompter.say("Goodbye!")?;
                return Ok(());
            }
            _ => prompter.say("Invalid selection. Please try again.")?,
        }
    }
}
