use crate::domain::ports::Storage;
use crate::utils::error::{DrillError, Result};
use crate::utils::prompt::Prompter;
use std::io::{BufRead, Write};
use std::ops::RangeInclusive;

pub const SENTENCE_LENGTH: RangeInclusive<usize> = 2..=20;

/// 讀取以空白分隔的字詞檔；空檔案視為錯誤
pub async fn load_words<S: Storage>(storage: &S, name: &str) -> Result<Vec<String>> {
    let bytes = storage.read_file(name).await?;
    let words: Vec<String> = String::from_utf8_lossy(&bytes)
        .split_whitespace()
        .map(str::to_string)
        .collect();
    if words.is_empty() {
        return Err(DrillError::ValidationError {
            message: format!("The file {} is empty.", name),
        });
    }
    tracing::debug!("📖 Loaded {} words from {}", words.len(), name);
    Ok(words)
}

pub fn random_sentence(words: &[String], length: usize, rng: &mut fastrand::Rng) -> Result<String> {
    if words.is_empty() {
        return Err(DrillError::ValidationError {
            message: "No words to build a sentence from.".to_string(),
        });
    }
    let chosen: Vec<&str> = (0..length)
        .map(|_| words[rng.usize(..words.len())].as_str())
        .collect();
    Ok(chosen.join(" ").to_lowercase())
}

pub fn validate_sentence_length(raw: &str) -> std::result::Result<usize, String> {
    let length: i64 = raw
        .trim()
        .parse()
        .map_err(|_| "Invalid input. Please enter a whole number.".to_string())?;
    match usize::try_from(length) {
        Ok(n) if SENTENCE_LENGTH.contains(&n) => Ok(n),
        _ => Err(format!(
            "Invalid input. The number {} is outside the range 2-20.",
            length
        )),
    }
}

pub fn run_sentence_generator<R: BufRead, W: Write>(
    prompter: &mut Prompter<R, W>,
    words: &[String],
    rng: &mut fastrand::Rng,
) -> Result<Option<String>> {
    prompter.say("Welcome to the Random Sentence Generator")?;
    prompter.say("The program generates a random sentence of a specified length from a file\n")?;

    let Some(length) = prompter.ask_until(
        "Please enter a number between 2 and 20 to generate a sentence with provided length: ",
        validate_sentence_length,
    )?
    else {
        return Ok(None);
    };
    prompter.say(format!("Valid input: {}", length))?;

    let sentence = random_sentence(words, length, rng)?;
    prompter.say(format!("The sentence is: {}", sentence))?;
    Ok(Some(sentence))
}
