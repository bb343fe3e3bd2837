use crate::utils::error::{DrillError, Result};
use std::fmt;

pub const REQUIRED_LENGTH: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LengthVerdict {
    TooShort,
    TooLong,
    Perfect,
}

impl fmt::Display for LengthVerdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            LengthVerdict::TooShort => "String not long enough.",
            LengthVerdict::TooLong => "String too long.",
            LengthVerdict::Perfect => "Perfect string",
        })
    }
}

/// 以字元數（非位元組）檢查長度是否剛好 10
pub fn check_length(s: &str) -> LengthVerdict {
    let len = s.chars().count();
    match len.cmp(&REQUIRED_LENGTH) {
        std::cmp::Ordering::Less => LengthVerdict::TooShort,
        std::cmp::Ordering::Greater => LengthVerdict::TooLong,
        std::cmp::Ordering::Equal => LengthVerdict::Perfect,
    }
}

pub fn first_and_last(s: &str) -> Option<(char, char)> {
    Some((s.chars().next()?, s.chars().next_back()?))
}

/// "", "a", "ab", ... 直到完整字串
pub fn progressive_prefixes(s: &str) -> Vec<String> {
    let mut prefixes = vec![String::new()];
    let mut current = String::new();
    for c in s.chars() {
        current.push(c);
        prefixes.push(current.clone());
    }
    prefixes
}

pub fn shuffle_chars(s: &str, rng: &mut fastrand::Rng) -> String {
    let mut chars: Vec<char> = s.chars().collect();
    rng.shuffle(&mut chars);
    chars.into_iter().collect()
}

/// number 的前 length 個倍數，溢位時回傳錯誤
pub fn multiples(number: i64, length: u32) -> Result<Vec<i64>> {
    (1..=i64::from(length))
        .map(|i| {
            number
                .checked_mul(i)
                .ok_or_else(|| DrillError::ValidationError {
                    message: format!("{} x {} does not fit in a 64-bit integer", number, i),
                })
        })
        .collect()
}

/// 移除連續重複的字元："ppoeemm" → "poem"
pub fn remove_consecutive_duplicates(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut previous = None;
    for c in s.chars() {
        if previous != Some(c) {
            result.push(c);
        }
        previous = Some(c);
    }
    result
}

/// 驗證並正規化單字：去空白、轉小寫、只允許字母
pub fn parse_word(raw: &str) -> Result<String> {
    let word = raw.trim().to_lowercase();
    if word.is_empty() || !word.chars().all(char::is_alphabetic) {
        return Err(DrillError::InvalidInput {
            field: "word".to_string(),
            value: raw.to_string(),
            reason: "Invalid input. Please use only letters.".to_string(),
        });
    }
    Ok(word)
}

/// 每個字母出現的位置，依第一次出現的順序排列
pub fn letter_indices(word: &str) -> Vec<(char, Vec<usize>)> {
    let mut indices: Vec<(char, Vec<usize>)> = Vec::new();
    for (index, c) in word.chars().enumerate() {
        match indices.iter_mut().find(|(letter, _)| *letter == c) {
            Some((_, positions)) => positions.push(index),
            None => indices.push((c, vec![index])),
        }
    }
    indices
}

pub fn render_letter_indices(indices: &[(char, Vec<usize>)]) -> String {
    let entries: Vec<String> = indices
        .iter()
        .map(|(c, positions)| format!("\"{}\": {:?}", c, positions))
        .collect();
    format!("{{{}}}", entries.join(", "))
}

/// 只含大小寫 ASCII 字母的隨機字串
pub fn random_letters(len: usize, rng: &mut fastrand::Rng) -> String {
    (0..len).map(|_| rng.alphabetic()).collect()
}

/// 名字不可全是數字且至少 3 個字元
pub fn is_valid_name(name: &str) -> bool {
    let all_digits = !name.is_empty() && name.chars().all(|c| c.is_ascii_digit());
    !all_digits && name.chars().count() >= 3
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_length_counts_chars() {
        assert_eq!(check_length("short"), LengthVerdict::TooShort);
        assert_eq!(check_length("exactly10!"), LengthVerdict::Perfect);
        assert_eq!(check_length("ééééééééé€"), LengthVerdict::Perfect);
        assert_eq!(check_length("far too long string"), LengthVerdict::TooLong);
        assert_eq!(LengthVerdict::TooShort.to_string(), "String not long enough.");
    }

    #[test]
    fn test_first_and_last() {
        assert_eq!(first_and_last("abcdefghij"), Some(('a', 'j')));
        assert_eq!(first_and_last(""), None);
    }

    #[test]
    fn test_progressive_prefixes() {
        assert_eq!(progressive_prefixes("abc"), vec!["", "a", "ab", "abc"]);
    }

    #[test]
    fn test_shuffle_keeps_characters() {
        let mut rng = fastrand::Rng::with_seed(42);
        let shuffled = shuffle_chars("abcdefghij", &mut rng);
        let mut sorted: Vec<char> = shuffled.chars().collect();
        sorted.sort_unstable();
        assert_eq!(sorted.into_iter().collect::<String>(), "abcdefghij");
    }

    #[test]
    fn test_multiples() {
        assert_eq!(multiples(7, 5).unwrap(), vec![7, 14, 21, 28, 35]);
        assert_eq!(multiples(-2, 3).unwrap(), vec![-2, -4, -6]);
        assert!(multiples(3, 0).unwrap().is_empty());
    }

    #[test]
    fn test_multiples_overflow_is_an_error() {
        assert_eq!(multiples(i64::MAX, 1).unwrap(), vec![i64::MAX]);

        let err = multiples(i64::MAX, 2).unwrap_err();
        assert!(matches!(err, DrillError::ValidationError { .. }));
        assert!(err.to_string().contains("x 2 does not fit"));
    }

    #[test]
    fn test_remove_consecutive_duplicates() {
        assert_eq!(remove_consecutive_duplicates("ppoeemm"), "poem");
        assert_eq!(remove_consecutive_duplicates("aabbaa"), "aba");
        assert_eq!(remove_consecutive_duplicates(""), "");
    }

    #[test]
    fn test_letter_indices() {
        assert_eq!(
            letter_indices("froggy"),
            vec![
                ('f', vec![0]),
                ('r', vec![1]),
                ('o', vec![2]),
                ('g', vec![3, 4]),
                ('y', vec![5]),
            ]
        );
        assert_eq!(
            render_letter_indices(&letter_indices("dodo")),
            "{\"d\": [0, 2], \"o\": [1, 3]}"
        );
    }

    #[test]
    fn test_parse_word() {
        assert_eq!(parse_word("  Grapes ").unwrap(), "grapes");
        assert!(parse_word("gr4pes").is_err());
        assert!(parse_word("").is_err());
    }

    #[test]
    fn test_random_letters() {
        let mut rng = fastrand::Rng::with_seed(1);
        let s = random_letters(5, &mut rng);
        assert_eq!(s.len(), 5);
        assert!(s.chars().all(|c| c.is_ascii_alphabetic()));
    }

    #[test]
    fn test_is_valid_name() {
        assert!(is_valid_name("Ann"));
        assert!(!is_valid_name("12345"));
        assert!(!is_valid_name("Al"));
    }
}
