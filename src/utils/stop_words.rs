/// 英文常見停用詞，文字練習與向量檢索共用
pub const STOP_WORDS: &[&str] = &[
    "a", "an", "the", "and", "or", "but", "if", "then", "else", "when", "while", "of", "to",
    "in", "on", "at", "for", "from", "by", "with", "about", "as", "is", "am", "are", "was",
    "were", "be", "been", "being", "it", "its", "itself", "this", "that", "these", "those",
    "he", "she", "they", "them", "his", "her", "their", "we", "us", "you", "your", "i", "me",
    "my", "mine", "ours", "yours", "hers", "theirs", "do", "does", "did", "doing", "done",
    "not", "no", "nor", "so", "than", "too", "very", "can", "could", "should", "would", "may",
    "might", "will", "just", "also", "because", "into", "over", "under", "again", "further",
    "up", "down", "out", "off", "only", "own", "same", "such", "both", "each", "few", "more",
    "most", "other", "some", "any", "all", "once",
];

pub fn is_stop_word(word: &str) -> bool {
    STOP_WORDS.contains(&word.to_lowercase().as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_stop_word_ignores_case() {
        assert!(is_stop_word("the"));
        assert!(is_stop_word("The"));
        assert!(!is_stop_word("ownership"));
    }
}
