pub mod error;
pub mod logger;
pub mod prompt;
pub mod stop_words;
pub mod validation;
