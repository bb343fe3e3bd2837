pub mod cli;
pub mod rag_config;

#[cfg(feature = "cli")]
use crate::utils::error::Result;
#[cfg(feature = "cli")]
use crate::utils::validation::{
    validate_file_extensions, validate_non_empty_string, validate_path, validate_positive_number,
    validate_range, Validate,
};
#[cfg(feature = "cli")]
use clap::{Parser, Subcommand};
#[cfg(feature = "cli")]
use serde::{Deserialize, Serialize};

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "drillbook")]
#[command(about = "Console drills, games and a tiny ATM")]
pub struct CliConfig {
    #[arg(long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Seed for every random operation")]
    pub seed: Option<u64>,

    #[command(subcommand)]
    pub command: Command,
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Serialize, Deserialize, Subcommand)]
pub enum Command {
    /// 字串長度、首尾字元與逐步前綴
    Strings,
    /// 一個數字的前 n 個倍數
    Multiples,
    /// 移除連續重複字元
    Dedupe,
    /// 每個字母出現的位置
    Letters,
    Shopping,
    Tickets,
    Pizza,
    /// 咖啡店選單
    Coffee,
    TicTacToe,
    Rps,
    Atm,
    Anagram {
        #[arg(long, default_value = "sowpods.txt")]
        words: String,
    },
    Text {
        #[arg(long)]
        file: Option<String>,
    },
    Cards,
    Evolve {
        #[arg(long, default_value = "0.5")]
        environment: f64,
        #[arg(long, default_value = "100000")]
        max_generations: u64,
    },
    Currency,
    Circles,
    Pets,
    Family,
    Calendar {
        #[arg(long, default_value = "31/12/1991")]
        birthdate: String,
    },
    Sentence {
        #[arg(long, default_value = "words.txt")]
        words: String,
    },
    Payroll {
        #[arg(long, default_value = "./output")]
        output: String,
    },
}

#[cfg(feature = "cli")]
impl CliConfig {
    /// 有 --seed 時回傳可重現的亂數產生器
    pub fn rng(&self) -> fastrand::Rng {
        match self.seed {
            Some(seed) => fastrand::Rng::with_seed(seed),
            None => fastrand::Rng::new(),
        }
    }
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        match &self.command {
            Command::Anagram { words } => {
                validate_path("words", words)?;
                validate_file_extensions("words", std::slice::from_ref(words), &["txt"])?;
            }
            Command::Sentence { words } => {
                validate_path("words", words)?;
                validate_file_extensions("words", std::slice::from_ref(words), &["txt"])?;
            }
            Command::Text { file: Some(file) } => validate_path("file", file)?,
            Command::Evolve {
                environment,
                max_generations,
            } => {
                // environment 為 0 時永遠不會突變
                validate_range("environment", *environment, f64::MIN_POSITIVE, 1.0)?;
                validate_positive_number(
                    "max_generations",
                    usize::try_from(*max_generations).unwrap_or(usize::MAX),
                    1,
                )?;
            }
            Command::Calendar { birthdate } => validate_non_empty_string("birthdate", birthdate)?,
            Command::Payroll { output } => validate_path("output", output)?,
            _ => {}
        }

        tracing::debug!("✅ CLI configuration validated: {:?}", self.command);
        Ok(())
    }
}

#[cfg(all(test, feature = "cli"))]
mod tests {
    use super::*;
    use crate::utils::error::DrillError;

    fn parse(args: &[&str]) -> CliConfig {
        CliConfig::try_parse_from(std::iter::once("drillbook").chain(args.iter().copied()))
            .unwrap()
    }

    #[test]
    fn test_defaults_for_subcommands() {
        let config = parse(&["anagram"]);
        assert!(!config.verbose);
        match config.command {
            Command::Anagram { words } => assert_eq!(words, "sowpods.txt"),
            other => panic!("unexpected command: {other:?}"),
        }

        match parse(&["evolve"]).command {
            Command::Evolve {
                environment,
                max_generations,
            } => {
                assert_eq!(environment, 0.5);
                assert_eq!(max_generations, 100_000);
            }
            other => panic!("unexpected command: {other:?}"),
        }

        match parse(&["calendar"]).command {
            Command::Calendar { birthdate } => assert_eq!(birthdate, "31/12/1991"),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_kebab_case_and_global_flags() {
        let config = parse(&["tic-tac-toe", "--verbose", "--seed", "7"]);
        assert!(config.verbose);
        assert_eq!(config.seed, Some(7));
        assert!(matches!(config.command, Command::TicTacToe));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_seeded_rng_is_reproducible() {
        let config = parse(&["--seed", "42", "cards"]);
        assert_eq!(config.rng().u64(..), config.rng().u64(..));
    }

    #[test]
    fn test_rejects_non_txt_word_list() {
        let config = parse(&["sentence", "--words", "words.csv"]);
        assert!(matches!(
            config.validate(),
            Err(DrillError::InvalidConfigValueError { .. })
        ));
    }

    #[test]
    fn test_rejects_zero_environment() {
        let config = parse(&["evolve", "--environment", "0"]);
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("environment"));

        let config = parse(&["evolve", "--max-generations", "0"]);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_blank_birthdate() {
        let config = parse(&["calendar", "--birthdate", "  "]);
        assert!(config.validate().is_err());
    }
}
