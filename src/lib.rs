pub mod bank;
pub mod config;
pub mod core;
pub mod domain;
pub mod drills;
pub mod games;
pub mod rag;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use config::{cli::LocalStorage, rag_config::RagConfig};
pub use core::engine::AgentEngine;
pub use rag::AgenticRag;
pub use utils::error::{DrillError, Result};
