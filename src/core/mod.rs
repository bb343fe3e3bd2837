pub mod engine;

pub use crate::domain::model::{AgentState, Document, QueryResult, Source, WebResult};
pub use crate::domain::ports::{ChatModel, Embedder, Route, Storage, WebSearch, Workflow};
pub use crate::utils::error::Result;
