pub mod agent;
pub mod chat;
pub mod knowledge;
pub mod llm;
pub mod search;
pub mod splitter;
pub mod vector_store;

pub use agent::AgenticRag;
pub use chat::{chat_session, render_answer};
pub use llm::OpenAiCompatibleChat;
pub use search::TavilySearch;
pub use vector_store::{HashingEmbedder, InMemoryVectorStore};
