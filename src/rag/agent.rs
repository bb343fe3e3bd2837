use crate::core::{AgentState, ChatModel, Embedder, Route, Source, Storage, WebSearch, Workflow};
use crate::domain::model::ChatMessage;
use crate::rag::knowledge::{sample_documents, uploaded};
use crate::rag::vector_store::InMemoryVectorStore;
use crate::utils::error::Result;
use async_trait::async_trait;
use std::path::Path;

pub const DEFAULT_TOP_K: usize = 3;

const WEB_SEARCH_TERMS: [&str; 10] = [
    "latest",
    "recent",
    "current",
    "today",
    "news",
    "2024",
    "2025",
    "now",
    "this year",
    "this month",
];

const REASON_PROMPT: &str = "You are a reasoning agent analyzing a user query. \
Determine what information is needed and whether current/real-time info is required. \
Respond with a brief reasoning plan (2-3 sentences).";

const SYNTHESIZE_PROMPT: &str = "You are a helpful assistant that synthesizes information \
from multiple sources. Base your answer on the provided context, cite sources, \
and acknowledge if information is incomplete. Be concise but comprehensive.";

/// 問題是否需要即時資訊（子字串比對，不分大小寫）
pub fn needs_web_search(query: &str) -> bool {
    let query = query.to_lowercase();
    WEB_SEARCH_TERMS.iter().any(|term| query.contains(term))
}

fn preview(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}

/// 結合本地知識庫、網路搜尋與 LLM 的問答流程
pub struct AgenticRag<M: ChatModel, S: WebSearch, E: Embedder> {
    llm: M,
    search: S,
    store: InMemoryVectorStore<E>,
    top_k: usize,
}

impl<M: ChatModel, S: WebSearch, E: Embedder> AgenticRag<M, S, E> {
    /// 以內建範例文件建立知識庫
    pub fn new(llm: M, search: S, embedder: E) -> Self {
        let store = InMemoryVectorStore::from_documents(&sample_documents(), embedder);
        Self::with_store(llm, search, store)
    }

    pub fn with_store(llm: M, search: S, store: InMemoryVectorStore<E>) -> Self {
        Self {
            llm,
            search,
            store,
            top_k: DEFAULT_TOP_K,
        }
    }

    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k;
        self
    }

    pub fn store(&self) -> &InMemoryVectorStore<E> {
        &self.store
    }

    /// 加入使用者文件，回傳新增的片段數
    pub fn add_documents(&mut self, texts: &[String], titles: &[String]) -> usize {
        let docs = uploaded(texts, titles);
        let added = self.store.add_documents(&docs);
        tracing::info!("📄 Added {} documents ({} chunks)", docs.len(), added);
        added
    }

    /// 從 storage 讀檔加入知識庫，標題取檔名
    pub async fn add_files<St: Storage>(&mut self, storage: &St, paths: &[String]) -> Result<usize> {
        let mut texts = Vec::with_capacity(paths.len());
        let mut titles = Vec::with_capacity(paths.len());
        for path in paths {
            let bytes = storage.read_file(path).await?;
            texts.push(String::from_utf8_lossy(&bytes).into_owned());
            titles.push(
                Path::new(path)
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_else(|| path.clone()),
            );
        }
        Ok(self.add_documents(&texts, &titles))
    }
}

#[async_trait]
impl<M: ChatModel, S: WebSearch, E: Embedder> Workflow for AgenticRag<M, S, E> {
    async fn reason(&self, mut state: AgentState) -> Result<AgentState> {
        let messages = [
            ChatMessage::system(REASON_PROMPT),
            ChatMessage::user(format!("Query: {}", state.query)),
        ];
        let reasoning = self.llm.complete(&messages).await?;

        state.needs_web_search = needs_web_search(&state.query);
        state
            .steps
            .push(format!("🧠 Reasoning: {}...", preview(&reasoning, 100)));
        state.reasoning = reasoning;
        Ok(state)
    }

    async fn retrieve(&self, mut state: AgentState) -> Result<AgentState> {
        state.retrieved_docs = self.store.similarity_search(&state.query, self.top_k);
        state
            .steps
            .push(format!("📚 Retrieved {} documents", state.retrieved_docs.len()));
        Ok(state)
    }

    fn route(&self, state: &AgentState) -> Route {
        if state.needs_web_search || state.retrieved_docs.is_empty() {
            Route::WebSearch
        } else {
            Route::Synthesize
        }
    }

    async fn web_search(&self, mut state: AgentState) -> Result<AgentState> {
        match self.search.search(&state.query).await {
            Ok(results) => {
                state
                    .steps
                    .push(format!("🌐 Web search: {} results", results.len()));
                state.web_results = results;
            }
            Err(e) => {
                tracing::warn!("⚠️ Web search failed, continuing without it: {}", e);
                state.web_results = Vec::new();
                state.steps.push(format!("⚠️ Web search error: {}", e));
            }
        }
        Ok(state)
    }

    async fn synthesize(&self, mut state: AgentState) -> Result<AgentState> {
        let mut sources: Vec<Source> = Vec::new();
        let mut context_parts: Vec<String> = Vec::new();

        for doc in &state.retrieved_docs {
            sources.push(Source::from(doc));
            context_parts.push(format!("[Knowledge Base - {}]\n{}", doc.title, doc.content));
        }
        for result in &state.web_results {
            sources.push(Source::from(result));
            context_parts.push(format!("[Web - {}]\n{}", result.title, result.content));
        }
        let context = context_parts.join("\n\n");

        let messages = [
            ChatMessage::system(SYNTHESIZE_PROMPT),
            ChatMessage::user(format!(
                "Context:\n{}\n\nQuestion: {}\n\nProvide a well-sourced answer:",
                context, state.query
            )),
        ];
        state.final_answer = self.llm.complete(&messages).await?;
        state.sources = sources;
        state.steps.push("✅ Synthesized answer".to_string());
        Ok(state)
    }
}
