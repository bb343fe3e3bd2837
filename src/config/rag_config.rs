use crate::rag::knowledge::sample_documents;
use crate::rag::splitter::RecursiveCharacterSplitter;
use crate::rag::{llm, search, splitter, vector_store};
use crate::rag::{AgenticRag, HashingEmbedder, InMemoryVectorStore, OpenAiCompatibleChat, TavilySearch};
use crate::utils::error::{DrillError, Result};
use crate::utils::validation::{
    validate_non_empty_string, validate_path, validate_positive_number, validate_range,
    validate_url, Validate,
};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RagConfig {
    #[serde(default)]
    pub agent: AgentConfig,
    #[serde(default)]
    pub llm: LlmConfig,
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub retrieval: RetrievalConfig,
    #[serde(default)]
    pub knowledge_base: KnowledgeBaseConfig,
    #[serde(default)]
    pub display: DisplayConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentConfig {
    pub name: String,
    pub description: Option<String>,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            name: "agentic-rag".to_string(),
            description: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    pub endpoint: String,
    pub model: String,
    pub api_key: String,
    pub temperature: f32,
    pub max_tokens: u32,
    pub timeout_seconds: u64,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            endpoint: llm::GROQ_URL.to_string(),
            model: llm::DEFAULT_MODEL.to_string(),
            api_key: String::new(),
            temperature: llm::DEFAULT_TEMPERATURE,
            max_tokens: llm::DEFAULT_MAX_TOKENS,
            timeout_seconds: llm::DEFAULT_TIMEOUT_SECONDS,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    pub endpoint: String,
    pub api_key: String,
    pub max_results: u32,
    pub search_depth: String,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            endpoint: search::TAVILY_URL.to_string(),
            api_key: String::new(),
            max_results: search::DEFAULT_MAX_RESULTS,
            search_depth: search::DEFAULT_SEARCH_DEPTH.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RetrievalConfig {
    pub top_k: usize,
    pub chunk_size: usize,
    pub chunk_overlap: usize,
    pub embedding_dimensions: usize,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            top_k: crate::rag::agent::DEFAULT_TOP_K,
            chunk_size: splitter::DEFAULT_CHUNK_SIZE,
            chunk_overlap: splitter::DEFAULT_CHUNK_OVERLAP,
            embedding_dimensions: vector_store::EMBEDDING_DIMENSIONS,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct KnowledgeBaseConfig {
    pub include_samples: bool,
    pub base_path: String,
    pub uploads: Vec<String>,
}

impl Default for KnowledgeBaseConfig {
    fn default() -> Self {
        Self {
            include_samples: true,
            base_path: ".".to_string(),
            uploads: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub show_sources: bool,
    pub show_steps: bool,
}

const SEARCH_DEPTHS: [&str; 2] = ["basic", "advanced"];

fn placeholder_pattern() -> Result<Regex> {
    Regex::new(r"\$\{([^}]+)\}").map_err(|e| DrillError::ConfigError {
        message: format!("invalid placeholder pattern: {}", e),
    })
}

/// 金鑰只顯示前四碼
pub fn mask_secret(secret: &str) -> String {
    if secret.is_empty() {
        return "(not set)".to_string();
    }
    let prefix: String = secret.chars().take(4).collect();
    format!("{}****", prefix)
}

impl RagConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed = Self::substitute_env_vars(content)?;

        toml::from_str(&processed).map_err(|e| DrillError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 預設值加上 GROQ_API_KEY / TAVILY_API_KEY
    pub fn from_env() -> Self {
        let mut config = Self::default();
        config.llm.api_key = std::env::var("GROQ_API_KEY").unwrap_or_default();
        config.search.api_key = std::env::var("TAVILY_API_KEY").unwrap_or_default();
        config
    }

    /// 替換 ${VAR}；找不到的變數保留原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = placeholder_pattern()?;
        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });
        Ok(result.to_string())
    }

    fn validate_api_key(field: &str, value: &str) -> Result<()> {
        if value.trim().is_empty() || placeholder_pattern()?.is_match(value) {
            return Err(DrillError::MissingConfigError {
                field: field.to_string(),
            });
        }
        Ok(())
    }

    pub fn validate_config(&self) -> Result<()> {
        validate_non_empty_string("agent.name", &self.agent.name)?;

        validate_url("llm.endpoint", &self.llm.endpoint)?;
        validate_non_empty_string("llm.model", &self.llm.model)?;
        Self::validate_api_key("llm.api_key", &self.llm.api_key)?;
        validate_range("llm.temperature", self.llm.temperature, 0.0, 2.0)?;
        validate_positive_number("llm.max_tokens", self.llm.max_tokens as usize, 1)?;
        validate_positive_number("llm.timeout_seconds", self.llm.timeout_seconds as usize, 1)?;

        validate_url("search.endpoint", &self.search.endpoint)?;
        Self::validate_api_key("search.api_key", &self.search.api_key)?;
        validate_range("search.max_results", self.search.max_results, 1, 20)?;
        if !SEARCH_DEPTHS.contains(&self.search.search_depth.as_str()) {
            return Err(DrillError::InvalidConfigValueError {
                field: "search.search_depth".to_string(),
                value: self.search.search_depth.clone(),
                reason: format!("Valid depths: {}", SEARCH_DEPTHS.join(", ")),
            });
        }

        validate_positive_number("retrieval.top_k", self.retrieval.top_k, 1)?;
        validate_positive_number(
            "retrieval.embedding_dimensions",
            self.retrieval.embedding_dimensions,
            1,
        )?;
        // 與切分器共用同一套檢查
        RecursiveCharacterSplitter::new(
            self.retrieval.chunk_size,
            self.retrieval.chunk_overlap,
        )?;

        validate_path("knowledge_base.base_path", &self.knowledge_base.base_path)?;
        for upload in &self.knowledge_base.uploads {
            validate_path("knowledge_base.uploads", upload)?;
        }
        Ok(())
    }

    /// 給 --dry-run 與啟動時顯示的摘要，金鑰遮蔽
    pub fn summary(&self) -> Vec<String> {
        vec![
            format!("Agent: {}", self.agent.name),
            format!("LLM: {} @ {}", self.llm.model, self.llm.endpoint),
            format!(
                "  temperature={}, max_tokens={}, key={}",
                self.llm.temperature,
                self.llm.max_tokens,
                mask_secret(&self.llm.api_key)
            ),
            format!(
                "Search: {} (max_results={}, depth={}, key={})",
                self.search.endpoint,
                self.search.max_results,
                self.search.search_depth,
                mask_secret(&self.search.api_key)
            ),
            format!(
                "Retrieval: top_k={}, chunk_size={}, chunk_overlap={}, dims={}",
                self.retrieval.top_k,
                self.retrieval.chunk_size,
                self.retrieval.chunk_overlap,
                self.retrieval.embedding_dimensions
            ),
            format!(
                "Knowledge base: samples={}, uploads={}",
                self.knowledge_base.include_samples,
                self.knowledge_base.uploads.len()
            ),
        ]
    }
}

pub type ConfiguredRag = AgenticRag<OpenAiCompatibleChat, TavilySearch, HashingEmbedder>;

impl RagConfig {
    pub fn chat_model(&self) -> Result<OpenAiCompatibleChat> {
        OpenAiCompatibleChat::groq(self.llm.api_key.clone())
            .with_endpoint(self.llm.endpoint.clone())
            .with_model(self.llm.model.clone())
            .with_temperature(self.llm.temperature)
            .with_max_tokens(self.llm.max_tokens)
            .with_timeout(Duration::from_secs(self.llm.timeout_seconds))
    }

    pub fn web_search(&self) -> TavilySearch {
        TavilySearch::new(self.search.api_key.clone())
            .with_endpoint(self.search.endpoint.clone())
            .with_max_results(self.search.max_results)
            .with_search_depth(self.search.search_depth.clone())
    }

    /// 依配置組出代理；include_samples 為 false 時知識庫從空白開始
    pub fn build_agent(&self) -> Result<ConfiguredRag> {
        let splitter = RecursiveCharacterSplitter::new(
            self.retrieval.chunk_size,
            self.retrieval.chunk_overlap,
        )?;
        let mut store = InMemoryVectorStore::new(
            HashingEmbedder::new(self.retrieval.embedding_dimensions),
            splitter,
        );
        if self.knowledge_base.include_samples {
            store.add_documents(&sample_documents());
        }
        Ok(
            AgenticRag::with_store(self.chat_model()?, self.web_search(), store)
                .with_top_k(self.retrieval.top_k),
        )
    }
}

impl Validate for RagConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
