use serde::{Deserialize, Serialize};

/// 文件來源類型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    KnowledgeBase,
    UserUpload,
    WebSearch,
}

impl SourceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceKind::KnowledgeBase => "knowledge_base",
            SourceKind::UserUpload => "user_upload",
            SourceKind::WebSearch => "web_search",
        }
    }
}

impl std::fmt::Display for SourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 知識庫中的一份文件（或切分後的片段）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub title: String,
    pub content: String,
    pub kind: SourceKind,
}

impl Document {
    pub fn new(title: impl Into<String>, content: impl Into<String>, kind: SourceKind) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            kind,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WebResult {
    pub title: String,
    pub url: String,
    pub content: String,
}

/// 回答所引用的來源
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Source {
    pub title: String,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    pub kind: SourceKind,
}

impl From<&Document> for Source {
    fn from(doc: &Document) -> Self {
        Self {
            title: doc.title.clone(),
            content: doc.content.clone(),
            url: None,
            kind: doc.kind,
        }
    }
}

impl From<&WebResult> for Source {
    fn from(result: &WebResult) -> Self {
        Self {
            title: result.title.clone(),
            content: result.content.clone(),
            url: Some(result.url.clone()),
            kind: SourceKind::WebSearch,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

/// 在工作流程各節點之間傳遞的狀態
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AgentState {
    pub query: String,
    pub reasoning: String,
    pub retrieved_docs: Vec<Document>,
    pub web_results: Vec<WebResult>,
    pub needs_web_search: bool,
    pub final_answer: String,
    pub sources: Vec<Source>,
    pub steps: Vec<String>,
}

impl AgentState {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..Self::default()
        }
    }
}

/// 一次查詢的結果
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueryResult {
    pub answer: String,
    pub sources: Vec<Source>,
    pub reasoning_steps: Vec<String>,
}

impl From<AgentState> for QueryResult {
    fn from(state: AgentState) -> Self {
        Self {
            answer: state.final_answer,
            sources: state.sources,
            reasoning_steps: state.steps,
        }
    }
}
