use crate::core::{AgentState, QueryResult, Route, Workflow};
use crate::utils::error::Result;
use std::time::Instant;

/// 依序執行 reason → retrieve → (web_search) → synthesize
pub struct AgentEngine<W: Workflow> {
    workflow: W,
}

impl<W: Workflow> AgentEngine<W> {
    pub fn new(workflow: W) -> Self {
        Self { workflow }
    }

    pub fn workflow(&self) -> &W {
        &self.workflow
    }

    pub fn workflow_mut(&mut self) -> &mut W {
        &mut self.workflow
    }

    /// 執行整個工作流程並回傳最終狀態
    pub async fn run(&self, question: &str) -> Result<AgentState> {
        let started = Instant::now();
        tracing::debug!("🚀 Starting agent workflow for: {}", question);

        let state = AgentState::new(question);

        // Reason
        let state = self.workflow.reason(state).await?;
        tracing::debug!(
            "🧠 Reasoning complete (web search requested: {})",
            state.needs_web_search
        );

        // Retrieve
        let state = self.workflow.retrieve(state).await?;
        tracing::debug!("📚 Retrieved {} documents", state.retrieved_docs.len());

        // 條件分支
        let state = match self.workflow.route(&state) {
            Route::WebSearch => {
                tracing::debug!("🌐 Routing to web search");
                self.workflow.web_search(state).await?
            }
            Route::Synthesize => state,
        };

        // Synthesize
        let state = self.workflow.synthesize(state).await?;
        tracing::info!(
            "✅ Query answered with {} sources in {:?}",
            state.sources.len(),
            started.elapsed()
        );

        Ok(state)
    }

    /// 執行查詢；任何錯誤都轉成錯誤回答而不往外傳
    pub async fn query(&self, question: &str) -> QueryResult {
        match self.run(question).await {
            Ok(state) => state.into(),
            Err(e) => {
                tracing::error!(
                    "❌ Query failed: {} (Category: {:?}, Severity: {:?})",
                    e,
                    e.category(),
                    e.severity()
                );
                QueryResult {
                    answer: format!("Error processing query: {}", e),
                    sources: Vec::new(),
                    reasoning_steps: vec![format!("❌ Error: {}", e)],
                }
            }
        }
    }
}
