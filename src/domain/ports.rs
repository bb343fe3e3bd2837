use crate::domain::model::{AgentState, ChatMessage, WebResult};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

/// 對話式語言模型
#[async_trait]
pub trait ChatModel: Send + Sync {
    async fn complete(&self, messages: &[ChatMessage]) -> Result<String>;
}

/// 網路搜尋服務
#[async_trait]
pub trait WebSearch: Send + Sync {
    async fn search(&self, query: &str) -> Result<Vec<WebResult>>;
}

/// 將文字轉成向量
pub trait Embedder: Send + Sync {
    fn embed(&self, text: &str) -> Vec<f32>;
}

/// 工作流程在 retrieve 之後的分支
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    WebSearch,
    Synthesize,
}

#[async_trait]
pub trait Workflow: Send + Sync {
    async fn reason(&self, state: AgentState) -> Result<AgentState>;
    async fn retrieve(&self, state: AgentState) -> Result<AgentState>;
    fn route(&self, state: &AgentState) -> Route;
    async fn web_search(&self, state: AgentState) -> Result<AgentState>;
    async fn synthesize(&self, state: AgentState) -> Result<AgentState>;
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::Storage;
    use crate::utils::error::{DrillError, Result};
    use std::collections::HashMap;
    use std::sync::Arc;
    use tokio::sync::Mutex;

    /// 記憶體內的檔案儲存
    #[derive(Clone, Default)]
    pub struct MockStorage {
        files: Arc<Mutex<HashMap<String, Vec<u8>>>>,
    }

    impl MockStorage {
        pub fn new() -> Self {
            Self::default()
        }

        pub async fn put(&self, path: &str, data: &[u8]) {
            self.files.lock().await.insert(path.to_string(), data.to_vec());
        }

        pub async fn get_file(&self, path: &str) -> Option<Vec<u8>> {
            self.files.lock().await.get(path).cloned()
        }
    }

    impl Storage for MockStorage {
        async fn read_file(&self, path: &str) -> Result<Vec<u8>> {
            let files = self.files.lock().await;
            files.get(path).cloned().ok_or_else(|| {
                DrillError::IoError(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    format!("File not found: {}", path),
                ))
            })
        }

        async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
            self.files
                .lock()
                .await
                .insert(path.to_string(), data.to_vec());
            Ok(())
        }
    }
}
