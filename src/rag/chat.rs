use crate::config::rag_config::DisplayConfig;
use crate::core::engine::AgentEngine;
use crate::core::{ChatModel, Embedder, QueryResult, Storage, WebSearch};
use crate::rag::agent::AgenticRag;
use crate::utils::error::Result;
use crate::utils::prompt::Prompter;
use std::io::{BufRead, Write};

pub const EXIT_COMMANDS: [&str; 3] = ["quit", "exit", "q"];
const UPLOAD_COMMAND: &str = ":upload";

/// 互動式問答迴圈，直到輸入離開指令或 EOF
pub async fn chat_session<R, W, M, S, E, St>(
    prompter: &mut Prompter<R, W>,
    engine: &mut AgentEngine<AgenticRag<M, S, E>>,
    storage: &St,
    display: &DisplayConfig,
) -> Result<()>
where
    R: BufRead,
    W: Write,
    M: ChatModel,
    S: WebSearch,
    E: Embedder,
    St: Storage,
{
    prompter.say("💬 Ask a question (':upload <path>' adds a file, 'quit' to leave)")?;

    while let Some(line) = prompter.ask("\nYou: ")? {
        let question = line.trim();
        if question.is_empty() {
            continue;
        }
        if EXIT_COMMANDS.contains(&question.to_lowercase().as_str()) {
            break;
        }

        if let Some(path) = question.strip_prefix(UPLOAD_COMMAND) {
            let path = path.trim();
            if path.is_empty() {
                prompter.say("Usage: :upload <path>")?;
                continue;
            }
            match engine
                .workflow_mut()
                .add_files(storage, &[path.to_string()])
                .await
            {
                Ok(chunks) => prompter.say(format!("📄 Added {} ({} chunks)", path, chunks))?,
                Err(e) => {
                    tracing::warn!("⚠️ Upload of {} failed: {}", path, e);
                    prompter.say(format!("❌ {}", e.user_friendly_message()))?
                }
            }
            continue;
        }

        prompter.say("🤔 Thinking...")?;
        let result = engine.query(question).await;
        for line in render_answer(&result, display) {
            prompter.say(line)?;
        }
    }

    prompter.say("👋 Goodbye!")?;
    Ok(())
}

pub fn render_answer(result: &QueryResult, display: &DisplayConfig) -> Vec<String> {
    let mut lines = vec![format!("\nAssistant: {}", result.answer)];

    if display.show_sources && !result.sources.is_empty() {
        lines.push("\n📚 Sources:".to_string());
        for (i, source) in result.sources.iter().enumerate() {
            match &source.url {
                Some(url) => lines.push(format!("  {}. {} ({})", i + 1, source.title, url)),
                None => lines.push(format!(
                    "  {}. {} [{}]",
                    i + 1,
                    source.title,
                    source.kind.as_str()
                )),
            }
        }
    }

    if display.show_steps {
        lines.push("\n🧭 Steps:".to_string());
        lines.extend(result.reasoning_steps.iter().map(|step| format!("  - {}", step)));
    }

    lines.push(format!(
        "[Sources: {} | Steps: {}]",
        result.sources.len(),
        result.reasoning_steps.len()
    ));
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{Source, SourceKind};

    fn sample_result() -> QueryResult {
        QueryResult {
            answer: "Ownership frees memory.".to_string(),
            sources: vec![
                Source {
                    title: "notes.txt".to_string(),
                    content: "Ownership rules".to_string(),
                    kind: SourceKind::UserUpload,
                    url: None,
                },
                Source {
                    title: "Rust blog".to_string(),
                    content: "Release notes".to_string(),
                    kind: SourceKind::WebSearch,
                    url: Some("https://blog.rust-lang.org".to_string()),
                },
            ],
            reasoning_steps: vec!["🧠 Reasoning: check notes".to_string()],
        }
    }

    #[test]
    fn test_render_answer_minimal() {
        let lines = render_answer(&sample_result(), &DisplayConfig::default());
        assert_eq!(
            lines,
            vec![
                "\nAssistant: Ownership frees memory.".to_string(),
                "[Sources: 2 | Steps: 1]".to_string(),
            ]
        );
    }

    #[test]
    fn test_render_answer_with_sources_and_steps() {
        let display = DisplayConfig {
            show_sources: true,
            show_steps: true,
        };
        let lines = render_answer(&sample_result(), &display);

        assert!(lines.contains(&"  1. notes.txt [user_upload]".to_string()));
        assert!(lines.contains(&"  2. Rust blog (https://blog.rust-lang.org)".to_string()));
        assert!(lines.contains(&"  - 🧠 Reasoning: check notes".to_string()));
        assert_eq!(lines.last().unwrap(), "[Sources: 2 | Steps: 1]");
    }
}
