use crate::domain::model::{Document, SourceKind};

const SAMPLES: [(&str, &str); 5] = [
    (
        "RAG Overview",
        "Retrieval-Augmented Generation (RAG) is a technique that combines the power of
large language models with external knowledge retrieval. RAG systems first retrieve
relevant documents from a knowledge base, then use these documents as context for
the LLM to generate accurate, grounded responses. Key benefits include:
reduced hallucinations, access to up-to-date information, transparent sourcing,
and cost-effectiveness compared to fine-tuning.",
    ),
    (
        "Agentic RAG Concepts",
        "Agentic RAG extends traditional RAG by adding reasoning and decision-making capabilities.
Instead of simply retrieving and generating, agentic systems can:
plan multi-step retrieval strategies, decide when to search the web vs. local knowledge,
self-correct and refine answers, and use tools like calculators and APIs.
The key insight is treating the LLM as an agent that orchestrates information gathering.",
    ),
    (
        "LangGraph Introduction",
        "LangGraph is a library for building stateful, multi-actor applications with LLMs.
It extends LangChain with graph-based workflows where nodes represent computation steps,
edges define the flow between nodes, state is passed and updated through the graph,
and cycles and conditionals enable complex reasoning patterns.
LangGraph is ideal for building agents, chatbots, and agentic RAG systems.",
    ),
    (
        "Groq LLM Platform",
        "Groq provides ultra-fast LLM inference through their custom LPU (Language Processing Unit).
Key features include sub-second response times, support for Llama and Mixtral models,
simple API compatible with OpenAI format, and suitability for real-time applications.
Groq's speed makes it excellent for agentic systems requiring multiple LLM calls.",
    ),
    (
        "Tavily Search API",
        "Tavily is a search API designed specifically for AI agents and RAG applications.
Unlike traditional search APIs, Tavily returns clean parsed content ready for LLM consumption,
includes relevance scoring, supports different search depths, and provides source URLs
and titles for attribution. It's commonly used as the web search tool in agentic RAG systems.",
    ),
];

/// 內建的五份知識庫文件
pub fn sample_documents() -> Vec<Document> {
    SAMPLES
        .iter()
        .map(|(title, content)| Document::new(*title, *content, SourceKind::KnowledgeBase))
        .collect()
}

/// 使用者上傳的文字；缺少標題時使用 "Document {n}"
pub fn uploaded(texts: &[String], titles: &[String]) -> Vec<Document> {
    texts
        .iter()
        .enumerate()
        .map(|(i, text)| {
            let title = titles
                .get(i)
                .cloned()
                .unwrap_or_else(|| format!("Document {}", i + 1));
            Document::new(title, text.as_str(), SourceKind::UserUpload)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_documents() {
        let docs = sample_documents();
        let titles: Vec<&str> = docs.iter().map(|d| d.title.as_str()).collect();
        assert_eq!(
            titles,
            vec![
                "RAG Overview",
                "Agentic RAG Concepts",
                "LangGraph Introduction",
                "Groq LLM Platform",
                "Tavily Search API",
            ]
        );
        assert!(docs.iter().all(|d| d.kind == SourceKind::KnowledgeBase));
        assert!(docs[3].content.contains("LPU"));
    }

    #[test]
    fn test_uploaded_fills_missing_titles() {
        let texts = vec!["a".to_string(), "b".to_string(), "c".to_string()];
        let titles = vec!["Notes".to_string()];
        let docs = uploaded(&texts, &titles);

        let titles: Vec<&str> = docs.iter().map(|d| d.title.as_str()).collect();
        assert_eq!(titles, vec!["Notes", "Document 2", "Document 3"]);
        assert!(docs.iter().all(|d| d.kind == SourceKind::UserUpload));
        assert_eq!(docs[2].content, "c");
    }
}
