use crate::domain::model::Document;
use crate::utils::error::{DrillError, Result};

pub const DEFAULT_CHUNK_SIZE: usize = 500;
pub const DEFAULT_CHUNK_OVERLAP: usize = 50;
pub const DEFAULT_SEPARATORS: [&str; 4] = ["\n\n", "\n", " ", ""];

fn char_len(s: &str) -> usize {
    s.chars().count()
}

/// 依分隔符號由粗到細遞迴切分文字，片段長度以字元計
#[derive(Debug, Clone)]
pub struct RecursiveCharacterSplitter {
    chunk_size: usize,
    chunk_overlap: usize,
    separators: Vec<String>,
}

impl Default for RecursiveCharacterSplitter {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            chunk_overlap: DEFAULT_CHUNK_OVERLAP,
            separators: DEFAULT_SEPARATORS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl RecursiveCharacterSplitter {
    pub fn new(chunk_size: usize, chunk_overlap: usize) -> Result<Self> {
        if chunk_size == 0 {
            return Err(DrillError::InvalidConfigValueError {
                field: "chunk_size".to_string(),
                value: chunk_size.to_string(),
                reason: "must be greater than 0".to_string(),
            });
        }
        if chunk_overlap >= chunk_size {
            return Err(DrillError::InvalidConfigValueError {
                field: "chunk_overlap".to_string(),
                value: chunk_overlap.to_string(),
                reason: format!("must be smaller than chunk_size ({})", chunk_size),
            });
        }
        Ok(Self {
            chunk_size,
            chunk_overlap,
            ..Self::default()
        })
    }

    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    pub fn chunk_overlap(&self) -> usize {
        self.chunk_overlap
    }

    pub fn split_text(&self, text: &str) -> Vec<String> {
        self.split_with(text, &self.separators)
    }

    /// 每個片段沿用原文件的標題與來源類型
    pub fn split_documents(&self, docs: &[Document]) -> Vec<Document> {
        docs.iter()
            .flat_map(|doc| {
                self.split_text(&doc.content)
                    .into_iter()
                    .map(move |chunk| Document::new(doc.title.clone(), chunk, doc.kind))
            })
            .collect()
    }

    fn split_with(&self, text: &str, separators: &[String]) -> Vec<String> {
        // 選第一個出現在文字中的分隔符號，空字串代表逐字切
        let mut separator = separators.last().map(String::as_str).unwrap_or("");
        let mut finer: &[String] = &[];
        for (i, sep) in separators.iter().enumerate() {
            if sep.is_empty() {
                separator = "";
                break;
            }
            if text.contains(sep.as_str()) {
                separator = sep.as_str();
                finer = &separators[i + 1..];
                break;
            }
        }

        let splits: Vec<String> = if separator.is_empty() {
            text.chars().map(String::from).collect()
        } else {
            text.split(separator)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect()
        };

        let mut chunks = Vec::new();
        let mut pending: Vec<String> = Vec::new();
        for piece in splits {
            if char_len(&piece) < self.chunk_size {
                pending.push(piece);
                continue;
            }
            if !pending.is_empty() {
                chunks.extend(self.merge(&pending, separator));
                pending.clear();
            }
            if finer.is_empty() {
                chunks.push(piece);
            } else {
                chunks.extend(self.split_with(&piece, finer));
            }
        }
        if !pending.is_empty() {
            chunks.extend(self.merge(&pending, separator));
        }
        chunks
    }

    /// 把小片段合併到 chunk_size 以內，並保留最多 chunk_overlap 的重疊
    fn merge(&self, splits: &[String], separator: &str) -> Vec<String> {
        let sep_len = char_len(separator);
        let mut chunks = Vec::new();
        let mut window: Vec<&str> = Vec::new();
        let mut total = 0usize;

        for piece in splits {
            let len = char_len(piece);
            let joiner = if window.is_empty() { 0 } else { sep_len };
            if total + len + joiner > self.chunk_size && !window.is_empty() {
                let chunk = window.join(separator).trim().to_string();
                if !chunk.is_empty() {
                    chunks.push(chunk);
                }
                while !window.is_empty()
                    && (total > self.chunk_overlap || total + len + sep_len > self.chunk_size)
                {
                    let trailing = if window.len() > 1 { sep_len } else { 0 };
                    total = total.saturating_sub(char_len(window[0]) + trailing);
                    window.remove(0);
                }
            }
            let joiner = if window.is_empty() { 0 } else { sep_len };
            window.push(piece);
            total += len + joiner;
        }

        let chunk = window.join(separator).trim().to_string();
        if !chunk.is_empty() {
            chunks.push(chunk);
        }
        chunks
    }
}
