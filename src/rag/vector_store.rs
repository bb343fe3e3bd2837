use crate::domain::model::Document;
use crate::domain::ports::Embedder;
use crate::rag::splitter::RecursiveCharacterSplitter;
use crate::utils::stop_words::is_stop_word;

pub const EMBEDDING_DIMENSIONS: usize = 384;

const FNV_OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

fn fnv1a(token: &str) -> u64 {
    token.bytes().fold(FNV_OFFSET, |hash, byte| {
        (hash ^ u64::from(byte)).wrapping_mul(FNV_PRIME)
    })
}

/// 詞袋特徵雜湊：小寫英數字詞，去除停用詞後做 L2 正規化
#[derive(Debug, Clone)]
pub struct HashingEmbedder {
    dimensions: usize,
}

impl Default for HashingEmbedder {
    fn default() -> Self {
        Self::new(EMBEDDING_DIMENSIONS)
    }
}

impl HashingEmbedder {
    pub fn new(dimensions: usize) -> Self {
        Self {
            dimensions: dimensions.max(1),
        }
    }

    pub fn dimensions(&self) -> usize {
        self.dimensions
    }

    pub fn tokenize(text: &str) -> Vec<String> {
        text.to_lowercase()
            .split(|c: char| !c.is_alphanumeric())
            .filter(|t| !t.is_empty() && !is_stop_word(t))
            .map(str::to_string)
            .collect()
    }
}

impl Embedder for HashingEmbedder {
    fn embed(&self, text: &str) -> Vec<f32> {
        let mut vector = vec![0.0f32; self.dimensions];
        for token in Self::tokenize(text) {
            let bucket = (fnv1a(&token) % self.dimensions as u64) as usize;
            vector[bucket] += 1.0;
        }

        let norm = vector.iter().map(|v| v * v).sum::<f32>().sqrt();
        if norm > 0.0 {
            vector.iter_mut().for_each(|v| *v /= norm);
        }
        vector
    }
}

/// 餘弦相似度；任一向量為零時回傳 0
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let dot: f32 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let norm_a = a.iter().map(|v| v * v).sum::<f32>().sqrt();
    let norm_b = b.iter().map(|v| v * v).sum::<f32>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a * norm_b)
}

struct Entry {
    document: Document,
    vector: Vec<f32>,
}

pub struct InMemoryVectorStore<E: Embedder> {
    embedder: E,
    splitter: RecursiveCharacterSplitter,
    entries: Vec<Entry>,
}

impl<E: Embedder> InMemoryVectorStore<E> {
    pub fn new(embedder: E, splitter: RecursiveCharacterSplitter) -> Self {
        Self {
            embedder,
            splitter,
            entries: Vec::new(),
        }
    }

    pub fn from_documents(docs: &[Document], embedder: E) -> Self {
        let mut store = Self::new(embedder, RecursiveCharacterSplitter::default());
        store.add_documents(docs);
        store
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 切分後逐段嵌入，回傳新增的片段數
    pub fn add_documents(&mut self, docs: &[Document]) -> usize {
        let chunks = self.splitter.split_documents(docs);
        let added = chunks.len();
        for document in chunks {
            let vector = self.embedder.embed(&document.content);
            self.entries.push(Entry { document, vector });
        }
        tracing::debug!(
            "📥 Indexed {} chunks from {} documents ({} total)",
            added,
            docs.len(),
            self.entries.len()
        );
        added
    }

    pub fn similarity_search_with_score(&self, query: &str, k: usize) -> Vec<(Document, f32)> {
        let query_vector = self.embedder.embed(query);
        let mut scored: Vec<(usize, f32)> = self
            .entries
            .iter()
            .enumerate()
            .map(|(i, entry)| (i, cosine_similarity(&query_vector, &entry.vector)))
            .collect();
        // 穩定排序，同分時維持加入順序
        scored.sort_by(|a, b| b.1.total_cmp(&a.1));

        scored
            .into_iter()
            .take(k)
            .map(|(i, score)| (self.entries[i].document.clone(), score))
            .collect()
    }

    pub fn similarity_search(&self, query: &str, k: usize) -> Vec<Document> {
        self.similarity_search_with_score(query, k)
            .into_iter()
            .map(|(doc, _)| doc)
            .collect()
    }
}
