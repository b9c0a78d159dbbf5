//! Complete question answering pipeline: Embed -> Retrieve -> Generate

use std::sync::Arc;

use tracing::debug;
use tracing::info;

use crate::config::AppConfig;
use crate::embeddings::EmbeddingClient;
use crate::errors::Result;
use crate::index::VectorIndexClient;
use crate::llm::ChatClient;
use crate::llm::ChatMessage;
use crate::rag::extract::NoopTextExtractor;
use crate::rag::extract::TextExtractor;
use crate::rag::links::format_links;
use crate::rag::links::Link;
use crate::rag::prompts;

/// Nearest neighbors requested per query
pub const RETRIEVAL_TOP_K: usize = 15;

/// Low temperature favors answers grounded in the excerpts
const ANSWER_TEMPERATURE: f32 = 0.2;

/// Token ceiling for the generated answer
const ANSWER_MAX_TOKENS: usize = 512;

/// One answered question: the generated answer plus source links derived
/// from the retrieval matches
#[derive(Debug, Clone)]
pub struct RagAnswer {
    pub answer: String,
    pub links: Vec<Link>,
}

/// Question answering service
///
/// Holds the long-lived provider clients; constructed once at startup and
/// shared read-only across requests.
pub struct RagService {
    embedding_client: Arc<EmbeddingClient>,
    index_client: Arc<VectorIndexClient>,
    chat_client: Arc<ChatClient>,
    text_extractor: Arc<dyn TextExtractor>,
}

impl RagService {
    /// Create a new service with clients built from configuration
    ///
    /// # Errors
    /// - HTTP client build errors (invalid configuration)
    pub fn new(config: &AppConfig) -> Result<Self> {
        Ok(Self::from_clients(
            Arc::new(EmbeddingClient::from_config(config)?),
            Arc::new(VectorIndexClient::from_config(config)?),
            Arc::new(ChatClient::from_config(config)?),
            Arc::new(NoopTextExtractor),
        ))
    }

    /// Create from existing clients
    #[must_use]
    pub fn from_clients(
        embedding_client: Arc<EmbeddingClient>,
        index_client: Arc<VectorIndexClient>,
        chat_client: Arc<ChatClient>,
        text_extractor: Arc<dyn TextExtractor>,
    ) -> Self {
        Self {
            embedding_client,
            index_client,
            chat_client,
            text_extractor,
        }
    }

    /// Answer a student question from indexed course materials
    ///
    /// The three provider calls are strictly sequential; each step consumes
    /// the previous step's output. No retries, no partial results.
    ///
    /// # Errors
    /// - Embedding generation errors (API failures, malformed responses)
    /// - Vector index query errors (API failures, malformed responses)
    /// - Answer generation errors (API failures, empty choices)
    pub async fn answer(&self, question: &str, image: Option<&str>) -> Result<RagAnswer> {
        info!("Processing question: {}", question);

        // Text extracted from an attached image augments the query that gets
        // embedded; the prompt keeps the question as the student wrote it.
        let mut query = question.to_string();
        if let Some(image) = image {
            if let Some(extracted) = self.text_extractor.extract(image)? {
                query.push_str("\n\n[Image text]\n");
                query.push_str(&extracted);
            }
        }

        debug!("Step 1: embedding query");
        let embedding = self.embedding_client.embed(&query).await?;

        debug!("Step 2: querying vector index");
        let matches = self
            .index_client
            .query(&embedding, RETRIEVAL_TOP_K, true)
            .await?;
        debug!("Retrieved {} matches", matches.len());

        let links = format_links(&matches);

        debug!("Step 3: generating answer");
        let prompt = prompts::build_prompt(question, &matches);
        let messages = vec![
            ChatMessage::system(prompts::SYSTEM_PROMPT),
            ChatMessage::user(prompt),
        ];
        let answer = self
            .chat_client
            .chat(messages, ANSWER_TEMPERATURE, ANSWER_MAX_TOKENS)
            .await?;

        info!("Question answered with {} source links", links.len());

        Ok(RagAnswer {
            answer: answer.trim().to_string(),
            links,
        })
    }
}
