use crate::domain::document::ExtractedDocument;
use crate::domain::error::{AppError, Result};
use crate::domain::llm_config::LLMConfig;
use crate::infrastructure::llm_clients::LLMClient;
use std::sync::Arc;
use tracing::info;

/// The whole document goes into one prompt. Nothing is chunked or truncated,
/// so very large documents can exceed the model's context window.
pub fn build_prompt(document_text: &str, question: &str) -> String {
    format!(
        "Based on the following content, provide a detailed and accurate answer to the question.\n\
         Content: {}\n\
         Question: {}\n\
         Please provide a clear and concise answer based only on the provided content.",
        document_text, question
    )
}

pub struct QueryUseCase {
    llm_client: Arc<dyn LLMClient + Send + Sync>,
}

impl QueryUseCase {
    pub fn new(llm_client: Arc<dyn LLMClient + Send + Sync>) -> Self {
        Self { llm_client }
    }

    /// Ask `question` about `document`; the model's reply is returned as-is.
    pub async fn ask(
        &self,
        config: &LLMConfig,
        document: &ExtractedDocument,
        question: &str,
    ) -> Result<String> {
        if config.api_key().is_none() {
            return Err(AppError::MissingApiKey);
        }

        let prompt = build_prompt(&document.text, question);
        info!(
            model = %config.model,
            kind = %document.source_kind,
            prompt_chars = prompt.len(),
            "Querying model"
        );

        self.llm_client.generate(config, &prompt).await
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::domain::document::SourceKind;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    /// Canned backend that records every prompt it receives.
    pub(crate) struct StubClient {
        reply: Result<String>,
        pub(crate) calls: AtomicUsize,
        pub(crate) prompts: Mutex<Vec<String>>,
    }

    impl StubClient {
        pub(crate) fn replying(reply: Result<String>) -> Arc<Self> {
            Arc::new(Self {
                reply,
                calls: AtomicUsize::new(0),
                prompts: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl LLMClient for StubClient {
        async fn generate(&self, _config: &LLMConfig, prompt: &str) -> Result<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.prompts.lock().unwrap().push(prompt.to_string());
            self.reply.clone()
        }
    }

    pub(crate) fn keyed_config() -> LLMConfig {
        LLMConfig {
            api_key: Some("test-key".to_string()),
            ..LLMConfig::default()
        }
    }

    fn document(text: &str) -> ExtractedDocument {
        ExtractedDocument::new(text.to_string(), SourceKind::Text)
    }

    #[test]
    fn test_prompt_embeds_text_and_question_verbatim() {
        let prompt = build_prompt("line one\nline two", "What?");
        assert!(prompt.contains("Content: line one\nline two\n"));
        assert!(prompt.contains("Question: What?\n"));
        assert!(prompt.starts_with("Based on the following content"));
    }

    #[tokio::test]
    async fn test_ask_returns_reply_unmodified() {
        let stub = StubClient::replying(Ok("  A greeting.\n".to_string()));
        let use_case = QueryUseCase::new(stub.clone());

        let answer = use_case
            .ask(&keyed_config(), &document("Hello world"), "What does this say?")
            .await
            .unwrap();

        assert_eq!(answer, "  A greeting.\n");
        let prompts = stub.prompts.lock().unwrap();
        assert!(prompts[0].contains("Hello world"));
        assert!(prompts[0].contains("What does this say?"));
    }

    #[tokio::test]
    async fn test_ask_without_key_never_calls_backend() {
        let stub = StubClient::replying(Ok("unused".to_string()));
        let use_case = QueryUseCase::new(stub.clone());

        for api_key in [None, Some(String::new()), Some("   ".to_string())] {
            let config = LLMConfig {
                api_key,
                ..LLMConfig::default()
            };
            let err = use_case
                .ask(&config, &document("text"), "q")
                .await
                .unwrap_err();
            assert_eq!(err, AppError::MissingApiKey);
        }

        assert_eq!(stub.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_ask_propagates_upstream_error() {
        let stub = StubClient::replying(Err(AppError::UpstreamError("boom".to_string())));
        let use_case = QueryUseCase::new(stub);

        let err = use_case
            .ask(&keyed_config(), &document("text"), "q")
            .await
            .unwrap_err();
        assert_eq!(err, AppError::UpstreamError("boom".to_string()));
    }
}
