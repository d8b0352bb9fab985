use crate::application::use_cases::extraction::{ExtractionInput, ExtractionUseCase};
use crate::application::use_cases::query::QueryUseCase;
use crate::domain::document::ExtractedDocument;
use crate::domain::error::{AppError, Result};
use crate::domain::history::{HistoryEntry, HistoryStore};
use crate::domain::llm_config::LLMConfig;
use crate::domain::usage_stats::UsageStats;
use serde::Serialize;
use std::sync::{Mutex, MutexGuard, PoisonError};
use tracing::info;

/// Everything one user session accumulates.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SessionState {
    current_document: Option<ExtractedDocument>,
    history: HistoryStore,
    usage: UsageStats,
}

impl SessionState {
    pub fn current_document(&self) -> Option<&ExtractedDocument> {
        self.current_document.as_ref()
    }

    pub fn history(&self) -> &HistoryStore {
        &self.history
    }

    pub fn usage(&self) -> &UsageStats {
        &self.usage
    }

    /// Replace the current document and count the extraction.
    pub fn record_extraction(&mut self, document: ExtractedDocument) {
        self.usage.record_extraction(document.source_kind);
        self.current_document = Some(document);
    }

    /// Log an answered question against the current document's kind.
    pub fn record_answer(&mut self, query: String, answer: String) -> Result<HistoryEntry> {
        let kind = self
            .current_document
            .as_ref()
            .map(|document| document.source_kind)
            .ok_or(AppError::NoDocument)?;

        let entry = HistoryEntry::new(query, answer, kind);
        self.history.append(entry.clone());
        self.usage.record_query();
        Ok(entry)
    }

    /// Clear history and usage counters together. The current document stays.
    pub fn reset(&mut self) {
        self.history.clear();
        self.usage = UsageStats::default();
    }
}

/// One user's session: extraction and querying over a shared state.
pub struct DocumentSession {
    extraction: ExtractionUseCase,
    query: QueryUseCase,
    state: Mutex<SessionState>,
    llm_config: Mutex<LLMConfig>,
}

impl DocumentSession {
    pub fn new(extraction: ExtractionUseCase, query: QueryUseCase, llm_config: LLMConfig) -> Self {
        Self {
            extraction,
            query,
            state: Mutex::new(SessionState::default()),
            llm_config: Mutex::new(llm_config),
        }
    }

    fn state(&self) -> MutexGuard<'_, SessionState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn config(&self) -> MutexGuard<'_, LLMConfig> {
        self.llm_config.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub async fn process(&self, input: ExtractionInput) -> Result<ExtractedDocument> {
        let document = self.extraction.extract(input).await?;
        self.state().record_extraction(document.clone());
        Ok(document)
    }

    pub async fn analyze(&self, question: &str) -> Result<HistoryEntry> {
        let document = self
            .state()
            .current_document()
            .cloned()
            .ok_or(AppError::NoDocument)?;
        let config = self.config().clone();

        // The lock is released while the model is being queried
        let answer = self.query.ask(&config, &document, question).await?;

        let entry = self.state().record_answer(question.to_string(), answer)?;
        info!(kind = %entry.source_kind, "Recorded analysis");
        Ok(entry)
    }

    /// Set the session's API key; `None` or a blank key clears it.
    pub fn set_api_key(&self, api_key: Option<String>) {
        let api_key = api_key.filter(|key| !key.trim().is_empty());
        info!(configured = api_key.is_some(), "API key updated");
        self.config().api_key = api_key;
    }

    pub fn has_api_key(&self) -> bool {
        self.config().api_key().is_some()
    }

    pub fn current_document(&self) -> Option<ExtractedDocument> {
        self.state().current_document().cloned()
    }

    pub fn history(&self) -> Vec<HistoryEntry> {
        self.state().history().all().to_vec()
    }

    pub fn usage(&self) -> UsageStats {
        self.state().usage().clone()
    }

    pub fn snapshot(&self) -> SessionState {
        self.state().clone()
    }

    pub fn reset(&self) {
        self.state().reset();
        info!("Usage statistics and history reset");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::use_cases::query::tests::{keyed_config, StubClient};
    use crate::domain::document::{SourceKind, METRIC_WORDS};
    use crate::infrastructure::config::FetchConfig;
    use std::sync::atomic::Ordering;
    use std::sync::Arc;

    fn session_with(stub: Arc<StubClient>, config: LLMConfig) -> DocumentSession {
        DocumentSession::new(
            ExtractionUseCase::new(&FetchConfig::default()).unwrap(),
            QueryUseCase::new(stub),
            config,
        )
    }

    #[tokio::test]
    async fn test_hello_world_scenario() {
        let stub = StubClient::replying(Ok("A greeting.".to_string()));
        let session = session_with(stub, keyed_config());

        let document = session
            .process(ExtractionInput::Text("Hello world".to_string()))
            .await
            .unwrap();
        assert_eq!(document.text, "Hello world");
        assert_eq!(document.metric(METRIC_WORDS), Some(2));

        let entry = session.analyze("What does this say?").await.unwrap();

        let history = session.history();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0], entry);
        assert_eq!(history[0].query, "What does this say?");
        assert_eq!(history[0].answer, "A greeting.");
        assert_eq!(history[0].source_kind, SourceKind::Text);

        let usage = session.usage();
        assert_eq!(usage.total_processed, 1);
        assert_eq!(usage.successful_queries, 1);
        assert_eq!(usage.count_for(SourceKind::Text), 1);
    }

    #[tokio::test]
    async fn test_analyze_without_document() {
        let stub = StubClient::replying(Ok("unused".to_string()));
        let session = session_with(stub.clone(), keyed_config());

        let err = session.analyze("anything").await.unwrap_err();
        assert_eq!(err, AppError::NoDocument);
        assert_eq!(stub.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_failed_query_records_nothing() {
        let stub = StubClient::replying(Err(AppError::UpstreamError("down".to_string())));
        let session = session_with(stub, keyed_config());
        session
            .process(ExtractionInput::Text("doc".to_string()))
            .await
            .unwrap();

        assert!(session.analyze("q").await.is_err());
        assert!(session.history().is_empty());
        assert_eq!(session.usage().successful_queries, 0);
    }

    #[tokio::test]
    async fn test_api_key_set_and_cleared() {
        let stub = StubClient::replying(Ok("ok".to_string()));
        let session = session_with(stub.clone(), LLMConfig::default());
        session
            .process(ExtractionInput::Text("doc".to_string()))
            .await
            .unwrap();

        assert_eq!(
            session.analyze("q").await.unwrap_err(),
            AppError::MissingApiKey
        );

        session.set_api_key(Some("key".to_string()));
        assert!(session.has_api_key());
        assert!(session.analyze("q").await.is_ok());

        session.set_api_key(Some("  ".to_string()));
        assert!(!session.has_api_key());
        assert_eq!(stub.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_new_extraction_replaces_document() {
        let stub = StubClient::replying(Ok("ok".to_string()));
        let session = session_with(stub, keyed_config());

        session
            .process(ExtractionInput::Text("first".to_string()))
            .await
            .unwrap();
        session
            .process(ExtractionInput::Csv(b"a\n1\n".to_vec()))
            .await
            .unwrap();

        let current = session.current_document().unwrap();
        assert_eq!(current.source_kind, SourceKind::Csv);
        assert_eq!(session.usage().total_processed, 2);
    }

    #[tokio::test]
    async fn test_failed_extraction_keeps_previous_document() {
        let stub = StubClient::replying(Ok("ok".to_string()));
        let session = session_with(stub, keyed_config());
        session
            .process(ExtractionInput::Text("keep me".to_string()))
            .await
            .unwrap();

        assert!(session.process(ExtractionInput::Text(String::new())).await.is_err());

        assert_eq!(session.current_document().unwrap().text, "keep me");
        assert_eq!(session.usage().total_processed, 1);
    }

    #[tokio::test]
    async fn test_reset_clears_history_and_stats_together() {
        let stub = StubClient::replying(Ok("ok".to_string()));
        let session = session_with(stub, keyed_config());
        session
            .process(ExtractionInput::Text("doc".to_string()))
            .await
            .unwrap();
        session.analyze("q1").await.unwrap();
        session.analyze("q2").await.unwrap();

        session.reset();

        let snapshot = session.snapshot();
        assert!(snapshot.history().is_empty());
        assert!(snapshot.usage().is_zeroed());
        assert!(snapshot.current_document().is_some());
    }
}
