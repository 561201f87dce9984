//! Query Gateway
//!
//! Server-side [`SearchGateway`] built on the web search and LLM provider
//! ports. Validates the query, calls the provider once, and normalizes the
//! answer. Provider failures come back as [`DomainError::Upstream`].

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::{extract_summary, AiSummary, DomainError, Query, SearchPage};
use crate::ports::{ChatMessage, CompletionOptions, LlmProvider, SearchGateway, WebSearchService};

/// Results requested from the search provider per query
pub const DEFAULT_RESULT_COUNT: usize = 10;

const SUMMARY_INSTRUCTIONS: &str = r#"You are an intelligent search assistant for Quantum Search Engine. Your role is to provide concise, helpful insights about search queries.

Follow these guidelines:
1. Provide a brief, engaging 2-3 sentence summary about the topic
2. Extract 3-5 key points or interesting facts
3. Be objective and factual
4. Keep responses under 150 words total
5. Focus on current, relevant information
6. Do not mention being an AI or language model
7. Respond in a helpful, conversational tone"#;

/// Build the summary prompt for a query.
///
/// The `Summary:` / `Key Points:` layout requested here is what
/// [`extract_summary`] looks for.
pub fn summary_prompt(query: &Query) -> Vec<ChatMessage> {
    vec![
        ChatMessage::system(SUMMARY_INSTRUCTIONS),
        ChatMessage::user(format!(
            "Provide insights about this search query: \"{}\"\n\nFormat your response as:\n\nSummary: [Your summary here]\n\nKey Points:\n- [Point 1]\n- [Point 2]\n- [Point 3]",
            query
        )),
    ]
}

/// Gateway over the provider ports
#[derive(Clone)]
pub struct QueryGateway {
    web_search: Arc<dyn WebSearchService>,
    llm: Arc<dyn LlmProvider>,
    result_count: usize,
}

impl QueryGateway {
    pub fn new(web_search: Arc<dyn WebSearchService>, llm: Arc<dyn LlmProvider>) -> Self {
        Self {
            web_search,
            llm,
            result_count: DEFAULT_RESULT_COUNT,
        }
    }

    /// Overrides how many results are requested from the provider
    pub fn with_result_count(mut self, result_count: usize) -> Self {
        self.result_count = result_count.max(1);
        self
    }
}

#[async_trait]
impl SearchGateway for QueryGateway {
    async fn fetch_search_results(&self, query: &str) -> Result<SearchPage, DomainError> {
        let query = Query::parse(query)?;

        let results = self
            .web_search
            .search(query.as_str(), self.result_count)
            .await
            .map_err(into_upstream)?;

        tracing::info!("🔍 Search: {} -> {} results", query, results.len());

        Ok(SearchPage::new(query.as_str(), results))
    }

    async fn fetch_ai_summary(&self, query: &str) -> Result<AiSummary, DomainError> {
        let query = Query::parse(query)?;

        let response = self
            .llm
            .complete(&summary_prompt(&query), &CompletionOptions::default())
            .await
            .map_err(into_upstream)?;

        if response.content.trim().is_empty() {
            return Err(DomainError::Upstream("No response from AI".to_string()));
        }

        let summary = extract_summary(&response.content);

        tracing::info!(
            "✨ Summary: {} -> {} key points ({}/{})",
            query,
            summary.key_points.len(),
            self.llm.provider_name(),
            self.llm.model_id()
        );

        Ok(summary)
    }
}

/// Anything a provider reports is an upstream failure from the caller's view
fn into_upstream(err: DomainError) -> DomainError {
    match err {
        DomainError::Upstream(_) => err,
        other => DomainError::Upstream(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::SearchResultItem;
    use crate::ports::CompletionResponse;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    struct FakeSearch {
        calls: AtomicUsize,
        last_limit: Mutex<Option<usize>>,
        fail_with: Option<String>,
    }

    impl FakeSearch {
        fn ok() -> Self {
            Self {
                calls: AtomicUsize::new(0),
                last_limit: Mutex::new(None),
                fail_with: None,
            }
        }

        fn failing(message: &str) -> Self {
            Self {
                fail_with: Some(message.to_string()),
                ..Self::ok()
            }
        }
    }

    #[async_trait]
    impl WebSearchService for FakeSearch {
        async fn search(
            &self,
            query: &str,
            limit: usize,
        ) -> Result<Vec<SearchResultItem>, DomainError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            *self.last_limit.lock().unwrap() = Some(limit);
            if let Some(message) = &self.fail_with {
                return Err(DomainError::Upstream(message.clone()));
            }
            Ok((0..3)
                .map(|rank| SearchResultItem {
                    url: format!("https://example.com/{rank}"),
                    title: format!("{query} #{rank}"),
                    snippet: "snippet".to_string(),
                    host_name: "example.com".to_string(),
                    rank,
                    published_date: None,
                })
                .collect())
        }
    }

    struct FakeLlm {
        calls: AtomicUsize,
        prompts: Mutex<Vec<Vec<ChatMessage>>>,
        reply: Result<String, DomainError>,
    }

    impl FakeLlm {
        fn replying(content: &str) -> Self {
            Self {
                calls: AtomicUsize::new(0),
                prompts: Mutex::new(Vec::new()),
                reply: Ok(content.to_string()),
            }
        }

        fn failing(err: DomainError) -> Self {
            Self {
                reply: Err(err),
                ..Self::replying("")
            }
        }
    }

    #[async_trait]
    impl LlmProvider for FakeLlm {
        async fn complete(
            &self,
            messages: &[ChatMessage],
            _options: &CompletionOptions,
        ) -> Result<CompletionResponse, DomainError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.prompts.lock().unwrap().push(messages.to_vec());
            self.reply.clone().map(|content| CompletionResponse {
                content,
                model: "fake-model".to_string(),
                ..Default::default()
            })
        }

        fn provider_name(&self) -> &str {
            "fake"
        }

        fn model_id(&self) -> &str {
            "fake-model"
        }
    }

    fn gateway(search: Arc<FakeSearch>, llm: Arc<FakeLlm>) -> QueryGateway {
        QueryGateway::new(search, llm)
    }

    #[tokio::test]
    async fn test_search_total_matches_results() {
        let search = Arc::new(FakeSearch::ok());
        let gw = gateway(search.clone(), Arc::new(FakeLlm::replying("x")));

        let page = gw.fetch_search_results("  rust  ").await.unwrap();

        assert_eq!(page.query, "rust");
        assert_eq!(page.total_results, page.results.len());
        assert_eq!(page.results[0].title, "rust #0");
        assert_eq!(*search.last_limit.lock().unwrap(), Some(DEFAULT_RESULT_COUNT));
    }

    #[tokio::test]
    async fn test_blank_query_rejected_before_provider() {
        let search = Arc::new(FakeSearch::ok());
        let llm = Arc::new(FakeLlm::replying("Summary: x"));
        let gw = gateway(search.clone(), llm.clone());

        for blank in ["", "   ", "\n\t"] {
            assert!(gw.fetch_search_results(blank).await.unwrap_err().is_validation());
            assert!(gw.fetch_ai_summary(blank).await.unwrap_err().is_validation());
        }

        assert_eq!(search.calls.load(Ordering::SeqCst), 0);
        assert_eq!(llm.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_search_failure_keeps_provider_text() {
        let gw = gateway(
            Arc::new(FakeSearch::failing("quota exceeded")),
            Arc::new(FakeLlm::replying("x")),
        );

        let err = gw.fetch_search_results("rust").await.unwrap_err();
        assert_eq!(err, DomainError::Upstream("quota exceeded".to_string()));
        assert_eq!(err.to_string(), "quota exceeded");
    }

    #[tokio::test]
    async fn test_summary_extracts_structure() {
        let llm = Arc::new(FakeLlm::replying(
            "Summary: Rust is fast.\n\nKey Points:\n- Safe\n- Fast\n- Fun",
        ));
        let gw = gateway(Arc::new(FakeSearch::ok()), llm.clone());

        let summary = gw.fetch_ai_summary("rust").await.unwrap();

        assert_eq!(summary.summary, "Rust is fast.");
        assert_eq!(summary.key_points, vec!["Safe", "Fast", "Fun"]);

        let prompts = llm.prompts.lock().unwrap();
        let user = &prompts[0][1];
        assert!(user.content.contains("\"rust\""));
        assert!(user.content.contains("Summary:"));
        assert!(user.content.contains("Key Points:"));
    }

    #[tokio::test]
    async fn test_summary_empty_completion_is_upstream_error() {
        let gw = gateway(Arc::new(FakeSearch::ok()), Arc::new(FakeLlm::replying("  \n ")));

        let err = gw.fetch_ai_summary("rust").await.unwrap_err();
        assert_eq!(err, DomainError::Upstream("No response from AI".to_string()));
    }

    #[tokio::test]
    async fn test_summary_provider_errors_become_upstream() {
        let gw = gateway(
            Arc::new(FakeSearch::ok()),
            Arc::new(FakeLlm::failing(DomainError::Persistence("odd".to_string()))),
        );

        let err = gw.fetch_ai_summary("rust").await.unwrap_err();
        assert!(matches!(err, DomainError::Upstream(_)));
    }

    #[tokio::test]
    async fn test_unstructured_summary_degrades() {
        let gw = gateway(
            Arc::new(FakeSearch::ok()),
            Arc::new(FakeLlm::replying("Just a plain answer.")),
        );

        let summary = gw.fetch_ai_summary("rust").await.unwrap();
        assert_eq!(summary.summary, "Just a plain answer.");
        assert!(summary.key_points.is_empty());
    }
}
