//! Z.ai provider client
//!
//! Implements both provider ports against the Z.ai HTTP API:
//!
//! - `POST {base}/functions/invoke` with the `web_search` function
//! - `POST {base}/chat/completions` (OpenAI-style)
//!
//! Any non-success answer is reported as `DomainError::Upstream` carrying the
//! provider's own error text.

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;

use quantum_search::{
    ChatMessage, CompletionOptions, CompletionResponse, DomainError, LlmProvider,
    SearchResultItem, TokenUsage, WebSearchService,
};

const PROVIDER_NAME: &str = "zai";
const WEB_SEARCH_FUNCTION: &str = "web_search";

/// Connection settings for the provider
#[derive(Debug, Clone)]
pub struct ZaiConfig {
    pub base_url: String,
    pub api_key: String,
    pub model: Option<String>,
    /// Transport timeout for every request
    pub timeout: Duration,
}

/// HTTP client for the provider's search and chat APIs
#[derive(Clone)]
pub struct ZaiClient {
    client: Client,
    base_url: String,
    api_key: String,
    model: Option<String>,
}

impl ZaiClient {
    pub fn new(config: &ZaiConfig) -> Result<Self, DomainError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!("quantum-search/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| DomainError::Upstream(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            model: config.model.clone(),
        })
    }

    async fn post_json<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<Value, DomainError> {
        let url = format!("{}{}", self.base_url, path);

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(body)
            .send()
            .await
            .map_err(|e| DomainError::Upstream(format!("Request failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read error body".to_string());
            return Err(map_http_error(status, body));
        }

        response
            .json()
            .await
            .map_err(|e| DomainError::Upstream(format!("Parse error: {e}")))
    }
}

#[async_trait]
impl WebSearchService for ZaiClient {
    async fn search(
        &self,
        query: &str,
        limit: usize,
    ) -> Result<Vec<SearchResultItem>, DomainError> {
        let request = InvokeRequest {
            function_name: WEB_SEARCH_FUNCTION,
            arguments: WebSearchArguments { query, num: limit },
        };

        let payload = self.post_json("/functions/invoke", &request).await?;

        let raw: InvokeResponse = serde_json::from_value(payload)
            .map_err(|e| DomainError::Upstream(format!("Parse error: {e}")))?;

        Ok(raw
            .into_items()
            .into_iter()
            .filter(|item| !item.url.trim().is_empty())
            .take(limit)
            .enumerate()
            .map(|(index, item)| item.into_result(index))
            .collect())
    }
}

#[async_trait]
impl LlmProvider for ZaiClient {
    async fn complete(
        &self,
        messages: &[ChatMessage],
        options: &CompletionOptions,
    ) -> Result<CompletionResponse, DomainError> {
        let request = ChatRequest {
            model: self.model.as_deref(),
            messages,
            max_tokens: options.max_tokens,
            temperature: options.temperature,
            thinking: options.disable_thinking.then_some(Thinking { kind: "disabled" }),
        };

        let payload = self.post_json("/chat/completions", &request).await?;

        let raw: ChatResponse = serde_json::from_value(payload)
            .map_err(|e| DomainError::Upstream(format!("Parse error: {e}")))?;

        let choice = raw.choices.into_iter().next();
        let usage = raw.usage.unwrap_or_default();

        Ok(CompletionResponse {
            content: choice
                .as_ref()
                .and_then(|c| c.message.as_ref())
                .and_then(|m| m.content.clone())
                .unwrap_or_default(),
            model: raw.model.unwrap_or_else(|| self.model_id().to_string()),
            usage: TokenUsage {
                prompt_tokens: usage.prompt_tokens,
                completion_tokens: usage.completion_tokens,
                total_tokens: usage.total_tokens,
            },
            finish_reason: choice.and_then(|c| c.finish_reason),
        })
    }

    fn provider_name(&self) -> &str {
        PROVIDER_NAME
    }

    fn model_id(&self) -> &str {
        self.model.as_deref().unwrap_or("default")
    }
}

// ============================================
// Request/Response Types
// ============================================

#[derive(Serialize)]
struct InvokeRequest<'a> {
    function_name: &'a str,
    arguments: WebSearchArguments<'a>,
}

#[derive(Serialize)]
struct WebSearchArguments<'a> {
    query: &'a str,
    num: usize,
}

/// The function result is either the bare array or wrapped in `result`
#[derive(Deserialize)]
#[serde(untagged)]
enum InvokeResponse {
    Items(Vec<RawSearchItem>),
    Wrapped { result: Vec<RawSearchItem> },
}

impl InvokeResponse {
    fn into_items(self) -> Vec<RawSearchItem> {
        match self {
            InvokeResponse::Items(items) | InvokeResponse::Wrapped { result: items } => items,
        }
    }
}

#[derive(Deserialize)]
struct RawSearchItem {
    #[serde(default)]
    url: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    snippet: String,
    #[serde(default)]
    host_name: String,
    #[serde(default)]
    rank: Option<u32>,
    #[serde(default)]
    date: Option<String>,
}

impl RawSearchItem {
    fn into_result(self, index: usize) -> SearchResultItem {
        let host_name = if self.host_name.is_empty() {
            Url::parse(&self.url)
                .ok()
                .and_then(|url| url.host_str().map(str::to_string))
                .unwrap_or_default()
        } else {
            self.host_name
        };
        let title = if self.name.is_empty() {
            self.url.clone()
        } else {
            self.name
        };

        SearchResultItem {
            published_date: SearchResultItem::parse_date(self.date.as_deref()),
            rank: self.rank.unwrap_or(index as u32),
            url: self.url,
            title,
            snippet: self.snippet,
            host_name,
        }
    }
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    model: Option<&'a str>,
    messages: &'a [ChatMessage],
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    thinking: Option<Thinking>,
}

#[derive(Serialize)]
struct Thinking {
    #[serde(rename = "type")]
    kind: &'static str,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    model: Option<String>,
    #[serde(default)]
    choices: Vec<ChatChoice>,
    #[serde(default)]
    usage: Option<ChatUsage>,
}

#[derive(Deserialize)]
struct ChatChoice {
    #[serde(default)]
    message: Option<ChatChoiceMessage>,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Deserialize)]
struct ChatChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Deserialize, Default)]
struct ChatUsage {
    #[serde(default)]
    prompt_tokens: u32,
    #[serde(default)]
    completion_tokens: u32,
    #[serde(default)]
    total_tokens: u32,
}

// ============================================
// Helper Functions
// ============================================

fn map_http_error(status: StatusCode, body: String) -> DomainError {
    let message = serde_json::from_str::<Value>(&body)
        .ok()
        .and_then(|json| {
            let error = json.get("error");
            error
                .and_then(|err| err.get("message"))
                .or(error)
                .or_else(|| json.get("message"))
                .and_then(|msg| msg.as_str())
                .map(|msg| msg.to_string())
        })
        .unwrap_or(body);

    if message.trim().is_empty() {
        return DomainError::Upstream(format!("Provider returned {status}"));
    }

    DomainError::Upstream(message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{extract::State, http::HeaderMap, routing::post, Json, Router};
    use serde_json::json;
    use std::sync::{Arc, Mutex};

    /// Stand-in provider: records request bodies and answers with canned JSON
    #[derive(Clone, Default)]
    struct FakeProvider {
        seen: Arc<Mutex<Vec<(String, Value)>>>,
    }

    async fn invoke(
        State(provider): State<FakeProvider>,
        headers: HeaderMap,
        Json(body): Json<Value>,
    ) -> (StatusCode, Json<Value>) {
        let auth = headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();
        provider.seen.lock().unwrap().push((auth, body.clone()));

        if body["arguments"]["query"] == "explode" {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({"error": {"message": "search quota exhausted"}})),
            );
        }

        if body["arguments"]["query"] == "gaps" {
            return (
                StatusCode::OK,
                Json(json!([
                    {"name": "No link", "snippet": "dropped"},
                    {"url": "", "name": "Empty link"},
                    {"url": "https://tokio.rs/", "name": "Tokio", "host_name": "tokio.rs"}
                ])),
            );
        }

        (
            StatusCode::OK,
            Json(json!([
                {
                    "url": "https://www.rust-lang.org/",
                    "name": "Rust Programming Language",
                    "snippet": "A language empowering everyone",
                    "host_name": "www.rust-lang.org",
                    "rank": 0,
                    "date": "2024-05-01"
                },
                {
                    "url": "https://doc.rust-lang.org/book/",
                    "name": "",
                    "snippet": "The book",
                    "date": "N/A"
                },
                {
                    "url": "https://example.com/extra",
                    "name": "Extra",
                    "snippet": "beyond the limit"
                }
            ])),
        )
    }

    async fn chat(
        State(provider): State<FakeProvider>,
        Json(body): Json<Value>,
    ) -> (StatusCode, Json<Value>) {
        provider
            .seen
            .lock()
            .unwrap()
            .push(("chat".to_string(), body.clone()));

        let prompt = body["messages"][1]["content"].as_str().unwrap_or_default();
        if prompt.contains("silence") {
            return (
                StatusCode::OK,
                Json(json!({"model": "glm-test", "choices": [{"message": {"content": null}}]})),
            );
        }

        (
            StatusCode::OK,
            Json(json!({
                "model": "glm-test",
                "choices": [{
                    "message": {"role": "assistant", "content": "Summary: Rust is safe.\n\nKey Points:\n- Ownership"},
                    "finish_reason": "stop"
                }],
                "usage": {"prompt_tokens": 10, "completion_tokens": 5, "total_tokens": 15}
            })),
        )
    }

    async fn spawn_provider() -> (ZaiClient, FakeProvider) {
        let provider = FakeProvider::default();
        let app = Router::new()
            .route("/functions/invoke", post(invoke))
            .route("/chat/completions", post(chat))
            .with_state(provider.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        let client = ZaiClient::new(&ZaiConfig {
            base_url: format!("http://{addr}/"),
            api_key: "test-key".to_string(),
            model: Some("glm-test".to_string()),
            timeout: Duration::from_secs(5),
        })
        .unwrap();

        (client, provider)
    }

    #[tokio::test]
    async fn test_search_maps_provider_items() {
        let (client, provider) = spawn_provider().await;

        let results = client.search("rust", 2).await.unwrap();

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].title, "Rust Programming Language");
        assert_eq!(results[0].host_name, "www.rust-lang.org");
        assert_eq!(
            results[0].published_date,
            chrono::NaiveDate::from_ymd_opt(2024, 5, 1)
        );
        // Missing name, host and rank are filled in
        assert_eq!(results[1].title, "https://doc.rust-lang.org/book/");
        assert_eq!(results[1].host_name, "doc.rust-lang.org");
        assert_eq!(results[1].rank, 1);
        assert_eq!(results[1].published_date, None);

        let seen = provider.seen.lock().unwrap();
        let (auth, body) = &seen[0];
        assert_eq!(auth, "Bearer test-key");
        assert_eq!(body["function_name"], "web_search");
        assert_eq!(body["arguments"]["num"], 2);
    }

    #[tokio::test]
    async fn test_search_skips_items_without_url() {
        let (client, _) = spawn_provider().await;

        let results = client.search("gaps", 10).await.unwrap();

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].title, "Tokio");
        assert_eq!(results[0].rank, 0);
    }

    #[tokio::test]
    async fn test_search_error_carries_provider_message() {
        let (client, _) = spawn_provider().await;

        let err = client.search("explode", 10).await.unwrap_err();
        assert_eq!(err, DomainError::Upstream("search quota exhausted".to_string()));
    }

    #[tokio::test]
    async fn test_chat_completion() {
        let (client, provider) = spawn_provider().await;
        let messages = vec![
            ChatMessage::system("be brief"),
            ChatMessage::user("tell me about rust"),
        ];

        let response = client
            .complete(&messages, &CompletionOptions::default())
            .await
            .unwrap();

        assert!(response.content.starts_with("Summary: Rust is safe."));
        assert_eq!(response.model, "glm-test");
        assert_eq!(response.usage.total_tokens, 15);
        assert_eq!(response.finish_reason.as_deref(), Some("stop"));

        let seen = provider.seen.lock().unwrap();
        let (_, body) = &seen[0];
        assert_eq!(body["model"], "glm-test");
        assert_eq!(body["thinking"]["type"], "disabled");
        assert_eq!(body["messages"][0]["role"], "system");
    }

    #[tokio::test]
    async fn test_chat_null_content_is_empty() {
        let (client, _) = spawn_provider().await;
        let messages = vec![ChatMessage::system("x"), ChatMessage::user("silence please")];

        let response = client
            .complete(&messages, &CompletionOptions::default())
            .await
            .unwrap();
        assert_eq!(response.content, "");
    }

    #[tokio::test]
    async fn test_unreachable_provider_is_upstream_error() {
        let client = ZaiClient::new(&ZaiConfig {
            base_url: "http://127.0.0.1:1".to_string(),
            api_key: "k".to_string(),
            model: None,
            timeout: Duration::from_secs(2),
        })
        .unwrap();

        let err = client.search("rust", 3).await.unwrap_err();
        assert!(matches!(err, DomainError::Upstream(msg) if msg.starts_with("Request failed")));
    }

    #[test]
    fn test_map_http_error_shapes() {
        let nested = map_http_error(
            StatusCode::BAD_GATEWAY,
            r#"{"error":{"message":"upstream exploded"}}"#.to_string(),
        );
        assert_eq!(nested, DomainError::Upstream("upstream exploded".to_string()));

        let flat = map_http_error(StatusCode::UNAUTHORIZED, r#"{"error":"bad key"}"#.to_string());
        assert_eq!(flat, DomainError::Upstream("bad key".to_string()));

        let text = map_http_error(StatusCode::TOO_MANY_REQUESTS, "slow down".to_string());
        assert_eq!(text, DomainError::Upstream("slow down".to_string()));

        let empty = map_http_error(StatusCode::SERVICE_UNAVAILABLE, String::new());
        assert_eq!(
            empty,
            DomainError::Upstream("Provider returned 503 Service Unavailable".to_string())
        );
    }
}
