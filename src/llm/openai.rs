//! OpenAI-compatible chat completions over `reqwest`.
//!
//! [`OpenAiHttp`] carries the shared transport (base URL, credential,
//! timeout, retry policy) and is reused by the hosted embedding provider.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use super::retry::RetryPolicy;
use super::{ChatMessage, ChatModel, ChatResponse, Role, ToolCall, ToolSpec};
use crate::config::{LlmConfig, API_KEY_ENV};
use crate::error::LlmError;

/// Authenticated JSON-over-HTTP transport to an OpenAI-compatible API.
#[derive(Clone)]
pub struct OpenAiHttp {
    client: Client,
    base_url: String,
    api_key: Option<String>,
    retry: RetryPolicy,
}

impl OpenAiHttp {
    pub fn from_config(config: &LlmConfig) -> Result<Self, LlmError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| LlmError::Http(e.to_string()))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            retry: RetryPolicy::new(
                config.max_retries,
                Duration::from_millis(config.retry_backoff_ms),
            ),
        })
    }

    /// POST `body` to `{base_url}/{path}` with retries, decoding the JSON reply.
    pub async fn post<Req, Resp>(&self, path: &str, body: &Req) -> Result<Resp, LlmError>
    where
        Req: Serialize + Sync,
        Resp: DeserializeOwned,
    {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| LlmError::MissingCredential(API_KEY_ENV.into()))?;
        let url = format!("{}/{}", self.base_url, path);

        self.retry
            .run(path, || async {
                let resp = self
                    .client
                    .post(&url)
                    .bearer_auth(api_key)
                    .json(body)
                    .send()
                    .await?;

                let status = resp.status();
                if !status.is_success() {
                    let body = resp.text().await.unwrap_or_default();
                    return Err(status_error(status, body));
                }

                Ok(resp.json::<Resp>().await?)
            })
            .await
    }
}

fn status_error(status: StatusCode, body: String) -> LlmError {
    if status == StatusCode::TOO_MANY_REQUESTS {
        LlmError::RateLimited(body)
    } else {
        LlmError::Api {
            status: status.as_u16(),
            body,
        }
    }
}

/// Hosted chat model speaking the `/chat/completions` protocol.
pub struct OpenAiChat {
    http: OpenAiHttp,
    model: String,
    temperature: f32,
}

impl OpenAiChat {
    pub fn new(http: OpenAiHttp, model: impl Into<String>, temperature: f32) -> Self {
        Self {
            http,
            model: model.into(),
            temperature,
        }
    }

    pub fn from_config(config: &LlmConfig, model: &str) -> Result<Self, LlmError> {
        Ok(Self::new(
            OpenAiHttp::from_config(config)?,
            model,
            config.temperature,
        ))
    }
}

#[async_trait]
impl ChatModel for OpenAiChat {
    fn model(&self) -> &str {
        &self.model
    }

    async fn complete(
        &self,
        messages: &[ChatMessage],
        tools: &[ToolSpec],
    ) -> Result<ChatResponse, LlmError> {
        tracing::debug!(
            model = %self.model,
            messages = messages.len(),
            tools = tools.len(),
            "chat completion request"
        );

        let request = build_request(&self.model, self.temperature, messages, tools);
        let response: WireResponse = self.http.post("chat/completions", &request).await?;
        parse_response(response)
    }
}

// ── Wire format ───────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct WireRequest<'a> {
    model: &'a str,
    messages: Vec<WireMessage>,
    temperature: f32,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    tools: Vec<WireTool<'a>>,
}

#[derive(Debug, Serialize, Deserialize)]
struct WireMessage {
    role: Role,
    #[serde(default)]
    content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    tool_calls: Option<Vec<WireToolCall>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    tool_call_id: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
struct WireToolCall {
    id: String,
    #[serde(rename = "type", default = "function_type")]
    kind: String,
    function: WireFunctionCall,
}

#[derive(Debug, Serialize, Deserialize)]
struct WireFunctionCall {
    name: String,
    /// JSON-encoded arguments object.
    #[serde(default)]
    arguments: String,
}

#[derive(Debug, Serialize)]
struct WireTool<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    function: &'a ToolSpec,
}

#[derive(Debug, Deserialize)]
struct WireResponse {
    choices: Vec<WireChoice>,
}

#[derive(Debug, Deserialize)]
struct WireChoice {
    message: WireMessage,
}

fn function_type() -> String {
    "function".into()
}

fn build_request<'a>(
    model: &'a str,
    temperature: f32,
    messages: &[ChatMessage],
    tools: &'a [ToolSpec],
) -> WireRequest<'a> {
    let messages = messages
        .iter()
        .map(|msg| WireMessage {
            role: msg.role,
            content: if msg.content.is_empty() && !msg.tool_calls.is_empty() {
                None
            } else {
                Some(msg.content.clone())
            },
            tool_calls: (!msg.tool_calls.is_empty()).then(|| {
                msg.tool_calls
                    .iter()
                    .map(|call| WireToolCall {
                        id: call.id.clone(),
                        kind: function_type(),
                        function: WireFunctionCall {
                            name: call.name.clone(),
                            arguments: call.arguments.to_string(),
                        },
                    })
                    .collect()
            }),
            tool_call_id: msg.tool_call_id.clone(),
        })
        .collect();

    WireRequest {
        model,
        messages,
        temperature,
        tools: tools
            .iter()
            .map(|spec| WireTool {
                kind: "function",
                function: spec,
            })
            .collect(),
    }
}

fn parse_response(response: WireResponse) -> Result<ChatResponse, LlmError> {
    let message = response
        .choices
        .into_iter()
        .next()
        .ok_or(LlmError::EmptyResponse)?
        .message;

    match message.tool_calls {
        Some(calls) if !calls.is_empty() => {
            let calls = calls
                .into_iter()
                .map(|call| {
                    let raw = call.function.arguments.trim();
                    let arguments = if raw.is_empty() {
                        serde_json::Value::Object(Default::default())
                    } else {
                        serde_json::from_str(raw).map_err(|e| {
                            LlmError::InvalidResponse(format!(
                                "arguments for {} are not JSON: {e}",
                                call.function.name
                            ))
                        })?
                    };
                    Ok(ToolCall {
                        id: call.id,
                        name: call.function.name,
                        arguments,
                    })
                })
                .collect::<Result<Vec<_>, LlmError>>()?;
            Ok(ChatResponse::ToolCalls(calls))
        }
        _ => Ok(ChatResponse::Final(message.content.unwrap_or_default())),
    }
}
