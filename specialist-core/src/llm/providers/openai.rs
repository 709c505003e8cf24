use crate::config::constants::{message_roles, models, urls};
use crate::llm::error_display;
use crate::llm::provider::{
    FinishReason, LLMError, LLMProvider, LLMRequest, LLMResponse, LLMStream, LLMStreamEvent,
    Usage,
};
use async_stream::try_stream;
use async_trait::async_trait;
use futures::StreamExt;
use reqwest::Client as HttpClient;
use serde_json::{Value, json};
use std::time::Duration;
use tracing::debug;

const PROVIDER_LABEL: &str = "OpenAI";

pub struct OpenAIProvider {
    api_key: String,
    http_client: HttpClient,
    base_url: String,
    model: String,
}

impl OpenAIProvider {
    pub fn new(api_key: String) -> Self {
        Self::with_model(api_key, models::openai::DEFAULT_MODEL.to_string())
    }

    pub fn with_model(api_key: String, model: String) -> Self {
        Self {
            api_key,
            http_client: HttpClient::new(),
            base_url: urls::OPENAI_API_BASE.to_string(),
            model,
        }
    }

    pub fn from_config(
        api_key: Option<String>,
        model: Option<String>,
        base_url: Option<String>,
        timeout: Option<Duration>,
    ) -> Self {
        let api_key = api_key.unwrap_or_default();
        let mut provider = match model {
            Some(model) => Self::with_model(api_key, model),
            None => Self::new(api_key),
        };
        if let Some(base) = base_url {
            provider.base_url = base.trim_end_matches('/').to_string();
        }
        if let Some(timeout) = timeout {
            if let Ok(client) = HttpClient::builder().timeout(timeout).build() {
                provider.http_client = client;
            }
        }
        provider
    }

    /// Model used when a request leaves its model blank
    pub fn model(&self) -> &str {
        &self.model
    }

    fn convert_to_openai_format(&self, request: &LLMRequest) -> Value {
        let mut messages = Vec::with_capacity(request.messages.len() + 1);

        if let Some(system_prompt) = &request.system_prompt {
            messages.push(json!({
                "role": message_roles::SYSTEM,
                "content": system_prompt
            }));
        }

        for msg in &request.messages {
            messages.push(json!({
                "role": msg.role.as_openai_str(),
                "content": msg.content
            }));
        }

        let model = if request.model.trim().is_empty() {
            self.model.as_str()
        } else {
            request.model.as_str()
        };

        let mut openai_request = json!({
            "model": model,
            "messages": messages,
            "stream": request.stream
        });

        if let Some(max_tokens) = request.max_tokens {
            openai_request["max_tokens"] = json!(max_tokens);
        }

        if let Some(temperature) = request.temperature {
            openai_request["temperature"] = json!(temperature);
        }

        openai_request
    }

    async fn send(&self, body: &Value) -> Result<reqwest::Response, LLMError> {
        let url = format!("{}/chat/completions", self.base_url);

        let response = self
            .http_client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(body)
            .send()
            .await
            .map_err(|e| {
                let formatted_error =
                    error_display::format_llm_error(PROVIDER_LABEL, &format!("Network error: {e}"));
                LLMError::Network(formatted_error)
            })?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let error_text = response.text().await.unwrap_or_default();
        Err(match status.as_u16() {
            401 | 403 => LLMError::Authentication(error_display::format_llm_error(
                PROVIDER_LABEL,
                &format!("HTTP {status}: {error_text}"),
            )),
            429 => LLMError::RateLimit,
            _ => LLMError::Provider(error_display::format_llm_error(
                PROVIDER_LABEL,
                &format!("HTTP {status}: {error_text}"),
            )),
        })
    }

    fn parse_openai_response(response_json: Value) -> Result<LLMResponse, LLMError> {
        if let Some(message) = stream_error(&response_json) {
            return Err(LLMError::Provider(error_display::format_llm_error(
                PROVIDER_LABEL,
                &message,
            )));
        }

        let choice = response_json
            .get("choices")
            .and_then(|choices| choices.get(0))
            .ok_or_else(|| {
                LLMError::Provider(error_display::format_llm_error(
                    PROVIDER_LABEL,
                    "Invalid response format: missing choices",
                ))
            })?;

        let content = choice
            .get("message")
            .and_then(|message| message.get("content"))
            .and_then(Value::as_str)
            .map(str::to_string);

        let finish_reason = choice
            .get("finish_reason")
            .and_then(Value::as_str)
            .map(FinishReason::from_openai)
            .unwrap_or_default();

        Ok(LLMResponse {
            content,
            usage: parse_usage(&response_json),
            finish_reason,
        })
    }
}

fn parse_usage(payload: &Value) -> Option<Usage> {
    let usage = payload.get("usage").filter(|usage| usage.is_object())?;
    let field = |name: &str| {
        usage
            .get(name)
            .and_then(Value::as_u64)
            .and_then(|value| u32::try_from(value).ok())
            .unwrap_or_default()
    };
    Some(Usage {
        prompt_tokens: field("prompt_tokens"),
        completion_tokens: field("completion_tokens"),
        total_tokens: field("total_tokens"),
    })
}

/// Error message carried inside a successful HTTP body.
fn stream_error(payload: &Value) -> Option<String> {
    let error = payload.get("error")?;
    Some(
        error
            .get("message")
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_else(|| error.to_string()),
    )
}

/// Apply one `chat.completion.chunk` to the running totals and return its
/// content delta, if any.
fn parse_stream_payload(
    payload: &Value,
    aggregated_content: &mut String,
    usage: &mut Option<Usage>,
    finish_reason: &mut FinishReason,
) -> Option<String> {
    if let Some(parsed) = parse_usage(payload) {
        *usage = Some(parsed);
    }

    let choice = payload.get("choices").and_then(|choices| choices.get(0))?;

    if let Some(reason) = choice.get("finish_reason").and_then(Value::as_str) {
        *finish_reason = FinishReason::from_openai(reason);
    }

    let delta = choice
        .get("delta")
        .and_then(|delta| delta.get("content"))
        .and_then(Value::as_str)?;
    aggregated_content.push_str(delta);
    Some(delta.to_string())
}

/// Payloads of the `data:` lines in one server-sent event.
/// Append raw body bytes. Carriage returns are dropped so events always
/// end in `\n\n`; a `\r` never occurs inside a multi-byte UTF-8 sequence.
fn push_chunk(buffer: &mut Vec<u8>, chunk: &[u8]) {
    buffer.extend(chunk.iter().copied().filter(|byte| *byte != b'\r'));
}

/// Take the next complete event off the front of `buffer`.
///
/// Bytes are only decoded once the whole event has arrived, so characters
/// split across network chunks stay intact.
fn next_event(buffer: &mut Vec<u8>) -> Option<Result<String, LLMError>> {
    let split_idx = buffer.windows(2).position(|window| window == b"\n\n")?;
    let event: Vec<u8> = buffer.drain(..split_idx + 2).collect();
    Some(decode_event(&event[..split_idx]))
}

fn decode_event(bytes: &[u8]) -> Result<String, LLMError> {
    std::str::from_utf8(bytes).map(str::to_string).map_err(|err| {
        LLMError::Provider(error_display::format_llm_error(
            PROVIDER_LABEL,
            &format!("Stream event is not valid UTF-8: {err}"),
        ))
    })
}

fn event_data(event: &str) -> impl Iterator<Item = &str> {
    event
        .lines()
        .filter_map(|line| line.strip_prefix("data:"))
        .map(str::trim)
        .filter(|data| !data.is_empty())
}

fn decode_payload(data: &str) -> Result<Value, LLMError> {
    let payload: Value = serde_json::from_str(data).map_err(|err| {
        LLMError::Provider(error_display::format_llm_error(
            PROVIDER_LABEL,
            &format!("Failed to parse stream payload: {err}"),
        ))
    })?;
    if let Some(message) = stream_error(&payload) {
        return Err(LLMError::Provider(error_display::format_llm_error(
            PROVIDER_LABEL,
            &message,
        )));
    }
    Ok(payload)
}

#[async_trait]
impl LLMProvider for OpenAIProvider {
    fn name(&self) -> &str {
        "openai"
    }

    fn supports_streaming(&self) -> bool {
        true
    }

    async fn generate(&self, request: LLMRequest) -> Result<LLMResponse, LLMError> {
        self.validate_request(&request)?;
        let mut openai_request = self.convert_to_openai_format(&request);
        openai_request["stream"] = Value::Bool(false);

        let response = self.send(&openai_request).await?;
        let openai_response: Value = response.json().await.map_err(|e| {
            let formatted_error = error_display::format_llm_error(
                PROVIDER_LABEL,
                &format!("Failed to parse response: {e}"),
            );
            LLMError::Provider(formatted_error)
        })?;

        Self::parse_openai_response(openai_response)
    }

    async fn stream(&self, request: LLMRequest) -> Result<LLMStream, LLMError> {
        self.validate_request(&request)?;
        let mut openai_request = self.convert_to_openai_format(&request);
        openai_request["stream"] = Value::Bool(true);

        let model = openai_request["model"].as_str().unwrap_or_default().to_string();
        debug!(
            model = %model,
            messages = request.messages.len(),
            "starting completion stream"
        );
        let response = self.send(&openai_request).await?;

        let stream = try_stream! {
            let mut body_stream = response.bytes_stream();
            let mut buffer: Vec<u8> = Vec::new();
            let mut aggregated_content = String::new();
            let mut usage: Option<Usage> = None;
            let mut finish_reason = FinishReason::Stop;
            let mut done = false;

            while let Some(chunk_result) = body_stream.next().await {
                let chunk = chunk_result.map_err(|err| {
                    let formatted_error = error_display::format_llm_error(
                        PROVIDER_LABEL,
                        &format!("Streaming error: {err}"),
                    );
                    LLMError::Network(formatted_error)
                })?;

                push_chunk(&mut buffer, &chunk);

                while let Some(event) = next_event(&mut buffer) {
                    let event = event?;

                    for data in event_data(&event) {
                        if data == "[DONE]" {
                            done = true;
                            break;
                        }

                        let payload = decode_payload(data)?;
                        if let Some(delta) = parse_stream_payload(
                            &payload,
                            &mut aggregated_content,
                            &mut usage,
                            &mut finish_reason,
                        ) {
                            if !delta.is_empty() {
                                yield LLMStreamEvent::Token { delta };
                            }
                        }
                    }

                    if done {
                        break;
                    }
                }

                if done {
                    break;
                }
            }

            // A body that ends without a blank line still carries a final event.
            if !done && !buffer.is_empty() {
                let tail = decode_event(&buffer)?;
                for data in event_data(&tail) {
                    if data == "[DONE]" {
                        break;
                    }

                    let payload = decode_payload(data)?;
                    if let Some(delta) = parse_stream_payload(
                        &payload,
                        &mut aggregated_content,
                        &mut usage,
                        &mut finish_reason,
                    ) {
                        if !delta.is_empty() {
                            yield LLMStreamEvent::Token { delta };
                        }
                    }
                }
            }

            let response = LLMResponse {
                content: if aggregated_content.is_empty() {
                    None
                } else {
                    Some(aggregated_content)
                },
                usage,
                finish_reason,
            };

            yield LLMStreamEvent::Completed { response };
        };

        Ok(Box::pin(stream))
    }

    fn supported_models(&self) -> Vec<String> {
        models::openai::SUPPORTED_MODELS
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    fn validate_request(&self, request: &LLMRequest) -> Result<(), LLMError> {
        if request.messages.is_empty() {
            return Err(LLMError::InvalidRequest(
                "Messages cannot be empty".to_string(),
            ));
        }

        if request.model.trim().is_empty() && self.model.trim().is_empty() {
            return Err(LLMError::InvalidRequest(
                "Model cannot be empty".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::provider::Message;

    fn provider() -> OpenAIProvider {
        OpenAIProvider::from_config(Some("sk-test".to_string()), None, None, None)
    }

    #[test]
    fn system_prompt_leads_the_messages() {
        let request = LLMRequest::new(
            "gpt-3.5-turbo",
            Some("Only discuss databases.".to_string()),
            vec![Message::user("How do I add an index?".to_string())],
        );
        let body = provider().convert_to_openai_format(&request);

        assert_eq!(body["model"], "gpt-3.5-turbo");
        assert_eq!(body["stream"], true);
        assert_eq!(body["messages"][0]["role"], "system");
        assert_eq!(body["messages"][0]["content"], "Only discuss databases.");
        assert_eq!(body["messages"][1]["role"], "user");
        assert!(body.get("temperature").is_none());
        assert!(body.get("max_tokens").is_none());
    }

    #[test]
    fn blank_model_falls_back_to_provider_default() {
        let mut request = LLMRequest::new("", None, vec![Message::user("hi".to_string())]);
        request.temperature = Some(0.5);
        request.max_tokens = Some(64);
        let body = provider().convert_to_openai_format(&request);

        assert_eq!(body["model"], models::openai::DEFAULT_MODEL);
        assert_eq!(body["max_tokens"], 64);
        assert!(body["temperature"].as_f64().is_some());
    }

    #[test]
    fn stream_chunks_accumulate() {
        let mut aggregated = String::new();
        let mut usage = None;
        let mut finish = FinishReason::Error("pending".to_string());

        let first = json!({"choices": [{"delta": {"role": "assistant"}}]});
        assert_eq!(
            parse_stream_payload(&first, &mut aggregated, &mut usage, &mut finish),
            None
        );

        let second = json!({"choices": [{"delta": {"content": "Hel"}}]});
        let third = json!({"choices": [{"delta": {"content": "lo"}, "finish_reason": "stop"}]});
        assert_eq!(
            parse_stream_payload(&second, &mut aggregated, &mut usage, &mut finish),
            Some("Hel".to_string())
        );
        assert_eq!(
            parse_stream_payload(&third, &mut aggregated, &mut usage, &mut finish),
            Some("lo".to_string())
        );

        let usage_chunk = json!({
            "choices": [],
            "usage": {"prompt_tokens": 3, "completion_tokens": 2, "total_tokens": 5}
        });
        parse_stream_payload(&usage_chunk, &mut aggregated, &mut usage, &mut finish);

        assert_eq!(aggregated, "Hello");
        assert_eq!(finish, FinishReason::Stop);
        assert_eq!(usage.map(|u| u.total_tokens), Some(5));
    }

    #[test]
    fn data_lines_are_extracted() {
        let event = "event: message\ndata: {\"a\":1}\n: keep-alive\ndata:   \ndata:[DONE]";
        let data: Vec<&str> = event_data(event).collect();
        assert_eq!(data, vec!["{\"a\":1}", "[DONE]"]);
    }

    #[test]
    fn events_split_inside_a_character_decode_once_complete() -> Result<(), LLMError> {
        let event = "data: {\"content\":\"café\"}\r\n\r\ndata: [DONE]\n\n".as_bytes();
        let cut = event
            .iter()
            .position(|byte| *byte == 0xC3)
            .map_or(event.len(), |idx| idx + 1);

        let mut buffer = Vec::new();
        push_chunk(&mut buffer, &event[..cut]);
        assert!(next_event(&mut buffer).is_none());

        push_chunk(&mut buffer, &event[cut..]);
        let first = next_event(&mut buffer).transpose()?;
        assert_eq!(first.as_deref(), Some("data: {\"content\":\"café\"}"));
        let second = next_event(&mut buffer).transpose()?;
        assert_eq!(second.as_deref(), Some("data: [DONE]"));
        assert!(buffer.is_empty());
        Ok(())
    }

    #[test]
    fn invalid_utf8_event_is_a_provider_error() {
        let mut buffer = b"data: \xFF\xFE\n\n".to_vec();
        assert!(matches!(
            next_event(&mut buffer),
            Some(Err(LLMError::Provider(_)))
        ));
    }

    #[test]
    fn inline_errors_are_reported() {
        let result = decode_payload(r#"{"error": {"message": "model overloaded"}}"#);
        match result {
            Err(LLMError::Provider(message)) => assert!(message.contains("model overloaded")),
            other => panic!("unexpected result: {other:?}"),
        }
        assert!(decode_payload("not json").is_err());
    }

    #[test]
    fn full_response_is_parsed() -> Result<(), LLMError> {
        let response = OpenAIProvider::parse_openai_response(json!({
            "choices": [{
                "message": {"role": "assistant", "content": "Use an index."},
                "finish_reason": "length"
            }],
            "usage": {"prompt_tokens": 10, "completion_tokens": 4, "total_tokens": 14}
        }))?;
        assert_eq!(response.text(), "Use an index.");
        assert_eq!(response.finish_reason, FinishReason::Length);
        assert_eq!(response.usage.map(|u| u.prompt_tokens), Some(10));
        Ok(())
    }

    #[test]
    fn default_model_is_supported() {
        let supported = provider().supported_models();
        assert!(supported.iter().any(|m| m == models::openai::DEFAULT_MODEL));
        assert!(!supported.iter().any(|m| m == "llama3:8b"));
    }

    #[test]
    fn empty_messages_are_rejected() {
        let request = LLMRequest::new("gpt-3.5-turbo", None, Vec::new());
        assert!(matches!(
            provider().validate_request(&request),
            Err(LLMError::InvalidRequest(_))
        ));
    }
}
