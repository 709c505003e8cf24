#![allow(dead_code)]

use std::io;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// One request as received by [`MockServer`].
#[derive(Debug, Clone)]
pub struct CapturedRequest {
    pub request_line: String,
    pub headers: String,
    pub body: String,
}

impl CapturedRequest {
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_str(&self.body).unwrap_or(serde_json::Value::Null)
    }
}

/// Serves canned HTTP responses in order, one per connection.
pub struct MockServer {
    pub base_url: String,
    handle: JoinHandle<io::Result<Vec<CapturedRequest>>>,
}

impl MockServer {
    pub async fn start(responses: Vec<String>) -> io::Result<Self> {
        let responses = responses
            .into_iter()
            .map(|response| vec![response.into_bytes()])
            .collect();
        Self::start_split(responses).await
    }

    /// Like [`MockServer::start`], but each response is written as several
    /// separate writes with a short pause in between, so the client sees
    /// the body arrive in pieces.
    pub async fn start_split(responses: Vec<Vec<Vec<u8>>>) -> io::Result<Self> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;

        let handle = tokio::spawn(async move {
            let mut captured = Vec::new();
            for parts in responses {
                let (mut socket, _) = listener.accept().await?;
                captured.push(read_request(&mut socket).await?);
                for (idx, part) in parts.iter().enumerate() {
                    if idx > 0 {
                        tokio::time::sleep(Duration::from_millis(100)).await;
                    }
                    socket.write_all(part).await?;
                    socket.flush().await?;
                }
                socket.shutdown().await?;
            }
            Ok(captured)
        });

        Ok(Self {
            base_url: format!("http://{addr}/v1"),
            handle,
        })
    }

    /// Wait until every response has been served.
    pub async fn finish(self) -> io::Result<Vec<CapturedRequest>> {
        self.handle.await.map_err(io::Error::other)?
    }
}

async fn read_request(socket: &mut tokio::net::TcpStream) -> io::Result<CapturedRequest> {
    let mut data = Vec::new();
    let mut chunk = [0u8; 4096];

    let header_end = loop {
        let read = socket.read(&mut chunk).await?;
        if read == 0 {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "connection closed before headers",
            ));
        }
        data.extend_from_slice(&chunk[..read]);
        if let Some(pos) = find(&data, b"\r\n\r\n") {
            break pos;
        }
    };

    let head = String::from_utf8_lossy(&data[..header_end]).to_string();
    let content_length = head
        .lines()
        .filter_map(|line| line.split_once(':'))
        .find(|(name, _)| name.trim().eq_ignore_ascii_case("content-length"))
        .and_then(|(_, value)| value.trim().parse::<usize>().ok())
        .unwrap_or(0);

    let body_start = header_end + 4;
    while data.len() < body_start + content_length {
        let read = socket.read(&mut chunk).await?;
        if read == 0 {
            break;
        }
        data.extend_from_slice(&chunk[..read]);
    }

    let (request_line, headers) = head.split_once("\r\n").unwrap_or((head.as_str(), ""));
    let body_end = data.len().min(body_start + content_length);
    Ok(CapturedRequest {
        request_line: request_line.to_string(),
        headers: headers.to_string(),
        body: String::from_utf8_lossy(&data[body_start..body_end]).to_string(),
    })
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}

pub fn json_response(status: u16, body: &str) -> String {
    format!(
        "HTTP/1.1 {status} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
        reason(status),
        body.len()
    )
}

pub fn sse_response(events: &[&str]) -> String {
    let mut body = String::new();
    for event in events {
        body.push_str("data: ");
        body.push_str(event);
        body.push_str("\n\n");
    }
    format!(
        "HTTP/1.1 200 OK\r\nContent-Type: text/event-stream\r\nCache-Control: no-cache\r\nConnection: close\r\n\r\n{body}"
    )
}

pub fn delta_chunk(content: &str) -> String {
    serde_json::json!({
        "object": "chat.completion.chunk",
        "choices": [{"index": 0, "delta": {"content": content}, "finish_reason": null}]
    })
    .to_string()
}

pub fn finish_chunk(reason: &str) -> String {
    serde_json::json!({
        "object": "chat.completion.chunk",
        "choices": [{"index": 0, "delta": {}, "finish_reason": reason}]
    })
    .to_string()
}

fn reason(status: u16) -> &'static str {
    match status {
        200 => "OK",
        400 => "Bad Request",
        401 => "Unauthorized",
        429 => "Too Many Requests",
        500 => "Internal Server Error",
        _ => "Unknown",
    }
}
