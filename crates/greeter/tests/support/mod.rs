//! An HTTP/1.1 client that talks to the full greeter server over an in-memory pipe.

#![allow(dead_code, reason = "not every test binary uses every helper")]

use bytes::{Buf, Bytes, BytesMut};
use greeter::config::AppConfig;
use greeter::service::GreetingService;
use greeter::template::Template;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tokio::io::{AsyncReadExt, AsyncWriteExt, DuplexStream, duplex};

pub struct TestClient {
    stream: DuplexStream,
    buf: BytesMut,
}

#[derive(Debug)]
pub struct TestResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: Bytes,
}

impl TestResponse {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.iter().find(|(key, _)| key.eq_ignore_ascii_case(name)).map(|(_, value)| value.as_str())
    }

    pub fn json<T: DeserializeOwned>(&self) -> T {
        serde_json::from_slice(&self.body).unwrap()
    }

    pub fn text(&self) -> &str {
        std::str::from_utf8(&self.body).unwrap()
    }
}

/// Starts a server for `service` and returns a client connected to it.
pub fn connect(service: &Arc<GreetingService>) -> TestClient {
    let server = Arc::new(greeter::app_server(&AppConfig::default(), Arc::clone(service)).unwrap());

    let (client, server_io) = duplex(64 * 1024);
    let (reader, writer) = tokio::io::split(server_io);
    tokio::spawn(async move {
        if let Err(e) = server.serve_connection(reader, writer).await {
            eprintln!("server side of the test connection failed: {e}");
        }
    });

    TestClient { stream: client, buf: BytesMut::new() }
}

pub fn service(template: &str) -> Arc<GreetingService> {
    Arc::new(GreetingService::new(Template::parse(template).unwrap()))
}

impl TestClient {
    pub async fn get(&mut self, path: &str) -> TestResponse {
        self.send(&format!("GET {path} HTTP/1.1\r\nHost: localhost\r\n\r\n")).await
    }

    pub async fn delete(&mut self, path: &str) -> TestResponse {
        self.send(&format!("DELETE {path} HTTP/1.1\r\nHost: localhost\r\n\r\n")).await
    }

    pub async fn post_json(&mut self, path: &str, body: &str) -> TestResponse {
        self.send(&format!(
            "POST {path} HTTP/1.1\r\nHost: localhost\r\nContent-Type: application/json\r\nContent-Length: {}\r\n\r\n{body}",
            body.len()
        ))
        .await
    }

    /// Sends a `HEAD` request; the response carries headers only.
    pub async fn head(&mut self, path: &str) -> TestResponse {
        self.write(&format!("HEAD {path} HTTP/1.1\r\nHost: localhost\r\n\r\n")).await;
        self.read(true).await.expect("connection closed before a response arrived")
    }

    pub async fn send(&mut self, raw: &str) -> TestResponse {
        self.write(raw).await;
        self.read_response().await.expect("connection closed before a response arrived")
    }

    pub async fn write(&mut self, raw: &str) {
        self.stream.write_all(raw.as_bytes()).await.unwrap();
        self.stream.flush().await.unwrap();
    }

    /// Reads one response, `None` once the server closed the connection.
    pub async fn read_response(&mut self) -> Option<TestResponse> {
        self.read(false).await
    }

    async fn read(&mut self, head_only: bool) -> Option<TestResponse> {
        loop {
            if let Some(response) = self.parse_response(head_only) {
                return Some(response);
            }
            if self.stream.read_buf(&mut self.buf).await.unwrap() == 0 {
                assert!(self.buf.is_empty(), "connection closed mid response");
                return None;
            }
        }
    }

    fn parse_response(&mut self, head_only: bool) -> Option<TestResponse> {
        let mut headers = [httparse::EMPTY_HEADER; 32];
        let mut response = httparse::Response::new(&mut headers);
        let header_len = match response.parse(&self.buf).unwrap() {
            httparse::Status::Complete(len) => len,
            httparse::Status::Partial => return None,
        };

        let status = response.code.unwrap();
        let headers = response
            .headers
            .iter()
            .map(|h| (h.name.to_string(), String::from_utf8(h.value.to_vec()).unwrap()))
            .collect::<Vec<_>>();
        let content_length = if head_only {
            0
        } else {
            headers
                .iter()
                .find(|(name, _)| name.eq_ignore_ascii_case("content-length"))
                .map_or(0, |(_, value)| value.parse::<usize>().unwrap())
        };

        if self.buf.len() < header_len + content_length {
            return None;
        }
        self.buf.advance(header_len);
        let body = self.buf.split_to(content_length).freeze();

        Some(TestResponse { status, headers, body })
    }
}
