//! The HTTP/1.1 wire layer of the greeter service
//!
//! This crate turns a pair of async byte streams into a sequence of
//! `http::Request<Bytes>` values handed to a [`handler::Handler`], and writes the
//! handler's `http::Response` back to the peer. It is deliberately small: request
//! bodies are buffered in full (up to a limit) before the handler runs, and
//! responses are always written with a fixed length.
//!
//! # Example
//!
//! ```no_run
//! use bytes::Bytes;
//! use http::{Request, Response, StatusCode};
//! use std::convert::Infallible;
//! use std::sync::Arc;
//! use tokio::net::TcpListener;
//! use tracing::{error, info, warn};
//! use greeter_http::connection::HttpConnection;
//! use greeter_http::handler::make_handler;
//!
//! #[tokio::main]
//! async fn main() {
//!     let tcp_listener = match TcpListener::bind("127.0.0.1:8080").await {
//!         Ok(tcp_listener) => tcp_listener,
//!         Err(e) => {
//!             error!(cause = %e, "bind server error");
//!             return;
//!         }
//!     };
//!
//!     let handler = Arc::new(make_handler(hello_world));
//!
//!     loop {
//!         let (tcp_stream, _remote_addr) = match tcp_listener.accept().await {
//!             Ok(stream_and_addr) => stream_and_addr,
//!             Err(e) => {
//!                 warn!(cause = %e, "failed to accept");
//!                 continue;
//!             }
//!         };
//!
//!         let handler = Arc::clone(&handler);
//!         tokio::spawn(async move {
//!             let (reader, writer) = tcp_stream.into_split();
//!             if let Err(e) = HttpConnection::new(reader, writer).process(handler).await {
//!                 error!(cause = %e, "connection shutdown with error");
//!             }
//!         });
//!     }
//! }
//!
//! async fn hello_world(request: Request<Bytes>) -> Result<Response<String>, Infallible> {
//!     info!(path = request.uri().path(), "request received");
//!     Ok(Response::builder().status(StatusCode::OK).body("Hello World!\r\n".to_string()).unwrap())
//! }
//! ```
//!
//! # Architecture
//!
//! - [`connection`]: the per-connection request/response loop
//! - [`protocol`]: request header wrapper, payload framing types and errors
//! - [`codec`]: `tokio-util` decoder and encoder for the wire format
//! - [`handler`]: the [`handler::Handler`] trait the connection drives
//!
//! # Limitations
//!
//! - HTTP/1.0 and HTTP/1.1 only, no TLS
//! - Maximum header size: 8KB
//! - Maximum number of headers: 64

pub mod codec;
pub mod connection;
pub mod handler;
pub mod protocol;

mod utils;
pub(crate) use utils::ensure;
