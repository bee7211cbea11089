//! The per-connection request/response loop.
//!
//! [`HttpConnection`] reads requests off a stream, buffers each body in full,
//! hands the request to a [`Handler`](crate::handler::Handler) and writes the
//! response before reading the next request. It answers `100 Continue` when
//! the client asks for it and closes the stream when the client is not keeping
//! the connection alive.

mod http_connection;

pub use http_connection::{DEFAULT_MAX_BODY_SIZE, HttpConnection};
