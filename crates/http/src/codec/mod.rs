//! Wire codecs for HTTP/1.1 messages.
//!
//! - [`RequestDecoder`]: turns raw bytes into a [`Message`](crate::protocol::Message)
//!   stream, a request header followed by its payload items
//! - [`ResponseEncoder`]: writes a response head and its fixed-length body
//!
//! Both plug into `tokio_util::codec::{FramedRead, FramedWrite}`.

mod body;
mod header;
mod request_decoder;
mod response_encoder;

pub use request_decoder::RequestDecoder;
pub use response_encoder::ResponseEncoder;
pub(crate) use response_encoder::payload_size_of;
