//! Protocol types shared by the codec and the connection loop.
//!
//! - [`Message`]: what the request decoder yields, a header or a payload item
//! - [`PayloadItem`] / [`PayloadSize`]: body framing
//! - [`RequestHeader`]: a bodyless `http::Request` with protocol helpers
//! - [`ResponseHead`]: a bodyless `http::Response`
//! - [`HttpError`], [`ParseError`], [`SendError`]: error types

mod message;
pub use message::Message;
pub use message::PayloadItem;
pub use message::PayloadSize;

mod request;
pub use request::RequestHeader;

mod response;
pub use response::ResponseHead;

mod error;
pub use error::HttpError;
pub use error::ParseError;
pub use error::SendError;
