//! Request header decoding and response header encoding.

mod header_decoder;
mod header_encoder;

pub use header_decoder::HeaderDecoder;
pub use header_encoder::HeaderEncoder;
pub(crate) use header_encoder::status_without_body;
