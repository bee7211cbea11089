//! Request body decoding for the three framings of [`PayloadSize`](crate::protocol::PayloadSize).

mod chunked_decoder;
mod length_decoder;
mod payload_decoder;

pub use payload_decoder::PayloadDecoder;
