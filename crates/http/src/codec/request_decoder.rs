//! Streaming request decoding.
//!
//! The decoder alternates between two phases: while no body is pending it
//! parses a header block with [`HeaderDecoder`]; once a header is out, it hands
//! the buffer to a [`PayloadDecoder`] until that one reports `Eof`.

use bytes::BytesMut;
use tokio_util::codec::Decoder;

use crate::codec::body::PayloadDecoder;
use crate::codec::header::HeaderDecoder;
use crate::protocol::{Message, ParseError, PayloadItem, PayloadSize, RequestHeader};

#[derive(Debug)]
pub struct RequestDecoder {
    header_decoder: HeaderDecoder,
    payload_decoder: Option<PayloadDecoder>,
}

impl RequestDecoder {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Default for RequestDecoder {
    fn default() -> Self {
        Self { header_decoder: HeaderDecoder, payload_decoder: None }
    }
}

impl Decoder for RequestDecoder {
    type Item = Message<(RequestHeader, PayloadSize)>;
    type Error = ParseError;

    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        if let Some(payload_decoder) = &mut self.payload_decoder {
            let item = payload_decoder.decode(src)?;
            if item.as_ref().is_some_and(PayloadItem::is_eof) {
                self.payload_decoder = None;
            }
            return Ok(item.map(Message::Payload));
        }

        let message = self.header_decoder.decode(src)?.map(|(header, payload_size)| {
            self.payload_decoder = Some(payload_size.into());
            Message::Header((header, payload_size))
        });

        Ok(message)
    }
}
