//! `Content-Length` framed bodies, see
//! [RFC 9112 Section 6.2](https://www.rfc-editor.org/rfc/rfc9112.html#name-content-length).

use std::cmp;

use bytes::BytesMut;
use tokio_util::codec::Decoder;

use crate::protocol::{ParseError, PayloadItem};

/// Yields whatever part of the remaining `length` bytes is buffered, then `Eof`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LengthDecoder {
    remaining: u64,
}

impl LengthDecoder {
    pub fn new(length: u64) -> Self {
        Self { remaining: length }
    }
}

impl Decoder for LengthDecoder {
    type Item = PayloadItem;
    type Error = ParseError;

    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        if self.remaining == 0 {
            return Ok(Some(PayloadItem::Eof));
        }

        if src.is_empty() {
            return Ok(None);
        }

        let len = cmp::min(self.remaining, src.len() as u64);
        let bytes = src.split_to(usize::try_from(len).map_err(ParseError::invalid_body)?).freeze();
        self.remaining -= len;

        Ok(Some(PayloadItem::Chunk(bytes)))
    }
}
