use bytes::{Bytes, BytesMut};
use tokio_util::codec::Encoder;
use tracing::warn;

use crate::codec::header::HeaderEncoder;
use crate::codec::header::status_without_body;
use crate::protocol::{PayloadSize, ResponseHead, SendError};

/// Encodes a response head together with its complete body.
#[derive(Debug)]
pub struct ResponseEncoder {
    header_encoder: HeaderEncoder,
}

impl ResponseEncoder {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Default for ResponseEncoder {
    fn default() -> Self {
        Self { header_encoder: HeaderEncoder }
    }
}

impl Encoder<(ResponseHead, Bytes)> for ResponseEncoder {
    type Error = SendError;

    fn encode(&mut self, item: (ResponseHead, Bytes), dst: &mut BytesMut) -> Result<(), Self::Error> {
        let (head, body) = item;

        if status_without_body(head.status()) {
            if !body.is_empty() {
                warn!(status = %head.status(), body_size = body.len(), "dropping body of a bodiless response");
            }
            return self.header_encoder.encode((head, PayloadSize::Empty), dst);
        }

        self.header_encoder.encode((head, payload_size_of(&body)), dst)?;
        dst.extend_from_slice(&body);
        Ok(())
    }
}

/// Head-only responses, as sent for `HEAD` requests: the framing headers
/// describe `PayloadSize` but no body follows.
impl Encoder<(ResponseHead, PayloadSize)> for ResponseEncoder {
    type Error = SendError;

    fn encode(&mut self, item: (ResponseHead, PayloadSize), dst: &mut BytesMut) -> Result<(), Self::Error> {
        self.header_encoder.encode(item, dst)
    }
}

pub(crate) fn payload_size_of(body: &Bytes) -> PayloadSize {
    if body.is_empty() { PayloadSize::Empty } else { PayloadSize::Length(body.len() as u64) }
}
