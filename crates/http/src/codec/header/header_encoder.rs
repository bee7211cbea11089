//! Response status line and header serialization.

use std::io;
use std::io::{ErrorKind, Write};

use bytes::{BufMut, BytesMut};
use http::{HeaderValue, StatusCode, Version, header};
use tokio_util::codec::Encoder;
use tracing::error;

use crate::protocol::{PayloadSize, ResponseHead, SendError};

/// Initial buffer size reserved for the response head
const INIT_HEADER_SIZE: usize = 1024;

/// Encodes a [`ResponseHead`] and fixes up the framing headers for its [`PayloadSize`].
///
/// `Content-Length` always reflects the payload size, except for statuses that
/// must not carry a body (1xx, 204, 304), which get no length header at all.
#[derive(Debug)]
pub struct HeaderEncoder;

impl Encoder<(ResponseHead, PayloadSize)> for HeaderEncoder {
    type Error = SendError;

    fn encode(&mut self, item: (ResponseHead, PayloadSize), dst: &mut BytesMut) -> Result<(), Self::Error> {
        let (mut head, payload_size) = item;

        dst.reserve(INIT_HEADER_SIZE);
        match head.version() {
            Version::HTTP_11 | Version::HTTP_10 => {
                let status = head.status();
                write!(FastWrite(dst), "HTTP/1.1 {} {}\r\n", status.as_str(), status.canonical_reason().unwrap_or(""))?;
            }
            v => {
                error!(http_version = ?v, "unsupported http version");
                return Err(io::Error::from(ErrorKind::Unsupported).into());
            }
        }

        head.headers_mut().remove(header::TRANSFER_ENCODING);
        if status_without_body(head.status()) {
            head.headers_mut().remove(header::CONTENT_LENGTH);
        } else {
            let length = match payload_size {
                PayloadSize::Length(n) => HeaderValue::from(n),
                PayloadSize::Empty => HeaderValue::from_static("0"),
                PayloadSize::Chunked => {
                    error!("chunked response is not supported");
                    return Err(io::Error::from(ErrorKind::InvalidInput).into());
                }
            };
            head.headers_mut().insert(header::CONTENT_LENGTH, length);
        }

        for (name, value) in head.headers() {
            dst.put_slice(name.as_ref());
            dst.put_slice(b": ");
            dst.put_slice(value.as_bytes());
            dst.put_slice(b"\r\n");
        }
        dst.put_slice(b"\r\n");
        Ok(())
    }
}

/// Statuses that never carry a message body.
pub(crate) fn status_without_body(status: StatusCode) -> bool {
    status.is_informational() || status == StatusCode::NO_CONTENT || status == StatusCode::NOT_MODIFIED
}

/// `io::Write` adapter over `BytesMut`, the space is reserved up front.
struct FastWrite<'a>(&'a mut BytesMut);

impl Write for FastWrite<'_> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.put_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
