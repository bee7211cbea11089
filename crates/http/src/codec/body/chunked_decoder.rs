//! `Transfer-Encoding: chunked` bodies, see
//! [RFC 9112 Section 7.1](https://www.rfc-editor.org/rfc/rfc9112.html#name-chunked-transfer-coding).
//!
//! Chunk extensions and trailer fields are accepted and dropped.

use std::cmp;

use bytes::{Buf, BytesMut};
use tokio_util::codec::Decoder;
use tracing::trace;

use crate::ensure;
use crate::protocol::{ParseError, PayloadItem};

/// Upper bound for a chunk size line or a trailer line
const MAX_LINE_BYTES: usize = 4 * 1024;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChunkedDecoder {
    state: ChunkedState,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ChunkedState {
    /// expecting `<hex size>[;ext]\r\n`
    Size,
    /// inside chunk data, with the bytes still to read
    Data(u64),
    /// expecting the `\r\n` that closes a chunk
    DataEnd,
    /// skipping trailer lines until an empty one
    Trailer,
    /// last chunk and trailers consumed
    Done,
}

impl ChunkedDecoder {
    pub fn new() -> Self {
        Self { state: ChunkedState::Size }
    }
}

impl Default for ChunkedDecoder {
    fn default() -> Self {
        Self::new()
    }
}

impl Decoder for ChunkedDecoder {
    type Item = PayloadItem;
    type Error = ParseError;

    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        loop {
            match self.state {
                ChunkedState::Size => {
                    let Some(line_len) = find_line(src)? else {
                        return Ok(None);
                    };
                    let size = parse_chunk_size(&src[..line_len])?;
                    src.advance(line_len + 2);
                    trace!(chunk_size = size, "read chunk size");
                    self.state = if size == 0 { ChunkedState::Trailer } else { ChunkedState::Data(size) };
                }

                ChunkedState::Data(remaining) => {
                    if src.is_empty() {
                        return Ok(None);
                    }
                    let len = cmp::min(remaining, src.len() as u64);
                    let bytes = src.split_to(usize::try_from(len).map_err(ParseError::invalid_body)?).freeze();
                    self.state =
                        if remaining == len { ChunkedState::DataEnd } else { ChunkedState::Data(remaining - len) };
                    return Ok(Some(PayloadItem::Chunk(bytes)));
                }

                ChunkedState::DataEnd => {
                    if src.len() < 2 {
                        return Ok(None);
                    }
                    ensure!(&src[..2] == b"\r\n", ParseError::invalid_body("missing CRLF after chunk data"));
                    src.advance(2);
                    self.state = ChunkedState::Size;
                }

                ChunkedState::Trailer => {
                    let Some(line_len) = find_line(src)? else {
                        return Ok(None);
                    };
                    src.advance(line_len + 2);
                    if line_len == 0 {
                        self.state = ChunkedState::Done;
                    }
                }

                ChunkedState::Done => return Ok(Some(PayloadItem::Eof)),
            }
        }
    }
}

/// Length of the next CRLF terminated line, without the CRLF.
fn find_line(src: &BytesMut) -> Result<Option<usize>, ParseError> {
    match src.windows(2).position(|w| w == b"\r\n") {
        Some(len) => {
            ensure!(len <= MAX_LINE_BYTES, ParseError::invalid_body("chunk line too long"));
            Ok(Some(len))
        }
        None => {
            ensure!(src.len() <= MAX_LINE_BYTES, ParseError::invalid_body("chunk line too long"));
            Ok(None)
        }
    }
}

fn parse_chunk_size(line: &[u8]) -> Result<u64, ParseError> {
    let size = line.split(|b| *b == b';').next().unwrap_or_default().trim_ascii();
    ensure!(!size.is_empty(), ParseError::invalid_body("empty chunk size"));

    let size = std::str::from_utf8(size).map_err(ParseError::invalid_body)?;
    u64::from_str_radix(size, 16).map_err(|e| ParseError::invalid_body(format!("invalid chunk size {size}: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode_all(decoder: &mut ChunkedDecoder, buffer: &mut BytesMut) -> (Vec<u8>, bool) {
        let mut body = Vec::new();
        loop {
            match decoder.decode(buffer).unwrap() {
                Some(PayloadItem::Chunk(bytes)) => body.extend_from_slice(&bytes),
                Some(PayloadItem::Eof) => return (body, true),
                None => return (body, false),
            }
        }
    }

    #[test]
    fn decodes_chunks() {
        let mut buffer = BytesMut::from(&b"5\r\nHello\r\n8;name=value\r\n, World!\r\n0\r\n\r\nGET"[..]);
        let mut decoder = ChunkedDecoder::new();

        let (body, eof) = decode_all(&mut decoder, &mut buffer);
        assert!(eof);
        assert_eq!(body, b"Hello, World!");
        assert_eq!(&buffer[..], b"GET");
    }

    #[test]
    fn skips_trailers() {
        let mut buffer = BytesMut::from(&b"1\r\na\r\n0\r\nExpires: never\r\n\r\n"[..]);
        let mut decoder = ChunkedDecoder::new();

        let (body, eof) = decode_all(&mut decoder, &mut buffer);
        assert!(eof);
        assert_eq!(body, b"a");
        assert!(buffer.is_empty());
    }

    #[test]
    fn resumes_across_partial_input() {
        let mut decoder = ChunkedDecoder::new();
        let mut buffer = BytesMut::from(&b"A\r\n01234"[..]);

        let (body, eof) = decode_all(&mut decoder, &mut buffer);
        assert!(!eof);
        assert_eq!(body, b"01234");

        buffer.extend_from_slice(b"56789\r\n0\r\n\r\n");
        let (body, eof) = decode_all(&mut decoder, &mut buffer);
        assert!(eof);
        assert_eq!(body, b"56789");
    }

    #[test]
    fn rejects_bad_size() {
        let mut buffer = BytesMut::from(&b"zz\r\n"[..]);
        assert!(ChunkedDecoder::new().decode(&mut buffer).is_err());
    }

    #[test]
    fn rejects_missing_crlf() {
        let mut buffer = BytesMut::from(&b"1\r\naXX"[..]);
        let mut decoder = ChunkedDecoder::new();

        assert!(decoder.decode(&mut buffer).unwrap().unwrap().is_chunk());
        assert!(decoder.decode(&mut buffer).is_err());
    }
}
