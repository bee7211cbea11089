//! Request header decoding on top of `httparse`.
//!
//! The decoder parses the request line and header block, builds a
//! [`RequestHeader`] and decides how the body is framed (see [`parse_payload`]).
//!
//! Limits: at most 64 headers, at most 8KB for the whole header block,
//! HTTP/1.0 and HTTP/1.1 only.

use bytes::{Buf, BytesMut};
use http::{HeaderValue, Method, Request, Uri, Version};
use httparse::{Error, Status};
use tokio_util::codec::Decoder;
use tracing::trace;

use crate::ensure;
use crate::protocol::{ParseError, PayloadSize, RequestHeader};

/// Maximum number of headers allowed in a request
const MAX_HEADER_NUM: usize = 64;

/// Maximum size in bytes allowed for the entire header section
const MAX_HEADER_BYTES: usize = 8 * 1024;

/// Decodes a request header block and the [`PayloadSize`] that follows it.
#[derive(Debug)]
pub struct HeaderDecoder;

impl Decoder for HeaderDecoder {
    type Item = (RequestHeader, PayloadSize);
    type Error = ParseError;

    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        if src.is_empty() {
            return Ok(None);
        }

        let mut headers = [httparse::EMPTY_HEADER; MAX_HEADER_NUM];
        let mut req = httparse::Request::new(&mut headers);

        let status = req.parse(src.as_ref()).map_err(|e| match e {
            Error::TooManyHeaders => ParseError::too_many_headers(MAX_HEADER_NUM),
            e => ParseError::invalid_header(e.to_string()),
        })?;

        let body_offset = match status {
            Status::Complete(body_offset) => body_offset,
            Status::Partial => {
                ensure!(src.len() <= MAX_HEADER_BYTES, ParseError::too_large_header(src.len(), MAX_HEADER_BYTES));
                return Ok(None);
            }
        };

        trace!(header_size = body_offset, "parsed request header");
        ensure!(body_offset <= MAX_HEADER_BYTES, ParseError::too_large_header(body_offset, MAX_HEADER_BYTES));

        let version = match req.version {
            Some(0) => Version::HTTP_10,
            Some(1) => Version::HTTP_11,
            v => return Err(ParseError::InvalidVersion(v)),
        };
        let method = req.method.ok_or(ParseError::InvalidMethod)?;
        let method = Method::from_bytes(method.as_bytes()).map_err(|_| ParseError::InvalidMethod)?;
        let uri = Uri::try_from(req.path.ok_or(ParseError::InvalidUri)?).map_err(|_| ParseError::InvalidUri)?;

        let mut builder = Request::builder().method(method).uri(uri).version(version);
        for header in req.headers.iter() {
            builder = builder.header(header.name, header.value);
        }
        let header = RequestHeader::from(builder.body(()).map_err(ParseError::invalid_header)?);

        src.advance(body_offset);

        let payload_size = parse_payload(&header)?;
        Ok(Some((header, payload_size)))
    }
}

/// Decides the body framing from `Transfer-Encoding` and `Content-Length`.
///
/// See <https://www.rfc-editor.org/rfc/rfc9112.html#name-message-body-length>.
fn parse_payload(header: &RequestHeader) -> Result<PayloadSize, ParseError> {
    if !header.need_body() {
        return Ok(PayloadSize::Empty);
    }

    let te_header = header.headers().get(http::header::TRANSFER_ENCODING);
    let cl_header = header.headers().get(http::header::CONTENT_LENGTH);

    match (te_header, cl_header) {
        (None, None) => Ok(PayloadSize::Empty),

        (Some(te_value), None) => {
            if is_chunked(te_value) {
                Ok(PayloadSize::Chunked)
            } else {
                Err(ParseError::invalid_header("transfer-encoding without chunked as final coding"))
            }
        }

        (None, Some(cl_value)) => {
            let cl_str = cl_value.to_str().map_err(|_| ParseError::invalid_content_length("value can't to_str"))?;
            let length = cl_str
                .trim()
                .parse::<u64>()
                .map_err(|_| ParseError::invalid_content_length(format!("value {cl_str} is not u64")))?;

            Ok(if length == 0 { PayloadSize::Empty } else { PayloadSize::Length(length) })
        }

        (Some(_), Some(_)) => {
            Err(ParseError::invalid_content_length("transfer-encoding and content-length both present in headers"))
        }
    }
}

/// `chunked` must be the last coding in `Transfer-Encoding`.
fn is_chunked(value: &HeaderValue) -> bool {
    value.as_bytes().rsplit(|b| *b == b',').next().is_some_and(|last| last.trim_ascii().eq_ignore_ascii_case(b"chunked"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;

    #[test]
    fn chunked_must_be_last_coding() {
        assert!(is_chunked(&HeaderValue::from_static("chunked")));
        assert!(is_chunked(&HeaderValue::from_static("gzip, chunked")));
        assert!(!is_chunked(&HeaderValue::from_static("chunked, gzip")));
        assert!(!is_chunked(&HeaderValue::from_static("gzip")));
    }

    #[test]
    fn leaves_body_in_buffer() {
        let str = indoc! {r##"
        POST /greeting HTTP/1.1
        Host: 127.0.0.1:8080
        Content-Length: 3

        123"##};

        let mut bytes = BytesMut::from(str);
        let (header, payload_size) = HeaderDecoder.decode(&mut bytes).unwrap().unwrap();

        assert_eq!(header.method(), &Method::POST);
        assert_eq!(payload_size, PayloadSize::Length(3));
        assert_eq!(&bytes[..], &b"123"[..]);
    }

    #[test]
    fn from_curl() {
        let str = indoc! {r##"
        GET /greeting?name=John HTTP/1.1
        Host: 127.0.0.1:8080
        User-Agent: curl/8.4.0
        Accept: */*

        "##};

        let mut buf = BytesMut::from(str);
        let (header, payload_size) = HeaderDecoder.decode(&mut buf).unwrap().unwrap();

        assert!(payload_size.is_empty());
        assert!(buf.is_empty());

        assert_eq!(header.method(), &Method::GET);
        assert_eq!(header.version(), Version::HTTP_11);
        assert_eq!(header.uri().path(), "/greeting");
        assert_eq!(header.uri().query(), Some("name=John"));
        assert_eq!(header.headers().len(), 3);
        assert_eq!(header.headers().get(http::header::HOST), Some(&HeaderValue::from_static("127.0.0.1:8080")));
        assert_eq!(header.headers().get(http::header::USER_AGENT), Some(&HeaderValue::from_static("curl/8.4.0")));
    }

    #[test]
    fn partial_header_needs_more_data() {
        let mut buf = BytesMut::from("GET /greeting HTTP/1.1\r\nHost: exa");
        assert!(HeaderDecoder.decode(&mut buf).unwrap().is_none());
        assert_eq!(buf.len(), 33);
    }

    #[test]
    fn rejects_oversized_header() {
        let mut buf = BytesMut::from("GET / HTTP/1.1\r\n");
        buf.extend_from_slice(format!("X-Big: {}\r\n", "a".repeat(MAX_HEADER_BYTES)).as_bytes());

        let result = HeaderDecoder.decode(&mut buf);
        assert!(matches!(result, Err(ParseError::TooLargeHeader { .. })));
    }

    #[test]
    fn rejects_unsupported_version() {
        let mut buf = BytesMut::from("GET / HTTP/2.0\r\n\r\n");
        assert!(HeaderDecoder.decode(&mut buf).is_err());
    }

    #[test]
    fn chunked_and_length_conflict() {
        let str = indoc! {r##"
        POST /greeting HTTP/1.1
        Transfer-Encoding: chunked
        Content-Length: 3

        "##};

        let mut buf = BytesMut::from(str);
        let result = HeaderDecoder.decode(&mut buf);
        assert!(matches!(result, Err(ParseError::InvalidContentLength { .. })));
    }

    #[test]
    fn body_is_ignored_for_delete() {
        let str = indoc! {r##"
        DELETE /greeting HTTP/1.1
        Content-Length: 10

        "##};

        let mut buf = BytesMut::from(str);
        let (_, payload_size) = HeaderDecoder.decode(&mut buf).unwrap().unwrap();
        assert_eq!(payload_size, PayloadSize::Empty);
    }
}
