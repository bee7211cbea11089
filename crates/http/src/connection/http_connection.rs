use std::error::Error;
use std::fmt::Display;
use std::sync::Arc;

use bytes::{Bytes, BytesMut};
use futures::{SinkExt, StreamExt};
use http::header::CONNECTION;
use http::{HeaderValue, Method, StatusCode};
use http_body::Body;
use http_body_util::BodyExt;
use tokio::io::{AsyncRead, AsyncWrite, AsyncWriteExt};
use tokio_util::codec::{FramedRead, FramedWrite};
use tracing::{debug, error, info};

use crate::codec::{RequestDecoder, ResponseEncoder, payload_size_of};
use crate::ensure;
use crate::handler::Handler;
use crate::protocol::{HttpError, Message, ParseError, PayloadItem, PayloadSize, RequestHeader, ResponseHead, SendError};

/// Default upper bound for a buffered request body
pub const DEFAULT_MAX_BODY_SIZE: u64 = 64 * 1024;

/// Drives one client connection: decode a request, buffer its body, call the
/// handler, write the response, and repeat while the peer keeps the connection alive.
///
/// # Type Parameters
///
/// * `R`: The async readable stream type
/// * `W`: The async writable stream type
#[derive(Debug)]
pub struct HttpConnection<R, W> {
    framed_read: FramedRead<R, RequestDecoder>,
    framed_write: FramedWrite<W, ResponseEncoder>,
    max_body_size: u64,
}

impl<R, W> HttpConnection<R, W>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
{
    pub fn new(reader: R, writer: W) -> Self {
        Self {
            framed_read: FramedRead::with_capacity(reader, RequestDecoder::new(), 8 * 1024),
            framed_write: FramedWrite::new(writer, ResponseEncoder::new()),
            max_body_size: DEFAULT_MAX_BODY_SIZE,
        }
    }

    /// Requests whose body exceeds `max_body_size` bytes are answered with
    /// `413 Payload Too Large` and the connection is closed.
    #[must_use]
    pub fn with_max_body_size(mut self, max_body_size: u64) -> Self {
        self.max_body_size = max_body_size;
        self
    }

    pub async fn process<H>(mut self, handler: Arc<H>) -> Result<(), HttpError>
    where
        H: Handler,
        H::RespBody: Body<Data = Bytes> + Send,
        <H::RespBody as Body>::Error: Display,
    {
        loop {
            match self.framed_read.next().await {
                Some(Ok(Message::Header((header, payload_size)))) => {
                    let keep_alive = self.do_process(header, payload_size, handler.as_ref()).await?;
                    if !keep_alive {
                        debug!("peer asked to close, connection shutdown");
                        return Ok(());
                    }
                }

                Some(Ok(Message::Payload(_))) => {
                    error!("receive body while waiting for a request header");
                    self.send_error(StatusCode::BAD_REQUEST).await?;
                    return Err(ParseError::invalid_body("need header while receive body").into());
                }

                Some(Err(e)) => {
                    error!(cause = %e, "can't receive next request");
                    self.send_error(error_status(&e)).await?;
                    return Err(e.into());
                }

                None => {
                    debug!("can't read more request, connection shutdown");
                    return Ok(());
                }
            }
        }
    }

    /// Handles one request and reports whether the connection stays open.
    async fn do_process<H>(
        &mut self,
        header: RequestHeader,
        payload_size: PayloadSize,
        handler: &H,
    ) -> Result<bool, HttpError>
    where
        H: Handler,
        H::RespBody: Body<Data = Bytes> + Send,
        <H::RespBody as Body>::Error: Display,
    {
        let keep_alive = header.is_keep_alive();
        let head_only = *header.method() == Method::HEAD;

        let body = match self.read_body(&header, payload_size).await {
            Ok(body) => body,
            Err(HttpError::RequestError { source }) => {
                error!(cause = %source, "can't read request body");
                self.send_error(error_status(&source)).await?;
                return Err(source.into());
            }
            Err(e) => return Err(e),
        };

        let (mut head, body) = match handler.call(header.body(body)).await {
            Ok(response) => {
                let (parts, body) = response.into_parts();
                match body.collect().await {
                    Ok(collected) => (ResponseHead::from_parts(parts, ()), collected.to_bytes()),
                    Err(e) => {
                        error!(cause = %e, "resolve response body error");
                        error_response(StatusCode::INTERNAL_SERVER_ERROR)
                    }
                }
            }
            Err(e) => {
                let e: Box<dyn Error + Send + Sync> = e.into();
                error!(cause = %e, "handle request error");
                error_response(StatusCode::INTERNAL_SERVER_ERROR)
            }
        };

        if !keep_alive {
            head.headers_mut().insert(CONNECTION, HeaderValue::from_static("close"));
        }
        if head_only {
            self.framed_write.send((head, payload_size_of(&body))).await?;
        } else {
            self.framed_write.send((head, body)).await?;
        }

        Ok(keep_alive)
    }

    async fn read_body(&mut self, header: &RequestHeader, payload_size: PayloadSize) -> Result<Bytes, HttpError> {
        if let PayloadSize::Length(length) = payload_size {
            ensure!(length <= self.max_body_size, ParseError::too_large_body(length, self.max_body_size).into());
        }

        if header.expects_continue() && !payload_size.is_empty() {
            let writer = self.framed_write.get_mut();
            writer.write_all(b"HTTP/1.1 100 Continue\r\n\r\n").await.map_err(SendError::io)?;
            writer.flush().await.map_err(SendError::io)?;
            info!("receive expect request header, sent continue response");
        }

        let mut body = BytesMut::new();
        loop {
            match self.framed_read.next().await {
                Some(Ok(Message::Payload(PayloadItem::Chunk(bytes)))) => {
                    let size = (body.len() + bytes.len()) as u64;
                    ensure!(size <= self.max_body_size, ParseError::too_large_body(size, self.max_body_size).into());
                    body.extend_from_slice(&bytes);
                }
                Some(Ok(Message::Payload(PayloadItem::Eof))) => return Ok(body.freeze()),
                Some(Ok(Message::Header(_))) => {
                    return Err(ParseError::invalid_body("receive header while reading body").into());
                }
                Some(Err(e)) => return Err(e.into()),
                None => return Err(ParseError::invalid_body("connection closed before body completed").into()),
            }
        }
    }

    async fn send_error(&mut self, status: StatusCode) -> Result<(), HttpError> {
        let (mut head, body) = error_response(status);
        head.headers_mut().insert(CONNECTION, HeaderValue::from_static("close"));
        self.framed_write.send((head, body)).await?;
        Ok(())
    }
}

fn error_response(status: StatusCode) -> (ResponseHead, Bytes) {
    let mut head = ResponseHead::new(());
    *head.status_mut() = status;
    (head, Bytes::new())
}

fn error_status(e: &ParseError) -> StatusCode {
    match e {
        ParseError::TooLargeBody { .. } => StatusCode::PAYLOAD_TOO_LARGE,
        ParseError::TooLargeHeader { .. } => StatusCode::REQUEST_HEADER_FIELDS_TOO_LARGE,
        _ => StatusCode::BAD_REQUEST,
    }
}
