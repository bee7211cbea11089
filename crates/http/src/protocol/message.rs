use bytes::Bytes;

/// An item produced by the request decoder.
///
/// Every request starts with exactly one `Header`, followed by payload items
/// that always end with [`PayloadItem::Eof`], even for requests without a body.
#[derive(Debug)]
pub enum Message<T> {
    Header(T),
    Payload(PayloadItem),
}

/// A piece of a request body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PayloadItem {
    Chunk(Bytes),
    Eof,
}

/// How the body of a message is framed on the wire.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum PayloadSize {
    /// `Content-Length` framed body
    Length(u64),
    /// `Transfer-Encoding: chunked` body
    Chunked,
    /// no body at all
    Empty,
}

impl PayloadSize {
    #[inline]
    pub fn is_chunked(&self) -> bool {
        matches!(self, PayloadSize::Chunked)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        matches!(self, PayloadSize::Empty)
    }
}

impl<T> Message<T> {
    #[inline]
    pub fn is_payload(&self) -> bool {
        matches!(self, Message::Payload(_))
    }

    #[inline]
    pub fn is_header(&self) -> bool {
        matches!(self, Message::Header(_))
    }
}

impl PayloadItem {
    #[inline]
    pub fn is_eof(&self) -> bool {
        matches!(self, PayloadItem::Eof)
    }

    #[inline]
    pub fn is_chunk(&self) -> bool {
        matches!(self, PayloadItem::Chunk(_))
    }

    /// Returns the chunk data, `None` for [`PayloadItem::Eof`].
    pub fn as_bytes(&self) -> Option<&Bytes> {
        match self {
            PayloadItem::Chunk(bytes) => Some(bytes),
            PayloadItem::Eof => None,
        }
    }
}
