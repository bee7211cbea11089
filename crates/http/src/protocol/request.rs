use http::header::{CONNECTION, EXPECT};
use http::request::Parts;
use http::{HeaderMap, Method, Request, Uri, Version};

/// The head of a request: method, uri, version and headers, without a body.
#[derive(Debug)]
pub struct RequestHeader {
    inner: Request<()>,
}

impl AsRef<Request<()>> for RequestHeader {
    fn as_ref(&self) -> &Request<()> {
        &self.inner
    }
}

impl RequestHeader {
    pub fn into_inner(self) -> Request<()> {
        self.inner
    }

    /// Attaches a body, producing the request handed to the handler.
    pub fn body<T>(self, body: T) -> Request<T> {
        self.inner.map(|()| body)
    }

    pub fn method(&self) -> &Method {
        self.inner.method()
    }

    pub fn uri(&self) -> &Uri {
        self.inner.uri()
    }

    pub fn version(&self) -> Version {
        self.inner.version()
    }

    pub fn headers(&self) -> &HeaderMap {
        self.inner.headers()
    }

    /// Whether the request method may carry a body at all.
    pub fn need_body(&self) -> bool {
        !matches!(self.method(), &Method::GET | &Method::HEAD | &Method::DELETE | &Method::OPTIONS | &Method::CONNECT)
    }

    /// Whether the peer asked for `100 Continue` before sending the body.
    pub fn expects_continue(&self) -> bool {
        self.headers()
            .get(EXPECT)
            .is_some_and(|value| value.as_bytes().eq_ignore_ascii_case(b"100-continue"))
    }

    /// Whether the connection stays open after this request.
    ///
    /// HTTP/1.1 defaults to keep-alive unless `Connection: close` is sent,
    /// HTTP/1.0 defaults to close unless `Connection: keep-alive` is sent.
    pub fn is_keep_alive(&self) -> bool {
        let has_token = |token: &str| {
            self.headers().get_all(CONNECTION).iter().any(|value| {
                value.to_str().is_ok_and(|s| s.split(',').any(|part| part.trim().eq_ignore_ascii_case(token)))
            })
        };

        match self.version() {
            Version::HTTP_10 => has_token("keep-alive"),
            _ => !has_token("close"),
        }
    }
}

impl From<Parts> for RequestHeader {
    #[inline]
    fn from(parts: Parts) -> Self {
        Self { inner: Request::from_parts(parts, ()) }
    }
}

impl From<Request<()>> for RequestHeader {
    #[inline]
    fn from(inner: Request<()>) -> Self {
        Self { inner }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header(version: Version, connection: Option<&str>) -> RequestHeader {
        let mut builder = Request::builder().method(Method::GET).uri("/").version(version);
        if let Some(value) = connection {
            builder = builder.header(CONNECTION, value);
        }
        builder.body(()).unwrap().into()
    }

    #[test]
    fn keep_alive_defaults() {
        assert!(header(Version::HTTP_11, None).is_keep_alive());
        assert!(!header(Version::HTTP_10, None).is_keep_alive());
    }

    #[test]
    fn keep_alive_from_connection_header() {
        assert!(!header(Version::HTTP_11, Some("close")).is_keep_alive());
        assert!(!header(Version::HTTP_11, Some("Upgrade, Close")).is_keep_alive());
        assert!(header(Version::HTTP_10, Some("Keep-Alive")).is_keep_alive());
    }

    #[test]
    fn expect_continue() {
        let header: RequestHeader =
            Request::builder().method(Method::POST).header(EXPECT, "100-Continue").body(()).unwrap().into();
        assert!(header.expects_continue());
        assert!(header.need_body());

        let header: RequestHeader = Request::builder().method(Method::DELETE).body(()).unwrap().into();
        assert!(!header.expects_continue());
        assert!(!header.need_body());
    }
}
