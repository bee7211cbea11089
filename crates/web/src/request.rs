//! Request information handed to extractors, handlers and interceptors.
//!
//! - `RequestContext`: the request header plus the path parameters of the matched route
//! - `PathParams`: named segments captured by the router, e.g. `id` in `/users/{id}`

use greeter_http::protocol::RequestHeader;
use http::{HeaderMap, Method, Uri, Version};
use matchit::Params;

/// A borrowed view of the current request.
///
/// The body is not part of the context, it is passed to extractors separately.
#[derive(Debug)]
pub struct RequestContext<'server: 'req, 'req> {
    request_header: &'req RequestHeader,
    path_params: &'req PathParams<'server, 'req>,
}

impl<'server, 'req> RequestContext<'server, 'req> {
    pub fn new(request_header: &'req RequestHeader, path_params: &'req PathParams<'server, 'req>) -> Self {
        Self { request_header, path_params }
    }

    pub fn request_header(&self) -> &RequestHeader {
        self.request_header
    }

    pub fn method(&self) -> &Method {
        self.request_header.method()
    }

    pub fn uri(&self) -> &Uri {
        self.request_header.uri()
    }

    pub fn version(&self) -> Version {
        self.request_header.version()
    }

    pub fn headers(&self) -> &HeaderMap {
        self.request_header.headers()
    }

    pub fn path_params(&self) -> &PathParams<'server, 'req> {
        self.path_params
    }
}

/// Path parameters captured while matching the request path.
#[derive(Debug, Clone)]
pub struct PathParams<'server, 'req> {
    params: Option<Params<'server, 'req>>,
}

impl<'server, 'req> PathParams<'server, 'req> {
    #[inline]
    pub fn empty() -> Self {
        Self { params: None }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.params.as_ref().is_none_or(Params::is_empty)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.params.as_ref().map_or(0, Params::len)
    }

    /// Returns `None` when the route has no parameter called `key`.
    #[inline]
    pub fn get(&self, key: impl AsRef<str>) -> Option<&'req str> {
        self.params.as_ref().and_then(|params| params.get(key))
    }
}

impl<'server, 'req> From<Params<'server, 'req>> for PathParams<'server, 'req> {
    fn from(params: Params<'server, 'req>) -> Self {
        if params.is_empty() { Self::empty() } else { Self { params: Some(params) } }
    }
}
