//! Hooks that run around every request.
//!
//! [`Interceptors`] calls `on_request` in registration order before the
//! request is dispatched, and `on_response` in the same order once the
//! response is built (including 404 and 405 answers).

use crate::{RequestContext, ResponseBody};
use async_trait::async_trait;
use http::Response;
use std::fmt;

#[async_trait]
pub trait Interceptor: Send + Sync {
    async fn on_request(&self, _req: &RequestContext<'_, '_>) {}

    async fn on_response(&self, _req: &RequestContext<'_, '_>, _resp: &mut Response<ResponseBody>) {}
}

pub struct Interceptors {
    inner: Vec<Box<dyn Interceptor>>,
}

#[async_trait]
impl Interceptor for Interceptors {
    async fn on_request(&self, req: &RequestContext<'_, '_>) {
        for interceptor in &self.inner {
            interceptor.on_request(req).await;
        }
    }

    async fn on_response(&self, req: &RequestContext<'_, '_>, resp: &mut Response<ResponseBody>) {
        for interceptor in &self.inner {
            interceptor.on_response(req, resp).await;
        }
    }
}

impl Interceptors {
    pub fn builder() -> InterceptorsBuilder {
        InterceptorsBuilder::new()
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

impl Default for Interceptors {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl fmt::Debug for Interceptors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Interceptors").field("len", &self.inner.len()).finish()
    }
}

#[derive(Default)]
pub struct InterceptorsBuilder {
    inner: Vec<Box<dyn Interceptor>>,
}

impl InterceptorsBuilder {
    fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn add_last<I: Interceptor + 'static>(mut self, interceptor: I) -> Self {
        self.inner.push(Box::new(interceptor));
        self
    }

    #[must_use]
    pub fn add_first<I: Interceptor + 'static>(mut self, interceptor: I) -> Self {
        self.inner.insert(0, Box::new(interceptor));
        self
    }

    pub fn build(self) -> Interceptors {
        Interceptors { inner: self.inner }
    }
}

impl fmt::Debug for InterceptorsBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InterceptorsBuilder").field("len", &self.inner.len()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PathParams;
    use greeter_http::protocol::RequestHeader;
    use http::{HeaderValue, Request};
    use std::sync::{Arc, Mutex};

    struct Tag {
        name: &'static str,
        seen: Arc<Mutex<Vec<String>>>,
    }

    #[async_trait]
    impl Interceptor for Tag {
        async fn on_request(&self, _req: &RequestContext<'_, '_>) {
            self.seen.lock().unwrap().push(format!("request {}", self.name));
        }

        async fn on_response(&self, _req: &RequestContext<'_, '_>, resp: &mut Response<ResponseBody>) {
            self.seen.lock().unwrap().push(format!("response {}", self.name));
            resp.headers_mut().insert("x-tag", HeaderValue::from_static(self.name));
        }
    }

    #[tokio::test]
    async fn runs_in_registration_order() {
        let seen = Arc::new(Mutex::new(vec![]));
        let interceptors = Interceptors::builder()
            .add_last(Tag { name: "b", seen: seen.clone() })
            .add_first(Tag { name: "a", seen: seen.clone() })
            .build();

        let header: RequestHeader = Request::builder().body(()).unwrap().into_parts().0.into();
        let params = PathParams::empty();
        let req = RequestContext::new(&header, &params);
        let mut resp = Response::new(ResponseBody::empty());

        interceptors.on_request(&req).await;
        interceptors.on_response(&req, &mut resp).await;

        assert_eq!(*seen.lock().unwrap(), ["request a", "request b", "response a", "response b"]);
        assert_eq!(resp.headers()["x-tag"], "b");
    }
}
