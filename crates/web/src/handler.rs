use crate::fn_trait::FnTrait;
use crate::extract::FromRequest;
use crate::responder::Responder;
use crate::{RequestContext, ResponseBody};
use async_trait::async_trait;
use bytes::Bytes;
use http::Response;
use std::marker::PhantomData;

/// A routed endpoint. Rejections and failures are already rendered into the
/// response, so invoking a handler cannot fail.
#[async_trait]
pub trait RequestHandler: Send + Sync {
    async fn invoke(&self, req: &RequestContext<'_, '_>, body: Bytes) -> Response<ResponseBody>;
}

/// a `FnTrait` holder which represents any async Fn
pub struct FnHandler<F, Args> {
    f: F,
    _phantom: PhantomData<fn(Args)>,
}

impl<F, Args> FnHandler<F, Args>
where
    F: FnTrait<Args>,
{
    fn new(f: F) -> Self {
        Self { f, _phantom: PhantomData }
    }
}

impl<F, Args> std::fmt::Debug for FnHandler<F, Args> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FnHandler").field("f", &std::any::type_name::<F>()).finish()
    }
}

/// Turns an async function or closure whose arguments are all extractors into
/// a [`RequestHandler`].
pub fn handler_fn<F, Args>(f: F) -> FnHandler<F, Args>
where
    F: FnTrait<Args>,
{
    FnHandler::new(f)
}

#[async_trait]
impl<F, Args> RequestHandler for FnHandler<F, Args>
where
    F: FnTrait<Args>,
    F::Output: Responder,
    Args: FromRequest + Send,
{
    async fn invoke(&self, req: &RequestContext<'_, '_>, body: Bytes) -> Response<ResponseBody> {
        let args = match Args::from_request(req, &body) {
            Ok(args) => args,
            Err(rejection) => return rejection.response_to(req),
        };
        self.f.call(args).await.response_to(req)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::PathParams;
    use greeter_http::protocol::RequestHeader;
    use http::{Method, Request, StatusCode};
    use http_body_util::BodyExt;

    fn assert_is_handler<T: RequestHandler>(_handler: &T) {
        // no op
    }

    #[test]
    fn fn_is_http_handler() {
        async fn get(_method: Method) {}
        async fn post(_method: Method, _body: String) -> String {
            String::new()
        }

        assert_is_handler(&handler_fn(get));
        assert_is_handler(&handler_fn(post));
    }

    #[tokio::test]
    async fn rejection_short_circuits() {
        async fn echo(body: String) -> String {
            body
        }

        let header: RequestHeader = Request::builder().method(Method::POST).body(()).unwrap().into_parts().0.into();
        let params = PathParams::empty();
        let req = RequestContext::new(&header, &params);
        let handler = handler_fn(echo);

        let response = handler.invoke(&req, Bytes::from_static(b"hi")).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.into_body().collect().await.unwrap().to_bytes(), "hi");

        let response = handler.invoke(&req, Bytes::from_static(&[0xff, 0xfe])).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
