//! Converting handler results into HTTP responses.
//!
//! Anything a handler returns implements [`Responder`]. Extraction errors go
//! through the same trait, so a rejected request and a handled one are
//! rendered the same way.

use crate::extract::Json;
use crate::{RequestContext, ResponseBody};
use http::header::{CONTENT_TYPE, HeaderValue};
use http::{HeaderMap, Response, StatusCode};
use serde::Serialize;
use std::convert::Infallible;
use tracing::error;

pub trait Responder {
    fn response_to(self, req: &RequestContext) -> Response<ResponseBody>;
}

impl<T: Responder, E: Responder> Responder for Result<T, E> {
    fn response_to(self, req: &RequestContext) -> Response<ResponseBody> {
        match self {
            Ok(t) => t.response_to(req),
            Err(e) => e.response_to(req),
        }
    }
}

/// `None` is an empty `200 OK`.
impl<T: Responder> Responder for Option<T> {
    fn response_to(self, req: &RequestContext) -> Response<ResponseBody> {
        match self {
            Some(t) => t.response_to(req),
            None => Response::new(ResponseBody::empty()),
        }
    }
}

impl<B> Responder for Response<B>
where
    B: Into<ResponseBody>,
{
    fn response_to(self, _req: &RequestContext) -> Response<ResponseBody> {
        self.map(Into::into)
    }
}

impl<T: Responder> Responder for (StatusCode, T) {
    fn response_to(self, req: &RequestContext) -> Response<ResponseBody> {
        let (status, responder) = self;
        let mut response = responder.response_to(req);
        *response.status_mut() = status;
        response
    }
}

/// Headers from the map are added to, and override, those set by `T`.
impl<T: Responder> Responder for (StatusCode, HeaderMap, T) {
    fn response_to(self, req: &RequestContext) -> Response<ResponseBody> {
        let (status, headers, responder) = self;
        let mut response = (status, responder).response_to(req);
        response.headers_mut().extend(headers);
        response
    }
}

impl<T: Responder> Responder for Box<T> {
    fn response_to(self, req: &RequestContext) -> Response<ResponseBody> {
        (*self).response_to(req)
    }
}

impl Responder for () {
    fn response_to(self, _req: &RequestContext) -> Response<ResponseBody> {
        Response::new(ResponseBody::empty())
    }
}

impl Responder for &'static str {
    fn response_to(self, _req: &RequestContext) -> Response<ResponseBody> {
        with_content_type(ResponseBody::from(self), "text/plain; charset=utf-8")
    }
}

impl Responder for String {
    fn response_to(self, _req: &RequestContext) -> Response<ResponseBody> {
        with_content_type(ResponseBody::from(self), "text/plain; charset=utf-8")
    }
}

impl Responder for Infallible {
    fn response_to(self, _req: &RequestContext) -> Response<ResponseBody> {
        match self {}
    }
}

/// Serializes `T` as the JSON body; a serialization failure is a `500`.
impl<T: Serialize> Responder for Json<T> {
    fn response_to(self, _req: &RequestContext) -> Response<ResponseBody> {
        match serde_json::to_vec(&self.0) {
            Ok(bytes) => with_content_type(ResponseBody::from(bytes), "application/json"),
            Err(e) => {
                error!(cause = %e, "serialize json response error");
                let mut response = Response::new(ResponseBody::empty());
                *response.status_mut() = StatusCode::INTERNAL_SERVER_ERROR;
                response
            }
        }
    }
}

/// An HTML page.
#[derive(Debug, Clone)]
pub struct Html<T>(pub T);

impl<T: Into<ResponseBody>> Responder for Html<T> {
    fn response_to(self, _req: &RequestContext) -> Response<ResponseBody> {
        with_content_type(self.0.into(), "text/html; charset=utf-8")
    }
}

/// `404 Not Found`, the answer for paths no route matches.
#[derive(Debug, Clone, Copy, Default)]
pub struct NotFound;

impl Responder for NotFound {
    fn response_to(self, req: &RequestContext) -> Response<ResponseBody> {
        (StatusCode::NOT_FOUND, "404 Not Found").response_to(req)
    }
}

fn with_content_type(body: ResponseBody, content_type: &'static str) -> Response<ResponseBody> {
    let mut response = Response::new(body);
    response.headers_mut().insert(CONTENT_TYPE, HeaderValue::from_static(content_type));
    response
}
