use crate::extract::from_request::FromRequest;
use crate::RequestContext;
use bytes::Bytes;
use http::{HeaderMap, Method};
use std::convert::Infallible;

impl FromRequest for Method {
    type Error = Infallible;

    fn from_request(req: &RequestContext, _body: &Bytes) -> Result<Self, Self::Error> {
        Ok(req.method().clone())
    }
}

impl FromRequest for HeaderMap {
    type Error = Infallible;

    fn from_request(req: &RequestContext, _body: &Bytes) -> Result<Self, Self::Error> {
        Ok(req.headers().clone())
    }
}
