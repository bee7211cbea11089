use crate::responder::Responder;
use crate::RequestContext;
use bytes::Bytes;
use std::convert::Infallible;

/// Builds a handler argument from the request header and the buffered body.
pub trait FromRequest: Sized {
    type Error: Responder;

    fn from_request(req: &RequestContext, body: &Bytes) -> Result<Self, Self::Error>;
}

/// Never fails: a rejected `T` becomes `None`.
impl<T> FromRequest for Option<T>
where
    T: FromRequest,
{
    type Error = Infallible;

    fn from_request(req: &RequestContext, body: &Bytes) -> Result<Self, Self::Error> {
        Ok(T::from_request(req, body).ok())
    }
}

/// Hands the rejection to the handler instead of answering with it.
impl<T> FromRequest for Result<T, T::Error>
where
    T: FromRequest,
{
    type Error = Infallible;

    fn from_request(req: &RequestContext, body: &Bytes) -> Result<Self, Self::Error> {
        Ok(T::from_request(req, body))
    }
}

impl FromRequest for () {
    type Error = Infallible;

    fn from_request(_req: &RequestContext, _body: &Bytes) -> Result<Self, Self::Error> {
        Ok(())
    }
}
