use crate::extract::{ExtractError, FromRequest, Json};
use crate::RequestContext;
use bytes::Bytes;
use http::header::CONTENT_TYPE;
use serde::Deserialize;

impl FromRequest for Bytes {
    type Error = ExtractError;

    fn from_request(_req: &RequestContext, body: &Bytes) -> Result<Self, Self::Error> {
        Ok(body.clone())
    }
}

impl FromRequest for String {
    type Error = ExtractError;

    fn from_request(_req: &RequestContext, body: &Bytes) -> Result<Self, Self::Error> {
        Ok(String::from_utf8(body.to_vec())?)
    }
}

impl<T> FromRequest for Json<T>
where
    T: for<'de> Deserialize<'de>,
{
    type Error = ExtractError;

    fn from_request(req: &RequestContext, body: &Bytes) -> Result<Self, Self::Error> {
        if !is_json(req) {
            return Err(ExtractError::UnsupportedMediaType { expected: "application/json" });
        }
        Ok(Json(serde_json::from_slice::<T>(body)?))
    }
}

/// `application/json` or any `application/*+json` type.
fn is_json(req: &RequestContext) -> bool {
    req.headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.parse::<mime::Mime>().ok())
        .is_some_and(|mime| {
            mime.type_() == mime::APPLICATION
                && (mime.subtype() == mime::JSON || mime.suffix() == Some(mime::JSON))
        })
}
