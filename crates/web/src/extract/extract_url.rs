use crate::extract::{ExtractError, FromRequest, Query};
use crate::RequestContext;
use bytes::Bytes;
use serde::Deserialize;

/// Deserializes the query string into `T` with `serde_qs`.
impl<T> FromRequest for Query<T>
where
    T: for<'de> Deserialize<'de>,
{
    type Error = ExtractError;

    fn from_request(req: &RequestContext, _body: &Bytes) -> Result<Self, Self::Error> {
        let query = req.uri().query().unwrap_or_default();
        Ok(Query(serde_qs::from_str::<T>(query)?))
    }
}
