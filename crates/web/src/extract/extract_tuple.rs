use crate::extract::from_request::FromRequest;
use crate::responder::Responder;
use crate::{RequestContext, ResponseBody};
use bytes::Bytes;
use http::Response;

/// Implements `FromRequest` for argument tuples; the first failing element
/// is rendered into the rejection response.
macro_rules! impl_from_request_for_tuple ({ $($param:ident)* } => {
    impl<$($param,)*> FromRequest for ($($param,)*)
    where
        $($param: FromRequest,)*
    {
        type Error = Response<ResponseBody>;

        fn from_request(req: &RequestContext, body: &Bytes) -> Result<Self, Self::Error> {
            Ok(($($param::from_request(req, body).map_err(|e| e.response_to(req))?,)*))
        }
    }
});

impl_from_request_for_tuple! { A }
impl_from_request_for_tuple! { A B }
impl_from_request_for_tuple! { A B C }
impl_from_request_for_tuple! { A B C D }
