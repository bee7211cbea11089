//! Typed extraction of handler arguments from a request.
//!
//! Every argument of a handler function implements [`FromRequest`]. Extraction
//! runs before the handler is called; the first failing argument short-circuits
//! the call and its error is rendered as the response.

mod error;
mod extract_body;
mod extract_header;
mod extract_tuple;
mod extract_url;
mod from_request;

pub use error::ExtractError;
pub use from_request::FromRequest;

/// Represented as json data
///
/// As an argument, the request must carry a JSON content type and a body that
/// deserializes into `T`. As a return value, `T` is serialized into an
/// `application/json` response.
///
/// # Example
/// ```
/// # use serde::{Deserialize, Serialize};
/// # use greeter_web::extract::Json;
/// # #[allow(dead_code)]
/// #[derive(Deserialize, Serialize, Debug)]
/// struct Params {
///     name: String,
/// }
///
/// pub async fn handle(Json(params): Json<Params>) -> Json<Params> {
///     Json(params)
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Json<T>(pub T);

/// Represented as url query data
///
/// A request without a query string deserializes `T` from an empty query,
/// so optional fields come out as `None`.
///
/// # Example
/// ```
/// # use serde::Deserialize;
/// # use greeter_web::extract::Query;
/// # #[allow(dead_code)]
/// #[derive(Deserialize, Debug)]
/// struct Params {
///     name: Option<String>,
/// }
///
/// pub async fn handle(Query(params): Query<Params>) -> String {
///     format!("received params: {:?}", params)
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query<T>(pub T);
