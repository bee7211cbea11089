//! A small web layer over `greeter-http`
//!
//! Handlers are plain async functions whose arguments are extractors and whose
//! return value is a [`Responder`]:
//!
//! ```no_run
//! use greeter_web::extract::Query;
//! use greeter_web::router::get;
//! use greeter_web::{Router, Server, handler_fn};
//! use serde::Deserialize;
//!
//! #[derive(Deserialize)]
//! struct Params {
//!     name: Option<String>,
//! }
//!
//! async fn hello(Query(params): Query<Params>) -> String {
//!     format!("Hello, {}!", params.name.as_deref().unwrap_or("World"))
//! }
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let router = Router::builder().route("/hello", get(handler_fn(hello))).build()?;
//!     Server::builder().router(router).address("127.0.0.1:8080").build()?.start().await?;
//!     Ok(())
//! }
//! ```

mod body;

mod fn_trait;
mod handler;
mod request;
mod responder;
mod server;

pub mod extract;
pub mod interceptor;
pub mod router;

pub use body::ResponseBody;
pub use fn_trait::FnTrait;
pub use handler::{FnHandler, RequestHandler, handler_fn};
pub use request::{PathParams, RequestContext};
pub use responder::{Html, NotFound, Responder};
pub use router::Router;
pub use server::{Server, ServerBuildError, ServerBuilder, ServerError};
