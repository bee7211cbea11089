//! A greeting web service.
//!
//! [`GreetingService`](service::GreetingService) issues numbered greetings from a
//! configured [`Template`](template::Template); [`app_router`] exposes it over HTTP:
//!
//! | route                        | answer                                   |
//! |------------------------------|------------------------------------------|
//! | `GET /`                      | `200`, HTML welcome page                 |
//! | `GET /greeting?name=`        | `200`, greeting JSON, name defaults to `World` |
//! | `POST /greeting`             | `200`, greeting JSON for the body's `content` |
//! | `DELETE /greeting`           | `204`, header `Foo: Bar`                 |
//! | `GET /greeting-status?name=` | `201`, greeting JSON                     |
//!
//! Names containing digits are answered with `400 Bad Request`.

pub mod access_log;
pub mod config;
pub mod controller;
pub mod error;
pub mod greeting;
pub mod job;
pub mod service;
pub mod template;

use crate::access_log::AccessLog;
use crate::config::AppConfig;
use crate::controller::{GreetingController, GreetingParams};
use crate::error::StartupError;
use crate::greeting::Greeting;
use crate::service::GreetingService;
use greeter_web::extract::{Json, Query};
use greeter_web::interceptor::Interceptors;
use greeter_web::router::{RouteError, delete, get, post};
use greeter_web::{Router, Server, handler_fn};
use std::future::ready;
use std::sync::Arc;

/// Builds the route table of the service.
pub fn app_router(controller: Arc<GreetingController>) -> Result<Router, RouteError> {
    let home = Arc::clone(&controller);
    let get_greeting = Arc::clone(&controller);
    let post_greeting = Arc::clone(&controller);
    let delete_greeting = Arc::clone(&controller);
    let greeting_status = controller;

    Router::builder()
        .route("/", get(handler_fn(move || ready(home.home()))))
        .route(
            "/greeting",
            get(handler_fn(move |Query(params): Query<GreetingParams>| ready(get_greeting.greeting(params)))),
        )
        .route(
            "/greeting",
            post(handler_fn(move |Json(body): Json<Greeting>| ready(post_greeting.greeting_by_post(body)))),
        )
        .route("/greeting", delete(handler_fn(move || ready(delete_greeting.delete_greeting()))))
        .route(
            "/greeting-status",
            get(handler_fn(move |Query(params): Query<GreetingParams>| {
                ready(greeting_status.greeting_with_status(params))
            })),
        )
        .build()
}

/// Wires the service into a server configured from `config`, with access logging.
pub fn app_server(config: &AppConfig, service: Arc<GreetingService>) -> Result<Server, StartupError> {
    let router = app_router(Arc::new(GreetingController::new(service)))?;
    let server = Server::builder()
        .router(router)
        .address(config.server.address.as_str())
        .max_body_size(config.server.max_body_size)
        .interceptors(Interceptors::builder().add_last(AccessLog).build())
        .build()?;
    Ok(server)
}
