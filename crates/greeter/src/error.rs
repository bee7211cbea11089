use greeter_web::{RequestContext, Responder, ResponseBody};
use http::{Response, StatusCode};
use thiserror::Error;

/// A caller-supplied name was rejected.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GreetingError {
    #[error("name must not be empty")]
    EmptyName,

    #[error("name '{name}' must not contain digits")]
    InvalidName { name: String },
}

impl GreetingError {
    pub fn invalid_name<S: ToString>(name: S) -> Self {
        Self::InvalidName { name: name.to_string() }
    }
}

impl Responder for GreetingError {
    fn response_to(self, req: &RequestContext) -> Response<ResponseBody> {
        (StatusCode::BAD_REQUEST, self.to_string()).response_to(req)
    }
}

/// Anything that stops the service from starting or keeps it from serving.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error(transparent)]
    Config(#[from] crate::config::ConfigError),

    #[error(transparent)]
    Route(#[from] greeter_web::router::RouteError),

    #[error(transparent)]
    Build(#[from] greeter_web::ServerBuildError),

    #[error(transparent)]
    Server(#[from] greeter_web::ServerError),
}
