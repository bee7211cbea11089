//! The HTTP endpoints of the greeting service.
//!
//! Endpoint methods are synchronous; `app_router` wraps them into handlers.

use crate::error::GreetingError;
use crate::greeting::{Greeting, Name};
use crate::service::GreetingService;
use greeter_web::Html;
use greeter_web::extract::Json;
use http::{HeaderMap, HeaderName, HeaderValue, StatusCode};
use serde::Deserialize;
use std::sync::Arc;
use tracing::debug;

const HOME_PAGE: &str = "<!DOCTYPE html>
<html>
<head><title>Greeter</title></head>
<body><h1>Welcome to Greeter</h1><p>Try <a href=\"/greeting?name=World\">/greeting?name=World</a></p></body>
</html>
";

/// Query string of the `GET` greeting endpoints.
#[derive(Debug, Default, Deserialize)]
pub struct GreetingParams {
    pub name: Option<String>,
}

impl GreetingParams {
    /// A missing or empty name means [`Name::default`].
    fn name(self) -> Result<Name, GreetingError> {
        match self.name {
            Some(name) if !name.is_empty() => Name::parse(name),
            _ => Ok(Name::default()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct GreetingController {
    service: Arc<GreetingService>,
}

impl GreetingController {
    pub fn new(service: Arc<GreetingService>) -> Self {
        Self { service }
    }

    pub fn service(&self) -> &Arc<GreetingService> {
        &self.service
    }

    /// `GET /greeting`
    pub fn greeting(&self, params: GreetingParams) -> Result<Json<Greeting>, GreetingError> {
        let name = params.name()?;
        Ok(Json(self.service.greeting(&name)))
    }

    /// `POST /greeting`, greets the body's `content`.
    pub fn greeting_by_post(&self, body: Greeting) -> Result<Json<Greeting>, GreetingError> {
        let name = Name::parse(body.content)?;
        Ok(Json(self.service.greeting(&name)))
    }

    /// `DELETE /greeting`
    pub fn delete_greeting(&self) -> (StatusCode, HeaderMap, ()) {
        debug!("delete greeting requested");
        let mut headers = HeaderMap::new();
        headers.insert(HeaderName::from_static("foo"), HeaderValue::from_static("Bar"));
        (StatusCode::NO_CONTENT, headers, ())
    }

    /// `GET /greeting-status`, like `GET /greeting` but answers `201 Created`.
    pub fn greeting_with_status(&self, params: GreetingParams) -> Result<(StatusCode, Json<Greeting>), GreetingError> {
        self.greeting(params).map(|greeting| (StatusCode::CREATED, greeting))
    }

    /// `GET /`
    pub fn home(&self) -> Html<&'static str> {
        Html(HOME_PAGE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn controller() -> GreetingController {
        GreetingController::new(Arc::new(GreetingService::default()))
    }

    fn params(name: Option<&str>) -> GreetingParams {
        GreetingParams { name: name.map(str::to_string) }
    }

    #[test]
    fn defaults_to_world() {
        let controller = controller();

        let Json(greeting) = controller.greeting(params(None)).unwrap();
        assert_eq!(greeting, Greeting::new(1, "Hello, World!"));

        let Json(greeting) = controller.greeting(params(Some(""))).unwrap();
        assert_eq!(greeting, Greeting::new(2, "Hello, World!"));
    }

    #[test]
    fn invalid_name_does_not_count() {
        let controller = controller();

        assert_eq!(controller.greeting(params(Some("J0hn"))).unwrap_err(), GreetingError::invalid_name("J0hn"));
        assert_eq!(controller.service().issued(), 0);
    }

    #[test]
    fn post_greets_content() {
        let controller = controller();

        let Json(greeting) = controller.greeting_by_post(Greeting::new(99, "Ann")).unwrap();
        assert_eq!(greeting, Greeting::new(1, "Hello, Ann!"));

        assert_eq!(controller.greeting_by_post(Greeting::new(0, "")).unwrap_err(), GreetingError::EmptyName);
    }

    #[test]
    fn status_and_delete() {
        let controller = controller();

        let (status, Json(greeting)) = controller.greeting_with_status(params(Some("Bob"))).unwrap();
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(greeting.content, "Hello, Bob!");

        let (status, headers, ()) = controller.delete_greeting();
        assert_eq!(status, StatusCode::NO_CONTENT);
        assert_eq!(headers["foo"], "Bar");
    }
}
