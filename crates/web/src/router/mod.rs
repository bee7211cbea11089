//! Path and method based routing.
//!
//! Paths are matched with `matchit`; each path holds one handler per method.
//! A path that matches but has no handler for the request method yields the
//! set of allowed methods instead, so the server can answer `405`. `HEAD` is
//! served by the `GET` handler unless routed explicitly.

use crate::handler::RequestHandler;
use crate::PathParams;

use http::Method;
use std::collections::HashMap;
use std::fmt;
use thiserror::Error;
use tracing::trace;

type InnerRouter<T> = matchit::Router<T>;

static HEAD: Method = Method::HEAD;

/// Routing table, fixed once built.
pub struct Router {
    inner_router: InnerRouter<Vec<RouterItem>>,
}

/// A handler bound to one method of a path.
pub struct RouterItem {
    method: Method,
    handler: Box<dyn RequestHandler>,
}

/// Result of matching a path, containing the items routed there and the path parameters
pub struct RouteResult<'router, 'req> {
    router_items: &'router [RouterItem],
    params: PathParams<'router, 'req>,
}

#[derive(Debug, Error)]
#[error("can't register route '{path}': {source}")]
pub struct RouteError {
    path: String,
    #[source]
    source: matchit::InsertError,
}

impl Router {
    pub fn builder() -> RouterBuilder {
        RouterBuilder::new()
    }

    /// An unmatched path gives an empty [`RouteResult`].
    pub fn at<'router, 'req>(&'router self, path: &'req str) -> RouteResult<'router, 'req> {
        self.inner_router
            .at(path)
            .map(|matched| RouteResult { router_items: matched.value.as_slice(), params: matched.params.into() })
            .unwrap_or_else(|e| {
                trace!(path, cause = %e, "no route matched");
                RouteResult::empty()
            })
    }
}

impl fmt::Debug for Router {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Router").finish_non_exhaustive()
    }
}

impl RouterItem {
    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn handler(&self) -> &dyn RequestHandler {
        self.handler.as_ref()
    }
}

impl fmt::Debug for RouterItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouterItem").field("method", &self.method).finish_non_exhaustive()
    }
}

impl<'router, 'req> RouteResult<'router, 'req> {
    fn empty() -> Self {
        Self { router_items: &[], params: PathParams::empty() }
    }

    /// Returns true if no path matched
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.router_items.is_empty()
    }

    pub fn params(&self) -> &PathParams<'router, 'req> {
        &self.params
    }

    pub fn router_items(&self) -> &'router [RouterItem] {
        self.router_items
    }

    /// The handler routed for `method`, if any.
    pub fn handler(&self, method: &Method) -> Option<&'router dyn RequestHandler> {
        self.find(method).or_else(|| if *method == Method::HEAD { self.find(&Method::GET) } else { None })
    }

    /// Methods routed for the matched path, in registration order, then an
    /// implied `HEAD` when `GET` is routed.
    pub fn allowed_methods(&self) -> impl Iterator<Item = &'router Method> {
        let implied_head = self.find(&Method::GET).is_some() && self.find(&Method::HEAD).is_none();
        self.router_items.iter().map(RouterItem::method).chain(implied_head.then_some(&HEAD))
    }

    fn find(&self, method: &Method) -> Option<&'router dyn RequestHandler> {
        self.router_items.iter().find(|item| item.method == method).map(RouterItem::handler)
    }
}

impl fmt::Debug for RouteResult<'_, '_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouteResult").field("router_items", &self.router_items).field("params", &self.params).finish()
    }
}

#[derive(Debug, Default)]
pub struct RouterBuilder {
    data: HashMap<String, Vec<RouterItemBuilder>>,
}

impl RouterBuilder {
    fn new() -> Self {
        Self::default()
    }

    /// Registering the same method twice for a path keeps the first handler.
    #[must_use]
    pub fn route(mut self, route: impl Into<String>, item_builder: RouterItemBuilder) -> Self {
        let vec = self.data.entry(route.into()).or_default();
        vec.push(item_builder);
        self
    }

    pub fn build(self) -> Result<Router, RouteError> {
        let mut inner_router = InnerRouter::new();

        for (path, items) in self.data {
            let router_items = items.into_iter().map(RouterItemBuilder::build).collect::<Vec<_>>();
            if let Err(source) = inner_router.insert(path.clone(), router_items) {
                return Err(RouteError { path, source });
            }
        }

        Ok(Router { inner_router })
    }
}

macro_rules! method_router {
    ($method:ident, $method_const:ident) => {
        pub fn $method<H: RequestHandler + 'static>(handler: H) -> RouterItemBuilder {
            RouterItemBuilder { method: Method::$method_const, handler: Box::new(handler) }
        }
    };
}

method_router!(get, GET);
method_router!(post, POST);
method_router!(put, PUT);
method_router!(delete, DELETE);
method_router!(patch, PATCH);

pub struct RouterItemBuilder {
    method: Method,
    handler: Box<dyn RequestHandler>,
}

impl RouterItemBuilder {
    fn build(self) -> RouterItem {
        RouterItem { method: self.method, handler: self.handler }
    }
}

impl fmt::Debug for RouterItemBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouterItemBuilder").field("method", &self.method).finish_non_exhaustive()
    }
}
