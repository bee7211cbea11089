//! Server bootstrap: binding, accepting, and dispatching requests to the router.

use crate::handler::{RequestHandler, handler_fn};
use crate::interceptor::{Interceptor, Interceptors};
use crate::responder::NotFound;
use crate::router::Router;
use crate::{RequestContext, ResponseBody};
use async_trait::async_trait;
use bytes::Bytes;
use greeter_http::connection::{DEFAULT_MAX_BODY_SIZE, HttpConnection};
use greeter_http::handler::Handler;
use greeter_http::protocol::{HttpError, RequestHeader};
use http::header::ALLOW;
use http::{HeaderValue, Request, Response, StatusCode};
use std::convert::Infallible;
use std::fmt;
use std::future::pending;
use std::io;
use std::net::{SocketAddr, ToSocketAddrs};
use std::sync::Arc;
use thiserror::Error;
use tokio::io::{AsyncRead, AsyncWrite};
use tokio::net::TcpListener;
use tracing::{debug, error, info, warn};

pub struct ServerBuilder {
    router: Option<Router>,
    default_handler: Option<Box<dyn RequestHandler>>,
    address: Option<io::Result<Vec<SocketAddr>>>,
    interceptors: Interceptors,
    max_body_size: u64,
}

impl ServerBuilder {
    fn new() -> Self {
        Self {
            router: None,
            default_handler: None,
            address: None,
            interceptors: Interceptors::default(),
            max_body_size: DEFAULT_MAX_BODY_SIZE,
        }
    }

    /// Resolution errors surface from [`ServerBuilder::build`].
    #[must_use]
    pub fn address<A: ToSocketAddrs>(mut self, address: A) -> Self {
        self.address = Some(address.to_socket_addrs().map(Iterator::collect));
        self
    }

    #[must_use]
    pub fn router(mut self, router: Router) -> Self {
        self.router = Some(router);
        self
    }

    /// Handles requests whose path matches no route, `404 Not Found` if unset.
    #[must_use]
    pub fn default_handler(mut self, request_handler: impl RequestHandler + 'static) -> Self {
        self.default_handler = Some(Box::new(request_handler));
        self
    }

    #[must_use]
    pub fn interceptors(mut self, interceptors: Interceptors) -> Self {
        self.interceptors = interceptors;
        self
    }

    #[must_use]
    pub fn max_body_size(mut self, max_body_size: u64) -> Self {
        self.max_body_size = max_body_size;
        self
    }

    pub fn build(self) -> Result<Server, ServerBuildError> {
        let router = self.router.ok_or(ServerBuildError::MissingRouter)?;
        let address = self.address.ok_or(ServerBuildError::MissingAddress)?.map_err(ServerBuildError::invalid_address)?;
        if address.is_empty() {
            return Err(ServerBuildError::MissingAddress);
        }
        let default_handler = self
            .default_handler
            .unwrap_or_else(|| Box::new(handler_fn(|| async { NotFound })) as Box<dyn RequestHandler>);

        Ok(Server {
            router,
            default_handler,
            address,
            interceptors: self.interceptors,
            max_body_size: self.max_body_size,
        })
    }
}

impl fmt::Debug for ServerBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServerBuilder")
            .field("router", &self.router)
            .field("address", &self.address)
            .field("interceptors", &self.interceptors)
            .field("max_body_size", &self.max_body_size)
            .finish_non_exhaustive()
    }
}

pub struct Server {
    router: Router,
    default_handler: Box<dyn RequestHandler>,
    address: Vec<SocketAddr>,
    interceptors: Interceptors,
    max_body_size: u64,
}

#[derive(Error, Debug)]
pub enum ServerBuildError {
    #[error("router must be set")]
    MissingRouter,
    #[error("address must be set")]
    MissingAddress,
    #[error("invalid address: {source}")]
    InvalidAddress { source: io::Error },
}

impl ServerBuildError {
    fn invalid_address(source: io::Error) -> Self {
        Self::InvalidAddress { source }
    }
}

#[derive(Error, Debug)]
pub enum ServerError {
    #[error("bind server error: {source}")]
    Bind { source: io::Error },
}

impl Server {
    pub fn builder() -> ServerBuilder {
        ServerBuilder::new()
    }

    pub fn address(&self) -> &[SocketAddr] {
        &self.address
    }

    /// Serves until the process exits.
    pub async fn start(self) -> Result<(), ServerError> {
        self.start_with_shutdown(pending()).await
    }

    /// Serves until `signal` completes. Connections already accepted keep
    /// running on their own tasks.
    pub async fn start_with_shutdown<S>(self, signal: S) -> Result<(), ServerError>
    where
        S: Future<Output = ()>,
    {
        let tcp_listener = match TcpListener::bind(self.address.as_slice()).await {
            Ok(tcp_listener) => tcp_listener,
            Err(e) => {
                error!(cause = %e, address = ?self.address, "bind server error");
                return Err(ServerError::Bind { source: e });
            }
        };
        match tcp_listener.local_addr() {
            Ok(local_addr) => info!(%local_addr, "start listening"),
            Err(_) => info!(address = ?self.address, "start listening"),
        }

        let server = Arc::new(self);
        tokio::pin!(signal);
        loop {
            let (tcp_stream, remote_addr) = tokio::select! {
                () = &mut signal => {
                    info!("shutdown signal received, stop accepting");
                    return Ok(());
                }
                accepted = tcp_listener.accept() => match accepted {
                    Ok(stream_and_addr) => stream_and_addr,
                    Err(e) => {
                        warn!(cause = %e, "failed to accept");
                        continue;
                    }
                },
            };

            let server = Arc::clone(&server);
            tokio::spawn(async move {
                let (reader, writer) = tcp_stream.into_split();
                match server.serve_connection(reader, writer).await {
                    Ok(()) => debug!(%remote_addr, "finished process, connection shutdown"),
                    Err(e) => error!(%remote_addr, cause = %e, "service has error, connection shutdown"),
                }
            });
        }
    }

    /// Runs the request loop on one already-open connection.
    pub async fn serve_connection<R, W>(self: Arc<Self>, reader: R, writer: W) -> Result<(), HttpError>
    where
        R: AsyncRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let max_body_size = self.max_body_size;
        HttpConnection::new(reader, writer).with_max_body_size(max_body_size).process(self).await
    }
}

impl fmt::Debug for Server {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Server")
            .field("router", &self.router)
            .field("address", &self.address)
            .field("interceptors", &self.interceptors)
            .field("max_body_size", &self.max_body_size)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl Handler for Server {
    type RespBody = ResponseBody;
    type Error = Infallible;

    async fn call(&self, req: Request<Bytes>) -> Result<Response<Self::RespBody>, Self::Error> {
        let (parts, body) = req.into_parts();
        let header = RequestHeader::from(parts);

        let route_result = self.router.at(header.uri().path());
        let request_context = RequestContext::new(&header, route_result.params());

        self.interceptors.on_request(&request_context).await;

        let mut response = if route_result.is_empty() {
            self.default_handler.invoke(&request_context, body).await
        } else if let Some(handler) = route_result.handler(request_context.method()) {
            handler.invoke(&request_context, body).await
        } else {
            method_not_allowed(route_result.allowed_methods().map(http::Method::as_str))
        };

        self.interceptors.on_response(&request_context, &mut response).await;
        Ok(response)
    }
}

fn method_not_allowed<'a>(methods: impl Iterator<Item = &'a str>) -> Response<ResponseBody> {
    let allow = methods.collect::<Vec<_>>().join(", ");
    let mut response = Response::new(ResponseBody::empty());
    *response.status_mut() = StatusCode::METHOD_NOT_ALLOWED;
    if let Ok(value) = HeaderValue::from_str(&allow) {
        response.headers_mut().insert(ALLOW, value);
    }
    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::router::{get, post};
    use http_body_util::BodyExt;

    fn server() -> Server {
        async fn hello() -> &'static str {
            "hello"
        }

        let router = Router::builder()
            .route("/hello", get(handler_fn(hello)))
            .route("/hello", post(handler_fn(hello)))
            .build()
            .unwrap();
        Server::builder().router(router).address("127.0.0.1:0").build().unwrap()
    }

    async fn call(server: &Server, method: &str, uri: &str) -> Response<Bytes> {
        let request = Request::builder().method(method).uri(uri).body(Bytes::new()).unwrap();
        let (parts, body) = server.call(request).await.unwrap().into_parts();
        Response::from_parts(parts, body.collect().await.unwrap().to_bytes())
    }

    #[tokio::test]
    async fn dispatches_to_route() {
        let response = call(&server(), "GET", "/hello").await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.body(), "hello");
    }

    #[tokio::test]
    async fn unknown_path_is_not_found() {
        let response = call(&server(), "GET", "/nope").await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn head_uses_get_route() {
        let response = call(&server(), "HEAD", "/hello").await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.body(), "hello");
    }

    #[tokio::test]
    async fn unrouted_method_lists_allowed() {
        let response = call(&server(), "DELETE", "/hello").await;
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(response.headers()[ALLOW], "GET, POST, HEAD");
    }

    #[test]
    fn build_requires_router_and_address() {
        assert!(matches!(Server::builder().address("127.0.0.1:0").build(), Err(ServerBuildError::MissingRouter)));

        let router = Router::builder().build().unwrap();
        assert!(matches!(Server::builder().router(router).build(), Err(ServerBuildError::MissingAddress)));

        let router = Router::builder().build().unwrap();
        let result = Server::builder().router(router).address("not an address").build();
        assert!(matches!(result, Err(ServerBuildError::InvalidAddress { .. })));
    }
}
