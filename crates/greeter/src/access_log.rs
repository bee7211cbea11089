use async_trait::async_trait;
use greeter_web::interceptor::Interceptor;
use greeter_web::{RequestContext, ResponseBody};
use http::Response;
use tracing::info;

/// Logs one line per served request.
#[derive(Debug, Clone, Copy, Default)]
pub struct AccessLog;

#[async_trait]
impl Interceptor for AccessLog {
    async fn on_response(&self, req: &RequestContext<'_, '_>, resp: &mut Response<ResponseBody>) {
        info!(method = %req.method(), path = req.uri().path(), status = resp.status().as_u16(), "request served");
    }
}
