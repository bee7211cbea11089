use crate::responder::Responder;
use crate::{RequestContext, ResponseBody};
use http::{Response, StatusCode};
use thiserror::Error;

/// Why a handler argument could not be built from the request.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("invalid query string: {source}")]
    InvalidQuery {
        #[from]
        source: serde_qs::Error,
    },

    #[error("unsupported media type, expect {expected}")]
    UnsupportedMediaType { expected: &'static str },

    #[error("invalid json body: {source}")]
    InvalidJson {
        #[from]
        source: serde_json::Error,
    },

    #[error("request body is not utf8: {source}")]
    InvalidUtf8 {
        #[from]
        source: std::string::FromUtf8Error,
    },
}

impl ExtractError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::UnsupportedMediaType { .. } => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            Self::InvalidQuery { .. } | Self::InvalidJson { .. } | Self::InvalidUtf8 { .. } => StatusCode::BAD_REQUEST,
        }
    }
}

impl Responder for ExtractError {
    fn response_to(self, req: &RequestContext) -> Response<ResponseBody> {
        (self.status(), self.to_string()).response_to(req)
    }
}
