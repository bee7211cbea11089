use http::Response;

/// A response without its body, as written by the header encoder.
pub type ResponseHead = Response<()>;
