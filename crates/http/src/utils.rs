/// Returns early with `Err($error)` when `$predicate` does not hold.
///
/// ```ignore
/// ensure!(headers.len() < MAX_HEADERS, ParseError::too_many_headers(MAX_HEADERS));
/// ```
macro_rules! ensure {
    ($predicate:expr, $error:expr) => {
        if !$predicate {
            return Err($error);
        }
    };
}

pub(crate) use ensure;
