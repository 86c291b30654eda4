//! `s3://bucket/key` URI parsing.

use crate::error::{CoreError, CoreResult};

pub const S3_SCHEME: &str = "s3://";

/// True when `input` uses the `s3://` scheme.
pub fn is_s3_uri(input: &str) -> bool {
    input.starts_with(S3_SCHEME)
}

/// Splits `s3://bucket/key` into `(bucket, key)`.
///
/// The key keeps any further `/` separators. Missing scheme, empty bucket or
/// empty key are rejected.
pub fn parse_s3_uri(uri: &str) -> CoreResult<(String, String)> {
    let invalid = || CoreError::InvalidInput(format!("invalid S3 URI format: {uri}"));

    let rest = uri.strip_prefix(S3_SCHEME).ok_or_else(invalid)?;
    let (bucket, key) = rest.split_once('/').ok_or_else(invalid)?;
    if bucket.is_empty() || key.is_empty() {
        return Err(invalid());
    }
    Ok((bucket.to_string(), key.to_string()))
}
