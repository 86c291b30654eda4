//! S3-compatible object storage: URI parsing and transfers.

pub mod client;
pub mod uri;

pub use client::{DownloadedObject, S3Client, endpoint_url, uses_path_style};
pub use uri::{S3_SCHEME, is_s3_uri, parse_s3_uri};
