//! Blocking client for S3-compatible object stores.
//!
//! Transfers go through the `rust-s3` client. Custom endpoints (MinIO and
//! friends) use path-style addressing; AWS itself uses virtual-hosted
//! addressing. Every failure to authenticate, connect or transfer surfaces as
//! a single [`CoreError::ObjectStore`]; nothing is retried.

use crate::config::S3Config;
use crate::error::{CoreError, CoreResult};
use s3::bucket::Bucket;
use s3::creds::Credentials;
use s3::region::Region;
use std::fmt::Display;
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Base URL requests are sent to.
///
/// A custom endpoint given without a scheme gets `https` or `http` according
/// to `use_ssl`; without an endpoint the AWS regional endpoint is used.
pub fn endpoint_url(config: &S3Config) -> String {
    let scheme = if config.use_ssl { "https" } else { "http" };
    match &config.endpoint {
        Some(endpoint) => {
            let endpoint = endpoint.trim_end_matches('/');
            if endpoint.contains("://") {
                endpoint.to_string()
            } else {
                format!("{scheme}://{endpoint}")
            }
        }
        None => format!("{scheme}://s3.{}.amazonaws.com", config.region),
    }
}

/// Custom endpoints are addressed as `endpoint/bucket/key`.
pub fn uses_path_style(config: &S3Config) -> bool {
    config.endpoint.is_some()
}

fn store_error(context: &'static str) -> impl Fn(s3::error::S3Error) -> CoreError {
    move |e| CoreError::ObjectStore(format!("{context}: {e}"))
}

fn check_status(action: &str, key: &str, status: u16) -> CoreResult<()> {
    if (200..300).contains(&status) {
        Ok(())
    } else {
        Err(CoreError::ObjectStore(format!("{action} {key} returned HTTP {status}")))
    }
}

/// A downloaded object kept in a private temporary directory.
///
/// The directory and file are removed when this value is dropped.
#[derive(Debug)]
pub struct DownloadedObject {
    path: PathBuf,
    _dir: TempDir,
}

impl DownloadedObject {
    pub fn path(&self) -> &Path {
        &self.path
    }
}

pub struct S3Client {
    config: S3Config,
    bucket: Box<Bucket>,
}

impl S3Client {
    /// Creates a client after checking the configuration is usable.
    ///
    /// No request is made until [`upload`](Self::upload) or
    /// [`download`](Self::download) is called.
    pub fn new(config: S3Config) -> CoreResult<Self> {
        config.validate()?;

        let credentials = Credentials::new(
            Some(config.credentials.access_key.as_str()),
            Some(config.credentials.secret_key.as_str()),
            None,
            None,
            None,
        )
        .map_err(|e| CoreError::ObjectStore(format!("invalid S3 credentials: {e}")))?;

        let region = Region::Custom {
            region: config.region.clone(),
            endpoint: endpoint_url(&config),
        };
        let mut bucket = Bucket::new(&config.bucket, region, credentials)
            .map_err(store_error("failed to create S3 client"))?;
        if uses_path_style(&config) {
            bucket = bucket.with_path_style();
        }
        log::debug!(
            "S3 client for bucket {} at {} ({} addressing)",
            config.bucket,
            endpoint_url(&config),
            if uses_path_style(&config) { "path-style" } else { "virtual-hosted" }
        );

        Ok(Self { config, bucket })
    }

    pub fn config(&self) -> &S3Config {
        &self.config
    }

    /// Uploads the file at `local_path` under `key`.
    pub fn upload(&self, local_path: &Path, key: &str) -> CoreResult<()> {
        let body = fs::read(local_path).map_err(|e| {
            CoreError::ObjectStore(format!(
                "failed to read file {}: {e}",
                local_path.display()
            ))
        })?;
        log::info!(
            "Uploading {} ({} bytes) to s3://{}/{}",
            local_path.display(),
            body.len(),
            self.config.bucket,
            key
        );

        let response = self
            .bucket
            .put_object(object_path(key), &body)
            .map_err(store_error("failed to upload file to S3"))?;
        check_status("PUT", key, response.status_code())?;
        log::debug!("Upload of {} complete", key);
        Ok(())
    }

    /// Downloads `key` into a fresh temporary directory.
    pub fn download(&self, key: &str) -> CoreResult<DownloadedObject> {
        log::info!("Downloading s3://{}/{}", self.config.bucket, key);

        let dir = tempfile::Builder::new()
            .prefix("vme-download-")
            .tempdir()
            .map_err(|e| io_store_error("failed to create temporary directory", e))?;
        let path = dir.path().join(local_file_name(key));
        let mut file =
            File::create(&path).map_err(|e| io_store_error("failed to create temporary file", e))?;

        let status = self
            .bucket
            .get_object_to_writer(object_path(key), &mut file)
            .map_err(store_error("failed to download file from S3"))?;
        check_status("GET", key, status)?;
        log::debug!("Downloaded s3://{}/{} to {}", self.config.bucket, key, path.display());

        Ok(DownloadedObject { path, _dir: dir })
    }
}

fn io_store_error(context: &str, err: impl Display) -> CoreError {
    CoreError::ObjectStore(format!("{context}: {err}"))
}

fn object_path(key: &str) -> String {
    format!("/{}", key.trim_start_matches('/'))
}

/// Base name of an object key, used as the local download file name.
fn local_file_name(key: &str) -> &str {
    match key.rsplit('/').next() {
        Some(name) if !name.is_empty() && name != "." && name != ".." => name,
        _ => "object",
    }
}
