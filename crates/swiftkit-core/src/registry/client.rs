//! Registry client: fetches the manifest and raw component files
//!
//! Two sources are supported:
//! - Remote: HTTP GET relative to a base URL (production)
//! - Local: reads from a directory laid out like the remote registry (development)
//!
//! Requests are issued one at a time and never retried.

use super::manifest::{Manifest, ManifestFormat};
use crate::error::{Error, Result};
use crate::product::ProductConfig;
use std::path::PathBuf;
use std::time::Duration;
use tokio::fs;
use url::Url;

/// Narrow interface the installer uses to reach the registry
#[allow(async_fn_in_trait)]
pub trait ComponentSource {
    /// Retrieve and parse the registry manifest
    async fn fetch_manifest(&self) -> Result<Manifest>;

    /// Retrieve one file from the registry as text
    async fn fetch_file(&self, remote_path: &str) -> Result<String>;
}

/// Registry source - either remote URL or local directory
#[derive(Debug, Clone, PartialEq)]
pub enum RegistrySource {
    Remote(Url),
    Local(PathBuf),
}

impl RegistrySource {
    /// Parse a remote registry base URL
    pub fn remote(url_str: &str) -> Result<Self> {
        let url = Url::parse(url_str).map_err(|e| Error::InvalidRegistryUrl {
            url: url_str.to_string(),
            reason: e.to_string(),
        })?;
        if url.cannot_be_a_base() {
            return Err(Error::InvalidRegistryUrl {
                url: url_str.to_string(),
                reason: "URL cannot have path segments".to_string(),
            });
        }
        Ok(Self::Remote(url))
    }

    /// Create a local registry source from a directory
    pub fn local(path: PathBuf) -> Self {
        Self::Local(path)
    }
}

/// Client that retrieves manifests and files from a [`RegistrySource`]
pub struct RegistryClient {
    source: RegistrySource,
    manifest_path: String,
    client: reqwest::Client,
}

impl RegistryClient {
    /// Create a new client with a custom user agent and request timeout
    pub fn new(
        source: RegistrySource,
        manifest_path: &str,
        user_agent: &str,
        timeout: Duration,
    ) -> Self {
        Self {
            source,
            manifest_path: manifest_path.to_string(),
            client: reqwest::Client::builder()
                .user_agent(user_agent)
                .timeout(timeout)
                .build()
                .unwrap_or_else(|_| reqwest::Client::new()),
        }
    }

    /// Create a client from a product config, with an optional registry URL override
    pub fn from_config<C: ProductConfig>(config: &C, url_override: Option<&str>) -> Result<Self> {
        let url = url_override.unwrap_or_else(|| config.default_registry_url());
        let source = RegistrySource::remote(url)?;
        Ok(Self::with_source(config, source))
    }

    /// Create a client for an explicit source using a product config's defaults
    pub fn with_source<C: ProductConfig>(config: &C, source: RegistrySource) -> Self {
        Self::new(
            source,
            config.manifest_path(),
            config.user_agent(),
            config.request_timeout(),
        )
    }

    /// Get the registry source
    pub fn source(&self) -> &RegistrySource {
        &self.source
    }

    /// Split a registry-relative path into segments, rejecting escapes
    fn segments(remote_path: &str) -> Result<Vec<&str>> {
        let unsafe_path = || Error::UnsafePath {
            path: remote_path.to_string(),
        };
        if remote_path.starts_with('/') || remote_path.contains('\\') {
            return Err(unsafe_path());
        }
        let segments: Vec<&str> = remote_path
            .split('/')
            .filter(|s| !s.is_empty() && *s != ".")
            .collect();
        if segments.is_empty() || segments.iter().any(|s| *s == "..") {
            return Err(unsafe_path());
        }
        Ok(segments)
    }

    /// Build a URL by appending path segments, preserving query parameters
    fn build_url(base: &Url, remote_path: &str) -> Result<Url> {
        let segments = Self::segments(remote_path)?;
        let mut url = base.clone();
        url.path_segments_mut()
            .map_err(|_| Error::InvalidRegistryUrl {
                url: base.to_string(),
                reason: "URL cannot have path segments".to_string(),
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Fetch raw bytes for a registry-relative path
    async fn fetch_bytes(&self, remote_path: &str) -> Result<Vec<u8>> {
        match &self.source {
            RegistrySource::Remote(base_url) => {
                let url = Self::build_url(base_url, remote_path)?;
                let response = self
                    .client
                    .get(url.clone())
                    .send()
                    .await
                    .map_err(|source| Error::Network {
                        url: url.to_string(),
                        source,
                    })?;

                if !response.status().is_success() {
                    return Err(Error::HttpStatus {
                        url: url.to_string(),
                        status: response.status(),
                    });
                }

                let bytes = response.bytes().await.map_err(|source| Error::Network {
                    url: url.to_string(),
                    source,
                })?;
                Ok(bytes.to_vec())
            }
            RegistrySource::Local(path) => {
                let full_path = Self::segments(remote_path)?
                    .into_iter()
                    .fold(path.clone(), |acc, s| acc.join(s));
                fs::read(&full_path)
                    .await
                    .map_err(|e| Error::io(&full_path, e))
            }
        }
    }
}

impl ComponentSource for RegistryClient {
    async fn fetch_manifest(&self) -> Result<Manifest> {
        let bytes = self.fetch_bytes(&self.manifest_path).await?;
        let content = String::from_utf8(bytes)
            .map_err(|e| Error::parse("registry manifest", e))?;
        Manifest::parse(&content, ManifestFormat::from_path(&self.manifest_path))
    }

    async fn fetch_file(&self, remote_path: &str) -> Result<String> {
        let bytes = self.fetch_bytes(remote_path).await?;
        String::from_utf8(bytes).map_err(|_| Error::Decode {
            path: remote_path.to_string(),
        })
    }
}
