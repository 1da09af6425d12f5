use crate::index::{parse_index, IndexEntry};
use anyhow::{anyhow, Result};
use async_trait::async_trait;
use awc::{error::PayloadError, Client as ActixWebClient};
use bytes::Bytes;
use futures::{Stream, StreamExt};
use log::debug;
use std::{str::from_utf8, time::Duration};
use url::Url;

/// Where the importer reads the index and package archives from.
#[async_trait(?Send)]
pub trait PackageSource {
    async fn fetch_index(&self) -> Result<String>;

    /// Raw `.tar.gz` bytes of the archive belonging to `entry`.
    async fn fetch_archive(&self, entry: &IndexEntry) -> Result<Vec<u8>>;

    async fn fetch_index_entries(&self) -> Result<Vec<IndexEntry>> {
        let index = self.fetch_index().await?;
        Ok(parse_index(&index))
    }
}

pub struct Client {
    client: ActixWebClient,
    index_url: Url,
    archive_base_url: Url,
}

impl Client {
    pub fn try_new(index_url: &str, archive_base_url: &str, timeout: u64) -> Result<Self> {
        let mut archive_base_url = archive_base_url.to_string();
        if !archive_base_url.ends_with('/') {
            archive_base_url.push('/');
        }

        Ok(Self {
            client: ActixWebClient::builder()
                .timeout(Duration::from_secs(timeout))
                .finish(),
            index_url: Url::parse(index_url)?,
            archive_base_url: Url::parse(&archive_base_url)?,
        })
    }

    pub fn archive_url(&self, entry: &IndexEntry) -> Result<Url> {
        Ok(self.archive_base_url.join(&entry.archive_file_name())?)
    }

    async fn download(&self, url: &Url) -> Result<Vec<u8>> {
        debug!("Downloading {url}");
        let mut response = self
            .client
            .get(url.as_str())
            .send()
            .await
            .map_err(|error| anyhow!("Failed to fetch {url}: {:?}", error))?;

        if !response.status().is_success() {
            return Err(anyhow!(
                "Failed to fetch {url}: server responded with {}",
                response.status()
            ));
        }

        let buffer = read_stream(&mut response).await?;
        debug!("Downloaded {} bytes from {url}", buffer.len());
        Ok(buffer)
    }
}

#[async_trait(?Send)]
impl PackageSource for Client {
    async fn fetch_index(&self) -> Result<String> {
        let index_bytes = self.download(&self.index_url).await?;
        Ok(from_utf8(&index_bytes)?.to_string())
    }

    async fn fetch_archive(&self, entry: &IndexEntry) -> Result<Vec<u8>> {
        let archive_url = self.archive_url(entry)?;
        self.download(&archive_url).await
    }
}

/// Accumulates a response payload chunk by chunk until the stream ends.
pub async fn read_stream(
    stream: &mut (impl Stream<Item = Result<Bytes, PayloadError>> + Unpin),
) -> Result<Vec<u8>> {
    let mut buffer = Vec::new();
    while let Some(chunk) = stream.next().await {
        buffer.extend_from_slice(&chunk?);
    }

    Ok(buffer)
}
