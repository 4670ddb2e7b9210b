use futures_util::{Stream, StreamExt, future::join_all};
use linemap::prelude::*;
use reqwest::header::ACCEPT_ENCODING;
use std::{
    collections::HashMap,
    fmt, fs,
    path::{Path, PathBuf},
    pin::pin,
    time::Instant,
};
use tokio::{fs::File, io::AsyncWriteExt};
use tracing::{debug, error, info};

use crate::feeds::Feed;

/// Archives already on disk, or why an operator has none.
pub struct CachedFeeds {
    cache_dir: PathBuf,
    archives: HashMap<String, Result<PathBuf, String>>,
}

impl FeedSource for CachedFeeds {
    fn fetch(&self, operator_id: &str) -> Result<Vec<u8>, linemap::pipeline::FetchError> {
        match self.archives.get(operator_id) {
            Some(Ok(path)) => Ok(fs::read(path)?),
            Some(Err(reason)) => Err(reason.clone().into()),
            None => {
                let path = cache_path(&self.cache_dir, operator_id);
                if path.exists() {
                    Ok(fs::read(path)?)
                } else {
                    Err(format!("no feed URL known and no archive at {}", path.display()).into())
                }
            }
        }
    }
}

pub fn cache_path(cache_dir: &Path, id: &str) -> PathBuf {
    cache_dir.join(format!("{id}.zip"))
}

/// Makes sure every feed has an archive in `cache_dir`, downloading the
/// missing ones (all of them when `refresh` is set) concurrently.
pub async fn prefetch(feeds: &[&Feed], cache_dir: &Path, refresh: bool) -> CachedFeeds {
    let now = Instant::now();
    let client = reqwest::Client::new();
    let results = join_all(feeds.iter().map(|feed| {
        let client = &client;
        async move {
            let path = cache_path(cache_dir, feed.id);
            let result = if path.exists() && !refresh {
                info!("Using cached {} archive at {}", feed.id, path.display());
                Ok(path)
            } else {
                download(client, feed, &path).await.map(|_| path)
            };
            (feed.id.to_string(), result)
        }
    }))
    .await;
    debug!("Fetching {} feeds took {:?}", feeds.len(), now.elapsed());
    CachedFeeds {
        cache_dir: cache_dir.to_path_buf(),
        archives: results.into_iter().collect(),
    }
}

async fn download(client: &reqwest::Client, feed: &Feed, path: &Path) -> Result<(), String> {
    info!("Downloading {} from {}", feed.id, feed.url);
    let response = client
        .get(feed.url)
        .header(ACCEPT_ENCODING, "gzip, deflate")
        .send()
        .await
        .map_err(|err| {
            error!("Failed to fetch {}: {err}", feed.id);
            format!("request failed: {err}")
        })?;

    if !response.status().is_success() {
        let status = response.status();
        error!("Response for {} is not success: {status}", feed.id);
        return Err(format!("server answered {status}"));
    }

    if let Some(dir) = path.parent() {
        tokio::fs::create_dir_all(dir)
            .await
            .map_err(|err| format!("failed to create cache directory: {err}"))?;
    }
    let size = save_stream(response.bytes_stream(), path).await?;
    info!("Downloaded {} ({:.2} MB)", feed.id, size as f64 / 1024.0 / 1024.0);
    Ok(())
}

/// Streams `chunks` into `path` through a `.zip.partial` file that is
/// removed again if anything fails. Returns the number of bytes written.
async fn save_stream<S, B, E>(chunks: S, path: &Path) -> Result<usize, String>
where
    S: Stream<Item = Result<B, E>>,
    B: AsRef<[u8]>,
    E: fmt::Display,
{
    let partial = path.with_extension("zip.partial");
    let result = write_partial(chunks, &partial).await;
    let result = match result {
        Ok(size) => tokio::fs::rename(&partial, path)
            .await
            .map(|()| size)
            .map_err(|err| format!("failed to move archive into place: {err}")),
        Err(err) => Err(err),
    };
    if result.is_err() {
        let _ = tokio::fs::remove_file(&partial).await;
    }
    result
}

async fn write_partial<S, B, E>(chunks: S, partial: &Path) -> Result<usize, String>
where
    S: Stream<Item = Result<B, E>>,
    B: AsRef<[u8]>,
    E: fmt::Display,
{
    let mut chunks = pin!(chunks);
    let mut file = File::create(partial)
        .await
        .map_err(|err| format!("failed to create file: {err}"))?;
    let mut size = 0usize;
    while let Some(chunk) = chunks.next().await {
        let data = chunk.map_err(|err| format!("failed to fetch chunk: {err}"))?;
        let data = data.as_ref();
        size += data.len();
        file.write_all(data)
            .await
            .map_err(|err| format!("failed to write to file: {err}"))?;
    }
    file.flush()
        .await
        .map_err(|err| format!("failed to flush file: {err}"))?;
    Ok(size)
}
