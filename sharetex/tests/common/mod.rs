//! Shared fixtures for integration tests.

#![allow(dead_code)]

use std::collections::{BTreeMap, HashMap};
use std::io::{Cursor, Write};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use futures::future::{BoxFuture, FutureExt};
use sharetex::cache::CacheStore;
use sharetex::catalog::{CatalogItem, Endpoints};
use sharetex::fetch::{FetchError, FetchOrchestrator, HttpClient, ZipArchiveReader};
use sharetex::naming::RenameRules;
use sharetex::Resolution;
use tempfile::TempDir;
use zip::write::SimpleFileOptions;

pub const ARCHIVE_URL: &str = "https://dl.example/amethyst-1-1k.zip";

/// HTTP client serving canned bodies after an optional delay.
#[derive(Default)]
pub struct MockHttpClient {
    responses: HashMap<String, Result<Vec<u8>, FetchError>>,
    delay: Option<Duration>,
    requests: AtomicUsize,
}

impl MockHttpClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(mut self, url: &str, body: Vec<u8>) -> Self {
        self.responses.insert(url.to_string(), Ok(body));
        self
    }

    pub fn fail(mut self, url: &str, error: FetchError) -> Self {
        self.responses.insert(url.to_string(), Err(error));
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn request_count(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }
}

impl HttpClient for MockHttpClient {
    fn get(&self, url: &str) -> BoxFuture<'_, Result<Vec<u8>, FetchError>> {
        self.requests.fetch_add(1, Ordering::SeqCst);
        let response = self.responses.get(url).cloned().unwrap_or_else(|| {
            Err(FetchError::Status {
                url: url.to_string(),
                status: 404,
            })
        });
        let delay = self.delay;
        async move {
            if let Some(delay) = delay {
                tokio::time::sleep(delay).await;
            }
            response
        }
        .boxed()
    }
}

/// Zip archive built in memory with stored (uncompressed) entries.
pub fn zip_archive(files: &[(&str, &[u8])]) -> Vec<u8> {
    let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default().compression_method(zip::CompressionMethod::Stored);
    for (path, bytes) in files {
        writer.start_file(*path, options).unwrap();
        writer.write_all(bytes).unwrap();
    }
    writer.finish().unwrap().into_inner()
}

/// The amethyst texture set as published in its resolution-first layout.
pub fn amethyst_archive() -> Vec<u8> {
    zip_archive(&[
        ("1K-amethyst_1-ao.jpg", b"ao"),
        ("1K-amethyst_1-diffuse.jpg", b"diffuse"),
        ("1K-amethyst_1-displacement.png", b"height"),
        ("1K-amethyst_1-normal.png", b"normal"),
        ("1K-amethyst_1-specular.jpg", b"specular"),
        ("preview.jpg", b"not a texture"),
        ("LICENSE", b"cc0"),
    ])
}

pub fn amethyst_item() -> CatalogItem {
    CatalogItem {
        id: "65a1".to_string(),
        slug: "amethyst-1".to_string(),
        title: "Amethyst".to_string(),
        item_type: "Textures".to_string(),
        category: "Rock".to_string(),
        publish_date: Utc::now(),
        tags: Vec::new(),
        preview_image_key: Some("u/6541/amethyst-1.webp".to_string()),
        download_links: BTreeMap::from([(Resolution::OneK, ARCHIVE_URL.to_string())]),
    }
}

pub fn orchestrator(temp: &TempDir, http: Arc<MockHttpClient>) -> FetchOrchestrator {
    FetchOrchestrator::new(
        http,
        Arc::new(ZipArchiveReader),
        Arc::new(CacheStore::new(temp.path().join("cache"), 16 * 1024 * 1024)),
        Arc::new(RenameRules::standard().clone()),
        Endpoints::default(),
    )
}
