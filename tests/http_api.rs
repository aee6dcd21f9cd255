// End-to-end tests for the HTTP API against a scripted extractor

use std::fs;
use std::future::poll_fn;
use std::io::{Cursor, Read};
use std::path::Path;
use std::pin::Pin;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::{to_bytes, Body};
use axum::http::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use axum::http::{Request, StatusCode};
use axum::response::Response;
use axum::Router;
use futures_core::Stream;
use serde_json::{json, Value};
use tempfile::TempDir;
use tower::ServiceExt;

use youtube_downloader_server::downloader::format_selector::STREAM_CHUNK_SIZE;
use youtube_downloader_server::downloader::{
    DownloadError, DownloadOptions, FailureKind, InfoOptions, MediaExtractor, RawInfo,
};
use youtube_downloader_server::http::{router, AppState};

#[derive(Debug, Clone, PartialEq)]
enum Call {
    Info { url: String, flat: bool },
    Download { url: String, playlist: bool },
}

/// Extractor that returns canned metadata and writes fake media to disk.
///
/// Downloads always leave a partial file behind first, like yt-dlp does
/// when it fails midway.
struct FakeExtractor {
    info: RawInfo,
    video: Vec<u8>,
    info_error: Option<String>,
    download_error: Option<String>,
    calls: Mutex<Vec<Call>>,
}

impl FakeExtractor {
    fn new(info: RawInfo) -> Self {
        Self {
            info,
            video: b"fake mp4 bytes".to_vec(),
            info_error: None,
            download_error: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Every call fails with `message`
    fn failing(message: &str) -> Self {
        Self {
            info_error: Some(message.to_string()),
            download_error: Some(message.to_string()),
            ..Self::new(RawInfo::default())
        }
    }

    /// Metadata resolves, the download itself fails with `message`
    fn failing_download(info: RawInfo, message: &str) -> Self {
        Self {
            download_error: Some(message.to_string()),
            ..Self::new(info)
        }
    }

    fn with_video(mut self, video: Vec<u8>) -> Self {
        self.video = video;
        self
    }

    fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn outcome(&self, error: &Option<String>) -> Result<RawInfo, DownloadError> {
        match error {
            Some(message) => Err(DownloadError::Extraction(message.clone())),
            None => Ok(self.info.clone()),
        }
    }
}

#[async_trait]
impl MediaExtractor for FakeExtractor {
    fn name(&self) -> &'static str {
        "fake"
    }

    async fn extract_info(
        &self,
        url: &str,
        options: &InfoOptions,
    ) -> Result<RawInfo, DownloadError> {
        self.calls.lock().unwrap().push(Call::Info {
            url: url.to_string(),
            flat: options.flat_playlist,
        });
        self.outcome(&self.info_error)
    }

    async fn download(
        &self,
        url: &str,
        options: &DownloadOptions,
    ) -> Result<RawInfo, DownloadError> {
        self.calls.lock().unwrap().push(Call::Download {
            url: url.to_string(),
            playlist: options.playlist,
        });

        let dir = options.output_template.parent().unwrap();
        if options.playlist {
            fs::write(dir.join("3 - Broken.mp4.part"), b"partial").unwrap();
            fs::write(dir.join("1 - First.mp4"), b"first").unwrap();
            fs::write(dir.join("2 - Second.mp4"), b"second").unwrap();
        } else {
            fs::write(dir.join("media.f137.mp4.part"), &self.video[..self.video.len() / 2])
                .unwrap();
            if self.download_error.is_none() {
                fs::write(&options.output_template, &self.video).unwrap();
            }
        }
        self.outcome(&self.download_error)
    }
}

fn single_info(title: &str) -> RawInfo {
    RawInfo {
        kind: Some("video".to_string()),
        id: Some("abc123".to_string()),
        title: Some(title.to_string()),
        uploader: Some("Someone".to_string()),
        duration: Some(212.0),
        thumbnail: Some("https://img.example.com/abc123.jpg".to_string()),
        ..RawInfo::default()
    }
}

fn playlist_info(title: &str, count: usize) -> RawInfo {
    let entries = (1..=count)
        .map(|i| {
            Some(RawInfo {
                id: Some(format!("id{}", i)),
                title: Some(format!("Video {}", i)),
                url: Some(format!("https://www.youtube.com/watch?v=id{}", i)),
                ..RawInfo::default()
            })
        })
        .collect();
    RawInfo {
        kind: Some("playlist".to_string()),
        title: Some(title.to_string()),
        uploader: Some("Channel".to_string()),
        entries: Some(entries),
        ..RawInfo::default()
    }
}

fn app(extractor: Arc<FakeExtractor>, temp: &TempDir) -> Router {
    router(AppState::new(extractor, temp.path().to_path_buf()))
}

async fn post(app: Router, uri: &str, body: Value) -> Response {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

async fn json_body(response: Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn entries(dir: &Path) -> usize {
    fs::read_dir(dir).unwrap().count()
}

#[tokio::test]
async fn test_missing_url_is_rejected_without_calling_extractor() {
    let temp = TempDir::new().unwrap();
    let extractor = Arc::new(FakeExtractor::new(single_info("unused")));

    for uri in ["/api/download", "/api/info", "/api/download-playlist"] {
        for body in [json!({}), json!({"url": ""}), json!({"url": null, "type": "playlist"})] {
            let response = post(app(extractor.clone(), &temp), uri, body).await;
            assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{}", uri);
            let body = json_body(response).await;
            assert_eq!(body["error"], "No URL provided");
        }
    }

    assert!(extractor.calls().is_empty());
    assert_eq!(entries(temp.path()), 0);
}

#[tokio::test]
async fn test_malformed_json_is_a_client_error() {
    let temp = TempDir::new().unwrap();
    let extractor = Arc::new(FakeExtractor::new(single_info("unused")));

    let request = Request::builder()
        .method("POST")
        .uri("/api/info")
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let response = app(extractor.clone(), &temp).oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(json_body(response).await["error"].is_string());
    assert!(extractor.calls().is_empty());
}

#[tokio::test]
async fn test_info_single_shape() {
    let temp = TempDir::new().unwrap();
    let extractor = Arc::new(FakeExtractor::new(single_info("Some Song")));

    let response = post(
        app(extractor.clone(), &temp),
        "/api/info",
        json!({"url": "https://www.youtube.com/watch?v=abc123"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    assert_eq!(body["type"], "single");
    assert_eq!(body["title"], "Some Song");
    assert_eq!(body["uploader"], "Someone");
    assert_eq!(body["thumbnail"], "https://img.example.com/abc123.jpg");
    assert!(body["duration"].as_f64().unwrap() >= 0.0);

    assert_eq!(
        extractor.calls(),
        vec![Call::Info {
            url: "https://www.youtube.com/watch?v=abc123".to_string(),
            flat: false,
        }]
    );
}

#[tokio::test]
async fn test_info_playlist_preview_is_capped() {
    let temp = TempDir::new().unwrap();
    let extractor = Arc::new(FakeExtractor::new(playlist_info("Mix", 25)));

    let response = post(
        app(extractor.clone(), &temp),
        "/api/info",
        json!({"url": "https://www.youtube.com/playlist?list=PL1", "type": "playlist"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    assert_eq!(body["type"], "playlist");
    assert_eq!(body["title"], "Mix");
    assert_eq!(body["video_count"], 25);
    let videos = body["videos"].as_array().unwrap();
    assert_eq!(videos.len(), 10);
    assert_eq!(videos[0]["id"], "id1");
    assert_eq!(videos[0]["title"], "Video 1");

    assert!(matches!(extractor.calls()[0], Call::Info { flat: true, .. }));
}

#[tokio::test]
async fn test_download_streams_mp4_and_cleans_up() {
    let temp = TempDir::new().unwrap();
    let extractor = Arc::new(FakeExtractor::new(single_info("AC/DC: Back in Black?")));

    let response = post(
        app(extractor.clone(), &temp),
        "/api/download",
        json!({"url": "https://www.youtube.com/watch?v=abc123"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[CONTENT_TYPE], "video/mp4");

    let disposition = response.headers()[CONTENT_DISPOSITION].to_str().unwrap().to_string();
    assert_eq!(disposition, "attachment; filename=\"ACDC Back in Black.mp4\"");
    let filename = disposition
        .trim_start_matches("attachment; filename=\"")
        .trim_end_matches('"');
    assert!(!filename.contains('/') && !filename.contains('\\'));

    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert_eq!(&bytes[..], b"fake mp4 bytes");
    assert_eq!(entries(temp.path()), 0);

    let calls = extractor.calls();
    assert_eq!(calls.len(), 2);
    assert!(matches!(calls[0], Call::Info { flat: false, .. }));
    assert!(matches!(calls[1], Call::Download { playlist: false, .. }));
}

#[tokio::test]
async fn test_download_failure_is_classified_and_cleaned_up() {
    let temp = TempDir::new().unwrap();
    let extractor = Arc::new(FakeExtractor::failing(
        "ERROR: [youtube] abc123: Sign in to confirm you're not a bot",
    ));

    let response = post(
        app(extractor.clone(), &temp),
        "/api/download",
        json!({"url": "https://www.youtube.com/watch?v=abc123"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        json_body(response).await["error"],
        FailureKind::BotDetection.user_message()
    );
    assert_eq!(entries(temp.path()), 0);
}

#[tokio::test]
async fn test_unclassified_failure_passes_message_through() {
    let temp = TempDir::new().unwrap();
    let extractor = Arc::new(FakeExtractor::failing("ERROR: Unsupported URL: https://x.test/"));

    let response = post(
        app(extractor, &temp),
        "/api/info",
        json!({"url": "https://x.test/"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        json_body(response).await["error"],
        "ERROR: Unsupported URL: https://x.test/"
    );
}

#[tokio::test]
async fn test_playlist_download_is_zipped() {
    let temp = TempDir::new().unwrap();
    let extractor = Arc::new(FakeExtractor::new(playlist_info("Road Trip", 3)));

    let response = post(
        app(extractor.clone(), &temp),
        "/api/download-playlist",
        json!({"url": "https://www.youtube.com/playlist?list=PL1"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[CONTENT_TYPE], "application/zip");
    assert_eq!(
        response.headers()[CONTENT_DISPOSITION],
        "attachment; filename=\"Road Trip.zip\""
    );

    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert_eq!(entries(temp.path()), 0);

    let mut archive = zip::ZipArchive::new(Cursor::new(bytes.to_vec())).unwrap();
    let mut names: Vec<String> = archive.file_names().map(str::to_string).collect();
    names.sort();
    assert_eq!(names, vec!["1 - First.mp4", "2 - Second.mp4"]);

    let mut contents = String::new();
    archive
        .by_name("1 - First.mp4")
        .unwrap()
        .read_to_string(&mut contents)
        .unwrap();
    assert_eq!(contents, "first");

    assert_eq!(
        extractor.calls(),
        vec![Call::Download {
            url: "https://www.youtube.com/playlist?list=PL1".to_string(),
            playlist: true,
        }]
    );
}

#[tokio::test]
async fn test_playlist_failure_leaves_no_artifacts() {
    let temp = TempDir::new().unwrap();
    let extractor = Arc::new(FakeExtractor::failing("ERROR: HTTP Error 429: Too Many Requests"));

    let response = post(
        app(extractor.clone(), &temp),
        "/api/download-playlist",
        json!({"url": "https://www.youtube.com/playlist?list=PL1"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        json_body(response).await["error"],
        FailureKind::RateLimited.user_message()
    );
    // files were written before the failure
    assert!(matches!(extractor.calls().as_slice(), [Call::Download { playlist: true, .. }]));
    assert_eq!(entries(temp.path()), 0);
}

#[tokio::test]
async fn test_download_failure_after_partial_write_is_cleaned_up() {
    let temp = TempDir::new().unwrap();
    let extractor = Arc::new(FakeExtractor::failing_download(
        single_info("Half Done"),
        "ERROR: [youtube] abc123: Video unavailable",
    ));

    let response = post(
        app(extractor.clone(), &temp),
        "/api/download",
        json!({"url": "https://www.youtube.com/watch?v=abc123"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        json_body(response).await["error"],
        FailureKind::Unavailable.user_message()
    );

    let calls = extractor.calls();
    assert!(matches!(calls.last(), Some(Call::Download { playlist: false, .. })));
    assert_eq!(entries(temp.path()), 0);
}

#[tokio::test]
async fn test_abandoned_stream_removes_artifacts() {
    let temp = TempDir::new().unwrap();
    let video = vec![7u8; STREAM_CHUNK_SIZE * 4];
    let extractor =
        Arc::new(FakeExtractor::new(single_info("Long Video")).with_video(video.clone()));

    let response = post(
        app(extractor, &temp),
        "/api/download",
        json!({"url": "https://www.youtube.com/watch?v=abc123"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let mut body = response.into_body().into_data_stream();
    let first = poll_fn(|cx| Pin::new(&mut body).poll_next(cx))
        .await
        .unwrap()
        .unwrap();
    assert!(!first.is_empty());
    assert!(first.len() < video.len());
    assert_eq!(entries(temp.path()), 1);

    // client goes away mid-transfer
    drop(body);
    assert_eq!(entries(temp.path()), 0);
}

#[tokio::test]
async fn test_abandoned_playlist_stream_removes_archive() {
    let temp = TempDir::new().unwrap();
    let extractor = Arc::new(FakeExtractor::new(playlist_info("Road Trip", 3)));

    let response = post(
        app(extractor, &temp),
        "/api/download-playlist",
        json!({"url": "https://www.youtube.com/playlist?list=PL1"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let mut body = response.into_body().into_data_stream();
    let first = poll_fn(|cx| Pin::new(&mut body).poll_next(cx)).await;
    assert!(matches!(first, Some(Ok(_))));
    // only the archive remains while streaming; the download dir is gone
    assert_eq!(entries(temp.path()), 1);

    drop(body);
    assert_eq!(entries(temp.path()), 0);
}
