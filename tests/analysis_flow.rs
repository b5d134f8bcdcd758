//! End-to-end analysis flow against an in-process mock service.

use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::Router;
use retinascope::client::{AnalysisClient, IMAGE_FIELD};
use retinascope::config::Config;
use retinascope::controller::{AnalysisController, Phase};
use retinascope::error::{AnalysisError, UploadError};
use retinascope::model::{AnalysisResult, ImageFile, NoticeKind, ResultSummary};
use serde_json::{json, Value};
use std::net::SocketAddr;
use std::sync::Arc;
use tempfile::tempdir;
use tokio::sync::Mutex;

const PNG_HEADER: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

#[derive(Debug, Clone)]
struct Upload {
    field: String,
    file_name: Option<String>,
    content_type: Option<String>,
    len: usize,
}

#[derive(Clone)]
struct MockService {
    status: StatusCode,
    body: String,
    uploads: Arc<Mutex<Vec<Upload>>>,
}

async fn analyze(State(service): State<MockService>, mut multipart: Multipart) -> impl IntoResponse {
    while let Ok(Some(field)) = multipart.next_field().await {
        let mut upload = Upload {
            field: field.name().unwrap_or_default().to_string(),
            file_name: field.file_name().map(str::to_string),
            content_type: field.content_type().map(str::to_string),
            len: 0,
        };
        upload.len = field.bytes().await.map(|bytes| bytes.len()).unwrap_or(0);
        service.uploads.lock().await.push(upload);
    }
    (service.status, service.body.clone())
}

async fn overlay() -> impl IntoResponse {
    PNG_HEADER.to_vec()
}

async fn spawn_service(status: StatusCode, body: Value) -> (SocketAddr, Arc<Mutex<Vec<Upload>>>) {
    spawn_raw_service(status, body.to_string()).await
}

async fn spawn_raw_service(
    status: StatusCode,
    body: String,
) -> (SocketAddr, Arc<Mutex<Vec<Upload>>>) {
    let uploads = Arc::new(Mutex::new(Vec::new()));
    let service = MockService {
        status,
        body,
        uploads: Arc::clone(&uploads),
    };
    let app = Router::new()
        .route("/analyze", post(analyze))
        .route("/overlay.png", get(overlay))
        .with_state(service);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind listener");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move { axum::serve(listener, app).await.expect("serve app") });
    (addr, uploads)
}

fn config_for(addr: SocketAddr) -> Config {
    Config {
        endpoint: format!("http://{addr}/analyze"),
        ..Config::default()
    }
}

async fn sample_png(dir: &tempfile::TempDir) -> ImageFile {
    let path = dir.path().join("sample.png");
    std::fs::write(&path, PNG_HEADER).expect("write sample");
    ImageFile::load(path).await.expect("load sample")
}

async fn run_analysis(controller: &mut AnalysisController, client: &AnalysisClient) {
    let pending = controller.begin_analysis().expect("analysis should start");
    assert_eq!(controller.phase(), Phase::Analyzing);
    let outcome = client.analyze(pending.request).await;
    controller.finish_analysis(pending.attempt, outcome);
}

#[tokio::test]
async fn sparse_response_renders_scores_only() {
    let (addr, uploads) = spawn_service(
        StatusCode::OK,
        json!({"disease_name": "AMD", "probability": 0.5, "confidence": 0.75}),
    )
    .await;
    let config = config_for(addr);
    let client = AnalysisClient::new(&config).expect("client");
    let mut controller = AnalysisController::new(config);

    let dir = tempdir().expect("tempdir");
    assert!(controller.submit_image(sample_png(&dir).await));
    assert_eq!(controller.phase(), Phase::Selected);
    assert!(controller.display_url().is_some());

    run_analysis(&mut controller, &client).await;
    assert_eq!(controller.phase(), Phase::Completed);

    let result = controller.result().expect("result");
    let summary = ResultSummary::from_result(result);
    assert_eq!(summary.condition, "AMD");
    assert_eq!(summary.probability_label(), "50%");
    assert_eq!(summary.confidence_label(), "75%");
    assert!(summary.affected_areas.is_none());
    assert!(summary.recommendations.is_none());
    assert!(summary.severity.is_none());
    assert!(controller.overlay().is_none());
    assert_eq!(controller.notice().map(|n| n.kind), Some(NoticeKind::Info));

    let uploads = uploads.lock().await;
    assert_eq!(uploads.len(), 1);
    assert_eq!(uploads[0].field, IMAGE_FIELD);
    assert_eq!(uploads[0].file_name.as_deref(), Some("sample.png"));
    assert_eq!(uploads[0].content_type.as_deref(), Some("image/png"));
    assert_eq!(uploads[0].len, PNG_HEADER.len());
}

#[tokio::test]
async fn server_error_uses_fallback_result() {
    let (addr, _) = spawn_service(
        StatusCode::INTERNAL_SERVER_ERROR,
        json!({"error": "model not loaded"}),
    )
    .await;
    let config = config_for(addr);
    let client = AnalysisClient::new(&config).expect("client");
    let mut controller = AnalysisController::new(config);

    let dir = tempdir().expect("tempdir");
    controller.submit_image(sample_png(&dir).await);
    run_analysis(&mut controller, &client).await;

    assert_eq!(controller.phase(), Phase::Completed);
    assert_eq!(controller.result(), Some(&AnalysisResult::fallback()));
    let notice = controller.notice().expect("notice");
    assert_eq!(notice.kind, NoticeKind::Warning);
    assert_eq!(
        notice.description,
        "Could not connect to analysis server. Showing demo results."
    );
}

#[tokio::test]
async fn unreachable_server_uses_fallback_result() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind listener");
    let addr = listener.local_addr().expect("local addr");
    drop(listener);

    let config = config_for(addr);
    let client = AnalysisClient::new(&config).expect("client");
    let dir = tempdir().expect("tempdir");
    let file = sample_png(&dir).await;

    let err = client
        .analyze((&file).into())
        .await
        .expect_err("nothing is listening");
    assert!(matches!(err, AnalysisError::Request(_)));

    let mut controller = AnalysisController::new(config);
    controller.submit_image(file);
    run_analysis(&mut controller, &client).await;
    assert_eq!(controller.result(), Some(&AnalysisResult::fallback()));
}

#[tokio::test]
async fn non_json_success_is_a_failure() {
    let (addr, _) = spawn_raw_service(StatusCode::OK, "<html>maintenance</html>".into()).await;
    let client = AnalysisClient::new(&config_for(addr)).expect("client");
    let dir = tempdir().expect("tempdir");
    let file = sample_png(&dir).await;

    let err = client.analyze((&file).into()).await.expect_err("parse failure");
    assert!(matches!(err, AnalysisError::Parse(_)));
}

#[tokio::test]
async fn overlay_references_are_resolved() {
    let (addr, _) = spawn_service(
        StatusCode::OK,
        json!({
            "disease_name": "Glaucoma",
            "probability": 0.873,
            "confidence": 0.9,
            "segmented_image": "data:image/png;base64,iVBORw0KGgo=",
        }),
    )
    .await;
    let client = AnalysisClient::new(&config_for(addr)).expect("client");
    let dir = tempdir().expect("tempdir");
    let file = sample_png(&dir).await;

    let report = client.analyze((&file).into()).await.expect("report");
    assert_eq!(report.overlay.as_deref(), Some(&PNG_HEADER[..]));
    assert_eq!(ResultSummary::from_result(&report.result).probability_label(), "87%");

    let (addr, _) = spawn_service(
        StatusCode::OK,
        json!({"segmented_image": format!("http://{addr}/overlay.png")}),
    )
    .await;
    let client = AnalysisClient::new(&config_for(addr)).expect("client");
    let report = client.analyze((&file).into()).await.expect("report");
    assert_eq!(report.overlay.as_deref(), Some(&PNG_HEADER[..]));
}

#[tokio::test]
async fn broken_overlay_falls_back_to_placeholder() {
    let (addr, _) = spawn_service(
        StatusCode::OK,
        json!({"disease_name": "AMD", "segmented_image": "data:image/png;base64,@@@"}),
    )
    .await;
    let config = config_for(addr);
    let client = AnalysisClient::new(&config).expect("client");
    let mut controller = AnalysisController::new(config);

    let dir = tempdir().expect("tempdir");
    controller.submit_image(sample_png(&dir).await);
    run_analysis(&mut controller, &client).await;

    assert_eq!(controller.phase(), Phase::Completed);
    assert!(controller.result().unwrap().segmented_image.is_some());
    assert!(controller.overlay().is_none());
}

#[tokio::test]
async fn unsupported_files_are_not_read() {
    let dir = tempdir().expect("tempdir");
    let missing_gif = dir.path().join("scan.gif");

    let err = ImageFile::load(missing_gif).await.expect_err("rejected");
    assert!(matches!(err, UploadError::UnsupportedType { .. }));
    assert!(err.is_silent());

    let missing_png = dir.path().join("missing.png");
    let err = ImageFile::load(missing_png).await.expect_err("unreadable");
    assert!(matches!(err, UploadError::Read { .. }));
}

#[tokio::test]
async fn reset_releases_preview_and_drops_late_result() {
    let (addr, _) = spawn_service(StatusCode::OK, json!({"disease_name": "AMD"})).await;
    let config = config_for(addr);
    let client = AnalysisClient::new(&config).expect("client");
    let mut controller = AnalysisController::new(config);

    let dir = tempdir().expect("tempdir");
    controller.submit_image(sample_png(&dir).await);
    let pending = controller.begin_analysis().expect("started");

    controller.reset();
    assert_eq!(controller.live_previews(), 0);
    assert!(controller.is_loading());

    let outcome = client.analyze(pending.request).await;
    controller.finish_analysis(pending.attempt, outcome);
    assert_eq!(controller.phase(), Phase::Empty);
    assert!(!controller.is_loading());
    assert!(controller.result().is_none());

    controller.submit_image(sample_png(&dir).await);
    run_analysis(&mut controller, &client).await;
    assert_eq!(controller.phase(), Phase::Completed);
}
