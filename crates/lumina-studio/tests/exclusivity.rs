//! Pipeline exclusivity tests with a service whose script call blocks until released.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Notify;

use lumina_client::{GenerationService, ServiceResult};
use lumina_models::{
    LocalImage, PipelineStatus, ProductDetails, ScriptRequest, ScriptResponse, UploadedFile,
    VideoRequest, VideoResponse,
};
use lumina_studio::{ErrorKind, Session, StudioError};

#[derive(Default)]
struct GatedService {
    release: Notify,
    script_calls: AtomicUsize,
    other_calls: AtomicUsize,
}

#[async_trait]
impl GenerationService for GatedService {
    async fn extract_product_details(&self, _url: &str) -> ServiceResult<ProductDetails> {
        self.other_calls.fetch_add(1, Ordering::SeqCst);
        Ok(ProductDetails::default())
    }

    async fn generate_script(&self, _request: &ScriptRequest) -> ServiceResult<ScriptResponse> {
        self.script_calls.fetch_add(1, Ordering::SeqCst);
        self.release.notified().await;
        Ok(ScriptResponse {
            script: "GATED".into(),
            status: None,
        })
    }

    async fn upload_images(&self, images: &[LocalImage]) -> ServiceResult<Vec<UploadedFile>> {
        self.other_calls.fetch_add(1, Ordering::SeqCst);
        Ok(images
            .iter()
            .map(|i| UploadedFile {
                path: format!("/img/{}", i.file_name),
                id: None,
                filename: None,
            })
            .collect())
    }

    async fn generate_video(&self, request: &VideoRequest) -> ServiceResult<VideoResponse> {
        self.other_calls.fetch_add(1, Ordering::SeqCst);
        Ok(VideoResponse {
            script: request.script.clone(),
            hosted_url: Some("https://videos.example.com/gated.mp4".into()),
            video_id: None,
            video_name: None,
            status: None,
            created_at: None,
        })
    }

    async fn video_status(&self, _video_id: &str) -> ServiceResult<VideoResponse> {
        unreachable!("not used")
    }
}

fn gated_session() -> (Arc<Session>, Arc<GatedService>) {
    let service = Arc::new(GatedService::default());
    let session = Arc::new(Session::new(service.clone()));
    session.set_description("Desk lamp");
    session.edit_script("ready to render");
    (session, service)
}

async fn wait_until_busy(session: &Session) {
    while session.status() == PipelineStatus::Idle {
        tokio::task::yield_now().await;
    }
}

#[tokio::test]
async fn test_stages_are_rejected_while_script_generates() {
    let (session, service) = gated_session();

    let running = {
        let session = session.clone();
        tokio::spawn(async move { session.generate_script().await })
    };
    wait_until_busy(&session).await;
    assert_eq!(session.status(), PipelineStatus::GeneratingScript);

    let err = session.generate_video().await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Busy);
    assert!(matches!(
        err,
        StudioError::Busy {
            requested: PipelineStatus::GeneratingVideo,
            running: PipelineStatus::GeneratingScript,
        }
    ));

    assert!(session.extract_details("https://shop.example.com/x").await.unwrap_err().is_busy());
    assert!(session.regenerate_script().await.unwrap_err().is_busy());
    assert!(session.generate_script().await.unwrap_err().is_busy());

    assert_eq!(service.script_calls.load(Ordering::SeqCst), 1);
    assert_eq!(service.other_calls.load(Ordering::SeqCst), 0);
    assert_eq!(session.script().edited, "ready to render");

    service.release.notify_one();
    assert_eq!(running.await.unwrap().unwrap(), "GATED");
    assert_eq!(session.status(), PipelineStatus::Idle);

    // Admitted again once the stage finished.
    session.generate_video().await.unwrap();
    assert_eq!(service.other_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_busy_is_reported_before_validation() {
    let (session, service) = gated_session();

    let running = {
        let session = session.clone();
        tokio::spawn(async move { session.generate_script().await })
    };
    wait_until_busy(&session).await;

    // A blank URL would fail validation, but the running stage wins.
    let err = session.extract_details("").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Busy);

    service.release.notify_one();
    running.await.unwrap().unwrap();
}

#[tokio::test]
async fn test_dropping_in_flight_stage_releases_status() {
    let (session, service) = gated_session();

    let mut pending = Box::pin(session.generate_script());
    let timed_out = tokio::time::timeout(Duration::from_millis(20), &mut pending).await;
    assert!(timed_out.is_err());
    assert_eq!(session.status(), PipelineStatus::GeneratingScript);

    drop(pending);
    assert_eq!(session.status(), PipelineStatus::Idle);
    assert_eq!(service.script_calls.load(Ordering::SeqCst), 1);
    assert!(session.script().generated.is_none());
}
