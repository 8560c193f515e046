use contact_api::{
    application::submit_contact::use_case::SubmitContactUseCase,
    config::Config,
    infrastructure::mail::traits::{Mailer, OutgoingEmail},
    presentation::http::{routes::create_router, state::AppState},
};
use async_trait::async_trait;
use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode, header},
};
use serde::de::DeserializeOwned;
use std::sync::{Arc, Mutex};
use tower::ServiceExt;
use uuid::Uuid;

pub type Outbox = Arc<Mutex<Vec<OutgoingEmail>>>;

/// Records every message instead of speaking SMTP; delivery always succeeds.
#[derive(Clone, Default)]
struct RecordingMailer {
    outbox: Outbox,
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send(&self, email: OutgoingEmail) -> anyhow::Result<()> {
        self.outbox.lock().unwrap().push(email);
        Ok(())
    }

    async fn verify(&self) -> anyhow::Result<()> {
        Ok(())
    }
}

/// Every transport operation fails, as if the relay were unreachable.
struct FailingMailer;

#[async_trait]
impl Mailer for FailingMailer {
    async fn send(&self, _email: OutgoingEmail) -> anyhow::Result<()> {
        Err(anyhow::anyhow!("connection reset by relay"))
    }

    async fn verify(&self) -> anyhow::Result<()> {
        Err(anyhow::anyhow!("connection refused"))
    }
}

pub struct TestApp {
    pub app: Router,
    pub outbox: Outbox,
}

fn build_config() -> Config {
    Config {
        smtp_host: "smtp.test.local".to_string(),
        smtp_port: 465,
        smtp_user: "relay@test.local".to_string(),
        smtp_pass: "secret".to_string(),
        from_email: "shop@example.com".to_string(),
        to_email: "owner@example.com".to_string(),
        allowed_origin: "https://storefront.example.com".to_string(),
        host: "127.0.0.1".to_string(),
        port: 0,
        smtp_send_timeout_seconds: 5,
        public_dir: "./public".to_string(),
    }
}

fn router_with(mailer: Arc<dyn Mailer>) -> Router {
    let config = build_config();
    let submit = Arc::new(SubmitContactUseCase::new(
        mailer.clone(),
        config.from_email.clone(),
        config.to_email.clone(),
    ));
    create_router(AppState {
        mailer,
        submit,
        config,
    })
}

pub fn spawn_app() -> TestApp {
    let recording = RecordingMailer::default();
    let outbox = recording.outbox.clone();
    TestApp {
        app: router_with(Arc::new(recording)),
        outbox,
    }
}

/// An app whose mail transport always fails.
pub fn spawn_failing_app() -> Router {
    router_with(Arc::new(FailingMailer))
}

pub async fn send(app: &Router, req: Request<Body>) -> axum::response::Response {
    app.clone().oneshot(req).await.expect("request failed")
}

pub async fn read_json<T: DeserializeOwned>(res: axum::response::Response) -> T {
    let bytes = to_bytes(res.into_body(), usize::MAX)
        .await
        .expect("failed to read body");
    serde_json::from_slice(&bytes).expect("failed to parse json")
}

pub async fn read_text(res: axum::response::Response) -> String {
    let bytes = to_bytes(res.into_body(), usize::MAX)
        .await
        .expect("failed to read body");
    String::from_utf8(bytes.to_vec()).expect("invalid utf8")
}

pub fn assert_status(status: StatusCode, expected: StatusCode) {
    assert_eq!(status, expected, "expected {}, got {}", expected, status);
}

/// Build a raw multipart/form-data body: text fields plus an optional file part
/// bound to the `file` field as `(filename, content type, bytes)`.
pub fn multipart_form_body(
    fields: &[(&str, &str)],
    file: Option<(&str, &str, &[u8])>,
) -> (String, Vec<u8>) {
    let boundary = format!("----relay-boundary-{}", Uuid::now_v7());
    let mut body = Vec::new();

    for (name, value) in fields {
        body.extend_from_slice(format!("--{}\r\n", boundary).as_bytes());
        body.extend_from_slice(
            format!("Content-Disposition: form-data; name=\"{}\"\r\n\r\n", name).as_bytes(),
        );
        body.extend_from_slice(value.as_bytes());
        body.extend_from_slice(b"\r\n");
    }

    if let Some((file_name, content_type, bytes)) = file {
        body.extend_from_slice(format!("--{}\r\n", boundary).as_bytes());
        body.extend_from_slice(
            format!(
                "Content-Disposition: form-data; name=\"file\"; filename=\"{}\"\r\n",
                file_name
            )
            .as_bytes(),
        );
        body.extend_from_slice(format!("Content-Type: {}\r\n\r\n", content_type).as_bytes());
        body.extend_from_slice(bytes);
        body.extend_from_slice(b"\r\n");
    }

    body.extend_from_slice(format!("--{}--\r\n", boundary).as_bytes());
    (boundary, body)
}

pub fn upload_request(boundary: &str, body: Vec<u8>) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/upload")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={}", boundary),
        )
        .body(Body::from(body))
        .expect("failed to build upload request")
}
