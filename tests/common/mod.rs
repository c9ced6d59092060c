//! Shared utilities for integration testing: mock stitcher backends that
//! record exactly what the proxy forwarded.

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::extract::{Multipart, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::routing::post;
use axum::Router;
use tonic::{Request, Response, Status};

use stitch_proxy::proto::stitcher_server::{Stitcher, StitcherServer};
use stitch_proxy::proto::{StitchRequest, StitchResponse};

/// What the mock HTTP backend saw for one upload.
#[derive(Debug, Clone)]
pub struct ReceivedUpload {
    /// (filename, content) pairs under the `images` field, in arrival order.
    pub parts: Vec<(String, Vec<u8>)>,
    pub internal_key: Option<String>,
}

#[derive(Clone)]
struct MockStitcherState {
    received: Arc<Mutex<Vec<ReceivedUpload>>>,
    status: StatusCode,
    content_type: &'static str,
    body: &'static [u8],
}

/// Start a mock HTTP stitcher that records received multipart parts and
/// replies with a fixed response.
pub async fn start_mock_stitcher(
    addr: SocketAddr,
    status: u16,
    content_type: &'static str,
    body: &'static [u8],
) -> Arc<Mutex<Vec<ReceivedUpload>>> {
    let received = Arc::new(Mutex::new(Vec::new()));
    let state = MockStitcherState {
        received: received.clone(),
        status: StatusCode::from_u16(status).unwrap(),
        content_type,
        body,
    };

    let app = Router::new()
        .route("/stitch", post(record_upload))
        .with_state(state);
    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    received
}

async fn record_upload(
    State(state): State<MockStitcherState>,
    headers: HeaderMap,
    mut multipart: Multipart,
) -> impl IntoResponse {
    let mut parts = Vec::new();
    while let Some(field) = multipart.next_field().await.unwrap() {
        if field.name() == Some("images") {
            let filename = field.file_name().unwrap_or("").to_string();
            let content = field.bytes().await.unwrap().to_vec();
            parts.push((filename, content));
        }
    }

    let internal_key = headers
        .get("x-internal-key")
        .and_then(|v| v.to_str().ok())
        .map(String::from);

    state
        .received
        .lock()
        .unwrap()
        .push(ReceivedUpload { parts, internal_key });

    (
        state.status,
        [("content-type", state.content_type)],
        state.body,
    )
}

struct MockGrpcStitcher {
    received: Arc<Mutex<Vec<StitchRequest>>>,
    reply: Result<StitchResponse, String>,
}

#[tonic::async_trait]
impl Stitcher for MockGrpcStitcher {
    async fn process(
        &self,
        request: Request<StitchRequest>,
    ) -> Result<Response<StitchResponse>, Status> {
        self.received.lock().unwrap().push(request.into_inner());
        match &self.reply {
            Ok(response) => Ok(Response::new(response.clone())),
            Err(message) => Err(Status::internal(message.clone())),
        }
    }
}

/// Start a mock gRPC stitcher that records received requests and replies
/// with a fixed response (or a fixed error status).
pub async fn start_mock_grpc_stitcher(
    addr: SocketAddr,
    reply: Result<StitchResponse, String>,
) -> Arc<Mutex<Vec<StitchRequest>>> {
    let received = Arc::new(Mutex::new(Vec::new()));
    let service = MockGrpcStitcher {
        received: received.clone(),
        reply,
    };

    tokio::spawn(async move {
        tonic::transport::Server::builder()
            .add_service(StitcherServer::new(service))
            .serve(addr)
            .await
            .unwrap();
    });

    received
}
