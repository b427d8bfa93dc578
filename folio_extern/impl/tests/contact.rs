use axum::{http::StatusCode, routing, Json, Router};
use folio_demo::{ANA_CRUZ, INVALID};
use folio_extern_contracts::contact::{ContactApiIssue, ContactApiService, ContactApiSubmitError};
use folio_extern_impl::contact::{ContactApiServiceConfig, ContactApiServiceImpl};
use folio_utils::assert_matches;
use serde_json::{json, Value};
use tokio::net::TcpListener;
use url::Url;

#[tokio::test]
async fn ok() {
    let server = TestServer::start().await;
    let sut = server.client("ok");

    let result = sut.submit(&ANA_CRUZ).await;

    result.unwrap();
}

#[tokio::test]
async fn rejected() {
    let server = TestServer::start().await;
    let sut = server.client("invalid");

    let result = sut.submit(&INVALID).await;

    let Err(ContactApiSubmitError::Rejected(issues)) = result else {
        panic!("expected rejection, got {result:?}");
    };
    assert_eq!(
        issues,
        [
            ContactApiIssue {
                path: vec!["firstName".into()],
                message: "First name is required".into(),
            },
            ContactApiIssue {
                path: vec![],
                message: "Failed to parse the request body".into(),
            },
        ]
    );
}

#[tokio::test]
async fn server_error() {
    let server = TestServer::start().await;
    let sut = server.client("broken");

    let result = sut.submit(&ANA_CRUZ).await;

    assert_matches!(result, Err(ContactApiSubmitError::ServerError(500)));
}

#[tokio::test]
async fn unreachable() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    let sut = ContactApiServiceImpl::new(ContactApiServiceConfig::new(
        format!("http://{addr}/api/contact").parse().unwrap(),
    ));

    let result = sut.submit(&ANA_CRUZ).await;

    assert_matches!(result, Err(ContactApiSubmitError::Other(_)));
}

struct TestServer {
    base: Url,
}

impl TestServer {
    async fn start() -> Self {
        let router = Router::new()
            .route("/ok", routing::post(ok_handler))
            .route("/invalid", routing::post(invalid_handler))
            .route("/broken", routing::post(broken_handler));

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move { axum::serve(listener, router).await.unwrap() });

        Self {
            base: format!("http://{addr}/").parse().unwrap(),
        }
    }

    fn client(&self, path: &str) -> ContactApiServiceImpl {
        ContactApiServiceImpl::new(ContactApiServiceConfig::new(self.base.join(path).unwrap()))
    }
}

async fn ok_handler(Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    let expected = json!({
        "firstName": "Ana",
        "lastName": "Cruz",
        "email": "ana@example.com",
        "message": "Hello there",
    });
    if body == expected {
        (StatusCode::OK, Json(json!({"ok": true})))
    } else {
        (StatusCode::BAD_REQUEST, Json(body))
    }
}

async fn invalid_handler() -> (StatusCode, Json<Value>) {
    (
        StatusCode::UNPROCESSABLE_ENTITY,
        Json(json!({
            "error": "validation",
            "issues": [
                {"path": ["firstName"], "message": "First name is required"},
                {"path": [], "message": "Failed to parse the request body"},
            ],
        })),
    )
}

async fn broken_handler() -> (StatusCode, Json<Value>) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({"error": "server_error"})),
    )
}
