use super::*;
use anyhow::Result;
use axum::{http::StatusCode, routing::get, Router};
use shared::{
    domain::{CommentId, PostId},
    error::FetchFailureKind,
};
use tokio::net::TcpListener;

const TWO_COMMENTS: &str = r#"[
  {"postId": 1, "id": 1, "name": "id labore ex et quam laborum", "email": "Eliseo@gardner.biz", "body": "laudantium enim quasi"},
  {"postId": 1, "id": 2, "name": "quo vero reiciendis", "email": "Jayne_Kuhic@sydney.com", "body": "est natus enim nihil"}
]"#;

async fn spawn_server(app: Router) -> Result<String> {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    Ok(format!("http://{addr}"))
}

async fn spawn_comments_server(status: StatusCode, body: &'static str) -> Result<String> {
    let app = Router::new().route(
        "/comments",
        get(move || async move {
            (
                status,
                [(axum::http::header::CONTENT_TYPE, "application/json")],
                body,
            )
        }),
    );
    spawn_server(app).await
}

#[tokio::test]
async fn http_source_decodes_the_comment_array() {
    let base = spawn_comments_server(StatusCode::OK, TWO_COMMENTS)
        .await
        .expect("spawn server");
    let source = HttpCommentSource::new(&format!("{base}/comments")).expect("source");

    let comments = source.fetch_comments().await.expect("fetch");
    assert_eq!(comments.len(), 2);
    assert_eq!(comments[0].id, CommentId(1));
    assert_eq!(comments[1].post_id, PostId(1));
    assert_eq!(comments[1].email, "Jayne_Kuhic@sydney.com");
}

#[tokio::test]
async fn load_comments_folds_success_into_loaded_outcome() {
    let base = spawn_comments_server(StatusCode::OK, TWO_COMMENTS)
        .await
        .expect("spawn server");
    let source = HttpCommentSource::new(&format!("{base}/comments")).expect("source");

    let outcome = load_comments(&source).await;
    assert!(outcome.is_loaded());

    let mut controller = TableController::default();
    controller.apply_fetch(outcome);
    assert_eq!(controller.load_state(), &LoadState::Loaded);
    assert_eq!(controller.sum_of_visible_ids(), 3);
}

#[tokio::test]
async fn server_error_status_is_a_status_failure() {
    let base = spawn_comments_server(StatusCode::INTERNAL_SERVER_ERROR, "{}")
        .await
        .expect("spawn server");
    let source = HttpCommentSource::new(&format!("{base}/comments")).expect("source");

    match load_comments(&source).await {
        FetchOutcome::Failed(failure) => {
            assert_eq!(failure.kind, FetchFailureKind::Status);
            assert!(failure.message.contains("500"), "{}", failure.message);
        }
        other => panic!("expected failure, got {other:?}"),
    }
}

#[tokio::test]
async fn missing_route_is_a_status_failure() {
    let base = spawn_comments_server(StatusCode::OK, TWO_COMMENTS)
        .await
        .expect("spawn server");
    let source = HttpCommentSource::new(&format!("{base}/posts")).expect("source");

    let err = source.fetch_comments().await.expect_err("404");
    assert_eq!(err.kind(), FetchFailureKind::Status);
}

#[tokio::test]
async fn non_array_body_is_a_decode_failure() {
    let base = spawn_comments_server(StatusCode::OK, r#"{"comments": []}"#)
        .await
        .expect("spawn server");
    let source = HttpCommentSource::new(&format!("{base}/comments")).expect("source");

    let err = source.fetch_comments().await.expect_err("object body");
    assert_eq!(err.kind(), FetchFailureKind::Decode);
}

#[tokio::test]
async fn record_missing_fields_is_a_decode_failure() {
    let base = spawn_comments_server(StatusCode::OK, r#"[{"id": 1, "name": "only a name"}]"#)
        .await
        .expect("spawn server");
    let source = HttpCommentSource::new(&format!("{base}/comments")).expect("source");

    let err = source.fetch_comments().await.expect_err("partial record");
    assert_eq!(err.kind(), FetchFailureKind::Decode);
}

#[tokio::test]
async fn unreachable_endpoint_is_a_transport_failure() {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);

    let source = HttpCommentSource::new(&format!("http://{addr}/comments")).expect("source");
    let err = source.fetch_comments().await.expect_err("refused");
    assert_eq!(err.kind(), FetchFailureKind::Transport);
}

#[test]
fn endpoint_must_be_an_absolute_http_url() {
    let err = HttpCommentSource::new("not a url").err().expect("invalid");
    assert_eq!(err.kind(), FetchFailureKind::Endpoint);

    let err = HttpCommentSource::new("file:///tmp/comments.json")
        .err()
        .expect("file scheme");
    assert!(matches!(err, FetchError::UnsupportedScheme(ref s) if s == "file"));

    let source = HttpCommentSource::new(DEFAULT_ENDPOINT).expect("default endpoint");
    assert_eq!(source.endpoint().host_str(), Some("jsonplaceholder.typicode.com"));
}

#[tokio::test]
async fn static_source_serves_its_fixture() {
    let source = StaticCommentSource::from_json(TWO_COMMENTS).expect("fixture");
    let outcome = load_comments(&source).await;
    assert_eq!(
        outcome,
        FetchOutcome::Loaded(source.fetch_comments().await.expect("fetch"))
    );
    assert_eq!(source.describe(), "static(2 comments)");
}
