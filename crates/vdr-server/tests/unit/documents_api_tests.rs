//! Upload and retrieval routes

use rocket::http::Status;
use serde_json::json;

use crate::test_utils::{TestServer, png};

#[rocket::async_test]
async fn test_upload_then_retrieve() {
    let server = TestServer::start().await;
    server.create_default_collection().await;

    let (status, body) = server.upload("figure.png", &png([200, 30, 30])).await;
    assert_eq!(status, Status::Ok);
    assert_eq!(body["status"], "Document embedded successfully");
    assert_eq!(body["pages"], 1);
    assert_eq!(body["batches_total"], 1);
    assert_eq!(body["batches_completed"], 1);
    assert_eq!(body["next_id"], 1);
    assert_eq!(server.staged_entries(), 0);
    let page_file = format!("figure_{}.png", body["artifact_id"].as_str().unwrap());
    assert!(server.dir.path().join("images").join(&page_file).exists());

    let (status, body) = server
        .post_json("/document_retrieval", json!({"user_query": "red figure"}))
        .await;
    assert_eq!(status, Status::Ok);
    let paths = body["retrieved_image_paths"].as_array().unwrap();
    assert_eq!(paths.len(), 1);
    assert!(paths[0].as_str().unwrap().ends_with(&page_file));
    assert_eq!(body["scores"].as_array().unwrap().len(), 1);
    assert_eq!(body["results"][0]["id"], 0);
    assert_eq!(body["results"][0]["page_number"], 1);
    assert!(body["results"][0]["metadata"].is_null());
    assert!(body.get("answer").is_none());
}

#[rocket::async_test]
async fn test_ids_continue_across_uploads() {
    let server = TestServer::start().await;
    server.create_default_collection().await;

    let (_, first) = server.upload("a.png", &png([10, 10, 10])).await;
    let (_, second) = server.upload("b.jpg", &png([250, 250, 250])).await;
    assert_eq!(first["next_id"], 1);
    assert_eq!(second["next_id"], 2);

    let (status, body) = server
        .post_json(
            "/document_retrieval",
            json!({"user_query": "page", "top_k": 5}),
        )
        .await;
    assert_eq!(status, Status::Ok);
    assert_eq!(body["results"].as_array().unwrap().len(), 2);
}

#[rocket::async_test]
async fn test_unsupported_upload_is_bad_request() {
    let server = TestServer::start().await;
    server.create_default_collection().await;

    let (status, body) = server.upload("notes.txt", b"plain text").await;
    assert_eq!(status, Status::BadRequest);
    assert_eq!(body["detail"], "Unsupported artifact kind: notes.txt");
    assert_eq!(server.staged_entries(), 0);
}

#[rocket::async_test]
async fn test_upload_without_collection_cleans_staging() {
    let server = TestServer::start().await;

    let (status, body) = server.upload("figure.png", &png([1, 2, 3])).await;
    assert_eq!(status, Status::NotFound);
    assert!(body["detail"].as_str().unwrap().contains("not found"));
    assert_eq!(server.staged_entries(), 0);
    let images = std::fs::read_dir(server.dir.path().join("images")).unwrap();
    assert_eq!(images.count(), 0);
}

#[rocket::async_test]
async fn test_corrupt_image_fails_and_cleans_staging() {
    let server = TestServer::start().await;
    server.create_default_collection().await;

    let (status, body) = server.upload("broken.png", b"not a png").await;
    assert_eq!(status, Status::InternalServerError);
    assert!(body["detail"].is_string());
    assert_eq!(server.staged_entries(), 0);
}

#[rocket::async_test]
async fn test_empty_collection_is_no_match() {
    let server = TestServer::start().await;
    server.create_default_collection().await;

    let (status, body) = server
        .post_json("/document_retrieval", json!({"user_query": "anything"}))
        .await;
    assert_eq!(status, Status::NotFound);
    assert!(body["detail"].as_str().unwrap().contains("No matching documents"));
}

#[rocket::async_test]
async fn test_empty_query_is_bad_request() {
    let server = TestServer::start().await;
    server.create_default_collection().await;

    let (status, _) = server
        .post_json("/document_retrieval", json!({"user_query": "  "}))
        .await;
    assert_eq!(status, Status::BadRequest);
}

#[rocket::async_test]
async fn test_answer_requested_without_vision() {
    let server = TestServer::start().await;
    server.create_default_collection().await;
    server.upload("figure.png", &png([0, 0, 255])).await;

    let (status, body) = server
        .post_json(
            "/document_retrieval",
            json!({"user_query": "blue", "generate_answer": true}),
        )
        .await;
    assert_eq!(status, Status::Ok);
    assert!(body.get("answer").is_none());
    assert_eq!(body["answer_error"], "answer generation is not enabled");
}

#[rocket::async_test]
async fn test_retrieval_without_collection_is_unavailable() {
    let server = TestServer::start().await;

    let (status, body) = server
        .post_json("/document_retrieval", json!({"user_query": "anything"}))
        .await;
    assert_eq!(status, Status::ServiceUnavailable);
    assert!(body["detail"].as_str().unwrap().contains("not found"));
}

#[rocket::async_test]
async fn test_stalled_store_is_gateway_timeout() {
    let server = TestServer::with_stalled_store().await;
    server.create_default_collection().await;

    let (status, body) = server
        .post_json("/document_retrieval", json!({"user_query": "anything"}))
        .await;
    assert_eq!(status, Status::GatewayTimeout);
    assert!(body["detail"].as_str().unwrap().contains("query_points"));
}
