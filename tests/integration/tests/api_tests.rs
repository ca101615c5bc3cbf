//! End-to-end API tests
//!
//! Each test spawns a server over a fresh in-memory store and exercises
//! the HTTP surface through a real client.

use integration_tests::{
    assert_json, expired_session_token, session_token, unique_suffix, AddCommentBody,
    CommentEnvelope, CommentListEnvelope, FailureBody, ReactBody, StatusBody, TestServer,
};
use reqwest::StatusCode;

#[tokio::test]
async fn test_health_check() {
    let server = TestServer::start().await.unwrap();

    let response = server.get("/health").await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_readiness_check() {
    let server = TestServer::start().await.unwrap();

    let response = server.get("/health/ready").await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["status"], "ok");
    assert_eq!(body["database"], "up");
}

#[tokio::test]
async fn test_add_comment_requires_token() {
    let server = TestServer::start().await.unwrap();

    let body = AddCommentBody::new("prod-1", "nice product");
    let response = server.post("/api/comments/add", &body).await.unwrap();

    // Failures still come back as HTTP 200 with success=false
    let failure: FailureBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(!failure.success);
    assert!(!failure.message.is_empty());
}

#[tokio::test]
async fn test_expired_token_rejected() {
    let server = TestServer::start().await.unwrap();
    let token = expired_session_token("user-expired").unwrap();

    let body = AddCommentBody::new("prod-1", "hello");
    let response = server
        .post_auth("/api/comments/add", &token, &body)
        .await
        .unwrap();

    let failure: FailureBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(!failure.success);
}

#[tokio::test]
async fn test_token_with_blank_subject_cannot_post() {
    let server = TestServer::start().await.unwrap();
    // A syntactically valid token whose subject claim is empty
    let token = session_token("", Some("Ghost"), None).unwrap();
    let product_id = format!("prod-{}", unique_suffix());

    let body = AddCommentBody::new(&product_id, "no identity");
    let response = server
        .post_auth("/api/comments/add", &token, &body)
        .await
        .unwrap();
    let failure: FailureBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(!failure.success);

    // Nothing ownerless was stored
    let response = server
        .get(&format!("/api/comments/get?productId={product_id}"))
        .await
        .unwrap();
    let listing: CommentListEnvelope = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(listing.comments.is_empty());
}

#[tokio::test]
async fn test_missing_query_params_stay_in_envelope() {
    let server = TestServer::start().await.unwrap();

    // List without productId
    let response = server.get("/api/comments/get").await.unwrap();
    let failure: FailureBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(!failure.success);
    assert!(!failure.message.is_empty());

    // Delete without commentId, with a valid session
    let token = session_token("user-query", None, None).unwrap();
    let response = server
        .delete_auth("/api/comments/delete", &token)
        .await
        .unwrap();
    let failure: FailureBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(!failure.success);
}

#[tokio::test]
async fn test_add_and_list_comment() {
    let server = TestServer::start().await.unwrap();
    let token = session_token("user-1", Some("Alice"), None).unwrap();
    let product_id = format!("prod-{}", unique_suffix());

    let body = AddCommentBody::new(&product_id, "great product");
    let response = server
        .post_auth("/api/comments/add", &token, &body)
        .await
        .unwrap();

    let envelope: CommentEnvelope = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(envelope.success);
    assert_eq!(envelope.comment.product_id, product_id);
    assert_eq!(envelope.comment.author_id, "user-1");
    assert_eq!(envelope.comment.author_name, "Alice");
    assert_eq!(envelope.comment.text, "great product");
    assert!(envelope.comment.reactions.is_empty());

    // Listing is public, no token needed
    let response = server
        .get(&format!("/api/comments/get?productId={product_id}"))
        .await
        .unwrap();
    let listing: CommentListEnvelope = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(listing.success);
    assert_eq!(listing.comments.len(), 1);
    assert_eq!(listing.comments[0].id, envelope.comment.id);
}

#[tokio::test]
async fn test_display_name_falls_back_to_token_claims() {
    let server = TestServer::start().await.unwrap();
    let token = session_token("user-claims", Some("Claimed Name"), None).unwrap();
    let product_id = format!("prod-{}", unique_suffix());

    // Request omits userName, so the token's name claim wins
    let body = AddCommentBody::new(&product_id, "from claims");
    let response = server
        .post_auth("/api/comments/add", &token, &body)
        .await
        .unwrap();
    let envelope: CommentEnvelope = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(envelope.comment.author_name, "Claimed Name");

    // An explicit userName in the request overrides the claim
    let body = AddCommentBody::new(&product_id, "explicit").with_name("Override");
    let response = server
        .post_auth("/api/comments/add", &token, &body)
        .await
        .unwrap();
    let envelope: CommentEnvelope = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(envelope.comment.author_name, "Override");
}

#[tokio::test]
async fn test_anonymous_fallback_without_name() {
    let server = TestServer::start().await.unwrap();
    let token = session_token("user-noname", None, None).unwrap();
    let product_id = format!("prod-{}", unique_suffix());

    let body = AddCommentBody::new(&product_id, "who am I");
    let response = server
        .post_auth("/api/comments/add", &token, &body)
        .await
        .unwrap();
    let envelope: CommentEnvelope = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(envelope.comment.author_name, "Anonymous");
}

#[tokio::test]
async fn test_blank_comment_rejected() {
    let server = TestServer::start().await.unwrap();
    let token = session_token("user-blank", Some("Bob"), None).unwrap();

    let body = AddCommentBody::new("prod-blank", "   ");
    let response = server
        .post_auth("/api/comments/add", &token, &body)
        .await
        .unwrap();

    let failure: FailureBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(!failure.success);
}

#[tokio::test]
async fn test_repeated_identical_comments_are_kept() {
    let server = TestServer::start().await.unwrap();
    let token = session_token("user-repeat", Some("Echo"), None).unwrap();
    let product_id = format!("prod-{}", unique_suffix());

    for _ in 0..3 {
        let body = AddCommentBody::new(&product_id, "same text");
        let response = server
            .post_auth("/api/comments/add", &token, &body)
            .await
            .unwrap();
        let envelope: CommentEnvelope = assert_json(response, StatusCode::OK).await.unwrap();
        assert!(envelope.success);
    }

    let response = server
        .get(&format!("/api/comments/get?productId={product_id}"))
        .await
        .unwrap();
    let listing: CommentListEnvelope = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(listing.comments.len(), 3);
}

#[tokio::test]
async fn test_listing_is_newest_first() {
    let server = TestServer::start().await.unwrap();
    let token = session_token("user-order", Some("Orly"), None).unwrap();
    let product_id = format!("prod-{}", unique_suffix());

    let mut ids = Vec::new();
    for i in 0..3 {
        let body = AddCommentBody::new(&product_id, &format!("comment {i}"));
        let response = server
            .post_auth("/api/comments/add", &token, &body)
            .await
            .unwrap();
        let envelope: CommentEnvelope = assert_json(response, StatusCode::OK).await.unwrap();
        ids.push(envelope.comment.id);
    }

    let response = server
        .get(&format!("/api/comments/get?productId={product_id}"))
        .await
        .unwrap();
    let listing: CommentListEnvelope = assert_json(response, StatusCode::OK).await.unwrap();

    let listed: Vec<String> = listing.comments.into_iter().map(|c| c.id).collect();
    let mut expected = ids.clone();
    expected.reverse();
    assert_eq!(listed, expected);
}

#[tokio::test]
async fn test_reaction_toggle_is_self_inverse() {
    let server = TestServer::start().await.unwrap();
    let token = session_token("user-react", Some("Rea"), None).unwrap();
    let product_id = format!("prod-{}", unique_suffix());

    let body = AddCommentBody::new(&product_id, "react to me");
    let response = server
        .post_auth("/api/comments/add", &token, &body)
        .await
        .unwrap();
    let envelope: CommentEnvelope = assert_json(response, StatusCode::OK).await.unwrap();
    let comment_id = envelope.comment.id;

    // First toggle adds the reaction
    let react = ReactBody::new(&comment_id, "heart");
    let response = server
        .post_auth("/api/comments/react", &token, &react)
        .await
        .unwrap();
    let envelope: CommentEnvelope = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(
        envelope.comment.reactions.get("heart").map(Vec::len),
        Some(1)
    );

    // Second toggle removes it again
    let react = ReactBody::new(&comment_id, "heart");
    let response = server
        .post_auth("/api/comments/react", &token, &react)
        .await
        .unwrap();
    let envelope: CommentEnvelope = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(envelope
        .comment
        .reactions
        .get("heart")
        .map_or(true, Vec::is_empty));
}

#[tokio::test]
async fn test_reaction_kinds_are_independent() {
    let server = TestServer::start().await.unwrap();
    let token = session_token("user-kinds", Some("Kin"), None).unwrap();
    let product_id = format!("prod-{}", unique_suffix());

    let body = AddCommentBody::new(&product_id, "many feelings");
    let response = server
        .post_auth("/api/comments/add", &token, &body)
        .await
        .unwrap();
    let envelope: CommentEnvelope = assert_json(response, StatusCode::OK).await.unwrap();
    let comment_id = envelope.comment.id;

    for kind in ["heart", "laugh", "ok"] {
        let react = ReactBody::new(&comment_id, kind);
        let response = server
            .post_auth("/api/comments/react", &token, &react)
            .await
            .unwrap();
        let envelope: CommentEnvelope = assert_json(response, StatusCode::OK).await.unwrap();
        assert!(envelope.success);
    }

    // Removing one kind leaves the others untouched
    let react = ReactBody::new(&comment_id, "laugh");
    let response = server
        .post_auth("/api/comments/react", &token, &react)
        .await
        .unwrap();
    let envelope: CommentEnvelope = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(
        envelope.comment.reactions.get("heart").map(Vec::len),
        Some(1)
    );
    assert_eq!(envelope.comment.reactions.get("ok").map(Vec::len), Some(1));
    assert!(envelope
        .comment
        .reactions
        .get("laugh")
        .map_or(true, Vec::is_empty));
}

#[tokio::test]
async fn test_reactions_from_multiple_users_accumulate() {
    let server = TestServer::start().await.unwrap();
    let author = session_token("user-author", Some("Auth"), None).unwrap();
    let product_id = format!("prod-{}", unique_suffix());

    let body = AddCommentBody::new(&product_id, "popular take");
    let response = server
        .post_auth("/api/comments/add", &author, &body)
        .await
        .unwrap();
    let envelope: CommentEnvelope = assert_json(response, StatusCode::OK).await.unwrap();
    let comment_id = envelope.comment.id;

    for i in 0..3 {
        let token = session_token(&format!("fan-{i}"), None, None).unwrap();
        let react = ReactBody::new(&comment_id, "heart");
        let response = server
            .post_auth("/api/comments/react", &token, &react)
            .await
            .unwrap();
        let envelope: CommentEnvelope = assert_json(response, StatusCode::OK).await.unwrap();
        assert!(envelope.success);
    }

    let response = server
        .get(&format!("/api/comments/get?productId={product_id}"))
        .await
        .unwrap();
    let listing: CommentListEnvelope = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(
        listing.comments[0].reactions.get("heart").map(Vec::len),
        Some(3)
    );
}

#[tokio::test]
async fn test_unknown_reaction_kind_rejected() {
    let server = TestServer::start().await.unwrap();
    let token = session_token("user-unknown", Some("Unk"), None).unwrap();
    let product_id = format!("prod-{}", unique_suffix());

    let body = AddCommentBody::new(&product_id, "no fire here");
    let response = server
        .post_auth("/api/comments/add", &token, &body)
        .await
        .unwrap();
    let envelope: CommentEnvelope = assert_json(response, StatusCode::OK).await.unwrap();

    let react = ReactBody::new(&envelope.comment.id, "fire");
    let response = server
        .post_auth("/api/comments/react", &token, &react)
        .await
        .unwrap();
    let failure: FailureBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(!failure.success);
}

#[tokio::test]
async fn test_react_to_missing_comment_fails() {
    let server = TestServer::start().await.unwrap();
    let token = session_token("user-ghost", None, None).unwrap();

    let react = ReactBody::new("999999999", "heart");
    let response = server
        .post_auth("/api/comments/react", &token, &react)
        .await
        .unwrap();
    let failure: FailureBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(!failure.success);
}

#[tokio::test]
async fn test_only_author_can_delete() {
    let server = TestServer::start().await.unwrap();
    let author = session_token("user-owner", Some("Owner"), None).unwrap();
    let stranger = session_token("user-stranger", Some("Stranger"), None).unwrap();
    let product_id = format!("prod-{}", unique_suffix());

    let body = AddCommentBody::new(&product_id, "mine to delete");
    let response = server
        .post_auth("/api/comments/add", &author, &body)
        .await
        .unwrap();
    let envelope: CommentEnvelope = assert_json(response, StatusCode::OK).await.unwrap();
    let comment_id = envelope.comment.id;

    // A non-author cannot delete, even with a valid session
    let response = server
        .delete_auth(
            &format!("/api/comments/delete?commentId={comment_id}"),
            &stranger,
        )
        .await
        .unwrap();
    let failure: FailureBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(!failure.success);

    // The comment is still there
    let response = server
        .get(&format!("/api/comments/get?productId={product_id}"))
        .await
        .unwrap();
    let listing: CommentListEnvelope = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(listing.comments.len(), 1);

    // The author can
    let response = server
        .delete_auth(
            &format!("/api/comments/delete?commentId={comment_id}"),
            &author,
        )
        .await
        .unwrap();
    let status: StatusBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(status.success);

    let response = server
        .get(&format!("/api/comments/get?productId={product_id}"))
        .await
        .unwrap();
    let listing: CommentListEnvelope = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(listing.comments.is_empty());
}

#[tokio::test]
async fn test_full_comment_lifecycle() {
    let server = TestServer::start().await.unwrap();
    let alice = session_token("lifecycle-alice", Some("Alice"), None).unwrap();
    let bob = session_token("lifecycle-bob", Some("Bob"), None).unwrap();
    let product_id = format!("prod-{}", unique_suffix());

    // Alice posts
    let body = AddCommentBody::new(&product_id, "would buy again");
    let response = server
        .post_auth("/api/comments/add", &alice, &body)
        .await
        .unwrap();
    let envelope: CommentEnvelope = assert_json(response, StatusCode::OK).await.unwrap();
    let comment_id = envelope.comment.id;

    // Bob reacts twice with different kinds
    for kind in ["heart", "ok"] {
        let react = ReactBody::new(&comment_id, kind);
        let response = server
            .post_auth("/api/comments/react", &bob, &react)
            .await
            .unwrap();
        let envelope: CommentEnvelope = assert_json(response, StatusCode::OK).await.unwrap();
        assert!(envelope.success);
    }

    // Alice reacts to her own comment too
    let react = ReactBody::new(&comment_id, "heart");
    let response = server
        .post_auth("/api/comments/react", &alice, &react)
        .await
        .unwrap();
    let envelope: CommentEnvelope = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(
        envelope.comment.reactions.get("heart").map(Vec::len),
        Some(2)
    );

    // Anyone can read the final state without a token
    let response = server
        .get(&format!("/api/comments/get?productId={product_id}"))
        .await
        .unwrap();
    let listing: CommentListEnvelope = assert_json(response, StatusCode::OK).await.unwrap();
    let comment = &listing.comments[0];
    assert_eq!(comment.author_name, "Alice");
    assert_eq!(comment.reactions.get("heart").map(Vec::len), Some(2));
    assert_eq!(comment.reactions.get("ok").map(Vec::len), Some(1));

    // Alice cleans up
    let response = server
        .delete_auth(
            &format!("/api/comments/delete?commentId={comment_id}"),
            &alice,
        )
        .await
        .unwrap();
    let status: StatusBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(status.success);
}
