use std::sync::Arc;

use cjk_auth::{AuthClient, Method, MemoryTokenStore};
use cjk_content::ContentApi;
use cjk_core::errors::{AuthError, RequestError};
use cjk_core::models::{ContentTarget, CredentialPair};
use serde_json::{json, Value};
use test_fixtures::{
    fixture_text, member_json, mint_access_token, test_config, ManualClock, ScriptedTransport,
};

const NOW: i64 = 1_700_000_000;
const COMMENTS: &str = "/api/social/comments/";
const LIKES: &str = "/api/social/likes/toggle/";

type Client = AuthClient<Arc<ScriptedTransport>, Arc<MemoryTokenStore>, Arc<ManualClock>>;

fn client(signed_in: bool) -> (Client, Arc<ScriptedTransport>) {
    let transport = Arc::new(ScriptedTransport::new());
    let store = Arc::new(if signed_in {
        MemoryTokenStore::with_pair(CredentialPair::new(mint_access_token(NOW + 300), "r1"))
    } else {
        MemoryTokenStore::new()
    });
    let client = AuthClient::with_clock(
        Arc::clone(&transport),
        store,
        Arc::new(ManualClock::new(NOW)),
        &test_config(),
    );
    (client, transport)
}

fn post_target() -> ContentTarget {
    ContentTarget::TypeId {
        content_type: 14,
        object_id: 3,
    }
}

fn sent_body(transport: &ScriptedTransport, method: Method, path: &str) -> Value {
    let request = transport.requests_to(method, path).pop().unwrap();
    serde_json::from_str(request.body.as_deref().unwrap()).unwrap()
}

// ─── Likes ─────────────────────────────────────────────────

#[tokio::test]
async fn test_toggle_like_by_type_id() {
    let (client, transport) = client(true);
    transport.on_json(Method::Post, LIKES, 200, json!({"liked": true, "likes_count": 13}));

    let answer = ContentApi::new(&client).toggle_like(&post_target()).await.unwrap();

    assert_eq!(answer.liked, Some(true));
    assert_eq!(answer.total(), Some(13));
    assert_eq!(
        sent_body(&transport, Method::Post, LIKES),
        json!({"content_type": 14, "object_id": 3})
    );
}

#[tokio::test]
async fn test_toggle_like_by_type_label_reads_either_count() {
    let (client, transport) = client(true);
    transport.on_json(Method::Post, LIKES, 200, json!({"liked": false, "count": 4}));
    let target = ContentTarget::TypeLabel {
        content_type: "activity".into(),
        object_id: 21,
    };

    let answer = ContentApi::new(&client).toggle_like(&target).await.unwrap();

    assert_eq!(answer.total(), Some(4));
    assert_eq!(
        sent_body(&transport, Method::Post, LIKES),
        json!({"content_type_str": "activity", "object_id": 21})
    );
}

#[tokio::test]
async fn test_anonymous_like_is_unauthorized_without_refresh() {
    let (client, transport) = client(false);
    transport.on(Method::Post, LIKES, 401, r#"{"detail":"Authentication credentials were not provided."}"#);

    let err = ContentApi::new(&client).toggle_like(&post_target()).await.unwrap_err();

    assert!(err.is_unauthorized());
    assert_eq!(transport.total(), 1);
}

// ─── Comments ──────────────────────────────────────────────

#[tokio::test]
async fn test_comments_are_filtered_by_target() {
    let (client, transport) = client(false);
    transport.on(Method::Get, COMMENTS, 200, fixture_text("social/comments_paginated.json"));

    let comments = ContentApi::new(&client).comments(&post_target()).await.unwrap();

    assert_eq!(comments.len(), 1);
    assert_eq!(comments[0].author_name.as_deref(), Some("Awa Diallo"));
    assert_eq!(
        transport.last_request().unwrap().url,
        "http://portal.test/api/social/comments/?content_type=14&object_id=3"
    );
}

#[tokio::test]
async fn test_comments_without_content_are_empty() {
    let (client, transport) = client(false);
    transport.on(Method::Get, COMMENTS, 204, "");

    let comments = ContentApi::new(&client).comments(&post_target()).await.unwrap();
    assert!(comments.is_empty());
}

#[tokio::test]
async fn test_comments_do_not_mask_unreadable_bodies() {
    let (client, transport) = client(false);
    transport.on(Method::Get, COMMENTS, 200, "<html>maintenance</html>");

    let err = ContentApi::new(&client).comments(&post_target()).await.unwrap_err();
    assert!(matches!(err, RequestError::Parse { .. }));
}

#[tokio::test]
async fn test_create_comment_resolves_author_from_profile() {
    let (client, transport) = client(true);
    transport.on_json(Method::Get, "/api/members/me/", 200, member_json(false, false));
    transport.on_json(
        Method::Post,
        COMMENTS,
        201,
        json!({"id": 900, "object_id": 3, "text": "Merci !", "author": 42}),
    );

    let comment = ContentApi::new(&client)
        .create_comment(&post_target(), "Merci !", None)
        .await
        .unwrap();

    assert_eq!(comment.id, 900);
    assert_eq!(
        sent_body(&transport, Method::Post, COMMENTS),
        json!({"content_type": 14, "object_id": 3, "text": "Merci !", "user": 42})
    );
}

#[tokio::test]
async fn test_create_comment_with_explicit_author_skips_profile() {
    let (client, transport) = client(true);
    transport.on_json(Method::Post, COMMENTS, 201, json!({"id": 901, "text": "ok"}));

    ContentApi::new(&client)
        .create_comment(&post_target(), "ok", Some(7))
        .await
        .unwrap();

    assert_eq!(transport.count(Method::Get, "/api/members/me/"), 0);
    assert_eq!(sent_body(&transport, Method::Post, COMMENTS)["user"], json!(7));
}

#[tokio::test]
async fn test_create_comment_signed_out_sends_nothing() {
    let (client, transport) = client(false);

    let err = ContentApi::new(&client)
        .create_comment(&post_target(), "hello", None)
        .await
        .unwrap_err();

    assert!(matches!(err, AuthError::MissingCredentials));
    assert_eq!(transport.total(), 0);
}

#[tokio::test]
async fn test_update_and_delete_comment() {
    let (client, transport) = client(true);
    transport.on_json(
        Method::Put,
        "/api/social/comments/501/",
        200,
        json!({"id": 501, "text": "Bravo à tous !"}),
    );
    transport.on(Method::Delete, "/api/social/comments/501/", 204, "");
    let api = ContentApi::new(&client);

    let updated = api.update_comment(501, "Bravo à tous !").await.unwrap();
    assert_eq!(updated.text, "Bravo à tous !");
    assert_eq!(
        sent_body(&transport, Method::Put, "/api/social/comments/501/"),
        json!({"text": "Bravo à tous !"})
    );

    api.delete_comment(501).await.unwrap();
    assert_eq!(transport.count(Method::Delete, "/api/social/comments/501/"), 1);
}
