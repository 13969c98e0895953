use std::sync::Arc;

use cjk_auth::{AuthClient, HttpResponse, Method, MemoryTokenStore, TokenStore};
use cjk_content::{ActivityFilter, BlogFilter, ContentApi, ContentDraft, NewGalleryItem, NewsFilter};
use cjk_core::errors::RequestError;
use cjk_core::models::{ContentKind, CredentialPair, MediaKind};
use serde_json::{json, Value};
use test_fixtures::{
    fixture_text, mint_access_token, test_config, token_response, ManualClock, ScriptedTransport,
};

const NOW: i64 = 1_700_000_000;

type Client = AuthClient<Arc<ScriptedTransport>, Arc<MemoryTokenStore>, Arc<ManualClock>>;

fn client(signed_in: bool) -> (Client, Arc<ScriptedTransport>, Arc<MemoryTokenStore>) {
    let transport = Arc::new(ScriptedTransport::new());
    let store = Arc::new(MemoryTokenStore::new());
    if signed_in {
        store
            .save(&CredentialPair::new(mint_access_token(NOW + 300), "r1"))
            .unwrap();
    }
    let client = AuthClient::with_clock(
        Arc::clone(&transport),
        Arc::clone(&store),
        Arc::new(ManualClock::new(NOW)),
        &test_config(),
    );
    (client, transport, store)
}

fn sent_body(transport: &ScriptedTransport) -> Value {
    serde_json::from_str(transport.last_request().unwrap().body.as_deref().unwrap()).unwrap()
}

// ─── Reads ─────────────────────────────────────────────────

#[tokio::test]
async fn test_blog_posts_bare_array_with_filter() {
    let (client, transport, _) = client(false);
    transport.on(Method::Get, "/api/blog/posts/", 200, fixture_text("content/blog_posts.json"));
    let api = ContentApi::new(&client);

    let posts = api
        .blog_posts(&BlogFilter {
            category: Some("2".into()),
            is_published: Some(true),
        })
        .await
        .unwrap();

    assert_eq!(posts.len(), 2);
    assert_eq!(posts[0].likes_count, Some(12));
    assert_eq!(
        transport.last_request().unwrap().url,
        "http://portal.test/api/blog/posts/?category=2&is_published=true"
    );
}

#[tokio::test]
async fn test_news_paginated_envelope_is_flattened() {
    let (client, transport, _) = client(false);
    transport.on(Method::Get, "/api/news/", 200, fixture_text("content/news_paginated.json"));

    let news = ContentApi::new(&client).news(&NewsFilter::default()).await.unwrap();

    assert_eq!(news.iter().map(|n| n.id).collect::<Vec<_>>(), vec![11, 12]);
    assert_eq!(transport.last_request().unwrap().url, "http://portal.test/api/news/");
}

#[tokio::test]
async fn test_list_read_soft_fails_on_bad_body() {
    let (client, transport, _) = client(false);
    transport.on(Method::Get, "/api/activities/", 200, "");
    transport.on(Method::Get, "/api/blog/categories/", 200, "<!doctype html>");
    let api = ContentApi::new(&client);

    assert!(api.activities(&ActivityFilter::default()).await.unwrap().is_empty());
    assert!(api.blog_categories().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_list_read_propagates_server_errors() {
    let (client, transport, _) = client(false);
    transport.on(Method::Get, "/api/news/", 502, "bad gateway");

    let err = ContentApi::new(&client)
        .news(&NewsFilter::default())
        .await
        .unwrap_err();
    assert_eq!(err.status(), Some(502));
}

#[tokio::test]
async fn test_activity_filter_and_detail() {
    let (client, transport, _) = client(false);
    transport.on(Method::Get, "/api/activities/", 200, fixture_text("content/activities.json"));
    transport.on_json(
        Method::Get,
        "/api/activities/22/",
        200,
        json!({"id": 22, "title": "Atelier d'écriture"}),
    );
    let api = ContentApi::new(&client);

    let items = api
        .activities(&ActivityFilter {
            activity_type: Some("sport".into()),
            is_published: None,
        })
        .await
        .unwrap();
    assert_eq!(items.len(), 3);
    assert!(transport.last_request().unwrap().url.ends_with("?activity_type=sport"));

    let detail = api.activity(22).await.unwrap();
    assert_eq!(detail.activity_type, "autre", "missing type defaults");
}

#[tokio::test]
async fn test_missing_detail_is_status_error() {
    let (client, transport, _) = client(false);
    transport.on(Method::Get, "/api/blog/posts/99/", 404, r#"{"detail":"Not found."}"#);

    let err = ContentApi::new(&client).blog_post(99).await.unwrap_err();
    assert!(matches!(err, RequestError::Status { status: 404, .. }));
}

// ─── Staff editing ─────────────────────────────────────────

#[tokio::test]
async fn test_create_blog_post_sends_slug_and_bearer() {
    let (client, transport, store) = client(true);
    transport.on_json(
        Method::Post,
        "/api/blog/posts/",
        201,
        json!({"id": 5, "title": "Fête de quartier", "slug": "f-te-de-quartier"}),
    );

    let post = ContentApi::new(&client)
        .create_blog_post(&ContentDraft {
            title: "Fête de quartier".into(),
            text: "Rendez-vous samedi.".into(),
            category: Some(1),
            ..ContentDraft::default()
        })
        .await
        .unwrap();

    assert_eq!(post.id, 5);
    assert_eq!(
        sent_body(&transport),
        json!({
            "title": "Fête de quartier",
            "slug": "f-te-de-quartier",
            "content": "Rendez-vous samedi.",
            "category": 1
        })
    );
    assert_eq!(
        transport.last_request().unwrap().bearer(),
        Some(store.get().unwrap().access.as_str())
    );
}

#[tokio::test]
async fn test_update_news_is_partial_without_slug() {
    let (client, transport, _) = client(true);
    transport.on_json(Method::Patch, "/api/news/11/", 200, json!({"id": 11, "title": "AG"}));

    ContentApi::new(&client)
        .update_news(
            11,
            &ContentDraft {
                title: "AG".into(),
                text: "Reportée".into(),
                ..ContentDraft::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(sent_body(&transport), json!({"title": "AG", "content": "Reportée"}));
}

#[tokio::test]
async fn test_set_published_patches_flag() {
    let (client, transport, _) = client(true);
    transport.on(Method::Patch, "/api/activities/21/", 200, r#"{"id":21,"title":"x","is_published":false}"#);

    ContentApi::new(&client)
        .set_published(ContentKind::Activity, 21, false)
        .await
        .unwrap();

    assert_eq!(sent_body(&transport), json!({"is_published": false}));
}

#[tokio::test]
async fn test_delete_accepts_no_content() {
    let (client, transport, _) = client(true);
    transport.on(Method::Delete, "/api/news/12/", 204, "");

    ContentApi::new(&client).delete_news(12).await.unwrap();
    assert_eq!(transport.count(Method::Delete, "/api/news/12/"), 1);
}

#[tokio::test]
async fn test_non_staff_edit_is_forbidden_not_unauthorized() {
    let (client, transport, _) = client(true);
    transport.on(Method::Delete, "/api/news/12/", 403, r#"{"detail":"forbidden"}"#);

    let err = ContentApi::new(&client)
        .delete(ContentKind::News, 12)
        .await
        .unwrap_err();
    assert!(!err.is_unauthorized());
    assert_eq!(err.status(), Some(403));
}

#[tokio::test]
async fn test_expired_session_during_edit_refreshes_once() {
    let (client, transport, _) = client(true);
    let a2 = mint_access_token(NOW + 900);
    let expected = a2.clone();
    transport.route(Method::Patch, "/api/blog/posts/3/", move |req| {
        let status = if req.bearer() == Some(expected.as_str()) { 200 } else { 401 };
        Ok(HttpResponse::new(status, r#"{"id":3,"title":"t","is_published":true}"#))
    });
    transport.on(Method::Post, "/api/auth/token/refresh/", 200, token_response(&a2, None));

    ContentApi::new(&client)
        .set_published(ContentKind::BlogPost, 3, true)
        .await
        .unwrap();

    assert_eq!(transport.count(Method::Patch, "/api/blog/posts/3/"), 2);
    assert_eq!(transport.count(Method::Post, "/api/auth/token/refresh/"), 1);
}

// ─── Gallery ───────────────────────────────────────────────

#[tokio::test]
async fn test_gallery_items_keep_both_id_shapes() {
    let (client, transport, _) = client(false);
    transport.on(Method::Get, "/api/social/gallery/", 200, fixture_text("content/gallery.json"));

    let items = ContentApi::new(&client).gallery().await.unwrap();

    assert_eq!(items[0].key(), "65f1c0a1e4b0a1b2c3d4e5f6");
    assert_eq!(items[1].key(), "clip-2");
    assert_eq!(items[1].kind, MediaKind::Video);
}

#[tokio::test]
async fn test_gallery_reorder_posts_positions() {
    let (client, transport, _) = client(true);
    transport.on(Method::Post, "/api/social/gallery/reorder/", 200, r#"{"message":"ok"}"#);

    ContentApi::new(&client)
        .reorder_gallery(&["b", "a", "c"])
        .await
        .unwrap();

    assert_eq!(
        sent_body(&transport),
        json!({"items": [
            {"id": "b", "order": 0},
            {"id": "a", "order": 1},
            {"id": "c", "order": 2}
        ]})
    );
}

#[tokio::test]
async fn test_gallery_create_update_delete() {
    let (client, transport, _) = client(true);
    transport.on_json(
        Method::Post,
        "/api/social/gallery/",
        201,
        json!({"_id": "n1", "type": "photo", "url": "https://cdn/x.jpg", "order": 3}),
    );
    transport.on_json(
        Method::Patch,
        "/api/social/gallery/n1/",
        200,
        json!({"_id": "n1", "type": "photo", "url": "https://cdn/x.jpg", "title": "Fête", "order": 3}),
    );
    transport.on(Method::Delete, "/api/social/gallery/n1/", 200, r#"{"message":"Supprimé"}"#);
    let api = ContentApi::new(&client);

    let created = api
        .create_gallery_item(&NewGalleryItem {
            kind: MediaKind::Photo,
            url: "https://cdn/x.jpg".into(),
            thumbnail: None,
            title: String::new(),
            category: "vie".into(),
            height: None,
        })
        .await
        .unwrap();
    assert_eq!(created.order, 3);
    assert_eq!(
        sent_body(&transport),
        json!({"type": "photo", "url": "https://cdn/x.jpg", "title": "", "category": "vie"})
    );

    let updated = api
        .update_gallery_item(created.key(), json!({"title": "Fête"}))
        .await
        .unwrap();
    assert_eq!(updated.title, "Fête");

    api.delete_gallery_item("n1").await.unwrap();
}
