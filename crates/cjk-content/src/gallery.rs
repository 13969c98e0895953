//! Media gallery: listing, staff editing and ordering.

use cjk_auth::{Clock, HttpTransport, RequestInit, TokenStore};
use cjk_core::errors::RequestError;
use cjk_core::models::{GalleryItem, MediaKind};
use serde::Serialize;
use serde_json::{json, Value};

use crate::api::ContentApi;

const GALLERY: &str = "/api/social/gallery/";
const GALLERY_REORDER: &str = "/api/social/gallery/reorder/";

fn item_path(key: &str) -> String {
    format!("{GALLERY}{key}/")
}

/// Payload for a new gallery entry. The server assigns the order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewGalleryItem {
    #[serde(rename = "type")]
    pub kind: MediaKind,
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
    pub title: String,
    pub category: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<String>,
}

impl<T, S, C> ContentApi<'_, T, S, C>
where
    T: HttpTransport,
    S: TokenStore,
    C: Clock,
{
    /// Gallery entries in server order.
    pub async fn gallery(&self) -> Result<Vec<GalleryItem>, RequestError> {
        self.list(GALLERY, RequestInit::get()).await
    }

    pub async fn create_gallery_item(
        &self,
        item: &NewGalleryItem,
    ) -> Result<GalleryItem, RequestError> {
        self.client
            .request(GALLERY, RequestInit::post().json_body(item)?)
            .await
    }

    /// Partial update with whatever fields `changes` holds.
    pub async fn update_gallery_item(
        &self,
        key: &str,
        changes: Value,
    ) -> Result<GalleryItem, RequestError> {
        self.client
            .request(&item_path(key), RequestInit::patch().json(changes))
            .await
    }

    pub async fn delete_gallery_item(&self, key: &str) -> Result<(), RequestError> {
        self.client
            .execute(&item_path(key), RequestInit::delete())
            .await
            .map(drop)
    }

    /// Persist a new order: each key gets its position in `keys`.
    pub async fn reorder_gallery<K: AsRef<str>>(&self, keys: &[K]) -> Result<(), RequestError> {
        let items: Vec<Value> = keys
            .iter()
            .enumerate()
            .map(|(order, key)| json!({ "id": key.as_ref(), "order": order }))
            .collect();
        self.client
            .execute(GALLERY_REORDER, RequestInit::post().json(json!({ "items": items })))
            .await?;
        tracing::info!(count = keys.len(), "gallery reordered");
        Ok(())
    }
}
