use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlogCategory {
    pub id: i64,
    pub name: String,
    pub slug: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlogPost {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub author: Option<i64>,
    #[serde(default)]
    pub author_name: Option<String>,
    #[serde(default)]
    pub category: Option<i64>,
    #[serde(default)]
    pub category_name: Option<String>,
    #[serde(default)]
    pub content_type: Option<String>,
    #[serde(default)]
    pub content_type_id: Option<i64>,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub is_published: bool,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
    #[serde(default)]
    pub likes_count: Option<u64>,
    #[serde(default)]
    pub comments_count: Option<u64>,
    #[serde(default)]
    pub is_liked: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewsItem {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub author: Option<i64>,
    #[serde(default)]
    pub author_name: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub is_published: bool,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Activity {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// `sport`, `culture`, `formation`, `paix`, `autre`, or a server-side
    /// addition.
    #[serde(default = "default_activity_type")]
    pub activity_type: String,
    #[serde(default)]
    pub author: Option<i64>,
    #[serde(default)]
    pub author_name: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub date_activite: Option<String>,
    #[serde(default)]
    pub is_published: bool,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

fn default_activity_type() -> String {
    "autre".to_string()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MediaKind {
    Photo,
    Video,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GalleryItem {
    #[serde(default, rename = "_id")]
    pub object_key: Option<String>,
    #[serde(default)]
    pub id: Option<String>,
    #[serde(rename = "type")]
    pub kind: MediaKind,
    pub url: String,
    #[serde(default)]
    pub thumbnail: Option<String>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub height: Option<String>,
    #[serde(default)]
    pub order: i64,
}

impl GalleryItem {
    /// The gallery API exposes either `_id` or `id`; `_id` wins.
    pub fn key(&self) -> &str {
        self.object_key
            .as_deref()
            .or(self.id.as_deref())
            .unwrap_or_default()
    }
}

/// Content kinds staff members can author and publish.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentKind {
    BlogPost,
    News,
    Activity,
}

impl ContentKind {
    /// Collection endpoint, with trailing slash.
    pub fn collection_path(self) -> &'static str {
        match self {
            Self::BlogPost => "/api/blog/posts/",
            Self::News => "/api/news/",
            Self::Activity => "/api/activities/",
        }
    }

    pub fn item_path(self, id: i64) -> String {
        format!("{}{id}/", self.collection_path())
    }
}
