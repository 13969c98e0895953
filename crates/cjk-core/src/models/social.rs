use serde::{Deserialize, Serialize};

/// The object a like or comment is attached to. The API accepts either the
/// numeric content type id or its string label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentTarget {
    TypeId { content_type: i64, object_id: i64 },
    TypeLabel { content_type: String, object_id: i64 },
}

impl ContentTarget {
    pub fn object_id(&self) -> i64 {
        match self {
            Self::TypeId { object_id, .. } | Self::TypeLabel { object_id, .. } => *object_id,
        }
    }

    /// Query parameters identifying the target.
    pub fn query(&self) -> Vec<(String, String)> {
        match self {
            Self::TypeId {
                content_type,
                object_id,
            } => vec![
                ("content_type".to_string(), content_type.to_string()),
                ("object_id".to_string(), object_id.to_string()),
            ],
            Self::TypeLabel {
                content_type,
                object_id,
            } => vec![
                ("content_type_str".to_string(), content_type.clone()),
                ("object_id".to_string(), object_id.to_string()),
            ],
        }
    }

    /// JSON body fields identifying the target.
    pub fn body(&self) -> serde_json::Map<String, serde_json::Value> {
        let mut map = serde_json::Map::new();
        match self {
            Self::TypeId {
                content_type,
                object_id,
            } => {
                map.insert("content_type".into(), (*content_type).into());
                map.insert("object_id".into(), (*object_id).into());
            }
            Self::TypeLabel {
                content_type,
                object_id,
            } => {
                map.insert("content_type_str".into(), content_type.clone().into());
                map.insert("object_id".into(), (*object_id).into());
            }
        }
        map
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SocialComment {
    pub id: i64,
    #[serde(default)]
    pub content_type: Option<serde_json::Value>,
    #[serde(default)]
    pub object_id: Option<i64>,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub author: Option<i64>,
    #[serde(default)]
    pub author_name: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

/// Answer of the like toggle. Servers report the count under either name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LikeResponse {
    #[serde(default)]
    pub liked: Option<bool>,
    #[serde(default)]
    pub likes_count: Option<u64>,
    #[serde(default)]
    pub count: Option<u64>,
}

impl LikeResponse {
    pub fn total(&self) -> Option<u64> {
        self.likes_count.or(self.count)
    }
}
