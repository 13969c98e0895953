use serde::Deserialize;

/// A list endpoint answers either with a bare array or with a paginated
/// envelope. [`ListResponse::into_vec`] is the only place the two shapes are
/// reconciled.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ListResponse<T> {
    Bare(Vec<T>),
    Paginated {
        #[serde(default)]
        count: Option<u64>,
        #[serde(default)]
        next: Option<String>,
        #[serde(default)]
        previous: Option<String>,
        results: Vec<T>,
    },
}

impl<T> ListResponse<T> {
    pub fn into_vec(self) -> Vec<T> {
        match self {
            Self::Bare(items) => items,
            Self::Paginated { results, .. } => results,
        }
    }

    /// URL of the next page, when the server paginates.
    pub fn next_page(&self) -> Option<&str> {
        match self {
            Self::Bare(_) => None,
            Self::Paginated { next, .. } => next.as_deref(),
        }
    }
}

impl<T> Default for ListResponse<T> {
    fn default() -> Self {
        Self::Bare(Vec::new())
    }
}
