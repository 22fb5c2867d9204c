use serde::{Deserialize, Serialize};

/// Fixed page size used by the list screens
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Query parameters of a list request (`?page&limit&search`)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ListQuery {
    pub page: u32,
    pub limit: u32,
    #[serde(default)]
    pub search: String,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            page: 1,
            limit: DEFAULT_PAGE_SIZE,
            search: String::new(),
        }
    }
}

impl ListQuery {
    pub fn new(page: u32, limit: u32, search: impl Into<String>) -> Self {
        Self {
            page: page.max(1),
            limit,
            search: search.into(),
        }
    }

    pub fn to_pairs(&self) -> [(&'static str, String); 3] {
        [
            ("page", self.page.to_string()),
            ("limit", self.limit.to_string()),
            ("search", self.search.clone()),
        ]
    }
}
