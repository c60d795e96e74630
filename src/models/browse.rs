//! Wire types for the browse hierarchy exposed by the bridge.

use serde::{Deserialize, Serialize};

/// A single catalog entry (an artist or an album).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub title: String,
    /// Key used to navigate into this item. Absent for plain entries.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_key: Option<String>,
    /// Key of the artwork attached to this item. Absent means no image
    /// exists upstream.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_key: Option<String>,
}

impl Item {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            item_key: None,
            image_key: None,
        }
    }

    pub fn with_keys(
        title: impl Into<String>,
        item_key: Option<String>,
        image_key: Option<String>,
    ) -> Self {
        Self {
            title: title.into(),
            item_key,
            image_key,
        }
    }
}

/// Action reported by a browse response. Anything but `List` means there is
/// nothing to load at this position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BrowseAction {
    List,
    #[serde(other)]
    Other,
}

/// Metadata of the list enclosing a page of items.
#[derive(Debug, Clone, Deserialize)]
pub struct BrowseList {
    /// Depth of this node in the hierarchy (0 = root).
    #[serde(default)]
    pub level: usize,
    #[serde(default)]
    pub title: String,
    /// Total number of items in the enclosing list.
    #[serde(default)]
    pub count: usize,
    /// Offset the remote UI is currently displaying. May be negative or
    /// absent; callers clamp to 0.
    #[serde(default)]
    pub display_offset: i64,
}

/// Response to a browse request.
#[derive(Debug, Clone, Deserialize)]
pub struct BrowseResponse {
    pub action: BrowseAction,
    #[serde(default)]
    pub list: Option<BrowseList>,
}

/// Response to a load request: one page of items.
#[derive(Debug, Clone, Deserialize)]
pub struct LoadResponse {
    #[serde(default)]
    pub offset: usize,
    pub list: BrowseList,
    #[serde(default)]
    pub items: Vec<Item>,
}

/// Options for a browse request.
#[derive(Debug, Clone, Default, Serialize)]
pub struct BrowseOpts {
    pub hierarchy: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item_key: Option<String>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub pop_all: bool,
}

impl BrowseOpts {
    /// Root options for a fresh traversal: pop the remote navigation stack
    /// back to the top of the browse hierarchy.
    pub fn root() -> Self {
        Self {
            hierarchy: "browse".to_string(),
            item_key: None,
            pop_all: true,
        }
    }

    /// Options for descending into a matched item.
    pub fn descend(item_key: String) -> Self {
        Self {
            hierarchy: "browse".to_string(),
            item_key: Some(item_key),
            pop_all: false,
        }
    }
}

/// Options for a load request.
#[derive(Debug, Clone, Serialize)]
pub struct LoadOpts {
    pub hierarchy: String,
    pub offset: usize,
    /// Kept equal to `offset` so the remote UI cursor follows the traversal.
    pub set_display_offset: usize,
}

impl LoadOpts {
    pub fn at_offset(offset: usize) -> Self {
        Self {
            hierarchy: "browse".to_string(),
            offset,
            set_display_offset: offset,
        }
    }
}

/// An ordered sequence of title segments identifying a location in the
/// browse hierarchy. An empty trailing segment marks "enumerate all leaves
/// here" rather than "navigate into a named child".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrowsePath(Vec<String>);

impl BrowsePath {
    pub fn new(segments: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self(segments.into_iter().map(Into::into).collect())
    }

    /// The navigation segment at `level`, or `None` when the segment is
    /// absent or empty (the leaf-list marker).
    pub fn segment(&self, level: usize) -> Option<&str> {
        self.0
            .get(level)
            .map(String::as_str)
            .filter(|s| !s.is_empty())
    }

    /// Whether a loaded list at `level` with `title` is consistent with this
    /// path. Level 0 and unset parent segments always match; otherwise the
    /// parent segment must equal the list title exactly.
    pub fn matches_level(&self, level: usize, title: &str) -> bool {
        if level == 0 {
            return true;
        }
        match self.segment(level - 1) {
            None => true,
            Some(expected) => expected == title,
        }
    }
}
