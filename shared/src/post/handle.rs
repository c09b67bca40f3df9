use serde::{Deserialize, Serialize};

/// Body of `POST /posts`.
///
/// The store stamps timestamps, zeroes views, empties applicants and
/// opens the post.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct PostDescriptor {
    pub title: String,
    #[serde(alias = "content")]
    pub description: String,
    #[serde(rename = "type")]
    pub kind: super::PostType,
    #[serde(flatten)]
    pub details: super::MoveDetails,
}

/// Body of `PATCH /posts/:id`. Unset fields are kept.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct PostPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, alias = "content", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<super::PostType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<super::PostStatus>,
    #[serde(flatten)]
    pub details: super::MoveDetails,
}

/// Field a post listing may be sorted by.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum SortKey {
    CreatedAt,
    UpdatedAt,
    Views,
    Price,
    MoveDate,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

/// Query of `GET /posts`.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PostQuery {
    #[serde(default, rename = "_sort", skip_serializing_if = "Option::is_none")]
    pub sort: Option<SortKey>,
    #[serde(default, rename = "_order", skip_serializing_if = "Option::is_none")]
    pub order: Option<SortOrder>,
    /// 1-based page number.
    #[serde(default, rename = "_page", skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(default, rename = "_limit", skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<super::PostType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<super::PostStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from_building: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to_building: Option<String>,
    /// Full-text query over the searchable fields.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub q: Option<String>,
}

impl PostQuery {
    /// Page size used when a page is requested without a limit.
    pub const DEFAULT_LIMIT: u32 = 10;

    /// Indicates whether `post` passes every filter of this query.
    /// Sorting and paging are not considered.
    pub fn matches(&self, post: &super::Post) -> bool {
        self.kind.map_or(true, |kind| post.kind == kind)
            && self.status.map_or(true, |status| post.status == status)
            && self.from_building.as_ref().map_or(true, |b| {
                post.details.from_building.as_ref() == Some(b)
            })
            && self
                .to_building
                .as_ref()
                .map_or(true, |b| post.details.to_building.as_ref() == Some(b))
            && self.q.as_ref().map_or(true, |q| post.contains_text(q))
    }
}
