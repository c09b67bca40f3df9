pub mod handle;

use serde::{Deserialize, Serialize};

/// Represents a help request or help offer posted on the board.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    /// The only id of this post.
    pub id: u64,
    pub title: String,
    #[serde(alias = "content")]
    pub description: String,
    #[serde(rename = "type")]
    pub kind: PostType,
    pub status: PostStatus,
    #[serde(flatten)]
    pub details: MoveDetails,
    /// Detail-page view count, only ever incremented by the store.
    pub views: u64,
    /// Ids of users who applied and were not rejected, in application order.
    pub applicants: Vec<u64>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl Post {
    /// Indicates whether any searchable field of this post contains
    /// `needle`, ignoring case.
    ///
    /// Searchable fields are the title, the description, the author name
    /// and both buildings.
    pub fn contains_text(&self, needle: &str) -> bool {
        let needle = needle.to_lowercase();
        [
            Some(self.title.as_str()),
            Some(self.description.as_str()),
            self.details.author_name.as_deref(),
            self.details.from_building.as_deref(),
            self.details.to_building.as_deref(),
        ]
        .into_iter()
        .flatten()
        .any(|field| field.to_lowercase().contains(&needle))
    }
}

/// Describes what a post asks for.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum PostType {
    /// The author needs help moving.
    HelpRequest,
    /// The author offers to help others move.
    HelpOffer,
}

/// Describes status of a post.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum PostStatus {
    /// Accepting applications.
    #[default]
    Open,
    /// An application was accepted.
    Matched,
    Completed,
}

/// Optional moving details of a post.
///
/// In a patch, `None` keeps the current value.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct MoveDetails {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author_gender: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author_phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from_building: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from_room: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to_building: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to_room: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub move_date: Option<chrono::NaiveDate>,
    /// Free-form time of day, such as `14:00`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub move_time: Option<String>,
    /// Offered or asked price in won.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<u32>,
}

impl MoveDetails {
    /// Overwrites every field that is set in `patch`.
    pub fn merge(&mut self, patch: MoveDetails) {
        macro_rules! merge_fields {
            ($($f:ident),* $(,)?) => {
                $(
                    if patch.$f.is_some() {
                        self.$f = patch.$f;
                    }
                )*
            };
        }

        merge_fields! {
            author_name,
            author_gender,
            author_phone,
            from_building,
            from_room,
            to_building,
            to_room,
            move_date,
            move_time,
            price,
        }
    }
}
