//! Wire types shared by the dorm-move store and its client.
//!
//! Every type here is transported as a JSON object with camelCase
//! field names.

pub mod account;
pub mod application;
pub mod post;
pub mod validate;

use serde::{Deserialize, Serialize};

/// A dormitory building, used to populate filters.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Building {
    pub id: u64,
    pub name: String,
    /// Kind of the building, such as `male` or `female` dormitory.
    #[serde(rename = "type")]
    pub kind: String,
}

/// Aggregate counts shown on the board front page.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    pub total_posts: usize,
    pub total_users: usize,
    /// Open posts of type [`post::PostType::HelpRequest`].
    pub open_requests: usize,
    /// Open posts of type [`post::PostType::HelpOffer`].
    pub available_helpers: usize,
}

impl Stats {
    /// Reduces full post and user collections into counts.
    pub fn collect(posts: &[post::Post], total_users: usize) -> Self {
        let open_of = |kind: post::PostType| {
            posts
                .iter()
                .filter(|p| p.kind == kind && p.status == post::PostStatus::Open)
                .count()
        };

        Self {
            total_posts: posts.len(),
            total_users,
            open_requests: open_of(post::PostType::HelpRequest),
            available_helpers: open_of(post::PostType::HelpOffer),
        }
    }
}
