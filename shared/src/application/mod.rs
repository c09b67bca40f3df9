pub mod handle;

use serde::{Deserialize, Serialize};

/// The record of one user's application to a post.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    pub id: u64,
    pub post_id: u64,
    pub applicant_id: u64,
    pub message: String,
    pub status: ApplicationStatus,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum ApplicationStatus {
    #[default]
    Pending,
    /// Accepting an application matches its post.
    Accepted,
    /// Rejecting an application removes the applicant from its post.
    Rejected,
}
