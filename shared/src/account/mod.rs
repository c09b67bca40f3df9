pub mod handle;

use serde::{Deserialize, Serialize};

/// A registered user, as returned by the store.
///
/// The password never leaves the store once registered.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// The only id of this user.
    pub id: u64,
    pub name: String,
    pub email: String,
    /// Phone number in `010-0000-0000` form.
    pub phone: String,
    pub gender: String,
    /// The dormitory building this user currently lives in.
    pub dormitory: String,
    /// Eight-digit student number.
    pub student_id: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}
