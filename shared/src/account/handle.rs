use serde::{Deserialize, Serialize};

/// Body of `POST /users`.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct RegisterDescriptor {
    pub name: String,
    pub email: String,
    pub password: String,
    pub phone: String,
    pub gender: String,
    pub dormitory: String,
    pub student_id: String,
}

/// Body of `POST /auth/login`.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct LoginDescriptor {
    pub email: String,
    pub password: String,
}

/// Body of `PUT /users/:id`.
///
/// Replaces every profile field. The password is kept unless a new one
/// is given.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct UserUpdate {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub gender: String,
    pub dormitory: String,
    pub student_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

impl From<&super::User> for UserUpdate {
    fn from(user: &super::User) -> Self {
        Self {
            name: user.name.to_owned(),
            email: user.email.to_owned(),
            phone: user.phone.to_owned(),
            gender: user.gender.to_owned(),
            dormitory: user.dormitory.to_owned(),
            student_id: user.student_id.to_owned(),
            password: None,
        }
    }
}

/// Query of `GET /users`.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct UserQuery {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}
