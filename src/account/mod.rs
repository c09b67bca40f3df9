pub mod handle;

use chrono::Utc;
use rand::Rng;
use serde::{Deserialize, Serialize};
use sha256::digest;

use dorm_move_shared::{
    account::{
        handle::{RegisterDescriptor, UserUpdate},
        User,
    },
    validate,
};

use crate::{db::Db, Error};

/// A stored user with its salted password digest.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    #[serde(flatten)]
    pub user: User,
    /// Hex-encoded random salt.
    salt: String,
    /// SHA-256 of the salt followed by the password.
    password_sha: String,
}

impl UserRecord {
    fn new(user: User, password: &str) -> Self {
        let salt = new_salt();
        Self {
            password_sha: hash_password(&salt, password),
            salt,
            user,
        }
    }

    /// Indicates whether `password` is this user's password.
    pub fn password_matches(&self, password: &str) -> bool {
        hash_password(&self.salt, password) == self.password_sha
    }

    fn set_password(&mut self, password: &str) {
        self.salt = new_salt();
        self.password_sha = hash_password(&self.salt, password);
    }
}

fn new_salt() -> String {
    rand::thread_rng()
        .gen::<[u8; 16]>()
        .iter()
        .map(|b| format!("{b:02x}"))
        .collect()
}

fn hash_password(salt: &str, password: &str) -> String {
    digest(format!("{salt}{password}"))
}

/// Stores a new user.
///
/// # Errors
///
/// - Errors if the form is invalid.
/// - Errors if the email is already registered.
pub fn register(db: &mut Db, descriptor: RegisterDescriptor) -> Result<User, Error> {
    let errors = validate::registration(&descriptor);
    if !errors.is_empty() {
        return Err(Error::validation(&errors));
    }

    if db
        .users
        .iter()
        .any(|u| u.user.email.eq_ignore_ascii_case(&descriptor.email))
    {
        return Err(Error::EmailTaken);
    }

    let user = User {
        id: db.next_user_id(),
        name: descriptor.name,
        email: descriptor.email,
        phone: descriptor.phone,
        gender: descriptor.gender,
        dormitory: descriptor.dormitory,
        student_id: descriptor.student_id,
        created_at: Utc::now(),
    };

    db.users
        .push(UserRecord::new(user.clone(), &descriptor.password));
    Ok(user)
}

/// Finds the user with this email and password.
///
/// # Errors
///
/// - Errors with [`Error::InvalidCredentials`] if the email is unknown or
///   the password is wrong, without telling which.
pub fn login(db: &Db, email: &str, password: &str) -> Result<User, Error> {
    db.users
        .iter()
        .find(|u| u.user.email.eq_ignore_ascii_case(email))
        .filter(|u| u.password_matches(password))
        .map(|u| u.user.clone())
        .ok_or(Error::InvalidCredentials)
}

/// Replaces the profile of a user, and its password if a new one is given.
pub fn update(db: &mut Db, id: u64, update: UserUpdate) -> Result<User, Error> {
    let errors = validate::profile(&update);
    if !errors.is_empty() {
        return Err(Error::validation(&errors));
    }

    if db
        .users
        .iter()
        .any(|u| u.user.id != id && u.user.email.eq_ignore_ascii_case(&update.email))
    {
        return Err(Error::EmailTaken);
    }

    let record = db.user_mut(id)?;
    let user = &mut record.user;
    user.name = update.name;
    user.email = update.email;
    user.phone = update.phone;
    user.gender = update.gender;
    user.dormitory = update.dormitory;
    user.student_id = update.student_id;

    if let Some(password) = update.password {
        record.set_password(&password);
    }

    Ok(record.user.clone())
}
