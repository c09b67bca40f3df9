//! Form checks. The client runs them before dispatching a request and
//! the store runs them again on receipt.

use std::fmt::Display;

use crate::{
    account::handle::{LoginDescriptor, RegisterDescriptor, UserUpdate},
    post::handle::PostDescriptor,
};

/// Why a field was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldErrorKind {
    /// The field is empty or only whitespace.
    Missing,
    /// The field does not have the expected format.
    Malformed,
    TooShort { min: usize },
    TooLong { max: usize },
}

/// A rejected form field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldError {
    /// Wire name of the field.
    pub field: &'static str,
    pub kind: FieldErrorKind,
}

impl Display for FieldError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.kind {
            FieldErrorKind::Missing => write!(f, "{} is required", self.field),
            FieldErrorKind::Malformed => write!(f, "{} is malformed", self.field),
            FieldErrorKind::TooShort { min } => {
                write!(f, "{} needs at least {min} characters", self.field)
            }
            FieldErrorKind::TooLong { max } => {
                write!(f, "{} allows at most {max} characters", self.field)
            }
        }
    }
}

pub const MIN_PASSWORD_LEN: usize = 6;
pub const MAX_TITLE_LEN: usize = 100;
pub const MIN_DESCRIPTION_LEN: usize = 10;

/// Checks a registration form, returning every rejected field.
pub fn registration(descriptor: &RegisterDescriptor) -> Vec<FieldError> {
    let mut errors = Vec::new();

    required(&mut errors, "name", &descriptor.name);
    email(&mut errors, &descriptor.email);
    password(&mut errors, &descriptor.password);
    contact(
        &mut errors,
        &descriptor.phone,
        &descriptor.gender,
        &descriptor.dormitory,
        &descriptor.student_id,
    );

    errors
}

/// Checks a login form before it is sent. Whether the credentials match
/// is only known to the store.
pub fn login(descriptor: &LoginDescriptor) -> Vec<FieldError> {
    let mut errors = Vec::new();

    email(&mut errors, &descriptor.email);
    password(&mut errors, &descriptor.password);

    errors
}

/// Checks a profile update. The password is only checked if a new one
/// is given.
pub fn profile(update: &UserUpdate) -> Vec<FieldError> {
    let mut errors = Vec::new();

    required(&mut errors, "name", &update.name);
    email(&mut errors, &update.email);
    if let Some(ref new_password) = update.password {
        password(&mut errors, new_password);
    }
    contact(
        &mut errors,
        &update.phone,
        &update.gender,
        &update.dormitory,
        &update.student_id,
    );

    errors
}

fn email(errors: &mut Vec<FieldError>, value: &str) {
    if required(errors, "email", value) && !is_email(value) {
        errors.push(FieldError {
            field: "email",
            kind: FieldErrorKind::Malformed,
        });
    }
}

fn password(errors: &mut Vec<FieldError>, value: &str) {
    if required(errors, "password", value) && value.chars().count() < MIN_PASSWORD_LEN {
        errors.push(FieldError {
            field: "password",
            kind: FieldErrorKind::TooShort {
                min: MIN_PASSWORD_LEN,
            },
        });
    }
}

fn contact(
    errors: &mut Vec<FieldError>,
    phone: &str,
    gender: &str,
    dormitory: &str,
    student_id: &str,
) {
    if required(errors, "phone", phone) && !is_phone(phone) {
        errors.push(FieldError {
            field: "phone",
            kind: FieldErrorKind::Malformed,
        });
    }

    required(errors, "gender", gender);
    required(errors, "dormitory", dormitory);

    if required(errors, "studentId", student_id) && !is_student_id(student_id) {
        errors.push(FieldError {
            field: "studentId",
            kind: FieldErrorKind::Malformed,
        });
    }
}

/// Checks a post form, returning every rejected field.
pub fn post(descriptor: &PostDescriptor) -> Vec<FieldError> {
    let mut errors = Vec::new();

    if required(&mut errors, "title", &descriptor.title)
        && descriptor.title.chars().count() > MAX_TITLE_LEN
    {
        errors.push(FieldError {
            field: "title",
            kind: FieldErrorKind::TooLong { max: MAX_TITLE_LEN },
        });
    }

    if required(&mut errors, "description", &descriptor.description)
        && descriptor.description.chars().count() < MIN_DESCRIPTION_LEN
    {
        errors.push(FieldError {
            field: "description",
            kind: FieldErrorKind::TooShort {
                min: MIN_DESCRIPTION_LEN,
            },
        });
    }

    errors
}

/// Pushes a [`FieldErrorKind::Missing`] error if `value` is blank.
/// Returns whether the value is present.
fn required(errors: &mut Vec<FieldError>, field: &'static str, value: &str) -> bool {
    if value.trim().is_empty() {
        errors.push(FieldError {
            field,
            kind: FieldErrorKind::Missing,
        });
        false
    } else {
        true
    }
}

/// A parseable address with a dotted domain.
fn is_email(value: &str) -> bool {
    value
        .parse::<lettre::Address>()
        .map_or(false, |address| {
            let domain = address.domain();
            domain.contains('.') && !domain.starts_with('.') && !domain.ends_with('.')
        })
}

/// `010-dddd-dddd`.
fn is_phone(value: &str) -> bool {
    let mut parts = value.split('-');
    matches!(
        (parts.next(), parts.next(), parts.next(), parts.next()),
        (Some("010"), Some(a), Some(b), None) if all_digits(a, 4) && all_digits(b, 4)
    )
}

fn is_student_id(value: &str) -> bool {
    all_digits(value, 8)
}

fn all_digits(value: &str, len: usize) -> bool {
    value.len() == len && value.bytes().all(|b| b.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_registration() -> RegisterDescriptor {
        RegisterDescriptor {
            name: "Kim Minji".to_string(),
            email: "minji@dorm.ac.kr".to_string(),
            password: "secret1".to_string(),
            phone: "010-1234-5678".to_string(),
            gender: "female".to_string(),
            dormitory: "Hanul Hall".to_string(),
            student_id: "20231234".to_string(),
        }
    }

    #[test]
    fn accepts_complete_registration() {
        assert!(registration(&valid_registration()).is_empty());
    }

    #[test]
    fn reports_each_missing_field() {
        let errors = registration(&RegisterDescriptor::default());
        let fields: Vec<_> = errors.iter().map(|e| e.field).collect();

        assert_eq!(
            fields,
            [
                "name",
                "email",
                "password",
                "phone",
                "gender",
                "dormitory",
                "studentId"
            ]
        );
        assert!(errors.iter().all(|e| e.kind == FieldErrorKind::Missing));
    }

    #[test]
    fn rejects_malformed_fields() {
        let mut descriptor = valid_registration();
        descriptor.email = "minji@localhost".to_string();
        descriptor.password = "abc".to_string();
        descriptor.phone = "011-1234-5678".to_string();
        descriptor.student_id = "2023123".to_string();

        assert_eq!(
            registration(&descriptor),
            [
                FieldError {
                    field: "email",
                    kind: FieldErrorKind::Malformed
                },
                FieldError {
                    field: "password",
                    kind: FieldErrorKind::TooShort { min: 6 }
                },
                FieldError {
                    field: "phone",
                    kind: FieldErrorKind::Malformed
                },
                FieldError {
                    field: "studentId",
                    kind: FieldErrorKind::Malformed
                },
            ]
        );
    }

    #[test]
    fn profile_checks_new_password_only_when_given() {
        let descriptor = valid_registration();
        let mut update = UserUpdate {
            name: descriptor.name,
            email: descriptor.email,
            phone: descriptor.phone,
            gender: descriptor.gender,
            dormitory: descriptor.dormitory,
            student_id: descriptor.student_id,
            password: None,
        };
        assert!(profile(&update).is_empty());

        update.password = Some("123".to_string());
        assert_eq!(
            profile(&update),
            [FieldError {
                field: "password",
                kind: FieldErrorKind::TooShort { min: 6 }
            }]
        );
    }

    #[test]
    fn login_form() {
        let mut descriptor = LoginDescriptor {
            email: "minji@dorm.ac.kr".to_string(),
            password: "secret1".to_string(),
        };
        assert!(login(&descriptor).is_empty());

        descriptor.email = "minji".to_string();
        descriptor.password = "12345".to_string();
        assert_eq!(
            login(&descriptor),
            [
                FieldError {
                    field: "email",
                    kind: FieldErrorKind::Malformed
                },
                FieldError {
                    field: "password",
                    kind: FieldErrorKind::TooShort { min: 6 }
                },
            ]
        );
    }

    #[test]
    fn phone_format() {
        assert!(is_phone("010-0000-0000"));
        assert!(!is_phone("010-000-0000"));
        assert!(!is_phone("010-0000-0000-1"));
        assert!(!is_phone("01000000000"));
        assert!(!is_phone("010-abcd-0000"));
    }

    #[test]
    fn post_limits() {
        let mut descriptor = PostDescriptor {
            title: "x".repeat(101),
            description: "too short".to_string(),
            kind: crate::post::PostType::HelpOffer,
            details: Default::default(),
        };

        let kinds: Vec<_> = post(&descriptor).into_iter().map(|e| e.kind).collect();
        assert_eq!(
            kinds,
            [
                FieldErrorKind::TooLong { max: 100 },
                FieldErrorKind::TooShort { min: 10 }
            ]
        );

        descriptor.title = "x".repeat(100);
        descriptor.description = "long enough now".to_string();
        assert!(post(&descriptor).is_empty());
    }
}
