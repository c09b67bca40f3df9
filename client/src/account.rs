use dorm_move_shared::validate;

use crate::{
    raw::{self, account},
    Context, Error, LoginDescriptor, RegisterDescriptor, User, UserQuery, UserUpdate,
};

impl Context {
    /// Registers a new user.
    ///
    /// The form is validated before anything is sent; the store stamps the
    /// creation time.
    ///
    /// # Errors
    ///
    /// - Errors with [`Error::Validation`] listing every rejected field.
    pub async fn register(&self, descriptor: &RegisterDescriptor) -> Result<User, Error> {
        let errors = validate::registration(descriptor);
        if !errors.is_empty() {
            return Err(Error::Validation(errors));
        }

        raw::call(account::Register { descriptor }, self).await
    }

    /// Indicates whether a user already registered with `email`.
    pub async fn email_taken(&self, email: &str) -> Result<bool, Error> {
        let users = raw::call(
            account::List {
                query: UserQuery {
                    email: Some(email.to_owned()),
                },
            },
            self,
        )
        .await?;

        Ok(!users.is_empty())
    }

    /// Logs in with email and password.
    ///
    /// # Errors
    ///
    /// - Errors with [`Error::Validation`] if the email is malformed or the
    ///   password too short. Nothing is sent then.
    /// - Errors with [`Error::InvalidCredentials`] if no user has this
    ///   email and password. An unknown email is not told apart from a
    ///   wrong password.
    pub async fn login(&self, email: &str, password: &str) -> Result<User, Error> {
        let descriptor = LoginDescriptor {
            email: email.to_owned(),
            password: password.to_owned(),
        };
        let errors = validate::login(&descriptor);
        if !errors.is_empty() {
            return Err(Error::Validation(errors));
        }

        raw::call(account::Login { descriptor }, self)
            .await
            .map_err(|err| match err.status() {
                Some(reqwest::StatusCode::UNAUTHORIZED) => Error::InvalidCredentials,
                _ => err,
            })
    }

    pub async fn get_user(&self, user_id: u64) -> Result<User, Error> {
        raw::call(account::View { user_id }, self).await
    }

    /// Replaces the profile of a user.
    pub async fn update_user(&self, user_id: u64, update: &UserUpdate) -> Result<User, Error> {
        raw::call(account::Edit { user_id, update }, self).await
    }

    pub async fn list_users(&self) -> Result<Vec<User>, Error> {
        raw::call(
            account::List {
                query: UserQuery::default(),
            },
            self,
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use crate::{ClientConfig, Context, Error, RegisterDescriptor};

    /// Nothing listens on this address, so any dispatched request
    /// would fail with a transport error instead.
    fn unreachable_context() -> Context {
        Context::new(&ClientConfig::new("http://127.0.0.1:9")).unwrap()
    }

    #[tokio::test]
    async fn register_validates_before_dispatch() {
        let cx = unreachable_context();

        let err = cx
            .register(&RegisterDescriptor {
                name: "Kim".to_string(),
                ..Default::default()
            })
            .await
            .unwrap_err();

        match err {
            Error::Validation(fields) => {
                assert!(fields.iter().all(|f| f.field != "name"));
                assert_eq!(fields.len(), 6);
            }
            other => panic!("expected a validation error, got {other}"),
        }
    }

    #[tokio::test]
    async fn valid_register_reaches_transport() {
        let cx = unreachable_context();

        let err = cx
            .register(&RegisterDescriptor {
                name: "Kim".to_string(),
                email: "kim@dorm.ac.kr".to_string(),
                password: "secret1".to_string(),
                phone: "010-1111-2222".to_string(),
                gender: "male".to_string(),
                dormitory: "Hanul Hall".to_string(),
                student_id: "20240001".to_string(),
            })
            .await
            .unwrap_err();

        assert!(matches!(err, Error::Transport(_)));
    }

    #[tokio::test]
    async fn login_validates_before_dispatch() {
        let cx = unreachable_context();

        match cx.login("kim", "123").await.unwrap_err() {
            Error::Validation(fields) => {
                let names: Vec<_> = fields.iter().map(|f| f.field).collect();
                assert_eq!(names, ["email", "password"]);
            }
            other => panic!("expected a validation error, got {other}"),
        }

        assert!(matches!(
            cx.login("kim@dorm.ac.kr", "secret1").await,
            Err(Error::Transport(_))
        ));
    }
}
