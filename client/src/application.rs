use crate::{
    raw::{self, application},
    Application, ApplicationQuery, ApplicationStatus, ApplyDescriptor, Context, Error,
};

impl Context {
    /// Applies to a post.
    ///
    /// The store records the pending application and adds the applicant
    /// to the post in one step.
    ///
    /// # Errors
    ///
    /// - Errors with `409` if the applicant already applied or the post
    ///   is no longer open.
    pub async fn apply(
        &self,
        post_id: u64,
        applicant_id: u64,
        message: &str,
    ) -> Result<Application, Error> {
        raw::call(
            application::Apply {
                descriptor: &ApplyDescriptor {
                    post_id,
                    applicant_id,
                    message: message.to_owned(),
                },
            },
            self,
        )
        .await
    }

    /// Accepts or rejects an application.
    ///
    /// Accepting matches the post; rejecting removes the applicant from
    /// it. Both happen in the same store operation.
    pub async fn update_application_status(
        &self,
        application_id: u64,
        status: ApplicationStatus,
    ) -> Result<Application, Error> {
        raw::call(
            application::Review {
                application_id,
                status,
            },
            self,
        )
        .await
    }

    pub async fn applications_for_post(&self, post_id: u64) -> Result<Vec<Application>, Error> {
        raw::call(
            application::List {
                query: ApplicationQuery {
                    post_id: Some(post_id),
                    ..Default::default()
                },
            },
            self,
        )
        .await
    }

    pub async fn applications_by_user(&self, user_id: u64) -> Result<Vec<Application>, Error> {
        raw::call(
            application::List {
                query: ApplicationQuery {
                    applicant_id: Some(user_id),
                    ..Default::default()
                },
            },
            self,
        )
        .await
    }
}
