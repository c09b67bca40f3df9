pub mod handle;

use chrono::Utc;

use dorm_move_shared::{
    application::{handle::ApplyDescriptor, Application, ApplicationStatus},
    post::PostStatus,
};

use crate::{db::Db, Error};

/// Records a pending application and adds the applicant to the post.
///
/// # Errors
///
/// - Errors if the post or the applicant does not exist.
/// - Errors if the post is not open.
/// - Errors if the applicant already applied to this post.
pub fn apply(db: &mut Db, descriptor: ApplyDescriptor) -> Result<Application, Error> {
    db.user(descriptor.applicant_id)?;

    if db.post(descriptor.post_id)?.status != PostStatus::Open {
        return Err(Error::PostNotOpen(descriptor.post_id));
    }

    if db
        .applications
        .iter()
        .any(|a| a.post_id == descriptor.post_id && a.applicant_id == descriptor.applicant_id)
    {
        return Err(Error::AlreadyApplied(descriptor.applicant_id));
    }

    let application = Application {
        id: db.next_application_id(),
        post_id: descriptor.post_id,
        applicant_id: descriptor.applicant_id,
        message: descriptor.message,
        status: ApplicationStatus::Pending,
        created_at: Utc::now(),
    };
    db.applications.push(application.clone());
    sync_applicants(db, descriptor.post_id)?;

    Ok(application)
}

/// Changes the status of an application and its post accordingly.
///
/// Accepting matches the post. Rejecting removes the applicant from the
/// post. Setting the current status again changes nothing.
///
/// # Errors
///
/// - Errors if the application was accepted before.
/// - Errors when accepting if the post already has an accepted
///   application or is completed.
pub fn review(db: &mut Db, id: u64, status: ApplicationStatus) -> Result<Application, Error> {
    let current = db
        .applications
        .iter()
        .find(|a| a.id == id)
        .ok_or(Error::NotFound("application", id))?
        .clone();

    if current.status == status {
        return Ok(current);
    }
    if current.status == ApplicationStatus::Accepted {
        return Err(Error::AcceptedFinal);
    }

    let post = db.post(current.post_id)?;
    if status == ApplicationStatus::Accepted {
        match post.status {
            PostStatus::Open => {}
            PostStatus::Matched => return Err(Error::AlreadyMatched(post.id)),
            PostStatus::Completed => return Err(Error::PostNotOpen(post.id)),
        }
    }

    let application = db
        .applications
        .iter_mut()
        .find(|a| a.id == id)
        .ok_or(Error::NotFound("application", id))?;
    application.status = status;
    let application = application.clone();

    if status == ApplicationStatus::Accepted {
        db.post_mut(application.post_id)?.status = PostStatus::Matched;
    }
    sync_applicants(db, application.post_id)?;

    Ok(application)
}

/// Rebuilds the applicants of a post from its non-rejected applications,
/// in application order.
fn sync_applicants(db: &mut Db, post_id: u64) -> Result<(), Error> {
    let applicants = db
        .applications
        .iter()
        .filter(|a| a.post_id == post_id && a.status != ApplicationStatus::Rejected)
        .map(|a| a.applicant_id)
        .collect();

    let post = db.post_mut(post_id)?;
    post.applicants = applicants;
    post.updated_at = Utc::now();
    Ok(())
}
