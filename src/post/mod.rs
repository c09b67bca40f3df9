pub mod handle;

use std::cmp::Ordering;

use chrono::Utc;

use dorm_move_shared::{
    post::{
        handle::{PostDescriptor, PostPatch, PostQuery, SortKey, SortOrder},
        Post, PostStatus,
    },
    validate,
};

use crate::{db::Db, Error};

/// Stores a new open post with no views and no applicants.
pub fn create(db: &mut Db, descriptor: PostDescriptor) -> Result<Post, Error> {
    let errors = validate::post(&descriptor);
    if !errors.is_empty() {
        return Err(Error::validation(&errors));
    }

    let now = Utc::now();
    let post = Post {
        id: db.next_post_id(),
        title: descriptor.title,
        description: descriptor.description,
        kind: descriptor.kind,
        status: PostStatus::Open,
        details: descriptor.details,
        views: 0,
        applicants: Vec::new(),
        created_at: now,
        updated_at: now,
    };

    db.posts.push(post.clone());
    Ok(post)
}

/// Applies the fields set in `patch` and stamps the update time.
///
/// # Errors
///
/// - Errors if the patched title or description is invalid.
/// - Errors if the status would change to anything but
///   [`PostStatus::Completed`], since matching is driven by applications.
pub fn edit(db: &mut Db, id: u64, patch: PostPatch) -> Result<Post, Error> {
    let post = db.post_mut(id)?;

    let patched = PostDescriptor {
        title: patch.title.clone().unwrap_or_else(|| post.title.clone()),
        description: patch
            .description
            .clone()
            .unwrap_or_else(|| post.description.clone()),
        kind: patch.kind.unwrap_or(post.kind),
        details: Default::default(),
    };
    let errors = validate::post(&patched);
    if !errors.is_empty() {
        return Err(Error::validation(&errors));
    }

    if let Some(status) = patch.status {
        if status != post.status && status != PostStatus::Completed {
            return Err(Error::StatusTransition);
        }
        post.status = status;
    }

    post.title = patched.title;
    post.description = patched.description;
    post.kind = patched.kind;
    post.details.merge(patch.details);
    post.updated_at = Utc::now();

    Ok(post.clone())
}

/// Removes a post and every application to it.
pub fn delete(db: &mut Db, id: u64) -> Result<(), Error> {
    let index = db
        .posts
        .iter()
        .position(|p| p.id == id)
        .ok_or(Error::NotFound("post", id))?;

    db.posts.remove(index);
    db.applications.retain(|a| a.post_id != id);
    Ok(())
}

/// Counts one view.
pub fn count_view(db: &mut Db, id: u64) -> Result<Post, Error> {
    let post = db.post_mut(id)?;
    post.views += 1;
    Ok(post.clone())
}

/// Filters, sorts and pages posts.
///
/// Returns the requested page together with the number of posts that
/// passed the filters.
pub fn query(posts: &[Post], query: &PostQuery) -> (Vec<Post>, usize) {
    let mut matched: Vec<&Post> = posts.iter().filter(|p| query.matches(p)).collect();
    let total = matched.len();

    if let Some(key) = query.sort {
        let order = query.order.unwrap_or_default();
        matched.sort_by(|a, b| {
            let ordering = compare(a, b, key).then(a.id.cmp(&b.id));
            match order {
                SortOrder::Asc => ordering,
                SortOrder::Desc => ordering.reverse(),
            }
        });
    }

    let (skip, take) = match (query.page, query.limit) {
        (Some(page), limit) => {
            let limit = limit.unwrap_or(PostQuery::DEFAULT_LIMIT) as usize;
            match (page as usize).checked_sub(1) {
                Some(before) => (before.saturating_mul(limit), limit),
                None => (0, 0),
            }
        }
        (None, Some(limit)) => (0, limit as usize),
        (None, None) => (0, usize::MAX),
    };

    let page = matched
        .into_iter()
        .skip(skip)
        .take(take)
        .cloned()
        .collect();
    (page, total)
}

fn compare(a: &Post, b: &Post, key: SortKey) -> Ordering {
    match key {
        SortKey::CreatedAt => a.created_at.cmp(&b.created_at),
        SortKey::UpdatedAt => a.updated_at.cmp(&b.updated_at),
        SortKey::Views => a.views.cmp(&b.views),
        SortKey::Price => a.details.price.cmp(&b.details.price),
        SortKey::MoveDate => a.details.move_date.cmp(&b.details.move_date),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dorm_move_shared::post::{MoveDetails, PostType};

    fn seed(db: &mut Db, title: &str, kind: PostType, price: Option<u32>) -> Post {
        create(
            db,
            PostDescriptor {
                title: title.to_string(),
                description: "Need a hand with six boxes".to_string(),
                kind,
                details: MoveDetails {
                    price,
                    ..Default::default()
                },
            },
        )
        .unwrap()
    }

    #[test]
    fn sorts_with_id_tie_break() {
        let mut db = Db::default();
        seed(&mut db, "a", PostType::HelpRequest, Some(5000));
        seed(&mut db, "b", PostType::HelpOffer, None);
        seed(&mut db, "c", PostType::HelpRequest, Some(5000));

        let (posts, total) = query(
            &db.posts,
            &PostQuery {
                sort: Some(SortKey::Price),
                order: Some(SortOrder::Desc),
                ..Default::default()
            },
        );

        assert_eq!(total, 3);
        assert_eq!(posts.iter().map(|p| p.id).collect::<Vec<_>>(), [3, 1, 2]);
    }

    #[test]
    fn pages_after_filtering() {
        let mut db = Db::default();
        for i in 0..5 {
            seed(&mut db, &format!("request {i}"), PostType::HelpRequest, None);
            seed(&mut db, &format!("offer {i}"), PostType::HelpOffer, None);
        }

        let mut q = PostQuery {
            kind: Some(PostType::HelpOffer),
            page: Some(2),
            limit: Some(2),
            ..Default::default()
        };
        let (posts, total) = query(&db.posts, &q);
        assert_eq!(total, 5);
        assert_eq!(
            posts.iter().map(|p| p.title.as_str()).collect::<Vec<_>>(),
            ["offer 2", "offer 3"]
        );

        q.page = Some(0);
        assert!(query(&db.posts, &q).0.is_empty());

        q.page = None;
        q.limit = Some(1);
        assert_eq!(query(&db.posts, &q).0.len(), 1);
    }

    #[test]
    fn edit_rejects_invalid_patch_without_changes() {
        let mut db = Db::default();
        let post = seed(&mut db, "title", PostType::HelpRequest, None);

        let result = edit(
            &mut db,
            post.id,
            PostPatch {
                title: Some(String::new()),
                status: Some(PostStatus::Completed),
                ..Default::default()
            },
        );

        assert!(matches!(result, Err(Error::Validation(_))));
        assert_eq!(db.posts[0], post);
    }

    #[test]
    fn status_moves_only_to_completed() {
        let mut db = Db::default();
        let post = seed(&mut db, "title", PostType::HelpRequest, None);

        let matched = PostPatch {
            status: Some(PostStatus::Matched),
            ..Default::default()
        };
        assert!(matches!(
            edit(&mut db, post.id, matched),
            Err(Error::StatusTransition)
        ));

        let completed = PostPatch {
            status: Some(PostStatus::Completed),
            ..Default::default()
        };
        assert_eq!(
            edit(&mut db, post.id, completed).unwrap().status,
            PostStatus::Completed
        );
    }
}
