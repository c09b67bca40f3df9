use dorm_move_shared::validate;

use crate::{
    raw::{self, post},
    Context, Error, Post, PostDescriptor, PostPatch, PostQuery, SortKey, SortOrder,
};

impl Context {
    /// Lists posts newest first, applying the filters, search and page
    /// of `filters`.
    ///
    /// Any sort given in `filters` is replaced. A page without a limit
    /// uses [`PostQuery::DEFAULT_LIMIT`].
    pub async fn get_all_posts(&self, filters: &PostQuery) -> Result<Vec<Post>, Error> {
        let mut query = filters.clone();
        query.sort = Some(SortKey::CreatedAt);
        query.order = Some(SortOrder::Desc);
        if query.page.is_some() && query.limit.is_none() {
            query.limit = Some(PostQuery::DEFAULT_LIMIT);
        }

        raw::call(post::List { query: &query }, self).await
    }

    /// Full-text search on the store, in store order.
    pub async fn search_posts(&self, q: &str) -> Result<Vec<Post>, Error> {
        let query = PostQuery {
            q: Some(q.to_owned()),
            ..Default::default()
        };

        raw::call(post::List { query: &query }, self).await
    }

    pub async fn get_post(&self, post_id: u64) -> Result<Post, Error> {
        raw::call(post::Get { post_id }, self).await
    }

    /// Creates a post after validating its title and description.
    ///
    /// The store opens the post with no views and no applicants.
    pub async fn create_post(&self, descriptor: &PostDescriptor) -> Result<Post, Error> {
        let errors = validate::post(descriptor);
        if !errors.is_empty() {
            return Err(Error::Validation(errors));
        }

        raw::call(post::Create { descriptor }, self).await
    }

    /// Updates the fields set in `patch`.
    pub async fn update_post(&self, post_id: u64, patch: &PostPatch) -> Result<Post, Error> {
        raw::call(post::Edit { post_id, patch }, self).await
    }

    /// Deletes a post together with its applications.
    pub async fn delete_post(&self, post_id: u64) -> Result<(), Error> {
        raw::call(post::Destroy { post_id }, self).await
    }

    /// Counts one view, returning the updated post.
    pub async fn increment_views(&self, post_id: u64) -> Result<Post, Error> {
        raw::call(post::View { post_id }, self).await
    }
}
