use crate::{
    raw::{self, misc},
    Building, Context, Error, PostQuery, Stats,
};

impl Context {
    pub async fn get_buildings(&self) -> Result<Vec<Building>, Error> {
        raw::call(misc::Buildings, self).await
    }

    /// Counts posts and users from their full collections.
    pub async fn get_stats(&self) -> Result<Stats, Error> {
        let posts = raw::call(
            raw::post::List {
                query: &PostQuery::default(),
            },
            self,
        )
        .await?;
        let users = self.list_users().await?;

        Ok(Stats::collect(&posts, users.len()))
    }
}
