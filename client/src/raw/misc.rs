use std::borrow::Cow;

use reqwest::Response;

use crate::{Building, Error};

pub struct Buildings;

#[async_trait::async_trait]
impl super::Request for Buildings {
    type Output = Vec<Building>;

    fn path(&self) -> Cow<'static, str> {
        "/buildings".into()
    }

    async fn parse_res(&mut self, response: Response) -> Result<Self::Output, Error> {
        super::json(response).await
    }
}
