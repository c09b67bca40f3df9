use std::borrow::Cow;

use reqwest::{RequestBuilder, Response};

use crate::{
    Application, ApplicationQuery, ApplicationStatus, ApplicationStatusDescriptor,
    ApplyDescriptor, Error,
};

pub struct Apply<'a> {
    pub descriptor: &'a ApplyDescriptor,
}

#[async_trait::async_trait]
impl super::Request for Apply<'_> {
    type Output = Application;
    const METHOD: reqwest::Method = reqwest::Method::POST;

    fn path(&self) -> Cow<'static, str> {
        "/applications".into()
    }

    fn make_req(&self, req: RequestBuilder) -> Result<RequestBuilder, Error> {
        Ok(req.json(self.descriptor))
    }

    async fn parse_res(&mut self, response: Response) -> Result<Self::Output, Error> {
        super::json(response).await
    }
}

pub struct Review {
    pub application_id: u64,
    pub status: ApplicationStatus,
}

#[async_trait::async_trait]
impl super::Request for Review {
    type Output = Application;
    const METHOD: reqwest::Method = reqwest::Method::PATCH;

    fn path(&self) -> Cow<'static, str> {
        format!("/applications/{}", self.application_id).into()
    }

    fn make_req(&self, req: RequestBuilder) -> Result<RequestBuilder, Error> {
        Ok(req.json(&ApplicationStatusDescriptor {
            status: self.status,
        }))
    }

    async fn parse_res(&mut self, response: Response) -> Result<Self::Output, Error> {
        super::json(response).await
    }
}

pub struct List {
    pub query: ApplicationQuery,
}

#[async_trait::async_trait]
impl super::Request for List {
    type Output = Vec<Application>;

    fn path(&self) -> Cow<'static, str> {
        "/applications".into()
    }

    fn make_req(&self, req: RequestBuilder) -> Result<RequestBuilder, Error> {
        Ok(req.query(&self.query))
    }

    async fn parse_res(&mut self, response: Response) -> Result<Self::Output, Error> {
        super::json(response).await
    }
}
