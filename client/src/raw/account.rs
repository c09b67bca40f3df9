use std::borrow::Cow;

use reqwest::{RequestBuilder, Response};

use crate::{Error, LoginDescriptor, RegisterDescriptor, User, UserQuery, UserUpdate};

pub struct Register<'a> {
    pub descriptor: &'a RegisterDescriptor,
}

#[async_trait::async_trait]
impl super::Request for Register<'_> {
    type Output = User;
    const METHOD: reqwest::Method = reqwest::Method::POST;

    fn path(&self) -> Cow<'static, str> {
        "/users".into()
    }

    fn make_req(&self, req: RequestBuilder) -> Result<RequestBuilder, Error> {
        Ok(req.json(self.descriptor))
    }

    async fn parse_res(&mut self, response: Response) -> Result<Self::Output, Error> {
        super::json(response).await
    }
}

pub struct Login {
    pub descriptor: LoginDescriptor,
}

#[async_trait::async_trait]
impl super::Request for Login {
    type Output = User;
    const METHOD: reqwest::Method = reqwest::Method::POST;

    fn path(&self) -> Cow<'static, str> {
        "/auth/login".into()
    }

    fn make_req(&self, req: RequestBuilder) -> Result<RequestBuilder, Error> {
        Ok(req.json(&self.descriptor))
    }

    async fn parse_res(&mut self, response: Response) -> Result<Self::Output, Error> {
        super::json(response).await
    }
}

pub struct View {
    pub user_id: u64,
}

#[async_trait::async_trait]
impl super::Request for View {
    type Output = User;

    fn path(&self) -> Cow<'static, str> {
        format!("/users/{}", self.user_id).into()
    }

    async fn parse_res(&mut self, response: Response) -> Result<Self::Output, Error> {
        super::json(response).await
    }
}

pub struct Edit<'a> {
    pub user_id: u64,
    pub update: &'a UserUpdate,
}

#[async_trait::async_trait]
impl super::Request for Edit<'_> {
    type Output = User;
    const METHOD: reqwest::Method = reqwest::Method::PUT;

    fn path(&self) -> Cow<'static, str> {
        format!("/users/{}", self.user_id).into()
    }

    fn make_req(&self, req: RequestBuilder) -> Result<RequestBuilder, Error> {
        Ok(req.json(self.update))
    }

    async fn parse_res(&mut self, response: Response) -> Result<Self::Output, Error> {
        super::json(response).await
    }
}

/// Lists users, optionally filtered by exact email.
pub struct List {
    pub query: UserQuery,
}

#[async_trait::async_trait]
impl super::Request for List {
    type Output = Vec<User>;

    fn path(&self) -> Cow<'static, str> {
        "/users".into()
    }

    fn make_req(&self, req: RequestBuilder) -> Result<RequestBuilder, Error> {
        Ok(req.query(&self.query))
    }

    async fn parse_res(&mut self, response: Response) -> Result<Self::Output, Error> {
        super::json(response).await
    }
}
