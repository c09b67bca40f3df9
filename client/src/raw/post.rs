use std::borrow::Cow;

use reqwest::{RequestBuilder, Response};

use crate::{Error, Post, PostDescriptor, PostPatch, PostQuery};

pub struct List<'a> {
    pub query: &'a PostQuery,
}

#[async_trait::async_trait]
impl super::Request for List<'_> {
    type Output = Vec<Post>;

    fn path(&self) -> Cow<'static, str> {
        "/posts".into()
    }

    fn make_req(&self, req: RequestBuilder) -> Result<RequestBuilder, Error> {
        Ok(req.query(self.query))
    }

    async fn parse_res(&mut self, response: Response) -> Result<Self::Output, Error> {
        super::json(response).await
    }
}

pub struct Get {
    pub post_id: u64,
}

#[async_trait::async_trait]
impl super::Request for Get {
    type Output = Post;

    fn path(&self) -> Cow<'static, str> {
        format!("/posts/{}", self.post_id).into()
    }

    async fn parse_res(&mut self, response: Response) -> Result<Self::Output, Error> {
        super::json(response).await
    }
}

pub struct Create<'a> {
    pub descriptor: &'a PostDescriptor,
}

#[async_trait::async_trait]
impl super::Request for Create<'_> {
    type Output = Post;
    const METHOD: reqwest::Method = reqwest::Method::POST;

    fn path(&self) -> Cow<'static, str> {
        "/posts".into()
    }

    fn make_req(&self, req: RequestBuilder) -> Result<RequestBuilder, Error> {
        Ok(req.json(self.descriptor))
    }

    async fn parse_res(&mut self, response: Response) -> Result<Self::Output, Error> {
        super::json(response).await
    }
}

pub struct Edit<'a> {
    pub post_id: u64,
    pub patch: &'a PostPatch,
}

#[async_trait::async_trait]
impl super::Request for Edit<'_> {
    type Output = Post;
    const METHOD: reqwest::Method = reqwest::Method::PATCH;

    fn path(&self) -> Cow<'static, str> {
        format!("/posts/{}", self.post_id).into()
    }

    fn make_req(&self, req: RequestBuilder) -> Result<RequestBuilder, Error> {
        Ok(req.json(self.patch))
    }

    async fn parse_res(&mut self, response: Response) -> Result<Self::Output, Error> {
        super::json(response).await
    }
}

pub struct Destroy {
    pub post_id: u64,
}

#[async_trait::async_trait]
impl super::Request for Destroy {
    type Output = ();
    const METHOD: reqwest::Method = reqwest::Method::DELETE;

    fn path(&self) -> Cow<'static, str> {
        format!("/posts/{}", self.post_id).into()
    }

    async fn parse_res(&mut self, _response: Response) -> Result<Self::Output, Error> {
        Ok(())
    }
}

/// Increments the view counter in one store operation.
pub struct View {
    pub post_id: u64,
}

#[async_trait::async_trait]
impl super::Request for View {
    type Output = Post;
    const METHOD: reqwest::Method = reqwest::Method::POST;

    fn path(&self) -> Cow<'static, str> {
        format!("/posts/{}/views", self.post_id).into()
    }

    async fn parse_res(&mut self, response: Response) -> Result<Self::Output, Error> {
        super::json(response).await
    }
}
