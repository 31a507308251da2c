use anyhow::Context;
use reqwest::{Method, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;

use crate::api::{SimpleOperationResult, UserGetAllOperationResult, UserNameOperation, UserOperationResult};
use crate::database::User;

/// A decoded response together with its HTTP status.
#[derive(Debug)]
pub struct ApiReply<T> {
    pub status: StatusCode,
    pub body: T,
}

impl<T> ApiReply<T> {
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }
}

/// Thin HTTP client over the user API endpoints.
#[derive(Debug, Clone)]
pub struct UserApiClient {
    base_url: String,
    http: reqwest::Client,
}

impl UserApiClient {
    pub fn new(base_url: &str) -> anyhow::Result<Self> {
        let parsed = url::Url::parse(base_url).with_context(|| format!("invalid API URL '{}'", base_url))?;
        let http = reqwest::Client::builder().build().context("failed to build HTTP client")?;
        Ok(Self {
            base_url: parsed.as_str().trim_end_matches('/').to_string(),
            http,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn home(&self) -> anyhow::Result<ApiReply<String>> {
        let res = self
            .http
            .get(format!("{}/", self.base_url))
            .send()
            .await
            .with_context(|| format!("request to {} failed", self.base_url))?;
        let status = res.status();
        let body = res.text().await?;
        Ok(ApiReply { status, body })
    }

    pub async fn health(&self) -> anyhow::Result<ApiReply<Value>> {
        self.send(Method::GET, "/health", None::<&()>).await
    }

    pub async fn register(&self, user: &User) -> anyhow::Result<ApiReply<UserOperationResult>> {
        self.send(Method::POST, "/user/register", Some(user)).await
    }

    pub async fn get(&self, user_name: &str) -> anyhow::Result<ApiReply<UserOperationResult>> {
        let op = UserNameOperation { user_name: user_name.to_string() };
        self.send(Method::GET, "/user/get", Some(&op)).await
    }

    pub async fn get_all(&self) -> anyhow::Result<ApiReply<UserGetAllOperationResult>> {
        self.send(Method::GET, "/user/getAll", None::<&()>).await
    }

    pub async fn update(&self, user: &User) -> anyhow::Result<ApiReply<UserOperationResult>> {
        self.send(Method::PUT, "/user/update", Some(user)).await
    }

    pub async fn delete(&self, user_name: &str) -> anyhow::Result<ApiReply<UserOperationResult>> {
        let op = UserNameOperation { user_name: user_name.to_string() };
        self.send(Method::DELETE, "/user/delete", Some(&op)).await
    }

    pub async fn delete_all(&self) -> anyhow::Result<ApiReply<SimpleOperationResult>> {
        self.send(Method::DELETE, "/user/deleteAll", None::<&()>).await
    }

    async fn send<B, T>(&self, method: Method, path: &str, body: Option<&B>) -> anyhow::Result<ApiReply<T>>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = format!("{}{}", self.base_url, path);
        let mut req = self.http.request(method.clone(), &url);
        if let Some(body) = body {
            req = req.json(body);
        }

        let res = req
            .send()
            .await
            .with_context(|| format!("{} {} failed", method, url))?;
        let status = res.status();
        let text = res.text().await?;

        let body = serde_json::from_str(&text)
            .with_context(|| format!("unexpected response from {} {} ({}): {}", method, url, status, text))?;
        Ok(ApiReply { status, body })
    }
}
