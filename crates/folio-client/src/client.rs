use std::time::Duration;

use folio_types::{
    Envelope, FormPart, GenerateRequest, GeneratedContent, ListQuery, Paged, Resource,
};
use reqwest::multipart::{Form, Part};
use reqwest::{Method, RequestBuilder};
use serde::de::DeserializeOwned;

use crate::api::AdminApi;
use crate::error::{Error, Result};
use crate::session::Session;

const USER_AGENT: &str = concat!("folio/", env!("CARGO_PKG_VERSION"));

/// reqwest-backed [`AdminApi`] implementation.
#[derive(Debug, Clone)]
pub struct HttpClient {
    http: reqwest::Client,
    base_url: String,
    session: Session,
}

pub struct ClientBuilder {
    base_url: String,
    session: Session,
    timeout: Option<Duration>,
}

impl ClientBuilder {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            session: Session::new(),
            timeout: Some(Duration::from_secs(30)),
        }
    }

    pub fn session(mut self, session: Session) -> Self {
        self.session = session;
        self
    }

    pub fn timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn build(self) -> Result<HttpClient> {
        let mut builder = reqwest::Client::builder().user_agent(USER_AGENT);
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        Ok(HttpClient {
            http: builder.build()?,
            base_url: self.base_url.trim_end_matches('/').to_string(),
            session: self.session,
        })
    }
}

impl HttpClient {
    pub fn builder(base_url: impl Into<String>) -> ClientBuilder {
        ClientBuilder::new(base_url)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = self.url(path);
        tracing::debug!(%method, %url, "request");
        self.http.request(method, url)
    }

    fn authed(&self, method: Method, path: &str) -> Result<RequestBuilder> {
        let token = self.session.token().ok_or(Error::Unauthenticated)?;
        Ok(self.request(method, path).bearer_auth(token))
    }

    /// Send and unwrap the envelope, returning the status and raw `data`.
    async fn send(&self, request: RequestBuilder) -> Result<(u16, Option<serde_json::Value>)> {
        let response = request.send().await?;
        let status = response.status();
        let body = response.bytes().await?;

        let envelope: Envelope<serde_json::Value> = match serde_json::from_slice(&body) {
            Ok(envelope) => envelope,
            Err(_) if !status.is_success() => {
                tracing::warn!(status = status.as_u16(), "non-envelope error response");
                return Err(Error::Rejected {
                    status: status.as_u16(),
                    message: None,
                });
            }
            Err(source) => {
                return Err(Error::Decode {
                    status: status.as_u16(),
                    source,
                });
            }
        };

        if !envelope.success || !status.is_success() {
            tracing::warn!(
                status = status.as_u16(),
                reason = envelope.message().unwrap_or_default(),
                "request rejected"
            );
            return Err(Error::Rejected {
                status: status.as_u16(),
                message: envelope.message().map(String::from),
            });
        }

        Ok((
            status.as_u16(),
            envelope.data.filter(|data| !data.is_null()),
        ))
    }

    async fn send_data<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T> {
        let (status, data) = self.send(request).await?;
        let data = data.ok_or(Error::MissingData)?;
        serde_json::from_value(data).map_err(|source| Error::Decode { status, source })
    }
}

fn multipart(parts: Vec<FormPart>) -> Result<Form> {
    let mut form = Form::new();
    for part in parts {
        form = match part {
            FormPart::Text { name, value } => form.text(name, value),
            FormPart::File { name, attachment } => {
                let file = Part::bytes(attachment.bytes)
                    .file_name(attachment.file_name)
                    .mime_str(&attachment.mime)?;
                form.part(name, file)
            }
        };
    }
    Ok(form)
}

fn item_path<R: Resource>(id: &str) -> String {
    format!("{}/{}", R::KIND.collection(), id)
}

impl AdminApi for HttpClient {
    async fn list<R: Resource>(&self, query: &ListQuery) -> Result<Paged<R>> {
        let request = self
            .request(Method::GET, R::KIND.collection())
            .query(&query.to_pairs());
        self.send_data(request).await
    }

    async fn get<R: Resource>(&self, id: &str) -> Result<R> {
        let request = self.request(Method::GET, &item_path::<R>(id));
        self.send_data(request).await
    }

    async fn create<R: Resource>(&self, parts: Vec<FormPart>) -> Result<()> {
        let request = self
            .authed(Method::POST, R::KIND.collection())?
            .multipart(multipart(parts)?);
        self.send(request).await.map(|_| ())
    }

    async fn update<R: Resource>(&self, id: &str, parts: Vec<FormPart>) -> Result<()> {
        let request = self
            .authed(Method::PATCH, &item_path::<R>(id))?
            .multipart(multipart(parts)?);
        self.send(request).await.map(|_| ())
    }

    async fn delete<R: Resource>(&self, id: &str) -> Result<()> {
        let request = self.authed(Method::DELETE, &item_path::<R>(id))?;
        self.send(request).await.map(|_| ())
    }

    async fn generate(&self, context: &str) -> Result<GeneratedContent> {
        let body = GenerateRequest {
            context: context.to_string(),
        };
        let request = self.authed(Method::POST, "ai-content/generate")?.json(&body);
        self.send_data(request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_types::{Attachment, Blog, Portfolio};

    #[test]
    fn test_item_paths() {
        assert_eq!(item_path::<Blog>("42"), "blogs/42");
        assert_eq!(item_path::<Portfolio>("7"), "portfolio/7");
    }

    #[test]
    fn test_url_joins_without_double_slash() {
        let client = HttpClient::builder("http://localhost:3000/api/")
            .build()
            .unwrap();
        assert_eq!(client.url("/blogs"), "http://localhost:3000/api/blogs");
        assert_eq!(client.url("portfolio/1"), "http://localhost:3000/api/portfolio/1");
    }

    #[test]
    fn test_mutations_require_session() {
        let client = HttpClient::builder("http://localhost:3000/api")
            .build()
            .unwrap();
        assert!(matches!(
            client.authed(Method::DELETE, "blogs/1"),
            Err(Error::Unauthenticated)
        ));
    }

    #[test]
    fn test_multipart_accepts_files() {
        let parts = vec![
            FormPart::text("title", "t"),
            FormPart::File {
                name: "image",
                attachment: Attachment::from_bytes("a.png", vec![1, 2]),
            },
        ];
        assert!(multipart(parts).is_ok());
    }
}
