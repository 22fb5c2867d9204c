use folio_types::{FormPart, GeneratedContent, ListQuery, Paged, Resource};

use crate::error::Result;

/// Operations the admin screens need from the backend.
///
/// [`HttpClient`](crate::HttpClient) is the real implementation; controllers
/// are generic over this trait so they can run against an in-memory fake.
/// Mutating calls require a signed-in session.
pub trait AdminApi: Send + Sync + 'static {
    /// `GET /<collection>?page&limit&search`
    fn list<R: Resource>(&self, query: &ListQuery) -> impl Future<Output = Result<Paged<R>>> + Send;

    /// `GET /<collection>/:id`
    fn get<R: Resource>(&self, id: &str) -> impl Future<Output = Result<R>> + Send;

    /// `POST /<collection>` as multipart
    fn create<R: Resource>(&self, parts: Vec<FormPart>) -> impl Future<Output = Result<()>> + Send;

    /// `PATCH /<collection>/:id` as multipart
    fn update<R: Resource>(
        &self,
        id: &str,
        parts: Vec<FormPart>,
    ) -> impl Future<Output = Result<()>> + Send;

    /// `DELETE /<collection>/:id`
    fn delete<R: Resource>(&self, id: &str) -> impl Future<Output = Result<()>> + Send;

    /// `POST /ai-content/generate` with `{ context }`
    fn generate(&self, context: &str) -> impl Future<Output = Result<GeneratedContent>> + Send;
}
