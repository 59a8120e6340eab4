//! Project Commands

use async_trait::async_trait;
use taskline_core::query::Collection;
use taskline_core::wire;
use taskline_core::{ApiError, CollectionSource, ItemId, ItemPatch, NewItem, Page, RequestParams};

use super::ApiClient;

const PROJECTS_PATH: &str = "/v1/projects";

/// `/v1/projects`; updates carry the id in the body, deletes take a batch
pub struct ProjectsApi {
    client: ApiClient,
}

impl ProjectsApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait(?Send)]
impl CollectionSource for ProjectsApi {
    fn collection(&self) -> Collection {
        Collection::Projects
    }

    async fn fetch(&self, params: &RequestParams) -> Result<Page, ApiError> {
        let (status, body) = self.client.get_text(PROJECTS_PATH, params).await?;
        wire::decode_page(Collection::Projects, status, &body)
    }

    async fn create(&self, item: &NewItem) -> Result<(), ApiError> {
        let body = wire::encode_new_item(Collection::Projects, item);
        self.client.post_ack(PROJECTS_PATH, &body).await
    }

    async fn update(&self, id: ItemId, patch: &ItemPatch) -> Result<(), ApiError> {
        let body = wire::encode_patch(Collection::Projects, Some(id), patch);
        self.client.put_ack(PROJECTS_PATH, &body).await
    }

    async fn delete(&self, ids: &[ItemId]) -> Result<(), ApiError> {
        let body = wire::encode_project_delete(ids);
        self.client.delete_ack(PROJECTS_PATH, Some(&body)).await
    }
}
