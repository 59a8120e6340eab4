//! Task Commands

use async_trait::async_trait;
use taskline_core::query::Collection;
use taskline_core::wire;
use taskline_core::{ApiError, CollectionSource, ItemId, ItemPatch, NewItem, Page, RequestParams};

use super::ApiClient;

/// `/projects/{pid}/tasks` for one project
pub struct TasksApi {
    client: ApiClient,
    project_id: ItemId,
}

impl TasksApi {
    pub fn new(client: ApiClient, project_id: ItemId) -> Self {
        Self { client, project_id }
    }

    fn collection_path(&self) -> String {
        format!("/projects/{}/tasks", self.project_id)
    }

    fn item_path(&self, id: ItemId) -> String {
        format!("/projects/{}/tasks/{}", self.project_id, id)
    }
}

#[async_trait(?Send)]
impl CollectionSource for TasksApi {
    fn collection(&self) -> Collection {
        Collection::Tasks {
            project_id: self.project_id,
        }
    }

    async fn fetch(&self, params: &RequestParams) -> Result<Page, ApiError> {
        let (status, body) = self.client.get_text(&self.collection_path(), params).await?;
        wire::decode_page(self.collection(), status, &body)
    }

    async fn create(&self, item: &NewItem) -> Result<(), ApiError> {
        let body = wire::encode_new_item(self.collection(), item);
        self.client.post_ack(&self.collection_path(), &body).await
    }

    async fn update(&self, id: ItemId, patch: &ItemPatch) -> Result<(), ApiError> {
        let body = wire::encode_patch(self.collection(), None, patch);
        self.client.put_ack(&self.item_path(id), &body).await
    }

    /// The endpoint deletes one task at a time; stops at the first failure
    async fn delete(&self, ids: &[ItemId]) -> Result<(), ApiError> {
        for id in ids {
            self.client.delete_ack(&self.item_path(*id), None).await?;
        }
        Ok(())
    }
}
