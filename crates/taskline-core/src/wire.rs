//! REST Wire Format
//!
//! Every response is wrapped in `{code, message, data}`; `000-0000` means
//! success. Projects and tasks use collection-prefixed field names on the
//! wire and are converted to and from `DatedItem` here, so nothing above
//! this module sees `project_name` or `task_name`.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

use crate::dates;
use crate::error::ApiError;
use crate::models::{DatedItem, ItemId, ItemPatch, NewItem, Page, Priority, Status, Tag};
use crate::query::Collection;

pub const SUCCESS_CODE: &str = "000-0000";

// ============================================================================
// Envelope
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct Envelope<T> {
    pub code: String,
    #[serde(default)]
    pub message: String,
    pub data: Option<T>,
}

/// `data` of the list endpoints
#[derive(Debug, Clone, Deserialize)]
pub struct ListData<R> {
    #[serde(default)]
    pub total: u64,
    pub data_list: Option<Vec<R>>,
}

impl<R: Into<DatedItem>> ListData<R> {
    pub fn into_page(self) -> Page {
        Page {
            total: self.total,
            items: self
                .data_list
                .unwrap_or_default()
                .into_iter()
                .map(Into::into)
                .collect(),
        }
    }
}

/// Decode an HTTP response body into the envelope's `data`
pub fn decode_response<T: DeserializeOwned>(status: u16, body: &str) -> Result<T, ApiError> {
    if !(200..300).contains(&status) {
        let message = serde_json::from_str::<Envelope<Value>>(body)
            .ok()
            .map(|envelope| envelope.message)
            .filter(|message| !message.is_empty())
            .unwrap_or_else(|| "request failed".to_string());
        return Err(ApiError::Http { status, message });
    }

    let envelope: Envelope<Value> =
        serde_json::from_str(body).map_err(|e| ApiError::Decode(e.to_string()))?;
    if envelope.code != SUCCESS_CODE {
        return Err(ApiError::Rejected {
            code: envelope.code,
            message: envelope.message,
        });
    }
    serde_json::from_value(envelope.data.unwrap_or(Value::Null))
        .map_err(|e| ApiError::Decode(e.to_string()))
}

/// Check a mutation response, ignoring whatever `data` it carries
pub fn decode_ack(status: u16, body: &str) -> Result<(), ApiError> {
    decode_response::<serde::de::IgnoredAny>(status, body).map(|_| ())
}

// ============================================================================
// Records
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct ProjectRecord {
    pub id: ItemId,
    pub project_name: String,
    #[serde(default)]
    pub project_desc: Option<String>,
    #[serde(default)]
    pub project_tags: Option<Vec<Tag>>,
    #[serde(default)]
    pub project_priority: Priority,
    #[serde(default)]
    pub project_status: Status,
    #[serde(with = "crate::dates::flexible")]
    pub start_time: chrono::DateTime<chrono::Utc>,
    #[serde(with = "crate::dates::flexible")]
    pub end_time: chrono::DateTime<chrono::Utc>,
}

impl From<ProjectRecord> for DatedItem {
    fn from(record: ProjectRecord) -> Self {
        DatedItem {
            id: record.id,
            name: record.project_name,
            description: record.project_desc.unwrap_or_default(),
            start_time: record.start_time,
            end_time: record.end_time,
            status: record.project_status,
            priority: record.project_priority,
            tags: record.project_tags.unwrap_or_default(),
            project_id: None,
        }
    }
}

/// Older task payloads use `title`/`description`/`startDate`; both are accepted
#[derive(Debug, Clone, Deserialize)]
pub struct TaskRecord {
    pub id: ItemId,
    #[serde(alias = "title")]
    pub task_name: String,
    #[serde(default, alias = "description")]
    pub task_desc: Option<String>,
    #[serde(default, alias = "tags")]
    pub task_tags: Option<Vec<Tag>>,
    #[serde(default, alias = "priority")]
    pub task_priority: Priority,
    #[serde(default, alias = "status")]
    pub task_status: Status,
    #[serde(with = "crate::dates::flexible", alias = "startDate")]
    pub start_time: chrono::DateTime<chrono::Utc>,
    #[serde(with = "crate::dates::flexible", alias = "endDate")]
    pub end_time: chrono::DateTime<chrono::Utc>,
    #[serde(default, alias = "projectId")]
    pub project_id: Option<ItemId>,
}

impl From<TaskRecord> for DatedItem {
    fn from(record: TaskRecord) -> Self {
        DatedItem {
            id: record.id,
            name: record.task_name,
            description: record.task_desc.unwrap_or_default(),
            start_time: record.start_time,
            end_time: record.end_time,
            status: record.task_status,
            priority: record.task_priority,
            tags: record.task_tags.unwrap_or_default(),
            project_id: record.project_id,
        }
    }
}

/// Decode a list response for either collection
pub fn decode_page(collection: Collection, status: u16, body: &str) -> Result<Page, ApiError> {
    match collection {
        Collection::Projects => {
            decode_response::<ListData<ProjectRecord>>(status, body).map(ListData::into_page)
        }
        Collection::Tasks { project_id } => {
            let mut page = decode_response::<ListData<TaskRecord>>(status, body)?.into_page();
            for item in &mut page.items {
                item.project_id.get_or_insert(project_id);
            }
            Ok(page)
        }
    }
}

// ============================================================================
// Request bodies
// ============================================================================

pub fn encode_new_item(collection: Collection, item: &NewItem) -> Value {
    let keys = collection.keys();
    let mut body = Map::new();
    body.insert(keys.name.into(), json!(item.name));
    body.insert(keys.description.into(), json!(item.description));
    body.insert(keys.priority.into(), json!(item.priority));
    body.insert(keys.status.into(), json!(item.status));
    body.insert(keys.tags.into(), json!(item.tags));
    body.insert(keys.start.into(), json!(dates::to_wire(&item.start_time)));
    body.insert(keys.end.into(), json!(dates::to_wire(&item.end_time)));
    if let Some(project_id) = collection.project_id() {
        body.insert("project_id".into(), json!(project_id));
    }
    Value::Object(body)
}

/// Only the fields present in the patch are sent; `id` is included when the
/// endpoint takes it in the body
pub fn encode_patch(collection: Collection, id: Option<ItemId>, patch: &ItemPatch) -> Value {
    let keys = collection.keys();
    let mut body = Map::new();
    if let Some(id) = id {
        body.insert("id".into(), json!(id));
    }
    if let Some(name) = &patch.name {
        body.insert(keys.name.into(), json!(name));
    }
    if let Some(description) = &patch.description {
        body.insert(keys.description.into(), json!(description));
    }
    if let Some(priority) = patch.priority {
        body.insert(keys.priority.into(), json!(priority));
    }
    if let Some(status) = patch.status {
        body.insert(keys.status.into(), json!(status));
    }
    if let Some(tags) = &patch.tags {
        body.insert(keys.tags.into(), json!(tags));
    }
    if let Some(start) = &patch.start_time {
        body.insert(keys.start.into(), json!(dates::to_wire(start)));
    }
    if let Some(end) = &patch.end_time {
        body.insert(keys.end.into(), json!(dates::to_wire(end)));
    }
    Value::Object(body)
}

pub fn encode_project_delete(ids: &[ItemId]) -> Value {
    json!({ "project_ids": ids })
}

// ============================================================================
// Auth
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest<'a> {
    pub account: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest<'a> {
    pub username: &'a str,
    pub password: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<&'a str>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AuthData {
    #[serde(default)]
    pub token: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;

    const PROJECTS: &str = r##"{
        "code": "000-0000",
        "message": "ok",
        "data": {
            "total": 13,
            "data_list": [{
                "id": 3,
                "project_name": "Website Redesign",
                "project_desc": null,
                "project_tags": [{"id": 1, "name": "Frontend", "color": "#3B82F6"}],
                "project_priority": "high",
                "project_status": "in-progress",
                "start_time": "2024-03-01 00:00:00",
                "end_time": "2024-04-15T00:00:00Z"
            }]
        }
    }"##;

    #[test]
    fn test_decode_project_page() {
        let page = decode_page(Collection::Projects, 200, PROJECTS).unwrap();
        assert_eq!(page.total, 13);
        let item = &page.items[0];
        assert_eq!(item.name, "Website Redesign");
        assert_eq!(item.description, "");
        assert_eq!(item.status, Status::InProgress);
        assert_eq!(item.priority, Priority::High);
        assert_eq!(item.end_time.month(), 4);
        assert_eq!(item.tags[0].color, "#3B82F6");
    }

    #[test]
    fn test_decode_legacy_task_shape() {
        let body = r#"{"code":"000-0000","data":{"total":1,"data_list":[
            {"id":9,"title":"Write docs","startDate":"2024-03-02","endDate":"2024-03-04","status":"completed"}
        ]}}"#;
        let page = decode_page(Collection::Tasks { project_id: 3 }, 200, body).unwrap();
        assert_eq!(page.items[0].name, "Write docs");
        assert_eq!(page.items[0].status, Status::Completed);
        assert_eq!(page.items[0].project_id, Some(3));
    }

    #[test]
    fn test_missing_list_is_empty_page() {
        let body = r#"{"code":"000-0000","data":{"total":0,"data_list":null}}"#;
        let page = decode_page(Collection::Projects, 200, body).unwrap();
        assert!(page.items.is_empty());
    }

    #[test]
    fn test_absent_list_field_is_empty_page() {
        let body = r#"{"code":"000-0000","data":{"total":0}}"#;
        let page = decode_page(Collection::Tasks { project_id: 1 }, 200, body).unwrap();
        assert_eq!(page.total, 0);
        assert!(page.items.is_empty());
    }

    #[test]
    fn test_rejected_code_carries_message() {
        let body = r#"{"code":"401-0001","message":"token expired","data":null}"#;
        let err = decode_ack(200, body).unwrap_err();
        assert_eq!(
            err,
            ApiError::Rejected {
                code: "401-0001".into(),
                message: "token expired".into()
            }
        );
        assert_eq!(err.user_message(), "token expired");
    }

    #[test]
    fn test_http_error_uses_body_message_when_present() {
        let err = decode_ack(500, r#"{"code":"500-0000","message":"db down"}"#).unwrap_err();
        assert_eq!(err, ApiError::Http { status: 500, message: "db down".into() });
        let err = decode_ack(502, "<html>bad gateway</html>").unwrap_err();
        assert_eq!(err, ApiError::Http { status: 502, message: "request failed".into() });
    }

    #[test]
    fn test_garbage_body_is_decode_error() {
        assert!(matches!(decode_ack(200, "not json"), Err(ApiError::Decode(_))));
    }

    #[test]
    fn test_encode_patch_uses_collection_names() {
        let body = encode_patch(Collection::Projects, Some(4), &ItemPatch::status(Status::InProgress));
        assert_eq!(body, json!({"id": 4, "project_status": "inProgress"}));
        let body = encode_patch(Collection::Tasks { project_id: 1 }, None, &ItemPatch::priority(Priority::Low));
        assert_eq!(body, json!({"task_priority": "low"}));
    }

    #[test]
    fn test_encode_new_task_includes_project() {
        let start = dates::parse_datetime("2024-03-01").unwrap();
        let item = NewItem {
            name: "API".into(),
            description: String::new(),
            status: Status::Todo,
            priority: Priority::Medium,
            start_time: start,
            end_time: start,
            tags: Vec::new(),
        };
        let body = encode_new_item(Collection::Tasks { project_id: 7 }, &item);
        assert_eq!(body["task_name"], "API");
        assert_eq!(body["project_id"], 7);
        assert_eq!(body["start_time"], "2024-03-01T00:00:00.000Z");
    }

    #[test]
    fn test_auth_payloads() {
        let login = serde_json::to_value(LoginRequest { account: "amy", password: "pw" }).unwrap();
        assert_eq!(login, json!({"account": "amy", "password": "pw"}));
        let register = RegisterRequest {
            username: "amy",
            password: "pw",
            email: Some("a@b.c"),
            phone: None,
        };
        let value = serde_json::to_value(register).unwrap();
        assert!(value.get("phone").is_none());
        let data: AuthData = decode_response(200, r#"{"code":"000-0000","data":{"token":"t"}}"#).unwrap();
        assert_eq!(data.token.as_deref(), Some("t"));
    }
}
