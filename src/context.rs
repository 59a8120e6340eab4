//! Application Context
//!
//! Session and configuration provided via Leptos Context API. The session is
//! read from storage once at startup; after that this context is the only
//! source of truth for "who is signed in".

use leptos::prelude::*;
use taskline_core::{ItemId, Session};

use crate::commands::{ApiClient, ProjectsApi, TasksApi};
use crate::config::AppConfig;
use crate::storage;

/// App-wide state provided via context
#[derive(Clone, Copy)]
pub struct AppContext {
    pub session: RwSignal<Session>,
    config: StoredValue<AppConfig>,
}

impl AppContext {
    pub fn new(session: Session, config: AppConfig) -> Self {
        Self {
            session: RwSignal::new(session),
            config: StoredValue::new(config),
        }
    }

    pub fn config(&self) -> AppConfig {
        self.config.get_value()
    }

    /// Client carrying the current token; built per call so it never goes stale
    pub fn api(&self) -> ApiClient {
        let token = self.session.with_untracked(|s| s.token().map(str::to_string));
        let base_url = self.config.with_value(|cfg| cfg.api_base_url.clone());
        ApiClient::new(base_url, token)
    }

    pub fn projects_api(&self) -> ProjectsApi {
        ProjectsApi::new(self.api())
    }

    pub fn tasks_api(&self, project_id: ItemId) -> TasksApi {
        TasksApi::new(self.api(), project_id)
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.with(|s| s.is_authenticated())
    }

    pub fn sign_in(&self, token: String) {
        storage::save_token(&token);
        self.session.update(|s| s.sign_in(token));
        log::info!(
            "[APP] signed in as {}",
            self.session.with_untracked(|s| s.username().unwrap_or("?").to_string())
        );
    }

    pub fn sign_out(&self) {
        storage::clear_token();
        self.session.update(|s| s.sign_out());
        log::info!("[APP] signed out");
    }
}

pub fn use_app_context() -> AppContext {
    expect_context::<AppContext>()
}
