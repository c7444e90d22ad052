//! Shared integration-test server bootstrap helpers.

#![allow(dead_code)]

use axum_test::TestServer;
use chrono::{TimeZone, Utc};
use snippetbox_core::{ManualClock, DEFAULT_MAX_CONTENT_SIZE};
use snippetbox_server::{create_app, AppState, Config, Database, SnippetService, TeraRenderer};
use std::path::Path;
use std::sync::Arc;
use tempfile::TempDir;

pub(crate) fn test_config_for_dir(dir: &Path) -> Config {
    Config {
        port: 0,
        db_path: dir.join("test.db").to_str().expect("db path").to_string(),
        max_content_size: DEFAULT_MAX_CONTENT_SIZE,
        static_dir: dir.join("static").to_str().expect("static path").to_string(),
        template_dir: None,
    }
}

pub(crate) fn test_server_for_state(state: AppState) -> TestServer {
    TestServer::new(create_app(state)).expect("server")
}

pub(crate) fn embedded_renderer() -> Arc<TeraRenderer> {
    Arc::new(TeraRenderer::embedded().expect("renderer"))
}

/// Server over a fresh database whose clock the test controls.
pub(crate) fn setup_test_server() -> (TestServer, Arc<ManualClock>, TempDir) {
    let temp_dir = TempDir::new().expect("temp dir");
    let config = test_config_for_dir(temp_dir.path());
    let start = Utc
        .with_ymd_and_hms(2024, 1, 1, 12, 0, 0)
        .single()
        .expect("valid timestamp");
    let clock = Arc::new(ManualClock::new(start));
    let db = Database::with_clock(&config.db_path, clock.clone()).expect("open db");
    let state = AppState::new(config, &db, embedded_renderer());
    (test_server_for_state(state), clock, temp_dir)
}

/// Server whose service sits on top of an arbitrary store.
pub(crate) fn test_server_for_service(service: SnippetService) -> (TestServer, TempDir) {
    let temp_dir = TempDir::new().expect("temp dir");
    let config = test_config_for_dir(temp_dir.path());
    let state = AppState::with_service(config, service, embedded_renderer());
    (test_server_for_state(state), temp_dir)
}
