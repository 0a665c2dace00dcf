#![allow(dead_code)]

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Method, Request, StatusCode},
};
use chargehub::HubStorage;
use chargehub::bootstrap;
use chargehub::config::DatabaseConfig;
use chargehub::router::{HubState, hub_router};
use serde_json::{Value, json};
use std::{
    fs,
    path::{Path, PathBuf},
    sync::atomic::{AtomicU32, Ordering},
    time::{SystemTime, UNIX_EPOCH},
};
use tower::ServiceExt;

static COUNTER: AtomicU32 = AtomicU32::new(0);

/// Fresh, empty scratch directory unique to this call.
pub fn temp_dir(tag: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system time before UNIX_EPOCH")
        .as_nanos();
    let mut dir = std::env::temp_dir();
    dir.push(format!(
        "chargehub-{tag}-{}-{nanos}-{}",
        std::process::id(),
        COUNTER.fetch_add(1, Ordering::Relaxed)
    ));
    fs::create_dir_all(&dir).expect("failed to create temp dir");
    dir
}

pub fn schema_path() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("db_schema.sql")
}

pub fn db_config(dir: &Path) -> DatabaseConfig {
    DatabaseConfig {
        path: dir.join("database.db"),
        schema_path: schema_path(),
        ..DatabaseConfig::default()
    }
}

pub struct TestHub {
    pub dir: PathBuf,
    pub cfg: DatabaseConfig,
    pub storage: HubStorage,
    pub app: Router,
}

impl TestHub {
    pub async fn new(tag: &str) -> Self {
        let dir = temp_dir(tag);
        let cfg = db_config(&dir);
        let (storage, _) = bootstrap::ensure_database(&cfg)
            .await
            .expect("bootstrap failed");
        let app = hub_router(HubState::new(storage.clone()));
        Self {
            dir,
            cfg,
            storage,
            app,
        }
    }

    /// Send one request and decode the JSON body (`Null` when it is not JSON).
    pub async fn send(&self, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let (status, raw) = self.send_raw(method, uri, body).await;
        (status, serde_json::from_str(&raw).unwrap_or(Value::Null))
    }

    pub async fn send_raw(
        &self,
        method: Method,
        uri: &str,
        body: Option<Value>,
    ) -> (StatusCode, String) {
        let mut builder = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(v) => {
                builder = builder.header("content-type", "application/json");
                Body::from(v.to_string())
            }
            None => Body::empty(),
        };
        let resp = self
            .app
            .clone()
            .oneshot(builder.body(body).expect("failed to build request"))
            .await
            .expect("request failed");
        let status = resp.status();
        let bytes = to_bytes(resp.into_body(), usize::MAX)
            .await
            .expect("failed to read response body");
        let text = String::from_utf8(bytes.to_vec()).expect("response body was not utf-8");
        (status, text)
    }

    pub async fn create_user(&self, email: &str) -> Value {
        let (status, body) = self
            .send(
                Method::POST,
                "/user_info",
                Some(json!({"email": email, "first_name": "Ada", "last_name": "Lovelace"})),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "{body}");
        body["data"].clone()
    }

    pub async fn create_connector(&self, name: &str) -> Value {
        let (status, body) = self
            .send(
                Method::POST,
                "/connector_type",
                Some(json!({"name_connector": name, "output_current": "DC", "max_power_kw": 150.0})),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "{body}");
        body["data"].clone()
    }

    pub async fn create_charger(&self, connector_id: i64, rate: f64) -> Value {
        let (status, body) = self
            .send(
                Method::POST,
                "/charger",
                Some(json!({
                    "name": "Harbour Car Park",
                    "address": "1 Quay St",
                    "latitude": -33.86,
                    "longitude": 151.21,
                    "id_connector_type": connector_id,
                    "rate_current": rate
                })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "{body}");
        body["data"].clone()
    }

    pub async fn create_vehicle(&self, email: &str, sn: &str, connector_id: i64) -> Value {
        let (status, body) = self
            .send(
                Method::POST,
                "/vehicle_info",
                Some(json!({
                    "email": email,
                    "name": "Model 3",
                    "vehicle_sn": sn,
                    "id_connector_type": connector_id,
                    "battery_capacity_kwh": 75.0
                })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "{body}");
        body["data"].clone()
    }
}

impl Drop for TestHub {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.dir);
    }
}
