use std::time::Duration;

use axum::{
    body::Body,
    http::{Request, Response},
};
use serde_json::Value;

use shared_config::AppConfig;

pub struct TestConfig {
    pub environment: String,
    pub database_url: String,
    pub cpu_sample_interval: Duration,
}

impl Default for TestConfig {
    fn default() -> Self {
        Self {
            environment: "test".to_string(),
            database_url: "sqlite::memory:".to_string(),
            cpu_sample_interval: Duration::from_millis(200),
        }
    }
}

impl TestConfig {
    pub fn to_app_config(&self) -> AppConfig {
        AppConfig {
            environment: self.environment.clone(),
            database_url: self.database_url.clone(),
            database_max_connections: 1,
            host: "127.0.0.1".to_string(),
            port: 0,
            cpu_sample_interval: self.cpu_sample_interval,
        }
    }
}

pub struct TestRequests;

impl TestRequests {
    pub fn get(uri: &str) -> Request<Body> {
        Request::builder()
            .method("GET")
            .uri(uri)
            .body(Body::empty())
            .unwrap()
    }

    pub fn post_json(uri: &str, body: &Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }
}

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}
