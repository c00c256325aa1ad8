#![allow(dead_code)]

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use logitrack::config::EnvironmentConfig;
use logitrack::{create_router, AppState};

pub struct TestApp {
    pub state: AppState,
    router: Router,
}

pub struct TestResponse {
    pub status: StatusCode,
    pub text: String,
    pub body: Value,
}

impl TestApp {
    pub fn new() -> Self {
        let config = EnvironmentConfig {
            bcrypt_cost: 4,
            ..EnvironmentConfig::default()
        };
        let state = AppState::with_memory_store(config);
        let router = create_router(state.clone());
        Self { state, router }
    }

    pub async fn request(&self, method: Method, uri: &str, token: Option<&str>, body: Option<Value>) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let text = String::from_utf8(bytes.to_vec()).unwrap();
        let body = serde_json::from_str(&text).unwrap_or(Value::Null);

        TestResponse { status, text, body }
    }

    pub async fn get(&self, uri: &str, token: &str) -> TestResponse {
        self.request(Method::GET, uri, Some(token), None).await
    }

    pub async fn post(&self, uri: &str, token: &str, body: Value) -> TestResponse {
        self.request(Method::POST, uri, Some(token), Some(body)).await
    }

    pub async fn put(&self, uri: &str, token: &str, body: Value) -> TestResponse {
        self.request(Method::PUT, uri, Some(token), Some(body)).await
    }

    pub async fn delete(&self, uri: &str, token: &str) -> TestResponse {
        self.request(Method::DELETE, uri, Some(token), None).await
    }

    /// Registers an account and returns (token, user id)
    pub async fn register(&self, name: &str, email: &str, role: &str) -> (String, String) {
        let response = self
            .request(
                Method::POST,
                "/api/auth/register",
                None,
                Some(json!({
                    "name": name,
                    "email": email,
                    "password": "secret123",
                    "role": role,
                })),
            )
            .await;
        assert_eq!(response.status, StatusCode::OK, "{}", response.text);

        let data = &response.body["data"];
        (
            data["token"].as_str().unwrap().to_string(),
            data["user"]["id"].as_str().unwrap().to_string(),
        )
    }

    pub async fn add_vehicle(&self, admin_token: &str, name: &str) -> String {
        let response = self.post("/api/vehicles", admin_token, json!({ "name": name })).await;
        assert_eq!(response.status, StatusCode::OK, "{}", response.text);
        response.body["data"]["id"].as_str().unwrap().to_string()
    }

    /// Creates a job and returns its id
    pub async fn request_job(&self, token: &str, date: &str, slot: &str) -> String {
        let response = self
            .post(
                "/api/jobs",
                token,
                json!({
                    "purpose": "Cement bags",
                    "from_location": "Depot",
                    "to_location": "Site 9",
                    "date": date,
                    "slot": slot,
                    "priority": "HIGH",
                }),
            )
            .await;
        assert_eq!(response.status, StatusCode::OK, "{}", response.text);
        response.body["data"]["id"].as_str().unwrap().to_string()
    }

    pub async fn approve(&self, admin_token: &str, job_id: &str, driver_id: &str, vehicle_id: &str) -> TestResponse {
        self.post(
            &format!("/api/jobs/{}/approve", job_id),
            admin_token,
            json!({ "driver_id": driver_id, "vehicle_id": vehicle_id, "remark": "Gate 3" }),
        )
        .await
    }

    pub async fn user_status(&self, admin_token: &str, user_id: &str) -> String {
        let response = self.get("/api/users", admin_token).await;
        response.body["data"]
            .as_array()
            .unwrap()
            .iter()
            .find(|u| u["id"] == user_id)
            .map(|u| u["status"].as_str().unwrap().to_string())
            .unwrap()
    }
}
