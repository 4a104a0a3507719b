//! In-memory stores and request helpers for driving the router without a
//! database.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::{HeaderMap, Request, StatusCode, header};
use chrono::Utc;
use http_body_util::BodyExt;
use schooldesk::router::init_router;
use schooldesk::state::AppState;
use schooldesk_auth::{AccessGate, RouteAccessTable, Session, TokenService};
use schooldesk_config::{CookieConfig, CorsConfig, JwtConfig, SESSION_COOKIE_NAME};
use schooldesk_core::{AppError, Role};
use schooldesk_db::{CredentialStore, UserCredentials};
use schooldesk_query::eval::{compare, matches, scalar_text, values_at};
use schooldesk_query::{EntityKind, FilterExpression, QueryDescriptor, Record, RecordStore};
use serde_json::Value;
use tower::ServiceExt;
use uuid::Uuid;

pub const TEST_SECRET: &str = "test-secret-key-for-integration-tests";

#[derive(Default)]
pub struct MemoryRecordStore {
    records: Mutex<Vec<(EntityKind, Record)>>,
}

impl MemoryRecordStore {
    pub fn insert(&self, entity: EntityKind, data: Value) -> Record {
        let now = Utc::now();
        let record = Record {
            id: Uuid::new_v4(),
            data,
            created_at: now,
            updated_at: now,
        };
        self.records
            .lock()
            .unwrap()
            .push((entity, record.clone()));
        record
    }

    fn matching(&self, entity: EntityKind, filter: &FilterExpression) -> Vec<Record> {
        self.records
            .lock()
            .unwrap()
            .iter()
            .filter(|(kind, record)| *kind == entity && matches(filter, &record.data))
            .map(|(_, record)| record.clone())
            .collect()
    }
}

#[async_trait]
impl RecordStore for MemoryRecordStore {
    async fn find(
        &self,
        entity: EntityKind,
        query: &QueryDescriptor,
    ) -> Result<Vec<Record>, AppError> {
        let mut rows = self.matching(entity, &query.where_clause);
        if let Some(sort) = &query.order_by {
            rows.sort_by(|a, b| compare(sort, &a.data, &b.data));
        }
        Ok(rows
            .into_iter()
            .skip(query.offset as usize)
            .take(query.limit as usize)
            .collect())
    }

    async fn count(&self, entity: EntityKind, filter: &FilterExpression) -> Result<i64, AppError> {
        Ok(self.matching(entity, filter).len() as i64)
    }

    async fn distinct_values(
        &self,
        entity: EntityKind,
        field: &str,
        filter: &FilterExpression,
    ) -> Result<Vec<String>, AppError> {
        let mut values: Vec<String> = self
            .matching(entity, filter)
            .iter()
            .flat_map(|record| {
                values_at(&record.data, field)
                    .into_iter()
                    .filter_map(scalar_text)
                    .collect::<Vec<_>>()
            })
            .collect();
        values.sort();
        values.dedup();
        Ok(values)
    }

    async fn create(&self, entity: EntityKind, data: Value) -> Result<Record, AppError> {
        Ok(self.insert(entity, data))
    }

    async fn update(
        &self,
        entity: EntityKind,
        id: Uuid,
        data: Value,
    ) -> Result<Option<Record>, AppError> {
        let mut records = self.records.lock().unwrap();
        let updated = records
            .iter_mut()
            .find(|(kind, record)| *kind == entity && record.id == id)
            .map(|(_, record)| {
                record.data = data;
                record.updated_at = Utc::now();
                record.clone()
            });
        Ok(updated)
    }

    async fn delete(&self, entity: EntityKind, id: Uuid) -> Result<bool, AppError> {
        let mut records = self.records.lock().unwrap();
        let before = records.len();
        records.retain(|(kind, record)| !(*kind == entity && record.id == id));
        Ok(records.len() < before)
    }
}

#[derive(Default)]
pub struct MemoryCredentialStore {
    users: Mutex<Vec<UserCredentials>>,
}

impl MemoryCredentialStore {
    /// Adds a user with a cheap bcrypt hash of `password`.
    pub fn add_user(&self, username: &str, password: &str, role: Role) -> UserCredentials {
        let user = UserCredentials {
            id: Uuid::new_v4(),
            username: username.to_string(),
            password_hash: bcrypt::hash(password, 4).unwrap(),
            role,
        };
        self.users.lock().unwrap().push(user.clone());
        user
    }
}

#[async_trait]
impl CredentialStore for MemoryCredentialStore {
    async fn find_user(
        &self,
        username: &str,
        role: Role,
    ) -> Result<Option<UserCredentials>, AppError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|user| user.username == username && user.role == role)
            .cloned())
    }

    async fn create_user(
        &self,
        username: &str,
        password_hash: &str,
        role: Role,
    ) -> Result<UserCredentials, AppError> {
        let user = UserCredentials {
            id: Uuid::new_v4(),
            username: username.to_string(),
            password_hash: password_hash.to_string(),
            role,
        };
        self.users.lock().unwrap().push(user.clone());
        Ok(user)
    }
}

pub fn get_test_jwt_config() -> JwtConfig {
    JwtConfig {
        secret: TEST_SECRET.to_string(),
        session_ttl_secs: 3600,
    }
}

pub struct TestApp {
    pub state: AppState,
    pub records: Arc<MemoryRecordStore>,
    pub users: Arc<MemoryCredentialStore>,
}

impl TestApp {
    pub fn new() -> Self {
        let jwt_config = get_test_jwt_config();
        let records = Arc::new(MemoryRecordStore::default());
        let users = Arc::new(MemoryCredentialStore::default());

        let state = AppState {
            gate: Arc::new(AccessGate::new(
                TokenService::new(&jwt_config),
                RouteAccessTable::default(),
            )),
            store: records.clone(),
            credentials: users.clone(),
            cookie_config: CookieConfig {
                name: SESSION_COOKIE_NAME,
                secure: false,
                max_age_secs: jwt_config.session_ttl_secs,
            },
            cors_config: CorsConfig {
                allowed_origins: vec!["http://localhost:3000".to_string()],
            },
        };

        Self {
            state,
            records,
            users,
        }
    }

    pub fn router(&self) -> Router {
        init_router(self.state.clone(), None)
    }

    /// Session cookie value for a signed-in `role` user with id `user_id`.
    pub fn token_for(&self, role: Role, user_id: &str) -> String {
        let session = Session::new(user_id, format!("{role}-user"), role, 3600);
        self.state.tokens().issue(&session).unwrap()
    }

    pub async fn get(&self, uri: &str, token: Option<&str>) -> TestResponse {
        self.send("GET", uri, token, None).await
    }

    pub async fn send(
        &self,
        method: &str,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::COOKIE, format!("{SESSION_COOKIE_NAME}={token}"));
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(serde_json::to_vec(&body).unwrap()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router().oneshot(request).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

        TestResponse {
            status,
            headers,
            body,
        }
    }
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
}

impl TestResponse {
    pub fn location(&self) -> Option<&str> {
        self.headers
            .get(header::LOCATION)
            .and_then(|value| value.to_str().ok())
    }

    pub fn set_cookie(&self) -> Option<&str> {
        self.headers
            .get(header::SET_COOKIE)
            .and_then(|value| value.to_str().ok())
    }

    /// Ids (`data.id`) of the records in a list response, in order.
    pub fn record_ids(&self) -> Vec<String> {
        self.body["data"]
            .as_array()
            .map(|rows| {
                rows.iter()
                    .filter_map(|row| row["data"]["id"].as_str().map(str::to_string))
                    .collect()
            })
            .unwrap_or_default()
    }
}
