//! Wire translation for the user contract.
//!
//! Identities arrive as path strings and are parsed here; a malformed id is a
//! caller error and never reaches the service.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use models::{NewUser, UpdateUser, User};
use serde::Deserialize;
use uuid::Uuid;

use super::ServerState;
use crate::errors::ApiError;

/// POST body. A missing field reads as `""` and is judged by the service.
#[derive(Debug, Default, Deserialize)]
pub struct CreateUserRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
}

/// PATCH body. A missing key leaves the field unchanged; `""` is rejected.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateUserRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

fn parse_id(raw: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw).map_err(|_| ApiError::invalid_id(raw))
}

pub async fn list_users(State(state): State<ServerState>) -> Result<Json<Vec<User>>, ApiError> {
    Ok(Json(state.users.get_all().await?))
}

pub async fn create_user(
    State(state): State<ServerState>,
    payload: Result<Json<CreateUserRequest>, JsonRejection>,
) -> Result<Json<User>, ApiError> {
    let Json(input) = payload?;
    let created = state.users.create(NewUser::new(input.name, input.email)).await?;
    Ok(Json(created))
}

pub async fn get_user(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> Result<Json<User>, ApiError> {
    let id = parse_id(&id)?;
    Ok(Json(state.users.get_by_id(id).await?))
}

pub async fn update_user(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateUserRequest>, JsonRejection>,
) -> Result<Json<User>, ApiError> {
    let id = parse_id(&id)?;
    let Json(input) = payload?;
    let update = UpdateUser { id, name: input.name, email: input.email };
    Ok(Json(state.users.update(update).await?))
}

pub async fn delete_user(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = parse_id(&id)?;
    state.users.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::{to_bytes, Body},
        http::Request,
        Router,
    };
    use serde_json::{json, Value};
    use service::{InMemoryUserRepository, UserManager};
    use tower::ServiceExt;
    use tower_http::cors::CorsLayer;

    use super::*;
    use crate::routes::build_router;

    fn app() -> Router {
        let svc = UserManager::new(Arc::new(InMemoryUserRepository::default()));
        build_router(ServerState::new(Arc::new(svc)), CorsLayer::very_permissive())
    }

    async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> anyhow::Result<(StatusCode, Value)> {
        let builder = Request::builder().method(method).uri(uri);
        let req = match body {
            Some(b) => builder.header("content-type", "application/json").body(Body::from(serde_json::to_vec(&b)?))?,
            None => builder.body(Body::empty())?,
        };
        let resp = app.clone().oneshot(req).await?;
        let status = resp.status();
        let bytes = to_bytes(resp.into_body(), usize::MAX).await?;
        let value = if bytes.is_empty() { Value::Null } else { serde_json::from_slice(&bytes)? };
        Ok((status, value))
    }

    #[tokio::test]
    async fn crud_over_http() -> anyhow::Result<()> {
        let app = app();

        let (status, created) = send(&app, "POST", "/users", Some(json!({"name": "Ann", "email": "ann@x.com"}))).await?;
        assert_eq!(status, StatusCode::OK);
        let id = created["id"].as_str().unwrap_or_default().to_string();
        assert!(Uuid::parse_str(&id).is_ok());

        let (status, list) = send(&app, "GET", "/users", None).await?;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(list.as_array().map(Vec::len), Some(1));

        let (status, updated) = send(&app, "PATCH", &format!("/users/{id}"), Some(json!({"email": "ann2@x.com"}))).await?;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(updated["name"], "Ann");
        assert_eq!(updated["email"], "ann2@x.com");

        let (status, fetched) = send(&app, "GET", &format!("/users/{id}"), None).await?;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(fetched, updated);

        let (status, _) = send(&app, "DELETE", &format!("/users/{id}"), None).await?;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (status, body) = send(&app, "GET", &format!("/users/{id}"), None).await?;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["code"], 1004);
        Ok(())
    }

    #[tokio::test]
    async fn validation_maps_to_bad_request() -> anyhow::Result<()> {
        let app = app();
        let (status, body) = send(&app, "POST", "/users", Some(json!({"name": "", "email": "a@b.com"}))).await?;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "name cannot be empty");

        let (status, body) = send(&app, "POST", "/users", Some(json!({"name": "A", "email": "nope"}))).await?;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "invalid email format");
        Ok(())
    }

    #[tokio::test]
    async fn missing_create_fields_go_through_validation() -> anyhow::Result<()> {
        let app = app();
        let (status, body) = send(&app, "POST", "/users", Some(json!({"name": "Ann"}))).await?;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "email cannot be empty");
        assert_eq!(body["code"], 1002);

        let (status, body) = send(&app, "POST", "/users", Some(json!({"email": "ann@x.com"}))).await?;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], 1001);

        let (status, body) = send(&app, "POST", "/users", Some(json!({}))).await?;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "name cannot be empty");

        assert_eq!(send(&app, "GET", "/users", None).await?.1, json!([]));
        Ok(())
    }

    #[tokio::test]
    async fn malformed_body_keeps_error_shape() -> anyhow::Result<()> {
        let app = app();
        let req = Request::builder()
            .method("POST")
            .uri("/users")
            .header("content-type", "application/json")
            .body(Body::from("{not json"))?;
        let resp = app.clone().oneshot(req).await?;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = serde_json::from_slice(&to_bytes(resp.into_body(), usize::MAX).await?)?;
        assert_eq!(body["code"], crate::errors::INVALID_BODY_CODE);
        assert!(body["error"].as_str().is_some_and(|m| !m.is_empty()));

        let (status, body) = send(&app, "POST", "/users", Some(json!({"name": 7, "email": "a@b.com"}))).await?;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["code"], crate::errors::INVALID_BODY_CODE);
        Ok(())
    }

    #[tokio::test]
    async fn patch_distinguishes_absent_from_empty() -> anyhow::Result<()> {
        let app = app();
        let (_, created) = send(&app, "POST", "/users", Some(json!({"name": "Ann", "email": "ann@x.com"}))).await?;
        let uri = format!("/users/{}", created["id"].as_str().unwrap_or_default());

        let (status, same) = send(&app, "PATCH", &uri, Some(json!({}))).await?;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(same, created);

        let (status, body) = send(&app, "PATCH", &uri, Some(json!({"name": ""}))).await?;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "name cannot be empty");
        Ok(())
    }

    #[tokio::test]
    async fn malformed_id_rejected_before_service() -> anyhow::Result<()> {
        let app = app();
        for (method, body) in [("GET", None), ("DELETE", None), ("PATCH", Some(json!({"name": "X"})))] {
            let (status, resp) = send(&app, method, "/users/not-a-uuid", body).await?;
            assert_eq!(status, StatusCode::BAD_REQUEST, "{method}");
            assert_eq!(resp["code"], crate::errors::INVALID_ID_CODE);
        }
        Ok(())
    }

    #[tokio::test]
    async fn missing_user_is_not_found() -> anyhow::Result<()> {
        let app = app();
        let uri = format!("/users/{}", Uuid::new_v4());
        assert_eq!(send(&app, "GET", &uri, None).await?.0, StatusCode::NOT_FOUND);
        assert_eq!(send(&app, "DELETE", &uri, None).await?.0, StatusCode::NOT_FOUND);
        assert_eq!(send(&app, "PATCH", &uri, Some(json!({"name": "X"}))).await?.0, StatusCode::NOT_FOUND);
        Ok(())
    }

    #[tokio::test]
    async fn health_ok() -> anyhow::Result<()> {
        let (status, body) = send(&app(), "GET", "/health", None).await?;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
        Ok(())
    }
}
