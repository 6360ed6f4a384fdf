//! API client for communicating with the registration backend

use evently_common::auth::{AccountSummary, LoginRequest, LoginResponse, RegisterRequest};
use evently_common::{Registrant, RegistrationStatus};
use gloo_storage::{LocalStorage, Storage};
use reqwasm::http::{Request, RequestCredentials, Response};
use serde::{de::DeserializeOwned, Serialize};

use crate::config::config;
use crate::error::{extract_api_error, ApiError};

/// Bearer token saved by the last successful login
pub fn stored_token() -> Option<String> {
    LocalStorage::raw()
        .get_item(&config().token_key)
        .ok()
        .flatten()
        .filter(|token| !token.trim().is_empty())
}

pub fn store_token(token: &str) {
    if let Err(e) = LocalStorage::raw().set_item(&config().token_key, token) {
        leptos::logging::warn!("Failed to persist auth token: {:?}", e);
    }
}

pub fn clear_token() {
    let _ = LocalStorage::raw().remove_item(&config().token_key);
}

fn authorized(request: Request) -> Request {
    let request = request.credentials(RequestCredentials::Include);
    match stored_token() {
        Some(token) => request.header("Authorization", &format!("Bearer {}", token)),
        None => request,
    }
}

async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    if response.ok() {
        response.json().await.map_err(|e| ApiError::decode(e.to_string()))
    } else {
        Err(extract_api_error(response).await)
    }
}

/// Generic JSON fetch helper
pub async fn fetch_json<T: DeserializeOwned>(path: &str) -> Result<T, ApiError> {
    let response = authorized(Request::get(&config().endpoint(path)))
        .send()
        .await
        .map_err(|e| ApiError::network(e.to_string()))?;

    read_json(response).await
}

async fn send_json<T: DeserializeOwned, B: Serialize>(request: Request, body: &B) -> Result<T, ApiError> {
    let body = serde_json::to_string(body).map_err(|e| ApiError::decode(e.to_string()))?;
    let response = authorized(request)
        .header("Content-Type", "application/json")
        .body(body)
        .send()
        .await
        .map_err(|e| ApiError::network(e.to_string()))?;

    read_json(response).await
}

/// POST request helper
pub async fn post_json<T: DeserializeOwned, B: Serialize>(path: &str, body: &B) -> Result<T, ApiError> {
    send_json(Request::post(&config().endpoint(path)), body).await
}

/// PATCH request helper
pub async fn patch_json<T: DeserializeOwned, B: Serialize>(path: &str, body: &B) -> Result<T, ApiError> {
    send_json(Request::patch(&config().endpoint(path)), body).await
}

/// Log in and persist the returned token
pub async fn login(email: &str, password: &str) -> Result<LoginResponse, ApiError> {
    let request = LoginRequest {
        email: email.trim().to_string(),
        password: password.to_string(),
    };

    let response: LoginResponse = post_json("/api/auth/login", &request).await?;
    store_token(&response.token);
    Ok(response)
}

/// Create a new account
pub async fn register(request: &RegisterRequest) -> Result<AccountSummary, ApiError> {
    post_json("/api/auth/register", request).await
}

/// Account owning the stored token
pub async fn current_user() -> Result<AccountSummary, ApiError> {
    fetch_json("/api/auth/me").await
}

/// All registrations (admin only)
pub async fn get_registrations() -> Result<Vec<Registrant>, ApiError> {
    fetch_json("/api/admin/registrations").await
}

/// Approve or reject a registration (admin only)
pub async fn update_registration_status(id: &str, status: RegistrationStatus) -> Result<Registrant, ApiError> {
    #[derive(Serialize)]
    struct StatusUpdate {
        status: RegistrationStatus,
    }

    patch_json(
        &format!("/api/admin/registrations/{}/status", urlencoding::encode(id)),
        &StatusUpdate { status },
    )
    .await
}
