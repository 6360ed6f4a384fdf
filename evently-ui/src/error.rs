///! User-friendly error handling for the UI
///!
///! Provides error message formatting and display components

use leptos::*;
use serde::{Deserialize, Serialize};

/// API error response format (matches backend)
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ApiError {
    pub status: u16,
    pub error: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
}

impl ApiError {
    fn synthetic(status: u16, error: &str, message: impl Into<String>) -> Self {
        Self {
            status,
            error: error.to_string(),
            message: message.into(),
            details: None,
            timestamp: Some(chrono::Utc::now().to_rfc3339()),
        }
    }

    /// Request never reached the server
    pub fn network(message: impl Into<String>) -> Self {
        Self::synthetic(0, "NETWORK_ERROR", message)
    }

    /// Response body did not match the expected shape
    pub fn decode(message: impl Into<String>) -> Self {
        Self::synthetic(0, "DECODE_ERROR", message)
    }

    /// Non-OK response without a JSON error body
    pub fn from_status(status: u16) -> Self {
        let error = match status {
            401 => "AUTHENTICATION_FAILED",
            403 => "FORBIDDEN",
            404 => "NOT_FOUND",
            409 => "CONFLICT",
            429 => "RATE_LIMITED",
            503 => "SERVICE_UNAVAILABLE",
            500..=599 => "INTERNAL_ERROR",
            _ => "UNKNOWN_ERROR",
        };
        Self::synthetic(status, error, format!("Request failed with status {}", status))
    }

    /// Get user-friendly error message
    pub fn user_message(&self) -> String {
        match self.error.as_str() {
            "INVALID_CREDENTIALS" => "Incorrect email or password.".to_string(),
            "AUTHENTICATION_FAILED" => "Your session has expired. Please log in again.".to_string(),
            "FORBIDDEN" => "You need administrator access to view this page.".to_string(),
            "NOT_FOUND" => "The requested registration was not found.".to_string(),
            "VALIDATION_ERROR" => format!("Invalid input: {}", self.message),
            "CONFLICT" | "EMAIL_TAKEN" => self.format_conflict(),
            "RATE_LIMITED" => "Too many requests. Please wait a moment and try again.".to_string(),
            "NETWORK_ERROR" => "Could not reach the server. Check your connection.".to_string(),
            "SERVICE_UNAVAILABLE" => "The service is temporarily unavailable. Please try again later.".to_string(),
            "INTERNAL_ERROR" => "An unexpected error occurred. Please try again or contact support.".to_string(),
            _ => self.message.clone(),
        }
    }

    fn format_conflict(&self) -> String {
        if self.message.contains("email") || self.error == "EMAIL_TAKEN" {
            "An account with this email already exists.".to_string()
        } else {
            format!("Operation conflict: {}", self.message)
        }
    }

    /// Get severity level for UI styling
    pub fn severity(&self) -> ErrorSeverity {
        match self.status {
            400..=499 => ErrorSeverity::Warning,
            0 | 500..=599 => ErrorSeverity::Error,
            _ => ErrorSeverity::Info,
        }
    }

    /// Should show retry button
    pub fn is_retryable(&self) -> bool {
        matches!(
            self.error.as_str(),
            "RATE_LIMITED" | "SERVICE_UNAVAILABLE" | "INTERNAL_ERROR" | "NETWORK_ERROR"
        )
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({}): {}", self.error, self.status, self.message)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ErrorSeverity {
    Info,
    Warning,
    Error,
}

impl ErrorSeverity {
    pub fn class(&self) -> &'static str {
        match self {
            ErrorSeverity::Info => "alert-info",
            ErrorSeverity::Warning => "alert-warning",
            ErrorSeverity::Error => "alert-error",
        }
    }
}

/// Error display component
#[component]
pub fn ErrorAlert(
    /// Error to display
    error: ApiError,
    /// Callback for retry button
    #[prop(optional)]
    on_retry: Option<Callback<()>>,
    /// Callback for dismiss button
    #[prop(optional)]
    on_dismiss: Option<Callback<()>>,
) -> impl IntoView {
    let severity = error.severity();
    let message = error.user_message();
    let retry = on_retry.filter(|_| error.is_retryable());

    view! {
        <div class={format!("alert {}", severity.class())} role="alert">
            <div class="alert-content">
                <div class="alert-message">{message}</div>
                {error.details.clone().map(|details| view! {
                    <details class="alert-details">
                        <summary>"Technical details"</summary>
                        <code>{details}</code>
                    </details>
                })}
            </div>
            <div class="alert-actions">
                {retry.map(|on_retry| view! {
                    <button class="btn-secondary btn-sm" on:click=move |_| on_retry.call(())>
                        "Retry"
                    </button>
                })}
                {on_dismiss.map(|on_dismiss| view! {
                    <button class="btn-ghost btn-sm" on:click=move |_| on_dismiss.call(())>
                        "✕"
                    </button>
                })}
            </div>
        </div>
    }
}

/// Inline error message for form fields
#[component]
pub fn FieldError(
    /// Error message
    message: String,
) -> impl IntoView {
    view! {
        <div class="field-error">
            <span class="field-error-icon">"⚠️"</span>
            <span class="field-error-message">{message}</span>
        </div>
    }
}

/// Helper to extract error from reqwasm response
pub async fn extract_api_error(response: reqwasm::http::Response) -> ApiError {
    let status = response.status();
    match response.json::<ApiError>().await {
        Ok(error) => error,
        Err(_) => ApiError::from_status(status),
    }
}
