//! HTTP API Client
//!
//! Functions for communicating with the checklist REST API. Any non-2xx
//! response is an error, whatever its status code.

use gloo_net::http::{Request, RequestBuilder, Response};

use crate::state::global::Checklist;
use crate::state::session;

/// Default API base URL
pub const DEFAULT_API_BASE: &str = "http://localhost:8080";

/// Storage key that overrides the base URL
const API_URL_KEY: &str = "checklist_api_url";

/// Get the API base URL from local storage or use default
pub fn get_api_base() -> String {
    let url = session::read_item(API_URL_KEY).unwrap_or_else(|| DEFAULT_API_BASE.to_string());
    url.trim_end_matches('/').to_string()
}

// ============ Wire Types ============

#[derive(Debug, serde::Deserialize)]
struct Envelope<T> {
    data: T,
}

#[derive(Debug, serde::Deserialize)]
struct LoginData {
    #[serde(default)]
    token: Option<String>,
}

// ============ Helpers ============

fn encode(segment: &str) -> String {
    String::from(js_sys::encode_uri_component(segment))
}

fn checklist_url(checklist_id: &str) -> String {
    format!("{}/checklist/{}", get_api_base(), encode(checklist_id))
}

fn item_url(checklist_id: &str, item_id: &str) -> String {
    format!("{}/item/{}", checklist_url(checklist_id), encode(item_id))
}

/// Attach the stored bearer token
fn authorized(builder: RequestBuilder) -> Result<RequestBuilder, String> {
    let token = session::read_token().ok_or_else(|| "Not authenticated".to_string())?;
    Ok(builder.header("Authorization", &format!("Bearer {}", token)))
}

/// Turn a non-2xx response into an error message
async fn check(response: Response) -> Result<Response, String> {
    if response.ok() {
        return Ok(response);
    }

    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    Err(format!("HTTP error! status: {} {}", status, body))
}

// ============ API Functions ============

/// Log in and return the issued token
pub async fn login(username: &str, password: &str) -> Result<String, String> {
    #[derive(serde::Serialize)]
    struct LoginRequest<'a> {
        username: &'a str,
        password: &'a str,
    }

    let response = Request::post(&format!("{}/login", get_api_base()))
        .json(&LoginRequest { username, password })
        .map_err(|e| format!("Request build error: {}", e))?
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;

    let envelope: Envelope<LoginData> = check(response)
        .await?
        .json()
        .await
        .map_err(|e| format!("Parse error: {}", e))?;

    envelope
        .data
        .token
        .ok_or_else(|| "Login response did not contain a token".to_string())
}

/// Create an account
pub async fn register(username: &str, email: &str, password: &str) -> Result<(), String> {
    #[derive(serde::Serialize)]
    struct RegisterRequest<'a> {
        username: &'a str,
        email: &'a str,
        password: &'a str,
    }

    let response = Request::post(&format!("{}/register", get_api_base()))
        .json(&RegisterRequest {
            username,
            email,
            password,
        })
        .map_err(|e| format!("Request build error: {}", e))?
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;

    check(response).await?;
    Ok(())
}

/// Fetch every checklist of the signed-in user
pub async fn fetch_checklists() -> Result<Vec<Checklist>, String> {
    let response = authorized(Request::get(&format!("{}/checklist", get_api_base())))?
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;

    let envelope: Envelope<Vec<Checklist>> = check(response)
        .await?
        .json()
        .await
        .map_err(|e| format!("Parse error: {}", e))?;

    Ok(envelope.data)
}

pub async fn create_checklist(name: &str) -> Result<(), String> {
    #[derive(serde::Serialize)]
    struct NewChecklistRequest<'a> {
        name: &'a str,
    }

    let response = authorized(Request::post(&format!("{}/checklist", get_api_base())))?
        .json(&NewChecklistRequest { name })
        .map_err(|e| format!("Request build error: {}", e))?
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;

    check(response).await?;
    Ok(())
}

pub async fn delete_checklist(checklist_id: &str) -> Result<(), String> {
    let response = authorized(Request::delete(&checklist_url(checklist_id)))?
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;

    check(response).await?;
    Ok(())
}

pub async fn add_item(checklist_id: &str, item_name: &str) -> Result<(), String> {
    #[derive(serde::Serialize)]
    #[serde(rename_all = "camelCase")]
    struct NewItemRequest<'a> {
        item_name: &'a str,
    }

    let response = authorized(Request::post(&format!("{}/item", checklist_url(checklist_id))))?
        .json(&NewItemRequest { item_name })
        .map_err(|e| format!("Request build error: {}", e))?
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;

    check(response).await?;
    Ok(())
}

pub async fn delete_item(checklist_id: &str, item_id: &str) -> Result<(), String> {
    let response = authorized(Request::delete(&item_url(checklist_id, item_id)))?
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;

    check(response).await?;
    Ok(())
}

/// Flip an item's completion flag
pub async fn toggle_item(checklist_id: &str, item_id: &str) -> Result<(), String> {
    let response = authorized(Request::put(&item_url(checklist_id, item_id)))?
        .json(&serde_json::json!({}))
        .map_err(|e| format!("Request build error: {}", e))?
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;

    check(response).await?;
    Ok(())
}
