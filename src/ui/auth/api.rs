//! Account REST API calls
//!
//! Appwrite-style endpoints under [`BackendConfig::endpoint`]:
//! - POST /account - Create an account
//! - POST /databases/{db}/collections/{users}/documents - Store the user profile
//! - POST /account/sessions/email - Create a session (sets the session cookie)
//! - GET /account - Current user of the session

use serde::{Deserialize, Serialize};

use crate::core::BackendConfig;
use crate::core::validation::{SigninInput, SignupInput};

/// Let the backend generate the document or account id
#[cfg(any(not(feature = "ssr"), test))]
const UNIQUE_ID: &str = "unique()";

/// Account API error types
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ClientError {
    #[error("Missing configuration: {0}")]
    NotConfigured(&'static str),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Request failed ({status}): {message}")]
    Status { status: u16, message: String },

    #[error("Invalid response: {0}")]
    Decode(String),
}

/// Account as returned by the account API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    #[serde(rename = "$id")]
    pub id: String,
    pub name: String,
    pub email: String,
}

/// Session as returned by the account API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    #[serde(rename = "$id")]
    pub id: String,
    #[serde(rename = "userId")]
    pub user_id: String,
}

/// Create account request
#[derive(Debug, Serialize)]
#[cfg(any(not(feature = "ssr"), test))]
struct CreateAccountRequest<'a> {
    #[serde(rename = "userId")]
    user_id: &'a str,
    email: &'a str,
    password: &'a str,
    name: &'a str,
}

/// Create session request
#[derive(Debug, Serialize)]
#[cfg(any(not(feature = "ssr"), test))]
struct CreateSessionRequest<'a> {
    email: &'a str,
    password: &'a str,
}

/// Profile document stored next to the account
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserProfile {
    #[serde(rename = "accountId")]
    pub account_id: String,
    pub name: String,
    pub email: String,
    pub username: String,
    #[serde(rename = "imageUrl")]
    pub image_url: String,
}

#[derive(Debug, Serialize)]
#[cfg(any(not(feature = "ssr"), test))]
struct CreateDocumentRequest<'a, T> {
    #[serde(rename = "documentId")]
    document_id: &'a str,
    data: &'a T,
}

/// Error body of the account API
#[derive(Debug, Deserialize)]
#[cfg(any(not(feature = "ssr"), test))]
struct ApiErrorBody {
    message: String,
}

impl UserProfile {
    /// Profile for a freshly created account
    pub fn new(account: &Account, input: &SignupInput, image_url: String) -> Self {
        Self {
            account_id: account.id.clone(),
            name: input.name().to_string(),
            email: input.email().to_string(),
            username: input.username().to_string(),
            image_url,
        }
    }
}

/// Initials avatar URL; `encoded_name` must already be URI-encoded
pub fn avatar_url(config: &BackendConfig, encoded_name: &str) -> String {
    let mut url = format!(
        "{}?name={}",
        config.url("avatars/initials"),
        encoded_name
    );
    if let Some(project) = &config.project_id {
        url.push_str("&project=");
        url.push_str(project);
    }
    url
}

#[cfg(not(feature = "ssr"))]
fn builder(
    builder: gloo_net::http::RequestBuilder,
    config: &BackendConfig,
) -> Result<gloo_net::http::RequestBuilder, ClientError> {
    let project = config
        .project_id
        .as_deref()
        .ok_or(ClientError::NotConfigured("project id"))?;

    Ok(builder
        .header("X-Appwrite-Project", project)
        .credentials(web_sys::RequestCredentials::Include))
}

#[cfg(not(feature = "ssr"))]
async fn read<T: serde::de::DeserializeOwned>(
    response: gloo_net::http::Response,
) -> Result<T, ClientError> {
    if !response.ok() {
        let status = response.status();
        let message = response
            .json::<ApiErrorBody>()
            .await
            .map(|body| body.message)
            .unwrap_or_else(|_| response.status_text());
        return Err(ClientError::Status { status, message });
    }

    response
        .json::<T>()
        .await
        .map_err(|e| ClientError::Decode(e.to_string()))
}

/// Create the account, then its profile document when a profile store is
/// configured.
#[cfg(not(feature = "ssr"))]
pub async fn create_account(
    config: &BackendConfig,
    input: &SignupInput,
) -> Result<Account, ClientError> {
    use gloo_net::http::Request;

    let request = CreateAccountRequest {
        user_id: UNIQUE_ID,
        email: input.email(),
        password: input.password(),
        name: input.name(),
    };

    let response = builder(Request::post(&config.url("account")), config)?
        .json(&request)
        .map_err(|e| ClientError::Decode(e.to_string()))?
        .send()
        .await
        .map_err(|e| ClientError::Network(e.to_string()))?;

    let account: Account = read(response).await?;

    if let (Some(database), Some(collection)) = (&config.database_id, &config.user_collection_id)
    {
        let encoded_name: String = js_sys::encode_uri_component(input.name()).into();
        let profile = UserProfile::new(&account, input, avatar_url(config, &encoded_name));
        let path = format!("databases/{}/collections/{}/documents", database, collection);

        let response = builder(Request::post(&config.url(&path)), config)?
            .json(&CreateDocumentRequest {
                document_id: UNIQUE_ID,
                data: &profile,
            })
            .map_err(|e| ClientError::Decode(e.to_string()))?
            .send()
            .await
            .map_err(|e| ClientError::Network(e.to_string()))?;

        read::<serde_json::Value>(response).await?;
    }

    Ok(account)
}

#[cfg(feature = "ssr")]
pub async fn create_account(
    _config: &BackendConfig,
    _input: &SignupInput,
) -> Result<Account, ClientError> {
    Err(ClientError::Network(
        "Account creation not available on server".to_string(),
    ))
}

/// Create an email/password session
#[cfg(not(feature = "ssr"))]
pub async fn create_session(
    config: &BackendConfig,
    credentials: &SigninInput,
) -> Result<Session, ClientError> {
    use gloo_net::http::Request;

    let request = CreateSessionRequest {
        email: credentials.email(),
        password: credentials.password(),
    };

    let response = builder(Request::post(&config.url("account/sessions/email")), config)?
        .json(&request)
        .map_err(|e| ClientError::Decode(e.to_string()))?
        .send()
        .await
        .map_err(|e| ClientError::Network(e.to_string()))?;

    read(response).await
}

#[cfg(feature = "ssr")]
pub async fn create_session(
    _config: &BackendConfig,
    _credentials: &SigninInput,
) -> Result<Session, ClientError> {
    Err(ClientError::Network(
        "Sign in not available on server".to_string(),
    ))
}

/// Fetch the account of the current session
#[cfg(not(feature = "ssr"))]
pub async fn fetch_current_account(config: &BackendConfig) -> Result<Account, ClientError> {
    use gloo_net::http::Request;

    let response = builder(Request::get(&config.url("account")), config)?
        .send()
        .await
        .map_err(|e| ClientError::Network(e.to_string()))?;

    read(response).await
}

#[cfg(feature = "ssr")]
pub async fn fetch_current_account(_config: &BackendConfig) -> Result<Account, ClientError> {
    Err(ClientError::Network(
        "Session lookup not available on server".to_string(),
    ))
}
