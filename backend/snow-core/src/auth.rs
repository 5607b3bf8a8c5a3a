//! OAuth-style token acquisition against the ServiceNow instance.
//!
//! One token per process run; no expiry tracking, callers
//! re-authenticate on the next run.

use crate::context::{CrContext, keys};
use crate::error::auth::AuthError;
use crate::error::context::ContextError;
use crate::retry::{RequestBody, RetryClient};

use common::RedactedSecret;

use log::info;
use reqwest::Method;
use reqwest::header::HeaderMap;
use serde_json::Value;
use url::form_urlencoded::Serializer as FormSerializer;

/// Fixed auth path appended to the instance base URL.
pub const TOKEN_ENDPOINT: &str = "/oauth_token.do";

/// The configured API URL is truncated at this marker to find the
/// instance base.
const API_PATH_MARKER: &str = "/api/";

/// Bearer token returned by the token endpoint.
#[derive(Debug, Clone)]
pub struct Token {
    pub token_type: String,
    pub access_token: String,
}

impl Token {
    /// `Authorization` header value for subsequent API calls.
    pub fn authorization_header(&self) -> String {
        format!("{} {}", self.token_type, self.access_token)
    }
}

/// The five credential fields the token grant requires.
#[derive(Debug)]
pub struct Credentials {
    pub grant_type: String,
    pub client_id: String,
    pub client_secret: RedactedSecret,
    pub username: String,
    pub password: RedactedSecret,
}

impl Credentials {
    /// Pull credentials out of the context, failing with the specific
    /// missing key.
    pub fn from_context(context: &CrContext) -> Result<Self, ContextError> {
        Ok(Self {
            grant_type: context.require(keys::AUTH_GRANT_TYPE)?.to_owned(),
            client_id: context.require(keys::AUTH_CLIENT_ID)?.to_owned(),
            client_secret: RedactedSecret::new(
                context.require(keys::AUTH_CLIENT_SECRET)?.to_owned(),
            ),
            username: context.require(keys::AUTH_USERNAME)?.to_owned(),
            password: RedactedSecret::new(context.require(keys::AUTH_PASSWORD)?.to_owned()),
        })
    }

    fn form_body(&self) -> String {
        FormSerializer::new(String::new())
            .append_pair("grant_type", &self.grant_type)
            .append_pair("client_id", &self.client_id)
            .append_pair("client_secret", self.client_secret.expose())
            .append_pair("username", &self.username)
            .append_pair("password", self.password.expose())
            .finish()
    }
}

/// Derive the token endpoint from the configured API URL: everything
/// before `/api/` plus the fixed auth path.
pub fn token_url(api_url: &str) -> String {
    let base = api_url.split(API_PATH_MARKER).next().unwrap_or(api_url);
    format!("{base}{TOKEN_ENDPOINT}")
}

/// Obtain a time-bound bearer token.
pub async fn get_token(retry: &RetryClient, context: &CrContext) -> Result<Token, AuthError> {
    info!("BEGIN: Fetching authentication token");

    let credentials = Credentials::from_context(context)?;
    let url = token_url(context.require(keys::URL)?);
    let body = credentials.form_body();

    let response = retry
        .request_with_retry(Method::POST, &url, HeaderMap::new(), Some(RequestBody::Form(body)))
        .await?;

    let token = Token {
        token_type: token_field(&response, "token_type")?,
        access_token: token_field(&response, "access_token")?,
    };

    info!("END: Fetching authentication token");
    Ok(token)
}

fn token_field(response: &Value, field: &'static str) -> Result<String, AuthError> {
    response
        .get(field)
        .and_then(Value::as_str)
        .filter(|value| !value.is_empty())
        .map(str::to_owned)
        .ok_or_else(|| AuthError::token_response(field))
}
