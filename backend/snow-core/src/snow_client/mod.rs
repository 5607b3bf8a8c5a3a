//! Authenticated ServiceNow change-request operations.
//!
//! The client holds the bearer header and the two base URLs: the
//! configured API URL for create, and its `/number` form for
//! addressing an existing CR by `cr_number`.
//!
//! A 2xx response that lacks the expected `result`/`status` fields is
//! a soft no-op (`None`/`false`), not an error. Known sharp edge,
//! preserved deliberately; the tests pin it down.

use crate::auth::Token;
use crate::context::{CrContext, keys};
use crate::error::request::RequestError;
use crate::error::snow_client::SnowClientError;
use crate::retry::{RequestBody, RetryClient};

use log::info;
use reqwest::Method;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use serde_json::{Map, Value, json};

/// Path segment for number-addressed CR operations.
const NUMBER_SEGMENT: &str = "number";

// Organizational constants stamped onto every created CR.
const MODIFIED_BY: &str = "api_octopus";
const IMPACTED_SITE: &str = "4";
const CUSTOMER_IMPACT: &str = "0";
const RISK: &str = "low";
const SERVICE_CATEGORY: &str = "Governance_L3 Release Engineering";
const CATEGORY_TYPE: &str = "Maintenance";
const CATEGORY_SUBTYPE: &str = "Software";
const ENVIRONMENT: &str = "production";
const ASSIGNMENT_GROUP: &str = "L3 Release Engineering";

pub struct ServiceNowClient {
    retry: RetryClient,
    create_url: String,
    number_url: String,
    headers: HeaderMap,
}

impl ServiceNowClient {
    pub fn new(retry: RetryClient, api_url: &str, token: &Token) -> Result<Self, RequestError> {
        let base = api_url.trim_end_matches('/');

        let mut headers = HeaderMap::new();
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&token.authorization_header())
                .map_err(|e| RequestError::build(e.to_string()))?,
        );
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        Ok(Self {
            retry,
            create_url: base.to_owned(),
            number_url: format!("{base}/{NUMBER_SEGMENT}"),
            headers,
        })
    }

    /// Create a CR from the context. Returns the record id only when
    /// the server reports `result.status == "success"`.
    pub async fn create_change_request(
        &self,
        context: &CrContext,
    ) -> Result<Option<String>, SnowClientError> {
        info!("BEGIN: Creating change request");

        let payload = build_create_payload(context)?;
        let response = self
            .retry
            .request_with_retry(
                Method::POST,
                &self.create_url,
                self.headers.clone(),
                Some(RequestBody::Json(payload)),
            )
            .await?;

        let cr_number = successful_result(&response)
            .and_then(|result| result.get("record_id"))
            .and_then(Value::as_str)
            .map(str::to_owned);

        info!("END: Creating change request");
        Ok(cr_number)
    }

    /// Patch an existing CR with only the fields the caller wants
    /// changed (today: `state`). True iff the server reported success.
    pub async fn update_change_request(
        &self,
        context: &CrContext,
    ) -> Result<bool, SnowClientError> {
        info!("BEGIN: Updating change request");

        let cr_number = context.require(keys::CR_NUMBER)?;
        let mut change = Map::new();
        if let Some(state) = context.get(keys::CR_STATE) {
            change.insert("state".to_owned(), Value::String(state.to_owned()));
        }

        let url = format!("{}/{}", self.number_url, cr_number);
        let response = self
            .retry
            .request_with_retry(
                Method::PATCH,
                &url,
                self.headers.clone(),
                Some(RequestBody::Json(Value::Object(change))),
            )
            .await?;

        info!("END: Updating change request");
        Ok(successful_result(&response).is_some())
    }

    /// Fetch the raw `result` object for an existing CR, or `None`
    /// when the response has no `result` key.
    pub async fn get_change_request(
        &self,
        context: &CrContext,
    ) -> Result<Option<Value>, SnowClientError> {
        info!("BEGIN: Get change request");

        let cr_number = context.require(keys::CR_NUMBER)?;
        let url = format!("{}/{}", self.number_url, cr_number);
        let response = self
            .retry
            .request_with_retry(Method::GET, &url, self.headers.clone(), None)
            .await?;

        info!("END: Get change request");
        Ok(response.get("result").cloned())
    }
}

/// The `result` object, but only when it reports success.
fn successful_result(response: &Value) -> Option<&Value> {
    let result = response.get("result")?;
    (result.get("status")?.as_str()? == "success").then_some(result)
}

/// Justification text assembled from the project plus whatever release
/// metadata the pipeline supplied.
pub(crate) fn build_justification(context: &CrContext) -> Result<String, crate::error::context::ContextError> {
    let mut description = format!("Project Name: {}", context.require(keys::PROJECT_NAME)?);
    if let Some(site) = context.get(keys::WEB_SITE_NAME) {
        description.push_str(&format!(", WebSiteName: {site}"));
    }
    if let Some(release) = context.get(keys::RELEASE_NUMBER) {
        description.push_str(&format!(", Release Number: {release}"));
    }
    if let Some(notes) = context.get(keys::RELEASE_NOTES) {
        description.push_str(&format!(", Release Notes: {notes}"));
    }
    Ok(description)
}

/// Fixed-shape create payload: caller fields plus the organizational
/// defaults.
pub(crate) fn build_create_payload(
    context: &CrContext,
) -> Result<Value, crate::error::context::ContextError> {
    let description = build_justification(context)?;

    let mut payload = json!({
        "cmdb_ci": context.require(keys::CR_CMDB_CI)?,
        "u_duration": context.require(keys::CR_DURATION)?,
        "assigned_to": context.require(keys::AUTH_USERNAME)?,
        "start_date": context.require(keys::CR_START_DATE)?,
        "justification": description,
        "type": context.require(keys::CR_TYPE)?,
        "state": context.require(keys::CR_STATE)?,
        "backout_plan": context.require(keys::CR_BACKOUT_PLAN)?,
        "u_modified_by": MODIFIED_BY,
        "implementation_plan": context.require(keys::CR_IMPLEMENTATION_PLAN)?,
        "test_plan": context.require(keys::CR_TEST_PLAN)?,
        "u_impacted_site": IMPACTED_SITE,
        "u_atb_cust_impact": CUSTOMER_IMPACT,
        "risk": RISK,
        "u_service_category": SERVICE_CATEGORY,
        "u_category_type": CATEGORY_TYPE,
        "u_category_subtype": CATEGORY_SUBTYPE,
        "u_environment": ENVIRONMENT,
        "assignment_group": ASSIGNMENT_GROUP,
        "short_description": description,
    });

    if let Some(requested_by) = context.get(keys::DEPLOYMENT_CREATED_BY_USERNAME) {
        if let Some(object) = payload.as_object_mut() {
            object.insert(
                "requested_by".to_owned(),
                Value::String(requested_by.to_owned()),
            );
        }
    }

    Ok(payload)
}
