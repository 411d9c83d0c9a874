//! Wire-level definitions for the Mandrill messages API.

use reqwest::header::HeaderMap;
use reqwest::StatusCode;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::message::{Message, TemplateContent};
use crate::request::SendOptions;
use crate::Error;

pub const MANDRILL_BASE_API: &str = "https://mandrillapp.com/api/1.0/";

pub enum Endpoint {
    Send,
    SendTemplate,
}

#[inline]
pub fn build_endpoint_url(endpoint: Endpoint) -> String {
    match endpoint {
        Endpoint::Send => format!("{}{}", MANDRILL_BASE_API, "messages/send.json"),
        Endpoint::SendTemplate => format!("{}{}", MANDRILL_BASE_API, "messages/send-template.json"),
    }
}

/// Raw API response, handed back to the caller untouched
#[derive(Clone, Debug)]
pub struct Response {
    status: StatusCode,
    headers: HeaderMap,
    body: String,
}

impl Response {
    pub fn new(status: StatusCode, headers: HeaderMap, body: String) -> Self {
        Self {
            status,
            headers,
            body,
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn text(&self) -> &str {
        &self.body
    }

    pub fn into_body(self) -> String {
        self.body
    }

    /// Decode the body, e.g. into `Vec<SendResult>`
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, Error> {
        serde_json::from_str(&self.body).map_err(|e| e.into())
    }
}

/// Turn any non-2xx response into an error carrying its status and body
pub fn map_status(resp: Response) -> Result<Response, Error> {
    if resp.status.is_success() {
        Ok(resp)
    } else {
        Err(Error::Http {
            status: resp.status,
            body: resp.body,
        })
    }
}

/// Per-recipient entry of a successful send.
///
/// The client never decodes this itself; it is here for callers that want
/// a typed view of `Response::json`.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct SendResult {
    pub email: String,
    pub status: String,
    #[serde(default)]
    pub reject_reason: Option<String>,
    #[serde(rename = "_id")]
    pub id: String,
}

/// Outer request body. Template fields are only present for template sends.
#[derive(Serialize, Debug)]
pub(crate) struct Payload<'a> {
    #[serde(rename = "async")]
    is_async: bool,
    ip_pool: &'a str,
    key: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    send_at: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    template_name: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    template_content: Option<&'a [TemplateContent]>,
    message: &'a Message,
}

impl<'a> Payload<'a> {
    /// `api_key` is only used when the options carry no override
    pub(crate) fn new(options: &'a SendOptions, api_key: &'a str, message: &'a Message) -> Self {
        Self {
            is_async: options.is_async,
            ip_pool: options.ip_pool.as_deref().unwrap_or(""),
            key: options.key.as_deref().unwrap_or(api_key),
            send_at: options.send_at.as_deref(),
            template_name: None,
            template_content: None,
            message,
        }
    }

    pub(crate) fn with_template(mut self, name: &'a str, content: &'a [TemplateContent]) -> Self {
        self.template_name = Some(name);
        self.template_content = Some(content);
        self
    }
}
