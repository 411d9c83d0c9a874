use serde_json::{Map, Value};

use crate::message::{Message, TemplateContent};
use crate::Error;

/// Control fields that sit next to `message` in the request, never inside it
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SendOptions {
    /// Sent as `async`; defaults to `false`
    pub is_async: bool,

    /// Defaults to `""`
    pub ip_pool: Option<String>,

    /// Overrides the configured API key for this call only
    pub key: Option<String>,

    /// UTC `YYYY-MM-DD HH:MM:SS` to schedule delivery
    pub send_at: Option<String>,
}

impl SendOptions {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn asynchronous(mut self, is_async: bool) -> Self {
        self.is_async = is_async;
        self
    }

    pub fn ip_pool(mut self, ip_pool: &str) -> Self {
        self.ip_pool = Some(ip_pool.to_string());
        self
    }

    pub fn key(mut self, key: &str) -> Self {
        self.key = Some(key.to_string());
        self
    }

    pub fn send_at(mut self, send_at: &str) -> Self {
        self.send_at = Some(send_at.to_string());
        self
    }

    /// Remove the reserved `async`, `ip_pool`, `key` and `send_at` keys
    /// from a field bag.
    fn take_from(fields: &mut Map<String, Value>) -> Result<Self, Error> {
        let is_async = match fields.remove("async") {
            None => false,
            Some(Value::Bool(b)) => b,
            Some(_) => return Err(Error::Validation("async must be a boolean".to_string())),
        };

        Ok(Self {
            is_async,
            ip_pool: take_string(fields, "ip_pool")?,
            key: take_string(fields, "key")?,
            send_at: take_string(fields, "send_at")?,
        })
    }
}

fn take_string(fields: &mut Map<String, Value>, name: &str) -> Result<Option<String>, Error> {
    match fields.remove(name) {
        None => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(_) => Err(Error::Validation(format!("{} must be a string", name))),
    }
}

/// Plain send: the full message is given inline
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SendRequest {
    pub message: Message,
    pub options: SendOptions,
}

impl SendRequest {
    pub fn new(message: Message) -> Self {
        Self {
            message,
            options: SendOptions::default(),
        }
    }

    pub fn options(mut self, options: SendOptions) -> Self {
        self.options = options;
        self
    }

    /// Build a request from an untyped field bag. Reserved control keys are
    /// pulled out; everything else becomes the message, unchanged.
    pub fn from_fields(mut fields: Map<String, Value>) -> Result<Self, Error> {
        let options = SendOptions::take_from(&mut fields)?;

        Ok(Self {
            message: Message::from(fields),
            options,
        })
    }
}

/// Template send: the message is rendered from a stored template.
///
/// Both template fields are optional here so that requests assembled from
/// untyped input can be checked by the client before anything is sent.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TemplateRequest {
    pub template_name: Option<String>,
    pub template_content: Option<Vec<TemplateContent>>,
    pub message: Message,
    pub options: SendOptions,
}

impl TemplateRequest {
    pub fn new(template_name: &str, template_content: Vec<TemplateContent>, message: Message) -> Self {
        Self {
            template_name: Some(template_name.to_string()),
            template_content: Some(template_content),
            message,
            options: SendOptions::default(),
        }
    }

    pub fn options(mut self, options: SendOptions) -> Self {
        self.options = options;
        self
    }

    /// Same as `SendRequest::from_fields`, additionally lifting
    /// `template_name` and `template_content` out of the message.
    ///
    /// Missing template fields are not an error here; the client rejects
    /// them at send time.
    pub fn from_fields(mut fields: Map<String, Value>) -> Result<Self, Error> {
        let options = SendOptions::take_from(&mut fields)?;
        let template_name = take_string(&mut fields, "template_name")?;
        let template_content = match fields.remove("template_content") {
            None => None,
            Some(v) => Some(serde_json::from_value(v).map_err(|_| {
                Error::Validation(
                    "template_content must be a list of name/content pairs".to_string(),
                )
            })?),
        };

        Ok(Self {
            template_name,
            template_content,
            message: Message::from(fields),
            options,
        })
    }
}
