//! Message types shared by plain and template sends.
//!
//! Everything here ends up inside the nested `message` object of the
//! request. See https://mailchimp.com/developer/transactional/api/messages/
//! for the full list of options; anything not modelled below can be set
//! through `Message::extra`.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecipientType {
    To,
    Cc,
    Bcc,
}

impl Default for RecipientType {
    fn default() -> Self {
        RecipientType::To
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Recipient {
    pub email: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(rename = "type", default)]
    pub type_: RecipientType,
}

impl Recipient {
    pub fn new(email: &str) -> Self {
        Self {
            email: email.to_string(),
            ..Default::default()
        }
    }

    pub fn with_name(mut self, name: &str) -> Self {
        self.name = Some(name.to_string());
        self
    }

    pub fn cc(mut self) -> Self {
        self.type_ = RecipientType::Cc;
        self
    }

    pub fn bcc(mut self) -> Self {
        self.type_ = RecipientType::Bcc;
        self
    }
}

/// Single `name`/`content` pair, used both for editable template regions
/// and for merge variables.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TemplateContent {
    pub name: String,
    pub content: Value,
}

impl TemplateContent {
    pub fn new(name: &str, content: impl Into<Value>) -> Self {
        Self {
            name: name.to_string(),
            content: content.into(),
        }
    }
}

pub type MergeVar = TemplateContent;

/// Merge variables that only apply to one recipient
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RecipientMergeVars {
    pub rcpt: String,
    pub vars: Vec<MergeVar>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Message {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub to: Vec<Recipient>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from_email: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,

    /// Plaintext body
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    /// HTML body, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub html: Option<String>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub headers: BTreeMap<String, String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub metadata: BTreeMap<String, String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub merge_language: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub global_merge_vars: Vec<MergeVar>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub merge_vars: Vec<RecipientMergeVars>,

    /// Provider fields without a dedicated member above. Passed through as-is.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Message {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn to(mut self, recipient: Recipient) -> Self {
        self.extra.remove("to");
        self.to.push(recipient);
        self
    }

    pub fn from_email(mut self, from_email: &str) -> Self {
        self.extra.remove("from_email");
        self.from_email = Some(from_email.to_string());
        self
    }

    pub fn from_name(mut self, from_name: &str) -> Self {
        self.extra.remove("from_name");
        self.from_name = Some(from_name.to_string());
        self
    }

    pub fn subject(mut self, subject: &str) -> Self {
        self.extra.remove("subject");
        self.subject = Some(subject.to_string());
        self
    }

    pub fn text(mut self, text: &str) -> Self {
        self.extra.remove("text");
        self.text = Some(text.to_string());
        self
    }

    pub fn html(mut self, html: &str) -> Self {
        self.extra.remove("html");
        self.html = Some(html.to_string());
        self
    }

    pub fn header(mut self, name: &str, value: &str) -> Self {
        self.extra.remove("headers");
        self.headers.insert(name.to_string(), value.to_string());
        self
    }

    pub fn tag(mut self, tag: &str) -> Self {
        self.extra.remove("tags");
        self.tags.push(tag.to_string());
        self
    }

    pub fn global_merge_var(mut self, name: &str, content: impl Into<Value>) -> Self {
        self.extra.remove("global_merge_vars");
        self.global_merge_vars.push(MergeVar::new(name, content));
        self
    }

    /// Set a provider field verbatim.
    ///
    /// Naming a field that has a dedicated member replaces whatever that
    /// member held, so every key is sent once.
    pub fn field(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.clear_member(name);
        self.extra.insert(name.to_string(), value.into());
        self
    }

    fn clear_member(&mut self, name: &str) {
        match name {
            "to" => self.to.clear(),
            "from_email" => self.from_email = None,
            "from_name" => self.from_name = None,
            "subject" => self.subject = None,
            "text" => self.text = None,
            "html" => self.html = None,
            "headers" => self.headers.clear(),
            "tags" => self.tags.clear(),
            "metadata" => self.metadata.clear(),
            "merge_language" => self.merge_language = None,
            "global_merge_vars" => self.global_merge_vars.clear(),
            "merge_vars" => self.merge_vars.clear(),
            _ => (),
        }
    }

    pub(crate) fn has_sender(&self) -> bool {
        self.from_email.is_some() || self.extra.contains_key("from_email")
    }

    /// Fill in the sender, unless the caller already picked one
    pub(crate) fn default_sender(&mut self, from_email: &str) {
        if !self.has_sender() {
            self.from_email = Some(from_email.to_string());
        }
    }
}

impl From<Map<String, Value>> for Message {
    /// Wrap an untyped field bag. Fields are kept verbatim; only a string
    /// `from_email` is lifted out so the sender can be defaulted.
    fn from(mut fields: Map<String, Value>) -> Self {
        let from_email = match fields.remove("from_email") {
            Some(Value::String(s)) => Some(s),
            Some(other) => {
                fields.insert("from_email".to_string(), other);
                None
            }
            None => None,
        };

        Self {
            from_email,
            extra: fields,
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn unset_fields_are_omitted() {
        let message = Message::new().subject("Hello").text("hi");

        assert_eq!(
            serde_json::to_value(&message).unwrap(),
            json!({"subject": "Hello", "text": "hi"})
        );
    }

    #[test]
    fn recipients_serialize_with_type() {
        let message = Message::new()
            .to(Recipient::new("a@example.com").with_name("A"))
            .to(Recipient::new("b@example.com").bcc());

        assert_eq!(
            serde_json::to_value(&message).unwrap(),
            json!({"to": [
                {"email": "a@example.com", "name": "A", "type": "to"},
                {"email": "b@example.com", "type": "bcc"}
            ]})
        );
    }

    #[test]
    fn unknown_fields_pass_through() {
        let value = json!({
            "to": [{"email": "a@example.com", "type": "to"}],
            "text": "hi",
            "track_opens": true,
            "attachments": [{"type": "text/plain", "name": "a.txt", "content": "aGk="}]
        });

        let message: Message = serde_json::from_value(value.clone()).unwrap();

        assert_eq!(message.text.as_deref(), Some("hi"));
        assert_eq!(message.to, vec![Recipient::new("a@example.com")]);
        assert_eq!(message.extra["track_opens"], json!(true));
        assert_eq!(serde_json::to_value(&message).unwrap(), value);
    }

    #[test]
    fn default_sender_keeps_explicit_sender() {
        let mut message = Message::new().from_email("me@example.com");
        message.default_sender("noreply@example.com");
        assert_eq!(message.from_email.as_deref(), Some("me@example.com"));

        let mut message = Message::new().field("from_email", Value::Null);
        message.default_sender("noreply@example.com");
        assert!(message.from_email.is_none());

        let mut message = Message::new();
        message.default_sender("noreply@example.com");
        assert_eq!(message.from_email.as_deref(), Some("noreply@example.com"));
    }

    #[test]
    fn field_bag_is_kept_verbatim() {
        let fields = json!({"to": "a@example.com", "text": "hi", "from_email": "me@example.com"});

        let message = Message::from(fields.as_object().unwrap().clone());

        assert_eq!(message.from_email.as_deref(), Some("me@example.com"));
        assert!(message.to.is_empty());
        assert_eq!(serde_json::to_value(&message).unwrap(), fields);
    }

    fn assert_keys_sent_once(message: &Message) {
        let body = serde_json::to_string(message).unwrap();

        for name in &[
            "to",
            "from_email",
            "from_name",
            "subject",
            "text",
            "html",
            "headers",
            "tags",
            "metadata",
            "merge_language",
            "global_merge_vars",
            "merge_vars",
        ] {
            let key = format!("\"{}\":", name);
            assert!(body.matches(&key).count() <= 1, "{} sent twice in {}", name, body);
        }
    }

    #[test]
    fn field_replaces_dedicated_member() {
        let message = Message::new()
            .from_email("me@example.com")
            .field("from_email", "other@example.com");

        assert_keys_sent_once(&message);
        assert!(message.from_email.is_none());
        assert_eq!(
            serde_json::to_value(&message).unwrap(),
            json!({"from_email": "other@example.com"})
        );

        let message = Message::new()
            .to(Recipient::new("a@example.com"))
            .subject("Hello")
            .tag("welcome")
            .field("to", "b@example.com")
            .field("subject", "Hi")
            .field("tags", json!(["other"]));

        assert_keys_sent_once(&message);
        assert_eq!(
            serde_json::to_value(&message).unwrap(),
            json!({"to": "b@example.com", "subject": "Hi", "tags": ["other"]})
        );
    }

    #[test]
    fn builder_replaces_field_bag_value() {
        let fields = json!({"to": "a@example.com", "from_email": "old@example.com", "text": "old"});

        let message = Message::from(fields.as_object().unwrap().clone())
            .to(Recipient::new("b@example.com"))
            .from_email("me@example.com")
            .text("hi")
            .header("Reply-To", "me@example.com")
            .field("headers", json!({"X-Tag": "1"}))
            .header("Reply-To", "you@example.com");

        assert_keys_sent_once(&message);
        assert_eq!(
            serde_json::to_value(&message).unwrap(),
            json!({
                "to": [{"email": "b@example.com", "type": "to"}],
                "from_email": "me@example.com",
                "text": "hi",
                "headers": {"Reply-To": "you@example.com"}
            })
        );
    }
}
