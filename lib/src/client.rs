use serde::Serialize;

use crate::api::{self, Endpoint, Payload, Response};
use crate::config::Config;
use crate::message::Message;
use crate::request::{SendRequest, TemplateRequest};
use crate::transport::{HttpTransport, Transport};
use crate::Error;

/// Sends transactional mail through the Mandrill messages API.
///
/// Each call is exactly one blocking HTTP request. Build one client at
/// startup and hand it (or a reference to it) to whatever needs to send mail.
pub struct MandrillClient<T = HttpTransport> {
    config: Config,
    transport: T,
}

impl MandrillClient<HttpTransport> {
    pub fn new(config: Config) -> Result<Self, Error> {
        let transport = HttpTransport::new(config.timeout)?;
        Ok(Self::with_transport(config, transport))
    }
}

impl<T: Transport> MandrillClient<T> {
    pub fn with_transport(config: Config, transport: T) -> Self {
        Self { config, transport }
    }

    /// Replace the API key and default sender. The transport is kept.
    pub fn configure(&mut self, config: Config) {
        self.config = config;
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    fn api_key(&self) -> Result<&str, Error> {
        self.config
            .api_key()
            .ok_or_else(|| Error::Configuration("No API key configured".to_string()))
    }

    fn default_sender(&self, message: &mut Message) -> Result<(), Error> {
        if message.has_sender() {
            return Ok(());
        }

        match self.config.default_from {
            Some(ref from) => {
                message.default_sender(from);
                Ok(())
            }
            None => Err(Error::Configuration(
                "Message has no from_email and no default sender is configured".to_string(),
            )),
        }
    }

    /// Send a message given inline.
    ///
    /// Returns the raw response on any 2xx status.
    pub fn send_email(&self, request: SendRequest) -> Result<Response, Error> {
        let api_key = self.api_key()?;

        let SendRequest {
            mut message,
            options,
        } = request;
        self.default_sender(&mut message)?;

        let payload = Payload::new(&options, api_key, &message);
        self.post(Endpoint::Send, &payload)
    }

    /// Send a message rendered from a stored template.
    ///
    /// `template_name` and `template_content` must both be present; they
    /// are checked before anything goes over the wire.
    pub fn send_template_email(&self, request: TemplateRequest) -> Result<Response, Error> {
        let api_key = self.api_key()?;

        let TemplateRequest {
            template_name,
            template_content,
            mut message,
            options,
        } = request;

        let template_name = template_name.ok_or_else(|| Error::missing_field("template_name"))?;
        let template_content =
            template_content.ok_or_else(|| Error::missing_field("template_content"))?;
        self.default_sender(&mut message)?;

        let payload = Payload::new(&options, api_key, &message)
            .with_template(&template_name, &template_content);
        self.post(Endpoint::SendTemplate, &payload)
    }

    fn post(&self, endpoint: Endpoint, payload: &impl Serialize) -> Result<Response, Error> {
        let url = api::build_endpoint_url(endpoint);
        let body = serde_json::to_string(payload)?;

        log::debug!("POST {} ({} bytes)", url, body.len());
        let resp = self.transport.post_json(&url, body)?;
        log::debug!("{} responded with {}", url, resp.status());

        // Map response into an error if applicable
        api::map_status(resp)
    }
}
