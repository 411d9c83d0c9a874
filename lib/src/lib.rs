//! Client for sending transactional mail through the Mandrill HTTP API.
//!
//! ```no_run
//! use mandrill::{Config, MandrillClient, Message, Recipient, SendRequest};
//!
//! let client = MandrillClient::new(Config::new("api-key", "noreply@example.com"))?;
//! let message = Message::new()
//!     .to(Recipient::new("a@example.com"))
//!     .subject("Hello")
//!     .text("hi");
//!
//! let resp = client.send_email(SendRequest::new(message))?;
//! println!("{}", resp.text());
//! # Ok::<(), mandrill::Error>(())
//! ```
pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod message;
pub mod request;
pub mod transport;

pub use api::{Response, SendResult};
pub use client::MandrillClient;
pub use crate::config::{load_config, Config};
pub use error::Error;
pub use message::{MergeVar, Message, Recipient, RecipientType, TemplateContent};
pub use request::{SendOptions, SendRequest, TemplateRequest};
pub use transport::{HttpTransport, Transport};
