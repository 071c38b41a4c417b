//! Typed Rust client for the CallMeBot WhatsApp HTTP API.
//!
//! The crate is split into a domain layer of strong types, a transport layer for the
//! gateway's query format, and a small client layer issuing the request. The `module`
//! layer adapts the client to Ansible, and the `whatsapp` binary is the Ansible module.
//!
//! ```rust,no_run
//! use callmebot::{SendMessage, WhatsAppClient};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), callmebot::WhatsAppError> {
//!     let client = WhatsAppClient::new();
//!     let request = SendMessage::from_raw("+34123456789", "123123", "hello")?;
//!     let delivery = client.send(&request).await?;
//!     // A 200 answer may still describe a gateway-side problem.
//!     println!("{}", delivery.body());
//!     Ok(())
//! }
//! ```
#![forbid(unsafe_code)]

pub mod client;
pub mod domain;
pub mod logging;
pub mod module;
mod transport;

#[cfg(test)]
mod test_support;

pub use client::{WhatsAppClient, WhatsAppClientBuilder, WhatsAppError};
pub use domain::{
    ApiKey, Delivery, MessageText, PhoneNumber, QueryEncoding, Recipient, SendMessage,
    ValidationError,
};
pub use module::{ModuleArgs, ModuleError, ModuleResult};
