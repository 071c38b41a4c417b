//! Transport layer: wire-format details of the gateway request.

mod send_message;

pub use send_message::encode_send_message_url;
