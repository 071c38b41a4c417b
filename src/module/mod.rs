//! Ansible adapter: turns module arguments into a gateway request and the outcome into the
//! JSON result Ansible reads back.

mod args;
mod result;

pub use args::{ModuleArgs, ModuleError, SUPPORTED_PARAMETERS};
pub use result::ModuleResult;

use crate::client::{WhatsAppClient, WhatsAppError};
use crate::domain::SendMessage;

/// Name Ansible knows the module by.
pub const MODULE_NAME: &str = "whatsapp";

/// Build the client the arguments ask for.
pub fn client_for(args: &ModuleArgs) -> Result<WhatsAppClient, WhatsAppError> {
    let mut builder = WhatsAppClient::builder()
        .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")));
    if let Some(timeout) = args.timeout {
        builder = builder.timeout(timeout);
    }
    builder.build()
}

/// Run the module with a client built from the arguments.
pub async fn run_module(args: &ModuleArgs) -> ModuleResult {
    if args.check_mode {
        return check_mode(args);
    }
    match client_for(args) {
        Ok(client) => run_with_client(&client, args).await,
        Err(err) => {
            tracing::warn!(error = %err, "failed to build gateway client");
            ModuleResult::fail(err.to_string(), Some(args.text.clone()))
        }
    }
}

/// Run the module against `client`.
///
/// In check mode nothing is sent and the input text is reported back. Otherwise the
/// gateway's body is reported on HTTP 200, and any other outcome fails the task with
/// the input text kept in `WhatsApp_text`.
pub async fn run_with_client(client: &WhatsAppClient, args: &ModuleArgs) -> ModuleResult {
    if args.check_mode {
        return check_mode(args);
    }

    let request = match validate(args) {
        Ok(request) => request,
        Err(result) => return result,
    };

    tracing::debug!(
        phone = request.recipient().raw(),
        endpoint = client.endpoint(),
        "sending message"
    );
    match client.send(&request).await {
        Ok(delivery) => ModuleResult::exit(delivery.into_body()),
        Err(err) => {
            tracing::warn!(error = %err, "message was not delivered");
            ModuleResult::fail(err.reason(), Some(args.text.clone()))
        }
    }
}

/// Validate the arguments and report `text` back without touching the network.
fn check_mode(args: &ModuleArgs) -> ModuleResult {
    match validate(args) {
        Ok(request) => {
            tracing::debug!(phone = request.recipient().raw(), "check mode, not sending");
            ModuleResult::exit(args.text.clone())
        }
        Err(result) => result,
    }
}

fn validate(args: &ModuleArgs) -> Result<SendMessage, ModuleResult> {
    args.send_message().map_err(|err| {
        tracing::warn!(error = %err, "invalid module arguments");
        ModuleResult::fail(err.to_string(), None)
    })
}

/// Parse an argument document and run the module; argument errors become failed results.
pub async fn run_from_json(json: &str) -> ModuleResult {
    match ModuleArgs::from_json(json) {
        Ok(args) => run_module(&args).await,
        Err(err) => ModuleResult::fail(err.to_string(), None),
    }
}
