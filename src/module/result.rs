use serde::Serialize;

/// JSON document a module prints on stdout.
///
/// `changed` is always false: sending a message has no desired state to converge on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModuleResult {
    pub changed: bool,
    pub failed: bool,
    #[serde(rename = "WhatsApp_text", skip_serializing_if = "Option::is_none")]
    pub whatsapp_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub msg: Option<String>,
}

impl ModuleResult {
    pub fn exit(whatsapp_text: impl Into<String>) -> Self {
        Self {
            changed: false,
            failed: false,
            whatsapp_text: Some(whatsapp_text.into()),
            msg: None,
        }
    }

    pub fn fail(msg: impl Into<String>, whatsapp_text: Option<String>) -> Self {
        Self {
            changed: false,
            failed: true,
            whatsapp_text,
            msg: Some(msg.into()),
        }
    }

    /// Process exit status Ansible expects for this result.
    pub fn exit_code(&self) -> u8 {
        u8::from(self.failed)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
