use crate::domain::validation::ValidationError;
use crate::domain::value::{ApiKey, MessageText, Recipient};

/// How the query values are placed into the gateway URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QueryEncoding {
    /// Percent-encode every value (`application/x-www-form-urlencoded`).
    #[default]
    Encoded,
    /// Substitute values into the URL unchanged; only the URL parser's own normalization
    /// applies, so reserved characters such as `&` or `#` in the text break the query.
    Verbatim,
}

/// One message for one recipient.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SendMessage {
    recipient: Recipient,
    api_key: ApiKey,
    text: MessageText,
}

impl SendMessage {
    pub fn new(recipient: Recipient, api_key: ApiKey, text: impl Into<MessageText>) -> Self {
        Self {
            recipient,
            api_key,
            text: text.into(),
        }
    }

    /// Validate raw strings and build a request in one step.
    pub fn from_raw(
        phone: impl Into<String>,
        api_key: impl Into<String>,
        text: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            recipient: Recipient::new(phone)?,
            api_key: ApiKey::new(api_key)?,
            text: MessageText::new(text),
        })
    }

    pub fn recipient(&self) -> &Recipient {
        &self.recipient
    }

    pub fn api_key(&self) -> &ApiKey {
        &self.api_key
    }

    pub fn text(&self) -> &MessageText {
        &self.text
    }
}
