use std::fmt;

use crate::domain::validation::ValidationError;

use phonenumber::country;

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// Phone number the gateway delivers to (`phone`).
///
/// Invariant: non-empty after trimming. The value itself is neither trimmed nor
/// format-checked: the gateway expects the number with its international prefix, but that
/// is the caller's concern.
/// For E.164 normalization, parse into [`PhoneNumber`] and convert it into [`Recipient`].
pub struct Recipient(String);

impl Recipient {
    /// Query field name used by the gateway (`phone`).
    pub const FIELD: &'static str = "phone";

    /// Create a validated (non-blank) recipient; the value is kept exactly as given.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(value))
    }

    /// Value as sent to the gateway.
    pub fn raw(&self) -> &str {
        &self.0
    }
}

impl From<PhoneNumber> for Recipient {
    /// Convert an already-parsed phone number to its E.164 form.
    fn from(value: PhoneNumber) -> Self {
        Self(value.e164)
    }
}

#[derive(Debug, Clone)]
/// Parsed phone number with an E.164 representation.
///
/// Equality and hashing are based on the E.164 form.
pub struct PhoneNumber {
    raw: String,
    e164: String,
    parsed: phonenumber::PhoneNumber,
}

impl PhoneNumber {
    /// Query field name used by the gateway (`phone`).
    pub const FIELD: &'static str = "phone";

    /// Parse and normalize a phone number into E.164.
    ///
    /// `default_region` is used when the input does not contain an explicit country prefix.
    pub fn parse(
        default_region: Option<country::Id>,
        input: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let input = input.into();
        let raw = input.trim().to_owned();
        if raw.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }

        let parsed = phonenumber::parse(default_region, &raw)
            .map_err(|_| ValidationError::InvalidPhoneNumber { input: raw.clone() })?;

        let e164 = phonenumber::format(&parsed)
            .mode(phonenumber::Mode::E164)
            .to_string();

        Ok(Self { raw, e164, parsed })
    }

    /// Parse with a region given as an ISO 3166 alpha-2 code such as `"NL"`.
    pub fn parse_with_region_code(
        region: &str,
        input: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let code = region.trim().to_ascii_uppercase();
        let region = code
            .parse::<country::Id>()
            .map_err(|_| ValidationError::UnknownRegion {
                input: region.to_owned(),
            })?;
        Self::parse(Some(region), input)
    }

    /// Raw input after trimming.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Normalized E.164 representation.
    pub fn e164(&self) -> &str {
        &self.e164
    }

    /// The parsed phone number from the `phonenumber` crate.
    pub fn parsed(&self) -> &phonenumber::PhoneNumber {
        &self.parsed
    }
}

impl PartialEq for PhoneNumber {
    fn eq(&self, other: &Self) -> bool {
        self.e164 == other.e164
    }
}

impl Eq for PhoneNumber {}

impl std::hash::Hash for PhoneNumber {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.e164.hash(state);
    }
}

#[derive(Clone, PartialEq, Eq, Hash)]
/// CallMeBot API key (`apikey`), issued per phone number by the bot.
///
/// Invariant: non-empty after trimming; the stored key is not trimmed. `Debug` never
/// prints the key.
pub struct ApiKey(String);

impl ApiKey {
    /// Query field name used by the gateway (`apikey`).
    pub const FIELD: &'static str = "apikey";

    /// Create a validated [`ApiKey`]; the key is kept exactly as given.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(value))
    }

    /// Borrow the validated key.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(***)")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
/// Message text (`text`).
///
/// Any string is accepted, including the empty one; the value is kept exactly as provided.
pub struct MessageText(String);

impl MessageText {
    /// Query field name used by the gateway (`text`).
    pub const FIELD: &'static str = "text";

    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Borrow the message text as provided.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for MessageText {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for MessageText {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}
