use std::path::Path;
use std::time::Duration;

use serde_json::{Map, Value};

use crate::domain::{ApiKey, PhoneNumber, Recipient, SendMessage, ValidationError};

use super::MODULE_NAME;

/// Options the module accepts, sorted the way Ansible lists them in error messages.
pub const SUPPORTED_PARAMETERS: [&str; 5] = ["apikey", "phone", "region", "text", "timeout"];

const REQUIRED_PARAMETERS: [&str; 3] = ["apikey", "phone", "text"];

/// Prefix of the internal keys Ansible adds to every argument file.
const INTERNAL_PREFIX: &str = "_ansible_";
const CHECK_MODE_KEY: &str = "_ansible_check_mode";

/// Envelope key used when the arguments arrive wrapped (new-style module input).
const WRAPPED_ARGS_KEY: &str = "ANSIBLE_MODULE_ARGS";

#[derive(Debug, thiserror::Error)]
/// Argument errors, worded the way Ansible reports them.
pub enum ModuleError {
    #[error("failed to read module arguments from {path}: {source}")]
    ReadArgs {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("module arguments are not valid JSON: {0}")]
    NotJson(#[from] serde_json::Error),

    #[error("module arguments must be a JSON object, got {kind}")]
    NotObject { kind: &'static str },

    #[error(
        "Unsupported parameters for ({}) module: {}. Supported parameters include: {}.",
        MODULE_NAME,
        .names.join(", "),
        SUPPORTED_PARAMETERS.join(", ")
    )]
    Unsupported { names: Vec<String> },

    #[error("missing required arguments: {}", .names.join(", "))]
    MissingRequired { names: Vec<&'static str> },

    #[error("argument '{name}' is of type {kind} and we were unable to convert to {expected}")]
    InvalidType {
        name: &'static str,
        kind: &'static str,
        expected: &'static str,
    },

    #[error("argument '{name}' is invalid: {reason}")]
    InvalidValue {
        name: &'static str,
        reason: &'static str,
    },

    #[error("{0}")]
    Validation(#[from] ValidationError),
}

/// Typed module parameters, checked before anything is sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleArgs {
    pub phone: String,
    pub apikey: String,
    pub text: String,
    pub timeout: Option<Duration>,
    pub region: Option<String>,
    pub check_mode: bool,
}

impl ModuleArgs {
    /// Read and parse the argument file Ansible passes to binary modules.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ModuleError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| ModuleError::ReadArgs {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&contents)
    }

    pub fn from_json(json: &str) -> Result<Self, ModuleError> {
        match serde_json::from_str::<Value>(json)? {
            Value::Object(map) => Self::from_map(unwrap_envelope(map)),
            other => Err(ModuleError::NotObject {
                kind: json_kind(&other),
            }),
        }
    }

    pub fn from_map(mut map: Map<String, Value>) -> Result<Self, ModuleError> {
        let mut unsupported = map
            .keys()
            .filter(|key| !key.starts_with(INTERNAL_PREFIX))
            .filter(|key| !SUPPORTED_PARAMETERS.iter().any(|name| *name == key.as_str()))
            .cloned()
            .collect::<Vec<_>>();
        if !unsupported.is_empty() {
            unsupported.sort();
            return Err(ModuleError::Unsupported { names: unsupported });
        }

        let missing = REQUIRED_PARAMETERS
            .iter()
            .copied()
            .filter(|name| map.get(*name).is_none_or(Value::is_null))
            .collect::<Vec<_>>();
        if !missing.is_empty() {
            return Err(ModuleError::MissingRequired { names: missing });
        }

        let check_mode = matches!(map.get(CHECK_MODE_KEY), Some(Value::Bool(true)));

        Ok(Self {
            phone: required_str(&mut map, "phone")?,
            apikey: required_str(&mut map, "apikey")?,
            text: required_str(&mut map, "text")?,
            timeout: optional_seconds(&mut map, "timeout")?,
            region: optional_str(&mut map, "region")?,
            check_mode,
        })
    }

    /// Validate the parameters into a gateway request, normalizing `phone` when a region is set.
    pub fn send_message(&self) -> Result<SendMessage, ModuleError> {
        let recipient = match self.region.as_deref() {
            Some(region) => Recipient::from(PhoneNumber::parse_with_region_code(
                region,
                self.phone.as_str(),
            )?),
            None => Recipient::new(self.phone.as_str())?,
        };
        let api_key = ApiKey::new(self.apikey.as_str())?;
        Ok(SendMessage::new(recipient, api_key, self.text.as_str()))
    }
}

fn unwrap_envelope(mut map: Map<String, Value>) -> Map<String, Value> {
    if map.len() == 1 {
        if let Some(Value::Object(inner)) = map.remove(WRAPPED_ARGS_KEY) {
            return inner;
        }
    }
    map
}

fn required_str(map: &mut Map<String, Value>, name: &'static str) -> Result<String, ModuleError> {
    optional_str(map, name)?.ok_or(ModuleError::MissingRequired { names: vec![name] })
}

/// Ansible's `type: str` conversion: scalars become their text form, containers are rejected.
fn optional_str(
    map: &mut Map<String, Value>,
    name: &'static str,
) -> Result<Option<String>, ModuleError> {
    match map.remove(name) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(value)) => Ok(Some(value)),
        Some(Value::Number(value)) => Ok(Some(value.to_string())),
        Some(Value::Bool(value)) => Ok(Some(if value { "True" } else { "False" }.to_owned())),
        Some(other) => Err(ModuleError::InvalidType {
            name,
            kind: json_kind(&other),
            expected: "str",
        }),
    }
}

fn optional_seconds(
    map: &mut Map<String, Value>,
    name: &'static str,
) -> Result<Option<Duration>, ModuleError> {
    let seconds = match map.remove(name) {
        None | Some(Value::Null) => return Ok(None),
        Some(Value::Number(value)) => match (value.as_u64(), value.as_i64()) {
            (Some(seconds), _) => seconds,
            (None, Some(_)) => {
                return Err(ModuleError::InvalidValue {
                    name,
                    reason: "must be a positive number of seconds",
                });
            }
            (None, None) => {
                return Err(ModuleError::InvalidType {
                    name,
                    kind: "float",
                    expected: "int",
                });
            }
        },
        Some(Value::String(value)) => {
            value
                .trim()
                .parse::<u64>()
                .map_err(|_| ModuleError::InvalidType {
                    name,
                    kind: "str",
                    expected: "int",
                })?
        }
        Some(other) => {
            return Err(ModuleError::InvalidType {
                name,
                kind: json_kind(&other),
                expected: "int",
            });
        }
    };

    if seconds == 0 {
        return Err(ModuleError::InvalidValue {
            name,
            reason: "must be a positive number of seconds",
        });
    }
    Ok(Some(Duration::from_secs(seconds)))
}

/// Python type names, as Ansible prints them.
fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "NoneType",
        Value::Bool(_) => "bool",
        Value::Number(number) if number.is_f64() => "float",
        Value::Number(_) => "int",
        Value::String(_) => "str",
        Value::Array(_) => "list",
        Value::Object(_) => "dict",
    }
}
