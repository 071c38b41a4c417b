//! Domain layer: strong types with validation and invariants (no I/O).

mod request;
mod response;
mod validation;
mod value;

pub use request::{QueryEncoding, SendMessage};
pub use response::Delivery;
pub use validation::ValidationError;
pub use value::{ApiKey, MessageText, PhoneNumber, Recipient};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recipient_rejects_blank_and_keeps_value_as_given() {
        assert!(matches!(
            Recipient::new("   "),
            Err(ValidationError::Empty {
                field: Recipient::FIELD
            })
        ));
        assert_eq!(Recipient::new(" 311234567 ").unwrap().raw(), " 311234567 ");
    }

    #[test]
    fn recipient_does_not_validate_format() {
        assert_eq!(Recipient::new("not a number").unwrap().raw(), "not a number");
    }

    #[test]
    fn api_key_rejects_blank_and_keeps_value_as_given() {
        assert!(matches!(
            ApiKey::new(" "),
            Err(ValidationError::Empty {
                field: ApiKey::FIELD
            })
        ));
        assert_eq!(ApiKey::new("8765 4321 ").unwrap().as_str(), "8765 4321 ");
    }

    #[test]
    fn api_key_debug_is_redacted() {
        let key = ApiKey::new("87654321").unwrap();
        let debug = format!("{key:?}");
        assert!(!debug.contains("87654321"));
    }

    #[test]
    fn message_text_accepts_empty_and_preserves_whitespace() {
        assert_eq!(MessageText::new("").as_str(), "");
        assert_eq!(MessageText::new("  hi  ").as_str(), "  hi  ");
    }

    #[test]
    fn phone_number_parses_with_region_and_trims() {
        let pn = PhoneNumber::parse(Some(phonenumber::country::Id::NL), " 0612345678 ").unwrap();
        assert_eq!(pn.raw(), "0612345678");
        assert_eq!(pn.e164(), "+31612345678");
    }

    #[test]
    fn recipient_from_phone_number_uses_e164() {
        let pn = PhoneNumber::parse_with_region_code("nl", "+31 6 12345678").unwrap();
        let recipient = Recipient::from(pn);
        assert_eq!(recipient.raw(), "+31612345678");
    }

    #[test]
    fn phone_number_rejects_unknown_region() {
        assert!(matches!(
            PhoneNumber::parse_with_region_code("ZZZ", "0612345678"),
            Err(ValidationError::UnknownRegion { .. })
        ));
    }

    #[test]
    fn phone_number_rejects_garbage() {
        assert!(matches!(
            PhoneNumber::parse(None, "hello"),
            Err(ValidationError::InvalidPhoneNumber { .. })
        ));
    }

    #[test]
    fn send_message_from_raw_validates_each_field() {
        assert!(SendMessage::from_raw("", "key", "hi").is_err());
        assert!(SendMessage::from_raw("311234567", " ", "hi").is_err());

        let msg = SendMessage::from_raw("311234567", "87654321", "").unwrap();
        assert_eq!(msg.recipient().raw(), "311234567");
        assert_eq!(msg.api_key().as_str(), "87654321");
        assert_eq!(msg.text().as_str(), "");
    }
}
