use url::Url;

use crate::domain::{ApiKey, MessageText, QueryEncoding, Recipient, SendMessage};

/// Build the gateway URL: `<endpoint>?phone=..&text=..&apikey=..`.
///
/// Parameter order is fixed (phone, text, apikey). Existing query pairs on `endpoint` are kept.
pub fn encode_send_message_url(
    endpoint: &Url,
    request: &SendMessage,
    encoding: QueryEncoding,
) -> Result<Url, url::ParseError> {
    let pairs = [
        (Recipient::FIELD, request.recipient().raw()),
        (MessageText::FIELD, request.text().as_str()),
        (ApiKey::FIELD, request.api_key().as_str()),
    ];

    match encoding {
        QueryEncoding::Encoded => {
            let mut url = endpoint.clone();
            url.query_pairs_mut().extend_pairs(pairs);
            Ok(url)
        }
        QueryEncoding::Verbatim => {
            let query = pairs
                .iter()
                .map(|(key, value)| format!("{key}={value}"))
                .collect::<Vec<_>>()
                .join("&");

            let mut base = endpoint.clone();
            base.set_fragment(None);
            let separator = match base.query() {
                Some(existing) if !existing.is_empty() => "&",
                Some(_) => "",
                None => "?",
            };
            Url::parse(&format!("{base}{separator}{query}"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn endpoint() -> Url {
        Url::parse("https://api.callmebot.com/whatsapp.php").unwrap()
    }

    fn request(text: &str) -> SendMessage {
        SendMessage::from_raw("311234567", "87654321", text).unwrap()
    }

    #[test]
    fn encoded_url_percent_encodes_values_in_fixed_order() {
        let url = encode_send_message_url(
            &endpoint(),
            &request("A TEST MESSAGE"),
            QueryEncoding::Encoded,
        )
        .unwrap();

        assert_eq!(
            url.as_str(),
            "https://api.callmebot.com/whatsapp.php?phone=311234567&text=A+TEST+MESSAGE&apikey=87654321"
        );
    }

    #[test]
    fn encoded_url_escapes_reserved_characters() {
        let url = encode_send_message_url(
            &endpoint(),
            &request("fish & chips #1"),
            QueryEncoding::Encoded,
        )
        .unwrap();

        let pairs = url.query_pairs().into_owned().collect::<Vec<_>>();
        assert_eq!(
            pairs,
            vec![
                ("phone".to_owned(), "311234567".to_owned()),
                ("text".to_owned(), "fish & chips #1".to_owned()),
                ("apikey".to_owned(), "87654321".to_owned()),
            ]
        );
    }

    #[test]
    fn verbatim_url_only_applies_parser_normalization() {
        let url = encode_send_message_url(
            &endpoint(),
            &request("A TEST MESSAGE"),
            QueryEncoding::Verbatim,
        )
        .unwrap();

        assert_eq!(
            url.as_str(),
            "https://api.callmebot.com/whatsapp.php?phone=311234567&text=A%20TEST%20MESSAGE&apikey=87654321"
        );
    }

    #[test]
    fn verbatim_url_lets_ampersand_split_the_text() {
        let url = encode_send_message_url(
            &endpoint(),
            &request("fish & chips"),
            QueryEncoding::Verbatim,
        )
        .unwrap();

        let text = url
            .query_pairs()
            .find(|(key, _)| key == "text")
            .map(|(_, value)| value.into_owned());
        assert_eq!(text.as_deref(), Some("fish "));
    }

    #[test]
    fn phone_and_api_key_are_substituted_as_given() {
        let request = SendMessage::from_raw(" +31 6 1234 ", " key1 ", "hi").unwrap();

        let url = encode_send_message_url(&endpoint(), &request, QueryEncoding::Encoded).unwrap();
        let pairs = url.query_pairs().into_owned().collect::<Vec<_>>();
        assert_eq!(pairs[0], ("phone".to_owned(), " +31 6 1234 ".to_owned()));
        assert_eq!(pairs[2], ("apikey".to_owned(), " key1 ".to_owned()));
    }

    #[test]
    fn existing_endpoint_query_is_kept() {
        let endpoint = Url::parse("https://relay.example.invalid/send?source=ansible").unwrap();

        for encoding in [QueryEncoding::Encoded, QueryEncoding::Verbatim] {
            let url = encode_send_message_url(&endpoint, &request("hi"), encoding).unwrap();
            assert_eq!(
                url.query(),
                Some("source=ansible&phone=311234567&text=hi&apikey=87654321")
            );
        }
    }
}
