//! `key=value&key=value` form strings from the page.

/// Split a page-supplied form string into `(key, value)` pairs.
///
/// Pairs are separated by `&` and split on the first `=`. Keys are kept
/// verbatim; values are URL-decoded (`+` is a space). A pair without `=`
/// gets an empty value and empty segments are skipped.
pub fn parse_form(form: &str) -> Vec<(String, String)> {
    form.split('&')
        .filter(|segment| !segment.is_empty())
        .map(|segment| match segment.split_once('=') {
            Some((key, value)) => (key.to_string(), decode_value(value)),
            None => (segment.to_string(), String::new()),
        })
        .collect()
}

fn decode_value(raw: &str) -> String {
    let spaced = raw.replace('+', " ");
    match urlencoding::decode(&spaced) {
        Ok(decoded) => decoded.into_owned(),
        // Not UTF-8 once decoded; keep what can be kept.
        Err(_) => String::from_utf8_lossy(&urlencoding::decode_binary(spaced.as_bytes())).into_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(items: &[(&str, &str)]) -> Vec<(String, String)> {
        items
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn decodes_percent_encoded_values() {
        assert_eq!(
            parse_form("a=1&b=hello%20world"),
            pairs(&[("a", "1"), ("b", "hello world")])
        );
    }

    #[test]
    fn key_without_equals_gets_empty_value() {
        assert_eq!(
            parse_form("flag&name=Bob"),
            pairs(&[("flag", ""), ("name", "Bob")])
        );
    }

    #[test]
    fn plus_decodes_to_space() {
        assert_eq!(parse_form("q=a+b%2Bc"), pairs(&[("q", "a b+c")]));
    }

    #[test]
    fn keys_are_not_decoded() {
        assert_eq!(parse_form("a%20b=1"), pairs(&[("a%20b", "1")]));
    }

    #[test]
    fn value_keeps_everything_after_first_equals() {
        assert_eq!(parse_form("token=abc=="), pairs(&[("token", "abc==")]));
    }

    #[test]
    fn empty_segments_are_skipped() {
        assert_eq!(parse_form(""), Vec::<(String, String)>::new());
        assert_eq!(parse_form("a=1&&b=2&"), pairs(&[("a", "1"), ("b", "2")]));
    }

    #[test]
    fn decodes_utf8_values() {
        assert_eq!(
            parse_form("name=%E9%9D%92%E8%8E%B2"),
            pairs(&[("name", "青莲")])
        );
    }

    #[test]
    fn invalid_utf8_is_replaced_not_rejected() {
        let parsed = parse_form("v=%FF");
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0].1, "\u{FFFD}");
    }
}
