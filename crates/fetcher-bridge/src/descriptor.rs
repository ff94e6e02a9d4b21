//! Typed request descriptors built from the page's `(url, jsonOptions)`.

use std::collections::BTreeMap;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{Method, Url};
use serde::{Deserialize, Serialize};

use crate::error::BridgeError;
use crate::form::parse_form;

/// The `jsonOptions` object the page serializes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FetchOptions {
    pub method: String,
    pub headers: BTreeMap<String, String>,
    #[serde(default)]
    pub form: Option<String>,
}

impl FetchOptions {
    pub fn from_json(json_options: &str) -> Result<Self, BridgeError> {
        serde_json::from_str(json_options).map_err(|e| BridgeError::MalformedOptions(e.to_string()))
    }
}

/// The IPC payload posted by `window.<object>.fetch(url, jsonOptions, callbackId)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FetchCall {
    pub url: String,
    pub options: String,
    pub callback_id: String,
}

/// A validated request, consumed once by the executor.
#[derive(Debug, Clone)]
pub struct RequestDescriptor {
    pub url: Url,
    pub method: Method,
    pub headers: HeaderMap,
    /// Form pairs; only ever `Some` for POST.
    pub form: Option<Vec<(String, String)>>,
}

impl RequestDescriptor {
    /// Validate the page's arguments.
    ///
    /// POST (any case) sends `form` as an urlencoded body, an absent `form`
    /// giving an empty one. Every other method sends no body.
    pub fn parse(url: &str, json_options: &str) -> Result<Self, BridgeError> {
        let options = FetchOptions::from_json(json_options)?;
        Self::from_options(url, options)
    }

    pub fn from_options(url: &str, options: FetchOptions) -> Result<Self, BridgeError> {
        let url = Url::parse(url).map_err(|e| BridgeError::InvalidUrl {
            url: url.to_string(),
            reason: e.to_string(),
        })?;

        let method = Method::from_bytes(options.method.to_ascii_uppercase().as_bytes())
            .map_err(|_| BridgeError::InvalidMethod(options.method.clone()))?;

        let mut headers = HeaderMap::new();
        for (name, value) in &options.headers {
            let header_name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|_| BridgeError::InvalidHeader(name.clone()))?;
            let header_value =
                HeaderValue::from_str(value).map_err(|_| BridgeError::InvalidHeader(name.clone()))?;
            headers.append(header_name, header_value);
        }

        let form = if method == Method::POST {
            Some(options.form.as_deref().map(parse_form).unwrap_or_default())
        } else {
            None
        };

        Ok(Self {
            url,
            method,
            headers,
            form,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_get_without_body() {
        let d = RequestDescriptor::parse(
            "https://api.example.com/x",
            r#"{"method":"GET","headers":{"Accept":"application/json"}}"#,
        )
        .unwrap();
        assert_eq!(d.method, Method::GET);
        assert_eq!(d.url.as_str(), "https://api.example.com/x");
        assert_eq!(d.headers["accept"], "application/json");
        assert!(d.form.is_none());
    }

    #[test]
    fn non_post_ignores_form() {
        for method in ["GET", "put", "DELETE", "patch"] {
            let json = format!(r#"{{"method":"{method}","headers":{{}},"form":"a=1"}}"#);
            let d = RequestDescriptor::parse("https://example.com/", &json).unwrap();
            assert!(d.form.is_none(), "{method} must not carry a body");
        }
    }

    #[test]
    fn lowercase_post_builds_form() {
        let d = RequestDescriptor::parse(
            "https://example.com/login",
            r#"{"method":"post","headers":{},"form":"name=Bob%20Smith"}"#,
        )
        .unwrap();
        assert_eq!(d.method, Method::POST);
        assert_eq!(
            d.form,
            Some(vec![("name".to_string(), "Bob Smith".to_string())])
        );
    }

    #[test]
    fn post_without_form_sends_empty_body() {
        let d = RequestDescriptor::parse("https://example.com/", r#"{"method":"POST","headers":{}}"#)
            .unwrap();
        assert_eq!(d.form, Some(Vec::new()));
    }

    #[test]
    fn missing_method_is_malformed() {
        let err = RequestDescriptor::parse("https://example.com/", r#"{"headers":{}}"#).unwrap_err();
        assert!(matches!(err, BridgeError::MalformedOptions(_)));
        assert!(err.to_string().contains("method"));
    }

    #[test]
    fn missing_headers_is_malformed() {
        let err = RequestDescriptor::parse("https://example.com/", r#"{"method":"GET"}"#).unwrap_err();
        assert!(matches!(err, BridgeError::MalformedOptions(_)));
    }

    #[test]
    fn non_string_header_value_is_malformed() {
        let err = RequestDescriptor::parse(
            "https://example.com/",
            r#"{"method":"GET","headers":{"X-Count":3}}"#,
        )
        .unwrap_err();
        assert!(matches!(err, BridgeError::MalformedOptions(_)));
    }

    #[test]
    fn garbage_json_is_malformed() {
        let err = RequestDescriptor::parse("https://example.com/", "not json").unwrap_err();
        assert!(matches!(err, BridgeError::MalformedOptions(_)));
    }

    #[test]
    fn relative_url_is_invalid() {
        let err =
            RequestDescriptor::parse("/api/x", r#"{"method":"GET","headers":{}}"#).unwrap_err();
        assert!(matches!(err, BridgeError::InvalidUrl { .. }));
    }

    #[test]
    fn method_with_space_is_invalid() {
        let err = RequestDescriptor::parse("https://example.com/", r#"{"method":"GE T","headers":{}}"#)
            .unwrap_err();
        assert!(matches!(err, BridgeError::InvalidMethod(_)));
    }

    #[test]
    fn header_injection_is_rejected() {
        let err = RequestDescriptor::parse(
            "https://example.com/",
            r#"{"method":"GET","headers":{"X-A":"1\r\nX-B: 2"}}"#,
        )
        .unwrap_err();
        assert!(matches!(err, BridgeError::InvalidHeader(name) if name == "X-A"));

        let err = RequestDescriptor::parse(
            "https://example.com/",
            r#"{"method":"GET","headers":{"Bad Name":"1"}}"#,
        )
        .unwrap_err();
        assert!(matches!(err, BridgeError::InvalidHeader(_)));
    }

    #[test]
    fn fetch_call_uses_camel_case() {
        let call: FetchCall = serde_json::from_str(
            r#"{"url":"https://example.com","options":"{}","callbackId":"tok1"}"#,
        )
        .unwrap();
        assert_eq!(call.callback_id, "tok1");
        assert_eq!(call.options, "{}");
    }
}
