//! Runs validated requests against the network through the shared jar.

use std::sync::Arc;

use crate::cookie::PersistentCookieJar;
use crate::descriptor::RequestDescriptor;
use crate::error::BridgeError;
use crate::settlement::{Rejection, Settlement};

/// Long-lived HTTP client wired to the persistent cookie jar.
///
/// Cheap to clone; clones share the connection pool and the jar.
#[derive(Clone)]
pub struct HttpExecutor {
    client: reqwest::Client,
    jar: Arc<PersistentCookieJar>,
}

impl HttpExecutor {
    pub fn new(
        jar: Arc<PersistentCookieJar>,
        user_agent: Option<&str>,
    ) -> Result<Self, BridgeError> {
        let mut builder = reqwest::Client::builder().cookie_provider(Arc::clone(&jar));
        if let Some(ua) = user_agent {
            builder = builder.user_agent(ua);
        }
        let client = builder
            .build()
            .map_err(|e| BridgeError::Client(e.to_string()))?;
        Ok(Self { client, jar })
    }

    pub fn jar(&self) -> &Arc<PersistentCookieJar> {
        &self.jar
    }

    /// Build the `reqwest::Request` for a descriptor without sending it.
    pub fn build_request(
        &self,
        descriptor: &RequestDescriptor,
    ) -> Result<reqwest::Request, BridgeError> {
        let mut builder = self
            .client
            .request(descriptor.method.clone(), descriptor.url.clone())
            .headers(descriptor.headers.clone());
        if let Some(pairs) = &descriptor.form {
            builder = builder.form(pairs);
        }
        builder.build().map_err(|e| BridgeError::Client(e.to_string()))
    }

    /// Send the request and classify the outcome.
    ///
    /// 2xx and 3xx resolve with the body text; other statuses reject with the
    /// status code and the server's reason phrase; anything that prevents a complete
    /// response rejects with status 400.
    pub async fn execute(&self, descriptor: &RequestDescriptor) -> Settlement {
        let request = match self.build_request(descriptor) {
            Ok(r) => r,
            Err(e) => return Settlement::from(e),
        };

        let response = match self.client.execute(request).await {
            Ok(r) => r,
            Err(e) => {
                tracing::debug!(url = %descriptor.url, error = %e, "bridge request failed");
                return Settlement::from(BridgeError::transport(&e));
            }
        };

        let status = response.status();
        if !(status.is_success() || status.is_redirection()) {
            tracing::debug!(url = %descriptor.url, status = status.as_u16(), "bridge request rejected");
            let reason = response
                .extensions()
                .get::<hyper::ext::ReasonPhrase>()
                .and_then(|r| std::str::from_utf8(r.as_bytes()).ok());
            return Settlement::Reject(Rejection::with_reason(status, reason));
        }

        match response.text().await {
            Ok(body) => {
                tracing::debug!(
                    url = %descriptor.url,
                    status = status.as_u16(),
                    len = body.len(),
                    "bridge request resolved"
                );
                Settlement::Resolve(body)
            }
            Err(e) => {
                tracing::debug!(url = %descriptor.url, error = %e, "failed to read response body");
                Settlement::from(BridgeError::transport(&e))
            }
        }
    }
}

impl std::fmt::Debug for HttpExecutor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpExecutor")
            .field("jar_path", &self.jar.path())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use reqwest::header::CONTENT_TYPE;

    use super::*;

    fn executor() -> HttpExecutor {
        HttpExecutor::new(Arc::new(PersistentCookieJar::in_memory()), Some("fetcher-test")).unwrap()
    }

    fn body_text(req: &reqwest::Request) -> Option<String> {
        req.body()
            .and_then(|b| b.as_bytes())
            .map(|b| String::from_utf8(b.to_vec()).unwrap())
    }

    #[test]
    fn get_request_has_no_body() {
        let d = RequestDescriptor::parse(
            "https://example.com/x",
            r#"{"method":"GET","headers":{"X-Token":"t"}}"#,
        )
        .unwrap();
        let req = executor().build_request(&d).unwrap();
        assert_eq!(req.method(), reqwest::Method::GET);
        assert!(req.body().is_none());
        assert_eq!(req.headers()["x-token"], "t");
    }

    #[test]
    fn post_request_is_form_encoded() {
        let d = RequestDescriptor::parse(
            "https://example.com/login",
            r#"{"method":"POST","headers":{},"form":"a=1&b=hello%20world"}"#,
        )
        .unwrap();
        let req = executor().build_request(&d).unwrap();
        assert_eq!(
            req.headers()[CONTENT_TYPE],
            "application/x-www-form-urlencoded"
        );
        assert_eq!(body_text(&req).as_deref(), Some("a=1&b=hello+world"));
    }

    #[test]
    fn post_without_form_has_empty_body() {
        let d = RequestDescriptor::parse("https://example.com/", r#"{"method":"post","headers":{}}"#)
            .unwrap();
        let req = executor().build_request(&d).unwrap();
        assert_eq!(body_text(&req).as_deref(), Some(""));
    }

    #[test]
    fn executor_shares_jar() {
        let jar = Arc::new(PersistentCookieJar::in_memory());
        let exec = HttpExecutor::new(Arc::clone(&jar), None).unwrap();
        assert!(Arc::ptr_eq(exec.jar(), &jar));
    }
}
