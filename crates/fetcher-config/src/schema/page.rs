use serde::{Deserialize, Serialize};

/// The remote page hosted by the shell.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PageConfig {
    /// URL loaded into the WebView at startup.
    pub home_url: String,
    /// Custom user agent for both the WebView and bridge requests.
    pub user_agent: Option<String>,
    /// Enable the engine's remote inspector.
    pub devtools: bool,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            home_url: "https://test.cors-with-cookie.qinglianjie.cn/fetch-test/index.html".into(),
            user_agent: None,
            devtools: cfg!(debug_assertions),
        }
    }
}

/// Which URLs the hosted page may navigate to.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct NavigationConfig {
    /// Allowed URL prefixes. Empty allows every URL.
    pub allowed_prefixes: Vec<String>,
}

impl NavigationConfig {
    /// Check whether `url` passes the allow-list.
    pub fn is_allowed(&self, url: &str) -> bool {
        fetcher_common::is_navigation_allowed(&self.allowed_prefixes, url)
    }
}
