/// Configuration for creating a new WebView instance.
#[derive(Debug, Clone)]
pub struct WebViewConfig {
    /// Initial URL to load (takes precedence over `html`).
    pub url: Option<String>,
    /// Initial HTML content to render.
    pub html: Option<String>,
    /// Whether to enable dev tools.
    pub devtools: bool,
    /// Custom user agent string.
    pub user_agent: Option<String>,
    /// Scripts run before any page script, on every page load.
    pub init_scripts: Vec<String>,
    /// Navigation allow-list by URL prefix. Empty allows everything.
    pub allowed_prefixes: Vec<String>,
}

impl Default for WebViewConfig {
    fn default() -> Self {
        Self {
            url: None,
            html: None,
            devtools: cfg!(debug_assertions),
            user_agent: None,
            init_scripts: Vec::new(),
            allowed_prefixes: Vec::new(),
        }
    }
}

impl WebViewConfig {
    /// Create a config that loads a URL.
    pub fn with_url(url: impl Into<String>) -> Self {
        Self {
            url: Some(url.into()),
            ..Default::default()
        }
    }

    /// Create a config that renders inline HTML.
    pub fn with_html(html: impl Into<String>) -> Self {
        Self {
            html: Some(html.into()),
            ..Default::default()
        }
    }

    pub fn init_script(mut self, script: impl Into<String>) -> Self {
        self.init_scripts.push(script.into());
        self
    }
}
