//! Default TOML config template with inline documentation comments.

/// Generate the default TOML config content with comments.
pub(crate) fn default_config_toml() -> &'static str {
    r##"# Fetcher Configuration
# Schema version 1
# Only override what you want to change -- missing fields use defaults.

[page]
# home_url = "https://test.cors-with-cookie.qinglianjie.cn/fetch-test/index.html"
# user_agent = "Fetcher/0.1"
# devtools = false

[bridge]
# object_name = "AppFetcher"     # window.AppFetcher.fetch(url, jsonOptions, callbackId)
# callback_fn = "callback"       # window.callback(id, "resolve" | "reject", value)
# cookie_namespace = "default"   # cookies persist in <data dir>/fetcher/cookies/<namespace>.json

[navigation]
# allowed_prefixes = []          # empty allows every URL

[window]
# title = "Fetcher"
# width = 1024                   # 200-8192
# height = 768                   # 200-8192

[logging]
# level = "INFO"                 # TRACE, DEBUG, INFO, WARNING, ERROR
"##
}
