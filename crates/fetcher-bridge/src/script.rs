//! Page-side half of the bridge, injected before any page script runs.

use crate::settlement::js_string;

/// `__OBJECT_NAME__` and `__CALLBACK_FN__` are replaced with JSON string
/// literals, so the names are only ever used as property keys.
const BRIDGE_TEMPLATE: &str = r#"
(function() {
    var OBJECT_NAME = __OBJECT_NAME__;
    var CALLBACK_FN = __CALLBACK_FN__;
    var TOKEN_CHARS = "0123456789abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";
    var pending = new Map();

    function randomToken() {
        var out = "";
        var bytes = null;
        if (window.crypto && window.crypto.getRandomValues) {
            bytes = window.crypto.getRandomValues(new Uint8Array(32));
        }
        for (var i = 0; i < 32; i++) {
            var r = bytes ? bytes[i] : Math.floor(Math.random() * 256);
            out += TOKEN_CHARS.charAt(r % TOKEN_CHARS.length);
        }
        return out;
    }

    window[CALLBACK_FN] = function(id, method, value) {
        var entry = pending.get(id);
        if (!entry) {
            return;
        }
        if (method !== "resolve" && method !== "reject") {
            return;
        }
        pending.delete(id);
        entry[method](value);
    };

    window[OBJECT_NAME] = {
        fetch: function(url, jsonOptions, callbackId) {
            window.ipc.postMessage(JSON.stringify({
                kind: "fetch",
                payload: { url: url, options: jsonOptions, callbackId: callbackId }
            }));
        }
    };

    window.Fetcher = function(url, options) {
        return new Promise(function(resolve, reject) {
            var id = randomToken();
            while (pending.has(id)) {
                id = randomToken();
            }
            pending.set(id, { resolve: resolve, reject: reject });
            try {
                window[OBJECT_NAME].fetch(String(url), JSON.stringify(options || {}), id);
            } catch (e) {
                pending.delete(id);
                reject({ status: 400, message: String(e && e.message ? e.message : e) });
            }
        });
    };
})();
"#;

/// Render the bridge script for the configured global names.
pub fn init_script(object_name: &str, callback_fn: &str) -> String {
    BRIDGE_TEMPLATE
        .replace("__OBJECT_NAME__", &js_string(object_name))
        .replace("__CALLBACK_FN__", &js_string(callback_fn))
}
