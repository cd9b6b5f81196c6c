//! Cookie-backed flag store.
//!
//! Flags live in `document.cookie` as `name=value; path=/; max-age=...`
//! entries. The header parsing is kept in pure helpers so it can be tested
//! natively, away from the browser.

use std::time::Duration;

use guidepost::FlagStore;
use wasm_bindgen::JsCast;
use web_sys::HtmlDocument;

/// `FlagStore` over the browser's cookie jar.
pub struct CookieStore {
    document: HtmlDocument,
}

impl CookieStore {
    /// Attach to the current page's document. `None` outside a browser
    /// context.
    pub fn attach() -> Option<Self> {
        let document = web_sys::window()?
            .document()?
            .dyn_into::<HtmlDocument>()
            .ok()?;
        Some(Self { document })
    }

    fn header(&self) -> String {
        self.document.cookie().unwrap_or_default()
    }

    fn write(&self, directive: &str) {
        if self.document.set_cookie(directive).is_err() {
            log::warn!("failed to write cookie: {directive}");
        }
    }
}

impl FlagStore for CookieStore {
    fn get(&self, key: &str) -> Option<String> {
        find_cookie(&self.header(), key)
    }

    fn set(&mut self, key: &str, value: &str, ttl: Duration) {
        self.write(&set_directive(key, value, ttl));
    }

    fn get_all(&self, prefix: &str) -> Vec<(String, String)> {
        cookies_with_prefix(&self.header(), prefix)
    }

    fn remove(&mut self, key: &str) {
        // An already-expired cookie is how the jar spells "delete".
        self.write(&format!("{key}=; path=/; max-age=0"));
    }
}

/// Build the `Set-Cookie`-style directive for a flag write.
pub fn set_directive(key: &str, value: &str, ttl: Duration) -> String {
    format!("{key}={value}; path=/; max-age={}", ttl.as_secs())
}

/// Find a cookie's value in a `document.cookie` header.
pub fn find_cookie(header: &str, name: &str) -> Option<String> {
    header.split(';').find_map(|entry| {
        let (key, value) = entry.trim().split_once('=')?;
        (key == name).then(|| value.to_string())
    })
}

/// All cookies whose name starts with `prefix`, with the prefix stripped,
/// sorted by suffix for stable enumeration.
pub fn cookies_with_prefix(header: &str, prefix: &str) -> Vec<(String, String)> {
    let mut out: Vec<(String, String)> = header
        .split(';')
        .filter_map(|entry| {
            let (key, value) = entry.trim().split_once('=')?;
            let suffix = key.strip_prefix(prefix)?;
            Some((suffix.to_string(), value.to_string()))
        })
        .collect();
    out.sort();
    out
}
