use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, RwLock};
use std::time::Duration;

use chrono::Utc;
use reqwest::header::HeaderValue;
use reqwest::Url;
use serde::{Deserialize, Serialize};
use tokio::runtime::Handle;
use tokio::task::JoinHandle;

use super::StoredCookie;
use crate::error::CookieError;

const JAR_FORMAT_VERSION: u32 = 1;

type CookieKey = (String, String, String);

#[derive(Serialize, Deserialize)]
struct JarFile {
    version: u32,
    cookies: Vec<StoredCookie>,
}

/// Cookie jar shared by every request the bridge makes.
///
/// Implements [`reqwest::cookie::CookieStore`], so the HTTP client stores
/// `Set-Cookie` responses and attaches `Cookie` headers on its own. When
/// backed by a file, cookies received on the response path only mark the
/// jar dirty; [`PersistentCookieJar::spawn_flusher`] writes them out off the
/// async workers, and the owner calls [`PersistentCookieJar::save`] once
/// more on shutdown.
pub struct PersistentCookieJar {
    cookies: RwLock<HashMap<CookieKey, StoredCookie>>,
    path: Option<PathBuf>,
    save_lock: Mutex<()>,
    dirty: AtomicBool,
}

impl PersistentCookieJar {
    /// A jar that lives only as long as the process.
    pub fn in_memory() -> Self {
        Self {
            cookies: RwLock::new(HashMap::new()),
            path: None,
            save_lock: Mutex::new(()),
            dirty: AtomicBool::new(false),
        }
    }

    /// Open a jar backed by `path`.
    ///
    /// A missing file starts an empty jar. An unreadable or corrupt file is
    /// logged and also starts empty; it is overwritten on the next save.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let cookies = match load_file(&path) {
            Ok(list) => {
                let now = Utc::now();
                let map: HashMap<_, _> = list
                    .into_iter()
                    .filter(|c| !c.is_expired(now))
                    .map(|c| (c.key(), c))
                    .collect();
                tracing::info!(path = %path.display(), count = map.len(), "cookie jar loaded");
                map
            }
            Err(CookieError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no cookie file yet, starting empty");
                HashMap::new()
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "ignoring unreadable cookie file");
                HashMap::new()
            }
        };

        Self {
            cookies: RwLock::new(cookies),
            path: Some(path),
            save_lock: Mutex::new(()),
            dirty: AtomicBool::new(false),
        }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Store one `Set-Cookie` header received from `url`.
    ///
    /// Returns `true` if the jar changed, in which case it is also marked
    /// dirty until the next save.
    pub fn store(&self, set_cookie: &str, url: &Url) -> bool {
        let now = Utc::now();
        let Some(cookie) = StoredCookie::parse(set_cookie, url, now) else {
            tracing::debug!(url = %url, "ignoring unusable Set-Cookie header");
            return false;
        };
        let mut cookies = self.cookies.write().unwrap_or_else(|e| e.into_inner());
        let changed = if cookie.is_expired(now) {
            cookies.remove(&cookie.key()).is_some()
        } else {
            cookies.insert(cookie.key(), cookie);
            true
        };
        if changed {
            self.dirty.store(true, Ordering::Release);
        }
        changed
    }

    /// Whether the jar holds changes not yet written to disk.
    pub fn is_dirty(&self) -> bool {
        self.dirty.load(Ordering::Acquire)
    }

    /// Save only if something changed since the last save. Returns whether
    /// a write happened.
    pub fn flush(&self) -> Result<bool, CookieError> {
        if self.path.is_none() || !self.is_dirty() {
            return Ok(false);
        }
        self.save()?;
        Ok(true)
    }

    /// Periodically flush a file-backed jar on the blocking pool.
    ///
    /// The task runs until aborted; callers save once more after aborting it
    /// so the last changes are not lost.
    pub fn spawn_flusher(jar: Arc<Self>, runtime: &Handle, every: Duration) -> JoinHandle<()> {
        runtime.spawn(async move {
            let mut ticker = tokio::time::interval(every);
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                if !jar.is_dirty() {
                    continue;
                }
                let jar = jar.clone();
                match tokio::task::spawn_blocking(move || jar.flush()).await {
                    Ok(Ok(_)) => {}
                    Ok(Err(e)) => tracing::warn!(error = %e, "failed to save cookie jar"),
                    Err(e) => tracing::warn!(error = %e, "cookie flush task failed"),
                }
            }
        })
    }

    /// Cookies that apply to `url`, longest path first.
    pub fn cookies_for(&self, url: &Url) -> Vec<StoredCookie> {
        let now = Utc::now();
        let cookies = self.cookies.read().unwrap_or_else(|e| e.into_inner());
        let mut matching: Vec<StoredCookie> = cookies
            .values()
            .filter(|c| c.matches(url, now))
            .cloned()
            .collect();
        matching.sort_by(|a, b| {
            b.path
                .len()
                .cmp(&a.path.len())
                .then_with(|| a.name.cmp(&b.name))
        });
        matching
    }

    /// The `Cookie` header value for a request to `url`, if any cookie applies.
    pub fn cookie_header(&self, url: &Url) -> Option<String> {
        let matching = self.cookies_for(url);
        if matching.is_empty() {
            return None;
        }
        Some(
            matching
                .iter()
                .map(StoredCookie::to_cookie_header)
                .collect::<Vec<_>>()
                .join("; "),
        )
    }

    pub fn len(&self) -> usize {
        self.cookies.read().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        self.cookies
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .clear();
        self.dirty.store(true, Ordering::Release);
        self.persist();
    }

    /// Write the jar to its backing file. A no-op for in-memory jars.
    ///
    /// Expired cookies are dropped first. The file is replaced atomically
    /// via a temporary sibling and a rename.
    pub fn save(&self) -> Result<(), CookieError> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        let _guard = self.save_lock.lock().unwrap_or_else(|e| e.into_inner());
        // changes made after the snapshot below mark the jar dirty again
        self.dirty.store(false, Ordering::Release);

        let snapshot = {
            let now = Utc::now();
            let mut cookies = self.cookies.write().unwrap_or_else(|e| e.into_inner());
            cookies.retain(|_, c| !c.is_expired(now));
            let mut list: Vec<StoredCookie> = cookies.values().cloned().collect();
            list.sort_by(|a, b| a.key().cmp(&b.key()));
            list
        };

        let count = snapshot.len();
        if let Err(e) = write_file(path, snapshot) {
            self.dirty.store(true, Ordering::Release);
            return Err(e);
        }

        tracing::trace!(path = %path.display(), count, "cookie jar saved");
        Ok(())
    }

    fn persist(&self) {
        if let Err(e) = self.save() {
            tracing::warn!(error = %e, "failed to save cookie jar");
        }
    }
}

impl Default for PersistentCookieJar {
    fn default() -> Self {
        Self::in_memory()
    }
}

impl reqwest::cookie::CookieStore for PersistentCookieJar {
    fn set_cookies(&self, cookie_headers: &mut dyn Iterator<Item = &HeaderValue>, url: &Url) {
        let mut changed = false;
        for header in cookie_headers {
            match header.to_str() {
                Ok(raw) => changed |= self.store(raw, url),
                Err(_) => tracing::debug!(url = %url, "skipping non-ascii Set-Cookie header"),
            }
        }
        if changed {
            tracing::trace!(url = %url, "cookie jar changed");
        }
    }

    fn cookies(&self, url: &Url) -> Option<HeaderValue> {
        let header = self.cookie_header(url)?;
        HeaderValue::from_str(&header).ok()
    }
}

fn write_file(path: &Path, cookies: Vec<StoredCookie>) -> Result<(), CookieError> {
    let file = JarFile {
        version: JAR_FORMAT_VERSION,
        cookies,
    };
    let json = serde_json::to_string_pretty(&file)?;

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let tmp = path.with_extension("json.tmp");
    std::fs::write(&tmp, json)?;
    std::fs::rename(&tmp, path)?;
    Ok(())
}

fn load_file(path: &Path) -> Result<Vec<StoredCookie>, CookieError> {
    let raw = std::fs::read_to_string(path)?;
    let file: JarFile = serde_json::from_str(&raw)?;
    if file.version != JAR_FORMAT_VERSION {
        tracing::warn!(
            version = file.version,
            expected = JAR_FORMAT_VERSION,
            "cookie file version mismatch, loading anyway"
        );
    }
    Ok(file.cookies)
}
