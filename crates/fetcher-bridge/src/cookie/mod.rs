//! Persistent cookie storage shared by every bridge request.

mod jar;
mod stored;

pub use jar::PersistentCookieJar;
pub use stored::StoredCookie;
