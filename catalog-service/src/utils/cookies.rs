use crate::services::session::SessionStorage;
use tower_cookies::{cookie::SameSite, Cookie, Cookies};

/// Session memory kept in browser-session cookies.
///
/// The cookies carry no expiry, so they go away with the browsing session.
/// `CookieManagerLayer` percent-decodes request cookies and turns changes
/// into percent-encoded `Set-Cookie` headers. Removing a cookie the browser
/// never sent is a no-op.
#[derive(Clone)]
pub struct CookieSession {
    cookies: Cookies,
}

impl CookieSession {
    pub fn new(cookies: Cookies) -> Self {
        Self { cookies }
    }
}

fn session_cookie(name: &str, value: String) -> Cookie<'static> {
    let mut cookie = Cookie::new(name.to_string(), value);
    cookie.set_path("/");
    cookie.set_http_only(true);
    cookie.set_same_site(SameSite::Lax);
    cookie
}

impl SessionStorage for CookieSession {
    fn get(&self, key: &str) -> Option<String> {
        self.cookies
            .get(key)
            .map(|cookie| cookie.value().trim_matches('"').to_string())
    }

    fn set(&mut self, key: &str, value: String) {
        self.cookies.add(session_cookie(key, value));
    }

    fn remove(&mut self, key: &str) {
        self.cookies.remove(session_cookie(key, String::new()));
    }
}
