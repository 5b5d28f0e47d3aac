// src/utils/flash.rs

use axum_extra::extract::cookie::{Cookie, CookieJar};
use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD as B64;
use serde::{Deserialize, Serialize};

/// Name of the one-shot notice cookie.
const FLASH_COOKIE: &str = "flash";

/// A transient notice surfaced to the user on the next rendered page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Flash {
    pub message: String,
    /// Notice category: "success" or "danger".
    pub category: String,
}

impl Flash {
    pub fn success(message: &str) -> Self {
        Self {
            message: message.to_owned(),
            category: "success".to_owned(),
        }
    }

    pub fn danger(message: &str) -> Self {
        Self {
            message: message.to_owned(),
            category: "danger".to_owned(),
        }
    }
}

/// Queues a notice to be shown after the next redirect.
///
/// The notice is JSON-encoded and base64-wrapped to satisfy cookie value
/// character restrictions.
pub fn set(jar: CookieJar, flash: Flash) -> CookieJar {
    let encoded = match serde_json::to_vec(&flash) {
        Ok(bytes) => B64.encode(bytes),
        Err(_) => return jar,
    };

    let cookie = Cookie::build((FLASH_COOKIE, encoded))
        .path("/")
        .http_only(true)
        .build();
    jar.add(cookie)
}

/// Takes the pending notice off the jar, if any. The cookie is removed so
/// the notice renders exactly once.
pub fn take(jar: CookieJar) -> (CookieJar, Option<Flash>) {
    let value = jar.get(FLASH_COOKIE).map(|c| c.value().to_owned());

    match value {
        Some(value) => {
            let flash = B64
                .decode(value.as_bytes())
                .ok()
                .and_then(|bytes| serde_json::from_slice(&bytes).ok());
            let jar = jar.remove(Cookie::build(FLASH_COOKIE).path("/").build());
            (jar, flash)
        }
        None => (jar, None),
    }
}
