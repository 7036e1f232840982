use actix_web::HttpResponse;
use actix_web::cookie::{Cookie, SameSite};
use actix_web::http::header;
use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use serde::{Deserialize, Serialize};

pub const FLASH_COOKIE: &str = "flash";

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum NoticeLevel {
    Success,
    Error,
}

/// One-shot message shown on the next rendered page.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }

    /// Cookie-safe encoding.
    pub fn encode(&self) -> String {
        let json = serde_json::to_vec(self).unwrap_or_default();
        URL_SAFE_NO_PAD.encode(json)
    }

    pub fn decode(value: &str) -> Option<Self> {
        let bytes = URL_SAFE_NO_PAD.decode(value).ok()?;
        serde_json::from_slice(&bytes).ok()
    }
}

pub fn notice_cookie(notice: &Notice) -> Cookie<'static> {
    Cookie::build(FLASH_COOKIE, notice.encode())
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .finish()
}

pub fn clear_notice_cookie() -> Cookie<'static> {
    let mut cookie = Cookie::build(FLASH_COOKIE, "").path("/").finish();
    cookie.make_removal();
    cookie
}

/// `302 Found` to `location`, carrying `notice` to the next page.
pub fn redirect_with_notice(location: &str, notice: Notice) -> HttpResponse {
    HttpResponse::Found()
        .insert_header((header::LOCATION, location))
        .cookie(notice_cookie(&notice))
        .finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notice_survives_cookie_encoding() {
        let notice = Notice::error("Amount and duration must be positive; rate, too.");
        let encoded = notice.encode();
        assert!(!encoded.contains(';'));
        assert!(!encoded.contains(' '));
        assert_eq!(Notice::decode(&encoded), Some(notice));
    }

    #[test]
    fn test_tampered_cookie_is_ignored() {
        assert_eq!(Notice::decode("%%%"), None);
        assert_eq!(Notice::decode(&URL_SAFE_NO_PAD.encode("not json")), None);
    }

    #[test]
    fn test_redirect_sets_location_and_cookie() {
        let resp = redirect_with_notice("/customers", Notice::success("Customer added successfully"));
        assert_eq!(resp.status(), actix_web::http::StatusCode::FOUND);
        assert_eq!(
            resp.headers().get(header::LOCATION).unwrap(),
            "/customers"
        );
        let cookie = resp.cookies().find(|c| c.name() == FLASH_COOKIE).unwrap();
        assert_eq!(
            Notice::decode(cookie.value()).unwrap().message,
            "Customer added successfully"
        );
    }
}
