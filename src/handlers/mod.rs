pub mod auth;
pub mod customer;
pub mod dashboard;
pub mod home;
pub mod loan;
pub mod report;

pub use auth::auth_config;
pub use customer::customer_config;
pub use dashboard::dashboard_config;
pub use home::home_config;
pub use loan::loan_config;
pub use report::report_config;

use actix_web::{HttpRequest, HttpResponse, web};

use crate::error::AppError;
use crate::utils::flash::{FLASH_COOKIE, clear_notice_cookie};
use crate::utils::{Notice, redirect_with_notice};

/// Registers every page route.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.configure(home_config)
        .configure(auth_config)
        .configure(dashboard_config)
        .configure(customer_config)
        .configure(loan_config)
        .configure(report_config);
}

/// Renders an HTML page, consuming the pending flash notice if there is one.
pub(crate) fn render_page<F>(req: &HttpRequest, page: F) -> HttpResponse
where
    F: FnOnce(Option<&Notice>) -> String,
{
    let cookie = req.cookie(FLASH_COOKIE);
    let notice = cookie
        .as_ref()
        .and_then(|cookie| Notice::decode(cookie.value()));
    let html = page(notice.as_ref());

    let mut response = HttpResponse::Ok();
    response.content_type("text/html; charset=utf-8");
    // An unreadable cookie is dropped too, or every page would re-read it.
    if cookie.is_some() {
        response.cookie(clear_notice_cookie());
    }
    response.body(html)
}

/// Expected failures become a notice on `location`; anything else fails
/// the request.
pub(crate) fn recover(location: &str, err: AppError) -> actix_web::Result<HttpResponse> {
    if err.is_recoverable() {
        log::warn!("{err}");
        Ok(redirect_with_notice(location, Notice::error(err.notice())))
    } else {
        Err(err.into())
    }
}
