use actix_web::{HttpRequest, HttpResponse, Result, web};

use super::{recover, render_page};
use crate::middlewares::{clear_session_cookie, session_cookie};
use crate::models::{CurrentEmployee, LoginForm};
use crate::services::AuthService;
use crate::utils::flash::notice_cookie;
use crate::utils::{Notice, redirect_with_notice};
use crate::views;

pub async fn login_form(req: HttpRequest) -> HttpResponse {
    render_page(&req, views::login_page)
}

pub async fn login(
    auth_service: web::Data<AuthService>,
    form: web::Form<LoginForm>,
) -> Result<HttpResponse> {
    let form = form.into_inner();
    match auth_service.login(&form.username, &form.password).await {
        Ok(token) => {
            let max_age = auth_service.jwt_service().session_expires_in();
            Ok(HttpResponse::Found()
                .insert_header((actix_web::http::header::LOCATION, "/dashboard"))
                .cookie(session_cookie(token, max_age))
                .cookie(notice_cookie(&Notice::success("Login successful")))
                .finish())
        }
        Err(e) => recover("/login", e),
    }
}

pub async fn logout(employee: CurrentEmployee) -> HttpResponse {
    log::info!("Employee {} logged out", employee.0);
    let mut response = redirect_with_notice("/login", Notice::success("Logged out successfully"));
    if let Err(e) = response.add_cookie(&clear_session_cookie()) {
        log::error!("Failed to clear session cookie: {e}");
    }
    response
}

pub fn auth_config(cfg: &mut web::ServiceConfig) {
    cfg.route("/login", web::get().to(login_form))
        .route("/login", web::post().to(login))
        .route("/logout", web::get().to(logout));
}
