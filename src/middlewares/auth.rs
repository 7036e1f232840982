use crate::error::AppError;
use crate::models::CurrentEmployee;
use crate::utils::flash::notice_cookie;
use crate::utils::{JwtService, Notice};
use actix_web::body::EitherBody;
use actix_web::cookie::{Cookie, SameSite, time};
use actix_web::dev::Payload;
use actix_web::http::header;
use actix_web::{
    Error, FromRequest, HttpMessage, HttpRequest, HttpResponse,
    dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready},
};
use futures_util::future::LocalBoxFuture;
use std::future::{Ready, ready};

pub const SESSION_COOKIE: &str = "session";
pub const LOGIN_PATH: &str = "/login";

// Pages reachable without a session
struct PublicPaths {
    exact_paths: Vec<&'static str>,
}

impl PublicPaths {
    fn new() -> Self {
        Self {
            exact_paths: vec!["/", LOGIN_PATH],
        }
    }

    fn is_public_path(&self, path: &str) -> bool {
        self.exact_paths.contains(&path)
    }
}

/// Session cookie carrying the signed employee id.
pub fn session_cookie(token: String, max_age_secs: i64) -> Cookie<'static> {
    Cookie::build(SESSION_COOKIE, token)
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .max_age(time::Duration::seconds(max_age_secs))
        .finish()
}

pub fn clear_session_cookie() -> Cookie<'static> {
    let mut cookie = Cookie::build(SESSION_COOKIE, "").path("/").finish();
    cookie.make_removal();
    cookie
}

/// Rejects requests to protected pages that carry no valid session by
/// redirecting to the login page with a notice. Valid sessions get a
/// [`CurrentEmployee`] in the request extensions.
pub struct SessionGate {
    jwt_service: JwtService,
}

impl SessionGate {
    pub fn new(jwt_service: JwtService) -> Self {
        Self { jwt_service }
    }
}

impl<S, B> Transform<S, ServiceRequest> for SessionGate
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = SessionGateService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(SessionGateService {
            service,
            jwt_service: self.jwt_service.clone(),
            public_paths: PublicPaths::new(),
        }))
    }
}

pub struct SessionGateService<S> {
    service: S,
    jwt_service: JwtService,
    public_paths: PublicPaths,
}

impl<S, B> Service<ServiceRequest> for SessionGateService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        if self.public_paths.is_public_path(req.path()) {
            let fut = self.service.call(req);
            return Box::pin(async move { Ok(fut.await?.map_into_left_body()) });
        }

        let employee_id = req
            .cookie(SESSION_COOKIE)
            .and_then(|cookie| self.jwt_service.verify_session_token(cookie.value()).ok());

        match employee_id {
            Some(employee_id) => {
                req.extensions_mut().insert(CurrentEmployee(employee_id));
                let fut = self.service.call(req);
                Box::pin(async move { Ok(fut.await?.map_into_left_body()) })
            }
            None => {
                log::warn!("Unauthenticated request to {} redirected", req.path());
                let response = HttpResponse::Found()
                    .insert_header((header::LOCATION, LOGIN_PATH))
                    .cookie(notice_cookie(&Notice::error("Please login first")))
                    .cookie(clear_session_cookie())
                    .finish();
                let (req, _) = req.into_parts();
                Box::pin(async move {
                    Ok(ServiceResponse::new(req, response).map_into_right_body())
                })
            }
        }
    }
}

impl FromRequest for CurrentEmployee {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(
            req.extensions()
                .get::<CurrentEmployee>()
                .copied()
                .ok_or_else(|| AppError::AuthError("Please login first".to_string())),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{App, test, web};

    async fn whoami(employee: CurrentEmployee) -> HttpResponse {
        HttpResponse::Ok().body(employee.0.to_string())
    }

    fn jwt() -> JwtService {
        JwtService::new("gate-secret", 3600)
    }

    #[actix_web::test]
    async fn test_missing_session_redirects_to_login() {
        let app = test::init_service(
            App::new()
                .wrap(SessionGate::new(jwt()))
                .route("/dashboard", web::get().to(whoami)),
        )
        .await;

        let resp = test::call_service(&app, test::TestRequest::get().uri("/dashboard").to_request()).await;
        assert_eq!(resp.status(), actix_web::http::StatusCode::FOUND);
        assert_eq!(resp.headers().get(header::LOCATION).unwrap(), LOGIN_PATH);
    }

    #[actix_web::test]
    async fn test_valid_session_reaches_handler() {
        let jwt = jwt();
        let token = jwt.generate_session_token(3, "admin").unwrap();
        let app = test::init_service(
            App::new()
                .wrap(SessionGate::new(jwt))
                .route("/dashboard", web::get().to(whoami)),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/dashboard")
            .cookie(session_cookie(token, 3600))
            .to_request();
        let body = test::call_and_read_body(&app, req).await;
        assert_eq!(body, web::Bytes::from_static(b"3"));
    }

    #[actix_web::test]
    async fn test_forged_session_is_rejected() {
        let forged = JwtService::new("other-secret", 3600)
            .generate_session_token(1, "admin")
            .unwrap();
        let app = test::init_service(
            App::new()
                .wrap(SessionGate::new(jwt()))
                .route("/dashboard", web::get().to(whoami)),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/dashboard")
            .cookie(session_cookie(forged, 3600))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), actix_web::http::StatusCode::FOUND);
    }

    #[actix_web::test]
    async fn test_public_paths_pass_through() {
        let app = test::init_service(
            App::new()
                .wrap(SessionGate::new(jwt()))
                .route("/login", web::get().to(|| async { HttpResponse::Ok().finish() })),
        )
        .await;

        let resp = test::call_service(&app, test::TestRequest::get().uri("/login").to_request()).await;
        assert!(resp.status().is_success());
    }
}
