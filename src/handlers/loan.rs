use actix_web::{HttpRequest, HttpResponse, Result, web};

use super::{recover, render_page};
use crate::models::{LoanForm, NewLoan};
use crate::services::LoanService;
use crate::utils::{Notice, redirect_with_notice};
use crate::views;

pub async fn list_loans(
    loan_service: web::Data<LoanService>,
    req: HttpRequest,
) -> Result<HttpResponse> {
    let (loans, customers) = loan_service.loans_page().await?;
    Ok(render_page(&req, |notice| {
        views::loans_page(notice, &loans, &customers)
    }))
}

pub async fn create_loan(
    loan_service: web::Data<LoanService>,
    form: web::Form<LoanForm>,
) -> Result<HttpResponse> {
    let request = match NewLoan::try_from(form.into_inner()) {
        Ok(request) => request,
        Err(e) => return recover("/loans", e),
    };

    match loan_service.create_loan(request).await {
        Ok(_) => Ok(redirect_with_notice(
            "/loans",
            Notice::success("Loan recorded successfully"),
        )),
        Err(e) => recover("/loans", e),
    }
}

pub async fn repay_loan(
    loan_service: web::Data<LoanService>,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    loan_service.repay_loan(path.into_inner()).await?;
    Ok(redirect_with_notice("/loans", Notice::success("Loan marked as paid")))
}

pub fn loan_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/loans")
            .route(web::get().to(list_loans))
            .route(web::post().to(create_loan)),
    )
    .route("/loans/repay/{loan_id}", web::get().to(repay_loan));
}
