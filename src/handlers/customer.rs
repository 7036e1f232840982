use actix_web::{HttpRequest, HttpResponse, Result, web};

use super::{recover, render_page};
use crate::models::CustomerForm;
use crate::services::CustomerService;
use crate::utils::{Notice, redirect_with_notice};
use crate::views;

pub async fn list_customers(
    customer_service: web::Data<CustomerService>,
    req: HttpRequest,
) -> Result<HttpResponse> {
    let customers = customer_service.list_customers().await?;
    Ok(render_page(&req, |notice| views::customers_page(notice, &customers)))
}

pub async fn create_customer(
    customer_service: web::Data<CustomerService>,
    form: web::Form<CustomerForm>,
) -> Result<HttpResponse> {
    match customer_service.create_customer(form.into_inner().into()).await {
        Ok(_) => Ok(redirect_with_notice(
            "/customers",
            Notice::success("Customer added successfully"),
        )),
        Err(e) => recover("/customers", e),
    }
}

pub fn customer_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/customers")
            .route(web::get().to(list_customers))
            .route(web::post().to(create_customer)),
    );
}
