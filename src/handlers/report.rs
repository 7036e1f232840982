use actix_web::{HttpRequest, HttpResponse, Result, web};

use super::render_page;
use crate::services::ReportService;
use crate::views;

pub async fn reports(
    report_service: web::Data<ReportService>,
    req: HttpRequest,
) -> Result<HttpResponse> {
    let breakdown = report_service.report_breakdown().await?;
    Ok(render_page(&req, |notice| views::reports_page(notice, &breakdown)))
}

pub fn report_config(cfg: &mut web::ServiceConfig) {
    cfg.route("/reports", web::get().to(reports));
}
