use actix_web::{HttpRequest, HttpResponse, Result, web};

use super::render_page;
use crate::services::ReportService;
use crate::views;

pub async fn dashboard(
    report_service: web::Data<ReportService>,
    req: HttpRequest,
) -> Result<HttpResponse> {
    let summary = report_service.dashboard_summary().await?;
    Ok(render_page(&req, |notice| views::dashboard_page(notice, &summary)))
}

pub fn dashboard_config(cfg: &mut web::ServiceConfig) {
    cfg.route("/dashboard", web::get().to(dashboard));
}
