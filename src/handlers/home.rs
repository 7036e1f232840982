use actix_web::{HttpRequest, HttpResponse, web};

use super::render_page;
use crate::views;

pub async fn index(req: HttpRequest) -> HttpResponse {
    render_page(&req, views::index_page)
}

pub fn home_config(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(index));
}
