use actix_web::{HttpResponse, Responder, get, web};
use log::error;
use serde::Deserialize;

use crate::domain::types::CategoryId;
use crate::pagination::DEFAULT_ITEMS_PER_PAGE;
use crate::repository::DieselRepository;
use crate::services::products::list_products_by_page;

#[derive(Deserialize, Debug)]
struct ApiV1ProductsQueryParams {
    page: Option<usize>,
    per_page: Option<usize>,
    category_id: Option<i32>,
}

#[get("/v1/products")]
pub async fn api_v1_products(
    params: web::Query<ApiV1ProductsQueryParams>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let category = match params.category_id {
        Some(id) => match CategoryId::new(id) {
            Ok(id) => Some(id),
            Err(_) => return HttpResponse::NotFound().finish(),
        },
        None => None,
    };

    let page = params.page.unwrap_or(1);
    let per_page = params.per_page.unwrap_or(DEFAULT_ITEMS_PER_PAGE);

    match list_products_by_page(page, per_page, category, repo.get_ref()) {
        Ok(products) => HttpResponse::Ok().json(products),
        Err(e) => {
            error!("Failed to list products: {e}");
            HttpResponse::InternalServerError().finish()
        }
    }
}
