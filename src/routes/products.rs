use actix_multipart::form::MultipartForm;
use actix_web::{HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use serde::Deserialize;
use tera::Tera;

use crate::domain::types::{CategoryId, ProductId};
use crate::dto::categories::CategoryDto;
use crate::dto::products::ProductDto;
use crate::forms::products::{SaveProductForm, SaveProductFormPayload};
use crate::pagination::DEFAULT_ITEMS_PER_PAGE;
use crate::repository::DieselRepository;
use crate::routes::{base_context, redirect, render_template};
use crate::services::ServiceError;
use crate::services::categories::list_categories as list_categories_service;
use crate::services::products::{
    create_product as create_product_service, delete_product as delete_product_service,
    get_product as get_product_service, list_products_by_page,
    update_product as update_product_service,
};
use crate::storage::FsBlobStore;

#[derive(Debug, Deserialize)]
pub struct ProductsPageQuery {
    page: Option<usize>,
    category_id: Option<i32>,
    new: Option<String>,
    edit: Option<i32>,
}

#[get("/products")]
pub async fn show_products(
    flash_messages: IncomingFlashMessages,
    repo: web::Data<DieselRepository>,
    tera: web::Data<Tera>,
    query: web::Query<ProductsPageQuery>,
) -> impl Responder {
    let mut context = base_context(&flash_messages, "products");

    let category = query.category_id.and_then(|id| CategoryId::new(id).ok());
    let page = query.page.unwrap_or(1);

    let products = match list_products_by_page(page, DEFAULT_ITEMS_PER_PAGE, category, repo.get_ref())
    {
        Ok(products) => products,
        Err(e) => {
            context.insert("error_message", &e.to_string());
            return render_template(&tera, "products/index.html", &context);
        }
    };

    let categories = match list_categories_service(repo.get_ref()) {
        Ok(categories) => categories.iter().map(CategoryDto::from).collect::<Vec<_>>(),
        Err(e) => {
            context.insert("error_message", &e.to_string());
            return render_template(&tera, "products/index.html", &context);
        }
    };

    context.insert("products", &products);
    context.insert("categories", &categories);
    context.insert("filter_category_id", &query.category_id);

    if query.new.is_some() {
        context.insert("modal", "new");
    } else if let Some(id) = query.edit {
        let editing = ProductId::new(id)
            .ok()
            .and_then(|id| get_product_service(id, repo.get_ref()).ok());
        if let Some(product) = editing {
            context.insert("modal", "edit");
            context.insert("editing", &ProductDto::from(&product));
        }
    }

    render_template(&tera, "products/index.html", &context)
}

#[post("/products")]
pub async fn add_product(
    repo: web::Data<DieselRepository>,
    store: web::Data<FsBlobStore>,
    MultipartForm(form): MultipartForm<SaveProductForm>,
) -> impl Responder {
    let payload: SaveProductFormPayload = match form.try_into() {
        Ok(payload) => payload,
        Err(e) => {
            FlashMessage::error(e.to_string()).send();
            return redirect("/products");
        }
    };

    match create_product_service(payload, repo.get_ref(), store.get_ref()) {
        Ok(_) => FlashMessage::success("Product created.").send(),
        Err(e) => FlashMessage::error(e.to_string()).send(),
    }

    redirect("/products")
}

#[post("/products/{product_id}/update")]
pub async fn update_product(
    product_id: web::Path<i32>,
    repo: web::Data<DieselRepository>,
    store: web::Data<FsBlobStore>,
    MultipartForm(form): MultipartForm<SaveProductForm>,
) -> impl Responder {
    let id = match ProductId::new(product_id.into_inner()) {
        Ok(id) => id,
        Err(e) => {
            FlashMessage::error(e.to_string()).send();
            return redirect("/products");
        }
    };

    let payload: SaveProductFormPayload = match form.try_into() {
        Ok(payload) => payload,
        Err(e) => {
            FlashMessage::error(e.to_string()).send();
            return redirect("/products");
        }
    };

    match update_product_service(id, payload, repo.get_ref(), store.get_ref()) {
        Ok(_) => FlashMessage::success("Product updated.").send(),
        Err(ServiceError::NotFound) => FlashMessage::error("Product not found.").send(),
        Err(e) => FlashMessage::error(e.to_string()).send(),
    }

    redirect("/products")
}

#[post("/products/{product_id}/delete")]
pub async fn delete_product(
    product_id: web::Path<i32>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let id = match ProductId::new(product_id.into_inner()) {
        Ok(id) => id,
        Err(e) => {
            FlashMessage::error(e.to_string()).send();
            return redirect("/products");
        }
    };

    match delete_product_service(id, repo.get_ref()) {
        Ok(()) => FlashMessage::success("Product deleted.").send(),
        Err(ServiceError::NotFound) => FlashMessage::error("Product not found.").send(),
        Err(e) => FlashMessage::error(e.to_string()).send(),
    }

    redirect("/products")
}
