use actix_web::{HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use serde::Deserialize;
use tera::Tera;

use crate::domain::types::CategoryId;
use crate::dto::categories::{CategoriesPage, CategoryDto, CategoryFormState, ModalRequest};
use crate::forms::categories::{SaveCategoryForm, SaveCategoryFormPayload};
use crate::repository::{CategoryReader, DieselRepository};
use crate::routes::{base_context, redirect, render_template};
use crate::services::ServiceError;
use crate::services::categories::{
    create_category as create_category_service, delete_category as delete_category_service,
    list_categories as list_categories_service, show_categories_page,
    update_category as update_category_service,
};

#[derive(Debug, Deserialize)]
pub struct CategoriesPageQuery {
    /// Any value opens the empty create modal.
    new: Option<String>,
    /// Opens the edit modal prefilled from this row.
    edit: Option<i32>,
}

fn modal_request(query: &CategoriesPageQuery) -> ModalRequest {
    if let Some(id) = query.edit {
        match CategoryId::new(id) {
            Ok(id) => ModalRequest::Edit(id),
            Err(_) => ModalRequest::None,
        }
    } else if query.new.is_some() {
        ModalRequest::New
    } else {
        ModalRequest::None
    }
}

fn render_page(tera: &Tera, mut context: tera::Context, page: CategoriesPage) -> HttpResponse {
    match page {
        CategoriesPage::Loading => {
            context.insert("state", "loading");
        }
        CategoriesPage::Error { message } => {
            context.insert("state", "error");
            context.insert("error_message", &message);
        }
        CategoriesPage::List { categories } => {
            context.insert("state", "list");
            context.insert("categories", &categories);
        }
        CategoriesPage::Editing {
            categories,
            form,
            target,
        } => {
            context.insert("state", "editing");
            context.insert("categories", &categories);
            context.insert("form", &form);
            context.insert("target", &target.map(|id| id.get()));
        }
    }
    render_template(tera, "categories/index.html", &context)
}

/// Re-render the page in the editing state after a failed submission, with
/// the submitted values intact and the failure message as an alert.
fn render_editing_with_error<R: CategoryReader>(
    tera: &Tera,
    repo: &R,
    form: CategoryFormState,
    target: Option<CategoryId>,
    message: String,
) -> HttpResponse {
    let mut context = tera::Context::new();
    context.insert("alerts", &vec![(message, "danger")]);
    context.insert("current_page", "categories");

    let page = match list_categories_service(repo) {
        Ok(categories) => CategoriesPage::Editing {
            categories: categories.iter().map(CategoryDto::from).collect(),
            form,
            target,
        },
        Err(e) => CategoriesPage::Error {
            message: e.to_string(),
        },
    };

    render_page(tera, context, page)
}

#[get("/categories")]
pub async fn show_categories(
    flash_messages: IncomingFlashMessages,
    repo: web::Data<DieselRepository>,
    tera: web::Data<Tera>,
    query: web::Query<CategoriesPageQuery>,
) -> impl Responder {
    let page = show_categories_page(modal_request(&query), repo.get_ref());
    render_page(&tera, base_context(&flash_messages, "categories"), page)
}

#[post("/categories")]
pub async fn add_category(
    repo: web::Data<DieselRepository>,
    tera: web::Data<Tera>,
    web::Form(form): web::Form<SaveCategoryForm>,
) -> impl Responder {
    let submitted = CategoryFormState {
        name: form.name.clone(),
        description: form.description.clone().unwrap_or_default(),
    };

    let payload: SaveCategoryFormPayload = match form.try_into() {
        Ok(payload) => payload,
        Err(e) => {
            return render_editing_with_error(
                &tera,
                repo.get_ref(),
                submitted,
                None,
                e.to_string(),
            );
        }
    };

    match create_category_service(payload, repo.get_ref()) {
        Ok(_) => {
            FlashMessage::success("Category created.").send();
            redirect("/categories")
        }
        Err(e) => render_editing_with_error(&tera, repo.get_ref(), submitted, None, e.to_string()),
    }
}

#[post("/categories/{category_id}/update")]
pub async fn update_category(
    category_id: web::Path<i32>,
    repo: web::Data<DieselRepository>,
    tera: web::Data<Tera>,
    web::Form(form): web::Form<SaveCategoryForm>,
) -> impl Responder {
    let id = match CategoryId::new(category_id.into_inner()) {
        Ok(id) => id,
        Err(e) => {
            FlashMessage::error(e.to_string()).send();
            return redirect("/categories");
        }
    };

    let submitted = CategoryFormState {
        name: form.name.clone(),
        description: form.description.clone().unwrap_or_default(),
    };

    let payload: SaveCategoryFormPayload = match form.try_into() {
        Ok(payload) => payload,
        Err(e) => {
            return render_editing_with_error(
                &tera,
                repo.get_ref(),
                submitted,
                Some(id),
                e.to_string(),
            );
        }
    };

    match update_category_service(id, payload, repo.get_ref()) {
        Ok(_) => {
            FlashMessage::success("Category updated.").send();
            redirect("/categories")
        }
        Err(ServiceError::NotFound) => render_editing_with_error(
            &tera,
            repo.get_ref(),
            submitted,
            Some(id),
            "Category not found.".to_string(),
        ),
        Err(e) => {
            render_editing_with_error(&tera, repo.get_ref(), submitted, Some(id), e.to_string())
        }
    }
}

#[post("/categories/{category_id}/delete")]
pub async fn delete_category(
    category_id: web::Path<i32>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let id = match CategoryId::new(category_id.into_inner()) {
        Ok(id) => id,
        Err(e) => {
            FlashMessage::error(e.to_string()).send();
            return redirect("/categories");
        }
    };

    match delete_category_service(id, repo.get_ref()) {
        Ok(()) => FlashMessage::success("Category deleted.").send(),
        Err(ServiceError::NotFound) => FlashMessage::error("Category not found.").send(),
        Err(e) => FlashMessage::error(e.to_string()).send(),
    }

    redirect("/categories")
}
