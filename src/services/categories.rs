use crate::domain::category::Category;
use crate::domain::types::CategoryId;
use crate::dto::categories::{CategoriesPage, ModalRequest};
use crate::forms::categories::SaveCategoryFormPayload;
use crate::repository::{CategoryReader, CategoryWriter};

use super::{ServiceError, ServiceResult};

/// Fetch all categories ordered by name ascending.
pub fn list_categories<R>(repo: &R) -> ServiceResult<Vec<Category>>
where
    R: CategoryReader,
{
    repo.list_categories().map_err(|e| {
        log::error!("Failed to list categories: {e}");
        e.into()
    })
}

/// Fetch exactly one category by id.
pub fn get_category<R>(id: CategoryId, repo: &R) -> ServiceResult<Category>
where
    R: CategoryReader,
{
    match repo.get_category_by_id(id) {
        Ok(Some(category)) => Ok(category),
        Ok(None) => Err(ServiceError::NotFound),
        Err(e) => {
            log::error!("Failed to get category: {e}");
            Err(e.into())
        }
    }
}

/// Insert a new category and return it with the store-assigned id.
pub fn create_category<R>(payload: SaveCategoryFormPayload, repo: &R) -> ServiceResult<Category>
where
    R: CategoryWriter,
{
    repo.create_category(&payload.into_new_category())
        .map_err(|e| {
            log::error!("Failed to create category: {e}");
            e.into()
        })
}

/// Replace the mutable fields of a category and return the patched row.
pub fn update_category<R>(
    id: CategoryId,
    payload: SaveCategoryFormPayload,
    repo: &R,
) -> ServiceResult<Category>
where
    R: CategoryWriter,
{
    match repo.update_category(id, &payload.into_patch()) {
        Ok(Some(category)) => Ok(category),
        Ok(None) => Err(ServiceError::NotFound),
        Err(e) => {
            log::error!("Failed to update category: {e}");
            Err(e.into())
        }
    }
}

/// Delete a category by id, detaching any products that reference it.
pub fn delete_category<R>(id: CategoryId, repo: &R) -> ServiceResult<()>
where
    R: CategoryReader + CategoryWriter,
{
    match repo.get_category_by_id(id) {
        Ok(Some(_)) => {}
        Ok(None) => return Err(ServiceError::NotFound),
        Err(e) => {
            log::error!("Failed to get category: {e}");
            return Err(e.into());
        }
    }

    match repo.delete_category(id) {
        Ok(_) => Ok(()),
        Err(e) => {
            log::error!("Failed to delete category: {e}");
            Err(e.into())
        }
    }
}

/// Build the categories admin page state: resolve the list fetch, then apply
/// the modal request from the page URL.
pub fn show_categories_page<R>(modal: ModalRequest, repo: &R) -> CategoriesPage
where
    R: CategoryReader,
{
    let outcome = list_categories(repo).map_err(|e| e.to_string());
    CategoriesPage::new().resolve(outcome).open(modal)
}
