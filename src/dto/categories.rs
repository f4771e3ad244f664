//! View models for the categories admin page, including the explicit page
//! state machine the handlers render from.

use serde::Serialize;

use crate::domain::category::Category;
use crate::domain::types::CategoryId;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryDto {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
}

impl From<&Category> for CategoryDto {
    fn from(value: &Category) -> Self {
        Self {
            id: value.id.get(),
            name: value.name.as_str().to_string(),
            description: value.description.clone(),
        }
    }
}

/// Values held by the modal form. Mirrors the entity being edited and is
/// discarded whenever the modal closes.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CategoryFormState {
    pub name: String,
    pub description: String,
}

impl From<&CategoryDto> for CategoryFormState {
    fn from(value: &CategoryDto) -> Self {
        Self {
            name: value.name.clone(),
            description: value.description.clone().unwrap_or_default(),
        }
    }
}

/// Modal action requested through the page URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalRequest {
    None,
    New,
    Edit(CategoryId),
}

/// State of the categories admin page.
///
/// The page starts in `Loading`, resolves the category fetch into `List` or
/// `Error`, and moves between `List` and `Editing` as the modal opens and
/// closes. Handlers pass this value to the template instead of keeping any
/// ambient mutable fields.
#[derive(Debug, Clone, PartialEq)]
pub enum CategoriesPage {
    Loading,
    Error {
        message: String,
    },
    List {
        categories: Vec<CategoryDto>,
    },
    Editing {
        categories: Vec<CategoryDto>,
        form: CategoryFormState,
        /// Id of the category being edited; `None` while creating.
        target: Option<CategoryId>,
    },
}

impl CategoriesPage {
    /// Initial state before the first fetch resolves.
    pub fn new() -> Self {
        Self::Loading
    }

    /// Apply the outcome of the category list fetch.
    pub fn resolve(self, outcome: Result<Vec<Category>, String>) -> Self {
        match outcome {
            Ok(categories) => Self::List {
                categories: categories.iter().map(CategoryDto::from).collect(),
            },
            Err(message) => Self::Error { message },
        }
    }

    /// Open the create/edit modal from the list. An edit request for an id
    /// that is not in the list falls back to the plain list.
    pub fn open(self, modal: ModalRequest) -> Self {
        let Self::List { categories } = self else {
            return self;
        };

        match modal {
            ModalRequest::None => Self::List { categories },
            ModalRequest::New => Self::Editing {
                categories,
                form: CategoryFormState::default(),
                target: None,
            },
            ModalRequest::Edit(id) => {
                let form = categories
                    .iter()
                    .find(|c| c.id == id.get())
                    .map(CategoryFormState::from);
                match form {
                    Some(form) => Self::Editing {
                        categories,
                        form,
                        target: Some(id),
                    },
                    None => Self::List { categories },
                }
            }
        }
    }

    /// Close the modal, discarding the form state.
    pub fn close(self) -> Self {
        match self {
            Self::Editing { categories, .. } => Self::List { categories },
            other => other,
        }
    }
}

impl Default for CategoriesPage {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::CategoryName;
    use chrono::DateTime;

    fn category(id: i32, name: &str) -> Category {
        Category {
            id: CategoryId::new(id).unwrap(),
            name: CategoryName::new(name).unwrap(),
            description: Some(format!("{name} products")),
            created_at: DateTime::from_timestamp(0, 0).unwrap().naive_utc(),
            updated_at: DateTime::from_timestamp(0, 0).unwrap().naive_utc(),
        }
    }

    #[test]
    fn resolve_keeps_fetch_order() {
        let page = CategoriesPage::new().resolve(Ok(vec![category(1, "A"), category(2, "B")]));

        let CategoriesPage::List { categories } = page else {
            panic!("expected list state");
        };
        assert_eq!(categories.len(), 2);
        assert_eq!(categories[0].name, "A");
        assert_eq!(categories[1].name, "B");
    }

    #[test]
    fn resolve_failure_carries_the_message() {
        let page = CategoriesPage::new().resolve(Err("network error".to_string()));
        assert_eq!(
            page,
            CategoriesPage::Error {
                message: "network error".to_string()
            }
        );
    }

    #[test]
    fn opening_new_starts_with_an_empty_form() {
        let page = CategoriesPage::new()
            .resolve(Ok(vec![category(1, "A")]))
            .open(ModalRequest::New);

        let CategoriesPage::Editing { form, target, .. } = page else {
            panic!("expected editing state");
        };
        assert_eq!(form, CategoryFormState::default());
        assert_eq!(target, None);
    }

    #[test]
    fn opening_edit_prefills_the_form_from_the_row() {
        let page = CategoriesPage::new()
            .resolve(Ok(vec![category(1, "A"), category(2, "B")]))
            .open(ModalRequest::Edit(CategoryId::new(2).unwrap()));

        let CategoriesPage::Editing { form, target, .. } = page else {
            panic!("expected editing state");
        };
        assert_eq!(form.name, "B");
        assert_eq!(form.description, "B products");
        assert_eq!(target, Some(CategoryId::new(2).unwrap()));
    }

    #[test]
    fn editing_an_unknown_id_falls_back_to_the_list() {
        let page = CategoriesPage::new()
            .resolve(Ok(vec![category(1, "A")]))
            .open(ModalRequest::Edit(CategoryId::new(99).unwrap()));

        assert!(matches!(page, CategoriesPage::List { .. }));
    }

    #[test]
    fn closing_the_modal_discards_the_form() {
        let page = CategoriesPage::new()
            .resolve(Ok(vec![category(1, "A")]))
            .open(ModalRequest::New)
            .close();

        assert!(matches!(page, CategoriesPage::List { .. }));
    }

    #[test]
    fn open_is_a_no_op_on_an_error_page() {
        let page = CategoriesPage::new()
            .resolve(Err("boom".to_string()))
            .open(ModalRequest::New);

        assert!(matches!(page, CategoriesPage::Error { .. }));
    }
}
