use serde::Serialize;

use crate::domain::product::{CategoryRef, Product};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryRefDto {
    pub id: i32,
    pub name: String,
}

impl From<&CategoryRef> for CategoryRefDto {
    fn from(value: &CategoryRef) -> Self {
        Self {
            id: value.id.get(),
            name: value.name.as_str().to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductDto {
    pub id: i32,
    pub title: String,
    pub description: Option<String>,
    pub price: f64,
    pub stock: i32,
    pub category: Option<CategoryRefDto>,
    pub image_url: Option<String>,
}

impl From<&Product> for ProductDto {
    fn from(value: &Product) -> Self {
        Self {
            id: value.id.get(),
            title: value.title.as_str().to_string(),
            description: value.description.clone(),
            price: value.price.get(),
            stock: value.stock,
            category: value.category.as_ref().map(CategoryRefDto::from),
            image_url: value.image_url.clone(),
        }
    }
}
