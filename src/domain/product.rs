use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::{CategoryId, CategoryName, ProductId, ProductPrice, ProductTitle};

/// Category projection carried by a product at read time.
///
/// This is populated by the join when loading products and is never written
/// directly; category changes go through [`Product::category_id`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CategoryRef {
    pub id: CategoryId,
    pub name: CategoryName,
}

/// A catalog product.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub title: ProductTitle,
    pub description: Option<String>,
    pub price: ProductPrice,
    pub stock: i32,
    pub category_id: Option<CategoryId>,
    /// Blob key of the uploaded product image, if any.
    pub image_url: Option<String>,
    /// Read-only joined category, present when `category_id` resolves.
    pub category: Option<CategoryRef>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Information required to create a new [`Product`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewProduct {
    pub title: ProductTitle,
    pub description: Option<String>,
    pub price: ProductPrice,
    pub stock: i32,
    pub category_id: Option<CategoryId>,
    pub image_url: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Field replacement applied to an existing [`Product`].
#[derive(Debug, Clone, PartialEq)]
pub struct ProductPatch {
    pub title: ProductTitle,
    pub description: Option<String>,
    pub price: ProductPrice,
    pub stock: i32,
    pub category_id: Option<CategoryId>,
    /// `None` keeps the stored image key untouched.
    pub image_url: Option<String>,
}
