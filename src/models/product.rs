use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::product::{
    CategoryRef, NewProduct as DomainNewProduct, Product as DomainProduct,
};
use crate::domain::types::{CategoryName, ProductPrice, ProductTitle, TypeConstraintError};

/// Diesel model representing the `products` table.
#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::products)]
pub struct Product {
    pub id: i32,
    pub title: String,
    pub description: Option<String>,
    pub price: f64,
    pub stock: i32,
    pub category_id: Option<i32>,
    pub image_url: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Insertable form of [`Product`].
#[derive(Debug, Insertable)]
#[diesel(table_name = crate::schema::products)]
pub struct NewProduct {
    pub title: String,
    pub description: Option<String>,
    pub price: f64,
    pub stock: i32,
    pub category_id: Option<i32>,
    pub image_url: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Joined category columns as loaded alongside a product row.
pub type JoinedCategory = Option<(i32, String)>;

impl TryFrom<(Product, JoinedCategory)> for DomainProduct {
    type Error = TypeConstraintError;

    fn try_from((product, category): (Product, JoinedCategory)) -> Result<Self, Self::Error> {
        let category = category
            .map(|(id, name)| {
                Ok::<_, TypeConstraintError>(CategoryRef {
                    id: id.try_into()?,
                    name: CategoryName::new(name)?,
                })
            })
            .transpose()?;

        Ok(Self {
            id: product.id.try_into()?,
            title: ProductTitle::new(product.title)?,
            description: product.description,
            price: ProductPrice::new(product.price)?,
            stock: product.stock,
            category_id: product.category_id.map(TryInto::try_into).transpose()?,
            image_url: product.image_url,
            category,
            created_at: product.created_at,
            updated_at: product.updated_at,
        })
    }
}

impl From<DomainNewProduct> for NewProduct {
    fn from(product: DomainNewProduct) -> Self {
        Self {
            title: product.title.into_inner(),
            description: product.description,
            price: product.price.get(),
            stock: product.stock,
            category_id: product.category_id.map(Into::into),
            image_url: product.image_url,
            created_at: product.created_at,
            updated_at: product.updated_at,
        }
    }
}
