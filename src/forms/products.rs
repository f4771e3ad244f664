use actix_multipart::form::{MultipartForm, tempfile::TempFile, text::Text};
use chrono::Utc;
use thiserror::Error;

use crate::domain::product::{NewProduct, ProductPatch};
use crate::domain::types::{CategoryId, ProductPrice, ProductTitle, TypeConstraintError};

/// Modal form used for both creating and editing a product.
///
/// Submitted as multipart so the optional image file can ride along with the
/// scalar fields.
#[derive(MultipartForm)]
pub struct SaveProductForm {
    pub title: Text<String>,
    pub description: Option<Text<String>>,
    pub price: Text<f64>,
    pub stock: Text<i32>,
    /// Value of the category `<select>`; an empty string means "no category".
    pub category_id: Option<Text<String>>,
    #[multipart(limit = "5MB")]
    pub image: Option<TempFile>,
}

/// Image content lifted out of the multipart upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedImage {
    pub file_name: Option<String>,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SaveProductFormPayload {
    pub title: ProductTitle,
    pub description: Option<String>,
    pub price: ProductPrice,
    pub stock: i32,
    pub category_id: Option<CategoryId>,
    pub image: Option<UploadedImage>,
}

impl SaveProductFormPayload {
    pub fn into_new_product(self, image_url: Option<String>) -> NewProduct {
        let now = Utc::now().naive_utc();
        NewProduct {
            title: self.title,
            description: self.description,
            price: self.price,
            stock: self.stock,
            category_id: self.category_id,
            image_url,
            created_at: now,
            updated_at: now,
        }
    }

    /// `image_url: None` keeps the previously stored image.
    pub fn into_patch(self, image_url: Option<String>) -> ProductPatch {
        ProductPatch {
            title: self.title,
            description: self.description,
            price: self.price,
            stock: self.stock,
            category_id: self.category_id,
            image_url,
        }
    }
}

#[derive(Debug, Error)]
pub enum SaveProductFormError {
    #[error("Product form contains invalid data: {0}")]
    TypeConstraint(String),
    #[error("Product form has an invalid category: {0}")]
    InvalidCategory(String),
    #[error("Failed to read uploaded image")]
    ImageRead,
}

impl From<TypeConstraintError> for SaveProductFormError {
    fn from(value: TypeConstraintError) -> Self {
        Self::TypeConstraint(value.to_string())
    }
}

impl From<std::io::Error> for SaveProductFormError {
    fn from(_: std::io::Error) -> Self {
        Self::ImageRead
    }
}

fn parse_category_id(
    value: Option<Text<String>>,
) -> Result<Option<CategoryId>, SaveProductFormError> {
    let Some(raw) = value else {
        return Ok(None);
    };
    let raw = raw.into_inner();
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    let id: i32 = trimmed
        .parse()
        .map_err(|_| SaveProductFormError::InvalidCategory(raw.clone()))?;
    Ok(Some(CategoryId::new(id)?))
}

fn read_image(file: Option<TempFile>) -> Result<Option<UploadedImage>, SaveProductFormError> {
    let Some(file) = file else {
        return Ok(None);
    };
    // A file input left empty still submits a zero-length part.
    if file.size == 0 {
        return Ok(None);
    }
    let bytes = std::fs::read(file.file.path())?;
    Ok(Some(UploadedImage {
        file_name: file.file_name,
        bytes,
    }))
}

impl TryFrom<SaveProductForm> for SaveProductFormPayload {
    type Error = SaveProductFormError;

    fn try_from(value: SaveProductForm) -> Result<Self, Self::Error> {
        let stock = value.stock.into_inner();
        if stock < 0 {
            return Err(TypeConstraintError::NegativeNumber("product stock").into());
        }

        Ok(Self {
            title: ProductTitle::new(value.title.into_inner())?,
            description: value
                .description
                .map(Text::into_inner)
                .map(|d| d.trim().to_string())
                .filter(|d| !d.is_empty()),
            price: ProductPrice::new(value.price.into_inner())?,
            stock,
            category_id: parse_category_id(value.category_id)?,
            image: read_image(value.image)?,
        })
    }
}
