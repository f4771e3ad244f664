use uuid::Uuid;

use crate::domain::product::Product;
use crate::domain::types::{CategoryId, ProductId};
use crate::dto::products::ProductDto;
use crate::forms::products::{SaveProductFormPayload, UploadedImage};
use crate::pagination::Paginated;
use crate::repository::{ProductListQuery, ProductReader, ProductWriter};
use crate::storage::BlobStore;

use super::{ServiceError, ServiceResult};

/// Fetch one page of products, ordered by title ascending and joined with
/// their category projection. Pages past the end come back empty but still
/// carry the correct totals.
pub fn list_products_by_page<R>(
    page: usize,
    per_page: usize,
    category: Option<CategoryId>,
    repo: &R,
) -> ServiceResult<Paginated<ProductDto>>
where
    R: ProductReader,
{
    let mut query = ProductListQuery::default().paginate(page, per_page);
    if let Some(category_id) = category {
        query = query.category(category_id);
    }
    let pagination = query.pagination.unwrap_or_default();

    match repo.list_products(query) {
        Ok((total, products)) => Ok(Paginated::new(
            products.iter().map(ProductDto::from).collect(),
            pagination.page,
            total,
            pagination.per_page,
        )),
        Err(e) => {
            log::error!("Failed to list products: {e}");
            Err(e.into())
        }
    }
}

/// Fetch exactly one product by id.
pub fn get_product<R>(id: ProductId, repo: &R) -> ServiceResult<Product>
where
    R: ProductReader,
{
    match repo.get_product_by_id(id) {
        Ok(Some(product)) => Ok(product),
        Ok(None) => Err(ServiceError::NotFound),
        Err(e) => {
            log::error!("Failed to get product: {e}");
            Err(e.into())
        }
    }
}

/// Store an uploaded image under a fresh unique key preserving the original
/// file extension. A missing file is a no-op and touches no store.
pub fn upload_image<S>(image: Option<UploadedImage>, store: &S) -> ServiceResult<Option<String>>
where
    S: BlobStore,
{
    let Some(image) = image else {
        return Ok(None);
    };

    let key = image_key(image.file_name.as_deref());
    if let Err(e) = store.put(&key, &image.bytes) {
        log::error!("Failed to store product image: {e}");
        return Err(e.into());
    }

    Ok(Some(key))
}

fn image_key(original_name: Option<&str>) -> String {
    let id = Uuid::new_v4();
    // The extension comes from a client-supplied file name; anything beyond
    // plain alphanumerics (path separators in particular) is dropped.
    let extension = original_name
        .and_then(|name| name.rsplit_once('.'))
        .map(|(_, ext)| ext)
        .filter(|ext| !ext.is_empty() && ext.chars().all(|c| c.is_ascii_alphanumeric()));

    match extension {
        Some(ext) => format!("{id}.{ext}"),
        None => id.to_string(),
    }
}

/// Upload the image (if any) and insert the product with the resulting key.
pub fn create_product<R, S>(
    payload: SaveProductFormPayload,
    repo: &R,
    store: &S,
) -> ServiceResult<Product>
where
    R: ProductWriter,
    S: BlobStore,
{
    let mut payload = payload;
    let image_url = upload_image(payload.image.take(), store)?;

    repo.create_product(&payload.into_new_product(image_url))
        .map_err(|e| {
            log::error!("Failed to create product: {e}");
            e.into()
        })
}

/// Upload the image (if any) and patch the product. Without a new upload the
/// stored image key is kept as is.
pub fn update_product<R, S>(
    id: ProductId,
    payload: SaveProductFormPayload,
    repo: &R,
    store: &S,
) -> ServiceResult<Product>
where
    R: ProductWriter,
    S: BlobStore,
{
    let mut payload = payload;
    let image_url = upload_image(payload.image.take(), store)?;

    match repo.update_product(id, &payload.into_patch(image_url)) {
        Ok(Some(product)) => Ok(product),
        Ok(None) => Err(ServiceError::NotFound),
        Err(e) => {
            log::error!("Failed to update product: {e}");
            Err(e.into())
        }
    }
}

/// Delete a product by id.
pub fn delete_product<R>(id: ProductId, repo: &R) -> ServiceResult<()>
where
    R: ProductReader + ProductWriter,
{
    match repo.get_product_by_id(id) {
        Ok(Some(_)) => {}
        Ok(None) => return Err(ServiceError::NotFound),
        Err(e) => {
            log::error!("Failed to get product: {e}");
            return Err(e.into());
        }
    }

    match repo.delete_product(id) {
        Ok(_) => Ok(()),
        Err(e) => {
            log::error!("Failed to delete product: {e}");
            Err(e.into())
        }
    }
}
