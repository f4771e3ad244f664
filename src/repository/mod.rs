use crate::db::{DbConnection, DbPool};
use crate::domain::category::{Category, CategoryPatch, NewCategory};
use crate::domain::product::{NewProduct, Product, ProductPatch};
use crate::domain::types::{CategoryId, ProductId};
use crate::pagination::Pagination;

pub mod category;
pub mod errors;
pub mod product;

pub use errors::{RepositoryError, RepositoryResult};

/// Repository implementation backed by Diesel and SQLite.
///
/// The underlying `r2d2::Pool` is cheap to clone, allowing the repository to
/// be passed around freely between handlers.
#[derive(Clone)]
pub struct DieselRepository {
    pool: DbPool, // r2d2::Pool is cheap to clone
}

impl DieselRepository {
    /// Create a new repository from an established database pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Get a pooled database connection.
    fn conn(&self) -> RepositoryResult<DbConnection> {
        Ok(self.pool.get()?)
    }
}

/// Query parameters used when listing products.
#[derive(Debug, Clone, Default)]
pub struct ProductListQuery {
    /// Restrict to products assigned to a category.
    pub category_id: Option<CategoryId>,
    /// Pagination parameters; `None` loads everything.
    pub pagination: Option<Pagination>,
}

impl ProductListQuery {
    pub fn category(mut self, category_id: CategoryId) -> Self {
        self.category_id = Some(category_id);
        self
    }

    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.pagination = Some(Pagination::new(page, per_page));
        self
    }
}

/// Read-only operations for category entities.
pub trait CategoryReader {
    /// List all categories ordered by name ascending.
    fn list_categories(&self) -> RepositoryResult<Vec<Category>>;
    /// Retrieve a category by its identifier.
    fn get_category_by_id(&self, id: CategoryId) -> RepositoryResult<Option<Category>>;
}

/// Write operations for category entities.
pub trait CategoryWriter {
    /// Persist a new category, returning it with the store-assigned id.
    fn create_category(&self, category: &NewCategory) -> RepositoryResult<Category>;
    /// Replace the mutable fields of a category, returning the patched row.
    fn update_category(
        &self,
        id: CategoryId,
        patch: &CategoryPatch,
    ) -> RepositoryResult<Option<Category>>;
    /// Delete a category, detaching any products that reference it.
    fn delete_category(&self, id: CategoryId) -> RepositoryResult<usize>;
}

/// Read-only operations for product entities. Every loaded product carries
/// its joined category projection.
pub trait ProductReader {
    /// List products matching the supplied query parameters, ordered by
    /// title ascending, together with the unpaginated total.
    fn list_products(&self, query: ProductListQuery) -> RepositoryResult<(usize, Vec<Product>)>;
    /// Retrieve a product by its identifier.
    fn get_product_by_id(&self, id: ProductId) -> RepositoryResult<Option<Product>>;
}

/// Write operations for product entities.
pub trait ProductWriter {
    /// Persist a new product, returning it joined with its category.
    fn create_product(&self, product: &NewProduct) -> RepositoryResult<Product>;
    /// Replace the mutable fields of a product, returning the patched row
    /// joined with its category.
    fn update_product(
        &self,
        id: ProductId,
        patch: &ProductPatch,
    ) -> RepositoryResult<Option<Product>>;
    /// Delete a product by id.
    fn delete_product(&self, id: ProductId) -> RepositoryResult<usize>;
}
