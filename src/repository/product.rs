use diesel::prelude::*;

use crate::domain::product::{NewProduct, Product, ProductPatch};
use crate::domain::types::ProductId;
use crate::models::product::{JoinedCategory, NewProduct as DbNewProduct, Product as DbProduct};
use crate::repository::{
    DieselRepository, ProductListQuery, ProductReader, ProductWriter, RepositoryResult,
};

impl DieselRepository {
    /// Load the `{id, name}` projection for a product's category reference.
    fn joined_category(
        &self,
        conn: &mut crate::db::DbConnection,
        category_id: Option<i32>,
    ) -> RepositoryResult<JoinedCategory> {
        use crate::schema::categories;

        let Some(category_id) = category_id else {
            return Ok(None);
        };

        let joined = categories::table
            .filter(categories::id.eq(category_id))
            .select((categories::id, categories::name))
            .first::<(i32, String)>(conn)
            .optional()?;

        Ok(joined)
    }
}

impl ProductReader for DieselRepository {
    fn list_products(&self, query: ProductListQuery) -> RepositoryResult<(usize, Vec<Product>)> {
        use crate::schema::{categories, products};

        let mut conn = self.conn()?;

        let count_query = || {
            let mut items = products::table.into_boxed::<diesel::sqlite::Sqlite>();
            if let Some(category_id) = query.category_id {
                items = items.filter(products::category_id.eq(Some(category_id.get())));
            }
            items
        };

        let total = count_query().count().get_result::<i64>(&mut conn)? as usize;

        let mut items = products::table
            .left_join(categories::table)
            .select((
                products::all_columns,
                (categories::id, categories::name).nullable(),
            ))
            .into_boxed::<diesel::sqlite::Sqlite>();

        if let Some(category_id) = query.category_id {
            items = items.filter(products::category_id.eq(Some(category_id.get())));
        }

        if let Some(pagination) = &query.pagination {
            items = items.offset(pagination.offset()).limit(pagination.limit());
        }

        let items = items
            .order(products::title.asc())
            .load::<(DbProduct, JoinedCategory)>(&mut conn)?
            .into_iter()
            .map(TryInto::try_into)
            .collect::<Result<Vec<Product>, _>>()?;

        Ok((total, items))
    }

    fn get_product_by_id(&self, id: ProductId) -> RepositoryResult<Option<Product>> {
        use crate::schema::{categories, products};

        let mut conn = self.conn()?;

        let row = products::table
            .left_join(categories::table)
            .select((
                products::all_columns,
                (categories::id, categories::name).nullable(),
            ))
            .filter(products::id.eq(id.get()))
            .first::<(DbProduct, JoinedCategory)>(&mut conn)
            .optional()?;

        let product = row.map(TryInto::try_into).transpose()?;
        Ok(product)
    }
}

impl ProductWriter for DieselRepository {
    fn create_product(&self, product: &NewProduct) -> RepositoryResult<Product> {
        use crate::schema::products;

        let mut conn = self.conn()?;
        let db_product: DbNewProduct = product.clone().into();

        let created = diesel::insert_into(products::table)
            .values(db_product)
            .get_result::<DbProduct>(&mut conn)?;

        let joined = self.joined_category(&mut conn, created.category_id)?;
        Ok((created, joined).try_into()?)
    }

    fn update_product(
        &self,
        id: ProductId,
        patch: &ProductPatch,
    ) -> RepositoryResult<Option<Product>> {
        use crate::schema::products;

        let mut conn = self.conn()?;

        let base = (
            products::title.eq(patch.title.as_str()),
            products::description.eq(patch.description.as_deref()),
            products::price.eq(patch.price.get()),
            products::stock.eq(patch.stock),
            products::category_id.eq(patch.category_id.map(|id| id.get())),
            products::updated_at.eq(diesel::dsl::now),
        );

        let target = diesel::update(products::table.filter(products::id.eq(id.get())));

        // An absent image key keeps the stored one untouched.
        let updated = match patch.image_url.as_deref() {
            Some(key) => target
                .set((base, products::image_url.eq(key)))
                .get_result::<DbProduct>(&mut conn)
                .optional()?,
            None => target
                .set(base)
                .get_result::<DbProduct>(&mut conn)
                .optional()?,
        };

        let Some(updated) = updated else {
            return Ok(None);
        };

        let joined = self.joined_category(&mut conn, updated.category_id)?;
        Ok(Some((updated, joined).try_into()?))
    }

    fn delete_product(&self, id: ProductId) -> RepositoryResult<usize> {
        use crate::schema::products;

        let mut conn = self.conn()?;

        let affected =
            diesel::delete(products::table.filter(products::id.eq(id.get()))).execute(&mut conn)?;

        Ok(affected)
    }
}
