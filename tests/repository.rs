use chrono::Utc;

use catalog_admin::domain::category::{CategoryPatch, NewCategory};
use catalog_admin::domain::product::{NewProduct, ProductPatch};
use catalog_admin::domain::types::{
    CategoryId, CategoryName, ProductId, ProductPrice, ProductTitle,
};
use catalog_admin::repository::{
    CategoryReader, CategoryWriter, DieselRepository, ProductListQuery, ProductReader,
    ProductWriter,
};

mod common;

fn new_category(name: &str) -> NewCategory {
    let now = Utc::now().naive_utc();
    NewCategory {
        name: CategoryName::new(name).expect("valid category name"),
        description: Some(format!("{name} products")),
        created_at: now,
        updated_at: now,
    }
}

fn new_product(title: &str, category_id: Option<CategoryId>) -> NewProduct {
    let now = Utc::now().naive_utc();
    NewProduct {
        title: ProductTitle::new(title).expect("valid product title"),
        description: None,
        price: ProductPrice::new(9.99).expect("valid price"),
        stock: 10,
        category_id,
        image_url: None,
        created_at: now,
        updated_at: now,
    }
}

#[test]
fn fresh_database_starts_empty() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());

    assert!(repo.list_categories().expect("should list").is_empty());
    let (total, items) = repo
        .list_products(ProductListQuery::default())
        .expect("should list");
    assert_eq!(total, 0);
    assert!(items.is_empty());
}

#[test]
fn category_crud_roundtrip() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());

    let created = repo
        .create_category(&new_category("Tea"))
        .expect("should create category");
    assert!(created.id.get() > 0);
    assert_eq!(created.name.as_str(), "Tea");

    let fetched = repo
        .get_category_by_id(created.id)
        .expect("should get category")
        .expect("created category should exist");
    assert_eq!(fetched.description.as_deref(), Some("Tea products"));

    let updated = repo
        .update_category(
            created.id,
            &CategoryPatch {
                name: CategoryName::new("Green Tea").unwrap(),
                description: None,
            },
        )
        .expect("should update category")
        .expect("updated row should come back");
    assert_eq!(updated.name.as_str(), "Green Tea");
    assert_eq!(updated.description, None);

    let affected = repo
        .delete_category(created.id)
        .expect("should delete category");
    assert_eq!(affected, 1);
    assert!(
        repo.get_category_by_id(created.id)
            .expect("should query category")
            .is_none()
    );
}

#[test]
fn categories_are_listed_by_name_ascending() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());

    for name in ["Snacks", "Beverages", "Dairy"] {
        repo.create_category(&new_category(name))
            .expect("should create category");
    }

    let names: Vec<String> = repo
        .list_categories()
        .expect("should list categories")
        .into_iter()
        .map(|c| c.name.into_inner())
        .collect();
    assert_eq!(names, vec!["Beverages", "Dairy", "Snacks"]);
}

#[test]
fn updating_a_missing_category_returns_none() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());

    let result = repo
        .update_category(
            CategoryId::new(99).unwrap(),
            &CategoryPatch {
                name: CategoryName::new("Ghost").unwrap(),
                description: None,
            },
        )
        .expect("update of missing row should not error");
    assert!(result.is_none());
}

#[test]
fn delete_category_detaches_referencing_products() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());

    let category = repo
        .create_category(&new_category("Tea"))
        .expect("should create category");
    let product = repo
        .create_product(&new_product("Sencha", Some(category.id)))
        .expect("should create product");
    assert_eq!(
        product.category.as_ref().map(|c| c.name.as_str()),
        Some("Tea")
    );

    repo.delete_category(category.id)
        .expect("should delete category");

    let orphan = repo
        .get_product_by_id(product.id)
        .expect("should get product")
        .expect("product should survive category deletion");
    assert_eq!(orphan.category_id, None);
    assert!(orphan.category.is_none());
}

#[test]
fn products_are_paginated_and_joined_with_their_category() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());

    let category = repo
        .create_category(&new_category("Tea"))
        .expect("should create category");
    for i in 0..15 {
        repo.create_product(&new_product(&format!("Product {i:02}"), Some(category.id)))
            .expect("should create product");
    }

    let (total, items) = repo
        .list_products(ProductListQuery::default().paginate(1, 12))
        .expect("should list products");
    assert_eq!(total, 15);
    assert_eq!(items.len(), 12);
    assert_eq!(items[0].title.as_str(), "Product 00");
    assert_eq!(
        items[0].category.as_ref().map(|c| c.name.as_str()),
        Some("Tea")
    );

    let (total, items) = repo
        .list_products(ProductListQuery::default().paginate(2, 12))
        .expect("should list products");
    assert_eq!(total, 15);
    assert_eq!(items.len(), 3);
    assert_eq!(items[0].title.as_str(), "Product 12");

    // A page past the end is empty but still reports the full total.
    let (total, items) = repo
        .list_products(ProductListQuery::default().paginate(4, 12))
        .expect("should list products");
    assert_eq!(total, 15);
    assert!(items.is_empty());
}

#[test]
fn product_list_can_be_filtered_by_category() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());

    let tea = repo
        .create_category(&new_category("Tea"))
        .expect("should create category");
    let coffee = repo
        .create_category(&new_category("Coffee"))
        .expect("should create category");
    repo.create_product(&new_product("Sencha", Some(tea.id)))
        .expect("should create product");
    repo.create_product(&new_product("Espresso", Some(coffee.id)))
        .expect("should create product");
    repo.create_product(&new_product("Uncategorized", None))
        .expect("should create product");

    let (total, items) = repo
        .list_products(ProductListQuery::default().category(tea.id))
        .expect("should list products");
    assert_eq!(total, 1);
    assert_eq!(items[0].title.as_str(), "Sencha");
}

#[test]
fn product_update_keeps_the_image_unless_replaced() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());

    let mut seed = new_product("Sencha", None);
    seed.image_url = Some("abc.png".to_string());
    let product = repo.create_product(&seed).expect("should create product");

    let patch = ProductPatch {
        title: ProductTitle::new("Sencha Premium").unwrap(),
        description: Some("first flush".to_string()),
        price: ProductPrice::new(12.5).unwrap(),
        stock: 3,
        category_id: None,
        image_url: None,
    };
    let updated = repo
        .update_product(product.id, &patch)
        .expect("should update product")
        .expect("updated row should come back");
    assert_eq!(updated.title.as_str(), "Sencha Premium");
    assert_eq!(updated.image_url.as_deref(), Some("abc.png"));

    let patch = ProductPatch {
        image_url: Some("def.png".to_string()),
        ..patch
    };
    let updated = repo
        .update_product(product.id, &patch)
        .expect("should update product")
        .expect("updated row should come back");
    assert_eq!(updated.image_url.as_deref(), Some("def.png"));
}

#[test]
fn deleting_a_product_removes_it() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());

    let product = repo
        .create_product(&new_product("Sencha", None))
        .expect("should create product");

    let affected = repo
        .delete_product(product.id)
        .expect("should delete product");
    assert_eq!(affected, 1);
    assert!(
        repo.get_product_by_id(ProductId::new(product.id.get()).unwrap())
            .expect("should query product")
            .is_none()
    );
}
