//! Integration tests for the Products domain
//!
//! These tests use real PostgreSQL via testcontainers to ensure:
//! - Referential checks on create (category, product) behave as specified
//! - The single-primary-image invariant holds across create/update/promote
//! - Batch sort-order updates validate ids and skip foreign rows
//! - Tag associations sync, attach and detach correctly

use domain_products::*;
use domain_tags::{NewTag, PgTagRepository, TagListQuery, TagRepository};
use rust_decimal::Decimal;
use sea_orm::EntityTrait;
use std::str::FromStr;
use test_utils::{TestDatabase, TestDataBuilder, assertions::*};

fn new_product(name: &str, category_id: Option<i64>) -> NewProduct {
    NewProduct {
        category_id,
        name: name.to_string(),
        description: None,
        price: Decimal::from_str("19.99").unwrap(),
        stock: 3,
        is_active: true,
    }
}

fn new_image(product_id: i64, url: &str, is_primary: bool, sort_order: i32) -> NewImage {
    NewImage {
        product_id,
        url: url.to_string(),
        alt: None,
        is_primary,
        sort_order,
        is_active: true,
    }
}

fn new_tag(name: &str, slug: &str) -> NewTag {
    NewTag {
        name: name.to_string(),
        slug: slug.to_string(),
        description: None,
        is_active: true,
    }
}

fn tag_query() -> TagListQuery {
    TagListQuery {
        search: None,
        is_active: None,
        sort: None,
        page: 1,
        per_page: 15,
    }
}

// ============================================================================
// Product Repository Tests
// ============================================================================

#[tokio::test]
async fn test_create_product_with_unknown_category() {
    let db = TestDatabase::new().await;
    let repo = PgProductRepository::new(db.connection());
    let builder = TestDataBuilder::from_test_name("product_unknown_category");

    let result = repo
        .create(new_product(&builder.name("product", "lost"), Some(424242)))
        .await;

    assert!(
        matches!(result, Err(ProductError::UnknownCategory(424242))),
        "expected UnknownCategory, got {:?}",
        result
    );
}

#[tokio::test]
async fn test_product_list_is_newest_first() {
    let db = TestDatabase::new().await;
    let repo = PgProductRepository::new(db.connection());
    let builder = TestDataBuilder::from_test_name("product_list_order");

    for i in 0..3 {
        repo.create(new_product(
            &builder.name("product", &format!("p{}", i)),
            None,
        ))
        .await
        .unwrap();
    }

    let (products, total) = repo.list(1, 15).await.unwrap();
    assert_eq!(total, 3);
    assert!(products.windows(2).all(|w| w[0].id > w[1].id));
}

#[tokio::test]
async fn test_update_product_rounds_and_checks_category() {
    let db = TestDatabase::new().await;
    let repo = PgProductRepository::new(db.connection());
    let builder = TestDataBuilder::from_test_name("product_update");

    let created = repo
        .create(new_product(&builder.name("product", "mutable"), None))
        .await
        .unwrap();

    let updated = repo
        .update(
            created.id,
            UpdateProduct {
                category_id: None,
                name: None,
                description: Some("restocked".to_string()),
                price: Some(Decimal::from_str("24.50").unwrap()),
                stock: Some(10),
                is_active: None,
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.price, Decimal::from_str("24.50").unwrap());
    assert_eq!(updated.stock, 10);
    assert_eq!(updated.name, created.name);

    let result = repo
        .update(
            created.id,
            UpdateProduct {
                category_id: Some(424242),
                name: None,
                description: None,
                price: None,
                stock: None,
                is_active: None,
            },
        )
        .await;
    assert!(matches!(result, Err(ProductError::UnknownCategory(424242))));
}

// ============================================================================
// Primary Image Invariant Tests
// ============================================================================

#[tokio::test]
async fn test_second_primary_create_demotes_first() {
    let db = TestDatabase::new().await;
    let products = PgProductRepository::new(db.connection());
    let images = PgProductImageRepository::new(db.connection());
    let builder = TestDataBuilder::from_test_name("primary_flip");

    let product = products
        .create(new_product(&builder.name("product", "pics"), None))
        .await
        .unwrap();

    let first = images
        .create(new_image(product.id, &builder.url("first"), true, 0))
        .await
        .unwrap();
    assert!(first.is_primary);

    let second = images
        .create(new_image(product.id, &builder.url("second"), true, 1))
        .await
        .unwrap();
    assert!(second.is_primary);

    let first = images.get_by_id(first.id).await.unwrap();
    let first = assert_some(first, "first image should still exist");
    assert!(!first.is_primary, "creating a new primary must demote the old one");
}

#[tokio::test]
async fn test_primary_is_scoped_per_product() {
    let db = TestDatabase::new().await;
    let products = PgProductRepository::new(db.connection());
    let images = PgProductImageRepository::new(db.connection());
    let builder = TestDataBuilder::from_test_name("primary_scoped");

    let product_a = products
        .create(new_product(&builder.name("product", "a"), None))
        .await
        .unwrap();
    let product_b = products
        .create(new_product(&builder.name("product", "b"), None))
        .await
        .unwrap();

    let image_a = images
        .create(new_image(product_a.id, &builder.url("a"), true, 0))
        .await
        .unwrap();
    images
        .create(new_image(product_b.id, &builder.url("b"), true, 0))
        .await
        .unwrap();

    // A primary on another product does not demote this one
    let image_a = images.get_by_id(image_a.id).await.unwrap().unwrap();
    assert!(image_a.is_primary);
}

#[tokio::test]
async fn test_make_primary_demotes_siblings() {
    let db = TestDatabase::new().await;
    let products = PgProductRepository::new(db.connection());
    let images = PgProductImageRepository::new(db.connection());
    let builder = TestDataBuilder::from_test_name("make_primary");

    let product = products
        .create(new_product(&builder.name("product", "promote"), None))
        .await
        .unwrap();

    let old_primary = images
        .create(new_image(product.id, &builder.url("old"), true, 0))
        .await
        .unwrap();
    let challenger = images
        .create(new_image(product.id, &builder.url("new"), false, 1))
        .await
        .unwrap();

    let promoted = images.make_primary(challenger.id).await.unwrap();
    assert!(promoted.is_primary);

    let old_primary = images.get_by_id(old_primary.id).await.unwrap().unwrap();
    assert!(!old_primary.is_primary);
}

#[tokio::test]
async fn test_update_to_primary_demotes_siblings() {
    let db = TestDatabase::new().await;
    let products = PgProductRepository::new(db.connection());
    let images = PgProductImageRepository::new(db.connection());
    let builder = TestDataBuilder::from_test_name("update_primary");

    let product = products
        .create(new_product(&builder.name("product", "swap"), None))
        .await
        .unwrap();

    let old_primary = images
        .create(new_image(product.id, &builder.url("old"), true, 0))
        .await
        .unwrap();
    let challenger = images
        .create(new_image(product.id, &builder.url("new"), false, 1))
        .await
        .unwrap();

    let updated = images
        .update(
            challenger.id,
            UpdateProductImage {
                url: None,
                alt: None,
                is_primary: Some(true),
                sort_order: None,
                is_active: None,
            },
        )
        .await
        .unwrap();
    assert!(updated.is_primary);

    let old_primary = images.get_by_id(old_primary.id).await.unwrap().unwrap();
    assert!(!old_primary.is_primary);
}

#[tokio::test]
async fn test_make_primary_missing_image() {
    let db = TestDatabase::new().await;
    let images = PgProductImageRepository::new(db.connection());

    let result = images.make_primary(424242).await;
    assert!(result.is_err(), "promoting a missing image should fail");
}

// ============================================================================
// Batch Sort Tests
// ============================================================================

#[tokio::test]
async fn test_batch_sort_reorders_images() {
    let db = TestDatabase::new().await;
    let products = PgProductRepository::new(db.connection());
    let images = PgProductImageRepository::new(db.connection());
    let builder = TestDataBuilder::from_test_name("batch_sort");

    let product = products
        .create(new_product(&builder.name("product", "sortable"), None))
        .await
        .unwrap();

    let a = images
        .create(new_image(product.id, &builder.url("a"), false, 0))
        .await
        .unwrap();
    let b = images
        .create(new_image(product.id, &builder.url("b"), false, 1))
        .await
        .unwrap();

    images
        .batch_sort(
            product.id,
            vec![
                SortEntry { id: a.id, sort_order: 5 },
                SortEntry { id: b.id, sort_order: 2 },
            ],
        )
        .await
        .unwrap();

    let a = images.get_by_id(a.id).await.unwrap().unwrap();
    let b = images.get_by_id(b.id).await.unwrap().unwrap();
    assert_eq!(a.sort_order, 5);
    assert_eq!(b.sort_order, 2);
}

#[tokio::test]
async fn test_batch_sort_rejects_globally_unknown_ids() {
    let db = TestDatabase::new().await;
    let products = PgProductRepository::new(db.connection());
    let images = PgProductImageRepository::new(db.connection());
    let builder = TestDataBuilder::from_test_name("batch_sort_unknown");

    let product = products
        .create(new_product(&builder.name("product", "strict"), None))
        .await
        .unwrap();
    let a = images
        .create(new_image(product.id, &builder.url("a"), false, 0))
        .await
        .unwrap();

    let result = images
        .batch_sort(
            product.id,
            vec![
                SortEntry { id: a.id, sort_order: 1 },
                SortEntry { id: 424242, sort_order: 2 },
            ],
        )
        .await;

    match result {
        Err(ProductError::UnknownImageIds(ids)) => assert_eq!(ids, vec![424242]),
        other => panic!("expected UnknownImageIds, got {:?}", other),
    }

    // The whole batch is rejected, nothing is applied
    let a = images.get_by_id(a.id).await.unwrap().unwrap();
    assert_eq!(a.sort_order, 0);
}

#[tokio::test]
async fn test_batch_sort_skips_other_products_images() {
    let db = TestDatabase::new().await;
    let products = PgProductRepository::new(db.connection());
    let images = PgProductImageRepository::new(db.connection());
    let builder = TestDataBuilder::from_test_name("batch_sort_foreign");

    let mine = products
        .create(new_product(&builder.name("product", "mine"), None))
        .await
        .unwrap();
    let theirs = products
        .create(new_product(&builder.name("product", "theirs"), None))
        .await
        .unwrap();

    let own_image = images
        .create(new_image(mine.id, &builder.url("own"), false, 0))
        .await
        .unwrap();
    let foreign_image = images
        .create(new_image(theirs.id, &builder.url("foreign"), false, 0))
        .await
        .unwrap();

    // The foreign id exists globally, so the batch succeeds but only the
    // path product's rows change
    images
        .batch_sort(
            mine.id,
            vec![
                SortEntry { id: own_image.id, sort_order: 9 },
                SortEntry { id: foreign_image.id, sort_order: 9 },
            ],
        )
        .await
        .unwrap();

    let own_image = images.get_by_id(own_image.id).await.unwrap().unwrap();
    assert_eq!(own_image.sort_order, 9);

    let foreign_image = images.get_by_id(foreign_image.id).await.unwrap().unwrap();
    assert_eq!(foreign_image.sort_order, 0, "foreign rows must be untouched");
}

// ============================================================================
// Cascade Tests
// ============================================================================

#[tokio::test]
async fn test_delete_product_cascades_images() {
    let db = TestDatabase::new().await;
    let products = PgProductRepository::new(db.connection());
    let images = PgProductImageRepository::new(db.connection());
    let builder = TestDataBuilder::from_test_name("cascade");

    let product = products
        .create(new_product(&builder.name("product", "doomed"), None))
        .await
        .unwrap();
    let image = images
        .create(new_image(product.id, &builder.url("doomed"), false, 0))
        .await
        .unwrap();

    assert!(products.delete(product.id).await.unwrap());
    assert!(images.get_by_id(image.id).await.unwrap().is_none());
}

// ============================================================================
// Tag Association Tests
// ============================================================================

#[tokio::test]
async fn test_sync_replaces_tag_set_preserving_kept_rows() {
    let db = TestDatabase::new().await;
    let products = PgProductRepository::new(db.connection());
    let tags = PgTagRepository::new(db.connection());
    let associations = PgProductTagRepository::new(db.connection());
    let builder = TestDataBuilder::from_test_name("sync_tags");

    let product = products
        .create(new_product(&builder.name("product", "tagged"), None))
        .await
        .unwrap();
    let tag_a = tags
        .create(new_tag(&builder.name("tag", "a"), "sync-a"))
        .await
        .unwrap();
    let tag_b = tags
        .create(new_tag(&builder.name("tag", "b"), "sync-b"))
        .await
        .unwrap();
    let tag_c = tags
        .create(new_tag(&builder.name("tag", "c"), "sync-c"))
        .await
        .unwrap();

    associations
        .sync(product.id, vec![tag_a.id, tag_b.id])
        .await
        .unwrap();

    let kept_before = entities::product_tags::Entity::find_by_id((product.id, tag_b.id))
        .one(&db.connection())
        .await
        .unwrap()
        .unwrap();

    associations
        .sync(product.id, vec![tag_b.id, tag_c.id])
        .await
        .unwrap();

    let current = associations.all_tags(product.id).await.unwrap();
    let ids: Vec<i64> = current.iter().map(|t| t.id).collect();
    assert_eq!(ids, vec![tag_b.id, tag_c.id]);

    // The surviving association row was not recreated
    let kept_after = entities::product_tags::Entity::find_by_id((product.id, tag_b.id))
        .one(&db.connection())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(kept_before.created_at, kept_after.created_at);
}

#[tokio::test]
async fn test_sync_with_unknown_tag_ids() {
    let db = TestDatabase::new().await;
    let products = PgProductRepository::new(db.connection());
    let associations = PgProductTagRepository::new(db.connection());
    let builder = TestDataBuilder::from_test_name("sync_unknown");

    let product = products
        .create(new_product(&builder.name("product", "strict"), None))
        .await
        .unwrap();

    let result = associations.sync(product.id, vec![424242]).await;
    match result {
        Err(ProductError::UnknownTagIds(ids)) => assert_eq!(ids, vec![424242]),
        other => panic!("expected UnknownTagIds, got {:?}", other),
    }
}

#[tokio::test]
async fn test_attach_is_idempotent() {
    let db = TestDatabase::new().await;
    let products = PgProductRepository::new(db.connection());
    let tags = PgTagRepository::new(db.connection());
    let associations = PgProductTagRepository::new(db.connection());
    let builder = TestDataBuilder::from_test_name("attach");

    let product = products
        .create(new_product(&builder.name("product", "attached"), None))
        .await
        .unwrap();
    let tag = tags
        .create(new_tag(&builder.name("tag", "sticky"), "sticky"))
        .await
        .unwrap();

    associations.attach(product.id, tag.id).await.unwrap();
    associations.attach(product.id, tag.id).await.unwrap();

    let current = associations.all_tags(product.id).await.unwrap();
    assert_eq!(current.len(), 1);
}

#[tokio::test]
async fn test_detach_is_idempotent() {
    let db = TestDatabase::new().await;
    let products = PgProductRepository::new(db.connection());
    let tags = PgTagRepository::new(db.connection());
    let associations = PgProductTagRepository::new(db.connection());
    let builder = TestDataBuilder::from_test_name("detach");

    let product = products
        .create(new_product(&builder.name("product", "detached"), None))
        .await
        .unwrap();
    let tag = tags
        .create(new_tag(&builder.name("tag", "loose"), "loose"))
        .await
        .unwrap();

    associations.attach(product.id, tag.id).await.unwrap();
    associations.detach(product.id, tag.id).await.unwrap();

    let current = associations.all_tags(product.id).await.unwrap();
    assert!(current.is_empty(), "detach must actually remove the association");

    // Detaching again is a no-op, not an error
    associations.detach(product.id, tag.id).await.unwrap();
}

#[tokio::test]
async fn test_list_tags_and_products_through_pivot() {
    let db = TestDatabase::new().await;
    let products = PgProductRepository::new(db.connection());
    let tags = PgTagRepository::new(db.connection());
    let associations = PgProductTagRepository::new(db.connection());
    let builder = TestDataBuilder::from_test_name("pivot_lists");

    let product = products
        .create(new_product(&builder.name("product", "linked"), None))
        .await
        .unwrap();
    let other_product = products
        .create(new_product(&builder.name("product", "unlinked"), None))
        .await
        .unwrap();
    let tag = tags
        .create(new_tag(&builder.name("tag", "hub"), "hub"))
        .await
        .unwrap();

    associations.attach(product.id, tag.id).await.unwrap();

    let (listed_tags, total) = associations
        .list_tags(product.id, tag_query().into())
        .await
        .unwrap();
    assert_eq!(total, 1);
    assert_eq!(listed_tags[0].id, tag.id);

    let (listed_products, total) = associations
        .list_products(
            tag.id,
            ProductScopeQuery {
                search: None,
                is_active: None,
                sort: None,
                page: 1,
                per_page: 15,
            }
            .into(),
        )
        .await
        .unwrap();
    assert_eq!(total, 1);
    assert_eq!(listed_products[0].id, product.id);
    assert_ne!(listed_products[0].id, other_product.id);
}
