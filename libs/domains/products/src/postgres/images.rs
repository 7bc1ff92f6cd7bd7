use async_trait::async_trait;
use chrono::Utc;
use entities::prelude::{ProductImages, Products};
use entities::product_images;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ActiveValue::Set, ColumnTrait, ConnectionTrait,
    DatabaseConnection, EntityTrait, IntoActiveModel, Order, PaginatorTrait, QueryFilter,
    QueryOrder, TransactionTrait,
};

use crate::error::{ProductError, ProductResult};
use crate::models::{ListImages, NewImage, ProductImage, SortEntry, UpdateProductImage};
use crate::repository::ProductImageRepository;

pub struct PgProductImageRepository {
    db: DatabaseConnection,
}

impl PgProductImageRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Demote every other image of the product. Runs inside the caller's
    /// transaction; zero demoted rows is a valid outcome.
    async fn demote_siblings<C: ConnectionTrait>(
        conn: &C,
        product_id: i64,
        keep_id: i64,
    ) -> Result<(), sea_orm::DbErr> {
        ProductImages::update_many()
            .col_expr(product_images::Column::IsPrimary, Expr::value(false))
            .filter(product_images::Column::ProductId.eq(product_id))
            .filter(product_images::Column::Id.ne(keep_id))
            .filter(product_images::Column::IsPrimary.eq(true))
            .exec(conn)
            .await?;
        Ok(())
    }
}

#[async_trait]
impl ProductImageRepository for PgProductImageRepository {
    async fn create(&self, input: NewImage) -> ProductResult<ProductImage> {
        if !self.product_exists(input.product_id).await? {
            return Err(ProductError::UnknownProduct(input.product_id));
        }

        let now = Utc::now();
        let txn = self.db.begin().await?;

        let model = product_images::ActiveModel {
            id: NotSet,
            product_id: Set(input.product_id),
            url: Set(input.url),
            alt: Set(input.alt),
            is_primary: Set(input.is_primary),
            sort_order: Set(input.sort_order),
            is_active: Set(input.is_active),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
        }
        .insert(&txn)
        .await?;

        if model.is_primary {
            Self::demote_siblings(&txn, model.product_id, model.id).await?;
        }

        txn.commit().await?;

        tracing::info!(image_id = model.id, product_id = model.product_id, "Created product image");
        Ok(model.into())
    }

    async fn get_by_id(&self, id: i64) -> ProductResult<Option<ProductImage>> {
        let model = ProductImages::find_by_id(id).one(&self.db).await?;
        Ok(model.map(Into::into))
    }

    async fn list(&self, params: ListImages) -> ProductResult<(Vec<ProductImage>, u64)> {
        let mut query = ProductImages::find();

        if let Some(product_id) = params.product_id {
            query = query.filter(product_images::Column::ProductId.eq(product_id));
        }
        if let Some(is_active) = params.is_active {
            query = query.filter(product_images::Column::IsActive.eq(is_active));
        }

        let order = if params.sort.descending {
            Order::Desc
        } else {
            Order::Asc
        };
        query = match params.sort.column.as_str() {
            "product_id" => query.order_by(product_images::Column::ProductId, order),
            "sort_order" => query.order_by(product_images::Column::SortOrder, order),
            "created_at" => query.order_by(product_images::Column::CreatedAt, order),
            "updated_at" => query.order_by(product_images::Column::UpdatedAt, order),
            _ => query.order_by(product_images::Column::Id, order),
        };

        let paginator = query.paginate(&self.db, params.per_page.max(1));
        let total = paginator.num_items().await?;
        let models = paginator.fetch_page(params.page.saturating_sub(1)).await?;

        Ok((models.into_iter().map(Into::into).collect(), total))
    }

    async fn update(&self, id: i64, changes: UpdateProductImage) -> ProductResult<ProductImage> {
        let model = ProductImages::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(ProductError::ImageNotFound(id))?;
        let product_id = model.product_id;

        let txn = self.db.begin().await?;

        let mut active = model.into_active_model();
        if let Some(url) = changes.url {
            active.url = Set(url);
        }
        if let Some(alt) = changes.alt {
            active.alt = Set(Some(alt));
        }
        if let Some(is_primary) = changes.is_primary {
            active.is_primary = Set(is_primary);
        }
        if let Some(sort_order) = changes.sort_order {
            active.sort_order = Set(sort_order);
        }
        if let Some(is_active) = changes.is_active {
            active.is_active = Set(is_active);
        }
        active.updated_at = Set(Utc::now().into());

        let model = active.update(&txn).await?;

        if model.is_primary {
            Self::demote_siblings(&txn, product_id, id).await?;
        }

        txn.commit().await?;

        tracing::info!(image_id = id, "Updated product image");
        Ok(model.into())
    }

    async fn delete(&self, id: i64) -> ProductResult<bool> {
        let result = ProductImages::delete_by_id(id).exec(&self.db).await?;

        if result.rows_affected > 0 {
            tracing::info!(image_id = id, "Deleted product image");
            Ok(true)
        } else {
            Ok(false)
        }
    }

    async fn make_primary(&self, id: i64) -> ProductResult<ProductImage> {
        let model = ProductImages::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(ProductError::ImageNotFound(id))?;
        let product_id = model.product_id;

        let txn = self.db.begin().await?;

        let mut active = model.into_active_model();
        active.is_primary = Set(true);
        active.updated_at = Set(Utc::now().into());
        let model = active.update(&txn).await?;

        Self::demote_siblings(&txn, product_id, id).await?;

        txn.commit().await?;

        tracing::info!(image_id = id, product_id = product_id, "Promoted primary image");
        Ok(model.into())
    }

    async fn batch_sort(&self, product_id: i64, entries: Vec<SortEntry>) -> ProductResult<()> {
        let ids: Vec<i64> = entries.iter().map(|e| e.id).collect();
        let found: Vec<i64> = ProductImages::find()
            .filter(product_images::Column::Id.is_in(ids.clone()))
            .all(&self.db)
            .await?
            .into_iter()
            .map(|m| m.id)
            .collect();

        let missing: Vec<i64> = ids.into_iter().filter(|id| !found.contains(id)).collect();
        if !missing.is_empty() {
            return Err(ProductError::UnknownImageIds(missing));
        }

        let txn = self.db.begin().await?;

        // Scoping to the path product silently skips ids owned elsewhere.
        for entry in entries {
            ProductImages::update_many()
                .col_expr(
                    product_images::Column::SortOrder,
                    Expr::value(entry.sort_order),
                )
                .col_expr(
                    product_images::Column::UpdatedAt,
                    Expr::value(Utc::now()),
                )
                .filter(product_images::Column::Id.eq(entry.id))
                .filter(product_images::Column::ProductId.eq(product_id))
                .exec(&txn)
                .await?;
        }

        txn.commit().await?;

        tracing::info!(product_id = product_id, "Applied image sort order batch");
        Ok(())
    }

    async fn product_exists(&self, product_id: i64) -> ProductResult<bool> {
        Ok(Products::find_by_id(product_id)
            .one(&self.db)
            .await?
            .is_some())
    }
}
