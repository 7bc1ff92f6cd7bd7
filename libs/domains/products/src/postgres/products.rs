use async_trait::async_trait;
use chrono::Utc;
use entities::prelude::{Categories, Products};
use entities::products;
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ActiveValue::Set, DatabaseConnection, EntityTrait,
    IntoActiveModel, PaginatorTrait, QueryOrder,
};

use crate::error::{ProductError, ProductResult};
use crate::models::{NewProduct, Product, UpdateProduct};
use crate::repository::ProductRepository;

pub struct PgProductRepository {
    db: DatabaseConnection,
}

impl PgProductRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn ensure_category_exists(&self, category_id: i64) -> ProductResult<()> {
        if Categories::find_by_id(category_id)
            .one(&self.db)
            .await?
            .is_none()
        {
            return Err(ProductError::UnknownCategory(category_id));
        }
        Ok(())
    }
}

#[async_trait]
impl ProductRepository for PgProductRepository {
    async fn create(&self, input: NewProduct) -> ProductResult<Product> {
        if let Some(category_id) = input.category_id {
            self.ensure_category_exists(category_id).await?;
        }

        let now = Utc::now();
        let model = products::ActiveModel {
            id: NotSet,
            category_id: Set(input.category_id),
            name: Set(input.name),
            description: Set(input.description),
            price: Set(input.price),
            stock: Set(input.stock),
            is_active: Set(input.is_active),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
        }
        .insert(&self.db)
        .await?;

        tracing::info!(product_id = model.id, "Created product");
        Ok(model.into())
    }

    async fn get_by_id(&self, id: i64) -> ProductResult<Option<Product>> {
        let model = Products::find_by_id(id).one(&self.db).await?;
        Ok(model.map(Into::into))
    }

    async fn list(&self, page: u64, per_page: u64) -> ProductResult<(Vec<Product>, u64)> {
        let paginator = Products::find()
            .order_by_desc(products::Column::Id)
            .paginate(&self.db, per_page.max(1));

        let total = paginator.num_items().await?;
        let models = paginator.fetch_page(page.saturating_sub(1)).await?;

        Ok((models.into_iter().map(Into::into).collect(), total))
    }

    async fn update(&self, id: i64, changes: UpdateProduct) -> ProductResult<Product> {
        let model = Products::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(ProductError::ProductNotFound(id))?;

        if let Some(category_id) = changes.category_id {
            self.ensure_category_exists(category_id).await?;
        }

        let mut active = model.into_active_model();
        if let Some(category_id) = changes.category_id {
            active.category_id = Set(Some(category_id));
        }
        if let Some(name) = changes.name {
            active.name = Set(name);
        }
        if let Some(description) = changes.description {
            active.description = Set(Some(description));
        }
        if let Some(price) = changes.price {
            active.price = Set(price.round_dp(2));
        }
        if let Some(stock) = changes.stock {
            active.stock = Set(stock);
        }
        if let Some(is_active) = changes.is_active {
            active.is_active = Set(is_active);
        }
        active.updated_at = Set(Utc::now().into());

        let model = active.update(&self.db).await?;
        tracing::info!(product_id = id, "Updated product");
        Ok(model.into())
    }

    async fn delete(&self, id: i64) -> ProductResult<bool> {
        let result = Products::delete_by_id(id).exec(&self.db).await?;

        if result.rows_affected > 0 {
            tracing::info!(product_id = id, "Deleted product");
            Ok(true)
        } else {
            Ok(false)
        }
    }
}
