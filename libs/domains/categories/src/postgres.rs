use async_trait::async_trait;
use chrono::Utc;
use domain_products::{ListScopedProducts, Product};
use entities::categories;
use entities::prelude::{Categories, Products};
use entities::products;
use sea_orm::sea_query::{Expr, extension::postgres::PgExpr};
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ActiveValue::Set, ColumnTrait, Condition,
    DatabaseConnection, EntityTrait, IntoActiveModel, Order, PaginatorTrait, QueryFilter,
    QueryOrder,
};

use crate::error::{CategoryError, CategoryResult};
use crate::models::{Category, ListCategories, NewCategory, UpdateCategory};
use crate::repository::CategoryRepository;

pub struct PgCategoryRepository {
    db: DatabaseConnection,
}

impl PgCategoryRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Reject name/slug values already held by a different row.
    async fn ensure_unique(
        &self,
        name: Option<&str>,
        slug: Option<&str>,
        exclude_id: Option<i64>,
    ) -> CategoryResult<()> {
        if let Some(name) = name {
            let mut query = Categories::find().filter(categories::Column::Name.eq(name));
            if let Some(id) = exclude_id {
                query = query.filter(categories::Column::Id.ne(id));
            }
            if query.one(&self.db).await?.is_some() {
                return Err(CategoryError::Duplicate("name"));
            }
        }

        if let Some(slug) = slug {
            let mut query = Categories::find().filter(categories::Column::Slug.eq(slug));
            if let Some(id) = exclude_id {
                query = query.filter(categories::Column::Id.ne(id));
            }
            if query.one(&self.db).await?.is_some() {
                return Err(CategoryError::Duplicate("slug"));
            }
        }

        Ok(())
    }
}

#[async_trait]
impl CategoryRepository for PgCategoryRepository {
    async fn create(&self, input: NewCategory) -> CategoryResult<Category> {
        self.ensure_unique(Some(&input.name), Some(&input.slug), None)
            .await?;

        let now = Utc::now();
        let model = categories::ActiveModel {
            id: NotSet,
            name: Set(input.name),
            slug: Set(input.slug),
            description: Set(input.description),
            is_active: Set(input.is_active),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
        }
        .insert(&self.db)
        .await?;

        tracing::info!(category_id = model.id, "Created category");
        Ok(model.into())
    }

    async fn get_by_id(&self, id: i64) -> CategoryResult<Option<Category>> {
        let model = Categories::find_by_id(id).one(&self.db).await?;
        Ok(model.map(Into::into))
    }

    async fn list(&self, params: ListCategories) -> CategoryResult<(Vec<Category>, u64)> {
        let mut query = Categories::find();

        if let Some(search) = &params.search {
            let pattern = format!("%{}%", search);
            query = query.filter(
                Condition::any()
                    .add(Expr::col(categories::Column::Name).ilike(pattern.clone()))
                    .add(Expr::col(categories::Column::Slug).ilike(pattern)),
            );
        }

        if let Some(is_active) = params.is_active {
            query = query.filter(categories::Column::IsActive.eq(is_active));
        }

        let order = if params.sort.descending {
            Order::Desc
        } else {
            Order::Asc
        };
        query = match params.sort.column.as_str() {
            "name" => query.order_by(categories::Column::Name, order),
            "created_at" => query.order_by(categories::Column::CreatedAt, order),
            "updated_at" => query.order_by(categories::Column::UpdatedAt, order),
            _ => query.order_by(categories::Column::Id, order),
        };

        let paginator = query.paginate(&self.db, params.per_page.max(1));
        let total = paginator.num_items().await?;
        let models = paginator.fetch_page(params.page.saturating_sub(1)).await?;

        Ok((models.into_iter().map(Into::into).collect(), total))
    }

    async fn update(&self, id: i64, changes: UpdateCategory) -> CategoryResult<Category> {
        let model = Categories::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(CategoryError::NotFound(id))?;

        self.ensure_unique(changes.name.as_deref(), changes.slug.as_deref(), Some(id))
            .await?;

        let mut active = model.into_active_model();
        if let Some(name) = changes.name {
            active.name = Set(name);
        }
        if let Some(slug) = changes.slug {
            active.slug = Set(slug);
        }
        if let Some(description) = changes.description {
            active.description = Set(Some(description));
        }
        if let Some(is_active) = changes.is_active {
            active.is_active = Set(is_active);
        }
        active.updated_at = Set(Utc::now().into());

        let model = active.update(&self.db).await?;
        tracing::info!(category_id = id, "Updated category");
        Ok(model.into())
    }

    async fn delete(&self, id: i64) -> CategoryResult<bool> {
        let result = Categories::delete_by_id(id).exec(&self.db).await?;

        if result.rows_affected > 0 {
            tracing::info!(category_id = id, "Deleted category");
            Ok(true)
        } else {
            Ok(false)
        }
    }

    async fn list_products(
        &self,
        category_id: i64,
        params: ListScopedProducts,
    ) -> CategoryResult<(Vec<Product>, u64)> {
        let mut query = Products::find().filter(products::Column::CategoryId.eq(category_id));

        if let Some(search) = &params.search {
            let pattern = format!("%{}%", search);
            query = query.filter(Expr::col(products::Column::Name).ilike(pattern));
        }
        if let Some(is_active) = params.is_active {
            query = query.filter(products::Column::IsActive.eq(is_active));
        }

        let order = if params.sort.descending {
            Order::Desc
        } else {
            Order::Asc
        };
        query = match params.sort.column.as_str() {
            "name" => query.order_by(products::Column::Name, order),
            "price" => query.order_by(products::Column::Price, order),
            "created_at" => query.order_by(products::Column::CreatedAt, order),
            _ => query.order_by(products::Column::Id, order),
        };

        let paginator = query.paginate(&self.db, params.per_page.max(1));
        let total = paginator.num_items().await?;
        let models = paginator.fetch_page(params.page.saturating_sub(1)).await?;

        Ok((models.into_iter().map(Into::into).collect(), total))
    }
}
