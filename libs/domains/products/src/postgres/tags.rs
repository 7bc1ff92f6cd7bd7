use async_trait::async_trait;
use chrono::Utc;
use domain_tags::{ListTags, Tag};
use entities::prelude::{ProductTags, Products, Tags};
use entities::{product_tags, products, tags};
use sea_orm::sea_query::{Expr, extension::postgres::PgExpr};
use sea_orm::{
    ActiveValue::Set, ColumnTrait, Condition, DatabaseConnection, EntityTrait, JoinType, Order,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, RelationTrait, TransactionTrait,
};

use crate::error::{ProductError, ProductResult};
use crate::models::{ListScopedProducts, Product};
use crate::repository::ProductTagRepository;

pub struct PgProductTagRepository {
    db: DatabaseConnection,
}

impl PgProductTagRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ProductTagRepository for PgProductTagRepository {
    async fn list_tags(
        &self,
        product_id: i64,
        params: ListTags,
    ) -> ProductResult<(Vec<Tag>, u64)> {
        let mut query = Tags::find()
            .join(JoinType::InnerJoin, product_tags::Relation::Tags.def().rev())
            .filter(product_tags::Column::ProductId.eq(product_id));

        if let Some(search) = &params.search {
            let pattern = format!("%{}%", search);
            query = query.filter(
                Condition::any()
                    .add(Expr::col((tags::Entity, tags::Column::Name)).ilike(pattern.clone()))
                    .add(Expr::col((tags::Entity, tags::Column::Slug)).ilike(pattern)),
            );
        }
        if let Some(is_active) = params.is_active {
            query = query.filter(tags::Column::IsActive.eq(is_active));
        }

        let order = if params.sort.descending {
            Order::Desc
        } else {
            Order::Asc
        };
        query = match params.sort.column.as_str() {
            "name" => query.order_by(tags::Column::Name, order),
            "created_at" => query.order_by(tags::Column::CreatedAt, order),
            "updated_at" => query.order_by(tags::Column::UpdatedAt, order),
            _ => query.order_by(tags::Column::Id, order),
        };

        let paginator = query.paginate(&self.db, params.per_page.max(1));
        let total = paginator.num_items().await?;
        let models = paginator.fetch_page(params.page.saturating_sub(1)).await?;

        Ok((models.into_iter().map(Into::into).collect(), total))
    }

    async fn list_products(
        &self,
        tag_id: i64,
        params: ListScopedProducts,
    ) -> ProductResult<(Vec<Product>, u64)> {
        let mut query = Products::find()
            .join(
                JoinType::InnerJoin,
                product_tags::Relation::Products.def().rev(),
            )
            .filter(product_tags::Column::TagId.eq(tag_id));

        if let Some(search) = &params.search {
            let pattern = format!("%{}%", search);
            query = query
                .filter(Expr::col((products::Entity, products::Column::Name)).ilike(pattern));
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

    async fn all_tags(&self, product_id: i64) -> ProductResult<Vec<Tag>> {
        let models = Tags::find()
            .join(JoinType::InnerJoin, product_tags::Relation::Tags.def().rev())
            .filter(product_tags::Column::ProductId.eq(product_id))
            .order_by_asc(tags::Column::Id)
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn sync(&self, product_id: i64, tag_ids: Vec<i64>) -> ProductResult<()> {
        let found: Vec<i64> = Tags::find()
            .filter(tags::Column::Id.is_in(tag_ids.clone()))
            .select_only()
            .column(tags::Column::Id)
            .into_tuple()
            .all(&self.db)
            .await?;

        let missing: Vec<i64> = tag_ids
            .iter()
            .filter(|id| !<[i64]>::contains(&found, id))
            .copied()
            .collect();
        if !missing.is_empty() {
            return Err(ProductError::UnknownTagIds(missing));
        }

        let txn = self.db.begin().await?;

        ProductTags::delete_many()
            .filter(product_tags::Column::ProductId.eq(product_id))
            .filter(product_tags::Column::TagId.is_not_in(tag_ids.clone()))
            .exec(&txn)
            .await?;

        let existing: Vec<i64> = ProductTags::find()
            .filter(product_tags::Column::ProductId.eq(product_id))
            .select_only()
            .column(product_tags::Column::TagId)
            .into_tuple()
            .all(&txn)
            .await?;

        let now = Utc::now();
        let rows: Vec<product_tags::ActiveModel> = tag_ids
            .into_iter()
            .filter(|id| !<[i64]>::contains(&existing, id))
            .map(|tag_id| product_tags::ActiveModel {
                product_id: Set(product_id),
                tag_id: Set(tag_id),
                created_at: Set(now.into()),
                updated_at: Set(now.into()),
            })
            .collect();

        if !rows.is_empty() {
            ProductTags::insert_many(rows).exec(&txn).await?;
        }

        txn.commit().await?;

        tracing::info!(product_id = product_id, "Synced product tags");
        Ok(())
    }

    async fn attach(&self, product_id: i64, tag_id: i64) -> ProductResult<()> {
        let exists = ProductTags::find_by_id((product_id, tag_id))
            .one(&self.db)
            .await?
            .is_some();
        if exists {
            return Ok(());
        }

        let now = Utc::now();
        ProductTags::insert(product_tags::ActiveModel {
            product_id: Set(product_id),
            tag_id: Set(tag_id),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
        })
        .exec(&self.db)
        .await?;

        tracing::info!(product_id = product_id, tag_id = tag_id, "Attached tag");
        Ok(())
    }

    async fn detach(&self, product_id: i64, tag_id: i64) -> ProductResult<()> {
        let result = ProductTags::delete_by_id((product_id, tag_id))
            .exec(&self.db)
            .await?;

        if result.rows_affected > 0 {
            tracing::info!(product_id = product_id, tag_id = tag_id, "Detached tag");
        }
        Ok(())
    }

    async fn product_exists(&self, product_id: i64) -> ProductResult<bool> {
        Ok(Products::find_by_id(product_id)
            .one(&self.db)
            .await?
            .is_some())
    }

    async fn tag_exists(&self, tag_id: i64) -> ProductResult<bool> {
        Ok(Tags::find_by_id(tag_id).one(&self.db).await?.is_some())
    }
}
