use async_trait::async_trait;
use chrono::Utc;
use entities::prelude::Tags;
use entities::tags;
use sea_orm::sea_query::{Expr, extension::postgres::PgExpr};
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ActiveValue::Set, ColumnTrait, Condition,
    DatabaseConnection, EntityTrait, IntoActiveModel, Order, PaginatorTrait, QueryFilter,
    QueryOrder,
};

use crate::error::{TagError, TagResult};
use crate::models::{ListTags, NewTag, Tag, UpdateTag};
use crate::repository::TagRepository;

pub struct PgTagRepository {
    db: DatabaseConnection,
}

impl PgTagRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Reject name/slug values already held by a different row.
    async fn ensure_unique(
        &self,
        name: Option<&str>,
        slug: Option<&str>,
        exclude_id: Option<i64>,
    ) -> TagResult<()> {
        if let Some(name) = name {
            let mut query = Tags::find().filter(tags::Column::Name.eq(name));
            if let Some(id) = exclude_id {
                query = query.filter(tags::Column::Id.ne(id));
            }
            if query.one(&self.db).await?.is_some() {
                return Err(TagError::Duplicate("name"));
            }
        }

        if let Some(slug) = slug {
            let mut query = Tags::find().filter(tags::Column::Slug.eq(slug));
            if let Some(id) = exclude_id {
                query = query.filter(tags::Column::Id.ne(id));
            }
            if query.one(&self.db).await?.is_some() {
                return Err(TagError::Duplicate("slug"));
            }
        }

        Ok(())
    }
}

#[async_trait]
impl TagRepository for PgTagRepository {
    async fn create(&self, input: NewTag) -> TagResult<Tag> {
        self.ensure_unique(Some(&input.name), Some(&input.slug), None)
            .await?;

        let now = Utc::now();
        let model = tags::ActiveModel {
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

        tracing::info!(tag_id = model.id, "Created tag");
        Ok(model.into())
    }

    async fn get_by_id(&self, id: i64) -> TagResult<Option<Tag>> {
        let model = Tags::find_by_id(id).one(&self.db).await?;
        Ok(model.map(Into::into))
    }

    async fn list(&self, params: ListTags) -> TagResult<(Vec<Tag>, u64)> {
        let mut query = Tags::find();

        if let Some(search) = &params.search {
            let pattern = format!("%{}%", search);
            query = query.filter(
                Condition::any()
                    .add(Expr::col(tags::Column::Name).ilike(pattern.clone()))
                    .add(Expr::col(tags::Column::Slug).ilike(pattern)),
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

    async fn update(&self, id: i64, changes: UpdateTag) -> TagResult<Tag> {
        let model = Tags::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(TagError::NotFound(id))?;

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
        tracing::info!(tag_id = id, "Updated tag");
        Ok(model.into())
    }

    async fn delete(&self, id: i64) -> TagResult<bool> {
        let result = Tags::delete_by_id(id).exec(&self.db).await?;

        if result.rows_affected > 0 {
            tracing::info!(tag_id = id, "Deleted tag");
            Ok(true)
        } else {
            Ok(false)
        }
    }
}
