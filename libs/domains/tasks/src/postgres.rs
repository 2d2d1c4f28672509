use async_trait::async_trait;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, UpdateMany,
};
use tracing::debug;

use crate::{
    entity,
    error::{TaskError, TaskResult},
    models::{CreateTask, Task},
    repository::TaskRepository,
};

/// [`TaskRepository`] backed by the `tasks` table.
///
/// Holds a handle to a pool owned by the caller; cloning it is cheap.
#[derive(Clone)]
pub struct PgTaskRepository {
    db: DatabaseConnection,
}

impl PgTaskRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub fn db(&self) -> &DatabaseConnection {
        &self.db
    }

    async fn find_model(&self, id: i64) -> TaskResult<Option<entity::Model>> {
        Ok(entity::Entity::find_by_id(id).one(&self.db).await?)
    }

    async fn load(&self, id: i64) -> TaskResult<Task> {
        self.find_model(id)
            .await?
            .map(Task::from)
            .ok_or_else(|| TaskError::NotFound(id.to_string()))
    }

    fn set_status(id: i64, status: &str) -> UpdateMany<entity::Entity> {
        entity::Entity::update_many()
            .col_expr(entity::Column::Status, Expr::value(status.to_owned()))
            .col_expr(entity::Column::UpdatedAt, Expr::cust("CURRENT_TIMESTAMP"))
            .filter(entity::Column::Id.eq(id))
    }
}

/// Ids are decimal keys. Anything else cannot match a row.
fn parse_id(id: &str) -> TaskResult<i64> {
    id.parse().map_err(|_| TaskError::NotFound(id.to_string()))
}

#[async_trait]
impl TaskRepository for PgTaskRepository {
    async fn fetch_all(&self) -> TaskResult<Vec<Task>> {
        let models = entity::Entity::find()
            .order_by_desc(entity::Column::CreatedAt)
            .order_by_desc(entity::Column::Id)
            .all(&self.db)
            .await?;

        debug!(count = models.len(), "Fetched tasks");
        Ok(models.into_iter().map(Task::from).collect())
    }

    async fn insert(&self, input: CreateTask) -> TaskResult<Task> {
        let active_model: entity::ActiveModel = input.into();

        let id = entity::Entity::insert(active_model)
            .exec(&self.db)
            .await?
            .last_insert_id;
        debug!(task_id = id, "Inserted task");

        // Rows are never deleted, so the fresh id must resolve.
        self.find_model(id)
            .await?
            .map(Task::from)
            .ok_or_else(|| TaskError::Database(format!("inserted task {id} could not be read back")))
    }

    async fn fetch_by_id(&self, id: &str) -> TaskResult<Task> {
        self.load(parse_id(id)?).await
    }

    async fn update_status(&self, id: &str, status: &str) -> TaskResult<Task> {
        let key = parse_id(id)?;

        let result = Self::set_status(key, status).exec(&self.db).await?;
        if result.rows_affected == 0 {
            return Err(TaskError::NotFound(id.to_string()));
        }

        debug!(task_id = key, status, "Updated task status");
        self.load(key).await
    }

    async fn transition_status(&self, id: &str, status: &str) -> TaskResult<Option<Task>> {
        let key = match id.parse::<i64>() {
            Ok(key) => key,
            Err(_) => return Ok(None),
        };

        let result = Self::set_status(key, status)
            .filter(entity::Column::Status.ne(status))
            .exec(&self.db)
            .await?;
        if result.rows_affected == 0 {
            return Ok(None);
        }

        debug!(task_id = key, status, "Transitioned task status");
        self.load(key).await.map(Some)
    }
}
