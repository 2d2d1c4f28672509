use chrono::{SecondsFormat, Utc};
use sea_orm::ActiveValue::{NotSet, Set};
use sea_orm::entity::prelude::*;

/// Sea-ORM Entity for the `tasks` table
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "tasks")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub title: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    pub status: String,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Wire format for timestamps: `2025-01-01T10:00:00.123456Z`.
pub fn format_timestamp(ts: &DateTimeWithTimeZone) -> String {
    ts.with_timezone(&Utc)
        .to_rfc3339_opts(SecondsFormat::Micros, true)
}

// NULL description becomes "" here and nowhere else.
impl From<Model> for crate::models::Task {
    fn from(model: Model) -> Self {
        Self {
            id: model.id.to_string(),
            title: model.title,
            description: model.description.unwrap_or_default(),
            status: model.status,
            created_at: format_timestamp(&model.created_at),
            updated_at: format_timestamp(&model.updated_at),
        }
    }
}

// "" becomes NULL. Id and timestamps come from column defaults.
impl From<crate::models::CreateTask> for ActiveModel {
    fn from(input: crate::models::CreateTask) -> Self {
        let description = Some(input.description).filter(|d| !d.is_empty());

        ActiveModel {
            id: NotSet,
            title: Set(input.title),
            description: Set(description),
            status: Set(input.status),
            created_at: NotSet,
            updated_at: NotSet,
        }
    }
}
