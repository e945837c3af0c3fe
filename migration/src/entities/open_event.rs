//! Open event entity: one pixel fetch, interpreted as one open impression.

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "open_events")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    /// May reference a message that does not exist; insertion is attempted
    /// regardless so the pixel path never depends on a lookup.
    pub message_id: String,
    pub occurred_at: DateTimeUtc,
    pub source_ip: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub user_agent: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
