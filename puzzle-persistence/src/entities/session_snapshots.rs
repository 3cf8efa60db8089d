use sea_orm::entity::prelude::*;

/// One persisted session per calendar date. `payload` holds the
/// JSON-serialized snapshot; the engine owns its schema.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "session_snapshots")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub date_key: String,
    pub payload: String,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
