//! Repair note database entity for SeaORM.

use sea_orm::entity::prelude::*;

use crate::domain::RepairNote;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "repair_notes")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: Uuid,
    pub repair_id: Uuid,
    pub user_id: Uuid,
    pub message: String,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Convert database model to domain entity.
///
/// The author's display name is resolved separately by the repository.
impl From<Model> for RepairNote {
    fn from(model: Model) -> Self {
        RepairNote {
            id: model.id,
            repair_id: model.repair_id,
            author_id: model.user_id,
            author_name: None,
            message: model.message,
            created_at: model.created_at,
        }
    }
}
