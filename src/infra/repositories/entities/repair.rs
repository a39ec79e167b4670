//! Repair record database entity for SeaORM.

use sea_orm::entity::prelude::*;

use crate::domain::{OrderStatus, RepairRecord};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "repairs")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: Uuid,
    pub work_order_id: Uuid,
    /// Mirrors the owning work order's assignment
    pub assigned_technician_id: Option<Uuid>,
    pub status: String,
    pub diagnostic: String,
    pub notes: String,
    pub taken_at: Option<DateTimeUtc>,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Convert database model to domain entity
impl From<Model> for RepairRecord {
    fn from(model: Model) -> Self {
        RepairRecord {
            id: model.id,
            work_order_id: model.work_order_id,
            assigned_technician_id: model.assigned_technician_id,
            status: OrderStatus::from(model.status.as_str()),
            diagnostic: model.diagnostic,
            notes: model.notes,
            taken_at: model.taken_at,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
