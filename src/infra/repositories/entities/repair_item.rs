//! Repair item database entity for SeaORM.

use sea_orm::entity::prelude::*;

use crate::domain::{ItemKind, RepairItem};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "repair_items")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: Uuid,
    pub repair_id: Uuid,
    pub kind: String,
    pub label: String,
    pub qty: i32,
    pub unit_price: f64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Convert database model to domain entity
impl From<Model> for RepairItem {
    fn from(model: Model) -> Self {
        RepairItem {
            id: model.id,
            repair_id: model.repair_id,
            kind: ItemKind::from(model.kind.as_str()),
            label: model.label,
            qty: model.qty,
            unit_price: model.unit_price,
        }
    }
}
