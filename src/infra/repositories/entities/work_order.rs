//! Work order database entity for SeaORM.

use sea_orm::entity::prelude::*;

use crate::domain::{OrderStatus, WorkOrder};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "work_orders")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub public_token: String,
    #[sea_orm(unique)]
    pub form_code: String,
    pub client_id: Uuid,
    pub device_type: String,
    pub brand: String,
    pub model: String,
    pub serial_number: String,
    pub problem: String,
    pub accessories: String,
    pub description: String,
    pub status: String,
    pub price: f64,
    pub warranty: Option<String>,
    pub assigned_user_id: Option<Uuid>,
    /// Display copy of the assignee's name
    pub technician_name: Option<String>,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Convert database model to domain entity
impl From<Model> for WorkOrder {
    fn from(model: Model) -> Self {
        WorkOrder {
            id: model.id,
            public_token: model.public_token,
            form_code: model.form_code,
            client_id: model.client_id,
            device_type: model.device_type,
            brand: model.brand,
            model: model.model,
            serial_number: model.serial_number,
            problem: model.problem,
            accessories: model.accessories,
            description: model.description,
            status: OrderStatus::from(model.status.as_str()),
            price: model.price,
            warranty: model.warranty,
            assigned_user_id: model.assigned_user_id,
            technician_name: model.technician_name,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
