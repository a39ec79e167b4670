//! Repair record domain entities.
//!
//! A work order owns at most one active repair record, created lazily
//! the first time a technician opens or claims the job. The record
//! carries the workshop-side state: diagnosis, billable items and the
//! note thread.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::work_order::OrderStatus;

/// Repair record domain entity.
///
/// `assigned_technician_id` mirrors the owning work order's
/// assignment; note fan-out reconciles it when the two drift apart.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepairRecord {
    pub id: Uuid,
    pub work_order_id: Uuid,
    pub assigned_technician_id: Option<Uuid>,
    pub status: OrderStatus,
    pub diagnostic: String,
    /// Free-text working notes (distinct from the note thread)
    pub notes: String,
    /// When a technician took the job
    pub taken_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Kind of a billable repair item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    /// Replacement part
    Part,
    /// Labor charge
    Labor,
}

impl From<&str> for ItemKind {
    fn from(s: &str) -> Self {
        match s {
            "labor" => ItemKind::Labor,
            _ => ItemKind::Part,
        }
    }
}

impl std::fmt::Display for ItemKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ItemKind::Part => write!(f, "part"),
            ItemKind::Labor => write!(f, "labor"),
        }
    }
}

/// Billable line item on a repair record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepairItem {
    pub id: Uuid,
    pub repair_id: Uuid,
    pub kind: ItemKind,
    pub label: String,
    pub qty: i32,
    pub unit_price: f64,
}

/// Line item payload inside a repair save
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct NewRepairItem {
    pub kind: ItemKind,
    #[schema(example = "Replacement screen")]
    pub label: String,
    #[schema(example = 1)]
    pub qty: i32,
    #[schema(example = 120.0)]
    pub unit_price: f64,
}

/// Entry in a repair's note thread
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepairNote {
    pub id: Uuid,
    pub repair_id: Uuid,
    pub author_id: Uuid,
    /// Display name of the author, resolved on read
    pub author_name: Option<String>,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

/// Full repair save payload (replaces the current item list)
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct SaveRepair {
    pub status: OrderStatus,
    pub diagnostic: String,
    pub notes: String,
    pub items: Vec<NewRepairItem>,
}

/// Repair record with its items and note thread
#[derive(Debug, Clone)]
pub struct RepairDetail {
    pub record: RepairRecord,
    pub items: Vec<RepairItem>,
    pub notes: Vec<RepairNote>,
}

/// Repair item response
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RepairItemResponse {
    pub id: Uuid,
    pub kind: ItemKind,
    pub label: String,
    pub qty: i32,
    pub unit_price: f64,
}

impl From<RepairItem> for RepairItemResponse {
    fn from(item: RepairItem) -> Self {
        Self {
            id: item.id,
            kind: item.kind,
            label: item.label,
            qty: item.qty,
            unit_price: item.unit_price,
        }
    }
}

/// Note thread entry response
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct NoteResponse {
    pub id: Uuid,
    pub repair_id: Uuid,
    pub author_id: Uuid,
    #[schema(example = "John Doe")]
    pub author_name: Option<String>,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

impl From<RepairNote> for NoteResponse {
    fn from(note: RepairNote) -> Self {
        Self {
            id: note.id,
            repair_id: note.repair_id,
            author_id: note.author_id,
            author_name: note.author_name,
            message: note.message,
            created_at: note.created_at,
        }
    }
}

/// Repair record response with items and note thread
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RepairResponse {
    pub id: Uuid,
    pub work_order_id: Uuid,
    pub assigned_technician_id: Option<Uuid>,
    pub status: OrderStatus,
    pub diagnostic: String,
    pub notes: String,
    pub taken_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub items: Vec<RepairItemResponse>,
    pub repair_notes: Vec<NoteResponse>,
}

impl From<RepairDetail> for RepairResponse {
    fn from(detail: RepairDetail) -> Self {
        Self {
            id: detail.record.id,
            work_order_id: detail.record.work_order_id,
            assigned_technician_id: detail.record.assigned_technician_id,
            status: detail.record.status,
            diagnostic: detail.record.diagnostic,
            notes: detail.record.notes,
            taken_at: detail.record.taken_at,
            created_at: detail.record.created_at,
            updated_at: detail.record.updated_at,
            items: detail.items.into_iter().map(Into::into).collect(),
            repair_notes: detail.notes.into_iter().map(Into::into).collect(),
        }
    }
}
