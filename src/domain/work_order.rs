//! Work order domain entity and related types.

use chrono::{DateTime, Utc};
use rand::{distributions::Alphanumeric, Rng};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::config::{FORM_CODE_ALPHABET, FORM_CODE_LENGTH, PUBLIC_TOKEN_LENGTH};

/// Lifecycle states of a work order.
///
/// The expected path runs intake to hand-over, with `Rejected` as the
/// absorbing state for declined repairs. Transitions are advisory:
/// staff may set any state at any time, so no transition validation is
/// performed anywhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    Received,
    Diagnosing,
    AwaitingParts,
    InProgress,
    Completed,
    HandedOver,
    Rejected,
}

impl OrderStatus {
    /// States after which no further work happens
    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::HandedOver | OrderStatus::Rejected)
    }
}

impl From<&str> for OrderStatus {
    fn from(s: &str) -> Self {
        match s {
            "diagnosing" => OrderStatus::Diagnosing,
            "awaiting_parts" => OrderStatus::AwaitingParts,
            "in_progress" => OrderStatus::InProgress,
            "completed" => OrderStatus::Completed,
            "handed_over" => OrderStatus::HandedOver,
            "rejected" => OrderStatus::Rejected,
            _ => OrderStatus::Received,
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            OrderStatus::Received => "received",
            OrderStatus::Diagnosing => "diagnosing",
            OrderStatus::AwaitingParts => "awaiting_parts",
            OrderStatus::InProgress => "in_progress",
            OrderStatus::Completed => "completed",
            OrderStatus::HandedOver => "handed_over",
            OrderStatus::Rejected => "rejected",
        };
        write!(f, "{}", s)
    }
}

/// Work order domain entity.
///
/// Assignment is denormalized: `assigned_user_id` drives permissions,
/// `technician_name` is a display copy maintained alongside it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkOrder {
    pub id: Uuid,
    /// Token customers use for public status lookup
    pub public_token: String,
    /// Short code printed on the paper intake form
    pub form_code: String,
    pub client_id: Uuid,
    pub device_type: String,
    pub brand: String,
    pub model: String,
    pub serial_number: String,
    pub problem: String,
    pub accessories: String,
    pub description: String,
    pub status: OrderStatus,
    pub price: f64,
    pub warranty: Option<String>,
    pub assigned_user_id: Option<Uuid>,
    pub technician_name: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl WorkOrder {
    /// Check if the order has been claimed or assigned
    pub fn is_assigned(&self) -> bool {
        self.assigned_user_id.is_some()
    }
}

/// Generate a fresh form code (uppercase letters and digits).
///
/// Uniqueness is not guaranteed here; intake retries until the code is
/// free.
pub fn generate_form_code() -> String {
    let mut rng = rand::thread_rng();
    (0..FORM_CODE_LENGTH)
        .map(|_| {
            let idx = rng.gen_range(0..FORM_CODE_ALPHABET.len());
            FORM_CODE_ALPHABET[idx] as char
        })
        .collect()
}

/// Generate a public tracking token
pub fn generate_public_token() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(PUBLIC_TOKEN_LENGTH)
        .map(char::from)
        .collect()
}

/// Work order intake data transfer object
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateWorkOrder {
    /// Customer reference
    pub client_id: Uuid,
    /// Device category
    #[schema(example = "laptop")]
    pub device_type: String,
    #[schema(example = "Lenovo")]
    pub brand: String,
    #[schema(example = "ThinkPad T14")]
    pub model: String,
    pub serial_number: String,
    /// Problem reported by the customer
    #[schema(example = "does not power on")]
    pub problem: String,
    /// Accessories handed over with the device
    #[schema(example = "charger, carrying case")]
    pub accessories: String,
    /// Free-form intake notes
    pub description: String,
    /// Agreed or estimated price
    pub price: f64,
    /// Warranty terms, if any
    pub warranty: Option<String>,
}

/// Insert data handed to the work order repository
#[derive(Debug, Clone)]
pub struct NewWorkOrder {
    pub public_token: String,
    pub form_code: String,
    pub client_id: Uuid,
    pub device_type: String,
    pub brand: String,
    pub model: String,
    pub serial_number: String,
    pub problem: String,
    pub accessories: String,
    pub description: String,
    pub price: f64,
    pub warranty: Option<String>,
}

/// Work order response for authenticated staff
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct WorkOrderResponse {
    pub id: Uuid,
    pub public_token: String,
    #[schema(example = "K7Q2Z")]
    pub form_code: String,
    pub client_id: Uuid,
    pub device_type: String,
    pub brand: String,
    pub model: String,
    pub serial_number: String,
    pub problem: String,
    pub accessories: String,
    pub description: String,
    pub status: OrderStatus,
    pub price: f64,
    pub warranty: Option<String>,
    pub assigned_user_id: Option<Uuid>,
    pub technician_name: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<WorkOrder> for WorkOrderResponse {
    fn from(order: WorkOrder) -> Self {
        Self {
            id: order.id,
            public_token: order.public_token,
            form_code: order.form_code,
            client_id: order.client_id,
            device_type: order.device_type,
            brand: order.brand,
            model: order.model,
            serial_number: order.serial_number,
            problem: order.problem,
            accessories: order.accessories,
            description: order.description,
            status: order.status,
            price: order.price,
            warranty: order.warranty,
            assigned_user_id: order.assigned_user_id,
            technician_name: order.technician_name,
            created_at: order.created_at,
            updated_at: order.updated_at,
        }
    }
}

/// Public tracking response (no customer or staff identifiers)
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct TrackingResponse {
    #[schema(example = "K7Q2Z")]
    pub form_code: String,
    pub status: OrderStatus,
    pub device_type: String,
    pub brand: String,
    pub model: String,
    pub problem: String,
    pub price: f64,
    pub warranty: Option<String>,
    pub technician_name: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<WorkOrder> for TrackingResponse {
    fn from(order: WorkOrder) -> Self {
        Self {
            form_code: order.form_code,
            status: order.status,
            device_type: order.device_type,
            brand: order.brand,
            model: order.model,
            problem: order.problem,
            price: order.price,
            warranty: order.warranty,
            technician_name: order.technician_name,
            created_at: order.created_at,
            updated_at: order.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn form_code_has_expected_shape() {
        let code = generate_form_code();
        assert_eq!(code.len(), FORM_CODE_LENGTH);
        assert!(code
            .bytes()
            .all(|b| FORM_CODE_ALPHABET.contains(&b)));
    }

    #[test]
    fn public_token_is_alphanumeric() {
        let token = generate_public_token();
        assert_eq!(token.len(), PUBLIC_TOKEN_LENGTH);
        assert!(token.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn status_round_trips_through_display() {
        for status in [
            OrderStatus::Received,
            OrderStatus::Diagnosing,
            OrderStatus::AwaitingParts,
            OrderStatus::InProgress,
            OrderStatus::Completed,
            OrderStatus::HandedOver,
            OrderStatus::Rejected,
        ] {
            assert_eq!(OrderStatus::from(status.to_string().as_str()), status);
        }
    }

    #[test]
    fn unknown_status_falls_back_to_received() {
        assert_eq!(OrderStatus::from("exploded"), OrderStatus::Received);
    }

    #[test]
    fn terminal_states() {
        assert!(OrderStatus::HandedOver.is_terminal());
        assert!(OrderStatus::Rejected.is_terminal());
        assert!(!OrderStatus::InProgress.is_terminal());
        assert!(!OrderStatus::Received.is_terminal());
    }
}
