//! End-to-end tests for the assignment and note flow.
//!
//! Real services wired against in-memory repositories, so routing,
//! assignment reconciliation and inbox scoping are exercised together
//! the way the HTTP layer drives them.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use repairdesk::domain::{
    CreateWorkOrder, ItemKind, NewNotification, NewRepairItem, NewUser, NewWorkOrder, Notification,
    OrderStatus, RepairItem, RepairNote, RepairRecord, SaveRepair, User, UserChanges, UserRole,
    WorkOrder,
};
use repairdesk::errors::{AppError, AppResult};
use repairdesk::infra::{
    NotificationRepository, RepairRepository, UserRepository, WorkOrderRepository,
};
use repairdesk::services::{
    AssignmentManager, AssignmentService, NotificationService, Notifier, RepairManager,
    RepairService, WorkOrderManager, WorkOrderService,
};

// =============================================================================
// In-Memory Repositories
// =============================================================================

struct InMemoryUsers {
    rows: Mutex<Vec<User>>,
}

#[async_trait]
impl UserRepository for InMemoryUsers {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        Ok(self.rows.lock().unwrap().iter().find(|u| u.id == id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.email == email)
            .cloned())
    }

    async fn find_many(&self, ids: &[Uuid]) -> AppResult<Vec<User>> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|u| ids.contains(&u.id))
            .cloned()
            .collect())
    }

    async fn create(&self, data: NewUser) -> AppResult<User> {
        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4(),
            email: data.email,
            password_hash: data.password_hash,
            name: data.name,
            role: data.role,
            is_active: true,
            work_hours: data.work_hours,
            target: data.target,
            bonus: data.bonus,
            created_at: now,
            updated_at: now,
        };
        self.rows.lock().unwrap().push(user.clone());
        Ok(user)
    }

    async fn update(&self, id: Uuid, changes: UserChanges) -> AppResult<User> {
        let mut rows = self.rows.lock().unwrap();
        let user = rows
            .iter_mut()
            .find(|u| u.id == id)
            .ok_or(AppError::NotFound)?;
        if let Some(name) = changes.name {
            user.name = name;
        }
        if let Some(email) = changes.email {
            user.email = email;
        }
        if let Some(role) = changes.role {
            user.role = role;
        }
        if let Some(hash) = changes.password_hash {
            user.password_hash = hash;
        }
        if let Some(active) = changes.is_active {
            user.is_active = active;
        }
        if let Some(hours) = changes.work_hours {
            user.work_hours = hours;
        }
        if let Some(target) = changes.target {
            user.target = target;
        }
        if let Some(bonus) = changes.bonus {
            user.bonus = bonus;
        }
        user.updated_at = Utc::now();
        Ok(user.clone())
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|u| u.id != id);
        if rows.len() == before {
            return Err(AppError::NotFound);
        }
        Ok(())
    }

    async fn list(&self) -> AppResult<Vec<User>> {
        Ok(self.rows.lock().unwrap().clone())
    }

    async fn list_by_role(&self, role: UserRole) -> AppResult<Vec<User>> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|u| u.role == role)
            .cloned()
            .collect())
    }
}

struct InMemoryOrders {
    rows: Mutex<Vec<WorkOrder>>,
}

#[async_trait]
impl WorkOrderRepository for InMemoryOrders {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<WorkOrder>> {
        Ok(self.rows.lock().unwrap().iter().find(|o| o.id == id).cloned())
    }

    async fn find_by_public_token(&self, token: &str) -> AppResult<Option<WorkOrder>> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .find(|o| o.public_token == token)
            .cloned())
    }

    async fn form_code_exists(&self, code: &str) -> AppResult<bool> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .any(|o| o.form_code == code))
    }

    async fn create(&self, data: NewWorkOrder) -> AppResult<WorkOrder> {
        let now = Utc::now();
        let order = WorkOrder {
            id: Uuid::new_v4(),
            public_token: data.public_token,
            form_code: data.form_code,
            client_id: data.client_id,
            device_type: data.device_type,
            brand: data.brand,
            model: data.model,
            serial_number: data.serial_number,
            problem: data.problem,
            accessories: data.accessories,
            description: data.description,
            status: OrderStatus::Received,
            price: data.price,
            warranty: data.warranty,
            assigned_user_id: None,
            technician_name: None,
            created_at: now,
            updated_at: now,
        };
        self.rows.lock().unwrap().push(order.clone());
        Ok(order)
    }

    async fn list_recent(&self, status: Option<OrderStatus>) -> AppResult<Vec<WorkOrder>> {
        let rows = self.rows.lock().unwrap();
        let mut out: Vec<WorkOrder> = rows
            .iter()
            .filter(|o| status.map_or(true, |s| o.status == s))
            .cloned()
            .collect();
        out.reverse();
        Ok(out)
    }

    async fn claim(
        &self,
        order_id: Uuid,
        technician_id: Uuid,
        technician_name: &str,
    ) -> AppResult<WorkOrder> {
        let mut rows = self.rows.lock().unwrap();
        let order = rows
            .iter_mut()
            .find(|o| o.id == order_id)
            .ok_or(AppError::NotFound)?;
        match order.assigned_user_id {
            Some(holder) if holder != technician_id => Err(AppError::conflict(
                "Work order is already claimed by another technician",
            )),
            _ => {
                order.assigned_user_id = Some(technician_id);
                order.technician_name = Some(technician_name.to_string());
                order.updated_at = Utc::now();
                Ok(order.clone())
            }
        }
    }

    async fn reassign(
        &self,
        order_id: Uuid,
        technician_id: Uuid,
        technician_name: &str,
    ) -> AppResult<WorkOrder> {
        let mut rows = self.rows.lock().unwrap();
        let order = rows
            .iter_mut()
            .find(|o| o.id == order_id)
            .ok_or(AppError::NotFound)?;
        order.assigned_user_id = Some(technician_id);
        order.technician_name = Some(technician_name.to_string());
        order.updated_at = Utc::now();
        Ok(order.clone())
    }
}

struct InMemoryRepairs {
    records: Mutex<Vec<RepairRecord>>,
    items: Mutex<Vec<RepairItem>>,
    notes: Mutex<Vec<RepairNote>>,
}

#[async_trait]
impl RepairRepository for InMemoryRepairs {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<RepairRecord>> {
        Ok(self
            .records
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.id == id)
            .cloned())
    }

    async fn latest_for_order(&self, order_id: Uuid) -> AppResult<Option<RepairRecord>> {
        Ok(self
            .records
            .lock()
            .unwrap()
            .iter()
            .rev()
            .find(|r| r.work_order_id == order_id)
            .cloned())
    }

    async fn create_for_order(
        &self,
        order_id: Uuid,
        assigned_technician_id: Option<Uuid>,
    ) -> AppResult<RepairRecord> {
        let now = Utc::now();
        let record = RepairRecord {
            id: Uuid::new_v4(),
            work_order_id: order_id,
            assigned_technician_id,
            status: OrderStatus::InProgress,
            diagnostic: String::new(),
            notes: String::new(),
            taken_at: None,
            created_at: now,
            updated_at: now,
        };
        self.records.lock().unwrap().push(record.clone());
        Ok(record)
    }

    async fn save(&self, id: Uuid, data: SaveRepair) -> AppResult<RepairRecord> {
        let mut records = self.records.lock().unwrap();
        let record = records
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or(AppError::NotFound)?;
        record.status = data.status;
        record.diagnostic = data.diagnostic;
        record.notes = data.notes;
        record.updated_at = Utc::now();
        let updated = record.clone();
        drop(records);

        let mut items = self.items.lock().unwrap();
        items.retain(|i| i.repair_id != id);
        for item in data.items {
            items.push(RepairItem {
                id: Uuid::new_v4(),
                repair_id: id,
                kind: item.kind,
                label: item.label,
                qty: item.qty,
                unit_price: item.unit_price,
            });
        }
        Ok(updated)
    }

    async fn set_assigned_technician(&self, id: Uuid, technician_id: Uuid) -> AppResult<()> {
        let mut records = self.records.lock().unwrap();
        let record = records
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or(AppError::NotFound)?;
        record.assigned_technician_id = Some(technician_id);
        record.updated_at = Utc::now();
        Ok(())
    }

    async fn items_for(&self, repair_id: Uuid) -> AppResult<Vec<RepairItem>> {
        Ok(self
            .items
            .lock()
            .unwrap()
            .iter()
            .filter(|i| i.repair_id == repair_id)
            .cloned()
            .collect())
    }

    async fn add_note(
        &self,
        repair_id: Uuid,
        author_id: Uuid,
        message: &str,
    ) -> AppResult<RepairNote> {
        let note = RepairNote {
            id: Uuid::new_v4(),
            repair_id,
            author_id,
            author_name: None,
            message: message.to_string(),
            created_at: Utc::now(),
        };
        self.notes.lock().unwrap().push(note.clone());
        Ok(note)
    }

    async fn notes_for(&self, repair_id: Uuid) -> AppResult<Vec<RepairNote>> {
        Ok(self
            .notes
            .lock()
            .unwrap()
            .iter()
            .filter(|n| n.repair_id == repair_id)
            .cloned()
            .collect())
    }
}

#[derive(Default)]
struct InMemoryNotifications {
    rows: Mutex<Vec<Notification>>,
}

#[async_trait]
impl NotificationRepository for InMemoryNotifications {
    async fn create(&self, data: NewNotification) -> AppResult<Notification> {
        let notification = Notification {
            id: Uuid::new_v4(),
            user_id: data.user_id,
            work_order_id: data.work_order_id,
            repair_id: data.repair_id,
            message: data.message,
            read: false,
            created_at: Utc::now(),
        };
        self.rows.lock().unwrap().push(notification.clone());
        Ok(notification)
    }

    async fn list_for_user(&self, user_id: Uuid) -> AppResult<Vec<Notification>> {
        let rows = self.rows.lock().unwrap();
        let mut out: Vec<Notification> = rows
            .iter()
            .filter(|n| n.user_id == user_id)
            .cloned()
            .collect();
        out.reverse();
        Ok(out)
    }

    async fn mark_read(&self, id: Uuid, user_id: Uuid) -> AppResult<bool> {
        let mut rows = self.rows.lock().unwrap();
        match rows.iter_mut().find(|n| n.id == id && n.user_id == user_id) {
            Some(n) => {
                n.read = true;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: Uuid, user_id: Uuid) -> AppResult<bool> {
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|n| !(n.id == id && n.user_id == user_id));
        Ok(rows.len() != before)
    }
}

// =============================================================================
// Test Harness
// =============================================================================

/// All services wired together over in-memory storage
struct Workshop {
    repairs: Arc<InMemoryRepairs>,
    notifier: Arc<Notifier>,
    work_orders: WorkOrderManager,
    assignments: AssignmentManager,
    repair_service: RepairManager,
}

fn workshop(users: Vec<User>, orders: Vec<WorkOrder>, repairs: Vec<RepairRecord>) -> Workshop {
    let users = Arc::new(InMemoryUsers {
        rows: Mutex::new(users),
    });
    let orders = Arc::new(InMemoryOrders {
        rows: Mutex::new(orders),
    });
    let repairs = Arc::new(InMemoryRepairs {
        records: Mutex::new(repairs),
        items: Mutex::new(Vec::new()),
        notes: Mutex::new(Vec::new()),
    });
    let notifications = Arc::new(InMemoryNotifications::default());

    let notifier = Arc::new(Notifier::new(notifications, users.clone()));
    let work_orders = WorkOrderManager::new(orders.clone());
    let assignments = AssignmentManager::new(orders.clone(), users.clone());
    let repair_service =
        RepairManager::new(repairs.clone(), orders, users, notifier.clone());

    Workshop {
        repairs,
        notifier,
        work_orders,
        assignments,
        repair_service,
    }
}

fn staff(name: &str, role: UserRole) -> User {
    let now = Utc::now();
    User {
        id: Uuid::new_v4(),
        email: format!("{}@shop.example", name.to_lowercase()),
        password_hash: "not-checked-here".to_string(),
        name: name.to_string(),
        role,
        is_active: true,
        work_hours: None,
        target: None,
        bonus: None,
        created_at: now,
        updated_at: now,
    }
}

fn unassigned_order() -> WorkOrder {
    let now = Utc::now();
    WorkOrder {
        id: Uuid::new_v4(),
        public_token: "tok1234567ab".to_string(),
        form_code: "ZX91Q".to_string(),
        client_id: Uuid::new_v4(),
        device_type: "laptop".to_string(),
        brand: "Lenovo".to_string(),
        model: "ThinkPad T14".to_string(),
        serial_number: "SN-001".to_string(),
        problem: "does not power on".to_string(),
        accessories: "charger".to_string(),
        description: String::new(),
        status: OrderStatus::Received,
        price: 250.0,
        warranty: None,
        assigned_user_id: None,
        technician_name: None,
        created_at: now,
        updated_at: now,
    }
}

fn order_assigned_to(user: &User) -> WorkOrder {
    let mut order = unassigned_order();
    order.assigned_user_id = Some(user.id);
    order.technician_name = Some(user.name.clone());
    order
}

fn repair_on(order: &WorkOrder, assigned_technician_id: Option<Uuid>) -> RepairRecord {
    let now = Utc::now();
    RepairRecord {
        id: Uuid::new_v4(),
        work_order_id: order.id,
        assigned_technician_id,
        status: OrderStatus::InProgress,
        diagnostic: String::new(),
        notes: String::new(),
        taken_at: None,
        created_at: now,
        updated_at: now,
    }
}

// =============================================================================
// Note Fan-Out
// =============================================================================

#[tokio::test]
async fn note_on_unassigned_order_reaches_all_other_staff() {
    let author = staff("Rae", UserRole::Technician);
    let other_tech = staff("Tudor", UserRole::Technician);
    let admin = staff("Ana", UserRole::Admin);
    let order = unassigned_order();
    let repair = repair_on(&order, None);
    let repair_id = repair.id;

    let shop = workshop(
        vec![author.clone(), other_tech.clone(), admin.clone()],
        vec![order],
        vec![repair],
    );

    let note = shop
        .repair_service
        .append_note(repair_id, author.id, "  ordered a new mainboard  ")
        .await
        .unwrap();

    assert_eq!(note.message, "ordered a new mainboard");
    assert_eq!(note.author_name.as_deref(), Some("Rae"));

    let inbox = shop.notifier.inbox(other_tech.id).await.unwrap();
    assert_eq!(inbox.len(), 1);
    assert_eq!(inbox[0].message, "Rae added a note to ticket #ZX91Q");
    assert_eq!(shop.notifier.inbox(admin.id).await.unwrap().len(), 1);
    assert!(shop.notifier.inbox(author.id).await.unwrap().is_empty());
}

#[tokio::test]
async fn assignee_note_goes_to_admins_only() {
    let assignee = staff("Rae", UserRole::Technician);
    let other_tech = staff("Tudor", UserRole::Technician);
    let admin_a = staff("Ana", UserRole::Admin);
    let admin_b = staff("Mihai", UserRole::Admin);
    let order = order_assigned_to(&assignee);
    let repair = repair_on(&order, Some(assignee.id));
    let repair_id = repair.id;

    let shop = workshop(
        vec![
            assignee.clone(),
            other_tech.clone(),
            admin_a.clone(),
            admin_b.clone(),
        ],
        vec![order],
        vec![repair],
    );

    shop.repair_service
        .append_note(repair_id, assignee.id, "board reflowed, testing now")
        .await
        .unwrap();

    assert_eq!(shop.notifier.inbox(admin_a.id).await.unwrap().len(), 1);
    assert_eq!(shop.notifier.inbox(admin_b.id).await.unwrap().len(), 1);
    assert!(shop.notifier.inbox(other_tech.id).await.unwrap().is_empty());
    assert!(shop.notifier.inbox(assignee.id).await.unwrap().is_empty());
}

#[tokio::test]
async fn admin_note_goes_to_the_assignee_only() {
    let assignee = staff("Rae", UserRole::Technician);
    let other_tech = staff("Tudor", UserRole::Technician);
    let author = staff("Ana", UserRole::Admin);
    let other_admin = staff("Mihai", UserRole::Admin);
    let order = order_assigned_to(&assignee);
    let repair = repair_on(&order, Some(assignee.id));
    let repair_id = repair.id;

    let shop = workshop(
        vec![
            assignee.clone(),
            other_tech.clone(),
            author.clone(),
            other_admin.clone(),
        ],
        vec![order],
        vec![repair],
    );

    shop.repair_service
        .append_note(repair_id, author.id, "customer approved the quote")
        .await
        .unwrap();

    assert_eq!(shop.notifier.inbox(assignee.id).await.unwrap().len(), 1);
    assert!(shop.notifier.inbox(other_admin.id).await.unwrap().is_empty());
    assert!(shop.notifier.inbox(other_tech.id).await.unwrap().is_empty());
}

#[tokio::test]
async fn receptionist_note_goes_to_assignee_and_admins() {
    let assignee = staff("Rae", UserRole::Technician);
    let other_tech = staff("Tudor", UserRole::Technician);
    let admin = staff("Ana", UserRole::Admin);
    let author = staff("Ioana", UserRole::Receptionist);
    let order = order_assigned_to(&assignee);
    let repair = repair_on(&order, Some(assignee.id));
    let repair_id = repair.id;

    let shop = workshop(
        vec![
            assignee.clone(),
            other_tech.clone(),
            admin.clone(),
            author.clone(),
        ],
        vec![order],
        vec![repair],
    );

    shop.repair_service
        .append_note(repair_id, author.id, "customer called for an update")
        .await
        .unwrap();

    assert_eq!(shop.notifier.inbox(assignee.id).await.unwrap().len(), 1);
    assert_eq!(shop.notifier.inbox(admin.id).await.unwrap().len(), 1);
    assert!(shop.notifier.inbox(other_tech.id).await.unwrap().is_empty());
    assert!(shop.notifier.inbox(author.id).await.unwrap().is_empty());
}

#[tokio::test]
async fn append_note_adopts_the_order_assignment_before_routing() {
    let owner = staff("Rae", UserRole::Technician);
    let other_tech = staff("Tudor", UserRole::Technician);
    let admin = staff("Ana", UserRole::Admin);
    let order = order_assigned_to(&owner);
    // Record created before the claim still carries no technician
    let repair = repair_on(&order, None);
    let repair_id = repair.id;

    let shop = workshop(
        vec![owner.clone(), other_tech.clone(), admin.clone()],
        vec![order],
        vec![repair],
    );

    shop.repair_service
        .append_note(repair_id, owner.id, "picked this one up")
        .await
        .unwrap();

    // Routed as an assignee note, not as an unassigned broadcast
    assert!(shop.notifier.inbox(other_tech.id).await.unwrap().is_empty());
    assert_eq!(shop.notifier.inbox(admin.id).await.unwrap().len(), 1);

    let records = shop.repairs.records.lock().unwrap();
    assert_eq!(records[0].assigned_technician_id, Some(owner.id));
}

#[tokio::test]
async fn note_thread_reads_oldest_first() {
    let assignee = staff("Rae", UserRole::Technician);
    let order = order_assigned_to(&assignee);
    let repair = repair_on(&order, Some(assignee.id));
    let repair_id = repair.id;

    let shop = workshop(vec![assignee.clone()], vec![order], vec![repair]);

    shop.repair_service
        .append_note(repair_id, assignee.id, "opened the case")
        .await
        .unwrap();
    shop.repair_service
        .append_note(repair_id, assignee.id, "found corrosion near the fan")
        .await
        .unwrap();

    let thread = shop.repair_service.notes_for_repair(repair_id).await.unwrap();
    assert_eq!(thread.len(), 2);
    assert_eq!(thread[0].message, "opened the case");
    assert_eq!(thread[1].message, "found corrosion near the fan");
}

// =============================================================================
// Claiming and Assignment
// =============================================================================

#[tokio::test]
async fn claim_is_first_come_first_served() {
    let tech_a = staff("Rae", UserRole::Technician);
    let tech_b = staff("Tudor", UserRole::Technician);
    let order = unassigned_order();
    let order_id = order.id;

    let shop = workshop(vec![tech_a.clone(), tech_b.clone()], vec![order], vec![]);

    let won = shop
        .assignments
        .claim(order_id, &tech_a.as_actor())
        .await
        .unwrap();
    assert_eq!(won.assigned_user_id, Some(tech_a.id));
    assert_eq!(won.technician_name.as_deref(), Some("Rae"));

    let lost = shop.assignments.claim(order_id, &tech_b.as_actor()).await;
    assert!(matches!(lost, Err(AppError::Conflict(_))));

    // Re-claiming your own order is not a conflict
    assert!(shop
        .assignments
        .claim(order_id, &tech_a.as_actor())
        .await
        .is_ok());
}

#[tokio::test]
async fn assign_is_admin_only_and_validates_the_target() {
    let admin = staff("Ana", UserRole::Admin);
    let tech_a = staff("Rae", UserRole::Technician);
    let tech_b = staff("Tudor", UserRole::Technician);
    let order = unassigned_order();
    let order_id = order.id;

    let shop = workshop(
        vec![admin.clone(), tech_a.clone(), tech_b.clone()],
        vec![order],
        vec![],
    );

    let denied = shop
        .assignments
        .assign(order_id, &tech_a.as_actor(), tech_b.id)
        .await;
    assert!(matches!(denied, Err(AppError::Forbidden)));

    let bad_target = shop
        .assignments
        .assign(order_id, &admin.as_actor(), Uuid::new_v4())
        .await;
    assert!(matches!(bad_target, Err(AppError::InvalidTarget)));

    let assigned = shop
        .assignments
        .assign(order_id, &admin.as_actor(), tech_a.id)
        .await
        .unwrap();
    assert_eq!(assigned.assigned_user_id, Some(tech_a.id));
    assert_eq!(assigned.technician_name.as_deref(), Some("Rae"));

    // Admins may reassign an order that is already held
    let reassigned = shop
        .assignments
        .assign(order_id, &admin.as_actor(), tech_b.id)
        .await
        .unwrap();
    assert_eq!(reassigned.assigned_user_id, Some(tech_b.id));
    assert_eq!(reassigned.technician_name.as_deref(), Some("Tudor"));
}

// =============================================================================
// Inbox Scoping
// =============================================================================

#[tokio::test]
async fn inbox_operations_only_touch_the_callers_rows() {
    let author = staff("Rae", UserRole::Technician);
    let admin_a = staff("Ana", UserRole::Admin);
    let admin_b = staff("Mihai", UserRole::Admin);
    let order = order_assigned_to(&author);
    let repair = repair_on(&order, Some(author.id));
    let repair_id = repair.id;

    let shop = workshop(
        vec![author.clone(), admin_a.clone(), admin_b.clone()],
        vec![order],
        vec![repair],
    );

    shop.repair_service
        .append_note(repair_id, author.id, "waiting on parts")
        .await
        .unwrap();

    let target = shop.notifier.inbox(admin_a.id).await.unwrap()[0].clone();

    // Another recipient cannot touch someone else's row
    shop.notifier.mark_read(target.id, admin_b.id).await.unwrap();
    shop.notifier.delete(target.id, admin_b.id).await.unwrap();

    let inbox = shop.notifier.inbox(admin_a.id).await.unwrap();
    assert_eq!(inbox.len(), 1);
    assert!(!inbox[0].read);

    // The owner can
    shop.notifier.mark_read(target.id, admin_a.id).await.unwrap();
    assert!(shop.notifier.inbox(admin_a.id).await.unwrap()[0].read);
    shop.notifier.delete(target.id, admin_a.id).await.unwrap();
    assert!(shop.notifier.inbox(admin_a.id).await.unwrap().is_empty());
}

#[tokio::test]
async fn acking_a_missing_notification_is_not_an_error() {
    let shop = workshop(vec![], vec![], vec![]);

    assert!(shop
        .notifier
        .mark_read(Uuid::new_v4(), Uuid::new_v4())
        .await
        .is_ok());
    assert!(shop
        .notifier
        .delete(Uuid::new_v4(), Uuid::new_v4())
        .await
        .is_ok());
}

// =============================================================================
// Workshop View
// =============================================================================

#[tokio::test]
async fn first_workshop_access_creates_the_repair_record() {
    let tech = staff("Rae", UserRole::Technician);
    let order = order_assigned_to(&tech);
    let order_id = order.id;

    let shop = workshop(vec![tech.clone()], vec![order], vec![]);

    let detail = shop.repair_service.repair_for_order(order_id).await.unwrap();
    assert_eq!(detail.record.work_order_id, order_id);
    assert_eq!(detail.record.assigned_technician_id, Some(tech.id));
    assert_eq!(detail.record.status, OrderStatus::InProgress);

    // Second access reuses the same record
    let again = shop.repair_service.repair_for_order(order_id).await.unwrap();
    assert_eq!(again.record.id, detail.record.id);
}

#[tokio::test]
async fn saving_a_repair_replaces_the_item_list() {
    let tech = staff("Rae", UserRole::Technician);
    let order = order_assigned_to(&tech);
    let repair = repair_on(&order, Some(tech.id));
    let repair_id = repair.id;

    let shop = workshop(vec![tech.clone()], vec![order], vec![repair]);

    let first = SaveRepair {
        status: OrderStatus::AwaitingParts,
        diagnostic: "dead backlight fuse".to_string(),
        notes: "fuse on order".to_string(),
        items: vec![NewRepairItem {
            kind: ItemKind::Part,
            label: "backlight fuse".to_string(),
            qty: 1,
            unit_price: 4.5,
        }],
    };
    let detail = shop
        .repair_service
        .save_repair(repair_id, &tech.as_actor(), first)
        .await
        .unwrap();
    assert_eq!(detail.record.status, OrderStatus::AwaitingParts);
    assert_eq!(detail.items.len(), 1);

    let second = SaveRepair {
        status: OrderStatus::Completed,
        diagnostic: "dead backlight fuse".to_string(),
        notes: String::new(),
        items: vec![
            NewRepairItem {
                kind: ItemKind::Part,
                label: "backlight fuse".to_string(),
                qty: 1,
                unit_price: 4.5,
            },
            NewRepairItem {
                kind: ItemKind::Labor,
                label: "fuse replacement".to_string(),
                qty: 1,
                unit_price: 35.0,
            },
        ],
    };
    let detail = shop
        .repair_service
        .save_repair(repair_id, &tech.as_actor(), second)
        .await
        .unwrap();
    assert_eq!(detail.record.status, OrderStatus::Completed);
    assert_eq!(detail.items.len(), 2);
}

// =============================================================================
// Intake and Public Tracking
// =============================================================================

#[tokio::test]
async fn intake_then_public_tracking() {
    let shop = workshop(vec![], vec![], vec![]);

    let order = shop
        .work_orders
        .intake(CreateWorkOrder {
            client_id: Uuid::new_v4(),
            device_type: "phone".to_string(),
            brand: "Samsung".to_string(),
            model: "Galaxy S22".to_string(),
            serial_number: "SN-777".to_string(),
            problem: "cracked screen".to_string(),
            accessories: String::new(),
            description: String::new(),
            price: 180.0,
            warranty: Some("90 days".to_string()),
        })
        .await
        .unwrap();

    assert_eq!(order.form_code.len(), repairdesk::config::FORM_CODE_LENGTH);
    assert_eq!(
        order.public_token.len(),
        repairdesk::config::PUBLIC_TOKEN_LENGTH
    );
    assert_eq!(order.status, OrderStatus::Received);
    assert!(order.assigned_user_id.is_none());

    let tracked = shop.work_orders.track(&order.public_token).await.unwrap();
    assert_eq!(tracked.id, order.id);

    let missing = shop.work_orders.track("not-a-real-token").await;
    assert!(matches!(missing, Err(AppError::NotFound)));
}
