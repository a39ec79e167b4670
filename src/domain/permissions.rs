//! Ticket permission rules.
//!
//! Pure functions over the actor's role and the order's assignment
//! state. Callers decide what to do with a denial; nothing here
//! touches storage.

use uuid::Uuid;

use super::user::UserRole;

/// Whether the actor may edit the ticket (status, diagnosis, items).
///
/// Admins may always edit. Everyone else must be the assigned user.
/// An unassigned ticket is editable by admins only.
pub fn can_edit_ticket(role: UserRole, actor_id: Uuid, assigned_user_id: Option<Uuid>) -> bool {
    role.is_admin() || assigned_user_id == Some(actor_id)
}

/// Whether the actor may write a note on the ticket.
///
/// Wider than editing: while a ticket is unassigned anyone may leave a
/// note. Once assigned, notes are limited to admins and the assignee.
pub fn can_write_note(role: UserRole, actor_id: Uuid, assigned_user_id: Option<Uuid>) -> bool {
    role.is_admin() || assigned_user_id.is_none() || assigned_user_id == Some(actor_id)
}
