//! Note notification routing rules.
//!
//! Decides, from the author and the repair's assignment state, which
//! users should hear about a new note. Pure: rosters are passed in,
//! delivery is the caller's job.

use uuid::Uuid;

use super::user::UserRole;

/// Compute the recipients for a note-added notification.
///
/// Four cases, by assignment state and author:
/// - unassigned repair: every technician and every admin
/// - author is the assignee: every admin
/// - author is an admin, someone else assigned: just the assignee
/// - anyone else on an assigned repair: the assignee and every admin
///
/// The author is never a recipient and duplicates are dropped. Order
/// is deterministic: the assignee (or technician roster) first, then
/// admins in roster order.
pub fn note_recipients(
    author_id: Uuid,
    author_role: UserRole,
    assigned_technician_id: Option<Uuid>,
    technician_ids: &[Uuid],
    admin_ids: &[Uuid],
) -> Vec<Uuid> {
    let mut recipients = Vec::new();

    match assigned_technician_id {
        None => {
            for &id in technician_ids {
                push_unique(&mut recipients, author_id, id);
            }
            for &id in admin_ids {
                push_unique(&mut recipients, author_id, id);
            }
        }
        Some(assignee) if assignee == author_id => {
            for &id in admin_ids {
                push_unique(&mut recipients, author_id, id);
            }
        }
        Some(assignee) if author_role.is_admin() => {
            push_unique(&mut recipients, author_id, assignee);
        }
        Some(assignee) => {
            push_unique(&mut recipients, author_id, assignee);
            for &id in admin_ids {
                push_unique(&mut recipients, author_id, id);
            }
        }
    }

    recipients
}

fn push_unique(recipients: &mut Vec<Uuid>, author_id: Uuid, id: Uuid) {
    if id != author_id && !recipients.contains(&id) {
        recipients.push(id);
    }
}
