//! NFC card assignment.

use hallpass_core::error::CoreError;
use hallpass_core::types::DbId;
use hallpass_core::validation::require_present;
use hallpass_db::models::student::{Student, StudentCard};

use super::AttendanceService;
use crate::error::{AppError, AppResult};

impl AttendanceService {
    /// Give a student a card UID.
    ///
    /// Fails with a conflict naming the holder when another student already
    /// has the UID. Re-assigning a student's own UID succeeds. Two concurrent
    /// assignments of the same UID can both pass the check; the store's unique
    /// index rejects the loser, which gets the same conflict.
    pub async fn assign_card(&self, student_id: DbId, card_uid: Option<&str>) -> AppResult<StudentCard> {
        let card_uid = require_present("card_uid", card_uid)?;

        if self.store.find_student(student_id).await?.is_none() {
            return Err(CoreError::NotFound {
                entity: "Student",
                id: student_id,
            }
            .into());
        }

        if let Some(holder) = self.store.find_card_holder(card_uid, student_id).await? {
            return Err(card_in_use(student_id, card_uid, Some(&holder)));
        }

        let assigned = match self.store.assign_card(student_id, card_uid).await {
            Ok(assigned) => assigned,
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
                let holder = self.store.find_card_holder(card_uid, student_id).await?;
                return Err(card_in_use(student_id, card_uid, holder.as_ref()));
            }
            Err(e) => return Err(e.into()),
        };
        let student = assigned.ok_or(CoreError::NotFound {
            entity: "Student",
            id: student_id,
        })?;

        tracing::info!(student_id, "Card assigned");
        Ok(StudentCard::from(student))
    }
}

fn card_in_use(student_id: DbId, card_uid: &str, holder: Option<&Student>) -> AppError {
    tracing::warn!(
        student_id,
        holder_id = ?holder.map(|h| h.id),
        "Card assignment rejected, UID already in use"
    );
    let message = match holder {
        Some(holder) => format!(
            "Card UID '{card_uid}' is already assigned to student {} ({})",
            holder.id, holder.full_name
        ),
        None => format!("Card UID '{card_uid}' is already assigned to another student"),
    };
    CoreError::Conflict(message).into()
}
