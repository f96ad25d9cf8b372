//! Key assignment service.
//!
//! Scopes every operation to a `(user, key_number)` pair, enforces the
//! fixed 1..=5 slot range, and resolves display fields at read time.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::db::Database;
use crate::media::{MediaFile, MediaRepository};
use crate::{MediadeckError, Result};

use super::registry::{
    validate_key_number, AssignmentChanges, AssignmentRepository, KeyAssignment, KEY_MAX, KEY_MIN,
};

/// Whether an assign call created a new slot binding or replaced one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssignStatus {
    Created,
    Updated,
}

/// An assignment joined with its referenced file.
#[derive(Debug, Clone)]
pub struct ResolvedAssignment {
    pub assignment: KeyAssignment,
    pub file: MediaFile,
}

impl ResolvedAssignment {
    /// Display title: custom override, else the file's title, else "Untitled".
    ///
    /// Computed at read time, never persisted.
    pub fn display_title(&self) -> String {
        self.assignment
            .custom_title
            .as_deref()
            .filter(|t| !t.is_empty())
            .or_else(|| self.file.title.as_deref().filter(|t| !t.is_empty()))
            .unwrap_or("Untitled")
            .to_string()
    }

    /// Display description: custom override, else the file's description,
    /// else empty.
    pub fn display_description(&self) -> String {
        self.assignment
            .custom_description
            .as_deref()
            .filter(|d| !d.is_empty())
            .or_else(|| self.file.description.as_deref().filter(|d| !d.is_empty()))
            .unwrap_or("")
            .to_string()
    }
}

/// Key assignment service.
pub struct AssignmentService {
    db: Arc<Database>,
}

impl AssignmentService {
    /// Create a new AssignmentService.
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    /// Assign a file to a key slot, replacing any existing binding in
    /// place.
    ///
    /// Fails when the file is unknown or belongs to a different user.
    pub async fn assign(
        &self,
        user_id: i64,
        file_id: i64,
        key_number: i64,
        custom_title: Option<&str>,
        custom_description: Option<&str>,
    ) -> Result<(ResolvedAssignment, AssignStatus)> {
        validate_key_number(key_number)?;

        let file = MediaRepository::new(self.db.pool())
            .get_by_id(file_id)
            .await?
            .ok_or_else(|| MediadeckError::NotFound("file".to_string()))?;

        if file.user_id != user_id {
            return Err(MediadeckError::Forbidden(
                "file belongs to another user".to_string(),
            ));
        }

        let title = custom_title.filter(|t| !t.is_empty());
        let description = custom_description.filter(|d| !d.is_empty());

        let (assignment, created) = AssignmentRepository::new(self.db.pool())
            .assign(user_id, file_id, key_number, title, description)
            .await?;

        let status = if created {
            AssignStatus::Created
        } else {
            AssignStatus::Updated
        };

        Ok((ResolvedAssignment { assignment, file }, status))
    }

    /// Get a dense map over every key slot.
    ///
    /// Each of 1..=5 is present, vacant slots mapped to None.
    pub async fn get_all(&self, user_id: i64) -> Result<BTreeMap<i64, Option<ResolvedAssignment>>> {
        let assignments = AssignmentRepository::new(self.db.pool())
            .list_by_user(user_id)
            .await?;

        let mut slots: BTreeMap<i64, Option<ResolvedAssignment>> =
            (KEY_MIN..=KEY_MAX).map(|k| (k, None)).collect();

        for assignment in assignments {
            let key_number = assignment.key_number;
            if let Some(resolved) = self.resolve(assignment).await? {
                slots.insert(key_number, Some(resolved));
            }
        }

        Ok(slots)
    }

    /// Get the assignment occupying one slot, if any.
    pub async fn get_one(
        &self,
        user_id: i64,
        key_number: i64,
    ) -> Result<Option<ResolvedAssignment>> {
        validate_key_number(key_number)?;

        match AssignmentRepository::new(self.db.pool())
            .get(user_id, key_number)
            .await?
        {
            Some(assignment) => self.resolve(assignment).await,
            None => Ok(None),
        }
    }

    /// Remove the assignment from a slot.
    ///
    /// A vacant slot is not an error; returns whether a binding was
    /// actually removed.
    pub async fn unassign(&self, user_id: i64, key_number: i64) -> Result<bool> {
        validate_key_number(key_number)?;

        AssignmentRepository::new(self.db.pool())
            .delete(user_id, key_number)
            .await
    }

    /// Update an occupied slot's display overrides.
    pub async fn update(
        &self,
        user_id: i64,
        key_number: i64,
        changes: &AssignmentChanges,
    ) -> Result<ResolvedAssignment> {
        validate_key_number(key_number)?;

        let assignment = AssignmentRepository::new(self.db.pool())
            .update(user_id, key_number, changes)
            .await?
            .ok_or_else(|| MediadeckError::NotFound("assignment".to_string()))?;

        self.resolve(assignment)
            .await?
            .ok_or_else(|| MediadeckError::NotFound("file".to_string()))
    }

    /// Clear every assignment for a user, returning the count removed.
    /// Zero is a success, not an error.
    pub async fn clear_all(&self, user_id: i64) -> Result<u64> {
        AssignmentRepository::new(self.db.pool())
            .delete_all(user_id)
            .await
    }

    /// Join an assignment with its referenced file.
    ///
    /// The foreign key makes a dangling reference impossible under
    /// normal operation; one is reported as a vacant slot.
    async fn resolve(&self, assignment: KeyAssignment) -> Result<Option<ResolvedAssignment>> {
        let file = MediaRepository::new(self.db.pool())
            .get_by_id(assignment.file_id)
            .await?;

        Ok(file.map(|file| ResolvedAssignment { assignment, file }))
    }
}
