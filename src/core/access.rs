//! Who may do what in the portal.
//!
//! Admins manage every ledger and announcement. Priests only read their own
//! records and the announcements addressed to them.

/// Portal roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Admin,
    Priest,
}

/// The signed-in user, as far as the core logic needs to know.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Actor {
    pub role: Role,
    /// Linked priest row; set for priests, usually `None` for admins
    pub subject_id: Option<i64>,
}

impl Actor {
    #[must_use]
    pub const fn admin() -> Self {
        Self {
            role: Role::Admin,
            subject_id: None,
        }
    }

    #[must_use]
    pub const fn priest(priest_id: i64) -> Self {
        Self {
            role: Role::Priest,
            subject_id: Some(priest_id),
        }
    }

    /// Whether this actor may create, edit or delete records and announcements.
    #[must_use]
    pub const fn can_manage(&self) -> bool {
        matches!(self.role, Role::Admin)
    }

    /// Whether this actor may read records about priest `priest_id`.
    #[must_use]
    pub fn can_view_subject(&self, priest_id: i64) -> bool {
        match self.role {
            Role::Admin => true,
            Role::Priest => self.subject_id == Some(priest_id),
        }
    }
}
