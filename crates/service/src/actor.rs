use uuid::Uuid;

/// Authenticated caller of a mutating operation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Actor {
    pub id: Uuid,
    pub admin: bool,
}

impl Actor {
    pub fn new(id: Uuid, role: &str) -> Self { Self { id, admin: role == models::user::ROLE_ADMIN } }

    /// Owners and admins may edit a record.
    pub fn can_edit(&self, owner_id: Uuid) -> bool { self.admin || self.id == owner_id }
}
