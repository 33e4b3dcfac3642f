use sea_orm::entity::prelude::*;

use crate::password::verify_password;

/// An account that can submit records and mark attendance.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    /// Free-form role label such as "admin" or "teacher".
    pub kind: Option<String>,
    #[sea_orm(unique)]
    pub username: String,
    #[sea_orm(unique)]
    pub email: String,
    /// Argon2 PHC string. Never the clear-text password.
    pub password: String,
    pub updated_at: DateTime,
}

// Departments, courses, students and attendance logs all point back here
// through `submitted_by_id` (and `marked_by_id`); the relations are declared
// on the referencing side.
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Checks a clear-text candidate against the stored hash.
    pub fn check_password(&self, candidate: &str) -> bool {
        verify_password(candidate, &self.password)
    }
}
