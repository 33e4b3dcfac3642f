use sea_orm::entity::prelude::*;

use super::{attendance_log, department, user};

/// A course taught in a department, e.g. "Data Structures", semester 1, class "cs103".
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "courses")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub semester: Option<i32>,
    /// Class-section label the course is taught to.
    pub class_name: Option<String>,
    /// Number of lecture hours.
    pub lecture_hours: Option<i32>,
    pub department_id: Option<i32>,
    pub updated_at: DateTime,
    pub submitted_by_id: Option<i32>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "department::Entity",
        from = "Column::DepartmentId",
        to = "department::Column::Id",
        on_delete = "SetNull"
    )]
    Department,
    #[sea_orm(
        belongs_to = "user::Entity",
        from = "Column::SubmittedById",
        to = "user::Column::Id",
        on_delete = "SetNull"
    )]
    SubmittedBy,
    #[sea_orm(has_many = "attendance_log::Entity")]
    AttendanceLog,
}

impl Related<department::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Department.def()
    }
}

impl Related<attendance_log::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AttendanceLog.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
