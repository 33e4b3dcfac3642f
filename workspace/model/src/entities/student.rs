use sea_orm::entity::prelude::*;

use super::{attendance_log, department, user};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "students")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub full_name: String,
    pub department_id: Option<i32>,
    /// Class-section label, matching `courses.class_name`.
    pub class_name: Option<String>,
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
