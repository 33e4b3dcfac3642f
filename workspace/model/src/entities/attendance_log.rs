use sea_orm::entity::prelude::*;

use super::{course, student, user};

/// A single presence observation for one student on one date.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "attendance_logs")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    /// Calendar date the observation applies to.
    pub date: Date,
    pub student_id: i32,
    pub course_id: Option<i32>,
    pub present: bool,
    pub updated_at: DateTime,
    /// The user who took the attendance.
    pub marked_by_id: Option<i32>,
    /// The user who entered the record.
    pub submitted_by_id: Option<i32>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "student::Entity",
        from = "Column::StudentId",
        to = "student::Column::Id",
        on_delete = "Cascade"
    )]
    Student,
    #[sea_orm(
        belongs_to = "course::Entity",
        from = "Column::CourseId",
        to = "course::Column::Id",
        on_delete = "SetNull"
    )]
    Course,
    #[sea_orm(
        belongs_to = "user::Entity",
        from = "Column::MarkedById",
        to = "user::Column::Id",
        on_delete = "SetNull"
    )]
    MarkedBy,
    #[sea_orm(
        belongs_to = "user::Entity",
        from = "Column::SubmittedById",
        to = "user::Column::Id",
        on_delete = "SetNull"
    )]
    SubmittedBy,
}

impl Related<student::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Student.def()
    }
}

impl Related<course::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Course.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
