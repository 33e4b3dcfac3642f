use sea_orm::entity::prelude::*;

use super::{course, student, user};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "departments")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub updated_at: DateTime,
    pub submitted_by_id: Option<i32>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "user::Entity",
        from = "Column::SubmittedById",
        to = "user::Column::Id",
        on_delete = "SetNull"
    )]
    SubmittedBy,
    #[sea_orm(has_many = "student::Entity")]
    Student,
    #[sea_orm(has_many = "course::Entity")]
    Course,
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
