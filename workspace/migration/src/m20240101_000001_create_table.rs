use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create users table
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(pk_auto(Users::Id))
                    .col(string_len_null(Users::Kind, 255))
                    .col(string_len(Users::Username, 100).unique_key())
                    .col(string_len(Users::Email, 255).unique_key())
                    .col(string_len(Users::Password, 255))
                    .col(date_time(Users::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        // Create departments table
        manager
            .create_table(
                Table::create()
                    .table(Departments::Table)
                    .if_not_exists()
                    .col(pk_auto(Departments::Id))
                    .col(string_len(Departments::Name, 255))
                    .col(date_time(Departments::UpdatedAt))
                    .col(integer_null(Departments::SubmittedById))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_department_submitted_by")
                            .from(Departments::Table, Departments::SubmittedById)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Create courses table
        manager
            .create_table(
                Table::create()
                    .table(Courses::Table)
                    .if_not_exists()
                    .col(pk_auto(Courses::Id))
                    .col(string_len(Courses::Name, 255))
                    .col(integer_null(Courses::Semester))
                    .col(string_len_null(Courses::ClassName, 50))
                    .col(integer_null(Courses::LectureHours))
                    .col(integer_null(Courses::DepartmentId))
                    .col(date_time(Courses::UpdatedAt))
                    .col(integer_null(Courses::SubmittedById))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_course_department")
                            .from(Courses::Table, Courses::DepartmentId)
                            .to(Departments::Table, Departments::Id)
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_course_submitted_by")
                            .from(Courses::Table, Courses::SubmittedById)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Create students table
        manager
            .create_table(
                Table::create()
                    .table(Students::Table)
                    .if_not_exists()
                    .col(pk_auto(Students::Id))
                    .col(string_len(Students::FullName, 255))
                    .col(integer_null(Students::DepartmentId))
                    .col(string_len_null(Students::ClassName, 50))
                    .col(date_time(Students::UpdatedAt))
                    .col(integer_null(Students::SubmittedById))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_student_department")
                            .from(Students::Table, Students::DepartmentId)
                            .to(Departments::Table, Departments::Id)
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_student_submitted_by")
                            .from(Students::Table, Students::SubmittedById)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Create attendance_logs table
        manager
            .create_table(
                Table::create()
                    .table(AttendanceLogs::Table)
                    .if_not_exists()
                    .col(pk_auto(AttendanceLogs::Id))
                    .col(date(AttendanceLogs::Date))
                    .col(integer(AttendanceLogs::StudentId))
                    .col(integer_null(AttendanceLogs::CourseId))
                    .col(boolean(AttendanceLogs::Present))
                    .col(date_time(AttendanceLogs::UpdatedAt))
                    .col(integer_null(AttendanceLogs::MarkedById))
                    .col(integer_null(AttendanceLogs::SubmittedById))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_attendance_log_student")
                            .from(AttendanceLogs::Table, AttendanceLogs::StudentId)
                            .to(Students::Table, Students::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_attendance_log_course")
                            .from(AttendanceLogs::Table, AttendanceLogs::CourseId)
                            .to(Courses::Table, Courses::Id)
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_attendance_log_marked_by")
                            .from(AttendanceLogs::Table, AttendanceLogs::MarkedById)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_attendance_log_submitted_by")
                            .from(AttendanceLogs::Table, AttendanceLogs::SubmittedById)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_attendance_log_student_date")
                    .table(AttendanceLogs::Table)
                    .col(AttendanceLogs::StudentId)
                    .col(AttendanceLogs::Date)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(AttendanceLogs::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Students::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Courses::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Departments::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await?;

        Ok(())
    }
}

// Define identifiers for all tables

#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
    Kind,
    Username,
    Email,
    Password,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Departments {
    Table,
    Id,
    Name,
    UpdatedAt,
    SubmittedById,
}

#[derive(DeriveIden)]
enum Courses {
    Table,
    Id,
    Name,
    Semester,
    ClassName,
    LectureHours,
    DepartmentId,
    UpdatedAt,
    SubmittedById,
}

#[derive(DeriveIden)]
enum Students {
    Table,
    Id,
    FullName,
    DepartmentId,
    ClassName,
    UpdatedAt,
    SubmittedById,
}

#[derive(DeriveIden)]
enum AttendanceLogs {
    Table,
    Id,
    Date,
    StudentId,
    CourseId,
    Present,
    UpdatedAt,
    MarkedById,
    SubmittedById,
}
