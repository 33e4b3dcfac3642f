//! SeaORM entities for the attendance schema.
//!
//! Five tables: users, departments, courses, students and attendance logs.
//! Every row except users carries a `submitted_by_id` pointing at the user
//! that entered it.

pub mod attendance_log;
pub mod course;
pub mod department;
pub mod student;
pub mod user;

pub mod prelude {
    //! A prelude module for easy importing of all entities.
    pub use super::attendance_log::Entity as AttendanceLog;
    pub use super::course::Entity as Course;
    pub use super::department::Entity as Department;
    pub use super::student::Entity as Student;
    pub use super::user::Entity as User;
}

#[cfg(test)]
mod test {
    use chrono::{NaiveDate, Utc};
    use migration::{Migrator, MigratorTrait};
    use sea_orm::{
        ActiveModelTrait, ColumnTrait, Database, DatabaseConnection, DbErr, EntityTrait,
        ModelTrait, QueryFilter, Set,
    };

    use super::*;
    use prelude::*;

    async fn setup_db() -> Result<DatabaseConnection, DbErr> {
        let db = Database::connect("sqlite::memory:").await?;
        Migrator::up(&db, None).await.expect("Migrations failed.");
        Ok(db)
    }

    #[tokio::test]
    async fn test_entity_integration() -> Result<(), DbErr> {
        let db = setup_db().await?;
        let now = Utc::now().naive_utc();

        let teacher = user::ActiveModel {
            kind: Set(Some("teacher".to_string())),
            username: Set("teacher1".to_string()),
            email: Set("teacher1@example.com".to_string()),
            password: Set("not-a-real-hash".to_string()),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&db)
        .await?;

        let cs = department::ActiveModel {
            name: Set("Computer Science".to_string()),
            updated_at: Set(now),
            submitted_by_id: Set(Some(teacher.id)),
            ..Default::default()
        }
        .insert(&db)
        .await?;

        let course = course::ActiveModel {
            name: Set("Data Structures".to_string()),
            semester: Set(Some(1)),
            class_name: Set(Some("cs103".to_string())),
            lecture_hours: Set(Some(42)),
            department_id: Set(Some(cs.id)),
            updated_at: Set(now),
            submitted_by_id: Set(Some(teacher.id)),
            ..Default::default()
        }
        .insert(&db)
        .await?;

        let alice = student::ActiveModel {
            full_name: Set("Alice Example".to_string()),
            department_id: Set(Some(cs.id)),
            class_name: Set(Some("cs103".to_string())),
            updated_at: Set(now),
            submitted_by_id: Set(Some(teacher.id)),
            ..Default::default()
        }
        .insert(&db)
        .await?;

        let day = NaiveDate::from_ymd_opt(2024, 3, 4).unwrap();
        for (offset, present) in [(0, true), (1, false)] {
            attendance_log::ActiveModel {
                date: Set(day + chrono::Days::new(offset)),
                student_id: Set(alice.id),
                course_id: Set(Some(course.id)),
                present: Set(present),
                updated_at: Set(now),
                marked_by_id: Set(Some(teacher.id)),
                submitted_by_id: Set(Some(teacher.id)),
                ..Default::default()
            }
            .insert(&db)
            .await?;
        }

        // Department -> students
        let students = cs.find_related(Student).all(&db).await?;
        assert_eq!(students.len(), 1);
        assert_eq!(students[0].full_name, "Alice Example");

        // Department -> courses
        let courses = cs.find_related(Course).all(&db).await?;
        assert_eq!(courses.len(), 1);
        assert_eq!(courses[0].class_name.as_deref(), Some("cs103"));

        // Student -> attendance logs
        let logs = alice.find_related(AttendanceLog).all(&db).await?;
        assert_eq!(logs.len(), 2);
        assert_eq!(logs.iter().filter(|log| log.present).count(), 1);

        // Attendance log -> course
        let absent = AttendanceLog::find()
            .filter(attendance_log::Column::Present.eq(false))
            .one(&db)
            .await?
            .expect("absent record");
        let absent_course = absent.find_related(Course).one(&db).await?;
        assert_eq!(absent_course.map(|c| c.id), Some(course.id));

        Ok(())
    }

    #[tokio::test]
    async fn test_username_is_unique() -> Result<(), DbErr> {
        let db = setup_db().await?;
        let now = Utc::now().naive_utc();

        let first = user::ActiveModel {
            username: Set("dup".to_string()),
            email: Set("first@example.com".to_string()),
            password: Set("hash".to_string()),
            updated_at: Set(now),
            ..Default::default()
        };
        first.insert(&db).await?;

        let second = user::ActiveModel {
            username: Set("dup".to_string()),
            email: Set("second@example.com".to_string()),
            password: Set("hash".to_string()),
            updated_at: Set(now),
            ..Default::default()
        };
        assert!(second.insert(&db).await.is_err());
        assert_eq!(User::find().all(&db).await?.len(), 1);

        Ok(())
    }
}
