//! Data-access layer over the SeaORM entities.
//!
//! Every entity has a store implementing [`Repository`]. The stores own a
//! cloned [`sea_orm::DatabaseConnection`] (a pool handle) and are meant to be
//! constructed once at startup and shared behind `Arc`.

pub mod attendance;
pub mod course;
pub mod department;
pub mod error;
pub mod repository;
pub mod student;
pub mod user;

pub use attendance::{AttendanceChanges, AttendanceStore, NewAttendance};
pub use course::{CourseChanges, CourseStore, NewCourse};
pub use department::{DepartmentChanges, DepartmentStore, NewDepartment};
pub use error::{Result, StoreError};
pub use repository::Repository;
pub use student::{NewStudent, StudentChanges, StudentStore};
pub use user::{NewUser, UserChanges, UserStore};
