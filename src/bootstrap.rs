use anyhow::Result;
use migration::{Migrator, MigratorTrait};
use model::entities::user;
use model::password::{DEFAULT_PASSWORD_LENGTH, HashedPassword, generate_password};
use rand::rngs::OsRng;
use rand::{CryptoRng, RngCore};
use sea_orm::DatabaseConnection;
use store::{NewUser, Repository, StoreError, UserStore};
use tracing::{debug, error, info, trace, warn};

/// The reserved account ensured at startup.
#[derive(Debug, Clone)]
pub struct AdminSeed {
    pub username: String,
    pub email: String,
    pub password_length: usize,
}

impl AdminSeed {
    pub fn new(username: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            email: email.into(),
            password_length: DEFAULT_PASSWORD_LENGTH,
        }
    }
}

#[derive(Debug)]
pub enum BootstrapOutcome {
    /// The account was missing and has been created with `password`.
    Created { user: user::Model, password: String },
    /// The account already existed and was left untouched.
    AlreadyPresent { user: user::Model },
}

/// Creates the reserved account unless one with the same username exists.
///
/// The generated clear-text password is logged exactly once, here, and only
/// its hash is stored.
pub async fn ensure_admin<R: RngCore + CryptoRng>(
    users: &UserStore,
    seed: &AdminSeed,
    rng: &mut R,
) -> Result<BootstrapOutcome, StoreError> {
    trace!("Checking for reserved user '{}'", seed.username);
    if let Some(existing) = users.find_by_username(&seed.username).await? {
        debug!("Reserved user '{}' already exists (id {})", seed.username, existing.id);
        return Ok(BootstrapOutcome::AlreadyPresent { user: existing });
    }

    let password = generate_password(rng, seed.password_length);
    let hashed = HashedPassword::hash(rng, &password)?;

    let new = NewUser {
        kind: Some("admin".to_string()),
        username: seed.username.clone(),
        email: seed.email.clone(),
        password: hashed,
    };
    let created = match users.create(new).await {
        Ok(created) => created,
        // The username is free, so the clash is on the email column
        Err(StoreError::Conflict(detail)) => {
            warn!(
                "Email {} is already used by another user; set ADMIN_EMAIL to a free address",
                seed.email
            );
            return Err(StoreError::Conflict(format!(
                "cannot create reserved user '{}': email {} is taken, set ADMIN_EMAIL ({})",
                seed.username, seed.email, detail
            )));
        }
        Err(e) => return Err(e),
    };

    info!(
        "Initial user \"{}\" created with password: {}",
        created.username, password
    );
    Ok(BootstrapOutcome::Created {
        user: created,
        password,
    })
}

/// Brings the schema up to date and seeds the reserved account.
pub async fn prepare_database(db: &DatabaseConnection, seed: &AdminSeed) -> Result<BootstrapOutcome> {
    info!("Running database migrations");
    match Migrator::up(db, None).await {
        Ok(_) => {
            info!("Database migrations completed successfully");
        }
        Err(e) => {
            error!("Failed to run database migrations: {}", e);
            return Err(e.into());
        }
    }

    let users = UserStore::new(db.clone());
    match ensure_admin(&users, seed, &mut OsRng).await {
        Ok(outcome) => Ok(outcome),
        Err(e) => {
            error!("Failed to seed reserved user '{}': {}", seed.username, e);
            Err(e.into())
        }
    }
}
