use async_trait::async_trait;

use crate::domain::user::errors::UserError;
use crate::domain::user::models::Cpf;
use crate::domain::user::models::CreateUserCommand;
use crate::domain::user::models::UpdateUserCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;

/// Port for user domain service operations.
#[async_trait]
pub trait UserServicePort: Send + Sync + 'static {
    /// Register a new user with a hashed password and a fresh, active
    /// lifecycle.
    ///
    /// # Errors
    /// * `CpfAlreadyExists` - CPF is already registered
    /// * `EmailAlreadyExists` - Email is already registered
    /// * `PasswordHash` - Password hashing failed
    /// * `Store` - Database operation failed
    async fn register(&self, command: CreateUserCommand) -> Result<User, UserError>;

    /// Retrieve a user by unique identifier. Soft-deleted users are
    /// never returned.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist or is soft-deleted
    /// * `Store` - Database operation failed
    async fn get_user(&self, id: &UserId) -> Result<User, UserError>;

    /// Retrieve a user by their CPF. Soft-deleted users are never
    /// returned.
    ///
    /// # Errors
    /// * `NotFoundByCpf` - No live user with this CPF
    /// * `Store` - Database operation failed
    async fn get_user_by_cpf(&self, cpf: &Cpf) -> Result<User, UserError>;

    /// List every live (not soft-deleted) user.
    ///
    /// # Errors
    /// * `Store` - Database operation failed
    async fn list_users(&self) -> Result<Vec<User>, UserError>;

    /// Partially update an existing user. A provided password is
    /// re-hashed; `last_modified` is bumped.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist or is soft-deleted
    /// * `CpfAlreadyExists` - New CPF is already registered
    /// * `EmailAlreadyExists` - New email is already registered
    /// * `Store` - Database operation failed
    async fn update_user(&self, id: &UserId, command: UpdateUserCommand)
        -> Result<User, UserError>;

    /// Soft-delete a user: the record stays in storage but disappears
    /// from every lookup.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist or is already soft-deleted
    /// * `Store` - Database operation failed
    async fn delete_user(&self, id: &UserId) -> Result<(), UserError>;
}

/// Persistence operations for the user aggregate.
///
/// Every read excludes soft-deleted rows; the store enforces the
/// soft-delete visibility invariant so callers cannot forget it.
#[async_trait]
pub trait UserRepository: Send + Sync + 'static {
    /// Persist a new user.
    ///
    /// # Errors
    /// * `CpfAlreadyExists` - CPF unique constraint violated
    /// * `EmailAlreadyExists` - Email unique constraint violated
    /// * `Store` - Database operation failed
    async fn create(&self, user: User) -> Result<User, UserError>;

    /// Retrieve a live (not soft-deleted) user by identifier.
    ///
    /// # Errors
    /// * `Store` - Database operation failed
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError>;

    /// Retrieve a live (not soft-deleted) user by CPF.
    ///
    /// # Errors
    /// * `Store` - Database operation failed
    async fn find_by_cpf(&self, cpf: &Cpf) -> Result<Option<User>, UserError>;

    /// Retrieve all live users, oldest first.
    ///
    /// # Errors
    /// * `Store` - Database operation failed
    async fn find_all(&self) -> Result<Vec<User>, UserError>;

    /// Write back a user's fields, including lifecycle flags. Updating
    /// a soft-deleted row reports `NotFound`.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist or is soft-deleted
    /// * `CpfAlreadyExists` - New CPF unique constraint violated
    /// * `EmailAlreadyExists` - New email unique constraint violated
    /// * `Store` - Database operation failed
    async fn update(&self, user: User) -> Result<User, UserError>;
}
