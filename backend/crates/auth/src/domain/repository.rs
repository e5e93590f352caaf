//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.

use crate::domain::entity::user::User;
use crate::domain::value_object::email::Email;
use crate::error::AuthResult;

/// User repository trait
#[trait_variant::make(UserRepository: Send)]
pub trait LocalUserRepository {
    /// Find user by email; `Ok(None)` when no row matches
    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<User>>;

    /// Insert a new user; a duplicate email is `AuthError::EmailTaken`
    async fn create(&self, user: &User) -> AuthResult<()>;
}
