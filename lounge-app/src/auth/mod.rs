//! Authentication
//!
//! The bootstrap admin is resolved first, from configuration; everyone
//! else is looked up in the users table by case-insensitive full name and
//! exact password.

use crate::catalog::{decode_record, to_record};
use crate::core::StoreResultExt;
use crate::utils::validation::{
    MAX_NAME_LEN, MAX_PASSWORD_LEN, MAX_SHORT_TEXT_LEN, validate_required_text,
};
use lounge_client::{Query, RecordStore, Table};
use serde::Serialize;
use shared::error::{AppError, AppResult};
use shared::models::{NewUser, User};
use shared::util::prefixed_id;

/// Id of the bootstrap admin session user
pub const ADMIN_USER_ID: &str = "admin-1";

/// Fixed admin account outside the users table
#[derive(Clone)]
pub struct AdminCredential {
    pub full_name: String,
    pub password: String,
    pub phone: String,
}

impl std::fmt::Debug for AdminCredential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminCredential")
            .field("full_name", &self.full_name)
            .field("password", &"***")
            .field("phone", &self.phone)
            .finish()
    }
}

impl AdminCredential {
    pub fn matches(&self, full_name: &str, password: &str) -> bool {
        full_name.trim().to_lowercase() == self.full_name.trim().to_lowercase()
            && password == self.password
    }

    /// Session user for the admin account
    pub fn user(&self) -> User {
        User {
            id: ADMIN_USER_ID.to_string(),
            full_name: self.full_name.clone(),
            phone: self.phone.clone(),
            total_spent: 0.0,
            rewards_available: 0,
            is_admin: true,
        }
    }
}

/// Resolve credentials to a user
///
/// Mismatches never say which half was wrong.
pub async fn authenticate(
    store: &dyn RecordStore,
    admin: Option<&AdminCredential>,
    full_name: &str,
    password: &str,
) -> AppResult<User> {
    validate_required_text(full_name, "fullName", MAX_NAME_LEN)?;
    validate_required_text(password, "password", MAX_PASSWORD_LEN)?;

    if let Some(admin) = admin.filter(|a| a.matches(full_name, password)) {
        tracing::info!(user_id = ADMIN_USER_ID, "Admin signed in");
        return Ok(admin.user());
    }

    let query = Query::all()
        .ilike("fullName", full_name.trim().to_lowercase())
        .eq("password", password)
        .limit(1);
    let record = store
        .select(Table::Users, &query)
        .await
        .on_read("login lookup")?
        .into_iter()
        .next()
        .ok_or_else(AppError::invalid_credentials)?;

    let user: User = decode_record(record)?;
    tracing::info!(user_id = %user.id, "User signed in");
    Ok(user)
}

/// Stored user row: profile plus password
#[derive(Serialize)]
struct RegistrationRecord<'a> {
    #[serde(flatten)]
    user: &'a User,
    password: &'a str,
}

/// Create a customer account
pub async fn register(store: &dyn RecordStore, new_user: NewUser, password: &str) -> AppResult<User> {
    validate_required_text(&new_user.full_name, "fullName", MAX_NAME_LEN)?;
    validate_required_text(&new_user.phone, "phone", MAX_SHORT_TEXT_LEN)?;
    validate_required_text(password, "password", MAX_PASSWORD_LEN)?;

    let user = User {
        id: prefixed_id("user"),
        full_name: new_user.full_name.trim().to_string(),
        phone: new_user.phone.trim().to_string(),
        total_spent: 0.0,
        rewards_available: 0,
        is_admin: false,
    };

    let record = to_record(&RegistrationRecord {
        user: &user,
        password,
    })?;
    store
        .insert(Table::Users, record)
        .await
        .on_write("register user")?;

    tracing::info!(user_id = %user.id, "User registered");
    Ok(user)
}
