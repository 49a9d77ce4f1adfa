use argon2::{
    Argon2, PasswordHasher,
    password_hash::{PasswordHash, PasswordVerifier, SaltString},
};
use password_hash::rand_core::OsRng;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter};
use uuid::Uuid;

use crate::{
    dto::auth::LoginForm,
    entity::admins::{Column as AdminCol, Entity as Admins},
    error::{AppError, AppResult},
    state::AppState,
};

/// Checks the credentials against the stored argon2 hash and opens a
/// session. Returns the new session id.
pub async fn login_admin(state: &AppState, form: LoginForm) -> AppResult<Uuid> {
    let LoginForm { username, password } = form;
    let username = username.trim();
    if username.is_empty() || password.is_empty() {
        return Err(AppError::InvalidCredentials);
    }

    let admin = Admins::find()
        .filter(AdminCol::Username.eq(username))
        .one(state.orm.as_ref())
        .await?;
    let admin = match admin {
        Some(a) => a,
        None => return Err(AppError::InvalidCredentials),
    };

    if !verify_password(&password, &admin.password_hash)? {
        return Err(AppError::InvalidCredentials);
    }

    let session_id = state.sessions.create(admin.admin_id, &admin.username);
    tracing::info!(admin_id = admin.admin_id, "admin logged in");
    Ok(session_id)
}

pub fn logout_admin(state: &AppState, session_id: &Uuid) {
    if let Some(session) = state.sessions.destroy(session_id) {
        tracing::info!(admin_id = session.admin_id, "admin logged out");
    }
}

pub fn hash_password(password: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    let hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AppError::Internal(anyhow::anyhow!(e.to_string())))?
        .to_string();
    Ok(hash)
}

fn verify_password(password: &str, stored_hash: &str) -> AppResult<bool> {
    let parsed_hash = PasswordHash::new(stored_hash)
        .map_err(|_| AppError::Internal(anyhow::anyhow!("Invalid password hash")))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}
