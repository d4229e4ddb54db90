//! Profile rows in the `users` table.

use contracts::system::auth::{AuthUser, SignUpProfile};
use contracts::system::users::{NewUserRow, User, UserPatch, UserRole, UserRow};

use crate::shared::backend::{insert_as, select_one, tables, update_as, Backend, RowFilter};
use crate::shared::error::AppError;

pub async fn fetch_user(backend: &dyn Backend, id: &str) -> Result<User, AppError> {
    select_one::<UserRow>(backend, tables::USERS, &[RowFilter::eq("id", id)])
        .await
        .map(User::from)
}

/// New accounts start as `viewer`
pub async fn create_profile(
    backend: &dyn Backend,
    auth_user: &AuthUser,
    email: &str,
    profile: &SignUpProfile,
) -> Result<(), AppError> {
    let row = NewUserRow {
        id: auth_user.id.clone(),
        email: email.to_string(),
        first_name: profile.first_name.clone(),
        last_name: profile.last_name.clone(),
        company: profile.company.clone(),
        role: UserRole::Viewer,
    };
    insert_as(backend, tables::USERS, &row).await
}

pub async fn update_profile(backend: &dyn Backend, id: &str, patch: &UserPatch) -> Result<(), AppError> {
    update_as(backend, tables::USERS, &[RowFilter::eq("id", id)], patch).await
}
