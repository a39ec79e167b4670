//! Create-admin command - Bootstraps the first admin account.
//!
//! Safe to run repeatedly: if the email is already taken the command
//! reports it and exits cleanly.

use crate::cli::args::CreateAdminArgs;
use crate::config::Config;
use crate::domain::{NewUser, Password, UserRole};
use crate::errors::AppResult;
use crate::infra::{Database, UserRepository, UserStore};

/// Execute the create-admin command
pub async fn execute(args: CreateAdminArgs, config: Config) -> AppResult<()> {
    let db = Database::connect(&config).await;
    let users = UserStore::new(db.get_connection());

    if let Some(existing) = users.find_by_email(&args.email).await? {
        tracing::info!(
            email = %existing.email,
            "account already exists, nothing to do"
        );
        return Ok(());
    }

    let password_hash = Password::new(&args.password)?.into_string();
    let user = users
        .create(NewUser {
            email: args.email,
            password_hash,
            name: args.name,
            role: UserRole::Admin,
            work_hours: None,
            target: None,
            bonus: None,
        })
        .await?;

    tracing::info!(user_id = %user.id, email = %user.email, "admin account created");

    Ok(())
}
