//! Promote / demote command handlers

use crate::config::Config;
use crate::db::Store;

pub async fn cmd_set_admin(config: &Config, email: &str, is_admin: bool) -> anyhow::Result<()> {
    let email = email.trim().to_lowercase();
    if email.is_empty() {
        anyhow::bail!("Email cannot be empty");
    }

    let store = Store::new(&config.general.database_url).await?;

    if !store.set_admin(&email, is_admin).await? {
        println!("No account found for {email}");
        println!();
        println!("The user has to sign up before their role can change.");
        return Ok(());
    }

    if is_admin {
        println!("✓ {email} is now an administrator");
    } else {
        println!("✓ {email} is no longer an administrator");
    }

    Ok(())
}
