mod actors;
mod app_system;
mod clients;
mod domain;
mod error;
mod messages;
mod notify;
mod remote;
mod source;
mod storage;
mod validation;

#[cfg(test)]
mod mock_framework;

use tracing::{error, info, Instrument};

use crate::app_system::{setup_tracing, RosterConfig, RosterSystem};
use crate::domain::{Address, UserDraft, UserPatch};

#[tokio::main]
async fn main() -> Result<(), String> {
    // Setup tracing once for the entire application
    setup_tracing();

    info!("Starting user roster");

    let mut system = RosterSystem::new(RosterConfig::default());

    let span = tracing::info_span!("startup_hydration");
    async {
        match system.hydrate().await {
            Ok(source) => info!(?source, "User list hydrated"),
            Err(e) => error!(error = %e, "Hydration failed, starting with an empty list"),
        }
    }
    .instrument(span)
    .await;

    let before = system
        .user_client
        .list_users()
        .await
        .map_err(|e| e.to_string())?;
    info!(count = before.len(), "Current roster size");

    // Create a user
    let draft = UserDraft {
        name: "Alice Smith".into(),
        email: "alice@example.com".into(),
        phone: "0123456789".into(),
        website: Some("https://alice.example.com".into()),
        address: Address {
            street: "1 Main St".into(),
            city: "Springfield".into(),
        },
        company: None,
    };

    let span = tracing::info_span!("user_creation");
    let created = async {
        info!("Creating test user");
        system
            .user_client
            .create_user(draft)
            .await
            .map_err(|e| e.to_string())
    }
    .instrument(span)
    .await?;

    info!(user_id = created.id, username = %created.username, "User created");

    // Search by name, case-insensitively
    let hits = system
        .user_client
        .search_users("alice".into())
        .await
        .map_err(|e| e.to_string())?;
    info!(count = hits.len(), "Search for 'alice' finished");

    // Edit the mutable fields
    let span = tracing::info_span!("user_edit");
    let update_result = async {
        info!("Updating test user");
        system
            .user_client
            .update_user(
                created.id,
                UserPatch {
                    phone: Some("0987654321".into()),
                    ..UserPatch::default()
                },
            )
            .await
    }
    .instrument(span)
    .await;

    match update_result {
        Ok(updated) => info!(user_id = updated.id, phone = %updated.phone, "User updated"),
        Err(e) => error!(error = %e, "Update failed"),
    }

    // Detail lookup with remote fallback
    match system.resolve_user(created.id).await {
        Ok(user) => info!(user_id = user.id, name = %user.name, "Resolved user detail"),
        Err(e) => error!(error = %e, "Detail lookup failed"),
    }

    // Remove the demo user again
    system
        .user_client
        .delete_user(created.id)
        .await
        .map_err(|e| e.to_string())?;

    // Shutdown system gracefully
    system.shutdown().await?;

    info!("Application completed successfully");
    Ok(())
}
