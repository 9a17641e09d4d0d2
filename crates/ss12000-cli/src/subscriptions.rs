//! `subscriptions` command handlers.

use chrono::{DateTime, Utc};
use clap::Subcommand;
use ss12000_client::{Filters, NewSubscription, ResponseBody, Ss12000Client};

/// Sub-commands available under `subscriptions`.
#[derive(Debug, Subcommand)]
pub enum SubscriptionCommands {
    /// List existing subscriptions
    List {
        #[arg(long)]
        limit: Option<u32>,
        #[arg(long)]
        page_token: Option<String>,
    },
    /// Show one subscription
    Get { id: String },
    /// Register a webhook target for one or more resource types
    Create {
        #[arg(long)]
        name: String,
        /// Public URL the server will POST notifications to
        #[arg(long)]
        target: String,
        /// Resource type, e.g. Person; repeat for several
        #[arg(long = "resource-type", required = true)]
        resource_types: Vec<String>,
    },
    /// Extend a subscription's expiry
    Renew {
        id: String,
        /// New expiry as an RFC 3339 timestamp
        #[arg(long)]
        expires: DateTime<Utc>,
    },
    /// Remove a subscription
    Delete { id: String },
}

pub(crate) async fn run(
    client: &Ss12000Client,
    command: SubscriptionCommands,
) -> anyhow::Result<ResponseBody> {
    let body = match command {
        SubscriptionCommands::List { limit, page_token } => {
            let filters = Filters::new()
                .set_opt("limit", limit)
                .set_opt("page_token", page_token);
            client.get_subscriptions(&filters).await?
        }
        SubscriptionCommands::Get { id } => client.get_subscription_by_id(&id).await?,
        SubscriptionCommands::Create {
            name,
            target,
            resource_types,
        } => {
            let subscription = NewSubscription::new(name, target, resource_types);
            let body = client.create_subscription(&subscription).await?;
            tracing::info!(name = %subscription.name, "subscription created");
            body
        }
        SubscriptionCommands::Renew { id, expires } => {
            client.update_subscription(&id, expires).await?
        }
        SubscriptionCommands::Delete { id } => client.delete_subscription(&id).await?,
    };
    Ok(body)
}
