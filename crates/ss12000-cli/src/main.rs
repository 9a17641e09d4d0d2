mod output;
mod subscriptions;

use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use ss12000_client::{ExpandOptions, Filters, LookupRequest, Resource, ResponseBody, Ss12000Client};
use tracing_subscriber::EnvFilter;

use crate::subscriptions::SubscriptionCommands;

#[derive(Debug, Parser)]
#[command(name = "ss12000-cli")]
#[command(about = "Query an SS12000 school-data API")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Show supported resources, or the filters one resource accepts
    Resources {
        /// Resource to describe (path or kebab-case name)
        resource: Option<Resource>,
    },
    /// List a resource with optional filters
    List {
        resource: Resource,
        /// Filter as name=value; repeat a name to send a list
        #[arg(short = 'f', long = "filter", value_parser = parse_key_value)]
        filters: Vec<(String, String)>,
        #[arg(long)]
        limit: Option<u32>,
        /// Continuation token from a previous page
        #[arg(long)]
        page_token: Option<String>,
    },
    /// Fetch one entity by id
    Get {
        resource: Resource,
        id: String,
        #[arg(long)]
        expand: Vec<String>,
        #[arg(long)]
        expand_reference_names: bool,
    },
    /// Bulk lookup by ids or resource-specific identifiers
    Lookup {
        resource: Resource,
        #[arg(long = "id")]
        ids: Vec<String>,
        /// Identifier list entry as name=value, e.g. civic_nos=191212121212
        #[arg(long = "key", value_parser = parse_key_value)]
        keys: Vec<(String, String)>,
        #[arg(long)]
        expand: Vec<String>,
        #[arg(long)]
        expand_reference_names: bool,
    },
    /// Delete one entity (attendances and subscriptions only)
    Delete { resource: Resource, id: String },
    /// Manage webhook subscriptions
    Subscriptions {
        #[command(subcommand)]
        command: SubscriptionCommands,
    },
    /// Fetch ids of deleted entities
    DeletedEntities {
        /// Entity type, e.g. Person; repeat for several
        #[arg(long = "entity", required = true)]
        entities: Vec<String>,
        /// Only deletions after this RFC 3339 timestamp
        #[arg(long)]
        since: Option<DateTime<Utc>>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    if let Commands::Resources { resource } = cli.command {
        output::print_resources(resource);
        return Ok(());
    }

    let config = ss12000_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let client = Ss12000Client::new(
        &config.base_url,
        config.auth_token.as_deref(),
        config.request_timeout_secs,
    )?;

    let body = execute(&client, cli.command).await?;
    output::print_body(&body)
}

async fn execute(client: &Ss12000Client, command: Commands) -> anyhow::Result<ResponseBody> {
    let body = match command {
        Commands::Resources { .. } => anyhow::bail!("`resources` does not call the API"),
        Commands::List {
            resource,
            filters,
            limit,
            page_token,
        } => {
            let filters = build_filters(&filters)
                .set_opt("limit", limit)
                .set_opt("page_token", page_token);
            client.list(resource, &filters).await?
        }
        Commands::Get {
            resource,
            id,
            expand,
            expand_reference_names,
        } => {
            let options = expand_options(expand, expand_reference_names);
            client.get_by_id(resource, &id, &options).await?
        }
        Commands::Lookup {
            resource,
            ids,
            keys,
            expand,
            expand_reference_names,
        } => {
            let mut request = LookupRequest::by_ids(ids);
            for (name, value) in keys {
                request = request.with_key(name, [value]);
            }
            request.options = expand_options(expand, expand_reference_names);
            client.lookup(resource, &request).await?
        }
        Commands::Delete { resource, id } => client.delete(resource, &id).await?,
        Commands::Subscriptions { command } => subscriptions::run(client, command).await?,
        Commands::DeletedEntities { entities, since } => {
            client.get_deleted_entities(entities, since).await?
        }
    };
    Ok(body)
}

/// Parses a `name=value` argument.
fn parse_key_value(raw: &str) -> Result<(String, String), String> {
    let (name, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected name=value, got '{raw}'"))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(format!("missing name in '{raw}'"));
    }
    Ok((name.to_owned(), value.to_owned()))
}

/// Groups repeated names into list values, keeping first-seen order.
fn build_filters(pairs: &[(String, String)]) -> Filters {
    let mut grouped: Vec<(&str, Vec<String>)> = Vec::new();
    for (name, value) in pairs {
        match grouped.iter_mut().find(|(n, _)| *n == name.as_str()) {
            Some((_, values)) => values.push(value.clone()),
            None => grouped.push((name.as_str(), vec![value.clone()])),
        }
    }

    let mut filters = Filters::new();
    for (name, mut values) in grouped {
        if values.len() == 1 {
            filters.insert(name, values.remove(0));
        } else {
            filters.insert(name, values);
        }
    }
    filters
}

fn expand_options(expand: Vec<String>, reference_names: bool) -> ExpandOptions {
    ExpandOptions {
        expand,
        expand_reference_names: reference_names,
    }
}

#[cfg(test)]
mod tests;
