use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use wikit_querier::branch::{self, BranchTable};
use wikit_querier::client::{FailoverClient, HttpTransport};
use wikit_querier::config::QuerierConfig;
use wikit_querier::resolver::{LookupKind, Resolution, Resolver};

#[derive(Parser)]
#[command(name = "wikit-querier")]
#[command(about = "Query wiki articles and author rankings through the Wikit API")]
struct Args {
    /// Path to a JSON config file (endpoints, ban lists)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Branch alias used when the command does not name one
    #[arg(long)]
    default_branch: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Look up an article by title; the trailing token may name a branch
    Search { terms: Vec<String> },

    /// Look up an author by name or by `#<rank>`
    Author { terms: Vec<String> },

    /// List supported branches and their site addresses
    Branches,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt::init();

    let args = Args::parse();
    let branches = BranchTable::builtin();

    let (kind, terms) = match &args.command {
        Command::Branches => {
            for (alias, wiki) in branches.entries() {
                println!("{} -> {}", alias, branch::site_url(wiki));
            }
            return Ok(());
        }
        Command::Search { terms } => (LookupKind::Article, terms),
        Command::Author { terms } => (LookupKind::Author, terms),
    };

    if terms.is_empty() {
        anyhow::bail!("nothing to look up");
    }

    let config = match &args.config {
        Some(path) => QuerierConfig::load(path)?,
        None => QuerierConfig::from_env(),
    };

    let (input, explicit_branch) = branch::split_branch_argument(&branches, terms);

    let client = FailoverClient::new(Arc::new(HttpTransport::new()), config.endpoints.clone());
    let resolver = Resolver::new(client, branches, config.filter_policy());

    let resolution = resolver
        .resolve(kind, &input, explicit_branch, args.default_branch.as_deref())
        .await?;

    match resolution {
        Resolution::Article(article) => {
            let author = article
                .author
                .as_deref()
                .filter(|name| !name.is_empty())
                .unwrap_or("(deleted account)");
            println!("{}", article.title);
            println!("Rating: {}", article.rating);
            println!("Author: {}", author);
            println!("{}", article.url);
        }
        Resolution::Author(record) => {
            println!("{} (#{})", record.name, record.rank);
            println!("Total score: {}", record.value);
            if let Some(total) = record.total.filter(|t| *t > 0) {
                println!(
                    "Articles: {} (average {:.2})",
                    total,
                    record.value / total as f64
                );
            }
        }
        Resolution::NotFound => println!("Nothing found."),
    }

    Ok(())
}
