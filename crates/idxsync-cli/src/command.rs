use crate::{utility::redact_url_password, Declaration};

use anyhow::Result;
use clap::{Args, Parser};
use console::style;
use idxsync::{Config, IndexEnsurer, Plan};
use idxsync_driver_mongodb::MongoDb;
use std::path::PathBuf;

/// Arguments shared by every command
#[derive(Args, Debug)]
pub struct CommonArgs {
    /// MongoDB connection URL; the path names the database
    #[arg(long)]
    url: String,

    /// Declaration file (`.toml` or `.json`)
    #[arg(long, short)]
    file: PathBuf,

    /// Only reconcile these collections (repeatable)
    #[arg(long = "collection", value_name = "NAME", global = true)]
    collections: Vec<String>,

    /// Report undeclared indexes instead of dropping them
    #[arg(long, global = true)]
    keep_extra: bool,
}

impl CommonArgs {
    pub(crate) fn config(&self, mut config: Config) -> Config {
        if !self.collections.is_empty() {
            config = config.collections(self.collections.iter().cloned());
        }

        if self.keep_extra {
            config = config.drop_extra(false);
        }

        config
    }

    async fn ensurer(&self, config: Config) -> Result<IndexEnsurer> {
        tracing::info!(url = %redact_url_password(&self.url), "connecting");
        let db = MongoDb::connect(&self.url).await?;
        Ok(IndexEnsurer::with_config(db, config))
    }
}

#[derive(Parser, Debug)]
pub struct PlanCommand {}

impl PlanCommand {
    pub(crate) async fn run(self, args: &CommonArgs, config: Config) -> Result<()> {
        let declaration = Declaration::load(&args.file)?;
        let ensurer = args.ensurer(config).await?;

        let plan = ensurer.plan(&declaration.into_collections()).await?;

        println!();
        println!("  {}", style("Index Plan").cyan().bold().underlined());
        println!();
        print_plan(&plan, ensurer.config().drop_extra);

        Ok(())
    }
}

#[derive(Parser, Debug)]
pub struct EnsureCommand {}

impl EnsureCommand {
    pub(crate) async fn run(self, args: &CommonArgs, config: Config) -> Result<()> {
        let declaration = Declaration::load(&args.file)?;
        let ensurer = args.ensurer(config).await?;

        println!();
        println!("  {}", style("Ensure Indexes").cyan().bold().underlined());
        println!();

        let continuation = ensurer.begin(&declaration.into_collections()).await?;
        print_plan(continuation.plan(), true);

        let created: usize = continuation.missing().iter().map(|c| c.len()).sum();
        let dropped: usize = continuation.extra().iter().map(|c| c.len()).sum();

        continuation.proceed().await?;

        println!(
            "  {}",
            style(format!(
                "Dropped {dropped} and created {created} index(es)"
            ))
            .green()
            .bold()
        );
        println!();

        Ok(())
    }
}

fn print_plan(plan: &Plan, drops: bool) {
    if plan.is_empty() {
        println!(
            "  {}",
            style("All indexes are up to date.").green().dim()
        );
        println!();
        return;
    }

    let action = if drops { "drop" } else { "keep" };

    for collection in plan.extra() {
        for index in collection.indexes() {
            println!(
                "  {} {} {} {}",
                style("-").red().bold(),
                style(collection.collection()).bold(),
                style(action).dim(),
                index
            );
        }
    }

    for collection in plan.missing() {
        for index in collection.indexes() {
            println!(
                "  {} {} {} {}",
                style("+").green().bold(),
                style(collection.collection()).bold(),
                style("create").dim(),
                index
            );
        }
    }

    println!();
}
