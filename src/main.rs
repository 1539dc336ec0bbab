use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::Parser;

use stepworld::{
    ecs::ComponentGroup, Component, ComponentSystem, ConfigLoader, RunConfig, StepRunner,
    SystemOutput, VoidSystem, World, WorldBuilder,
};

#[derive(Debug, Parser)]
#[command(author, version, about = "Run one step of the demo world")]
struct Cli {
    /// Path to a run configuration YAML file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print the step result as YAML
    #[arg(long)]
    report: bool,
}

#[derive(Debug)]
struct TransactionIngested {
    date: DateTime<Utc>,
}

impl Component for TransactionIngested {
    fn kind(&self) -> &'static str {
        "TransactionIngested"
    }
}

#[derive(Debug, Default)]
struct Price {
    price: f64,
}

impl Component for Price {
    fn kind(&self) -> &'static str {
        "Price"
    }
}

#[derive(Debug, Default)]
struct Quantity {
    quantity: f64,
}

impl Component for Quantity {
    fn kind(&self) -> &'static str {
        "Quantity"
    }
}

fn hello_system() -> VoidSystem {
    VoidSystem::new("hello world", |_world| async {
        Ok(SystemOutput::stdout("hello world"))
    })
}

fn ingestor_system() -> VoidSystem {
    VoidSystem::new("ingestor", |world: World| async move {
        let date = Utc::now();
        let entity = world.add_entity(|e| {
            e.with_component(TransactionIngested { date })
                .with_component(Price::default())
        });
        let stored = world
            .components()
            .get("TransactionIngested", entity)
            .and_then(|cell| {
                let record = cell.read();
                record.downcast_ref::<TransactionIngested>().map(|t| t.date)
            })
            .context("ingested transaction was not stored")?;
        Ok(SystemOutput::stdout(format!(
            "ingested {entity} at {}",
            stored.to_rfc3339()
        )))
    })
}

/// Logs the value held by every entity that has both a price and a quantity.
fn valuation_system() -> ComponentSystem {
    ComponentSystem::new(
        "valuation",
        |store| store.groups(&["Price", "Quantity"]),
        |group: ComponentGroup| async move {
            let (price, quantity) = match group.as_slice() {
                [price, quantity] => (price.read(), quantity.read()),
                _ => anyhow::bail!("expected a price and a quantity"),
            };
            let entity = price.entity();
            let price = price
                .downcast_ref::<Price>()
                .context("price group holds a foreign component")?
                .price;
            let quantity = quantity
                .downcast_ref::<Quantity>()
                .context("quantity group holds a foreign component")?
                .quantity;
            log::info!("entity {entity} holds {:.2}", price * quantity);
            Ok(())
        },
    )
}

fn build_world(config: &RunConfig) -> World {
    let mut builder = WorldBuilder::new()
        .with_system(hello_system())
        .with_system(ingestor_system())
        .with_system(valuation_system());
    for seed in &config.entities {
        builder = builder.with_entity(|e| {
            e.with_component(Price { price: seed.price })
                .with_component(Quantity {
                    quantity: seed.quantity,
                })
        });
    }
    builder.build()
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => ConfigLoader::new(".").load(path)?,
        None => RunConfig::default(),
    };

    env_logger::Builder::new()
        .parse_filters(&config.logging.level)
        .parse_default_env()
        .init();

    let world = build_world(&config);
    let runner = StepRunner::new(config.runner.clone());
    let result = runner
        .execute_step(&world)
        .await
        .with_context(|| format!("step failed for '{}'", config.name))?;

    for line in result.stdout_lines() {
        println!("{line}");
    }
    if cli.report {
        print!("{}", serde_yaml::to_string(&result)?);
    }
    println!(
        "done: {} entities after one step of '{}'",
        world.entity_count(),
        config.name
    );
    Ok(())
}
