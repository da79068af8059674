//! Developer harness: drive the cart component against a live store.
//!
//! Builds a page with a product card per `--card` variant plus the drawer,
//! hydrates it from the store, runs one gesture and prints the result.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use cartsync::alert::RecordedAlerts;
use cartsync::cart::{HttpCartClient, VariantId};
use cartsync::config::Config;
use cartsync::controller::{CartController, Gesture, Target};
use cartsync::logging::init_tracing;
use cartsync::page::{BindingId, Page};

#[derive(Parser, Debug)]
#[command(name = "cartsync")]
#[command(about = "Exercise cart sync against a storefront", long_about = None)]
struct Cli {
    /// Config file (defaults to the user config dir)
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Override `store.base_url`
    #[arg(long, value_name = "URL")]
    store: Option<String>,

    /// Override `store.root`
    #[arg(long, value_name = "PATH")]
    root: Option<String>,

    /// Variant to render a product card for (repeatable)
    #[arg(long = "card", value_name = "VARIANT")]
    cards: Vec<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Hydrate and print the page
    Show,
    /// Step a product card to an exact quantity
    Set { variant: String, quantity: u32 },
    /// Press `+` on a product card
    Add { variant: String },
    /// Remove a line from the drawer
    Remove { variant: String },
    /// Empty the cart
    Clear,
    /// Type into a product card's quantity input
    Type { variant: String, value: String },
    /// Open the drawer
    Open,
}

impl Command {
    /// Variant whose product card the gesture needs.
    fn card_variant(&self) -> Option<&str> {
        match self {
            Command::Set { variant, .. }
            | Command::Add { variant }
            | Command::Type { variant, .. } => Some(variant.as_str()),
            _ => None,
        }
    }
}

fn load_config(cli: &Cli) -> Result<Config> {
    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    if let Some(store) = &cli.store {
        config.store.base_url = store.clone();
    }
    if let Some(root) = &cli.root {
        config.store.root = root.clone();
    }
    config.validate()?;
    Ok(config)
}

fn build_page(cli: &Cli) -> Page {
    let mut page = Page::storefront();
    let mut variants: Vec<&str> = cli.cards.iter().map(String::as_str).collect();
    if let Some(variant) = cli.command.card_variant() {
        if !variants.contains(&variant) {
            variants.push(variant);
        }
    }
    for variant in variants {
        page.add_product_card(variant, 0);
    }
    page
}

fn card(controller: &CartController<HttpCartClient>, variant: &str) -> Result<BindingId> {
    controller
        .page()
        .lock()
        .card_for(variant)
        .with_context(|| format!("no product card for variant {}", variant))
}

/// Gestures that take a card from its current quantity to `target`.
fn steps_to(current: u32, target: u32, binding: BindingId) -> Vec<Gesture> {
    let step = if target >= current { 1 } else { -1 };
    let count = current.abs_diff(target);
    (0..count)
        .map(|_| Gesture::Click(Target::StepButton { binding, step }))
        .collect()
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing();

    let config = load_config(&cli)?;
    let client = HttpCartClient::new(&config.store).context("building cart client")?;
    tracing::info!(cart = %client.cart_url(), "Starting cartsync");

    let alerts = Arc::new(RecordedAlerts::new());
    let controller = CartController::new(
        client,
        build_page(&cli).into_shared(),
        alerts.clone(),
        &config,
    );

    controller.hydrate().await;

    let gestures = match &cli.command {
        Command::Show => Vec::new(),
        Command::Set { variant, quantity } => {
            let binding = card(&controller, variant)?;
            let current = controller
                .page()
                .lock()
                .binding(binding)
                .and_then(|wrapper| wrapper.quantity())
                .unwrap_or(0);
            steps_to(current, *quantity, binding)
        }
        Command::Add { variant } => vec![Gesture::Click(Target::StepButton {
            binding: card(&controller, variant)?,
            step: 1,
        })],
        Command::Remove { variant } => vec![Gesture::Click(Target::RemoveVariant {
            variant_id: VariantId::from(variant.as_str()),
        })],
        Command::Clear => vec![Gesture::Click(Target::ClearCart)],
        Command::Type { variant, value } => vec![Gesture::Input {
            target: Target::QtyInput {
                binding: card(&controller, variant)?,
            },
            value: value.clone(),
        }],
        Command::Open => vec![Gesture::Click(Target::OpenCart)],
    };

    for gesture in gestures {
        let outcome = controller.handle(gesture).await;
        tracing::debug!(?outcome, "Gesture handled");
    }
    controller.settled().await;

    println!("{}", controller.view());
    for message in alerts.take() {
        println!("alert: {}", message);
    }

    Ok(())
}
