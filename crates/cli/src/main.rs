//! Shopfront CLI - cart, wishlist and orders from the terminal.
//!
//! The cart and wishlist live in `SHOPFRONT_DATA_DIR` and survive between
//! runs. Catalog lookups, checkout and order history go through a running
//! proxy.
//!
//! # Usage
//!
//! ```bash
//! shop products list --query "page=1&limit=20"
//! shop cart add 42 --quantity 2
//! shop wishlist toggle 7
//! shop signin --email ada@example.com
//! export SHOPFRONT_TOKEN=...
//! shop checkout --name "Ada Lovelace" --line1 "12 Analytical Way" \
//!     --city London --postal-code "N1 9GU" --country GB --email ada@example.com
//! shop orders mine
//! ```
//!
//! # Environment Variables
//!
//! - `SHOPFRONT_PROXY_URL` - Proxy base URL (default: <http://127.0.0.1:3000>)
//! - `SHOPFRONT_DATA_DIR` - Where cart and wishlist snapshots are kept (default: `.shopfront`)
//! - `SHOPFRONT_TOKEN` - Bearer token for order and subscription commands

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use secrecy::SecretString;
use shopfront_core::{ContactDetails, ProductId, ShippingAddress};

mod client;
mod commands;
mod output;
mod session;

use client::ProxyClient;
use commands::CliError;
use session::Session;

#[derive(Parser)]
#[command(name = "shop")]
#[command(author, version, about = "Shopfront storefront client")]
struct Cli {
    /// Proxy base URL
    #[arg(long, env = "SHOPFRONT_PROXY_URL", default_value = "http://127.0.0.1:3000")]
    proxy_url: String,

    /// Directory holding the cart and wishlist snapshots
    #[arg(long, env = "SHOPFRONT_DATA_DIR", default_value = ".shopfront")]
    data_dir: PathBuf,

    /// Bearer token from `shop signin`
    #[arg(long, env = "SHOPFRONT_TOKEN", hide_env_values = true)]
    token: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage the cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Manage the wishlist
    Wishlist {
        #[command(subcommand)]
        action: WishlistAction,
    },
    /// Browse the catalog
    Products {
        #[command(subcommand)]
        action: ProductsAction,
    },
    /// Submit the cart as an order
    Checkout(CheckoutArgs),
    /// Order history
    Orders {
        #[command(subcommand)]
        action: OrdersAction,
    },
    /// List subscriptions
    Subscriptions {
        /// Query string passed through to upstream
        #[arg(long)]
        query: Option<String>,
    },
    /// Sign in and print a token
    Signin {
        #[arg(short, long)]
        email: String,

        #[arg(short, long, env = "SHOPFRONT_PASSWORD", hide_env_values = true)]
        password: String,
    },
}

#[derive(Subcommand)]
enum CartAction {
    /// Add a product; without --title/--price it is looked up in the catalog
    Add {
        id: String,
        #[arg(short, long, default_value_t = 1)]
        quantity: u32,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        price: Option<Decimal>,
        #[arg(long)]
        image: Option<String>,
        #[arg(long)]
        category: Option<String>,
    },
    /// Remove a line
    Remove { id: String },
    /// Set a line's quantity
    Set { id: String, quantity: u32 },
    /// Empty the cart
    Clear,
    /// Show the cart
    Show,
}

#[derive(Subcommand)]
enum WishlistAction {
    /// Save a catalog product
    Add { id: String },
    /// Drop a saved product
    Remove { id: String },
    /// Save or drop a product
    Toggle { id: String },
    /// Move a saved product into the cart
    MoveToCart { id: String },
    /// Show the wishlist
    Show,
}

#[derive(Subcommand)]
enum ProductsAction {
    /// List products
    List {
        #[arg(long)]
        query: Option<String>,
    },
    /// Show one product
    Show { id: String },
}

#[derive(Subcommand)]
enum OrdersAction {
    /// List orders
    List {
        #[arg(long)]
        query: Option<String>,
    },
    /// List your own orders
    Mine {
        #[arg(long)]
        query: Option<String>,
    },
    /// Show one order
    Show { id: String },
}

#[derive(clap::Args)]
struct CheckoutArgs {
    /// Recipient full name
    #[arg(long)]
    name: String,
    #[arg(long)]
    line1: String,
    #[arg(long)]
    line2: Option<String>,
    #[arg(long)]
    city: String,
    #[arg(long)]
    state: Option<String>,
    #[arg(long)]
    postal_code: String,
    #[arg(long)]
    country: String,
    #[arg(long)]
    email: String,
    #[arg(long)]
    phone: Option<String>,
    /// Note for the merchant
    #[arg(long)]
    notes: Option<String>,
}

impl CheckoutArgs {
    fn into_parts(self) -> (ShippingAddress, ContactDetails, Option<String>) {
        (
            ShippingAddress {
                full_name: self.name,
                address_line1: self.line1,
                address_line2: self.line2,
                city: self.city,
                state: self.state,
                postal_code: self.postal_code,
                country: self.country,
            },
            ContactDetails {
                email: self.email,
                phone: self.phone,
            },
            self.notes,
        )
    }
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "shopfront_cli=warn".into()),
        )
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let client = ProxyClient::new(&cli.proxy_url, cli.token.map(SecretString::from));
    let mut session = Session::open(&cli.data_dir);

    match cli.command {
        Commands::Cart { action } => match action {
            CartAction::Add {
                id,
                quantity,
                title,
                price,
                image,
                category,
            } => {
                let item = commands::cart::NewItem {
                    id: ProductId::parse(&id),
                    quantity,
                    title,
                    price,
                    image,
                    category,
                };
                commands::cart::add(&mut session, &client, item).await?;
            }
            CartAction::Remove { id } => commands::cart::remove(&mut session, &ProductId::parse(&id))?,
            CartAction::Set { id, quantity } => {
                commands::cart::set(&mut session, &ProductId::parse(&id), quantity)?;
            }
            CartAction::Clear => commands::cart::clear(&mut session),
            CartAction::Show => commands::cart::show(&session),
        },
        Commands::Wishlist { action } => match action {
            WishlistAction::Add { id } => {
                commands::wishlist::add(&mut session, &client, &ProductId::parse(&id)).await?;
            }
            WishlistAction::Remove { id } => {
                commands::wishlist::remove(&mut session, &ProductId::parse(&id))?;
            }
            WishlistAction::Toggle { id } => {
                commands::wishlist::toggle(&mut session, &client, &ProductId::parse(&id)).await?;
            }
            WishlistAction::MoveToCart { id } => {
                commands::wishlist::move_to_cart(&mut session, &ProductId::parse(&id))?;
            }
            WishlistAction::Show => commands::wishlist::show(&session),
        },
        Commands::Products { action } => match action {
            ProductsAction::List { query } => {
                commands::products::list(&client, query.as_deref()).await?;
            }
            ProductsAction::Show { id } => {
                commands::products::show(&client, &ProductId::parse(&id)).await?;
            }
        },
        Commands::Checkout(args) => {
            let (shipping, contact, notes) = args.into_parts();
            commands::checkout::checkout(&mut session, &client, shipping, contact, notes).await?;
        }
        Commands::Orders { action } => match action {
            OrdersAction::List { query } => commands::orders::list(&client, query.as_deref()).await?,
            OrdersAction::Mine { query } => commands::orders::mine(&client, query.as_deref()).await?,
            OrdersAction::Show { id } => commands::orders::show(&client, &id).await?,
        },
        Commands::Subscriptions { query } => {
            commands::orders::subscriptions(&client, query.as_deref()).await?;
        }
        Commands::Signin { email, password } => {
            commands::auth::signin(&client, &email, &SecretString::from(password)).await?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }
}
