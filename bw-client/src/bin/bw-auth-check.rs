use anyhow::Result;
use bw::StoreError;
use bw_client::cli::{init_tracing, Connection};
use clap::Parser;

/// Check that the stored token is accepted by the server
#[derive(Parser, Debug)]
#[command(version, about)]
pub struct Args {
    #[command(flatten)]
    connection: Connection,
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let args = Args::parse();
    let config = args.connection.config()?;
    let store = bw_client::api::HttpRecipeStore::new(&config)?;

    if store.tokens().token().is_none() {
        eprintln!("Error: not logged in");
        eprintln!("Run bw-login first");
        std::process::exit(1);
    }

    println!("Testing authentication with {}...", config.server.base_url);

    match store.current_user().await {
        Ok(user) => {
            println!("\nAuthentication successful!");
            println!("{}", serde_json::to_string_pretty(&user)?);
        }
        Err(StoreError::Unauthorized) => {
            println!("\nAuthentication failed!");
            println!("The stored token was rejected and has been removed.");
            std::process::exit(1);
        }
        Err(e) => {
            eprintln!("\nError connecting to server!");
            eprintln!("URL: {}", config.server.base_url);
            if config.server.base_url.starts_with("https://localhost")
                || config.server.base_url.starts_with("https://127.0.0.1")
            {
                eprintln!("\nHint: Local dev servers typically use HTTP, not HTTPS.");
                eprintln!("Try: bw-auth-check --server http://127.0.0.1:8000");
            }
            return Err(e.into());
        }
    }

    Ok(())
}
