use std::path::PathBuf;

use anyhow::{Context, Result};
use bw::{RecipeId, RecipeSession};
use bw_client::cli::{init_tracing, Connection};
use bw_client::render;
use clap::Parser;

/// Show a recipe, scaled to a number of servings
#[derive(Parser, Debug)]
#[command(version, about)]
pub struct Args {
    #[command(flatten)]
    connection: Connection,
    /// Id of the recipe
    id: RecipeId,
    /// Number of servings to scale the ingredients to
    #[arg(short, long)]
    servings: Option<u32>,
    /// Write the recipe image to this file
    #[arg(long)]
    save_image: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let args = Args::parse();
    let store = args.connection.store()?;

    let mut session = match RecipeSession::load(store, args.id).await {
        Ok(session) => session,
        Err(e) => {
            eprintln!("{}", e.notice());
            std::process::exit(1);
        }
    };
    if let Some(servings) = args.servings {
        if !session.set_display_servings(servings)? {
            tracing::warn!("Ignoring serving count {servings}");
        }
    }

    print!("{}", render::Detail(&session));

    if let Some(path) = args.save_image {
        let bytes = session
            .recipe()
            .image_bytes()
            .context("Decoding recipe image")?;
        if bytes.is_empty() {
            println!("\nThis recipe has no image");
        } else {
            std::fs::write(&path, &bytes)
                .with_context(|| format!("Writing image to {}", path.display()))?;
            println!("\nImage saved to {}", path.display());
        }
    }
    Ok(())
}
