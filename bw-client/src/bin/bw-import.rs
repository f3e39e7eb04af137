use anyhow::Result;
use bw::RecipeStore;
use bw_client::cli::{init_tracing, Connection};
use bw_client::render;
use clap::Parser;

/// Import a recipe from a web page into the collection
#[derive(Parser, Debug)]
#[command(version, about)]
pub struct Args {
    #[command(flatten)]
    connection: Connection,
    /// Address of the page to import
    url: String,
    /// Dry run mode: don't actually import the recipe
    #[arg(long)]
    dry: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let args = Args::parse();
    let store = args.connection.store()?;

    println!("Importing {}", args.url);
    if args.dry {
        println!("Dry run mode enabled, skipping import");
        return Ok(());
    }

    match store.import_recipe(&args.url).await {
        Ok(recipe) => {
            tracing::info!(recipe_id = %recipe.id, "Recipe imported successfully");
            println!("{}", render::Summary(&recipe));
            Ok(())
        }
        Err(e) => {
            eprintln!("Failed to import recipe: {e}");
            std::process::exit(1);
        }
    }
}
