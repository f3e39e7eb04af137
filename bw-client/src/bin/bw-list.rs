use anyhow::Result;
use bw::catalog::RecipeFilter;
use bw::RecipeStore;
use bw_client::cli::{init_tracing, Connection};
use bw_client::render;
use clap::Parser;

/// List the recipes in the collection
#[derive(Parser, Debug)]
#[command(version, about)]
pub struct Args {
    #[command(flatten)]
    connection: Connection,
    /// Only show recipes whose title contains this text
    search: Option<String>,
    /// Only show recipes carrying this tag; repeat to require several
    #[arg(short, long)]
    tag: Vec<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let args = Args::parse();
    let store = args.connection.store()?;

    let recipes = match store.list_recipes().await {
        Ok(recipes) => recipes,
        Err(e) => {
            eprintln!("Could not load recipes: {e}");
            std::process::exit(1);
        }
    };

    let filter = RecipeFilter::new()
        .with_search(args.search.as_deref().unwrap_or_default())
        .with_tags(&args.tag);
    let shown = filter.apply(&recipes);
    for recipe in &shown {
        println!("{}", render::Summary(recipe));
    }
    if shown.is_empty() {
        println!("No recipes found");
    }
    println!("\n{}", render::tag_footer(&recipes));
    Ok(())
}
