use anyhow::Result;
use bw::{DeleteOutcome, RecipeId, RecipeSession};
use bw_client::cli::{init_tracing, Connection};
use clap::Parser;
use dialoguer::Confirm;

/// Delete a recipe from the collection
#[derive(Parser, Debug)]
#[command(version, about)]
pub struct Args {
    #[command(flatten)]
    connection: Connection,
    /// Id of the recipe
    id: RecipeId,
    /// Don't ask for confirmation
    #[arg(short, long)]
    yes: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let args = Args::parse();
    let store = args.connection.store()?;

    let session = match RecipeSession::load(store, args.id).await {
        Ok(session) => session,
        Err(e) => {
            eprintln!("{}", e.notice());
            std::process::exit(1);
        }
    };

    let outcome = session
        .delete(|recipe| {
            args.yes
                || Confirm::new()
                    .with_prompt(format!("Really delete \"{}\"?", recipe.title))
                    .default(false)
                    .interact()
                    .unwrap_or(false)
        })
        .await;
    match outcome {
        DeleteOutcome::Deleted => println!("Recipe deleted"),
        DeleteOutcome::Declined(_) => println!("Nothing deleted"),
        DeleteOutcome::Failed(_, e) => {
            eprintln!("{}", e.notice());
            std::process::exit(1);
        }
    }
    Ok(())
}
