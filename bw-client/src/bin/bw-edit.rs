use anyhow::Result;
use bw::{RecipeId, RecipeSession};
use bw_client::cli::{init_tracing, Connection};
use bw_client::edit::EditPlan;
use bw_client::render;
use clap::Parser;

/// Edit a recipe and save it
#[derive(Parser, Debug)]
#[command(version, about)]
pub struct Args {
    #[command(flatten)]
    connection: Connection,
    /// Id of the recipe
    id: RecipeId,
    #[command(flatten)]
    plan: EditPlan,
    /// Show the edited draft without saving it
    #[arg(long)]
    dry: bool,
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
    session.begin_edit()?;
    for rejected in args.plan.apply(&mut session)? {
        tracing::warn!("Ignoring invalid input: {rejected}");
    }

    if args.dry {
        print!("{}", render::Detail(&session));
        println!("\nDry run mode enabled, discarding changes");
        session.cancel_edit()?;
        return Ok(());
    }

    if let Err(e) = session.save().await {
        eprintln!("{}", e.notice());
        std::process::exit(1);
    }
    print!("{}", render::Detail(&session));
    Ok(())
}
