use anyhow::{ensure, Result};
use bw_client::auth::NewUser;
use bw_client::cli::{init_tracing, Connection};
use clap::Parser;
use dialoguer::{Input, Password};

/// Log in to the recipe service, optionally registering a new account first
#[derive(Parser, Debug)]
#[command(version, about)]
pub struct Args {
    #[command(flatten)]
    connection: Connection,
    /// Account email; asked for when missing
    email: Option<String>,
    /// Register the account before logging in
    #[arg(long)]
    register: bool,
    /// Invite code, required for registering
    #[arg(long)]
    invite_code: Option<String>,
    /// Forget the stored token instead of logging in
    #[arg(long, conflicts_with_all = ["email", "register"])]
    logout: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let args = Args::parse();
    let store = args.connection.store()?;

    if args.logout {
        store.logout()?;
        println!("Logged out");
        return Ok(());
    }

    let email = match args.email {
        Some(email) => email,
        None => Input::new().with_prompt("Email").interact_text()?,
    };
    let password = Password::new().with_prompt("Password").interact()?;

    if args.register {
        let invite_code = match args.invite_code {
            Some(code) => code,
            None => Input::new().with_prompt("Invite code").interact_text()?,
        };
        ensure!(
            !invite_code.trim().is_empty(),
            "An invite code is required to register"
        );
        let user = store
            .register(&NewUser {
                email: email.clone(),
                password: password.clone(),
                invite_code,
            })
            .await?;
        println!("Registered {} (id {})", user.email, user.id);
    }

    if let Err(e) = store.login(&email, &password).await {
        eprintln!("Login failed: {e}");
        std::process::exit(1);
    }
    println!(
        "Logged in as {email}, token stored in {}",
        store.tokens().path().display()
    );
    Ok(())
}
