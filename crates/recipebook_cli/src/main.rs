//! Command-line entry point for the recipe book client.
//!
//! # Responsibility
//! - Wire config, logging, durable storage and the HTTP transport.
//! - Expose list/add/star operations with the same terminal texts the
//!   graphical client shows. Progress texts go to stderr so stdout stays
//!   parseable.

use clap::{Parser, Subcommand};
use log::error;
use recipebook_core::db::open_db;
use recipebook_core::{
    core_version, init_logging, ClientConfig, HttpTransport, NewRecipe, RecipeClient, RecipeId,
    RecipeView, RequestKind, RequestState, SqliteStorage,
};
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(name = "recipebook")]
#[command(about = "Recipe book client with local starred recipes")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
enum Command {
    /// Print the core library version.
    Version,
    /// List recipes of one partition.
    List {
        #[arg(long, default_value_t = false)]
        vegetarian: bool,
    },
    /// Add a recipe on the server.
    Add {
        #[arg(required = true, num_args = 1..)]
        title: Vec<String>,
        #[arg(long, default_value_t = false)]
        vegetarian: bool,
    },
    /// Mark a recipe as starred on this device.
    Star { id: String },
    /// Clear the starred mark of a recipe on this device.
    Unstar { id: String },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if cli.command == Command::Version {
        println!("recipebook_core version={}", core_version());
        return ExitCode::SUCCESS;
    }

    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            error!("event=cli_exit module=cli status=error error={message}");
            eprintln!("{message}");
            ExitCode::FAILURE
        }
    }
}

fn run(command: Command) -> Result<(), String> {
    let config = ClientConfig::load().map_err(|err| err.to_string())?;
    if let Err(err) = init_logging(&config.log_level, config.log_dir()) {
        eprintln!("logging disabled: {err}");
    }

    std::fs::create_dir_all(&config.data_dir).map_err(|err| {
        format!(
            "failed to create data directory `{}`: {err}",
            config.data_dir.display()
        )
    })?;
    let conn = open_db(config.database_path()).map_err(|err| err.to_string())?;
    let transport =
        HttpTransport::new(&config.endpoint, config.request_timeout).map_err(|err| err.to_string())?;
    let mut client = RecipeClient::new(transport, SqliteStorage::new(&conn));

    match command {
        Command::Version => Ok(()),
        Command::List { vegetarian } => {
            let mut state = RequestState::Pending;
            report_progress(&state, RequestKind::Query);
            state.settle_query(client.recipes(vegetarian));
            print_list(&state)
        }
        Command::Add { title, vegetarian } => {
            let mut state = RequestState::Pending;
            report_progress(&state, RequestKind::Mutation);
            state.settle_mutation(client.add_recipe(&NewRecipe::new(title.join(" "), vegetarian)));
            match (&state, state.placeholder(RequestKind::Mutation)) {
                (RequestState::Ready(recipe), None) => {
                    println!("added {} ({})", recipe.title, recipe.id);
                    Ok(())
                }
                (_, Some(message)) => Err(message),
                (_, None) => Ok(()),
            }
        }
        Command::Star { id } => set_starred(&mut client, id, true),
        Command::Unstar { id } => set_starred(&mut client, id, false),
    }
}

fn set_starred(
    client: &mut RecipeClient<HttpTransport, SqliteStorage<'_>>,
    id: String,
    starred: bool,
) -> Result<(), String> {
    let mut state = RequestState::Pending;
    state.settle_mutation(client.update_recipe_starred(&RecipeId::new(id.clone()), starred));
    match state.placeholder(RequestKind::Mutation) {
        Some(message) => Err(message),
        None => {
            println!("{} {id}", if starred { "starred" } else { "unstarred" });
            Ok(())
        }
    }
}

fn report_progress<T>(state: &RequestState<T>, kind: RequestKind) {
    if let Some(text) = state.placeholder(kind) {
        eprintln!("{text}");
    }
}

fn print_list(state: &RequestState<Vec<RecipeView>>) -> Result<(), String> {
    if let Some(message) = state.placeholder(RequestKind::Query) {
        return Err(message);
    }
    for recipe in state.data().into_iter().flatten() {
        let marker = if recipe.is_starred() { "*" } else { " " };
        println!("[{marker}] {} {}", recipe.id, recipe.title);
    }
    Ok(())
}
