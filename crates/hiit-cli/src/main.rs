use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "hiit-cli", version, about = "Hiit CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a workout in the terminal
    Run(commands::run::RunArgs),
    /// Resolve raw parameters and print the execution context
    Resolve(commands::resolve::ResolveArgs),
    /// Activity scaffolding
    Activity {
        #[command(subcommand)]
        action: commands::activity::ActivityAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn main() {
    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Run(args) => commands::run::run(args),
        Commands::Resolve(args) => commands::resolve::run(args),
        Commands::Activity { action } => commands::activity::run(action),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
