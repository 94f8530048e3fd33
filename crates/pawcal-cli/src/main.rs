use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "pawcal", version, about = "Pawcal CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Care event management
    Event {
        #[command(subcommand)]
        action: commands::event::EventAction,
    },
    /// Month-grouped agenda view
    Agenda {
        /// Tab: upcoming, overdue or history
        #[arg(long, default_value = "upcoming")]
        tab: String,
        /// Filter by pet code (bonny or nola)
        #[arg(long)]
        pet: Option<String>,
    },
    /// Export an event as an .ics reminder file
    Export {
        /// Event ID
        id: String,
        /// Output directory (defaults to the export_dir setting, then ".")
        #[arg(long)]
        dir: Option<String>,
        /// Alarm lead time in days (defaults to the default_reminder_days setting)
        #[arg(long)]
        lead_days: Option<u32>,
    },
    /// Settings management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn main() {
    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Event { action } => commands::event::run(action),
        Commands::Agenda { tab, pet } => commands::agenda::run(&tab, pet.as_deref()),
        Commands::Export { id, dir, lead_days } => commands::export::run(&id, dir, lead_days),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
