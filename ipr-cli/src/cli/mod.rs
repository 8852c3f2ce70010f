//! Command-line interface definition and dispatch

pub mod commands;
pub mod output;

use std::path::PathBuf;

use anyhow::Result;
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::config::Config;
use crate::config::repository;
use crate::patents::{DateCriterion, DateField, DueWindow, PatentEdit, PatentFilter};

#[derive(Parser, Debug)]
#[command(name = "ipr", version, about = "Track the KLE patent portfolio")]
pub struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// SQLite database file (overrides config and IPR_DATABASE)
    #[arg(long, global = true, value_name = "PATH")]
    pub database: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create the database and seed it from the default workbook when empty
    Init,
    /// Import a patent register workbook
    Import(ImportArgs),
    /// Export every patent to a dated workbook
    Export(ExportArgs),
    /// List, search and filter patents
    List(ListArgs),
    /// Show one patent with its payments and source row
    Show {
        /// Application number
        application_number: String,
    },
    /// Portfolio counters and recent activity
    Stats,
    /// Patents with renewals coming up
    Renewals(RenewalsArgs),
    /// Edit a patent's fields
    Edit(EditArgs),
    /// Delete a patent and its payments
    Delete {
        application_number: String,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// Manage renewal fee payments
    #[command(subcommand)]
    Payments(PaymentCommands),
    /// Show the active configuration
    Config,
}

#[derive(Args, Debug)]
pub struct ImportArgs {
    /// Workbook to import (.xlsx, .xlsm, .xlsb, .xls, .ods)
    #[arg(required_unless_present = "default")]
    pub file: Option<PathBuf>,

    /// Import the configured default workbook
    #[arg(long, conflicts_with = "file")]
    pub default: bool,

    /// Print the import result as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Directory to write to (defaults to the configured export directory)
    #[arg(short, long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,
}

#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Table,
    Csv,
    Json,
}

#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DateFieldArg {
    #[default]
    Filed,
    Renewal,
}

impl From<DateFieldArg> for DateField {
    fn from(arg: DateFieldArg) -> Self {
        match arg {
            DateFieldArg::Filed => DateField::Filed,
            DateFieldArg::Renewal => DateField::RenewalDue,
        }
    }
}

#[derive(Args, Debug, Default)]
pub struct ListArgs {
    /// Case-insensitive search over application number, title, inventors and applicants
    #[arg(short, long)]
    pub search: Option<String>,

    /// Exact status (case-insensitive)
    #[arg(long)]
    pub status: Option<String>,

    /// Renewal window: 'overdue' or a number of days
    #[arg(long, value_name = "WINDOW")]
    pub due: Option<DueWindow>,

    /// Date the --year/--from/--to criteria apply to
    #[arg(long, value_enum, default_value_t = DateFieldArg::Filed)]
    pub date_field: DateFieldArg,

    /// Only dates in this year
    #[arg(long, conflicts_with_all = ["from", "to"])]
    pub year: Option<i32>,

    /// Earliest date (YYYY-MM-DD, inclusive)
    #[arg(long)]
    pub from: Option<NaiveDate>,

    /// Latest date (YYYY-MM-DD, inclusive)
    #[arg(long)]
    pub to: Option<NaiveDate>,

    #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,

    /// Write the listing to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Also export the listed patents to a workbook
    #[arg(long)]
    pub xlsx: bool,
}

impl ListArgs {
    pub fn filter(&self) -> PatentFilter {
        let date = match (self.year, self.from, self.to) {
            (Some(year), _, _) => Some(DateCriterion::Year(year)),
            (None, None, None) => None,
            (None, from, to) => Some(DateCriterion::Range { from, to }),
        };

        PatentFilter {
            search: self.search.clone(),
            status: self.status.clone(),
            due: self.due,
            date_field: self.date_field.into(),
            date,
        }
    }
}

#[derive(Args, Debug)]
pub struct RenewalsArgs {
    /// Look-ahead window in days
    #[arg(short, long, default_value_t = 30)]
    pub days: i64,

    /// Also export the list to a workbook
    #[arg(long)]
    pub xlsx: bool,
}

#[derive(Args, Debug)]
pub struct EditArgs {
    pub application_number: String,

    /// New application number
    #[arg(long = "application-number", value_name = "NUMBER")]
    pub new_application_number: Option<String>,

    #[arg(long)]
    pub title: Option<String>,
    #[arg(long)]
    pub inventors: Option<String>,
    #[arg(long)]
    pub applicants: Option<String>,
    #[arg(long)]
    pub status: Option<String>,
    #[arg(long, value_name = "YYYY-MM-DD")]
    pub filed: Option<NaiveDate>,
    #[arg(long, value_name = "YYYY-MM-DD")]
    pub published: Option<NaiveDate>,
    /// Remove the publication date
    #[arg(long, conflicts_with = "published")]
    pub clear_published: bool,
    #[arg(long, value_name = "YYYY-MM-DD")]
    pub granted: Option<NaiveDate>,
    /// Remove the grant date
    #[arg(long, conflicts_with = "granted")]
    pub clear_granted: bool,
    #[arg(long, value_name = "YYYY-MM-DD")]
    pub renewal_due: Option<NaiveDate>,
    #[arg(long)]
    pub fee: Option<f64>,
    /// Patent number (empty string clears it)
    #[arg(long)]
    pub patent_number: Option<String>,
    /// Certificate reference (empty string clears it)
    #[arg(long)]
    pub certificate: Option<String>,
    /// Document link (empty string clears it)
    #[arg(long)]
    pub drive_link: Option<String>,
}

impl From<EditArgs> for PatentEdit {
    fn from(args: EditArgs) -> Self {
        PatentEdit {
            application_number: args.new_application_number,
            title: args.title,
            inventors: args.inventors,
            applicants: args.applicants,
            status: args.status,
            filed_date: args.filed,
            published_date: args.published,
            granted_date: args.granted,
            renewal_due_date: args.renewal_due,
            renewal_fee: args.fee,
            patent_number: args.patent_number,
            patent_certificate: args.certificate,
            google_drive_link: args.drive_link,
            clear_published: args.clear_published,
            clear_granted: args.clear_granted,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum PaymentCommands {
    /// List payments recorded for a patent
    List { application_number: String },
    /// Record a payment
    Add {
        application_number: String,
        #[arg(long, value_name = "YYYY-MM-DD")]
        date: NaiveDate,
        #[arg(long)]
        amount: f64,
        #[arg(long)]
        method: String,
        #[arg(long, default_value = "")]
        notes: String,
    },
    /// Change fields of a recorded payment
    Update {
        id: i64,
        #[arg(long, value_name = "YYYY-MM-DD")]
        date: Option<NaiveDate>,
        #[arg(long)]
        amount: Option<f64>,
        #[arg(long)]
        method: Option<String>,
        #[arg(long)]
        notes: Option<String>,
    },
    /// Remove a payment
    Delete {
        id: i64,
        #[arg(short, long)]
        yes: bool,
    },
}

/// Run a parsed command
pub async fn run(cli: Cli, config: Config) -> Result<()> {
    // Opened per command so `config` never touches the database
    let database = || repository::connect(&config.database_path);
    let today = chrono::Local::now().date_naive();

    match cli.command {
        Commands::Config => commands::config::handle_config_command(&config),
        Commands::Init => commands::import::handle_init_command(&database().await?, &config).await,
        Commands::Import(args) => {
            commands::import::handle_import_command(&database().await?, &config, args).await
        }
        Commands::Export(args) => {
            commands::export::handle_export_command(&database().await?, &config, args).await
        }
        Commands::List(args) => {
            commands::list::handle_list_command(&database().await?, &config, args, today).await
        }
        Commands::Show { application_number } => {
            commands::show::handle_show_command(&database().await?, &application_number, today).await
        }
        Commands::Stats => commands::stats::handle_stats_command(&database().await?, today).await,
        Commands::Renewals(args) => {
            commands::renewals::handle_renewals_command(&database().await?, &config, args, today)
                .await
        }
        Commands::Edit(args) => commands::edit::handle_edit_command(&database().await?, args).await,
        Commands::Delete {
            application_number,
            yes,
        } => {
            commands::edit::handle_delete_command(&database().await?, &application_number, yes)
                .await
        }
        Commands::Payments(cmd) => {
            commands::payments::handle_payments_command(&database().await?, cmd).await
        }
    }
}
