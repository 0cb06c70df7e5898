use crate::domain::sequence::Sequence;
use crate::domain::user::User;
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "lifu-records")]
#[command(about = "Inspect and write pulse sequence and user records")]
pub struct Cli {
    /// Path to a TOML settings file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Pulse sequence records
    #[command(subcommand)]
    Sequence(SequenceCommand),

    /// User account records
    #[command(subcommand)]
    User(UserCommand),
}

#[derive(Debug, Clone, Subcommand)]
pub enum SequenceCommand {
    /// Print the parameter table
    Table {
        /// Read the sequence from a JSON file instead of the flags
        #[arg(
            long,
            conflicts_with_all = [
                "pulse_interval",
                "pulse_count",
                "pulse_train_interval",
                "pulse_train_count"
            ]
        )]
        from: Option<PathBuf>,

        #[arg(long, value_enum, default_value_t = TableFormat::Text)]
        format: TableFormat,

        #[command(flatten)]
        params: SequenceArgs,
    },

    /// Write a sequence JSON file
    Save {
        path: PathBuf,

        #[command(flatten)]
        params: SequenceArgs,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TableFormat {
    Text,
    Csv,
    Tsv,
}

#[derive(Debug, Clone, Args)]
pub struct SequenceArgs {
    /// Interval between pulses (s)
    #[arg(long, default_value_t = 1.0)]
    pub pulse_interval: f64,

    #[arg(long, default_value_t = 1)]
    pub pulse_count: u32,

    /// Interval between pulse trains (s)
    #[arg(long, default_value_t = 1.0)]
    pub pulse_train_interval: f64,

    #[arg(long, default_value_t = 1)]
    pub pulse_train_count: u32,
}

impl From<&SequenceArgs> for Sequence {
    fn from(args: &SequenceArgs) -> Self {
        Sequence::new(
            args.pulse_interval,
            args.pulse_count,
            args.pulse_train_interval,
            args.pulse_train_count,
        )
    }
}

#[derive(Debug, Clone, Subcommand)]
pub enum UserCommand {
    /// Print a user file as JSON
    Show {
        path: PathBuf,

        /// Print without whitespace (overrides the settings file)
        #[arg(long)]
        compact: bool,
    },

    /// Write a user file, by default to `<users_dir>/<id>/<id>.json`
    Save {
        #[command(flatten)]
        user: UserArgs,

        /// Explicit output file
        #[arg(long)]
        path: Option<PathBuf>,
    },
}

#[derive(Debug, Clone, Args)]
pub struct UserArgs {
    #[arg(long, default_value = "user")]
    pub id: String,

    #[arg(long, default_value = "User")]
    pub name: String,

    #[arg(long, default_value = "")]
    pub description: String,

    /// Repeat for several roles; omit to leave roles unset
    #[arg(long = "role")]
    pub roles: Vec<String>,

    #[arg(long)]
    pub password_hash: Option<String>,
}

impl From<&UserArgs> for User {
    fn from(args: &UserArgs) -> Self {
        let mut user = User::new(args.id.clone())
            .with_name(args.name.clone())
            .with_description(args.description.clone());
        if let Some(hash) = &args.password_hash {
            user = user.with_password_hash(hash.clone());
        }
        if !args.roles.is_empty() {
            user = user.with_roles(args.roles.iter().cloned());
        }
        user
    }
}
