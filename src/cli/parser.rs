use clap::{Parser, Subcommand, ValueEnum};

/// Command-line interface definition for hydroledger
/// CLI application to track water intake with SQLite
#[derive(Parser)]
#[command(
    name = "hydroledger",
    version = env!("CARGO_PKG_VERSION"),
    about = "A local hydration ledger: log water intake, track your daily goal and keep reminders in sync",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Run in test mode (no config file update, no confirmation prompts)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Toggle {
    On,
    Off,
}

impl Toggle {
    pub fn enabled(self) -> bool {
        matches!(self, Toggle::On)
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and configuration
    Init,

    /// Manage the configuration file (view or edit)
    Config {
        #[arg(long = "print", help = "Print the current configuration")]
        print_config: bool,

        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/notepad)"
        )]
        edit_config: bool,

        #[arg(
            long = "editor",
            help = "Specify the editor to use (vim, nano, or custom path)"
        )]
        editor: Option<String>,
    },

    /// Manage the database (migrations, integrity checks, etc.)
    Db {
        #[arg(long = "migrate", help = "Run pending database migrations")]
        migrate: bool,

        #[arg(long = "check", help = "Check database integrity")]
        check: bool,

        #[arg(long = "vacuum", help = "Optimize the database using VACUUM")]
        vacuum: bool,

        #[arg(long = "info", help = "Show database information")]
        info: bool,
    },

    /// Print the internal log table
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },

    /// Log a drink. Without an amount, one cup of the configured size is logged
    Add {
        /// Amount in millilitres
        #[arg(allow_negative_numbers = true)]
        amount: Option<i64>,

        #[arg(
            long = "at",
            value_name = "YYYY-MM-DD HH:MM",
            help = "Record the drink at a past local date and time"
        )]
        at: Option<String>,
    },

    /// Delete one intake event by id
    Del {
        /// Event id (see `list --events`)
        id: i64,
    },

    /// Delete the whole intake history
    Clear {
        #[arg(long = "yes", short = 'y', help = "Do not ask for confirmation")]
        yes: bool,
    },

    /// Show today's total and goal progress
    Today {
        #[arg(long = "json", help = "Print as JSON")]
        json: bool,
    },

    /// List intake history grouped by day
    List {
        #[arg(long = "days", help = "Only the N most recent days with drinks")]
        days: Option<usize>,

        #[arg(long = "events", help = "Flat list of every event, newest first")]
        events: bool,

        #[arg(long = "json", help = "Print as JSON")]
        json: bool,
    },

    /// Create the user profile
    Onboard {
        #[arg(long = "gender", default_value = "Male")]
        gender: String,

        #[arg(long = "age")]
        age: i32,

        #[arg(long = "weight", help = "Body weight in kg")]
        weight: i32,

        #[arg(long = "height", help = "Height in cm")]
        height: i32,

        #[arg(long = "sleep", default_value = "23:00", help = "Sleep time (HH:MM)")]
        sleep: String,

        #[arg(long = "wake", default_value = "07:00", help = "Wake-up time (HH:MM)")]
        wake: String,

        #[arg(
            long = "goal",
            help = "Daily goal in mL (default: weight × 33, max 10000)"
        )]
        goal: Option<i32>,

        #[arg(long = "cup", help = "Cup size in mL (default: 250)")]
        cup: Option<i32>,
    },

    /// Show or edit the user profile
    Profile {
        #[arg(long = "goal", help = "Daily goal in mL (max 10000)")]
        goal: Option<i32>,

        #[arg(long = "cup", help = "Cup size in mL")]
        cup: Option<i32>,

        #[arg(long = "interval", help = "Reminder interval in minutes (min 15)")]
        interval: Option<i32>,

        #[arg(long = "notifications", value_enum, help = "Turn reminders on or off")]
        notifications: Option<Toggle>,

        #[arg(long = "sleep", help = "Sleep time (HH:MM)")]
        sleep: Option<String>,

        #[arg(long = "wake", help = "Wake-up time (HH:MM)")]
        wake: Option<String>,

        #[arg(long = "json", help = "Print as JSON")]
        json: bool,
    },

    /// Inspect or run the reminder schedule
    Remind {
        #[arg(long = "status", help = "Show the current reminder registration")]
        status: bool,

        #[arg(long = "sync", help = "Re-sync the registration with the profile")]
        sync: bool,

        #[arg(long = "run", help = "Post reminders in this terminal until cancelled")]
        run: bool,

        #[arg(long = "ticks", requires = "run", help = "Stop after N reminders")]
        ticks: Option<u64>,

        #[arg(long = "every-secs", requires = "run", hide = true)]
        every_secs: Option<u64>,
    },

    /// Show the current weather
    Weather {
        #[arg(long = "lat", allow_negative_numbers = true)]
        lat: Option<f64>,

        #[arg(long = "lon", allow_negative_numbers = true)]
        lon: Option<f64>,
    },
}
