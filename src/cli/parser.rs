use crate::export::ExportFormat;
use clap::{Args, Parser, Subcommand};

/// Command-line interface definition for SamiPro
/// HR and payroll manager backed by SQLite
#[derive(Parser)]
#[command(
    name = "samipro",
    version = env!("CARGO_PKG_VERSION"),
    about = "SamiPro ERP: workers, payroll, payday alerts and reports from the command line",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    /// Pretend today is this date (YYYY-MM-DD)
    #[arg(global = true, long = "today", hide = true, value_name = "DATE")]
    pub today: Option<String>,

    /// Act as this user: a supervisor username or a worker iqama (default: manager)
    #[arg(global = true, long = "as", value_name = "USER")]
    pub login: Option<String>,

    /// Password of the --as user
    #[arg(global = true, long = "password", requires = "login")]
    pub password: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and configuration
    Init,

    /// Manage the configuration file (view, check or edit)
    Config {
        #[arg(long = "print", help = "Print the current configuration file")]
        print_config: bool,

        #[arg(long = "check", help = "Check configuration file for missing fields")]
        check: bool,

        #[arg(long = "migrate", help = "Add missing fields with their default values")]
        migrate: bool,

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

        #[arg(long = "info", help = "Show database and document information")]
        info: bool,
    },

    /// Manage worker records
    Worker {
        #[command(subcommand)]
        action: WorkerCmd,
    },

    /// Payroll: due list, salary preview and payment
    Pay {
        #[command(subcommand)]
        action: PayCmd,
    },

    /// Scan all workers and raise payday reminders
    Alerts,

    /// List or manage notifications
    Notify {
        #[command(subcommand)]
        action: NotifyCmd,
    },

    /// Supervisor accounts and permissions
    Supervisor {
        #[command(subcommand)]
        action: SupervisorCmd,
    },

    /// Company branches
    Branch {
        #[command(subcommand)]
        action: BranchCmd,
    },

    /// Internal messages
    Msg {
        #[command(subcommand)]
        action: MsgCmd,
    },

    /// Worker requests (loans, vacations, certificates)
    Request {
        #[command(subcommand)]
        action: RequestCmd,
    },

    /// Self-service page of the logged-in worker
    Me,

    /// Management overview: totals, urgent payrolls, recent activity
    Dashboard,

    /// Financial report over recorded payments
    Report {
        #[arg(long, help = "Only workers of this branch")]
        branch: Option<String>,

        #[arg(long, help = "Only this worker (id or exact name)")]
        worker: Option<String>,

        #[arg(long = "type", value_name = "TYPE", help = "SALARY, ADVANCE or BONUS")]
        kind: Option<String>,

        #[arg(
            long,
            value_name = "RANGE",
            help = "Filter by year/month/day or a custom range (FROM:TO)"
        )]
        range: Option<String>,

        #[arg(long, value_enum, help = "Write the rows to a file in this format")]
        export: Option<ExportFormat>,

        #[arg(long, value_name = "FILE", requires = "export")]
        file: Option<String>,

        #[arg(long, short = 'f')]
        force: bool,
    },

    /// Save the whole document as JSON
    Backup {
        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(long)]
        compress: bool,
    },

    /// Replace all data with a backup file (.json or .zip)
    Restore {
        #[arg(long, value_name = "FILE")]
        file: String,
    },

    /// Print or clear the activity log
    Log {
        #[arg(long = "print", help = "Print the activity log")]
        print: bool,

        #[arg(long = "clear", help = "Delete every activity log entry")]
        clear: bool,
    },

    /// Delete every stored record
    Reset {
        #[arg(long, help = "Confirm the reset without prompting")]
        yes: bool,
    },

    /// Set a new password for a worker or supervisor
    Passwd {
        #[arg(long, conflicts_with = "supervisor", required_unless_present = "supervisor")]
        worker: Option<String>,

        #[arg(long)]
        supervisor: Option<String>,

        /// The new password
        new_password: String,
    },
}

/// Worker fields; omitted fields keep their current (or default) value.
#[derive(Args, Debug, Clone, Default)]
pub struct WorkerArgs {
    #[arg(long)]
    pub name: Option<String>,

    #[arg(long)]
    pub branch: Option<String>,

    #[arg(long = "job")]
    pub job_title: Option<String>,

    #[arg(long)]
    pub iqama: Option<String>,

    #[arg(long = "iqama-expiry", value_name = "DATE")]
    pub iqama_expiry_date: Option<String>,

    #[arg(long)]
    pub mobile: Option<String>,

    #[arg(long = "login-password")]
    pub login_password: Option<String>,

    #[arg(long)]
    pub bank: Option<String>,

    #[arg(long)]
    pub account: Option<String>,

    #[arg(long = "join-date", value_name = "DATE")]
    pub join_date: Option<String>,

    #[arg(long = "pay-day")]
    pub pay_day: Option<i32>,

    #[arg(long)]
    pub salary: Option<f64>,

    #[arg(long)]
    pub housing: Option<f64>,

    #[arg(long)]
    pub transport: Option<f64>,

    #[arg(long)]
    pub loan: Option<f64>,

    #[arg(long)]
    pub absences: Option<u32>,

    #[arg(long)]
    pub overtime: Option<f64>,
}

#[derive(Subcommand)]
pub enum WorkerCmd {
    /// List workers with their payday status
    List {
        #[arg(long)]
        branch: Option<String>,
    },

    /// Show one worker
    Show { id: String },

    /// Add a new worker
    Add {
        #[command(flatten)]
        fields: WorkerArgs,
    },

    /// Update a worker
    Edit {
        id: String,

        #[command(flatten)]
        fields: WorkerArgs,
    },

    /// Delete a worker (manager only)
    Del { id: String },
}

/// Overrides for the suggested payment form.
#[derive(Args, Debug, Clone, Default)]
pub struct FormArgs {
    #[arg(long)]
    pub overtime: Option<f64>,

    #[arg(long)]
    pub bonus: Option<f64>,

    #[arg(long = "absence-deduction")]
    pub absence_deduction: Option<f64>,

    #[arg(long = "loan-deduction")]
    pub loan_deduction: Option<f64>,

    #[arg(long)]
    pub notes: Option<String>,
}

#[derive(Subcommand)]
pub enum PayCmd {
    /// Unpaid workers whose payday is near or passed
    Due,

    /// Show the salary slip without paying
    Preview {
        id: String,

        #[command(flatten)]
        form: FormArgs,
    },

    /// Pay the salary
    Confirm {
        id: String,

        #[command(flatten)]
        form: FormArgs,
    },

    /// Payment history of one worker
    History { id: String },
}

#[derive(Subcommand)]
pub enum NotifyCmd {
    /// List notifications, newest first
    List {
        #[arg(long)]
        unread: bool,
    },

    /// Mark every notification as read
    Read,

    /// Delete one notification
    Del { id: String },

    /// Delete all notifications
    Clear,
}

#[derive(Subcommand)]
pub enum SupervisorCmd {
    /// Request a supervisor account (no login needed)
    Register {
        name: String,
        username: String,
        password: String,
    },

    /// List supervisor accounts
    List,

    /// Approve a supervisor
    Approve { id: String },

    /// Suspend a supervisor
    Suspend { id: String },

    /// Change one permission (toggles unless --grant or --revoke)
    Perm {
        id: String,

        /// manage_workers, process_payments, view_reports or manage_branches
        permission: String,

        #[arg(long, conflicts_with = "revoke")]
        grant: bool,

        #[arg(long)]
        revoke: bool,
    },

    /// Delete a supervisor account
    Del { id: String },
}

#[derive(Subcommand)]
pub enum BranchCmd {
    /// List branches with their head count
    List,

    /// Add a branch
    Add {
        name: String,

        #[arg(long)]
        location: Option<String>,
    },

    /// Delete a branch
    Del { id: String },
}

#[derive(Subcommand)]
pub enum MsgCmd {
    /// Send a message (`manager`, a worker id or a supervisor id)
    Send {
        to: String,
        text: String,

        #[arg(long, help = "Mark the message as a request")]
        request: bool,
    },

    /// Contacts with the latest message and unread count
    Inbox,

    /// Show a conversation and mark it read
    Chat { with: String },
}

#[derive(Subcommand)]
pub enum RequestCmd {
    /// File a request (LOAN, VACATION or CERTIFICATE)
    Submit {
        #[arg(value_name = "TYPE")]
        kind: String,

        reason: String,

        #[arg(long)]
        amount: Option<f64>,
    },

    /// Pending requests of every worker
    Pending,

    /// Approve a request
    Approve { worker: String, id: String },

    /// Reject a request
    Reject { worker: String, id: String },
}
