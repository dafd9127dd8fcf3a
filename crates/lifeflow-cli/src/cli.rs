use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use lifeflow_core::Habit;

#[derive(Parser)]
#[command(name = "lifeflow")]
#[command(about = "Tasks, expenses, habits, notes and study tools from the command line")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Supabase project URL (overrides SUPABASE_URL)
    #[arg(long, global = true, value_name = "URL")]
    pub supabase_url: Option<String>,

    /// Supabase anon/public key (overrides SUPABASE_ANON_KEY)
    #[arg(long, global = true, value_name = "KEY")]
    pub supabase_anon_key: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Sign in, sign up, sign out
    Auth {
        #[command(subcommand)]
        command: AuthCommands,
    },
    /// Greeting and a summary of your data
    Dashboard,
    /// Todo list
    #[command(alias = "todos")]
    Tasks {
        #[command(subcommand)]
        command: Option<TaskCommands>,
    },
    /// Expense log
    Expenses {
        #[command(subcommand)]
        command: Option<ExpenseCommands>,
    },
    /// Daily habits
    Habits {
        #[command(subcommand)]
        command: Option<HabitCommands>,
    },
    /// Your scratchpad note
    Notes {
        #[command(subcommand)]
        command: Option<NoteCommands>,
    },
    /// Saved links
    Bookmarks {
        #[command(subcommand)]
        command: Option<BookmarkCommands>,
    },
    /// Account details
    Profile {
        /// Sign out after showing the account
        #[arg(long)]
        sign_out: bool,
    },
    /// Exam countdown
    Countdown {
        #[command(subcommand)]
        command: Option<CountdownCommands>,
    },
    /// 25 minute pomodoro timer (Enter pauses or resumes, r resets, q quits)
    Timer {
        /// Ring the terminal bell when the session completes
        #[arg(long)]
        notify: bool,
    },
    /// List every page
    Pages,
    /// Frequently asked questions
    Faq,
    /// Generate shell completion scripts
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: CompletionShell,
        /// Optional output path (stdout when omitted)
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum CompletionShell {
    Bash,
    Zsh,
    Fish,
}

impl From<CompletionShell> for clap_complete::Shell {
    fn from(shell: CompletionShell) -> Self {
        match shell {
            CompletionShell::Bash => Self::Bash,
            CompletionShell::Zsh => Self::Zsh,
            CompletionShell::Fish => Self::Fish,
        }
    }
}

#[derive(Subcommand)]
pub enum AuthCommands {
    /// Sign in with email and password; the session is kept in the keychain
    Login {
        #[arg(long, value_name = "EMAIL")]
        email: String,
        #[arg(long, value_name = "PASSWORD")]
        password: String,
    },
    /// Create an account
    Signup {
        #[arg(long, value_name = "EMAIL")]
        email: String,
        #[arg(long, value_name = "PASSWORD")]
        password: String,
    },
    /// Show who is signed in
    Status,
    /// Sign out and clear the stored session
    Logout,
}

#[derive(Subcommand)]
pub enum TaskCommands {
    /// List tasks, newest first
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Add a task
    Add {
        /// Task title
        title: Vec<String>,
    },
    /// Mark a task done or not done
    Toggle {
        /// Task ID or unique ID prefix
        id: String,
    },
    /// Delete a task
    Delete {
        /// Task ID or unique ID prefix
        id: String,
    },
}

#[derive(Subcommand)]
pub enum ExpenseCommands {
    /// List expenses with the running total
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Log an expense
    Add {
        /// What the money was spent on
        item: String,
        /// Price, e.g. 12.50
        price: String,
    },
    /// Delete an expense
    Delete {
        /// Expense ID or unique ID prefix
        id: String,
    },
}

#[derive(Subcommand)]
pub enum HabitCommands {
    /// Show today's habits
    List,
    /// Check or uncheck a habit for today
    Toggle {
        /// Study, Water or Exercise
        habit: Habit,
    },
}

#[derive(Subcommand)]
pub enum NoteCommands {
    /// Print the note
    Show,
    /// Replace the note content
    Save {
        /// New content
        content: Vec<String>,
    },
}

#[derive(Subcommand)]
pub enum BookmarkCommands {
    /// List bookmarks
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Save a link
    Add {
        /// Display title
        title: String,
        /// Link; https:// is added when no scheme is given
        url: String,
    },
    /// Delete a bookmark
    Delete {
        /// Bookmark ID or unique ID prefix
        id: String,
    },
}

#[derive(Subcommand)]
pub enum CountdownCommands {
    /// Time left until the exam
    Show,
    /// Set the exam date
    Set {
        /// Exam date (YYYY-MM-DD)
        date: NaiveDate,
    },
    /// Keep the countdown on screen, refreshed every minute
    Watch,
}
