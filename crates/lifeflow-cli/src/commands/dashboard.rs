use chrono::Local;
use lifeflow_core::features::dashboard::{headline, long_date};
use lifeflow_core::features::expenses::format_amount;
use lifeflow_core::features::DashboardSummary;

use crate::commands::common::Connection;
use crate::error::CliError;

pub async fn run_dashboard(connection: &Connection) -> Result<(), CliError> {
    let signed_in = connection.signed_in().await?;
    let now = Local::now();
    let summary = DashboardSummary::load(&signed_in.store, &signed_in.user, now.date_naive()).await?;

    println!("{}", headline(&signed_in.user, now));
    println!("{}", long_date(now.date_naive()));
    println!();
    for line in format_summary_lines(&summary) {
        println!("{line}");
    }
    Ok(())
}

pub fn format_summary_lines(summary: &DashboardSummary) -> Vec<String> {
    vec![
        format!(
            "Tasks      {} of {} completed",
            summary.tasks_completed, summary.task_count
        ),
        format!("Expenses   {} spent", format_amount(summary.expense_total)),
        format!(
            "Habits     {}/{} done today",
            summary.habits_done_today, summary.habit_count
        ),
        format!("Bookmarks  {} saved", summary.bookmark_count),
    ]
}
