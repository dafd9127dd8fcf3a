use lifeflow_core::features::expenses::format_amount;
use lifeflow_core::features::ExpenseLedger;

use crate::cli::ExpenseCommands;
use crate::commands::common::{format_expense_lines, print_json, resolve_row_id, Connection};
use crate::error::CliError;

pub async fn run_expenses(
    command: Option<ExpenseCommands>,
    connection: &Connection,
) -> Result<(), CliError> {
    let signed_in = connection.signed_in().await?;
    let mut ledger = ExpenseLedger::new(signed_in.store, &signed_in.user);
    ledger.fetch().await?;

    match command.unwrap_or(ExpenseCommands::List { json: false }) {
        ExpenseCommands::List { json } => {
            if json {
                return print_json(ledger.expenses());
            }
            println!("Total spent: {}", format_amount(ledger.total()));
            for line in format_expense_lines(ledger.expenses()) {
                println!("{line}");
            }
        }
        ExpenseCommands::Add { item, price } => {
            let expense = ledger.add(&item, &price).await?;
            println!(
                "Expense added! {} {}",
                expense.item_name,
                format_amount(expense.price)
            );
            println!("Total spent: {}", format_amount(ledger.total()));
        }
        ExpenseCommands::Delete { id } => {
            let id = resolve_row_id(ledger.expenses(), &id)?;
            ledger.delete(id).await?;
            println!("Expense deleted");
        }
    }
    Ok(())
}
