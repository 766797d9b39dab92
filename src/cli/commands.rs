//! Command handlers for the finplan shell.

use crate::{
    config::Config,
    core::{services::SummaryService, LedgerManager},
    currency::format_amount,
    ledger::{canonical_category, TransactionId, TransactionKind},
    utils::build_info,
};

use super::output;
use super::registry::{CommandEntry, CommandRegistry};
use super::shell_context::{CommandError, CommandResult, ShellContext};

pub(crate) fn registry() -> CommandRegistry {
    let mut registry = CommandRegistry::default();
    registry.register(CommandEntry::new(
        "summary",
        "Show balance, income and expense totals",
        "summary",
        cmd_summary,
    ));
    registry.register(CommandEntry::new(
        "list",
        "List recorded transactions in insertion order",
        "list",
        cmd_list,
    ));
    registry.register(CommandEntry::new(
        "add",
        "Record a transaction",
        "add <income|expense> <amount> <category> <description...>",
        cmd_add,
    ));
    registry.register(CommandEntry::new(
        "remove",
        "Delete a transaction by id",
        "remove <id>",
        cmd_remove,
    ));
    registry.register(CommandEntry::new(
        "categories",
        "Show the category vocabulary",
        "categories [income|expense]",
        cmd_categories,
    ));
    registry.register(CommandEntry::new(
        "breakdown",
        "Totals per category with chart colours",
        "breakdown [income|expense]",
        cmd_breakdown,
    ));
    registry.register(CommandEntry::new(
        "config",
        "Show or change settings",
        "config [set <field> <value>]",
        cmd_config,
    ));
    registry.register(CommandEntry::new(
        "version",
        "Show build information",
        "version",
        cmd_version,
    ));
    registry.register(CommandEntry::new(
        "help",
        "List commands or show usage for one",
        "help [command]",
        cmd_help,
    ));
    registry.register(CommandEntry::new("exit", "Leave the shell", "exit", cmd_exit));
    registry.alias("delete", "remove");
    registry.alias("rm", "remove");
    registry.alias("ls", "list");
    registry.alias("quit", "exit");
    registry
}

fn cmd_summary(ctx: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let summary = SummaryService::summarize(ctx.manager.ledger());
    let symbol = ctx.config.currency_symbol.as_str();
    output::section("Dashboard");
    println!("Balance:  {}", output::toned_amount(summary.balance, symbol));
    println!("Income:   {}", output::toned_amount(summary.total_income, symbol));
    println!(
        "Expenses: {}",
        output::toned_amount(-summary.total_expense, symbol)
    );
    println!("Entries:  {}", summary.transaction_count);
    Ok(())
}

fn cmd_list(ctx: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let transactions = ctx.manager.transactions();
    if transactions.is_empty() {
        output::info("No transactions recorded yet.");
        return Ok(());
    }
    let symbol = ctx.config.currency_symbol.as_str();
    let rows: Vec<Vec<String>> = transactions
        .iter()
        .map(|txn| {
            vec![
                txn.id.to_string(),
                txn.date.clone(),
                txn.kind.to_string(),
                txn.category.clone(),
                txn.description.clone(),
                format_amount(txn.signed_amount(), symbol),
            ]
        })
        .collect();
    println!(
        "{}",
        output::render_table(
            &["ID", "Date", "Type", "Category", "Description", "Amount"],
            &rows
        )
    );
    Ok(())
}

fn cmd_add(ctx: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [kind, amount, category, description @ ..] = args else {
        return Err(usage("add"));
    };
    let kind: TransactionKind = kind.parse()?;
    let category = canonical_category(kind, category).unwrap_or(*category);
    let description = description.join(" ");
    let txn = ctx.manager.append(&description, amount, kind, category)?;
    output::success(format!(
        "Added {} `{}` for {} (id {})",
        txn.kind,
        txn.description,
        format_amount(txn.amount, &ctx.config.currency_symbol),
        txn.id
    ));
    Ok(())
}

fn cmd_remove(ctx: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [raw_id] = args else {
        return Err(usage("remove"));
    };
    let id: TransactionId = raw_id
        .trim()
        .parse()
        .map_err(|_| CommandError::InvalidArguments(format!("`{raw_id}` is not a valid id")))?;
    let description = ctx
        .manager
        .ledger()
        .get(id)
        .map(|txn| txn.description.clone());
    if ctx.manager.remove(id)? {
        let description = description.unwrap_or_default();
        output::success(format!("Removed `{description}` (id {id})"));
    } else {
        output::warning(format!("No transaction with id {id}"));
    }
    Ok(())
}

fn cmd_categories(_ctx: &mut ShellContext, args: &[&str]) -> CommandResult {
    for kind in kinds_from_args(args, &[TransactionKind::Income, TransactionKind::Expense])? {
        output::section(format!("{} categories", kind));
        for name in LedgerManager::categories_for(kind) {
            println!("  {name}");
        }
    }
    Ok(())
}

fn cmd_breakdown(ctx: &mut ShellContext, args: &[&str]) -> CommandResult {
    let symbol = ctx.config.currency_symbol.as_str();
    for kind in kinds_from_args(args, &[TransactionKind::Expense])? {
        output::section(format!("{} by category", kind));
        let rows = SummaryService::category_breakdown(ctx.manager.ledger(), kind);
        if rows.is_empty() {
            output::info(format!("No {kind} recorded yet."));
            continue;
        }
        for row in rows {
            println!(
                "{} {:<16} {:>12} {:>6.1}%",
                output::swatch(row.color),
                row.category,
                format_amount(row.total, symbol),
                row.share * 100.0
            );
        }
    }
    Ok(())
}

fn cmd_config(ctx: &mut ShellContext, args: &[&str]) -> CommandResult {
    match args {
        [] => {
            output::section("Configuration");
            for (field, value) in ctx.config.entries() {
                println!("  {field} = {value}");
            }
            output::hint(format!("Stored at {}", ctx.config_manager.path().display()));
            Ok(())
        }
        ["set", field, value] => {
            let mut updated: Config = ctx.config.clone();
            updated.set_field(field, value)?;
            ctx.config_manager.save(&updated)?;
            ctx.config = updated;
            output::success(format!("{field} updated"));
            if *field != "currency_symbol" {
                output::hint("The new value takes effect the next time the shell starts.");
            }
            Ok(())
        }
        _ => Err(usage("config")),
    }
}

fn cmd_version(_ctx: &mut ShellContext, _args: &[&str]) -> CommandResult {
    output::info(build_info::current().summary());
    Ok(())
}

fn cmd_help(ctx: &mut ShellContext, args: &[&str]) -> CommandResult {
    if let [name] = args {
        let entry = ctx
            .registry()
            .get(&name.to_lowercase())
            .ok_or_else(|| CommandError::InvalidArguments(format!("Unknown command `{name}`")))?;
        println!("{}\n  usage: {}", entry.description, entry.usage);
        return Ok(());
    }
    output::section("Commands");
    for entry in ctx.registry().list() {
        println!("  {:<12} {}", entry.name, entry.description);
    }
    Ok(())
}

fn cmd_exit(_ctx: &mut ShellContext, _args: &[&str]) -> CommandResult {
    Err(CommandError::ExitRequested)
}

fn usage(command: &str) -> CommandError {
    let usage = registry()
        .get(command)
        .map(|entry| entry.usage)
        .unwrap_or(command);
    CommandError::InvalidArguments(format!("Usage: {usage}"))
}

fn kinds_from_args(
    args: &[&str],
    default: &[TransactionKind],
) -> Result<Vec<TransactionKind>, CommandError> {
    match args {
        [] => Ok(default.to_vec()),
        [kind] => Ok(vec![kind.parse::<TransactionKind>()?]),
        _ => Err(CommandError::InvalidArguments(
            "expected at most one of: income, expense".into(),
        )),
    }
}
