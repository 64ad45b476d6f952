use chrono::{Datelike, Local};
use rust_decimal::Decimal;

use super::{parse_amount, Command, CommandDefinition, Group};
use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::io::{self, Confirm};
use crate::cli::output::section as output_section;
use crate::ledger::{Bucket, BudgetRecord};

const GROUP_CHOICES: &str = "either 'income' or 'expense'";
const BUCKET_CHOICES: &str = "either 'needs', 'wants', or 'savings'";
const RESET_PROMPT: &str = "Please enter 'y' to confirm";

pub(crate) fn definitions() -> Vec<CommandDefinition> {
    vec![
        CommandDefinition::new(
            "overview",
            "Show totals and this/next week balances",
            "overview",
            0,
            parse_overview,
        ),
        CommandDefinition::new(
            "add",
            "Record income or an expense",
            "add <income|expense> <amount>",
            2,
            parse_add,
        ),
        CommandDefinition::new(
            "subtract",
            "Remove recorded income or expense",
            "subtract <income|expense> <amount>",
            2,
            parse_subtract,
        ),
        CommandDefinition::new(
            "push",
            "Move a bucket balance into next week",
            "push <needs|wants|savings> <amount>",
            2,
            parse_push,
        ),
        CommandDefinition::new(
            "pull",
            "Bring next week's funds back into this week",
            "pull <needs|wants|savings> <amount>",
            2,
            parse_pull,
        ),
        CommandDefinition::new(
            "percentages",
            "Change the needs/wants/savings split",
            "percentages <needs%> <wants%> <savings%>",
            3,
            parse_percentages,
        ),
        CommandDefinition::new(
            "reset",
            "Erase all budget data (asks for confirmation)",
            "reset",
            0,
            parse_reset,
        ),
    ]
}

fn parse_group(token: &str) -> Result<Group, CommandError> {
    token.parse().map_err(|_| CommandError::InvalidGroup {
        given: token.to_string(),
        expected: GROUP_CHOICES,
    })
}

fn parse_bucket(token: &str) -> Result<Bucket, CommandError> {
    token.parse().map_err(|_| CommandError::InvalidGroup {
        given: token.to_string(),
        expected: BUCKET_CHOICES,
    })
}

fn parse_overview(_args: &[&str]) -> Result<Command, CommandError> {
    Ok(Command::Overview)
}

fn parse_reset(_args: &[&str]) -> Result<Command, CommandError> {
    Ok(Command::Reset)
}

fn parse_add(args: &[&str]) -> Result<Command, CommandError> {
    let amount = parse_amount(args[1])?;
    let group = parse_group(args[0])?;
    Ok(Command::Add { group, amount })
}

fn parse_subtract(args: &[&str]) -> Result<Command, CommandError> {
    let amount = parse_amount(args[1])?;
    let group = parse_group(args[0])?;
    Ok(Command::Subtract { group, amount })
}

fn parse_push(args: &[&str]) -> Result<Command, CommandError> {
    let amount = parse_amount(args[1])?;
    let bucket = parse_bucket(args[0])?;
    Ok(Command::Push { bucket, amount })
}

fn parse_pull(args: &[&str]) -> Result<Command, CommandError> {
    let amount = parse_amount(args[1])?;
    let bucket = parse_bucket(args[0])?;
    Ok(Command::Pull { bucket, amount })
}

fn parse_percentages(args: &[&str]) -> Result<Command, CommandError> {
    Ok(Command::Percentages {
        needs: parse_amount(args[0])?,
        wants: parse_amount(args[1])?,
        savings: parse_amount(args[2])?,
    })
}

pub(crate) fn cmd_overview(context: &mut ShellContext) -> CommandResult {
    context.ledger_mut().recalculate_balances();
    let week = Local::now().iso_week().week();
    let lines = overview_lines(context.ledger().record(), context.decimal_places());

    output_section(format!("Week {week}"));
    for line in lines {
        io::print_info(line);
    }
    Ok(())
}

/// Plain-text body of the overview report.
pub(crate) fn overview_lines(record: &BudgetRecord, places: u32) -> Vec<String> {
    let money = |value: Decimal| format_amount(value, places);
    let mut lines = vec![
        format!("Income: {}", money(record.income)),
        format!("Total income: {}", money(record.total_income)),
        format!("Total expenses: {}", money(record.total_expenses)),
        String::new(),
        "--This Week--".to_string(),
    ];
    for bucket in Bucket::ALL {
        lines.push(format!(
            "{}: {} ({}%)",
            bucket.label(),
            money(record.balance(bucket)),
            (record.percent(bucket) * Decimal::ONE_HUNDRED).normalize()
        ));
    }
    lines.push(String::new());
    lines.push("--Next Week--".to_string());
    for bucket in Bucket::ALL {
        lines.push(format!("{}: {}", bucket.label(), money(record.next(bucket))));
    }
    lines
}

pub(crate) fn format_amount(value: Decimal, places: u32) -> String {
    format!("{:.*}", places as usize, value.round_dp(places))
}

pub(crate) fn cmd_add(context: &mut ShellContext, group: Group, amount: Decimal) -> CommandResult {
    match group {
        Group::Income => context.ledger_mut().add_income(amount)?,
        Group::Expense => context.ledger_mut().add_expense(amount)?,
    }
    io::print_success(format!(
        "Added {} to {}.",
        context.format_amount(amount.max(Decimal::ZERO)),
        group
    ));
    Ok(())
}

pub(crate) fn cmd_subtract(
    context: &mut ShellContext,
    group: Group,
    amount: Decimal,
) -> CommandResult {
    match group {
        Group::Income => context.ledger_mut().subtract_income(amount)?,
        Group::Expense => context.ledger_mut().subtract_expense(amount)?,
    }
    let record = context.ledger().record();
    let remaining = match group {
        Group::Income => record.total_income,
        Group::Expense => record.total_expenses,
    };
    io::print_success(format!(
        "Subtracted from {}; total is now {}.",
        group,
        context.format_amount(remaining)
    ));
    Ok(())
}

pub(crate) fn cmd_push(context: &mut ShellContext, bucket: Bucket, amount: Decimal) -> CommandResult {
    let moved = context.ledger_mut().push(bucket, amount)?;
    io::print_success(format!(
        "Pushed {} of {} into next week.",
        context.format_amount(moved),
        bucket
    ));
    Ok(())
}

pub(crate) fn cmd_pull(context: &mut ShellContext, bucket: Bucket, amount: Decimal) -> CommandResult {
    let moved = context.ledger_mut().pull(bucket, amount)?;
    io::print_success(format!(
        "Pulled {} of {} back into this week.",
        context.format_amount(moved),
        bucket
    ));
    Ok(())
}

pub(crate) fn cmd_percentages(
    context: &mut ShellContext,
    needs: Decimal,
    wants: Decimal,
    savings: Decimal,
) -> CommandResult {
    context.ledger_mut().set_percentages(needs, wants, savings)?;
    io::print_success(format!(
        "Split set to needs {}%, wants {}%, savings {}%.",
        needs.normalize(),
        wants.normalize(),
        savings.normalize()
    ));
    Ok(())
}

pub(crate) fn cmd_reset(context: &mut ShellContext, confirm: &mut dyn Confirm) -> CommandResult {
    if !confirm.confirm(RESET_PROMPT)? {
        io::print_warning("User data reset sequence has been aborted.");
        return Ok(());
    }
    context.ledger_mut().reset()?;
    io::print_success("User data has been reset.");
    Ok(())
}
