//! Shell context, command execution, and the dispatch-boundary error type.

use std::io;

use rust_decimal::Decimal;

use crate::{
    config::{Config, ConfigManager},
    errors::{CliError, LedgerError, StorageError},
    ledger::Ledger,
    storage::JsonStore,
};

use super::commands::{self, budget, system, Command, CommandRegistry};
use super::io::{self as cli_io, Confirm};
use super::shell::parse_command_line;

pub use crate::cli::shell_context::{CliMode, ShellContext};

pub type CommandResult = Result<(), CommandError>;

/// Everything that can go wrong while handling one input line.
///
/// None of these end the shell; they are reported and the loop reads the next line.
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("That command does not exist: `{input}`. Please type 'help' for a list of commands.")]
    UnknownCommand {
        input: String,
        suggestion: Option<&'static str>,
    },
    #[error("Not enough arguments for `{command}`. Usage: {usage}")]
    MissingArguments {
        command: &'static str,
        usage: &'static str,
    },
    #[error("Argument `{0}` must be a number.")]
    InvalidNumber(String),
    #[error("Unknown group `{given}`. Please use {expected}.")]
    InvalidGroup {
        given: String,
        expected: &'static str,
    },
    #[error("Percentages must equal 100 (got {0}).")]
    PercentageSumInvalid(Decimal),
    #[error("Percentage {0} is outside 0..=100.")]
    PercentageOutOfRange(Decimal),
    #[error("Could not read command: {0}")]
    Parse(String),
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Dialoguer(#[from] dialoguer::Error),
}

impl From<LedgerError> for CommandError {
    fn from(err: LedgerError) -> Self {
        match err {
            LedgerError::Storage(inner) => CommandError::Storage(inner),
            LedgerError::PercentageSumInvalid { total } => CommandError::PercentageSumInvalid(total),
            LedgerError::PercentageOutOfRange { value } => {
                CommandError::PercentageOutOfRange(value)
            }
        }
    }
}

impl ShellContext {
    /// Opens the JSON-backed ledger at the location the configuration points to.
    pub fn new(mode: CliMode, manager: &ConfigManager, config: &Config) -> Result<Self, CliError> {
        let path = manager.ledger_file(config);
        tracing::info!(path = %path.display(), "opening budget ledger");
        let ledger = Ledger::open(Box::new(JsonStore::new(path)))?;
        Ok(Self::with_ledger(mode, ledger, config.decimal_places))
    }

    pub fn with_ledger(mode: CliMode, ledger: Ledger, decimal_places: u32) -> Self {
        ShellContext {
            mode,
            registry: CommandRegistry::default(),
            ledger,
            decimal_places,
            last_command: None,
        }
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub(crate) fn ledger_mut(&mut self) -> &mut Ledger {
        &mut self.ledger
    }

    pub fn decimal_places(&self) -> u32 {
        self.decimal_places
    }

    pub(crate) fn format_amount(&self, value: Decimal) -> String {
        budget::format_amount(value, self.decimal_places)
    }

    pub fn command_names(&self) -> Vec<&'static str> {
        self.registry.names().collect()
    }

    /// Tokenizes, parses, and executes one line. Blank lines are ignored.
    pub fn process_line(&mut self, line: &str, confirm: &mut dyn Confirm) -> CommandResult {
        let tokens = parse_command_line(line).map_err(|err| CommandError::Parse(err.to_string()))?;
        if tokens.is_empty() {
            return Ok(());
        }
        self.last_command = Some(line.trim().to_string());

        let command = self.registry.parse(&tokens)?;
        tracing::debug!(?command, "dispatching");
        self.execute(command, confirm)
    }

    pub fn execute(&mut self, command: Command, confirm: &mut dyn Confirm) -> CommandResult {
        match command {
            Command::Help { topic } => system::cmd_help(self, topic.as_deref()),
            Command::Overview => budget::cmd_overview(self),
            Command::Add { group, amount } => budget::cmd_add(self, group, amount),
            Command::Subtract { group, amount } => budget::cmd_subtract(self, group, amount),
            Command::Push { bucket, amount } => budget::cmd_push(self, bucket, amount),
            Command::Pull { bucket, amount } => budget::cmd_pull(self, bucket, amount),
            Command::Percentages {
                needs,
                wants,
                savings,
            } => budget::cmd_percentages(self, needs, wants, savings),
            Command::Reset => budget::cmd_reset(self, confirm),
        }
    }

    /// Turns a command failure into a one-line diagnostic (plus an optional hint).
    pub fn report_error(&self, err: CommandError) {
        tracing::debug!(error = %err, "command rejected");
        match &err {
            CommandError::UnknownCommand { suggestion, .. } => {
                cli_io::print_error(&err);
                if let Some(name) = suggestion {
                    cli_io::print_hint(format!("Did you mean `{}`?", name));
                }
            }
            CommandError::MissingArguments { command, .. } => {
                cli_io::print_error(&err);
                cli_io::print_hint(format!("Use `help {}` for usage details.", command));
            }
            CommandError::Storage(_) | CommandError::Io(_) => {
                tracing::error!(error = %err, "persisting the budget failed");
                cli_io::print_error(&err);
            }
            _ => cli_io::print_error(&err),
        }
    }

    pub(crate) fn command(&self, name: &str) -> Option<&commands::CommandDefinition> {
        self.registry.get(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        ledger::{Bucket, BudgetRecord},
        storage::MemoryStore,
    };

    struct Answer(&'static str);

    impl Confirm for Answer {
        fn confirm(&mut self, _prompt: &str) -> Result<bool, CommandError> {
            Ok(cli_io::is_affirmative(self.0))
        }
    }

    fn dec(value: &str) -> Decimal {
        value.parse().unwrap()
    }

    fn context() -> (ShellContext, MemoryStore) {
        let store = MemoryStore::new();
        let ledger = Ledger::open(Box::new(store.clone())).unwrap();
        (ShellContext::with_ledger(CliMode::Script, ledger, 2), store)
    }

    fn run(context: &mut ShellContext, line: &str) -> CommandResult {
        context.process_line(line, &mut Answer("n"))
    }

    #[test]
    fn add_income_then_overview_projects_buckets() {
        let (mut context, _) = context();
        run(&mut context, "add income 1000").unwrap();
        {
            let record = context.ledger().record();
            assert_eq!(record.income, dec("1000"));
            assert_eq!(record.total_income, dec("1000"));
        }

        run(&mut context, "overview").unwrap();
        let record = context.ledger().record();
        assert_eq!(record.balance(Bucket::Needs), dec("500"));
        assert_eq!(record.balance(Bucket::Wants), dec("300"));
        assert_eq!(record.balance(Bucket::Savings), dec("200"));
    }

    #[test]
    fn percentages_scenario() {
        let (mut context, _) = context();
        run(&mut context, "percentages 40 40 20").unwrap();
        let err = run(&mut context, "percentages 40 40 30").unwrap_err();
        assert!(matches!(err, CommandError::PercentageSumInvalid(_)));

        let record = context.ledger().record();
        assert_eq!(record.percent_needs, dec("0.4"));
        assert_eq!(record.percent_wants, dec("0.4"));
        assert_eq!(record.percent_savings, dec("0.2"));
    }

    #[test]
    fn push_beyond_balance_moves_everything() {
        let (mut context, _) = context();
        run(&mut context, "add income 1000").unwrap();
        run(&mut context, "overview").unwrap();
        run(&mut context, "push needs 9999").unwrap();

        let record = context.ledger().record();
        assert_eq!(record.balance_needs, Decimal::ZERO);
        assert_eq!(record.next_needs, dec("500"));
    }

    #[test]
    fn rejected_lines_never_touch_the_record() {
        let (mut context, store) = context();
        run(&mut context, "add income 1000").unwrap();
        let before = context.ledger().record().clone();
        let saves = store.save_count();

        for line in [
            "foo bar",
            "add",
            "add income",
            "add income lots",
            "add bonus 10",
            "push rent 10",
            "pull needs ten",
            "percentages 50 50",
            "percentages 50 x 0",
            "percentages 50 50 50",
            "percentages 150 -25 -25",
            "add \"income 10",
        ] {
            assert!(run(&mut context, line).is_err(), "`{line}` should be rejected");
        }

        assert_eq!(context.ledger().record(), &before);
        assert_eq!(store.save_count(), saves);
    }

    #[test]
    fn blank_lines_are_ignored() {
        let (mut context, store) = context();
        run(&mut context, "   ").unwrap();
        assert_eq!(store.save_count(), 0);
        assert!(context.last_command.is_none());
    }

    #[test]
    fn reset_requires_confirmation() {
        let (mut context, _) = context();
        run(&mut context, "add income 250").unwrap();

        context.process_line("reset", &mut Answer("no")).unwrap();
        assert_eq!(context.ledger().record().income, dec("250"));

        context.process_line("RESET", &mut Answer("Y")).unwrap();
        assert_eq!(context.ledger().record(), &BudgetRecord::default());
    }

    #[test]
    fn help_does_not_persist() {
        let (mut context, store) = context();
        run(&mut context, "help").unwrap();
        run(&mut context, "help push").unwrap();
        run(&mut context, "help nothing").unwrap();
        assert_eq!(store.save_count(), 0);
    }

    #[test]
    fn ledger_errors_map_to_dispatch_errors() {
        let err: CommandError = LedgerError::PercentageOutOfRange { value: dec("120") }.into();
        assert!(matches!(err, CommandError::PercentageOutOfRange(v) if v == dec("120")));
        let err: CommandError = LedgerError::Storage(StorageError::Io(io::Error::new(
            io::ErrorKind::PermissionDenied,
            "read-only",
        )))
        .into();
        assert!(matches!(err, CommandError::Storage(_)));
    }
}
