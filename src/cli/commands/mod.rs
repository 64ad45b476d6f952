use std::{collections::HashMap, fmt, str::FromStr};

use rust_decimal::Decimal;

pub mod budget;
pub mod system;

use crate::cli::core::CommandError;
use crate::ledger::Bucket;

const MAX_SUGGESTION_DISTANCE: usize = 2;

pub(crate) fn all_definitions() -> Vec<CommandDefinition> {
    let mut commands = Vec::new();
    commands.extend(system::definitions());
    commands.extend(budget::definitions());
    commands
}

/// A fully validated request, ready to run against the ledger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help { topic: Option<String> },
    Overview,
    Add { group: Group, amount: Decimal },
    Subtract { group: Group, amount: Decimal },
    Push { bucket: Bucket, amount: Decimal },
    Pull { bucket: Bucket, amount: Decimal },
    Percentages {
        needs: Decimal,
        wants: Decimal,
        savings: Decimal,
    },
    Reset,
}

/// Which cumulative counter `add`/`subtract` touches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Group {
    Income,
    Expense,
}

impl fmt::Display for Group {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Group::Income => f.write_str("income"),
            Group::Expense => f.write_str("expense"),
        }
    }
}

impl FromStr for Group {
    type Err = ();

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_lowercase().as_str() {
            "income" => Ok(Group::Income),
            "expense" => Ok(Group::Expense),
            _ => Err(()),
        }
    }
}

pub type CommandParser = fn(&[&str]) -> Result<Command, CommandError>;

#[derive(Clone)]
pub struct CommandDefinition {
    pub name: &'static str,
    pub description: &'static str,
    pub usage: &'static str,
    pub min_args: usize,
    pub parser: CommandParser,
}

impl CommandDefinition {
    pub const fn new(
        name: &'static str,
        description: &'static str,
        usage: &'static str,
        min_args: usize,
        parser: CommandParser,
    ) -> Self {
        Self {
            name,
            description,
            usage,
            min_args,
            parser,
        }
    }

    /// Checks arity, then hands the arguments to the command's parser.
    pub fn parse(&self, args: &[&str]) -> Result<Command, CommandError> {
        if args.len() < self.min_args {
            return Err(CommandError::MissingArguments {
                command: self.name,
                usage: self.usage,
            });
        }
        (self.parser)(args)
    }
}

pub struct CommandRegistry {
    commands: HashMap<&'static str, CommandDefinition>,
    order: Vec<&'static str>,
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::new(all_definitions())
    }
}

impl CommandRegistry {
    pub fn new(definitions: Vec<CommandDefinition>) -> Self {
        let mut commands = HashMap::new();
        let mut order = Vec::new();
        for definition in definitions {
            order.push(definition.name);
            commands.insert(definition.name, definition);
        }
        Self { commands, order }
    }

    /// Case-insensitive lookup.
    pub fn get(&self, name: &str) -> Option<&CommandDefinition> {
        self.commands.get(name.to_ascii_lowercase().as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &CommandDefinition> {
        self.order
            .iter()
            .filter_map(move |name| self.commands.get(name))
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.order.iter().copied()
    }

    /// Turns a tokenized line into a [`Command`].
    pub fn parse(&self, tokens: &[String]) -> Result<Command, CommandError> {
        let Some((raw, rest)) = tokens.split_first() else {
            return Err(CommandError::UnknownCommand {
                input: String::new(),
                suggestion: None,
            });
        };
        let definition = self.get(raw).ok_or_else(|| CommandError::UnknownCommand {
            input: raw.clone(),
            suggestion: self.suggest(raw),
        })?;
        let args: Vec<&str> = rest.iter().map(String::as_str).collect();
        definition.parse(&args)
    }

    /// Closest known command name within a small edit distance.
    pub fn suggest(&self, input: &str) -> Option<&'static str> {
        let needle = input.to_ascii_lowercase();
        self.names()
            .map(|name| (strsim::levenshtein(name, &needle), name))
            .filter(|(distance, _)| *distance <= MAX_SUGGESTION_DISTANCE)
            .min_by_key(|(distance, _)| *distance)
            .map(|(_, name)| name)
    }
}

/// Plain decimals, or exponent forms such as `1e3`.
pub(crate) fn parse_amount(token: &str) -> Result<Decimal, CommandError> {
    let trimmed = token.trim();
    Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .map_err(|_| CommandError::InvalidNumber(token.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(line: &str) -> Vec<String> {
        line.split_whitespace().map(String::from).collect()
    }

    fn dec(value: &str) -> Decimal {
        value.parse().unwrap()
    }

    #[test]
    fn registry_lists_the_fixed_command_set_in_order() {
        let registry = CommandRegistry::default();
        let names: Vec<_> = registry.names().collect();
        assert_eq!(
            names,
            vec![
                "help",
                "overview",
                "add",
                "subtract",
                "push",
                "pull",
                "percentages",
                "reset"
            ]
        );
    }

    #[test]
    fn command_names_are_case_insensitive() {
        let registry = CommandRegistry::default();
        assert_eq!(
            registry.parse(&tokens("ADD Income 10")).unwrap(),
            Command::Add {
                group: Group::Income,
                amount: dec("10"),
            }
        );
        assert_eq!(
            registry.parse(&tokens("Push SAVINGS 2.5")).unwrap(),
            Command::Push {
                bucket: Bucket::Savings,
                amount: dec("2.5"),
            }
        );
    }

    #[test]
    fn unknown_command_offers_suggestion() {
        let registry = CommandRegistry::default();
        match registry.parse(&tokens("overveiw")) {
            Err(CommandError::UnknownCommand { input, suggestion }) => {
                assert_eq!(input, "overveiw");
                assert_eq!(suggestion, Some("overview"));
            }
            other => panic!("expected unknown command, got {other:?}"),
        }
        assert!(matches!(
            registry.parse(&tokens("foo bar")),
            Err(CommandError::UnknownCommand { suggestion: None, .. })
        ));
    }

    #[test]
    fn short_lines_report_missing_arguments() {
        let registry = CommandRegistry::default();
        for line in ["add income", "subtract", "push needs", "pull", "percentages 50 50"] {
            assert!(
                matches!(
                    registry.parse(&tokens(line)),
                    Err(CommandError::MissingArguments { .. })
                ),
                "`{line}` should be missing arguments"
            );
        }
    }

    #[test]
    fn amount_is_validated_before_group() {
        let registry = CommandRegistry::default();
        assert!(matches!(
            registry.parse(&tokens("add salary ten")),
            Err(CommandError::InvalidNumber(token)) if token == "ten"
        ));
        assert!(matches!(
            registry.parse(&tokens("add salary 10")),
            Err(CommandError::InvalidGroup { .. })
        ));
        assert!(matches!(
            registry.parse(&tokens("pull income 10")),
            Err(CommandError::InvalidGroup { .. })
        ));
    }

    #[test]
    fn percentages_require_three_numbers() {
        let registry = CommandRegistry::default();
        assert_eq!(
            registry.parse(&tokens("percentages 40 40 20")).unwrap(),
            Command::Percentages {
                needs: dec("40"),
                wants: dec("40"),
                savings: dec("20"),
            }
        );
        assert!(matches!(
            registry.parse(&tokens("percentages 40 forty 20")),
            Err(CommandError::InvalidNumber(_))
        ));
    }

    #[test]
    fn amounts_accept_exponent_notation() {
        assert_eq!(parse_amount("1e3").unwrap(), dec("1000"));
        assert_eq!(parse_amount("2.5e-1").unwrap(), dec("0.25"));
        assert_eq!(parse_amount("12.50").unwrap(), dec("12.5"));
        for token in ["ten", "1e", "nan", "inf", ""] {
            assert!(
                matches!(parse_amount(token), Err(CommandError::InvalidNumber(_))),
                "`{token}` should not parse"
            );
        }
    }

    #[test]
    fn help_topic_is_optional() {
        let registry = CommandRegistry::default();
        assert_eq!(
            registry.parse(&tokens("help")).unwrap(),
            Command::Help { topic: None }
        );
        assert_eq!(
            registry.parse(&tokens("help PUSH")).unwrap(),
            Command::Help {
                topic: Some("push".into())
            }
        );
    }
}
