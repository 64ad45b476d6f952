use super::{Command, CommandDefinition};
use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::help;
use crate::cli::io;

pub(crate) fn definitions() -> Vec<CommandDefinition> {
    vec![CommandDefinition::new(
        "help",
        "Show available commands",
        "help [command]",
        0,
        parse_help,
    )]
}

fn parse_help(args: &[&str]) -> Result<Command, CommandError> {
    Ok(Command::Help {
        topic: args.first().map(|name| name.to_ascii_lowercase()),
    })
}

pub(crate) fn cmd_help(context: &mut ShellContext, topic: Option<&str>) -> CommandResult {
    if let Some(name) = topic {
        match context.command(name) {
            Some(entry) => help::print_command(entry),
            None => io::print_warning(format!(
                "Unknown command `{}`. Type `help` to see available commands.",
                name
            )),
        }
        return Ok(());
    }

    help::print_overview(&context.registry);
    Ok(())
}
