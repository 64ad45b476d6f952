use crate::ledger::Ledger;

use super::commands::CommandRegistry;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliMode {
    Interactive,
    Script,
}

impl CliMode {
    /// Script mode reads plain lines from stdin; selected by `BUCKET_BUDGET_SCRIPT`.
    pub fn from_env() -> Self {
        if std::env::var_os("BUCKET_BUDGET_SCRIPT").is_some() {
            CliMode::Script
        } else {
            CliMode::Interactive
        }
    }
}

/// Runtime state owned by the read-eval-persist loop.
pub struct ShellContext {
    pub mode: CliMode,
    pub registry: CommandRegistry,
    pub(crate) ledger: Ledger,
    pub(crate) decimal_places: u32,
    pub last_command: Option<String>,
}
