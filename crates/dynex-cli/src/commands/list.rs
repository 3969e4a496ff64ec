//! Commands command

use dynex_core::errors::{ExError, ExErrorKind};

pub fn execute() -> super::CommandResult {
    let registry = dynex_voss::registry();
    if registry.is_empty() {
        return Err(ExError::new(ExErrorKind::Internal)
            .with_op("list_commands")
            .with_message("no parsers registered"));
    }
    for command in registry.commands() {
        println!("{}", command);
    }
    Ok(())
}
