//! Error handling and display for the CLI.

use std::path::PathBuf;

use colored::Colorize;
use thiserror::Error;
use tuid::IdError;

/// CLI-specific errors.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("Registry file not found: {}", .0.display())]
    RegistryNotFound(PathBuf),

    #[error("Invalid timestamp '{input}': {reason}")]
    InvalidTimestamp { input: String, reason: String },

    #[error(transparent)]
    Id(#[from] IdError),
}

/// Print an error in a user-friendly format.
pub fn print_error(err: &anyhow::Error) {
    eprintln!("{} {:#}", "Error:".red().bold(), err);

    if let Some(hint) = hint_for(err) {
        eprintln!("\n{}", hint.yellow());
    }
}

fn hint_for(err: &anyhow::Error) -> Option<&'static str> {
    let id_err = err.downcast_ref::<IdError>().or_else(|| {
        err.downcast_ref::<CliError>().and_then(|e| match e {
            CliError::Id(inner) => Some(inner),
            _ => None,
        })
    });

    if let Some(id_err) = id_err {
        return match id_err {
            IdError::UndefinedType(_) | IdError::UndefinedPrefix(_) => Some(
                "Hint: Add the type to your registry file, or pass --registry. Run `tuid types` to see what is loaded.",
            ),
            IdError::InvalidPrefixed(_) | IdError::InvalidStandard(_) | IdError::InvalidUuid(_) => {
                Some("Hint: Expected `<prefix>_<22 base32hex chars>` or `xxxxxxxx-xxxx-8xxx-xxxx-xxxxxxxxxxxx`.")
            }
            IdError::OutOfBoundType(_) => Some("Hint: Type codes range from 0 to 2047."),
            _ => None,
        };
    }

    match err.downcast_ref::<CliError>() {
        Some(CliError::RegistryNotFound(_)) => {
            Some("Hint: Check the --registry flag or the TUID_REGISTRY environment variable.")
        }
        Some(CliError::InvalidTimestamp { .. }) => {
            Some("Hint: Timestamps use RFC 3339, e.g. 2024-05-19T06:35:01.391Z.")
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;

    #[test]
    fn test_hint_for_registry_errors() {
        let err = anyhow::Error::from(IdError::UndefinedPrefix("proj".into()));
        assert!(hint_for(&err).unwrap().contains("registry"));

        let err = anyhow::Error::from(CliError::Id(IdError::UndefinedType(20)));
        assert!(hint_for(&err).unwrap().contains("registry"));
    }

    #[test]
    fn test_hint_survives_context() {
        let result: Result<(), IdError> = Err(IdError::OutOfBoundType(5000));
        let err = result.context("Failed to generate").unwrap_err();
        assert_eq!(hint_for(&err), Some("Hint: Type codes range from 0 to 2047."));
    }

    #[test]
    fn test_no_hint_for_other_errors() {
        let err = anyhow::anyhow!("boom");
        assert!(hint_for(&err).is_none());
    }
}
