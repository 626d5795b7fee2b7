//! CLI errors

use std::path::PathBuf;

use thiserror::Error;

use storefront_app::{
    context::AppInitError,
    notices::{Notice, NoticeLevel, Outcome},
};

#[derive(Debug, Error)]
pub(crate) enum CliError {
    #[error(transparent)]
    Init(#[from] AppInitError),

    #[error("{0}")]
    Notice(Notice),

    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse {}: {source}", path.display())]
    Yaml {
        path: PathBuf,
        source: serde_norway::Error,
    },
}

impl From<Notice> for CliError {
    fn from(notice: Notice) -> Self {
        Self::Notice(notice)
    }
}

/// Print a successful outcome; warnings and errors become a [`CliError`].
pub(crate) fn report(outcome: Outcome) -> Result<(), CliError> {
    if let Some(notice) = outcome.notice {
        if notice.level != NoticeLevel::Success {
            return Err(CliError::Notice(notice));
        }

        println!("{}", notice.message);
    }

    if let Some(route) = outcome.route {
        tracing::debug!(route = route.path(), "next route");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use storefront_app::notices::Route;

    use super::*;

    #[test]
    fn warnings_fail_the_command() {
        let result = report(Outcome::notice(Notice::warning("select something")));

        assert!(
            matches!(&result, Err(CliError::Notice(notice)) if notice.message == "select something"),
            "expected notice error, got {result:?}"
        );
    }

    #[test]
    fn navigation_is_success() {
        let result = report(Outcome::navigate(Route::Payment));

        assert!(result.is_ok(), "expected success, got {result:?}");
    }
}
