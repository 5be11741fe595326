pub mod auth;
pub mod logging;
pub mod users;

use clap::{
    builder::styling::{AnsiColor, Effects, Styles},
    Arg, ArgMatches, ColorChoice, Command,
};

pub const ARG_API_URL: &str = "api-url";
pub const ARG_STATE_DIR: &str = "state-dir";
pub const ARG_TIMEOUT: &str = "timeout";

/// Deepest subcommand matches; global arguments are always readable there.
#[must_use]
pub fn leaf(matches: &ArgMatches) -> &ArgMatches {
    let mut current = matches;
    while let Some((_, sub)) = current.subcommand() {
        current = sub;
    }
    current
}

#[must_use]
pub fn new() -> Command {
    let styles = Styles::styled()
        .header(AnsiColor::Yellow.on_default() | Effects::BOLD)
        .usage(AnsiColor::Green.on_default() | Effects::BOLD)
        .literal(AnsiColor::Blue.on_default() | Effects::BOLD)
        .placeholder(AnsiColor::Green.on_default());

    let long_version: &'static str = Box::leak(
        format!("{} - {}", env!("CARGO_PKG_VERSION"), crate::GIT_COMMIT_HASH).into_boxed_str(),
    );

    let command = Command::new("useradmin")
        .about("User administration client")
        .version(env!("CARGO_PKG_VERSION"))
        .long_version(long_version)
        .color(ColorChoice::Auto)
        .styles(styles)
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new(ARG_API_URL)
                .short('u')
                .long("api-url")
                .help("Base URL of the user API, example: https://api.example.com")
                .env("USERADMIN_API_URL")
                .global(true),
        )
        .arg(
            Arg::new(ARG_STATE_DIR)
                .long("state-dir")
                .help("Directory holding the session cookie jar")
                .long_help(
                    "Directory holding the session cookie jar. Defaults to the platform config directory, for example ~/.config/useradmin.",
                )
                .env("USERADMIN_STATE_DIR")
                .global(true),
        )
        .arg(
            Arg::new(ARG_TIMEOUT)
                .long("timeout")
                .help("HTTP request timeout in seconds")
                .default_value("10")
                .env("USERADMIN_TIMEOUT_SECONDS")
                .global(true)
                .value_parser(clap::value_parser!(u64).range(1..)),
        );

    let command = auth::with_subcommands(command);
    let command = users::with_subcommands(command);
    logging::with_args(command)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn cleared_env<F, R>(f: F) -> R
    where
        F: FnOnce() -> R,
    {
        temp_env::with_vars(
            [
                ("USERADMIN_API_URL", None::<&str>),
                ("USERADMIN_STATE_DIR", None::<&str>),
                ("USERADMIN_TIMEOUT_SECONDS", None::<&str>),
                ("USERADMIN_LOG_LEVEL", None::<&str>),
                ("USERADMIN_EMAIL", None::<&str>),
                ("USERADMIN_PASSWORD", None::<&str>),
            ],
            f,
        )
    }

    #[test]
    fn test_new() {
        let command = new();

        assert_eq!(command.get_name(), "useradmin");
        assert_eq!(
            command.get_about().map(ToString::to_string),
            Some("User administration client".to_string())
        );
        assert_eq!(
            command.get_version().map(ToString::to_string),
            Some(env!("CARGO_PKG_VERSION").to_string())
        );
    }

    #[test]
    fn test_command_is_consistent() {
        new().debug_assert();
    }

    #[test]
    fn test_globals_after_subcommand() {
        cleared_env(|| {
            let matches = new().get_matches_from(vec![
                "useradmin",
                "users",
                "list",
                "--api-url",
                "http://localhost:3000",
                "--timeout",
                "3",
            ]);
            let leaf = leaf(&matches);
            assert_eq!(
                leaf.get_one::<String>(ARG_API_URL).cloned(),
                Some("http://localhost:3000".to_string())
            );
            assert_eq!(leaf.get_one::<u64>(ARG_TIMEOUT).copied(), Some(3));
        });
    }

    #[test]
    fn test_check_env() {
        temp_env::with_vars(
            [
                ("USERADMIN_API_URL", Some("https://api.tld")),
                ("USERADMIN_STATE_DIR", Some("/tmp/useradmin")),
                ("USERADMIN_TIMEOUT_SECONDS", Some("30")),
                ("USERADMIN_LOG_LEVEL", Some("info")),
            ],
            || {
                let matches = new().get_matches_from(vec!["useradmin", "whoami"]);
                let leaf = leaf(&matches);
                assert_eq!(
                    leaf.get_one::<String>(ARG_API_URL).cloned(),
                    Some("https://api.tld".to_string())
                );
                assert_eq!(
                    leaf.get_one::<String>(ARG_STATE_DIR).cloned(),
                    Some("/tmp/useradmin".to_string())
                );
                assert_eq!(leaf.get_one::<u64>(ARG_TIMEOUT).copied(), Some(30));
                assert_eq!(
                    leaf.get_one::<u8>(logging::ARG_VERBOSITY).copied(),
                    Some(2)
                );
            },
        );
    }

    #[test]
    fn test_default_timeout() {
        cleared_env(|| {
            let matches = new().get_matches_from(vec!["useradmin", "logout"]);
            assert_eq!(leaf(&matches).get_one::<u64>(ARG_TIMEOUT).copied(), Some(10));
        });
    }

    #[test]
    fn test_check_log_level_env() {
        let levels = ["error", "warn", "info", "debug", "trace"];
        for (index, &level) in levels.iter().enumerate() {
            temp_env::with_vars([("USERADMIN_LOG_LEVEL", Some(level))], || {
                let matches = new().get_matches_from(vec!["useradmin", "logout"]);
                assert_eq!(
                    leaf(&matches).get_one::<u8>(logging::ARG_VERBOSITY).copied(),
                    u8::try_from(index).ok()
                );
            });
        }
    }

    #[test]
    fn test_check_log_level_verbosity() {
        let levels = ["error", "warn", "info", "debug", "trace"];
        for (index, _) in levels.iter().enumerate() {
            cleared_env(|| {
                let mut args = vec!["useradmin".to_string(), "logout".to_string()];
                if index > 0 {
                    args.push(format!("-{}", "v".repeat(index)));
                }

                let matches = new().get_matches_from(args);

                assert_eq!(
                    leaf(&matches).get_one::<u8>(logging::ARG_VERBOSITY).copied(),
                    u8::try_from(index).ok()
                );
            });
        }
    }

    #[test]
    fn test_invalid_log_level_rejected() {
        temp_env::with_vars([("USERADMIN_LOG_LEVEL", Some("loud"))], || {
            let result = new().try_get_matches_from(vec!["useradmin", "logout"]);
            assert!(result.is_err());
        });
    }

    #[test]
    fn test_users_delete_args() {
        cleared_env(|| {
            let matches = new().get_matches_from(vec!["useradmin", "users", "delete", "42", "--yes"]);
            let leaf = leaf(&matches);
            assert_eq!(
                leaf.get_one::<String>(users::ARG_ID).cloned(),
                Some("42".to_string())
            );
            assert!(leaf.get_flag(users::ARG_YES));
        });
    }

    #[test]
    fn test_users_requires_subcommand() {
        cleared_env(|| {
            let result = new().try_get_matches_from(vec!["useradmin", "users"]);
            assert!(result.is_err());
        });
    }

    #[test]
    fn test_register_requires_name_and_email() {
        cleared_env(|| {
            let result = new().try_get_matches_from(vec!["useradmin", "register", "--name", "A"]);
            assert_eq!(
                result.map_err(|e| e.kind()).err(),
                Some(clap::error::ErrorKind::MissingRequiredArgument)
            );
        });
    }
}
