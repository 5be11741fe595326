use clap::{Arg, Command};

pub const CMD_LOGIN: &str = "login";
pub const CMD_REGISTER: &str = "register";
pub const CMD_LOGOUT: &str = "logout";
pub const CMD_WHOAMI: &str = "whoami";

pub const ARG_NAME: &str = "name";
pub const ARG_EMAIL: &str = "email";
pub const ARG_PASSWORD: &str = "password";
pub const ARG_CONFIRM_PASSWORD: &str = "confirm-password";

#[must_use]
pub fn with_subcommands(command: Command) -> Command {
    command
        .subcommand(
            Command::new(CMD_LOGIN)
                .about("Sign in and store the session")
                .long_about(
                    "Sign in and store the session. Missing values are prompted for; after a failed attempt the next one is held back for 5 seconds.",
                )
                .arg(
                    Arg::new(ARG_EMAIL)
                        .short('e')
                        .long("email")
                        .help("Account email")
                        .env("USERADMIN_EMAIL"),
                )
                .arg(
                    Arg::new(ARG_PASSWORD)
                        .long("password")
                        .help("Account password (prompted for when omitted)")
                        .env("USERADMIN_PASSWORD")
                        .hide_env_values(true),
                ),
        )
        .subcommand(
            Command::new(CMD_REGISTER)
                .about("Create a new account")
                .arg(
                    Arg::new(ARG_NAME)
                        .long("name")
                        .help("Display name")
                        .required(true),
                )
                .arg(
                    Arg::new(ARG_EMAIL)
                        .long("email")
                        .help("Account email")
                        .required(true),
                )
                .arg(
                    Arg::new(ARG_PASSWORD)
                        .long("password")
                        .help("Password (prompted for when omitted)"),
                )
                .arg(
                    Arg::new(ARG_CONFIRM_PASSWORD)
                        .long("confirm-password")
                        .help("Password again (prompted for when omitted)"),
                ),
        )
        .subcommand(Command::new(CMD_LOGOUT).about("Delete the stored session"))
        .subcommand(Command::new(CMD_WHOAMI).about("Show the signed-in user"))
}
