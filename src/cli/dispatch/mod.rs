use crate::cli::{
    actions::{login, register, users, Action},
    commands::{self, auth as auth_cmd, users as users_cmd, ARG_API_URL, ARG_STATE_DIR, ARG_TIMEOUT},
    globals::{default_state_dir, GlobalArgs},
};
use anyhow::{anyhow, Result};
use clap::ArgMatches;
use secrecy::SecretString;
use std::{path::PathBuf, time::Duration};

fn global_args(matches: &ArgMatches) -> Result<GlobalArgs> {
    let leaf = commands::leaf(matches);

    let api_url = leaf.get_one::<String>(ARG_API_URL).cloned();
    let state_dir = match leaf.get_one::<String>(ARG_STATE_DIR) {
        Some(dir) => PathBuf::from(dir),
        None => default_state_dir()?,
    };
    let timeout = Duration::from_secs(leaf.get_one::<u64>(ARG_TIMEOUT).copied().unwrap_or(10));

    Ok(GlobalArgs::new(api_url, state_dir, timeout))
}

fn string(matches: &ArgMatches, id: &str) -> Option<String> {
    matches.get_one::<String>(id).cloned()
}

fn secret(matches: &ArgMatches, id: &str) -> Option<SecretString> {
    string(matches, id).map(SecretString::from)
}

fn required(matches: &ArgMatches, id: &str) -> Result<String> {
    string(matches, id).ok_or_else(|| anyhow!("missing required argument: --{id}"))
}

/// # Errors
/// Returns an error if required arguments are missing or the subcommand is unknown.
pub fn handler(matches: &ArgMatches) -> Result<Action> {
    let globals = global_args(matches)?;

    match matches.subcommand() {
        Some((auth_cmd::CMD_LOGIN, sub)) => Ok(Action::Login(login::Args {
            globals,
            email: string(sub, auth_cmd::ARG_EMAIL),
            password: secret(sub, auth_cmd::ARG_PASSWORD),
        })),
        Some((auth_cmd::CMD_REGISTER, sub)) => Ok(Action::Register(register::Args {
            globals,
            name: required(sub, auth_cmd::ARG_NAME)?,
            email: required(sub, auth_cmd::ARG_EMAIL)?,
            password: secret(sub, auth_cmd::ARG_PASSWORD),
            confirm_password: secret(sub, auth_cmd::ARG_CONFIRM_PASSWORD),
        })),
        Some((auth_cmd::CMD_LOGOUT, _)) => Ok(Action::Logout(globals)),
        Some((auth_cmd::CMD_WHOAMI, _)) => Ok(Action::Whoami(globals)),
        Some((users_cmd::CMD_USERS, sub)) => Ok(Action::Users(users::Args {
            globals,
            command: users_command(sub)?,
        })),
        Some((other, _)) => Err(anyhow!("unknown command: {other}")),
        None => Err(anyhow!("no command given")),
    }
}

fn users_command(matches: &ArgMatches) -> Result<users::Command> {
    let command = match matches.subcommand() {
        Some((users_cmd::CMD_LIST, _)) => users::Command::List,
        Some((users_cmd::CMD_SHOW, sub)) => users::Command::Show {
            id: required(sub, users_cmd::ARG_ID)?,
        },
        Some((users_cmd::CMD_CREATE, sub)) => users::Command::Create {
            name: required(sub, users_cmd::ARG_NAME)?,
            email: required(sub, users_cmd::ARG_EMAIL)?,
            password: secret(sub, users_cmd::ARG_PASSWORD),
            role: required(sub, users_cmd::ARG_ROLE)?,
        },
        Some((users_cmd::CMD_EDIT, sub)) => users::Command::Edit {
            id: required(sub, users_cmd::ARG_ID)?,
            name: string(sub, users_cmd::ARG_NAME),
            email: string(sub, users_cmd::ARG_EMAIL),
            role: string(sub, users_cmd::ARG_ROLE),
        },
        Some((users_cmd::CMD_DELETE, sub)) => users::Command::Delete {
            id: required(sub, users_cmd::ARG_ID)?,
            yes: sub.get_flag(users_cmd::ARG_YES),
        },
        Some((other, _)) => return Err(anyhow!("unknown users command: {other}")),
        None => return Err(anyhow!("no users command given")),
    };
    Ok(command)
}
