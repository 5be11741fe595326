use crate::{
    api::ApiClient,
    auth,
    cli::{globals::GlobalArgs, prompt},
    error::AppError,
    session::Session,
    ui::render,
    users::{CreateUserForm, TableState, UserTable},
};
use anyhow::{anyhow, Result};
use secrecy::SecretString;
use tracing::debug;

#[derive(Debug)]
pub enum Command {
    List,
    Show {
        id: String,
    },
    Create {
        name: String,
        email: String,
        password: Option<SecretString>,
        role: String,
    },
    Edit {
        id: String,
        name: Option<String>,
        email: Option<String>,
        role: Option<String>,
    },
    Delete {
        id: String,
        yes: bool,
    },
}

#[derive(Debug)]
pub struct Args {
    pub globals: GlobalArgs,
    pub command: Command,
}

/// Execute a `users` subcommand. Every subcommand loads the list first, the
/// way the users page does on open.
/// # Errors
/// Returns an error if there is no session, a capability is missing, or a call fails.
pub async fn execute(args: Args) -> Result<()> {
    let api = args.globals.api_client()?;
    let session = auth::require_session(api.store()).map_err(|page| {
        debug!("no session, redirecting to {page}");
        AppError::NotAuthenticated
    })?;

    let mut table = UserTable::new();
    load(&mut table, &api).await?;

    match args.command {
        Command::List => {
            print!("{}", render::user_table(&table));
        }
        Command::Show { id } => {
            table.select(&id)?;
            print!("{}", render::user_detail(table.detail(), Some(&session)));
        }
        Command::Create {
            name,
            email,
            password,
            role,
        } => {
            let password = match password {
                Some(password) => password,
                None => prompt::secret("Password: ")?,
            };
            let form = CreateUserForm {
                name,
                email,
                password,
                role,
            };
            table.create(&api, Some(&session), &form).await?;
            render::print_success("User created.");
            print!("{}", render::user_table(&table));
        }
        Command::Edit {
            id,
            name,
            email,
            role,
        } => {
            edit(&mut table, &api, &session, &id, name, email, role).await?;
            render::print_success("User updated.");
            print!("{}", render::user_table(&table));
        }
        Command::Delete { id, yes } => {
            if delete(&mut table, &api, &session, &id, yes).await? {
                render::print_success("User deleted.");
                print!("{}", render::user_table(&table));
            } else {
                render::print_info("Delete cancelled.");
            }
        }
    }

    Ok(())
}

async fn load(table: &mut UserTable, api: &ApiClient) -> Result<()> {
    table.refetch(api).await;
    match table.state() {
        TableState::Error(message) => Err(anyhow!("{message}")),
        TableState::Loading | TableState::Loaded(_) => Ok(()),
    }
}

async fn edit(
    table: &mut UserTable,
    api: &ApiClient,
    session: &Session,
    id: &str,
    name: Option<String>,
    email: Option<String>,
    role: Option<String>,
) -> Result<()> {
    let detail = table.select(id)?;
    detail.begin_edit(Some(session))?;

    if let Some(draft) = detail.draft_mut() {
        if let Some(name) = name {
            draft.name = name;
        }
        if let Some(email) = email {
            draft.email = email;
        }
        if let Some(role) = role {
            draft.role = role;
        }
    }

    table.save_edit(api).await?;
    Ok(())
}

/// Returns `false` when the operator declines the confirmation.
async fn delete(
    table: &mut UserTable,
    api: &ApiClient,
    session: &Session,
    id: &str,
    yes: bool,
) -> Result<bool> {
    table.select(id)?.request_delete(Some(session))?;
    print!("{}", render::user_detail(table.detail(), Some(session)));

    if !yes && !prompt::confirm("Delete this user?")? {
        if let Some(detail) = table.detail_mut() {
            detail.cancel_delete();
        }
        table.close_detail();
        return Ok(false);
    }

    table.confirm_delete(api, Some(session)).await?;
    Ok(true)
}
