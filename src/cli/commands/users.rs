use clap::{Arg, ArgAction, Command};

pub const CMD_USERS: &str = "users";
pub const CMD_LIST: &str = "list";
pub const CMD_SHOW: &str = "show";
pub const CMD_CREATE: &str = "create";
pub const CMD_EDIT: &str = "edit";
pub const CMD_DELETE: &str = "delete";

pub const ARG_ID: &str = "id";
pub const ARG_NAME: &str = "name";
pub const ARG_EMAIL: &str = "email";
pub const ARG_PASSWORD: &str = "password";
pub const ARG_ROLE: &str = "role";
pub const ARG_YES: &str = "yes";

fn id_arg() -> Arg {
    Arg::new(ARG_ID).help("User id").required(true)
}

#[must_use]
pub fn with_subcommands(command: Command) -> Command {
    command.subcommand(
        Command::new(CMD_USERS)
            .about("Manage users")
            .subcommand_required(true)
            .arg_required_else_help(true)
            .subcommand(Command::new(CMD_LIST).about("List all users"))
            .subcommand(
                Command::new(CMD_SHOW)
                    .about("Show one user and the actions available on it")
                    .arg(id_arg()),
            )
            .subcommand(
                Command::new(CMD_CREATE)
                    .about("Create a user (requires create_user)")
                    .arg(Arg::new(ARG_NAME).long("name").required(true))
                    .arg(Arg::new(ARG_EMAIL).long("email").required(true))
                    .arg(
                        Arg::new(ARG_PASSWORD)
                            .long("password")
                            .help("Initial password (prompted for when omitted)"),
                    )
                    .arg(Arg::new(ARG_ROLE).long("role").required(true)),
            )
            .subcommand(
                Command::new(CMD_EDIT)
                    .about("Edit a user (requires edit_user)")
                    .arg(id_arg())
                    .arg(Arg::new(ARG_NAME).long("name"))
                    .arg(Arg::new(ARG_EMAIL).long("email"))
                    .arg(Arg::new(ARG_ROLE).long("role")),
            )
            .subcommand(
                Command::new(CMD_DELETE)
                    .about("Delete a user (requires delete_user)")
                    .arg(id_arg())
                    .arg(
                        Arg::new(ARG_YES)
                            .short('y')
                            .long("yes")
                            .help("Skip the confirmation prompt")
                            .action(ArgAction::SetTrue),
                    ),
            ),
    )
}
