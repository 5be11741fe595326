use crate::{
    auth::RegisterForm,
    cli::{globals::GlobalArgs, prompt},
    ui::render,
};
use anyhow::Result;
use secrecy::SecretString;

pub struct Args {
    pub globals: GlobalArgs,
    pub name: String,
    pub email: String,
    pub password: Option<SecretString>,
    pub confirm_password: Option<SecretString>,
}

impl std::fmt::Debug for Args {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Args")
            .field("globals", &self.globals)
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password", &"***")
            .field("confirm_password", &"***")
            .finish()
    }
}

/// Execute the register action.
/// # Errors
/// Returns an error if validation or the registration call fails.
pub async fn execute(args: Args) -> Result<()> {
    let api = args.globals.api_client()?;

    let password = match args.password {
        Some(password) => password,
        None => prompt::secret("Password: ")?,
    };
    let confirm_password = match args.confirm_password {
        Some(password) => password,
        None => prompt::secret("Confirm Password: ")?,
    };

    let mut form = RegisterForm::new(args.name, args.email, password, confirm_password);

    if let Err(err) = form.submit(&api).await {
        form.acknowledge();
        return Err(err.into());
    }

    if let Some(feedback) = form.feedback().content() {
        println!("{}", render::feedback(feedback));
    }
    if let Some(page) = form.acknowledge() {
        render::print_info(&format!(
            "Next: useradmin {}",
            page.path().trim_start_matches('/')
        ));
    }
    Ok(())
}
