use crate::{
    auth::LoginForm,
    cli::{globals::GlobalArgs, prompt},
    ui::render,
};
use anyhow::Result;
use secrecy::SecretString;
use std::time::{Duration, Instant};
use tracing::debug;

pub struct Args {
    pub globals: GlobalArgs,
    pub email: Option<String>,
    pub password: Option<SecretString>,
}

impl std::fmt::Debug for Args {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Args")
            .field("globals", &self.globals)
            .field("email", &self.email)
            .field("password", &self.password.as_ref().map(|_| "***"))
            .finish()
    }
}

/// Execute the login action. Interactive sessions may retry after a failure;
/// each retry waits out the cooldown first.
/// # Errors
/// Returns an error if the login fails and is not retried.
pub async fn execute(args: Args) -> Result<()> {
    let api = args.globals.api_client()?;
    let interactive = prompt::is_interactive();

    let email = match args.email {
        Some(email) => email,
        None => prompt::line("Email: ")?,
    };
    let password = match args.password {
        Some(password) => password,
        None => prompt::secret("Password: ")?,
    };

    let mut form = LoginForm::new(email, password);
    loop {
        match form.submit(&api).await {
            Ok(page) => {
                debug!("navigating to {page}");
                render::print_success("Signed in.");
                return Ok(());
            }
            Err(err) => {
                let feedback = form.dismiss_feedback();
                if !interactive {
                    return Err(err.into());
                }
                if let Some(feedback) = feedback {
                    println!("{}", render::feedback(&feedback));
                }
                if !prompt::confirm("Try again?")? {
                    return Err(err.into());
                }
            }
        }

        if let Some(seconds) = form.cooldown_remaining(Instant::now()) {
            render::print_info(&format!("Waiting {seconds} seconds before the next attempt..."));
            tokio::time::sleep(Duration::from_secs(seconds)).await;
        }
        form.password = prompt::secret("Password: ")?;
    }
}
