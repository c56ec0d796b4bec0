//! Account command handlers.

use std::io::{self, BufRead, IsTerminal, Write};

use anyhow::{Context, Result, bail};
use tdx_core::api::ApiError;
use tdx_core::session::mask_token;

use crate::cli::App;

/// Returns `value`, or reads it from stdin after printing a prompt to stderr.
fn value_or_prompt(label: &str, value: Option<String>) -> Result<String> {
    if let Some(value) = value {
        return Ok(value);
    }

    let mut err = io::stderr();
    write!(err, "{label}: ")?;
    err.flush()?;

    let mut line = String::new();
    let read = io::stdin()
        .lock()
        .read_line(&mut line)
        .with_context(|| format!("read {label}"))?;
    if read == 0 {
        bail!("{label} is required.");
    }
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

/// Like [`value_or_prompt`], but never prompts on a terminal, where the
/// typed password would echo.
fn password_or_stdin(password: Option<String>) -> Result<String> {
    ensure_password_source(password.as_deref(), io::stdin().is_terminal())?;
    value_or_prompt("Password", password)
}

fn ensure_password_source(password: Option<&str>, stdin_is_terminal: bool) -> Result<()> {
    if password.is_none() && stdin_is_terminal {
        bail!("Pass --password, set TDX_PASSWORD, or pipe the password on stdin.");
    }
    Ok(())
}

pub async fn login(app: &App, username: Option<String>, password: Option<String>) -> Result<()> {
    let username = value_or_prompt("Username", username)?;
    let password = password_or_stdin(password)?;

    let session = app.auth.login(username.trim(), &password).await?;
    app.session.set(&session).context("store session")?;
    println!("Logged in as {}.", username.trim());
    Ok(())
}

pub async fn register(
    app: &App,
    email: Option<String>,
    username: Option<String>,
    password: Option<String>,
) -> Result<()> {
    let email = value_or_prompt("Email", email)?;
    let username = value_or_prompt("Username", username)?;
    let password = password_or_stdin(password)?;

    app.auth
        .register(email.trim(), username.trim(), &password)
        .await?;
    println!("Registration successful! Run `tdx login` to sign in.");
    Ok(())
}

/// Revokes the session on the server, then forgets it locally.
///
/// A session the server already rejects is cleared as well. Any other
/// failure keeps it so the user can retry.
pub async fn logout(app: &App) -> Result<()> {
    let Some(session) = app.session.get().context("read session")? else {
        // Drops an unreadable session file, if any.
        app.session.clear().context("clear session")?;
        println!("Not logged in.");
        return Ok(());
    };

    match app.auth.logout(&session).await {
        Ok(()) | Err(ApiError::Unauthorized) => {
            app.session.clear().context("clear session")?;
            println!("Logged out.");
            Ok(())
        }
        Err(err) => {
            tracing::debug!(error = %err, "logout rejected");
            bail!("Error logging out. Please try again.")
        }
    }
}

pub fn status(app: &App) -> Result<()> {
    match app.session.get().context("read session")? {
        Some(session) => {
            println!("Logged in (token {})", mask_token(&session.access));
            if session.refresh.is_none() {
                println!("No refresh token stored.");
            }
        }
        None => println!("Not logged in."),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_prompt_refused_on_terminal() {
        let err = ensure_password_source(None, true).unwrap_err();
        assert!(err.to_string().contains("--password"));
    }

    #[test]
    fn test_password_from_flag_or_pipe_accepted() {
        assert!(ensure_password_source(Some("pw"), true).is_ok());
        assert!(ensure_password_source(Some("pw"), false).is_ok());
        assert!(ensure_password_source(None, false).is_ok());
    }
}
