// zoundo-cli/src/commands/session.rs
use crate::output::{print_response, print_success, OutputFormat, Response};
use anyhow::{bail, Result};
use dialoguer::{Input, Password};
use serde_json::json;
use zoundo_client::{fields, Config, LoginRequest, ZoundoClient};

/// Prompt for credentials, log in and store the token in the config file
pub async fn handle_login(
    client: &ZoundoClient,
    email: Option<String>,
    format: OutputFormat,
) -> Result<()> {
    let email = match email {
        Some(email) => email,
        None => Input::new().with_prompt("Email").interact_text()?,
    };
    let password = Password::new().with_prompt("Password").interact()?;
    if password.is_empty() {
        bail!("Password cannot be empty");
    }

    let request = LoginRequest {
        email,
        password,
        role: None,
    };
    let login = client.users().login(&request, &[]).await?;

    Config::save_token(Some(login.token.clone()))?;
    client.api().set_token(Some(login.token));
    print_success(&format!("Logged in as {}", login.user.email));

    print_response(&Response::ok(login.user), format);
    Ok(())
}

pub fn handle_logout(client: &ZoundoClient, format: OutputFormat) -> Result<()> {
    Config::save_token(None)?;
    client.api().set_token(None);
    print_response(&Response::ok(json!({ "loggedOut": true })), format);
    Ok(())
}

pub async fn handle_me(client: &ZoundoClient, format: OutputFormat) -> Result<()> {
    if client.api().token().is_none() {
        bail!("Not logged in. Run `zoundo login` first");
    }
    let me = client
        .users()
        .me(&[fields::USER_BALANCE, fields::USER_LOCALE, fields::USER_DATE])
        .await?;
    print_response(&Response::ok(me), format);
    Ok(())
}
