//! Login, logout, and registration.

use srmiggy_core::{LoginRequest, RegisterRequest};

use crate::context::ClientContext;
use crate::display::prompt_password;

/// Account details collected by `srmiggy register`.
#[derive(Debug)]
pub(crate) struct Registration {
    pub(crate) username: String,
    pub(crate) email: String,
    pub(crate) full_name: String,
    pub(crate) phone: String,
    pub(crate) address: String,
}

/// # Errors
///
/// Returns an error if the credentials are rejected or the session cannot be
/// stored.
pub(crate) async fn run_login(
    ctx: &mut ClientContext,
    username: &str,
    password: Option<String>,
) -> anyhow::Result<()> {
    let credentials = LoginRequest {
        username: username.trim().to_owned(),
        password: prompt_password(password)?,
    };

    let auth = match ctx.api.login(&credentials).await {
        Ok(auth) => auth,
        Err(e) => return Err(ctx.api_failure("login failed", e)),
    };
    ctx.sign_in(&auth)?;

    println!("signed in as {}", auth.username);
    if let Some(balance) = auth.wallet_balance {
        println!("wallet balance: {}", srmiggy_core::format_inr(balance));
    }
    Ok(())
}

pub(crate) fn run_logout(ctx: &mut ClientContext) -> anyhow::Result<()> {
    if !ctx.session.is_authenticated() {
        println!("not signed in");
        return Ok(());
    }
    ctx.sign_out()?;
    println!("signed out; your cart is kept");
    Ok(())
}

/// # Errors
///
/// Returns an error if the server refuses the registration or the session
/// cannot be stored.
pub(crate) async fn run_register(
    ctx: &mut ClientContext,
    details: Registration,
    password: Option<String>,
) -> anyhow::Result<()> {
    let request = RegisterRequest {
        username: details.username.trim().to_owned(),
        email: details.email.trim().to_owned(),
        password: prompt_password(password)?,
        full_name: details.full_name.trim().to_owned(),
        phone: details.phone.trim().to_owned(),
        address: details.address.trim().to_owned(),
    };

    let auth = match ctx.api.register(&request).await {
        Ok(auth) => auth,
        Err(e) => return Err(ctx.api_failure("registration failed", e)),
    };
    ctx.sign_in(&auth)?;

    println!("account created; signed in as {}", auth.username);
    Ok(())
}
