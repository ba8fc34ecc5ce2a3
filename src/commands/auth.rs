use anyhow::{Context, Result};
use std::io::{self, Write};

use crate::api::auth::{login, register, LoginRequest, RegisterRequest};
use crate::config::session;

fn prompt_password() -> Result<String> {
    print!("Password: ");
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin()
        .read_line(&mut input)
        .context("Failed to read password")?;
    let password = input.trim().to_string();
    if password.is_empty() {
        anyhow::bail!("Password cannot be empty");
    }
    Ok(password)
}

pub fn handle_register(
    name: String,
    email: String,
    password: Option<String>,
    phone: Option<String>,
    website: Option<String>,
    location: Option<String>,
) -> Result<()> {
    let password = match password {
        Some(p) => p,
        None => prompt_password()?,
    };

    let request = RegisterRequest {
        name,
        email,
        password,
        phone,
        website,
        location,
    };

    let rt = tokio::runtime::Runtime::new()?;
    let response = rt.block_on(register(&request))?;

    if !response.success {
        match response.display_message() {
            Some(message) => anyhow::bail!("Registration failed: {}", message),
            None => anyhow::bail!("Registration failed"),
        }
    }

    println!("✓ Registered {}", request.email);
    if session::load_session()?.is_some() {
        println!("✓ Signed in");
    }
    Ok(())
}

pub fn handle_login(email: String, password: Option<String>) -> Result<()> {
    let password = match password {
        Some(p) => p,
        None => prompt_password()?,
    };

    let request = LoginRequest { email, password };

    let rt = tokio::runtime::Runtime::new()?;
    let response = rt.block_on(login(&request))?;

    if !response.success {
        match response.display_message() {
            Some(message) => anyhow::bail!("Login failed: {}", message),
            None => anyhow::bail!("Login failed"),
        }
    }

    match session::load_session()? {
        Some(session) => println!("✓ Signed in as {} <{}>", session.user.name, session.user.email),
        // the backend said success but sent no token; nothing was stored
        None => println!("Login succeeded but no session was returned"),
    }
    Ok(())
}

pub fn handle_logout() -> Result<()> {
    session::clear_session()?;
    println!("✓ Signed out");
    Ok(())
}

pub fn handle_whoami() -> Result<()> {
    match session::load_session()? {
        Some(session) => {
            println!("{} <{}>", session.user.name, session.user.email);
            if let Some(location) = &session.user.location {
                println!("  location: {}", location);
            }
        }
        None => println!("Not signed in"),
    }
    Ok(())
}
