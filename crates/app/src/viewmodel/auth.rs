//! Authentication view model

use rendyws_core::auth::{self, RegistrationForm};
use rendyws_core::Result;

use crate::state::AppState;

pub fn login(state: &AppState, email: &str, password: &str) -> Result<String> {
    let session = auth::login(&state.auth_provider(), &state.db, email, password)?;
    Ok(format!(
        "Welcome, {} ({})",
        session.name,
        session.role.display_name()
    ))
}

pub fn logout(state: &AppState) -> Result<String> {
    auth::logout(&state.db)?;
    Ok("Signed out".to_string())
}

pub fn whoami(state: &AppState) -> Result<String> {
    Ok(match auth::current_session(&state.db)? {
        Some(session) => format!(
            "[{}] {} <{}> - {}",
            session.initials(),
            session.name,
            session.email,
            session.role.display_name()
        ),
        None => "Not signed in".to_string(),
    })
}

/// Create the account, then sign in with it
pub fn register(state: &AppState, form: &RegistrationForm) -> Result<String> {
    let identity = auth::register(&state.db, form)?;
    auth::login(&state.auth_provider(), &state.db, &identity.email, &form.password)?;
    Ok(format!("Account created. Welcome, {}", identity.name))
}
