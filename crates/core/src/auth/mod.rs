//! Authentication
//!
//! Credentials are checked through an [`AuthProvider`]; the default provider
//! verifies argon2 hashes stored in the accounts table. A successful login
//! stores a [`Session`] through a [`SessionRepository`].

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use tracing::{info, instrument, warn};

use crate::config::SeedAccount;
use crate::error::{Error, Result};
use crate::invariants;
use crate::models::{Identity, NewAccount, Session, UserRole};
use crate::storage::{AccountRepository, SessionRepository};

/// Message shown for any credential mismatch
pub const INVALID_CREDENTIALS: &str = "Invalid email or password. Please check your credentials.";

pub const MIN_PASSWORD_LEN: usize = 6;

/// Pluggable credential check
pub trait AuthProvider {
    /// Resolve an email/password pair to an identity
    fn authenticate(&self, email: &str, password: &str) -> Result<Identity>;
}

/// Verifies credentials against stored accounts
pub struct AccountAuthProvider<'a, R: AccountRepository + ?Sized> {
    accounts: &'a R,
}

impl<'a, R: AccountRepository + ?Sized> AccountAuthProvider<'a, R> {
    pub fn new(accounts: &'a R) -> Self {
        Self { accounts }
    }
}

impl<R: AccountRepository + ?Sized> AuthProvider for AccountAuthProvider<'_, R> {
    fn authenticate(&self, email: &str, password: &str) -> Result<Identity> {
        // Lookup is case-insensitive; sign-in needs the stored address verbatim
        let account = self
            .accounts
            .find_account_by_email(email)?
            .filter(|account| account.email == email)
            .ok_or_else(|| Error::Authentication(INVALID_CREDENTIALS.to_string()))?;

        if !verify_password(password, &account.password_hash)? {
            return Err(Error::Authentication(INVALID_CREDENTIALS.to_string()));
        }

        Ok(Identity::from(&account))
    }
}

/// Hash a password into a PHC string
pub fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|h| h.to_string())
        .map_err(|_| Error::InvalidOperation("Failed to hash password".to_string()))
}

/// Check a password against a PHC string
pub fn verify_password(password: &str, password_hash: &str) -> Result<bool> {
    let parsed = PasswordHash::new(password_hash)
        .map_err(|_| Error::Authentication("Invalid stored password".to_string()))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}

/// Check credentials and store a session on success.
///
/// On failure nothing is written; a previously stored session stays as it was.
#[instrument(skip(provider, sessions, password))]
pub fn login<P, S>(provider: &P, sessions: &S, email: &str, password: &str) -> Result<Session>
where
    P: AuthProvider + ?Sized,
    S: SessionRepository + ?Sized,
{
    let identity = match provider.authenticate(email, password) {
        Ok(identity) => identity,
        Err(e) => {
            warn!(error = %e, "Login rejected");
            return Err(e);
        }
    };

    let session = Session::new(&identity);
    invariants::assert_session_invariants(&session);
    sessions.save_session(&session)?;
    info!(user_id = session.user_id, role = session.role.as_str(), "Logged in");
    Ok(session)
}

/// Forget the stored session
pub fn logout<S: SessionRepository + ?Sized>(sessions: &S) -> Result<()> {
    sessions.clear_session()?;
    info!("Logged out");
    Ok(())
}

/// The stored session, if it is marked as logged in
pub fn current_session<S: SessionRepository + ?Sized>(sessions: &S) -> Result<Option<Session>> {
    Ok(sessions.load_session()?.filter(Session::is_valid))
}

/// The stored session, or an authentication error
pub fn require_session<S: SessionRepository + ?Sized>(sessions: &S) -> Result<Session> {
    current_session(sessions)?.ok_or_else(|| Error::Authentication("Not logged in".to_string()))
}

/// Sign-up form input
#[derive(Debug, Clone)]
pub struct RegistrationForm {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

impl RegistrationForm {
    /// Every problem with the form, in field order
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if self.name.trim().is_empty() {
            errors.push("Name is required".to_string());
        }

        if self.email.trim().is_empty() {
            errors.push("Email is required".to_string());
        } else if !looks_like_email(self.email.trim()) {
            errors.push("Email is invalid".to_string());
        }

        if self.password.is_empty() {
            errors.push("Password is required".to_string());
        } else if self.password.chars().count() < MIN_PASSWORD_LEN {
            errors.push(format!(
                "Password must be at least {} characters",
                MIN_PASSWORD_LEN
            ));
        }

        if self.password != self.confirm_password {
            errors.push("Passwords do not match".to_string());
        }

        errors
    }
}

/// `something@something.something` with no whitespace in the parts
fn looks_like_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    let Some((host, tld)) = domain.rsplit_once('.') else {
        return false;
    };
    !local.is_empty() && !host.is_empty() && !tld.is_empty()
}

/// Create a member account from the sign-up form
#[instrument(skip(accounts, form), fields(email = %form.email))]
pub fn register<R: AccountRepository + ?Sized>(
    accounts: &R,
    form: &RegistrationForm,
) -> Result<Identity> {
    let errors = form.validate();
    if !errors.is_empty() {
        return Err(Error::Validation(errors.join("; ")));
    }

    let email = form.email.trim();
    if accounts.find_account_by_email(email)?.is_some() {
        return Err(Error::InvalidOperation(format!(
            "An account for {} already exists",
            email
        )));
    }

    let account = accounts.create_account(&NewAccount {
        user_id: None,
        name: form.name.trim().to_string(),
        email: email.to_string(),
        role: UserRole::User,
        password_hash: hash_password(&form.password)?,
    })?;

    info!(user_id = account.user_id, "Registered account");
    Ok(Identity::from(&account))
}

/// Create configured accounts whose email is not registered yet.
///
/// Returns how many accounts were created.
#[instrument(skip_all, fields(count = seeds.len()))]
pub fn seed_accounts<R: AccountRepository + ?Sized>(
    accounts: &R,
    seeds: &[SeedAccount],
) -> Result<usize> {
    let mut created = 0;
    for seed in seeds {
        if accounts.find_account_by_email(&seed.email)?.is_some() {
            continue;
        }
        accounts.create_account(&NewAccount {
            user_id: seed.user_id,
            name: seed.name.clone(),
            email: seed.email.clone(),
            role: seed.role,
            password_hash: hash_password(&seed.password)?,
        })?;
        created += 1;
    }

    if created > 0 {
        info!(created, "Seeded accounts");
    }
    Ok(created)
}
