//! Per-session anti-forgery tokens for the admin forms.
//!
//! A random token is stored in the cookie session the first time a form is
//! rendered and must come back unchanged in the `csrf_token` field of every
//! state-changing POST.

use actix_session::Session;
use thiserror::Error;
use uuid::Uuid;

use crate::forms::categories::{AddCategoryForm, DeleteCategoryForm, EditCategoryForm};
use crate::forms::posts::{AddPostForm, DeletePostForm, EditPostForm};

/// Session key holding the token.
pub const SESSION_KEY: &str = "csrf_token";

#[derive(Debug, Error)]
pub enum CsrfError {
    #[error("the form carries no anti-forgery token")]
    Missing,
    #[error("the anti-forgery token does not match the session")]
    Mismatch,
    #[error("session error: {0}")]
    Session(String),
}

/// Forms submitted together with an anti-forgery token.
pub trait CsrfProtected {
    fn csrf_token(&self) -> &str;
}

macro_rules! csrf_protected {
    ($($form:ty),* $(,)?) => {
        $(
            impl CsrfProtected for $form {
                fn csrf_token(&self) -> &str {
                    &self.csrf_token
                }
            }
        )*
    };
}

csrf_protected!(
    AddCategoryForm,
    EditCategoryForm,
    DeleteCategoryForm,
    AddPostForm,
    EditPostForm,
    DeletePostForm,
);

/// Return the session's token, creating one on first use.
pub fn issue_token(session: &Session) -> Result<String, CsrfError> {
    let existing = session
        .get::<String>(SESSION_KEY)
        .map_err(|e| CsrfError::Session(e.to_string()))?;
    if let Some(token) = existing {
        return Ok(token);
    }

    let token = Uuid::new_v4().to_string();
    session
        .insert(SESSION_KEY, &token)
        .map_err(|e| CsrfError::Session(e.to_string()))?;
    Ok(token)
}

/// Check a submitted token against the one stored in the session.
pub fn verify_token(session: &Session, submitted: &str) -> Result<(), CsrfError> {
    if submitted.is_empty() {
        return Err(CsrfError::Missing);
    }
    let expected = session
        .get::<String>(SESSION_KEY)
        .map_err(|e| CsrfError::Session(e.to_string()))?;
    match expected {
        Some(expected) if tokens_match(&expected, submitted) => Ok(()),
        _ => Err(CsrfError::Mismatch),
    }
}

/// Compare two tokens without exiting at the first differing byte.
fn tokens_match(expected: &str, submitted: &str) -> bool {
    let (expected, submitted) = (expected.as_bytes(), submitted.as_bytes());
    expected.len() == submitted.len()
        && expected
            .iter()
            .zip(submitted)
            .fold(0u8, |diff, (a, b)| diff | (a ^ b))
            == 0
}
