//! Password input kept off the command line.

use std::io::{self, BufRead, Write};

use cjk_core::errors::AuthError;

/// Environment variable holding the password for non-interactive use.
pub const PASSWORD_ENV: &str = "CJK_PASSWORD";

/// Password from `CJK_PASSWORD`, else one line of standard input.
pub fn read() -> Result<String, AuthError> {
    let from_env = std::env::var(PASSWORD_ENV).ok();
    if from_env.is_none() {
        eprint!("password: ");
        let _ = io::stderr().flush();
    }
    resolve(from_env, io::stdin().lock())
}

fn resolve(from_env: Option<String>, mut input: impl BufRead) -> Result<String, AuthError> {
    let password = match from_env.filter(|p| !p.is_empty()) {
        Some(password) => password,
        None => {
            let mut line = String::new();
            input.read_line(&mut line).map_err(|e| missing(&e.to_string()))?;
            line.trim_end_matches(['\r', '\n']).to_string()
        }
    };
    if password.is_empty() {
        return Err(missing("no password given"));
    }
    Ok(password)
}

fn missing(message: &str) -> AuthError {
    AuthError::InvalidField {
        field: "password".into(),
        message: message.to_string(),
    }
}
