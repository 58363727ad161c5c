//! Sign-in command.

use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use serde_json::Value;

use super::CliError;
use crate::client::ProxyClient;
use crate::output;

const TOKEN_KEYS: &[&str] = &["token", "accessToken", "access_token"];

#[derive(Serialize)]
struct SigninRequest<'a> {
    email: &'a str,
    password: &'a str,
}

/// Sign in and print the issued token.
///
/// # Errors
///
/// Returns an error if the request fails or the credentials are rejected.
pub async fn signin(client: &ProxyClient, email: &str, password: &SecretString) -> Result<(), CliError> {
    let (_, body) = client
        .post(
            "/auth/signin",
            &SigninRequest {
                email,
                password: password.expose_secret(),
            },
        )
        .await?;

    tracing::info!(email, "Signed in");
    match token_from(&body) {
        Some(token) => {
            output::line(token);
            output::line("Export it as SHOPFRONT_TOKEN to use order commands");
        }
        None => output::json(&body),
    }
    Ok(())
}

fn token_from(body: &Value) -> Option<&str> {
    let scopes = [Some(body), body.get("data")];
    scopes
        .into_iter()
        .flatten()
        .flat_map(|scope| TOKEN_KEYS.iter().filter_map(move |key| scope.get(*key)))
        .find_map(Value::as_str)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_token_from() {
        assert_eq!(token_from(&json!({"token": "t1"})), Some("t1"));
        assert_eq!(token_from(&json!({"accessToken": "t2", "user": {}})), Some("t2"));
        assert_eq!(token_from(&json!({"data": {"token": "t3"}})), Some("t3"));
        assert_eq!(token_from(&json!({"user": {"id": 1}})), None);
    }
}
