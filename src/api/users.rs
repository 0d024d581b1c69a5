//! `/api/users` — authentication and accounts

use crate::client::{ApiClient, ApiResult};
use crate::models::{self, LoginForm, RegisterForm, TokenResponse, User};
use crate::validation::Validate;

/// Create an account and store the returned token
pub async fn register(client: &ApiClient, form: &RegisterForm) -> ApiResult<String> {
    form.validate()?;

    let response: TokenResponse = client
        .post("/api/users/register", &form.to_request())
        .await?;
    client.session().set(&response.token)?;

    tracing::info!(email = %form.email.trim(), "Registered new account");
    Ok(response.token)
}

/// Authenticate and store the returned token
pub async fn login(client: &ApiClient, form: &LoginForm) -> ApiResult<String> {
    form.validate()?;

    let response: TokenResponse = client
        .post("/api/users/login", &form.to_request())
        .await?;
    client.session().set(&response.token)?;

    tracing::info!(email = %form.email.trim(), "Logged in");
    Ok(response.token)
}

/// Drop the stored token; no request is made
pub fn logout(client: &ApiClient) -> ApiResult<()> {
    client.session().clear()?;
    tracing::info!("Logged out");
    Ok(())
}

/// Profile of the logged-in user
pub async fn me(client: &ApiClient) -> ApiResult<User> {
    client.get("/api/users/me").await
}

/// Every account (teacher use)
pub async fn list(client: &ApiClient) -> ApiResult<Vec<User>> {
    client.get("/api/users").await
}

/// Every account that is not a teacher
pub async fn students(client: &ApiClient) -> ApiResult<Vec<User>> {
    Ok(models::students(list(client).await?))
}
