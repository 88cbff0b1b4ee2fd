use crate::utils::EnvProvider;
use octocrab::Octocrab;

pub const DEFAULT_API_URL: &str = "https://api.github.com";

#[derive(thiserror::Error, Debug)]
pub enum AuthError {
    #[error("Failed to build octocrab client: {0}")]
    ClientBuild(#[from] octocrab::Error),
    #[error("No authentication found. Provide --github-token or set GITHUB_TOKEN")]
    NoAuth,
}

pub fn create_authenticated_client(api_url: &str, token: String) -> Result<Octocrab, AuthError> {
    if api_url.trim_end_matches('/') == DEFAULT_API_URL {
        Ok(Octocrab::builder().personal_token(token).build()?)
    } else {
        log::debug!("Using GitHub API at {}", api_url);
        Ok(Octocrab::builder()
            .base_uri(api_url)?
            .personal_token(token)
            .build()?)
    }
}

/// Resolve the access token, preferring an explicit value over the environment.
pub fn get_token(explicit: Option<String>, env: &impl EnvProvider) -> Result<String, AuthError> {
    if let Some(token) = explicit.filter(|t| !t.trim().is_empty()) {
        log::debug!("Using explicitly provided token");
        return Ok(token);
    }

    for key in ["GITHUB_TOKEN", "GH_TOKEN"] {
        if let Ok(token) = env.var(key) {
            if !token.trim().is_empty() {
                log::debug!("Using {} environment variable", key);
                return Ok(token);
            }
        }
    }

    Err(AuthError::NoAuth)
}
