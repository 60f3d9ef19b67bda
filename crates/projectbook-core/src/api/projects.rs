//! Login and project endpoints of the projectbook backend.
//!
//! Every call goes through [`ApiClient::send`], so it carries the stored
//! bearer token and a 401 clears the session like any other request.

use tracing::info;

use crate::models::{DeleteResponse, Project, ProjectInput, TokenResponse};
use crate::storage::TOKEN_KEY;

use super::{ApiClient, ApiError};

const TOKEN_PATH: &str = "/token";
const PROJECTS_PATH: &str = "/api/projects/";

impl ApiClient {
    /// Exchange credentials for a bearer token and store it
    pub async fn login(&self, username: &str, password: &str) -> Result<TokenResponse, ApiError> {
        let form = [("username", username), ("password", password)];
        let token: TokenResponse = self.post_form(TOKEN_PATH, &form).await?;

        if token.access_token.is_empty() {
            return Err(ApiError::InvalidResponse("Empty access token".into()));
        }
        self.store().set(TOKEN_KEY, &token.access_token)?;
        info!(username = username, "Logged in");
        Ok(token)
    }

    /// Forget the stored token
    pub fn logout(&self) -> Result<(), ApiError> {
        self.store().remove(TOKEN_KEY)?;
        Ok(())
    }

    /// True when a token is stored. Says nothing about whether the server still accepts it.
    pub fn has_token(&self) -> Result<bool, ApiError> {
        Ok(self.store().get(TOKEN_KEY)?.is_some())
    }

    pub async fn list_projects(&self) -> Result<Vec<Project>, ApiError> {
        self.get(PROJECTS_PATH).await
    }

    pub async fn create_project(&self, project: &ProjectInput) -> Result<Project, ApiError> {
        self.post(PROJECTS_PATH, project).await
    }

    pub async fn update_project(
        &self,
        id: i64,
        project: &ProjectInput,
    ) -> Result<Project, ApiError> {
        self.put(&project_path(id), project).await
    }

    pub async fn delete_project(&self, id: i64) -> Result<DeleteResponse, ApiError> {
        self.delete(&project_path(id)).await
    }
}

fn project_path(id: i64) -> String {
    format!("{}{}", PROJECTS_PATH, id)
}
