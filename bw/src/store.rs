use std::sync::Arc;

use async_trait::async_trait;

use crate::basic_models::{Recipe, RecipeId, RecipeUpdate};

pub type StoreResult<T> = std::result::Result<T, StoreError>;

#[derive(thiserror::Error, Debug)]
pub enum StoreError {
    #[error("Not found")]
    NotFound,
    #[error("Not logged in or session expired")]
    Unauthorized,
    #[error("Rejected by the server: {0}")]
    Validation(String),
    #[error("Server error {status}: {message}")]
    Server { status: u16, message: String },
    #[error("Transport error: {0:#}")]
    Transport(#[from] anyhow::Error),
}

impl StoreError {
    /// Worth retrying for idempotent requests
    pub fn is_transient(&self) -> bool {
        match self {
            StoreError::Transport(_) => true,
            StoreError::Server { status, .. } => *status >= 500,
            _ => false,
        }
    }
}

/// The recipe service, as seen by the client. Implementations own transport and credentials.
#[async_trait]
pub trait RecipeStore: Send + Sync {
    /// All recipes visible to the current session.
    async fn list_recipes(&self) -> StoreResult<Vec<Recipe>>;

    async fn get_recipe(&self, id: RecipeId) -> StoreResult<Recipe>;

    /// Replace a recipe and return the server's copy of the result.
    async fn update_recipe(&self, id: RecipeId, update: &RecipeUpdate) -> StoreResult<Recipe>;

    async fn delete_recipe(&self, id: RecipeId) -> StoreResult<()>;

    /// Ask the server to extract a recipe from a web page or video and store it.
    async fn import_recipe(&self, url: &str) -> StoreResult<Recipe>;
}

#[async_trait]
impl<T: RecipeStore + ?Sized> RecipeStore for Arc<T> {
    async fn list_recipes(&self) -> StoreResult<Vec<Recipe>> {
        (**self).list_recipes().await
    }

    async fn get_recipe(&self, id: RecipeId) -> StoreResult<Recipe> {
        (**self).get_recipe(id).await
    }

    async fn update_recipe(&self, id: RecipeId, update: &RecipeUpdate) -> StoreResult<Recipe> {
        (**self).update_recipe(id, update).await
    }

    async fn delete_recipe(&self, id: RecipeId) -> StoreResult<()> {
        (**self).delete_recipe(id).await
    }

    async fn import_recipe(&self, url: &str) -> StoreResult<Recipe> {
        (**self).import_recipe(url).await
    }
}
