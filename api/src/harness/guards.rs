//! Pass-through stage guards

use async_trait::async_trait;
use axum::http::HeaderMap;

use crate::domain::ports::{AuthStage, StageGuard};
use crate::error::AppError;

/// Admits every request without inspecting it
#[derive(Debug, Clone, Copy)]
pub struct PassThroughGuard {
    stage: AuthStage,
}

impl PassThroughGuard {
    pub fn new(stage: AuthStage) -> Self {
        Self { stage }
    }
}

#[async_trait]
impl StageGuard for PassThroughGuard {
    fn stage(&self) -> AuthStage {
        self.stage
    }

    async fn admit(&self, _headers: &HeaderMap) -> Result<(), AppError> {
        Ok(())
    }
}
