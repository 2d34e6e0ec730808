use osr_renderer::RenderError;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SurfaceError {
    #[error("browser factory used before initialization")]
    NotInitialized,
    #[error("failed to create browser for {url}: {reason}")]
    EngineCreation { url: String, reason: String },
    #[error(transparent)]
    Render(#[from] RenderError),
}
