use lightlab_scene::SceneError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error(transparent)]
    Scene(#[from] SceneError),

    /// The presentation surface must be reconfigured before drawing again.
    #[error("surface lost or outdated")]
    SurfaceLost,

    #[error("render backend: {0}")]
    Backend(String),
}
