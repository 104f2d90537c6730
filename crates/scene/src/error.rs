use lightlab_common::NodeId;
use thiserror::Error;

use crate::mesh::MaterialHandle;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum SceneError {
    #[error("node {0} not found")]
    NodeNotFound(NodeId),

    #[error("node {0} is not a light")]
    NotALight(NodeId),

    #[error("node {0} is not a camera")]
    NotACamera(NodeId),

    #[error("material {0} not found")]
    MaterialNotFound(MaterialHandle),
}
