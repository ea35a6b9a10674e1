/// In-memory host backed by a document snapshot.
pub mod memory;
/// Document model exposed by the host.
pub mod models;

use std::error::Error;

use futures::future::BoxFuture;
use thiserror::Error;

use crate::host::models::{PaintStyleRequest, StyleNode, VariableCollection};

/// Result alias for host capability calls.
pub type HostResult<T> = Result<T, HostError>;

/// Error raised by a host capability regardless of the underlying runtime.
#[derive(Debug, Error)]
pub enum HostError {
    #[error("export of node `{node_id}` failed: {message}")]
    ExportFailed { node_id: String, message: String },
    #[error("paint style `{name}` could not be created: {message}")]
    StyleCreation { name: String, message: String },
    #[error("host unavailable: {message}")]
    Unavailable {
        message: String,
        #[source]
        source: Box<dyn Error + Send + Sync>,
    },
}

impl HostError {
    /// Construct an unavailable error from any backend failure.
    pub fn unavailable(message: String, source: impl Error + Send + Sync + 'static) -> Self {
        HostError::Unavailable {
            message,
            source: Box::new(source),
        }
    }
}

/// Capabilities the plugins consume from the design application.
///
/// Document reads are synchronous snapshots; calls that leave the plugin sandbox
/// (rendering, style creation, toasts) are asynchronous.
pub trait DocumentHost: Send + Sync {
    /// Nodes currently selected on the active page, in selection order.
    fn selection(&self) -> Vec<StyleNode>;
    /// Local variable collections with their variables, in document order.
    fn variable_collections(&self) -> Vec<VariableCollection>;
    /// Render a node to PNG bytes at the given scale.
    fn export_png(&self, node_id: &str, scale: f32) -> BoxFuture<'static, HostResult<Vec<u8>>>;
    /// Create a named paint style.
    fn create_paint_style(&self, request: PaintStyleRequest) -> BoxFuture<'static, HostResult<()>>;
    /// Show a transient notification to the user.
    fn notify(&self, message: &str) -> BoxFuture<'static, ()>;
    /// Close the plugin.
    fn close(&self);
}
