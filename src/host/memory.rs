use std::{
    collections::HashMap,
    path::Path,
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
};

use futures::{FutureExt, future::BoxFuture};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::host::{
    DocumentHost, HostError, HostResult,
    models::{PaintStyleRequest, StyleNode, VariableCollection},
};

/// Serialized document state the in-memory host serves from.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentSnapshot {
    /// Selected nodes, first one is the inspected node.
    #[serde(default)]
    pub selection: Vec<StyleNode>,
    /// Local variable collections.
    #[serde(default)]
    pub collections: Vec<VariableCollection>,
    /// Pre-rendered PNG bytes keyed by node id.
    #[serde(default)]
    pub previews: HashMap<String, Vec<u8>>,
}

#[derive(Debug, Default)]
struct Recorded {
    paint_styles: Vec<PaintStyleRequest>,
    notifications: Vec<String>,
}

/// [`DocumentHost`] over a fixed snapshot, recording every side effect it is asked for.
#[derive(Debug, Default)]
pub struct MemoryDocument {
    snapshot: DocumentSnapshot,
    recorded: Arc<Mutex<Recorded>>,
    closed: AtomicBool,
}

impl MemoryDocument {
    /// Serve the given snapshot.
    pub fn new(snapshot: DocumentSnapshot) -> Self {
        Self {
            snapshot,
            ..Self::default()
        }
    }

    /// Read a JSON snapshot from disk.
    pub async fn load(path: impl AsRef<Path>) -> HostResult<Self> {
        let path = path.as_ref();
        let contents = tokio::fs::read_to_string(path).await.map_err(|err| {
            HostError::unavailable(format!("reading document {}", path.display()), err)
        })?;
        let snapshot: DocumentSnapshot = serde_json::from_str(&contents).map_err(|err| {
            HostError::unavailable(format!("parsing document {}", path.display()), err)
        })?;
        info!(
            path = %path.display(),
            selection = snapshot.selection.len(),
            collections = snapshot.collections.len(),
            "loaded document snapshot"
        );
        Ok(Self::new(snapshot))
    }

    /// Paint styles created so far, in creation order.
    pub async fn paint_styles(&self) -> Vec<PaintStyleRequest> {
        self.recorded.lock().await.paint_styles.clone()
    }

    /// Notifications shown so far.
    pub async fn notifications(&self) -> Vec<String> {
        self.recorded.lock().await.notifications.clone()
    }

    /// Whether [`DocumentHost::close`] has been called.
    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }
}

impl DocumentHost for MemoryDocument {
    fn selection(&self) -> Vec<StyleNode> {
        self.snapshot.selection.clone()
    }

    fn variable_collections(&self) -> Vec<VariableCollection> {
        self.snapshot.collections.clone()
    }

    fn export_png(&self, node_id: &str, scale: f32) -> BoxFuture<'static, HostResult<Vec<u8>>> {
        let render = self.snapshot.previews.get(node_id).cloned();
        let node_id = node_id.to_owned();
        async move {
            debug!(%node_id, scale, "exporting node preview");
            render.ok_or_else(|| HostError::ExportFailed {
                node_id,
                message: "no render available".into(),
            })
        }
        .boxed()
    }

    fn create_paint_style(&self, request: PaintStyleRequest) -> BoxFuture<'static, HostResult<()>> {
        let recorded = Arc::clone(&self.recorded);
        async move {
            if request.name.trim().is_empty() {
                return Err(HostError::StyleCreation {
                    name: request.name,
                    message: "style name must not be empty".into(),
                });
            }
            debug!(name = %request.name, "creating paint style");
            recorded.lock().await.paint_styles.push(request);
            Ok(())
        }
        .boxed()
    }

    fn notify(&self, message: &str) -> BoxFuture<'static, ()> {
        let recorded = Arc::clone(&self.recorded);
        let message = message.to_owned();
        async move {
            info!(%message, "host notification");
            recorded.lock().await.notifications.push(message);
        }
        .boxed()
    }

    fn close(&self) {
        if !self.closed.swap(true, Ordering::SeqCst) {
            info!("plugin closed");
        }
    }
}
