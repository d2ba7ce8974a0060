//! Live link parameters.
//!
//! The writer never mutates fields in place: every edit publishes a complete
//! new `LinkParameters` value through a watch channel, so readers always copy
//! a consistent snapshot of all six fields.

use link_model::LinkParameters;
use tokio::sync::watch;
use tracing::debug;

/// Write side, owned by the parameter input surface
pub struct ParameterStore {
    tx: watch::Sender<LinkParameters>,
}

/// Read side, held by the simulation loop and sweep requests
#[derive(Clone)]
pub struct ParameterReader {
    rx: watch::Receiver<LinkParameters>,
}

impl ParameterStore {
    pub fn new(initial: LinkParameters) -> Self {
        let (tx, _rx) = watch::channel(initial);
        Self { tx }
    }

    pub fn reader(&self) -> ParameterReader {
        ParameterReader {
            rx: self.tx.subscribe(),
        }
    }

    pub fn snapshot(&self) -> LinkParameters {
        *self.tx.borrow()
    }

    /// Replace the whole parameter set
    pub fn publish(&self, params: LinkParameters) {
        debug!(?params, "Publishing link parameters");
        self.tx.send_replace(params);
    }

    /// Derive a new snapshot from the current one and publish it.
    ///
    /// Read and replace happen under the channel lock, so concurrent edits
    /// cannot interleave.
    pub fn update<F>(&self, edit: F) -> LinkParameters
    where
        F: FnOnce(LinkParameters) -> LinkParameters,
    {
        let mut published = LinkParameters::default();
        self.tx.send_modify(|current| {
            *current = edit(*current);
            published = *current;
        });
        debug!(params = ?published, "Updated link parameters");
        published
    }
}

impl Default for ParameterStore {
    fn default() -> Self {
        Self::new(LinkParameters::default())
    }
}

impl ParameterReader {
    pub fn snapshot(&self) -> LinkParameters {
        *self.rx.borrow()
    }
}
