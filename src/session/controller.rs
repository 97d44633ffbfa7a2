//! Selection state machine
//!
//! Every submission gets a fresh [`RequestId`]. Only the completion carrying
//! the latest id is applied; anything older is dropped, so the visible state
//! always belongs to the most recent selection.

use super::messages::{AnalysisMsg, Msg, RequestId, SelectMsg};
use super::state::SelectionState;
use crate::analysis::{AnalysisRequest, AnalysisService, SelectionOrigin};
use crate::domain::{AnalysisResult, Geometry};
use crate::error::AnalysisError;
use std::sync::Arc;
use tokio::sync::{mpsc, watch};

pub struct SelectionController {
    state: SelectionState,
    service: Arc<dyn AnalysisService>,
    next_request: u64,
    /// Request whose completion may still change the state
    current_request: Option<RequestId>,
    outbox: mpsc::UnboundedSender<Msg>,
    snapshots: watch::Sender<SelectionState>,
}

impl SelectionController {
    /// Completions are posted to `outbox` as [`AnalysisMsg::Completed`]
    pub fn new(service: Arc<dyn AnalysisService>, outbox: mpsc::UnboundedSender<Msg>) -> Self {
        let (snapshots, _) = watch::channel(SelectionState::default());
        Self {
            state: SelectionState::default(),
            service,
            next_request: 0,
            current_request: None,
            outbox,
            snapshots,
        }
    }

    pub fn state(&self) -> &SelectionState {
        &self.state
    }

    /// Read-only snapshots, updated after every transition
    pub fn subscribe(&self) -> watch::Receiver<SelectionState> {
        self.snapshots.subscribe()
    }

    pub fn update_select(&mut self, msg: SelectMsg) {
        match msg {
            SelectMsg::Retry => {
                self.retry();
            }
            SelectMsg::Clear => self.clear(),
        }
    }

    pub fn update_analysis(&mut self, msg: AnalysisMsg) {
        match msg {
            AnalysisMsg::Completed { request, outcome } => {
                self.complete(request, outcome);
            }
        }
    }

    /// Adopt `geometry` immediately and start analysing it
    ///
    /// Must be called from within a tokio runtime.
    pub fn submit(&mut self, geometry: Geometry, origin: SelectionOrigin) -> RequestId {
        self.next_request += 1;
        let request = RequestId(self.next_request);
        if let Some(previous) = self.current_request.replace(request) {
            log::debug!("Request {} superseded by {}", previous, request);
        }

        log::debug!(
            "Submitting {} ({:?}) as request {}",
            geometry.label().unwrap_or("unlabelled geometry"),
            origin,
            request
        );
        self.state.begin(geometry.clone(), origin);
        self.publish();

        let analysis = self.service.analyze(AnalysisRequest { geometry, origin });
        let outbox = self.outbox.clone();
        tokio::spawn(async move {
            let outcome = analysis.await;
            if outbox
                .send(Msg::Analysis(AnalysisMsg::Completed { request, outcome }))
                .is_err()
            {
                log::debug!("Session closed before request {} completed", request);
            }
        });

        request
    }

    /// Apply a completion if it belongs to the current request
    ///
    /// Returns whether the state changed.
    pub fn complete(
        &mut self,
        request: RequestId,
        outcome: Result<AnalysisResult, AnalysisError>,
    ) -> bool {
        if self.current_request != Some(request) {
            log::debug!("Dropping stale response for request {}", request);
            return false;
        }
        self.current_request = None;

        match outcome {
            Ok(result) => {
                log::debug!("Request {} settled, valid: {}", request, result.is_valid());
                self.state.settle(result);
            }
            Err(err) => {
                log::error!("Analysis request {} failed: {}", request, err);
                self.state.fail(err);
            }
        }
        self.publish();
        true
    }

    /// Resubmit the current geometry after a failed analysis
    pub fn retry(&mut self) -> Option<RequestId> {
        if self.state.failure().is_none() {
            log::debug!("Retry ignored, nothing failed");
            return None;
        }
        let geometry = self.state.geometry()?.clone();
        let origin = self.state.origin()?;
        Some(self.submit(geometry, origin))
    }

    /// Back to idle; in-flight responses become stale
    pub fn clear(&mut self) {
        self.current_request = None;
        self.state.clear();
        self.publish();
    }

    fn publish(&self) {
        self.snapshots.send_replace(self.state.clone());
    }
}
