//! Selection session
//!
//! This module contains:
//! - Session state and the controller that owns it
//! - Message types for map, search and analysis events
//! - `Session`, which routes messages between the widgets and the controller

pub mod controller;
pub mod messages;
pub mod state;

use crate::analysis::{AnalysisService, SelectionOrigin};
use crate::config::AgriGisConfig;
use crate::domain::BoundaryRegion;
use crate::widget::geometry_input::GeometryInput;
use crate::widget::map_surface::MapSurface;
use crate::widget::results_view::{self, ResultsDisplay};
use crate::widget::search_panel::SearchPanel;
use controller::SelectionController;
use messages::Msg;
use state::SelectionState;
use std::sync::Arc;
use tokio::sync::{mpsc, watch};

pub struct Session {
    controller: SelectionController,
    map: GeometryInput,
    search: SearchPanel,
    region: &'static BoundaryRegion,
    tx: mpsc::UnboundedSender<Msg>,
    rx: mpsc::UnboundedReceiver<Msg>,
}

impl Session {
    pub fn new(config: &AgriGisConfig, service: Arc<dyn AnalysisService>) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let region = BoundaryRegion::tamil_nadu();
        Self {
            controller: SelectionController::new(service, tx.clone()),
            map: GeometryInput::new(config, region),
            search: SearchPanel::default(),
            region,
            tx,
            rx,
        }
    }

    /// Sender for feeding input events from outside the session
    pub fn sender(&self) -> mpsc::UnboundedSender<Msg> {
        self.tx.clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<SelectionState> {
        self.controller.subscribe()
    }

    pub fn state(&self) -> &SelectionState {
        self.controller.state()
    }

    pub fn map(&self) -> &GeometryInput {
        &self.map
    }

    pub fn update(&mut self, msg: Msg) {
        match msg {
            Msg::Map(msg) => match self.map.handle(msg) {
                Ok(Some(geometry)) => {
                    let origin = if geometry.is_point() {
                        SelectionOrigin::MapClick
                    } else {
                        SelectionOrigin::Drawn
                    };
                    self.controller.submit(geometry, origin);
                }
                Ok(None) => log::debug!(
                    "Tool {:?}, {} vertex(es) pending",
                    self.map.draw_tool(),
                    self.map.pending_vertices().len()
                ),
                Err(err) => log::warn!("Selection rejected: {}", err),
            },
            Msg::Search(msg) => match self.search.update(msg) {
                Some(place) => {
                    self.controller
                        .submit(place.to_geometry(), SelectionOrigin::Search);
                }
                None => log::debug!(
                    "{} suggestion(s) for {:?}",
                    self.search.suggestions().len(),
                    self.search.query()
                ),
            },
            Msg::Select(msg) => self.controller.update_select(msg),
            Msg::Analysis(msg) => self.controller.update_analysis(msg),
        }
        // The map always echoes the controller's current geometry
        self.map
            .set_highlight(self.controller.state().geometry().cloned());
    }

    /// Handle every message already queued, returning how many there were
    pub fn drain(&mut self) -> usize {
        let mut handled = 0;
        while let Ok(msg) = self.rx.try_recv() {
            self.update(msg);
            handled += 1;
        }
        handled
    }

    /// Wait for the next message and handle it
    pub async fn next(&mut self) {
        // The session keeps its own sender, so the channel never closes here
        if let Some(msg) = self.rx.recv().await {
            self.update(msg);
        }
    }

    pub fn view(&self) -> ResultsDisplay {
        results_view::view(self.controller.state(), &self.region.name)
    }

    pub fn render_map(&self, surface: &mut dyn MapSurface) {
        self.map.render(surface);
    }
}
