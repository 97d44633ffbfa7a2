//! Map surface input: point clicks and shape drawing
//!
//! Turns raw pointer events into [`Geometry`] values. Degenerate shapes are
//! refused here and never reach the controller. Highlighting a geometry only
//! moves the viewport; it never emits a selection.

use super::map_surface::MapSurface;
use crate::config::{AgriGisConfig, InteractionMode, TileProvider};
use crate::domain::{BoundaryRegion, Bounds, Geometry, LatLon, ShapeKind};
use crate::error::GeometryError;
use crate::session::messages::MapMsg;

/// Active drawing tool
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawTool {
    /// Clicks select points
    #[default]
    Off,
    /// Drag from corner to corner
    Rectangle,
    /// Clicks add vertices until the shape is finished
    Polygon,
}

/// Visible portion of the map
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub bounds: Bounds,
}

impl Viewport {
    /// Smallest viewport showing `target` with `padding` (fraction of span) on every side
    ///
    /// Spans narrower than `min_span` degrees are widened around the centre.
    pub fn fit(target: Bounds, padding: f64, min_span: f64) -> Self {
        let lat_span = target.lat_span().max(min_span);
        let lon_span = target.lon_span().max(min_span);
        let half_lat = lat_span / 2.0 + lat_span * padding;
        let half_lon = lon_span / 2.0 + lon_span * padding;
        Self {
            bounds: Bounds::point(target.center()).expand(half_lat, half_lon),
        }
    }

    pub fn center(&self) -> LatLon {
        self.bounds.center()
    }
}

pub struct GeometryInput {
    mode: InteractionMode,
    tool: DrawTool,
    /// First corner of a rectangle drag
    anchor: Option<LatLon>,
    /// Vertices of the polygon being traced, in drawing order
    vertices: Vec<LatLon>,
    highlight: Option<Geometry>,
    viewport: Viewport,
    fit_padding: f64,
    min_fit_span: f64,
    region: &'static BoundaryRegion,
    tiles: TileProvider,
}

impl GeometryInput {
    pub fn new(config: &AgriGisConfig, region: &'static BoundaryRegion) -> Self {
        let home = region
            .bounds()
            .unwrap_or_else(|| Bounds::point(LatLon::default()));
        Self {
            mode: config.interaction_mode,
            tool: DrawTool::Off,
            anchor: None,
            vertices: Vec::new(),
            highlight: None,
            viewport: Viewport::fit(home, config.fit_padding, config.min_fit_span_deg),
            fit_padding: config.fit_padding,
            min_fit_span: config.min_fit_span_deg,
            region,
            tiles: config.tiles.clone(),
        }
    }

    pub fn draw_tool(&self) -> DrawTool {
        self.tool
    }

    pub fn pending_vertices(&self) -> &[LatLon] {
        &self.vertices
    }

    pub fn highlight(&self) -> Option<&Geometry> {
        self.highlight.as_ref()
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Handle a pointer or tool event
    ///
    /// Returns the completed selection, if this event produced one.
    pub fn handle(&mut self, msg: MapMsg) -> Result<Option<Geometry>, GeometryError> {
        match msg {
            MapMsg::Click(at) => {
                if !at.is_finite() {
                    return Err(GeometryError::NonFiniteCoordinate);
                }
                match self.tool {
                    DrawTool::Off => Ok(Some(Geometry::point(at))),
                    DrawTool::Polygon => {
                        self.vertices.push(at);
                        Ok(None)
                    }
                    // Rectangles are drawn by dragging
                    DrawTool::Rectangle => Ok(None),
                }
            }
            MapMsg::DragStart(at) => {
                if self.tool == DrawTool::Rectangle {
                    self.anchor = Some(at);
                }
                Ok(None)
            }
            MapMsg::DragEnd(at) => {
                if self.tool != DrawTool::Rectangle {
                    return Ok(None);
                }
                match self.anchor.take() {
                    Some(anchor) => Geometry::rectangle(anchor, at).map(Some),
                    None => Ok(None),
                }
            }
            MapMsg::FinishShape => {
                if self.tool != DrawTool::Polygon {
                    return Ok(None);
                }
                let vertices = std::mem::take(&mut self.vertices);
                Geometry::polygon(ShapeKind::Polygon, vertices).map(Some)
            }
            MapMsg::CancelShape => {
                self.reset_drawing();
                Ok(None)
            }
            MapMsg::ToggleDrawTool(tool) => {
                self.toggle_tool(tool);
                Ok(None)
            }
        }
    }

    fn toggle_tool(&mut self, tool: DrawTool) {
        if self.mode == InteractionMode::PointOnly {
            log::debug!("Drawing unavailable in point-only mode");
            return;
        }
        self.tool = if self.tool == tool {
            DrawTool::Off
        } else {
            tool
        };
        self.reset_drawing();
    }

    fn reset_drawing(&mut self) {
        self.anchor = None;
        self.vertices.clear();
    }

    /// Show `geometry` as the selected one and bring it into view
    pub fn set_highlight(&mut self, geometry: Option<Geometry>) {
        if self.highlight == geometry {
            return;
        }
        if let Some(geometry) = &geometry {
            self.viewport = Viewport::fit(geometry.bounds(), self.fit_padding, self.min_fit_span);
        }
        self.highlight = geometry;
    }

    pub fn render(&self, surface: &mut dyn MapSurface) {
        surface.show_base_map(&self.tiles);
        surface.show_boundary(self.region);
        surface.show_highlight(self.highlight(), &self.viewport());
    }

    /// Legend entries for the map corner
    pub fn legend(&self) -> Vec<String> {
        let mut entries = vec![self.region.name.clone()];
        if self.highlight.is_some() {
            entries.push("Location Selected".to_string());
        }
        entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Shape;

    fn input(mode: InteractionMode) -> GeometryInput {
        let config = AgriGisConfig {
            interaction_mode: mode,
            ..AgriGisConfig::default()
        };
        GeometryInput::new(&config, BoundaryRegion::tamil_nadu())
    }

    #[test]
    fn test_click_emits_labelled_point() {
        let mut map = input(InteractionMode::PointAndPolygon);
        let g = map
            .handle(MapMsg::Click(LatLon::new(11.12712, 78.65694)))
            .unwrap()
            .unwrap();
        assert_eq!(g.shape(), &Shape::Point(LatLon::new(11.12712, 78.65694)));
        assert_eq!(g.label(), Some("Location (11.1271, 78.6569)"));
    }

    #[test]
    fn test_click_outside_region_is_still_emitted() {
        let mut map = input(InteractionMode::PointOnly);
        let g = map.handle(MapMsg::Click(LatLon::new(20.0, 70.0))).unwrap();
        assert!(g.is_some());
    }

    #[test]
    fn test_polygon_drawing() {
        let mut map = input(InteractionMode::PointAndPolygon);
        map.handle(MapMsg::ToggleDrawTool(DrawTool::Polygon)).unwrap();
        assert_eq!(map.draw_tool(), DrawTool::Polygon);

        for at in [
            LatLon::new(10.0, 78.0),
            LatLon::new(10.0, 79.0),
            LatLon::new(11.0, 78.5),
        ] {
            assert_eq!(map.handle(MapMsg::Click(at)).unwrap(), None);
        }
        assert_eq!(map.pending_vertices().len(), 3);

        let g = map.handle(MapMsg::FinishShape).unwrap().unwrap();
        assert_eq!(g.label(), Some("Polygon Area"));
        match g.shape() {
            Shape::Polygon { kind, ring } => {
                assert_eq!(*kind, ShapeKind::Polygon);
                let v = ring.vertices();
                assert_eq!(v.len(), 4);
                assert_eq!(v[0], LatLon::new(10.0, 78.0));
                assert_eq!(v[1], LatLon::new(10.0, 79.0));
                assert_eq!(v.first(), v.last());
            }
            other => panic!("expected polygon, got {other:?}"),
        }
        assert!(map.pending_vertices().is_empty());
        assert_eq!(map.draw_tool(), DrawTool::Polygon);
    }

    #[test]
    fn test_degenerate_polygon_is_rejected() {
        let mut map = input(InteractionMode::PointAndPolygon);
        map.handle(MapMsg::ToggleDrawTool(DrawTool::Polygon)).unwrap();
        map.handle(MapMsg::Click(LatLon::new(10.0, 78.0))).unwrap();
        map.handle(MapMsg::Click(LatLon::new(10.0, 79.0))).unwrap();
        assert_eq!(
            map.handle(MapMsg::FinishShape),
            Err(GeometryError::TooFewVertices { found: 2 })
        );
        // The failed trace is discarded
        assert!(map.pending_vertices().is_empty());
    }

    #[test]
    fn test_rectangle_drag() {
        let mut map = input(InteractionMode::PointAndPolygon);
        map.handle(MapMsg::ToggleDrawTool(DrawTool::Rectangle)).unwrap();

        assert_eq!(map.handle(MapMsg::DragStart(LatLon::new(10.0, 78.0))).unwrap(), None);
        let g = map
            .handle(MapMsg::DragEnd(LatLon::new(11.0, 79.0)))
            .unwrap()
            .unwrap();
        assert_eq!(g.label(), Some("Rectangle Area"));
        assert_eq!(g.open_vertices().len(), 4);

        // Zero-area drag
        map.handle(MapMsg::DragStart(LatLon::new(10.0, 78.0))).unwrap();
        assert!(map.handle(MapMsg::DragEnd(LatLon::new(10.0, 78.0))).is_err());

        // Release without a press
        assert_eq!(map.handle(MapMsg::DragEnd(LatLon::new(11.0, 79.0))).unwrap(), None);
    }

    #[test]
    fn test_toggle_and_cancel() {
        let mut map = input(InteractionMode::PointAndPolygon);
        map.handle(MapMsg::ToggleDrawTool(DrawTool::Polygon)).unwrap();
        map.handle(MapMsg::Click(LatLon::new(10.0, 78.0))).unwrap();
        map.handle(MapMsg::CancelShape).unwrap();
        assert!(map.pending_vertices().is_empty());
        assert_eq!(map.draw_tool(), DrawTool::Polygon);

        map.handle(MapMsg::ToggleDrawTool(DrawTool::Polygon)).unwrap();
        assert_eq!(map.draw_tool(), DrawTool::Off);
        assert!(map.handle(MapMsg::Click(LatLon::new(10.0, 78.0))).unwrap().is_some());
    }

    #[test]
    fn test_point_only_mode_ignores_draw_tools() {
        let mut map = input(InteractionMode::PointOnly);
        map.handle(MapMsg::ToggleDrawTool(DrawTool::Rectangle)).unwrap();
        assert_eq!(map.draw_tool(), DrawTool::Off);
    }

    fn frames(view: &Viewport, geometry: &Geometry) -> bool {
        let b = view.bounds;
        geometry
            .open_vertices()
            .iter()
            .all(|v| v.lat > b.south && v.lat < b.north && v.lon > b.west && v.lon < b.east)
    }

    #[test]
    fn test_highlight_fits_viewport_without_emitting() {
        let mut map = input(InteractionMode::PointAndPolygon);
        assert!(map.highlight().is_none());
        let home = map.viewport();
        assert!(frames(&home, &Geometry::point(LatLon::new(11.1271, 78.6569))));

        let chennai = Geometry::named_point(LatLon::new(13.0827, 80.2707), "Chennai");
        map.set_highlight(Some(chennai.clone()));
        assert_eq!(map.highlight(), Some(&chennai));
        let view = map.viewport();
        assert!(frames(&view, &chennai));
        assert!((view.center().lat - 13.0827).abs() < 1e-9);
        // Point fit uses the minimum span plus padding
        assert!((view.bounds.lat_span() - 0.05 * 1.2).abs() < 1e-9);

        let area = Geometry::rectangle(LatLon::new(10.0, 78.0), LatLon::new(11.0, 79.0)).unwrap();
        map.set_highlight(Some(area.clone()));
        let view = map.viewport();
        assert!(frames(&view, &area));
        assert!(view.bounds.south < 10.0 && view.bounds.north > 11.0);

        map.set_highlight(None);
        assert!(map.highlight().is_none());
    }

    #[test]
    fn test_legend() {
        let mut map = input(InteractionMode::PointAndPolygon);
        assert_eq!(map.legend(), vec!["Tamil Nadu".to_string()]);
        map.set_highlight(Some(Geometry::point(LatLon::new(11.0, 78.0))));
        assert_eq!(
            map.legend(),
            vec!["Tamil Nadu".to_string(), "Location Selected".to_string()]
        );
    }
}
