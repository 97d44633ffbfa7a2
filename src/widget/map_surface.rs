//! Rendering seam for whatever draws the actual map

use super::geometry_input::Viewport;
use crate::config::TileProvider;
use crate::domain::{BoundaryRegion, Geometry, Shape};

/// What the selection pipeline needs from a map renderer
pub trait MapSurface {
    fn show_base_map(&mut self, tiles: &TileProvider);
    fn show_boundary(&mut self, region: &BoundaryRegion);
    /// Zero or one highlighted geometry, with the viewport that frames it
    fn show_highlight(&mut self, geometry: Option<&Geometry>, viewport: &Viewport);
}

/// Surface that only logs what it would draw
#[derive(Debug, Default)]
pub struct LogSurface;

impl MapSurface for LogSurface {
    fn show_base_map(&mut self, tiles: &TileProvider) {
        log::info!("Base map {} ({})", tiles.url_template, tiles.attribution);
    }

    fn show_boundary(&mut self, region: &BoundaryRegion) {
        log::info!(
            "Boundary {} [{}], {} ring(s)",
            region.name,
            region.region_code,
            region.rings.len()
        );
    }

    fn show_highlight(&mut self, geometry: Option<&Geometry>, viewport: &Viewport) {
        let b = viewport.bounds;
        let Some(geometry) = geometry else {
            let c = viewport.center();
            log::info!("No selection, view centred on {:.4},{:.4}", c.lat, c.lon);
            return;
        };
        let what = match geometry.shape() {
            Shape::Point(at) => format!("point {:.4},{:.4}", at.lat, at.lon),
            Shape::Polygon { kind, ring } => {
                // Outline is drawn as a closed path
                format!("{} outline of {} points", kind.name(), ring.vertices().len())
            }
        };
        log::info!(
            "Highlight {} ({}), view {:.4},{:.4} .. {:.4},{:.4}",
            geometry.label().unwrap_or("unlabelled"),
            what,
            b.south,
            b.west,
            b.north,
            b.east
        );
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Surface remembering the last frame it was asked to draw
    #[derive(Debug, Default)]
    pub(crate) struct RecordingSurface {
        pub base_map: Option<String>,
        pub boundary: Option<String>,
        pub highlight: Option<Geometry>,
        pub viewport: Option<Viewport>,
        pub frames: usize,
    }

    impl MapSurface for RecordingSurface {
        fn show_base_map(&mut self, tiles: &TileProvider) {
            self.base_map = Some(tiles.url_template.clone());
        }

        fn show_boundary(&mut self, region: &BoundaryRegion) {
            self.boundary = Some(region.name.clone());
        }

        fn show_highlight(&mut self, geometry: Option<&Geometry>, viewport: &Viewport) {
            self.highlight = geometry.cloned();
            self.viewport = Some(*viewport);
            self.frames += 1;
        }
    }

    #[test]
    fn test_geometry_input_renders_all_layers() {
        use crate::config::AgriGisConfig;
        use crate::domain::LatLon;
        use crate::widget::geometry_input::GeometryInput;

        let mut map = GeometryInput::new(&AgriGisConfig::default(), BoundaryRegion::tamil_nadu());
        let mut surface = RecordingSurface::default();
        map.render(&mut surface);
        assert_eq!(
            surface.base_map.as_deref(),
            Some("https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png")
        );
        assert_eq!(surface.boundary.as_deref(), Some("Tamil Nadu"));
        assert!(surface.highlight.is_none());

        let g = crate::domain::Geometry::point(LatLon::new(11.0, 78.0));
        map.set_highlight(Some(g.clone()));
        map.render(&mut surface);
        assert_eq!(surface.highlight, Some(g));
        assert_eq!(surface.viewport, Some(map.viewport()));
        assert_eq!(surface.frames, 2);

        // Logging surface accepts the same frames
        map.render(&mut LogSurface);
    }
}
