//! Randomised stand-in for a real analysis backend

use super::{AnalysisFuture, AnalysisRequest, AnalysisService, SelectionOrigin};
use crate::config::{AgriGisConfig, ValidityRule};
use crate::domain::{
    AnalysisResult, AreaData, BoundaryRegion, Fertility, RainfallRecord, Reliability,
    SoilRecord, SoilType, Trend, VegetationRecord,
};
use crate::error::AnalysisError;
use futures::FutureExt;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Label reported for every valid map click or drawn shape
const CUSTOM_AREA: &str = "Custom Area";

/// Fabricates soil, rainfall and vegetation figures after a fixed delay
///
/// Nothing is derived from the geometry's location. Each field is sampled
/// independently when the delay elapses.
#[derive(Clone)]
pub struct MockAnalysisService {
    region: &'static BoundaryRegion,
    validity: ValidityRule,
    failure_probability: f64,
    point_delay: Duration,
    search_delay: Duration,
    rng: Arc<Mutex<StdRng>>,
}

impl MockAnalysisService {
    pub fn new(config: &AgriGisConfig, region: &'static BoundaryRegion) -> Self {
        let rng = match config.rng_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self {
            region,
            validity: config.validity,
            failure_probability: config.failure_probability,
            point_delay: config.point_delay(),
            search_delay: config.search_delay(),
            rng: Arc::new(Mutex::new(rng)),
        }
    }

    pub fn delay_for(&self, origin: SelectionOrigin) -> Duration {
        match origin {
            SelectionOrigin::Search => self.search_delay,
            SelectionOrigin::MapClick | SelectionOrigin::Drawn => self.point_delay,
        }
    }

    /// Produce the outcome immediately, without the simulated delay
    pub fn resolve(&self, request: &AnalysisRequest) -> Result<AnalysisResult, AnalysisError> {
        let mut rng = self.rng.lock().unwrap_or_else(|poisoned| poisoned.into_inner());

        if self.failure_probability > 0.0 && rng.random_bool(self.failure_probability.min(1.0)) {
            return Err(AnalysisError::ServiceUnavailable(
                "simulated outage".to_string(),
            ));
        }

        let valid = match (request.origin, self.validity) {
            (SelectionOrigin::Search, _) => true,
            (_, ValidityRule::CoinFlip { valid_probability }) => {
                rng.random_bool(valid_probability.clamp(0.0, 1.0))
            }
            (_, ValidityRule::Containment) => self.region.contains_geometry(&request.geometry),
        };

        if !valid {
            return Ok(AnalysisResult::outside(Some(format!(
                "Outside {}",
                self.region.name
            ))));
        }

        let data = AreaData {
            soil: sample_soil(&mut *rng),
            rainfall: sample_rainfall(&mut *rng),
            vegetation: sample_vegetation(&mut *rng),
        };
        // Searches keep the place name; map selections are reported generically
        let label = match request.origin {
            SelectionOrigin::Search => request.geometry.label().map(str::to_string),
            SelectionOrigin::MapClick | SelectionOrigin::Drawn => Some(CUSTOM_AREA.to_string()),
        };
        Ok(AnalysisResult::valid(label, data))
    }
}

impl AnalysisService for MockAnalysisService {
    fn analyze(&self, request: AnalysisRequest) -> AnalysisFuture {
        let service = self.clone();
        let delay = self.delay_for(request.origin);
        async move {
            tokio::time::sleep(delay).await;
            service.resolve(&request)
        }
        .boxed()
    }
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    (value * scale).round() / scale
}

pub fn sample_soil<R: Rng + ?Sized>(rng: &mut R) -> SoilRecord {
    SoilRecord {
        soil_type: SoilType::ALL[rng.random_range(0..SoilType::ALL.len())],
        ph: round_to(6.0 + rng.random::<f64>() * 2.5, 1),
        nutrients: "N-P-K Available".to_string(),
        fertility: Fertility::ALL[rng.random_range(0..Fertility::ALL.len())],
    }
}

pub fn sample_rainfall<R: Rng + ?Sized>(rng: &mut R) -> RainfallRecord {
    RainfallRecord {
        annual_mm: rng.random_range(600..1400),
        pattern: "Monsoon Dependent".to_string(),
        reliability: if rng.random_bool(0.5) {
            Reliability::Good
        } else {
            Reliability::Moderate
        },
    }
}

pub fn sample_vegetation<R: Rng + ?Sized>(rng: &mut R) -> VegetationRecord {
    VegetationRecord {
        index: round_to(0.3 + rng.random::<f64>() * 0.5, 2),
        trend: if rng.random_bool(0.4) {
            Trend::Improving
        } else {
            Trend::Stable
        },
        season: "Post-Monsoon".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Geometry, LatLon};
    use tokio::time::Instant;

    fn service(config: AgriGisConfig) -> MockAnalysisService {
        MockAnalysisService::new(&config, BoundaryRegion::tamil_nadu())
    }

    fn seeded() -> AgriGisConfig {
        AgriGisConfig {
            rng_seed: Some(42),
            ..AgriGisConfig::default()
        }
    }

    fn click(lat: f64, lon: f64) -> AnalysisRequest {
        AnalysisRequest {
            geometry: Geometry::point(LatLon::new(lat, lon)),
            origin: SelectionOrigin::MapClick,
        }
    }

    fn has_decimals(value: f64, decimals: i32) -> bool {
        let scaled = value * 10f64.powi(decimals);
        (scaled - scaled.round()).abs() < 1e-6
    }

    #[test]
    fn test_sampled_ranges() {
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..2000 {
            let soil = sample_soil(&mut rng);
            assert!((6.0..=8.5).contains(&soil.ph), "ph {}", soil.ph);
            assert!(has_decimals(soil.ph, 1));
            assert_eq!(soil.nutrients, "N-P-K Available");

            let rain = sample_rainfall(&mut rng);
            assert!((600..=1400).contains(&rain.annual_mm));
            assert_eq!(rain.pattern, "Monsoon Dependent");

            let veg = sample_vegetation(&mut rng);
            assert!((0.3..=0.8).contains(&veg.index), "index {}", veg.index);
            assert!(has_decimals(veg.index, 2));
            assert_eq!(veg.season, "Post-Monsoon");
        }
    }

    #[test]
    fn test_validity_and_sections_are_coupled() {
        let svc = service(seeded());
        let mut valid = 0;
        let mut invalid = 0;
        for _ in 0..500 {
            let result = svc.resolve(&click(11.0, 78.0)).unwrap();
            if result.is_valid() {
                valid += 1;
                assert!(result.soil().is_some());
                assert!(result.rainfall().is_some());
                assert!(result.vegetation().is_some());
                assert_eq!(result.location_label(), Some("Custom Area"));
            } else {
                invalid += 1;
                assert!(result.soil().is_none());
                assert!(result.rainfall().is_none());
                assert!(result.vegetation().is_none());
                assert_eq!(result.location_label(), Some("Outside Tamil Nadu"));
            }
        }
        // 80% valid: both outcomes show up over 500 draws
        assert!(valid > 300, "valid {valid}");
        assert!(invalid > 30, "invalid {invalid}");
    }

    #[test]
    fn test_map_selections_are_labelled_custom_area() {
        let svc = service(AgriGisConfig {
            validity: ValidityRule::CoinFlip {
                valid_probability: 1.0,
            },
            ..seeded()
        });
        let drawn = AnalysisRequest {
            geometry: Geometry::rectangle(LatLon::new(10.0, 78.0), LatLon::new(11.0, 79.0))
                .unwrap(),
            origin: SelectionOrigin::Drawn,
        };
        for request in [click(11.0, 78.0), drawn] {
            let result = svc.resolve(&request).unwrap();
            assert!(result.is_valid());
            assert_eq!(result.location_label(), Some("Custom Area"));
        }
    }

    #[test]
    fn test_search_results_are_always_valid() {
        let svc = service(AgriGisConfig {
            validity: ValidityRule::CoinFlip {
                valid_probability: 0.0,
            },
            ..seeded()
        });
        let request = AnalysisRequest {
            geometry: Geometry::named_point(LatLon::new(13.0827, 80.2707), "Chennai"),
            origin: SelectionOrigin::Search,
        };
        for _ in 0..50 {
            let result = svc.resolve(&request).unwrap();
            assert!(result.is_valid());
            assert_eq!(result.location_label(), Some("Chennai"));
        }
        assert!(!svc.resolve(&click(11.0, 78.0)).unwrap().is_valid());
    }

    #[test]
    fn test_containment_rule_uses_boundary() {
        let svc = service(AgriGisConfig {
            validity: ValidityRule::Containment,
            ..seeded()
        });
        assert!(svc.resolve(&click(11.1271, 78.6569)).unwrap().is_valid());
        assert!(!svc.resolve(&click(20.0, 78.0)).unwrap().is_valid());
    }

    #[test]
    fn test_failure_path() {
        let svc = service(AgriGisConfig {
            failure_probability: 1.0,
            ..seeded()
        });
        assert!(matches!(
            svc.resolve(&click(11.0, 78.0)),
            Err(AnalysisError::ServiceUnavailable(_))
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn test_analyze_waits_for_delay() {
        let svc = service(seeded());

        let start = Instant::now();
        svc.analyze(click(11.0, 78.0)).await.unwrap();
        let elapsed = start.elapsed();
        assert!(elapsed >= Duration::from_millis(2000), "{elapsed:?}");
        assert!(elapsed < Duration::from_millis(2010), "{elapsed:?}");

        let start = Instant::now();
        svc.analyze(AnalysisRequest {
            geometry: Geometry::named_point(LatLon::new(9.9252, 78.1198), "Madurai"),
            origin: SelectionOrigin::Search,
        })
        .await
        .unwrap();
        let elapsed = start.elapsed();
        assert!(elapsed >= Duration::from_millis(1500), "{elapsed:?}");
        assert!(elapsed < Duration::from_millis(1510), "{elapsed:?}");
    }

    #[tokio::test(start_paused = true)]
    async fn test_analyze_is_not_ready_early() {
        let svc = service(seeded());
        let early =
            tokio::time::timeout(Duration::from_millis(1999), svc.analyze(click(11.0, 78.0))).await;
        assert!(early.is_err());
    }
}
