//! Results panel
//!
//! A pure function of the selection snapshot. Each data section is rendered
//! only when its record is present.

use crate::domain::{AnalysisResult, RainfallRecord, SoilRecord, VegetationRecord};
use crate::error::AnalysisError;
use crate::session::state::SelectionState;
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum ResultsDisplay {
    /// Analysis in flight
    Loading,
    /// Nothing selected yet
    Empty,
    /// The analysis call failed; the user may retry
    Failed { message: String },
    /// Selection lies outside the supported region
    Outside {
        region: String,
        location: Option<String>,
    },
    Valid {
        location: Option<String>,
        soil: Option<SoilRecord>,
        rainfall: Option<RainfallRecord>,
        vegetation: Option<VegetationRecord>,
    },
}

pub fn render(
    region: &str,
    loading: bool,
    result: Option<&AnalysisResult>,
    failure: Option<&AnalysisError>,
) -> ResultsDisplay {
    if loading {
        return ResultsDisplay::Loading;
    }
    if let Some(failure) = failure {
        return ResultsDisplay::Failed {
            message: failure.to_string(),
        };
    }
    let Some(result) = result else {
        return ResultsDisplay::Empty;
    };
    let location = result.location_label().map(str::to_string);
    if !result.is_valid() {
        return ResultsDisplay::Outside {
            region: region.to_string(),
            location,
        };
    }
    ResultsDisplay::Valid {
        location,
        soil: result.soil().cloned(),
        rainfall: result.rainfall().cloned(),
        vegetation: result.vegetation().cloned(),
    }
}

pub fn view(state: &SelectionState, region: &str) -> ResultsDisplay {
    render(region, state.is_loading(), state.result(), state.failure())
}

impl fmt::Display for ResultsDisplay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResultsDisplay::Loading => writeln!(f, "Analyzing..."),
            ResultsDisplay::Empty => {
                writeln!(f, "Analysis Results")?;
                writeln!(
                    f,
                    "Select a location or draw a polygon to view agricultural data."
                )
            }
            ResultsDisplay::Failed { message } => {
                writeln!(f, "Analysis Failed")?;
                writeln!(f, "{}", message)?;
                writeln!(f, "Retry to analyze the selection again.")
            }
            ResultsDisplay::Outside { region, location } => {
                writeln!(f, "Analysis Results")?;
                writeln!(f, "Location Outside {}", region)?;
                if let Some(location) = location {
                    writeln!(f, "[{}]", location)?;
                }
                Ok(())
            }
            ResultsDisplay::Valid {
                location,
                soil,
                rainfall,
                vegetation,
            } => {
                writeln!(f, "Analysis Results")?;
                writeln!(f, "Location Valid")?;
                if let Some(location) = location {
                    writeln!(f, "[{}]", location)?;
                }
                if let Some(soil) = soil {
                    writeln!(f, "Soil Information")?;
                    writeln!(f, "  Type: {}", soil.soil_type.name())?;
                    writeln!(f, "  pH Level: {:.1}", soil.ph)?;
                    writeln!(f, "  Nutrients: {}", soil.nutrients)?;
                    writeln!(f, "  Fertility: {}", soil.fertility.name())?;
                }
                if let Some(rain) = rainfall {
                    writeln!(f, "Rainfall Data")?;
                    writeln!(f, "  Annual: {}mm", rain.annual_mm)?;
                    writeln!(f, "  Pattern: {}", rain.pattern)?;
                    writeln!(f, "  Reliability: {}", rain.reliability.name())?;
                }
                if let Some(veg) = vegetation {
                    writeln!(f, "Vegetation Index (NDVI)")?;
                    writeln!(f, "  Current NDVI: {:.2}", veg.index)?;
                    writeln!(f, "  Trend: {}", veg.trend.name())?;
                    writeln!(f, "  Season: {}", veg.season)?;
                }
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::controller::tests::tagged;

    const TN: &str = "Tamil Nadu";

    #[test]
    fn test_loading_wins_over_result() {
        let result = tagged(900);
        assert_eq!(render(TN, true, Some(&result), None), ResultsDisplay::Loading);
        assert_eq!(render(TN, true, None, None).to_string(), "Analyzing...\n");
    }

    #[test]
    fn test_empty_state_prompts_for_selection() {
        let display = view(&SelectionState::default(), TN);
        assert_eq!(display, ResultsDisplay::Empty);
        assert!(display.to_string().contains("Select a location or draw a polygon"));
    }

    #[test]
    fn test_failure_state() {
        let err = AnalysisError::ServiceUnavailable("timeout".to_string());
        let display = render(TN, false, None, Some(&err));
        assert_eq!(
            display,
            ResultsDisplay::Failed {
                message: "analysis service unavailable: timeout".to_string()
            }
        );
        assert!(display.to_string().contains("Retry"));
    }

    #[test]
    fn test_outside_region_has_no_sections() {
        let result = AnalysisResult::outside(Some("Outside Tamil Nadu".to_string()));
        let display = render(TN, false, Some(&result), None);
        assert_eq!(
            display,
            ResultsDisplay::Outside {
                region: TN.to_string(),
                location: Some("Outside Tamil Nadu".to_string())
            }
        );
        let text = display.to_string();
        assert!(text.contains("Location Outside Tamil Nadu\n"));
        assert!(!text.contains("Soil Information"));
        assert!(!text.contains("Rainfall Data"));
    }

    #[test]
    fn test_valid_result_renders_all_sections() {
        let result = tagged(1234);
        let text = render(TN, false, Some(&result), None).to_string();
        assert!(text.contains("Location Valid"));
        assert!(text.contains("[result 1234]"));
        assert!(text.contains("  Type: Black Soil"));
        assert!(text.contains("  pH Level: 7.2"));
        assert!(text.contains("  Annual: 1234mm"));
        assert!(text.contains("  Reliability: Good"));
        assert!(text.contains("  Current NDVI: 0.55"));
        assert!(text.contains("  Trend: Stable"));
        assert!(text.contains("  Season: Post-Monsoon"));
    }

    #[test]
    fn test_missing_section_is_skipped() {
        let result = tagged(800);
        let display = ResultsDisplay::Valid {
            location: None,
            soil: result.soil().cloned(),
            rainfall: None,
            vegetation: result.vegetation().cloned(),
        };
        let text = display.to_string();
        assert!(text.contains("Soil Information"));
        assert!(!text.contains("Rainfall Data"));
        assert!(text.contains("Vegetation Index (NDVI)"));
    }
}
