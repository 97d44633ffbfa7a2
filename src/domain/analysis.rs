//! Agricultural figures reported for a selection

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoilType {
    Red,
    Black,
    Alluvial,
    Laterite,
}

impl SoilType {
    pub const ALL: [SoilType; 4] = [
        SoilType::Red,
        SoilType::Black,
        SoilType::Alluvial,
        SoilType::Laterite,
    ];

    pub fn name(self) -> &'static str {
        match self {
            SoilType::Red => "Red Soil",
            SoilType::Black => "Black Soil",
            SoilType::Alluvial => "Alluvial Soil",
            SoilType::Laterite => "Laterite Soil",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fertility {
    High,
    Medium,
    Low,
}

impl Fertility {
    pub const ALL: [Fertility; 3] = [Fertility::High, Fertility::Medium, Fertility::Low];

    pub fn name(self) -> &'static str {
        match self {
            Fertility::High => "High",
            Fertility::Medium => "Medium",
            Fertility::Low => "Low",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reliability {
    Good,
    Moderate,
}

impl Reliability {
    pub fn name(self) -> &'static str {
        match self {
            Reliability::Good => "Good",
            Reliability::Moderate => "Moderate",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trend {
    Improving,
    Stable,
}

impl Trend {
    pub fn name(self) -> &'static str {
        match self {
            Trend::Improving => "Improving",
            Trend::Stable => "Stable",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SoilRecord {
    pub soil_type: SoilType,
    /// 6.0 to 8.5, one decimal place
    pub ph: f64,
    pub nutrients: String,
    pub fertility: Fertility,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RainfallRecord {
    pub annual_mm: u32,
    pub pattern: String,
    pub reliability: Reliability,
}

#[derive(Debug, Clone, PartialEq)]
pub struct VegetationRecord {
    /// NDVI, 0.3 to 0.8, two decimal places
    pub index: f64,
    pub trend: Trend,
    pub season: String,
}

/// The three data sections of a valid analysis
#[derive(Debug, Clone, PartialEq)]
pub struct AreaData {
    pub soil: SoilRecord,
    pub rainfall: RainfallRecord,
    pub vegetation: VegetationRecord,
}

/// Outcome of analysing one geometry
///
/// The data sections exist exactly when the result is valid.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisResult {
    location_label: Option<String>,
    data: Option<AreaData>,
}

impl AnalysisResult {
    pub fn valid(location_label: Option<String>, data: AreaData) -> Self {
        Self {
            location_label,
            data: Some(data),
        }
    }

    pub fn outside(location_label: Option<String>) -> Self {
        Self {
            location_label,
            data: None,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.data.is_some()
    }

    pub fn location_label(&self) -> Option<&str> {
        self.location_label.as_deref()
    }

    pub fn soil(&self) -> Option<&SoilRecord> {
        self.data.as_ref().map(|d| &d.soil)
    }

    pub fn rainfall(&self) -> Option<&RainfallRecord> {
        self.data.as_ref().map(|d| &d.rainfall)
    }

    pub fn vegetation(&self) -> Option<&VegetationRecord> {
        self.data.as_ref().map(|d| &d.vegetation)
    }
}
