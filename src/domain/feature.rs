/// Feature classification based on piste GeoJSON properties
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeatureKind {
    /// A marked ski trail (piste)
    Run,
    /// Cable transport (chairlift, gondola, etc.)
    Lift,
}

impl FeatureKind {
    /// Classify a feature from its `type` and `aerialway` properties
    pub fn from_properties(type_tag: Option<&str>, aerialway: Option<&str>) -> FeatureKind {
        if aerialway.is_some() || type_tag == Some("lift") {
            FeatureKind::Lift
        } else {
            FeatureKind::Run
        }
    }
}

/// A single piste or lift trace with coordinates in WGS84
#[derive(Debug, Clone)]
pub struct LineFeature {
    pub name: Option<String>,
    pub kind: FeatureKind,
    /// Difficulty rating, passed through untouched (lifts have none)
    pub difficulty: Option<String>,
    /// Points as (lng, lat) pairs - GeoJSON axis order
    pub points: Vec<(f64, f64)>,
}

impl LineFeature {
    pub fn new(points: Vec<(f64, f64)>, kind: FeatureKind) -> Self {
        Self {
            name: None,
            kind,
            difficulty: None,
            points,
        }
    }

    /// A line contributes to the camera pose only with at least 2 vertices
    pub fn qualifies(&self) -> bool {
        self.points.len() >= 2
    }
}

/// All line features belonging to one resort
#[derive(Debug, Clone)]
pub struct RegionGeometrySet {
    pub slug: String,
    pub features: Vec<LineFeature>,
}

impl RegionGeometrySet {
    pub fn new(slug: impl Into<String>, features: Vec<LineFeature>) -> Self {
        Self {
            slug: slug.into(),
            features,
        }
    }
}
