// =============================================================================
// Disaster descriptor: the nine input fields for one prediction
// =============================================================================

// Input bounds enforced by the form layer. The estimator itself does not
// re-validate; see `DescriptorForm` in the ui crate for the clamping.
pub const YEAR_MIN: i32 = 1970;
pub const YEAR_MAX: i32 = 2100;
pub const MAGNITUDE_MIN: f64 = 0.0;
pub const MAGNITUDE_MAX: f64 = 10.0;

/// Top-level disaster classification. This is the one closed field in the
/// descriptor; everything else categorical is free text matched against the
/// model's training vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisasterGroup {
    Natural,
    Technological,
}

impl DisasterGroup {
    pub const ALL: [DisasterGroup; 2] = [DisasterGroup::Natural, DisasterGroup::Technological];

    pub fn name(self) -> &'static str {
        match self {
            DisasterGroup::Natural => "Natural",
            DisasterGroup::Technological => "Technological",
        }
    }

    /// Feature-space encoding. The closed enum bypasses the vocabulary
    /// lookup used for free-text fields.
    pub fn encoded(self) -> f64 {
        match self {
            DisasterGroup::Natural => 0.0,
            DisasterGroup::Technological => 1.0,
        }
    }
}

/// One disaster event as described by the user. Built fresh from the form on
/// every trigger action and discarded after the estimate is displayed.
#[derive(Debug, Clone, PartialEq)]
pub struct DisasterDescriptor {
    pub year: i32,
    pub country: String,
    pub region: String,
    pub continent: String,
    pub group: DisasterGroup,
    pub subgroup: String,
    pub disaster_type: String,
    pub subtype: String,
    pub magnitude: f64,
}
