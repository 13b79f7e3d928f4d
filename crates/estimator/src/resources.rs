// =============================================================================
// Fixed per-capita resource multipliers
// =============================================================================

/// The four relief resources derived from a population estimate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    FoodPackets,
    WaterLiters,
    ShelterTents,
    MedicalKits,
}

impl ResourceKind {
    /// Display order, matching the order quantities are reported in.
    pub const ALL: [ResourceKind; 4] = [
        ResourceKind::FoodPackets,
        ResourceKind::WaterLiters,
        ResourceKind::ShelterTents,
        ResourceKind::MedicalKits,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ResourceKind::FoodPackets => "Food (packets)",
            ResourceKind::WaterLiters => "Water (liters)",
            ResourceKind::ShelterTents => "Shelter (tents)",
            ResourceKind::MedicalKits => "Medical Kits",
        }
    }

    /// Units required per affected person.
    pub fn multiplier(self) -> f64 {
        match self {
            ResourceKind::FoodPackets => 14.0,
            ResourceKind::WaterLiters => 21.0,
            ResourceKind::ShelterTents => 0.25,
            ResourceKind::MedicalKits => 0.1,
        }
    }
}

/// Quantity of every resource for the given population, in
/// [`ResourceKind::ALL`] order. Pure linear functions of the population;
/// nothing else feeds in.
pub fn resource_requirements(population: u64) -> [(ResourceKind, f64); 4] {
    ResourceKind::ALL.map(|kind| (kind, population as f64 * kind.multiplier()))
}
