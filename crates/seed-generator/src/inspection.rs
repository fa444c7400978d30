//! Vehicle inspection outcomes.
//!
//! Each of the nineteen checks passes independently with its own
//! probability. The car passes overall when at least half the checks pass.

use rand::Rng;

pub const INSPECTION_STATION: &str = "Bangkok Inspection Center";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InspectionCheck {
    Brake,
    Handbrake,
    Alignment,
    Noise,
    Emission,
    Horn,
    Speedometer,
    HighLowBeam,
    SignalLights,
    OtherLights,
    Windshield,
    Steering,
    WheelsTires,
    FuelTank,
    Chassis,
    Body,
    DoorsFloor,
    Seatbelt,
    Wiper,
}

pub const CHECK_COUNT: usize = 19;

impl InspectionCheck {
    /// Checks in column order of `car_inspection_results`.
    pub const ALL: [InspectionCheck; CHECK_COUNT] = [
        InspectionCheck::Brake,
        InspectionCheck::Handbrake,
        InspectionCheck::Alignment,
        InspectionCheck::Noise,
        InspectionCheck::Emission,
        InspectionCheck::Horn,
        InspectionCheck::Speedometer,
        InspectionCheck::HighLowBeam,
        InspectionCheck::SignalLights,
        InspectionCheck::OtherLights,
        InspectionCheck::Windshield,
        InspectionCheck::Steering,
        InspectionCheck::WheelsTires,
        InspectionCheck::FuelTank,
        InspectionCheck::Chassis,
        InspectionCheck::Body,
        InspectionCheck::DoorsFloor,
        InspectionCheck::Seatbelt,
        InspectionCheck::Wiper,
    ];

    pub fn column(self) -> &'static str {
        match self {
            InspectionCheck::Brake => "brake_result",
            InspectionCheck::Handbrake => "handbrake_result",
            InspectionCheck::Alignment => "alignment_result",
            InspectionCheck::Noise => "noise_result",
            InspectionCheck::Emission => "emission_result",
            InspectionCheck::Horn => "horn_result",
            InspectionCheck::Speedometer => "speedometer_result",
            InspectionCheck::HighLowBeam => "high_low_beam_result",
            InspectionCheck::SignalLights => "signal_lights_result",
            InspectionCheck::OtherLights => "other_lights_result",
            InspectionCheck::Windshield => "windshield_result",
            InspectionCheck::Steering => "steering_result",
            InspectionCheck::WheelsTires => "wheels_tires_result",
            InspectionCheck::FuelTank => "fuel_tank_result",
            InspectionCheck::Chassis => "chassis_result",
            InspectionCheck::Body => "body_result",
            InspectionCheck::DoorsFloor => "doors_floor_result",
            InspectionCheck::Seatbelt => "seatbelt_result",
            InspectionCheck::Wiper => "wiper_result",
        }
    }

    pub fn pass_probability(self) -> f64 {
        match self {
            InspectionCheck::Horn | InspectionCheck::Seatbelt => 0.90,
            InspectionCheck::Brake
            | InspectionCheck::Speedometer
            | InspectionCheck::Windshield
            | InspectionCheck::FuelTank
            | InspectionCheck::Body
            | InspectionCheck::DoorsFloor => 0.85,
            InspectionCheck::Handbrake
            | InspectionCheck::HighLowBeam
            | InspectionCheck::OtherLights
            | InspectionCheck::Steering
            | InspectionCheck::Chassis
            | InspectionCheck::Wiper => 0.80,
            InspectionCheck::Alignment
            | InspectionCheck::Emission
            | InspectionCheck::SignalLights
            | InspectionCheck::WheelsTires => 0.75,
            InspectionCheck::Noise => 0.70,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InspectionResult {
    pub station: String,
    outcomes: [bool; CHECK_COUNT],
}

impl InspectionResult {
    /// Outcomes indexed like [`InspectionCheck::ALL`].
    pub fn from_outcomes(outcomes: [bool; CHECK_COUNT]) -> Self {
        Self {
            station: INSPECTION_STATION.to_string(),
            outcomes,
        }
    }

    pub fn generate<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut outcomes = [false; CHECK_COUNT];
        for (slot, check) in outcomes.iter_mut().zip(InspectionCheck::ALL) {
            *slot = rng.gen_bool(check.pass_probability());
        }
        Self::from_outcomes(outcomes)
    }

    pub fn outcomes(&self) -> &[bool; CHECK_COUNT] {
        &self.outcomes
    }

    /// `(column, passed)` pairs in column order.
    pub fn columns(&self) -> impl Iterator<Item = (&'static str, bool)> + '_ {
        InspectionCheck::ALL
            .iter()
            .zip(self.outcomes.iter())
            .map(|(check, passed)| (check.column(), *passed))
    }

    pub fn passed_count(&self) -> usize {
        self.outcomes.iter().filter(|passed| **passed).count()
    }

    pub fn overall_pass(&self) -> bool {
        overall_pass(self.passed_count(), CHECK_COUNT)
    }
}

/// True when at least half of `total` checks passed.
pub fn overall_pass(passed: usize, total: usize) -> bool {
    total > 0 && passed * 2 >= total
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    fn with_passes(count: usize) -> InspectionResult {
        let mut outcomes = [false; CHECK_COUNT];
        for slot in outcomes.iter_mut().take(count) {
            *slot = true;
        }
        InspectionResult::from_outcomes(outcomes)
    }

    #[test]
    fn test_overall_pass_threshold() {
        assert!(with_passes(10).overall_pass());
        assert!(!with_passes(9).overall_pass());
        assert!(with_passes(19).overall_pass());
        assert!(!with_passes(0).overall_pass());
    }

    #[test]
    fn test_columns_unique() {
        let columns: HashSet<_> = InspectionCheck::ALL.iter().map(|c| c.column()).collect();
        assert_eq!(columns.len(), CHECK_COUNT);
    }

    #[test]
    fn test_probabilities_in_range() {
        for check in InspectionCheck::ALL {
            let p = check.pass_probability();
            assert!((0.70..=0.90).contains(&p), "{check:?} has {p}");
        }
    }

    #[test]
    fn test_generated_overall_is_consistent() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..200 {
            let result = InspectionResult::generate(&mut rng);
            assert_eq!(result.overall_pass(), result.passed_count() * 2 >= CHECK_COUNT);
            assert_eq!(result.columns().count(), CHECK_COUNT);
            assert_eq!(result.station, INSPECTION_STATION);
        }
    }
}
