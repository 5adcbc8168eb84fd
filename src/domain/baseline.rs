//! Population baseline tables and the percentile comparator.
//!
//! Tables are 5-year age bands. Ages below or above the tabulated range use
//! the edge constants next to each table; there is no extrapolation.

use super::patient::{Ethnicity, Sex};

/// A table of 5-year bands starting at `first_band_start`.
struct BandTable<const N: usize> {
    first_band_start: u32,
    values: [f64; N],
    below: f64,
    above: f64,
}

impl<const N: usize> BandTable<N> {
    fn lookup(&self, age: u32) -> f64 {
        if age < self.first_band_start {
            return self.below;
        }
        let band = ((age - self.first_band_start) / 5) as usize;
        self.values.get(band).copied().unwrap_or(self.above)
    }
}

// 10-year ASCVD risk (%), 40-44 .. 75-79.
const CARDIOVASCULAR_FEMALE: BandTable<8> = BandTable {
    first_band_start: 40,
    values: [1.0, 1.6, 2.5, 3.6, 5.2, 7.5, 10.5, 14.5],
    below: 0.5,
    above: 18.0,
};

const CARDIOVASCULAR_MALE: BandTable<8> = BandTable {
    first_band_start: 40,
    values: [2.5, 3.8, 5.6, 7.9, 10.8, 14.5, 19.0, 24.5],
    below: 1.5,
    above: 29.0,
};

// 5-year invasive breast cancer risk (%), 35-39 .. 80-84, one row per
// ethnicity in `Ethnicity::index` order.
const BREAST_FIVE_YEAR: [BandTable<10>; 5] = [
    BandTable {
        first_band_start: 35,
        values: [0.30, 0.60, 0.95, 1.20, 1.45, 1.70, 1.90, 2.00, 1.95, 1.85],
        below: 0.15,
        above: 1.70,
    },
    BandTable {
        first_band_start: 35,
        values: [0.35, 0.65, 0.95, 1.10, 1.25, 1.40, 1.50, 1.55, 1.50, 1.40],
        below: 0.20,
        above: 1.30,
    },
    BandTable {
        first_band_start: 35,
        values: [0.20, 0.45, 0.70, 0.85, 1.00, 1.15, 1.25, 1.30, 1.25, 1.15],
        below: 0.10,
        above: 1.05,
    },
    BandTable {
        first_band_start: 35,
        values: [0.20, 0.45, 0.70, 0.85, 0.95, 1.05, 1.10, 1.15, 1.10, 1.00],
        below: 0.10,
        above: 0.95,
    },
    BandTable {
        first_band_start: 35,
        values: [0.28, 0.55, 0.90, 1.10, 1.35, 1.55, 1.75, 1.85, 1.80, 1.70],
        below: 0.15,
        above: 1.55,
    },
];

// 10-year breast cancer risk (%) for the simplified model, 30-34 .. 75-79.
const BREAST_TEN_YEAR: BandTable<10> = BandTable {
    first_band_start: 30,
    values: [0.5, 0.7, 1.5, 1.9, 2.3, 2.8, 3.5, 3.8, 3.9, 3.9],
    below: 0.3,
    above: 3.8,
};

// 10-year major osteoporotic fracture probability (%), 50-54 .. 85-89.
const FRACTURE_FEMALE: BandTable<8> = BandTable {
    first_band_start: 50,
    values: [4.0, 5.5, 7.5, 10.0, 13.5, 17.0, 20.0, 22.0],
    below: 3.0,
    above: 23.0,
};

const FRACTURE_MALE: BandTable<8> = BandTable {
    first_band_start: 50,
    values: [2.0, 2.6, 3.4, 4.5, 6.0, 7.8, 9.5, 11.0],
    below: 1.5,
    above: 12.0,
};

// Mean Wells-style VTE score, 40-44 .. 75-79.
const VTE_SCORE: BandTable<8> = BandTable {
    first_band_start: 40,
    values: [0.4, 0.5, 0.6, 0.7, 0.9, 1.1, 1.3, 1.5],
    below: 0.3,
    above: 1.7,
};

/// Population 10-year cardiovascular risk (%).
#[must_use]
pub fn cardiovascular(age: u32, sex: Sex) -> f64 {
    match sex {
        Sex::Female => CARDIOVASCULAR_FEMALE.lookup(age),
        Sex::Male => CARDIOVASCULAR_MALE.lookup(age),
    }
}

/// Population 5-year breast cancer risk (%).
#[must_use]
pub fn breast_cancer_five_year(age: u32, ethnicity: Ethnicity) -> f64 {
    BREAST_FIVE_YEAR[ethnicity.index()].lookup(age)
}

/// Population 10-year breast cancer risk (%).
#[must_use]
pub fn breast_cancer_ten_year(age: u32) -> f64 {
    BREAST_TEN_YEAR.lookup(age)
}

/// Population 10-year major osteoporotic fracture risk (%).
#[must_use]
pub fn major_fracture(age: u32, sex: Sex) -> f64 {
    match sex {
        Sex::Female => FRACTURE_FEMALE.lookup(age),
        Sex::Male => FRACTURE_MALE.lookup(age),
    }
}

/// Population mean VTE likelihood score.
#[must_use]
pub fn vte_score(age: u32) -> f64 {
    VTE_SCORE.lookup(age)
}

/// Percentile rank of a patient value against its baseline.
///
/// A step function over the ratio `patient / baseline`, not a distributional
/// estimate.
#[must_use]
pub fn percentile_rank(patient: f64, baseline: f64) -> u8 {
    if baseline <= 0.0 || !baseline.is_finite() {
        return 50;
    }
    let ratio = patient / baseline;
    match ratio {
        r if r <= 0.5 => 25,
        r if r <= 0.8 => 40,
        r if r <= 1.2 => 50,
        r if r <= 1.5 => 65,
        r if r <= 2.0 => 75,
        r if r <= 3.0 => 85,
        _ => 95,
    }
}
