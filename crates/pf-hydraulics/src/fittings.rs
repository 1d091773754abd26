//! Pipe fitting catalog and equivalent-length tables.
//!
//! The fitting catalog is fixed and ordered: every equivalent-length row is a
//! vector indexed by `Fitting::index()`. Sizes are typed; string labels are
//! only parsed at the input boundary.

use crate::error::{HydroError, HydroResult};
use pf_core::{Length, ensure_finite, mm};

/// Number of fitting types in the fixed catalog.
pub const FITTING_COUNT: usize = 19;

/// Number of nominal pipe sizes in the size table.
pub const SIZE_COUNT: usize = 15;

/// Fixed, ordered catalog of pipe fittings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Fitting {
    Elbow90LongRadius,
    Elbow90MediumRadius,
    Elbow90ShortRadius,
    Elbow45,
    Bend90WideRadius,
    Bend90TightRadius,
    Bend45,
    EntranceFlush,
    EntranceReentrant,
    GateValveOpen,
    GlobeValveOpen,
    AngleValveOpen,
    TeeRun,
    TeeBranch,
    TeeLateral,
    FootValveStrainer,
    PipeExit,
    CheckValveSwing,
    CheckValveLift,
}

impl Fitting {
    pub const ALL: [Fitting; FITTING_COUNT] = [
        Fitting::Elbow90LongRadius,
        Fitting::Elbow90MediumRadius,
        Fitting::Elbow90ShortRadius,
        Fitting::Elbow45,
        Fitting::Bend90WideRadius,
        Fitting::Bend90TightRadius,
        Fitting::Bend45,
        Fitting::EntranceFlush,
        Fitting::EntranceReentrant,
        Fitting::GateValveOpen,
        Fitting::GlobeValveOpen,
        Fitting::AngleValveOpen,
        Fitting::TeeRun,
        Fitting::TeeBranch,
        Fitting::TeeLateral,
        Fitting::FootValveStrainer,
        Fitting::PipeExit,
        Fitting::CheckValveSwing,
        Fitting::CheckValveLift,
    ];

    /// Stable column index into equivalent-length rows.
    pub fn index(self) -> usize {
        self as usize
    }
}

/// Nominal pipe sizes, 1/2" through 14".
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NominalSize {
    Dn13,
    Dn19,
    Dn25,
    Dn32,
    Dn38,
    Dn50,
    Dn63,
    Dn75,
    Dn100,
    Dn125,
    Dn150,
    Dn200,
    Dn250,
    Dn300,
    Dn350,
}

impl NominalSize {
    pub const ALL: [NominalSize; SIZE_COUNT] = [
        NominalSize::Dn13,
        NominalSize::Dn19,
        NominalSize::Dn25,
        NominalSize::Dn32,
        NominalSize::Dn38,
        NominalSize::Dn50,
        NominalSize::Dn63,
        NominalSize::Dn75,
        NominalSize::Dn100,
        NominalSize::Dn125,
        NominalSize::Dn150,
        NominalSize::Dn200,
        NominalSize::Dn250,
        NominalSize::Dn300,
        NominalSize::Dn350,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    /// Display label, matching the catalog spreadsheets.
    pub fn label(self) -> &'static str {
        match self {
            NominalSize::Dn13 => "13 (1/2\")",
            NominalSize::Dn19 => "19 (3/4\")",
            NominalSize::Dn25 => "25 (1\")",
            NominalSize::Dn32 => "32 (1.1/4\")",
            NominalSize::Dn38 => "38 (1.1/2\")",
            NominalSize::Dn50 => "50 (2\")",
            NominalSize::Dn63 => "63 (2.1/2\")",
            NominalSize::Dn75 => "75 (3\")",
            NominalSize::Dn100 => "100 (4\")",
            NominalSize::Dn125 => "125 (5\")",
            NominalSize::Dn150 => "150 (6\")",
            NominalSize::Dn200 => "200 (8\")",
            NominalSize::Dn250 => "250 (10\")",
            NominalSize::Dn300 => "300 (12\")",
            NominalSize::Dn350 => "350 (14\")",
        }
    }

    /// Exact-label lookup. Unknown labels are a hard error, never a default.
    pub fn from_label(label: &str) -> HydroResult<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|s| s.label() == label)
            .ok_or_else(|| HydroError::UnknownSize {
                label: label.to_string(),
            })
    }

    /// SCH 40 internal diameter, mm.
    pub fn inner_diameter_mm(self) -> f64 {
        match self {
            NominalSize::Dn13 => 15.80,
            NominalSize::Dn19 => 20.93,
            NominalSize::Dn25 => 26.64,
            NominalSize::Dn32 => 35.04,
            NominalSize::Dn38 => 40.90,
            NominalSize::Dn50 => 52.51,
            NominalSize::Dn63 => 62.71,
            NominalSize::Dn75 => 77.92,
            NominalSize::Dn100 => 102.26,
            NominalSize::Dn125 => 128.20,
            NominalSize::Dn150 => 154.06,
            NominalSize::Dn200 => 202.72,
            NominalSize::Dn250 => 254.51,
            NominalSize::Dn300 => 303.23,
            NominalSize::Dn350 => 333.34,
        }
    }

    pub fn inner_diameter(self) -> Length {
        mm(self.inner_diameter_mm())
    }
}

/// Per-size equivalent lengths (m) in `Fitting::ALL` order.
///
/// Standard table for steel pipe: elbows, bends, entrances, valves, tees,
/// exits and check valves for each nominal size.
const STANDARD_ROWS: [[f64; FITTING_COUNT]; SIZE_COUNT] = [
    // 13 (1/2")
    [
        0.3, 0.4, 0.5, 0.2, 0.2, 0.3, 0.2, 0.2, 0.4, 0.1, 4.9, 2.6, 0.3, 1.0, 1.0, 3.6, 0.4, 1.1,
        1.6,
    ],
    // 19 (3/4")
    [
        0.4, 0.6, 0.7, 0.3, 0.3, 0.4, 0.2, 0.2, 0.5, 0.1, 6.7, 3.6, 0.4, 1.4, 1.4, 5.6, 0.5, 1.6,
        2.4,
    ],
    // 25 (1")
    [
        0.5, 0.7, 0.8, 0.4, 0.3, 0.5, 0.2, 0.3, 0.7, 0.2, 8.2, 4.6, 0.5, 1.7, 1.7, 7.3, 0.7, 2.1,
        3.2,
    ],
    // 32 (1.1/4")
    [
        0.7, 0.9, 1.1, 0.5, 0.4, 0.6, 0.3, 0.4, 0.9, 0.2, 11.3, 5.6, 0.7, 2.3, 2.3, 10.0, 0.9,
        2.7, 4.0,
    ],
    // 38 (1.1/2")
    [
        0.9, 1.1, 1.3, 0.6, 0.5, 0.7, 0.3, 0.5, 1.0, 0.3, 13.4, 6.7, 0.9, 2.8, 2.8, 11.6, 1.0,
        3.2, 4.8,
    ],
    // 50 (2")
    [
        1.1, 1.4, 1.7, 0.8, 0.6, 0.9, 0.4, 0.7, 1.5, 0.4, 17.4, 8.5, 1.1, 3.5, 3.5, 14.0, 1.5,
        4.2, 6.4,
    ],
    // 63 (2.1/2")
    [
        1.3, 1.7, 2.0, 0.9, 0.8, 1.0, 0.5, 0.9, 1.9, 0.4, 21.0, 10.0, 1.3, 4.3, 4.3, 17.0, 1.9,
        5.2, 8.1,
    ],
    // 75 (3")
    [
        1.6, 2.1, 2.5, 1.2, 1.0, 1.3, 0.6, 1.1, 2.2, 0.5, 26.0, 13.0, 1.6, 5.2, 5.2, 20.0, 2.2,
        6.3, 9.7,
    ],
    // 100 (4")
    [
        2.1, 2.8, 3.4, 1.5, 1.3, 1.6, 0.7, 1.6, 3.2, 0.7, 34.0, 17.0, 2.1, 6.7, 6.7, 23.0, 3.2,
        8.4, 12.9,
    ],
    // 125 (5")
    [
        2.7, 3.7, 4.2, 1.9, 1.6, 2.1, 0.9, 2.0, 4.0, 0.9, 43.0, 21.0, 2.7, 8.4, 8.4, 30.0, 4.0,
        10.4, 16.1,
    ],
    // 150 (6")
    [
        3.4, 4.3, 4.9, 2.3, 1.9, 2.5, 1.1, 2.5, 5.0, 1.1, 51.0, 26.0, 3.4, 10.0, 10.0, 39.0, 5.0,
        12.5, 19.3,
    ],
    // 200 (8")
    [
        4.3, 5.5, 6.4, 3.0, 2.4, 3.3, 1.5, 3.5, 6.0, 1.4, 67.0, 34.0, 4.3, 13.0, 13.0, 52.0, 6.0,
        16.0, 25.0,
    ],
    // 250 (10")
    [
        5.5, 6.7, 7.9, 3.8, 3.0, 4.1, 1.8, 4.5, 7.5, 1.7, 85.0, 43.0, 5.5, 16.0, 16.0, 65.0, 7.5,
        20.0, 32.0,
    ],
    // 300 (12")
    [
        6.1, 7.9, 9.5, 4.6, 3.6, 4.8, 2.2, 5.5, 9.0, 2.1, 102.0, 51.0, 6.1, 19.0, 19.0, 78.0, 9.0,
        24.0, 38.0,
    ],
    // 350 (14")
    [
        7.3, 9.5, 10.5, 5.3, 4.4, 5.4, 2.5, 6.2, 11.0, 2.4, 120.0, 60.0, 7.3, 22.0, 22.0, 90.0,
        11.0, 28.0, 45.0,
    ],
];

static STANDARD_TABLE: EquivalentLengthTable = EquivalentLengthTable {
    rows: STANDARD_ROWS,
};

/// Size-indexed table of per-fitting equivalent pipe lengths (meters).
#[derive(Debug, Clone, PartialEq)]
pub struct EquivalentLengthTable {
    rows: [[f64; FITTING_COUNT]; SIZE_COUNT],
}

impl EquivalentLengthTable {
    /// Built-in table for commercial steel pipe.
    pub fn standard() -> &'static Self {
        &STANDARD_TABLE
    }

    /// Build from externally supplied rows, validated up front rather than
    /// trusted at lookup time.
    pub fn from_rows(rows: &[Vec<f64>]) -> HydroResult<Self> {
        if rows.len() != SIZE_COUNT {
            return Err(HydroError::InvalidArg {
                what: "equivalent-length table must have one row per nominal size",
            });
        }
        let mut table = [[0.0; FITTING_COUNT]; SIZE_COUNT];
        for (i, row) in rows.iter().enumerate() {
            if row.len() != FITTING_COUNT {
                return Err(HydroError::InvalidArg {
                    what: "equivalent-length row must have one column per fitting",
                });
            }
            for (j, &value) in row.iter().enumerate() {
                ensure_finite(value, "equivalent length")?;
                if value < 0.0 {
                    return Err(HydroError::InvalidArg {
                        what: "equivalent length must be non-negative",
                    });
                }
                table[i][j] = value;
            }
        }
        Ok(Self { rows: table })
    }

    /// Fixed-order equivalent-length vector for one size.
    pub fn row(&self, size: NominalSize) -> &[f64; FITTING_COUNT] {
        &self.rows[size.index()]
    }

    pub fn equivalent_length_m(&self, size: NominalSize, fitting: Fitting) -> f64 {
        self.rows[size.index()][fitting.index()]
    }

    /// Quantity-weighted total equivalent length for a list of fittings, m.
    pub fn total_for(&self, size: NominalSize, fittings: &[(Fitting, u32)]) -> f64 {
        fittings
            .iter()
            .map(|&(fitting, quantity)| {
                self.equivalent_length_m(size, fitting) * f64::from(quantity)
            })
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fitting_indices_are_stable() {
        for (i, fitting) in Fitting::ALL.iter().enumerate() {
            assert_eq!(fitting.index(), i);
        }
    }

    #[test]
    fn labels_round_trip() {
        for size in NominalSize::ALL {
            assert_eq!(NominalSize::from_label(size.label()).unwrap(), size);
        }
    }

    #[test]
    fn unknown_label_is_hard_error() {
        let err = NominalSize::from_label("40 (nonsense)").unwrap_err();
        assert!(matches!(err, HydroError::UnknownSize { .. }));
    }

    #[test]
    fn two_inch_short_elbow_value() {
        let table = EquivalentLengthTable::standard();
        let eq = table.equivalent_length_m(NominalSize::Dn50, Fitting::Elbow90ShortRadius);
        assert!((eq - 1.7).abs() < 1e-12);
    }

    #[test]
    fn total_is_quantity_weighted() {
        let table = EquivalentLengthTable::standard();
        let total = table.total_for(
            NominalSize::Dn50,
            &[
                (Fitting::Elbow90ShortRadius, 9),
                (Fitting::TeeRun, 3),
                (Fitting::GateValveOpen, 0),
            ],
        );
        assert!((total - (9.0 * 1.7 + 3.0 * 1.1)).abs() < 1e-9);
    }

    #[test]
    fn equivalent_lengths_grow_with_size() {
        let table = EquivalentLengthTable::standard();
        for fitting in Fitting::ALL {
            for pair in NominalSize::ALL.windows(2) {
                let small = table.equivalent_length_m(pair[0], fitting);
                let large = table.equivalent_length_m(pair[1], fitting);
                assert!(
                    large >= small,
                    "{:?} shrinks from {:?} to {:?}",
                    fitting,
                    pair[0],
                    pair[1]
                );
            }
        }
    }

    #[test]
    fn from_rows_validates_shape() {
        let short = vec![vec![0.0; FITTING_COUNT]; SIZE_COUNT - 1];
        assert!(EquivalentLengthTable::from_rows(&short).is_err());

        let ragged = {
            let mut rows = vec![vec![0.0; FITTING_COUNT]; SIZE_COUNT];
            rows[3].pop();
            rows
        };
        assert!(EquivalentLengthTable::from_rows(&ragged).is_err());

        let negative = {
            let mut rows = vec![vec![0.0; FITTING_COUNT]; SIZE_COUNT];
            rows[0][0] = -1.0;
            rows
        };
        assert!(EquivalentLengthTable::from_rows(&negative).is_err());
    }
}
