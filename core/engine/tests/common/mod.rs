//! FILENAME: tests/common/mod.rs
//! Test harness and fixtures for engine integration tests.

#![allow(dead_code)]

use engine::{CalculationMode, CellValue, RecalcError, Spreadsheet, SpreadsheetConfig};

/// Test harness wrapping a spreadsheet with assertion helpers.
pub struct TestHarness {
    pub sheet: Spreadsheet,
}

impl TestHarness {
    /// Create a new test harness with the default 10x20 spreadsheet.
    pub fn new() -> Self {
        TestHarness {
            sheet: Spreadsheet::default(),
        }
    }

    pub fn with_dimensions(columns: u32, rows: u32) -> Self {
        TestHarness {
            sheet: Spreadsheet::new(SpreadsheetConfig::with_dimensions(columns, rows))
                .expect("valid dimensions"),
        }
    }

    pub fn manual() -> Self {
        let config = SpreadsheetConfig {
            calculation_mode: CalculationMode::Manual,
            ..SpreadsheetConfig::default()
        };
        TestHarness {
            sheet: Spreadsheet::new(config).expect("valid config"),
        }
    }

    /// Create a harness holding the chain fixture:
    /// A1 = 1, A2 = =2, A3 = =A1+A2*2, A4 = =A3=5
    pub fn with_chain_data() -> Self {
        let mut harness = Self::new();
        for (name, formula) in ChainFixture::cells() {
            harness.set_ok(name, formula);
        }
        harness
    }

    pub fn set(&mut self, name: &str, formula: &str) -> Result<(), RecalcError> {
        self.sheet.update_cell_formula(name, formula)
    }

    /// Sets a formula that must not report any error.
    pub fn set_ok(&mut self, name: &str, formula: &str) {
        if let Err(e) = self.set(name, formula) {
            panic!("{} = {:?} failed: {}", name, formula, e);
        }
    }

    pub fn display(&self, name: &str) -> String {
        self.sheet.cell_display_value(name)
    }

    pub fn value(&self, name: &str) -> Option<CellValue> {
        self.sheet.cell_value(name)
    }

    pub fn assert_display(&self, name: &str, expected: &str) {
        assert_eq!(self.display(name), expected, "display of {}", name);
    }
}

impl Default for TestHarness {
    fn default() -> Self {
        Self::new()
    }
}

/// The four-cell chain used throughout the propagation tests.
pub struct ChainFixture;

impl ChainFixture {
    pub fn cells() -> Vec<(&'static str, &'static str)> {
        vec![("A1", "1"), ("A2", "=2"), ("A3", "=A1+A2*2"), ("A4", "=A3=5")]
    }
}
