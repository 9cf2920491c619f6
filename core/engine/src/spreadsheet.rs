//! FILENAME: core/engine/src/spreadsheet.rs
//! PURPOSE: The spreadsheet service: formula edits, propagation, cycles.
//! CONTEXT: Owns the grid, the dependency graph and the formula engine, and is
//! the only writer of cell values. An edit goes through these steps:
//!
//! 1. store the formula text
//! 2. evaluate the edited cell and record its new dependencies
//! 3. plan the recalculation of its transitive dependants
//! 4. force every cell on a detected cycle to #REF
//! 5. re-evaluate the planned cells in order (automatic mode only)
//!
//! The first circular dependency found is reported ahead of the edited cell's
//! own formula error. Failures in dependants are logged only.

use crate::config::{validate_dimensions, CalculationMode, SpreadsheetConfig};
use crate::coord::canonical_name;
use crate::dependency_graph::{DependencyGraph, RecalcPlan};
use crate::error::{ConfigError, RecalcError};
use crate::evaluator::FormulaEngine;
use crate::grid::Grid;
use crate::logging::{log_enter, log_exit, log_info, log_warn};
use crate::storage::{CellStorageReader, CellStorageWriter};
use crate::value::{CellKind, CellValue};

#[derive(Debug, Clone)]
pub struct Spreadsheet {
    grid: Grid,
    graph: DependencyGraph,
    engine: FormulaEngine,
    config: SpreadsheetConfig,
}

impl Spreadsheet {
    /// Creates an empty spreadsheet with the configured dimensions.
    pub fn new(config: SpreadsheetConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Spreadsheet {
            grid: Grid::new(config.columns, config.rows),
            graph: DependencyGraph::new(),
            engine: FormulaEngine::new(),
            config,
        })
    }

    /// Wraps an existing grid, e.g. one read from disk, and recalculates it.
    /// The grid's dimensions override those of `config`.
    pub fn with_grid(grid: Grid, config: SpreadsheetConfig) -> Self {
        let config = SpreadsheetConfig {
            columns: grid.columns(),
            rows: grid.rows(),
            ..config
        };
        let mut sheet = Spreadsheet {
            grid,
            graph: DependencyGraph::new(),
            engine: FormulaEngine::new(),
            config,
        };
        if let Err(e) = sheet.calculate_now() {
            log_warn!("CALC", "loaded grid has errors: {}", e);
        }
        sheet
    }

    /// Stores `formula` in `name` and recalculates whatever depends on it.
    pub fn update_cell_formula(&mut self, name: &str, formula: &str) -> Result<(), RecalcError> {
        let key = canonical_name(name);
        log_enter!("CALC", "update_cell_formula", "{} = {:?}", key, formula);

        if !self.grid.set_cell_formula(&key, formula) {
            log_exit!("CALC", "update_cell_formula", "unknown cell {}", key);
            return Err(RecalcError::UnknownCell(name.to_string()));
        }

        let evaluation = self
            .grid
            .update_cell_value(&key, &self.engine)
            .ok_or_else(|| RecalcError::UnknownCell(name.to_string()))?;
        if self.graph.would_create_cycle(&key, &evaluation.dependencies) {
            log_warn!("DEPS", "{} closes a circular reference", key);
        }
        self.graph.set_dependencies(&key, evaluation.dependencies);

        let own_error = evaluation.error.map(|source| RecalcError::Formula {
            cell: key.clone(),
            source,
        });

        let plan = self.graph.plan_recalc(&key);
        let cycle_error = self.mark_cycles(&plan, Some(&key));

        match self.config.calculation_mode {
            CalculationMode::Automatic => self.recalculate(&plan.order),
            CalculationMode::Manual => {
                if !plan.order.is_empty() {
                    log_info!("CALC", "{} dependant(s) of {} left stale", plan.order.len(), key);
                }
            }
        }

        log_exit!("CALC", "update_cell_formula", "{}", key);

        match (cycle_error, own_error) {
            (Some(e), _) | (None, Some(e)) => Err(e),
            (None, None) => Ok(()),
        }
    }

    /// Rebuilds the dependency graph from every stored formula and
    /// recalculates all cells in dependency order.
    pub fn calculate_now(&mut self) -> Result<(), RecalcError> {
        log_enter!("CALC", "calculate_now", "{} formula(s)", self.grid.formula_count());

        self.graph.clear();
        let names = self.grid.cell_names();
        for name in &names {
            let dependencies = self.engine.dependencies(&self.grid.cell_formula(name), &self.grid);
            if !dependencies.is_empty() {
                self.graph.set_dependencies(name, dependencies);
            }
        }

        let plan = self.graph.plan_full(names);
        let cycle_error = self.mark_cycles(&plan, None);
        self.recalculate(&plan.order);

        log_exit!("CALC", "calculate_now", "{} cell(s), {} cycle(s)", plan.order.len(), plan.cycles.len());

        match cycle_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    /// Changes the grid dimensions, keeping the overlapping cells, then
    /// recalculates since references may have come into or gone out of range.
    pub fn resize(&mut self, columns: u32, rows: u32) -> Result<(), ConfigError> {
        validate_dimensions(columns, rows)?;

        self.grid.resize(columns, rows);
        self.config.columns = columns;
        self.config.rows = rows;

        if let Err(e) = self.calculate_now() {
            log_warn!("CALC", "after resize: {}", e);
        }
        Ok(())
    }

    /// Switching back to automatic recalculates everything left stale.
    pub fn set_calculation_mode(&mut self, mode: CalculationMode) -> Result<(), RecalcError> {
        let previous = self.config.calculation_mode;
        self.config.calculation_mode = mode;
        log_info!("CALC", "calculation mode {:?} -> {:?}", previous, mode);

        if previous == CalculationMode::Manual && mode == CalculationMode::Automatic {
            self.calculate_now()
        } else {
            Ok(())
        }
    }

    /// Forces every cycle cell to #REF and builds the error to report:
    /// the cycle through `preferred` if there is one, else the first cycle.
    fn mark_cycles(&mut self, plan: &RecalcPlan, preferred: Option<&str>) -> Option<RecalcError> {
        for cell in plan.cycle_cells() {
            self.grid.set_cell_error_value(cell, CellKind::RefError);
        }

        let cycles = &plan.cycles;
        let cycle = preferred
            .and_then(|p| cycles.iter().find(|cycle| cycle.iter().any(|c| c == p)))
            .or_else(|| cycles.first())?;

        let cell = match preferred {
            Some(p) if cycle.iter().any(|c| c == p) => p.to_string(),
            _ => cycle.first()?.clone(),
        };
        Some(RecalcError::CircularDependency {
            cell,
            cycle: cycle.clone(),
        })
    }

    fn recalculate(&mut self, order: &[String]) {
        for name in order {
            let Some(evaluation) = self.grid.update_cell_value(name, &self.engine) else {
                continue;
            };
            if let Some(e) = evaluation.error {
                log_warn!("CALC", "Error in cell {}: {}", name, e);
            }
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn dependencies(&self) -> &DependencyGraph {
        &self.graph
    }

    pub fn config(&self) -> &SpreadsheetConfig {
        &self.config
    }

    pub fn cell_value(&self, name: &str) -> Option<CellValue> {
        self.grid.cell_value(name)
    }

    pub fn cell_display_value(&self, name: &str) -> String {
        self.grid.cell_display_value(name)
    }

    pub fn cell_formula(&self, name: &str) -> String {
        self.grid.cell_formula(name)
    }
}

impl Default for Spreadsheet {
    fn default() -> Self {
        let config = SpreadsheetConfig::default();
        Spreadsheet {
            grid: Grid::new(config.columns, config.rows),
            graph: DependencyGraph::new(),
            engine: FormulaEngine::new(),
            config,
        }
    }
}
