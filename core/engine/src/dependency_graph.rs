//! FILENAME: core/engine/src/dependency_graph.rs
//! PURPOSE: Tracks cell dependencies and plans recalculation order.
//! CONTEXT: This module is the heart of the spreadsheet's recalculation engine.
//! It tracks which cells depend on which other cells (dependencies/dependants),
//! detects circular references, and computes the correct evaluation order
//! using topological sorting.
//!
//! TERMINOLOGY:
//! - Dependencies: Cells that a formula cell references (its inputs).
//!   If A3 = A1 + A2, then A1 and A2 are dependencies of A3.
//! - Dependants: Cells that reference a given cell (reverse lookup).
//!   If A3 = A1 + A2, then A3 is a dependant of A1 and A2.
//!
//! INVARIANT: `t` is in dependencies[s] exactly when `s` is in dependants[t].
//!
//! PLANNING:
//! `plan_recalc` orders the transitive dependants of a changed cell with Kahn's
//! algorithm. When the queue runs dry with cells left over, those cells sit on
//! or behind a cycle. The leftover set is split into strongly connected
//! components (Tarjan). Every component of two or more cells, or a single cell
//! reading itself, is a cycle: all of its cells are taken out at once and
//! sorting resumes. A cell reached along two paths (a diamond) is ordered once
//! and is never a cycle.

use crate::logging::log_warn;
use std::collections::{BTreeMap, HashMap, HashSet, VecDeque};

/// Error type for cycle detection.
#[derive(Debug, Clone, PartialEq)]
pub struct CycleError {
    /// The cells involved in the cycle, in order. The first cell is repeated at the end.
    pub cycle_path: Vec<String>,
}

impl std::fmt::Display for CycleError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Circular reference detected: {}", self.cycle_path.join(" -> "))
    }
}

impl std::error::Error for CycleError {}

/// Result of planning a recalculation pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecalcPlan {
    /// Cells to re-evaluate, each after all of its dependencies.
    pub order: Vec<String>,
    /// Cycles found, each listed from a cell along its dependencies.
    /// Cycle cells do not appear in `order`.
    pub cycles: Vec<Vec<String>>,
}

impl RecalcPlan {
    pub fn has_cycles(&self) -> bool {
        !self.cycles.is_empty()
    }

    /// Every cell that sits on one of the cycles.
    pub fn cycle_cells(&self) -> impl Iterator<Item = &String> {
        self.cycles.iter().flatten()
    }
}

/// The Dependency Graph tracks relationships between cells.
/// It maintains both forward (dependencies) and reverse (dependants) mappings
/// for efficient lookups in either direction.
#[derive(Debug, Default, Clone)]
pub struct DependencyGraph {
    /// If A3 = A1 + A2, then dependencies[A3] = {A1, A2}.
    dependencies: HashMap<String, HashSet<String>>,

    /// If A3 = A1 + A2, then dependants[A1] and dependants[A2] contain A3.
    dependants: HashMap<String, HashSet<String>>,
}

impl DependencyGraph {
    /// Creates a new, empty dependency graph.
    pub fn new() -> Self {
        DependencyGraph {
            dependencies: HashMap::new(),
            dependants: HashMap::new(),
        }
    }

    /// Records that `source` reads `target`.
    pub fn add_dependency(&mut self, source: &str, target: &str) {
        self.dependencies
            .entry(source.to_string())
            .or_default()
            .insert(target.to_string());
        self.dependants
            .entry(target.to_string())
            .or_default()
            .insert(source.to_string());
    }

    /// Removes the edge in both directions. Removing a missing edge is a no-op.
    pub fn remove_dependency(&mut self, source: &str, target: &str) {
        remove_edge(&mut self.dependencies, source, target);
        remove_edge(&mut self.dependants, target, source);
    }

    /// Sets the dependencies for a cell, replacing any previous dependencies.
    /// This does NOT check for cycles. Use `would_create_cycle()` first if needed.
    pub fn set_dependencies(&mut self, cell: &str, new_dependencies: HashSet<String>) {
        // First, remove old dependencies
        self.clear_dependencies(cell);

        for target in &new_dependencies {
            self.dependants
                .entry(target.clone())
                .or_default()
                .insert(cell.to_string());
        }

        if !new_dependencies.is_empty() {
            self.dependencies.insert(cell.to_string(), new_dependencies);
        }
    }

    /// Clears all outgoing edges of a cell.
    /// Call this when a cell becomes a literal value or is cleared.
    pub fn clear_dependencies(&mut self, cell: &str) {
        if let Some(old) = self.dependencies.remove(cell) {
            for target in old {
                remove_edge(&mut self.dependants, &target, cell);
            }
        }
    }

    /// Cells `cell` reads, or None if it reads none.
    pub fn get_dependencies(&self, cell: &str) -> Option<&HashSet<String>> {
        self.dependencies.get(cell)
    }

    /// Cells that read `cell`, or None if none do.
    pub fn get_dependants(&self, cell: &str) -> Option<&HashSet<String>> {
        self.dependants.get(cell)
    }

    /// Checks if giving `cell` these dependencies would close a cycle.
    /// This performs a DFS from each new dependency to see if we can reach the cell.
    pub fn would_create_cycle(&self, cell: &str, new_dependencies: &HashSet<String>) -> bool {
        // A cell depending on itself is a trivial cycle
        if new_dependencies.contains(cell) {
            return true;
        }

        new_dependencies.iter().any(|dep| self.can_reach(dep, cell))
    }

    /// Checks if `start` can reach `target` by following dependency chains.
    fn can_reach(&self, start: &str, target: &str) -> bool {
        let mut visited: HashSet<&str> = HashSet::new();
        let mut stack = vec![start];

        while let Some(current) = stack.pop() {
            if current == target {
                return true;
            }
            if !visited.insert(current) {
                continue;
            }
            if let Some(deps) = self.dependencies.get(current) {
                stack.extend(deps.iter().map(String::as_str).filter(|d| !visited.contains(d)));
            }
        }

        false
    }

    /// Plans the recalculation after `changed` got a new value.
    /// The changed cell itself only shows up when it sits on a cycle.
    pub fn plan_recalc(&self, changed: &str) -> RecalcPlan {
        let affected = self.get_all_dependants(changed);
        if affected.is_empty() {
            return RecalcPlan::default();
        }
        self.plan(&affected, Some(changed))
    }

    /// Plans a full recalculation of `cells`.
    pub fn plan_full<I, S>(&self, cells: I) -> RecalcPlan
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let cells: HashSet<String> = cells.into_iter().map(Into::into).collect();
        self.plan(&cells, None)
    }

    /// Gets all cells that need recalculation when a cell's value changes,
    /// in topological order, or the first cycle found among them.
    pub fn get_recalc_order(&self, changed: &str) -> Result<Vec<String>, CycleError> {
        let plan = self.plan_recalc(changed);
        match plan.cycles.into_iter().next() {
            Some(mut cycle_path) => {
                if let Some(first) = cycle_path.first().cloned() {
                    cycle_path.push(first);
                }
                Err(CycleError { cycle_path })
            }
            None => Ok(plan.order),
        }
    }

    /// Gets all transitive dependants of a cell. The cell itself is included
    /// only when it depends on itself through some chain.
    fn get_all_dependants(&self, cell: &str) -> HashSet<String> {
        let mut result = HashSet::new();
        let mut queue: VecDeque<&str> = VecDeque::new();

        if let Some(deps) = self.dependants.get(cell) {
            queue.extend(deps.iter().map(String::as_str));
        }

        while let Some(current) = queue.pop_front() {
            if !result.insert(current.to_string()) {
                continue;
            }
            if let Some(deps) = self.dependants.get(current) {
                queue.extend(
                    deps.iter()
                        .map(String::as_str)
                        .filter(|d| !result.contains(*d)),
                );
            }
        }

        result
    }

    /// Kahn's algorithm over `cells`, breaking cycles as they are found.
    fn plan(&self, cells: &HashSet<String>, preferred_start: Option<&str>) -> RecalcPlan {
        // In-degree counts only dependencies inside the subset.
        // BTreeMap keeps the order deterministic.
        let mut remaining: BTreeMap<String, usize> = cells
            .iter()
            .map(|cell| {
                let degree = self
                    .dependencies
                    .get(cell)
                    .map(|deps| deps.iter().filter(|d| cells.contains(*d)).count())
                    .unwrap_or(0);
                (cell.clone(), degree)
            })
            .collect();

        let mut queue: VecDeque<String> = remaining
            .iter()
            .filter(|(_, degree)| **degree == 0)
            .map(|(cell, _)| cell.clone())
            .collect();
        for cell in &queue {
            remaining.remove(cell);
        }

        let mut plan = RecalcPlan::default();

        loop {
            while let Some(cell) = queue.pop_front() {
                self.release(&cell, &mut remaining, &mut queue);
                plan.order.push(cell);
            }

            if remaining.is_empty() {
                break;
            }

            // Everything left sits on or behind a cycle
            let cycles = self.find_cycles(&remaining, preferred_start);
            if cycles.is_empty() {
                break;
            }
            for cycle in &cycles {
                log_warn!("DEPS", "cycle detected: {}", cycle.join(" -> "));
                for cell in cycle {
                    remaining.remove(cell);
                }
            }
            for cell in cycles.iter().flatten() {
                self.release(cell, &mut remaining, &mut queue);
            }
            plan.cycles.extend(cycles);
        }

        plan
    }

    /// Marks `cell` as done: its dependants still waiting lose one in-degree.
    fn release(&self, cell: &str, remaining: &mut BTreeMap<String, usize>, queue: &mut VecDeque<String>) {
        let Some(deps) = self.dependants.get(cell) else {
            return;
        };
        let mut deps: Vec<&String> = deps.iter().collect();
        deps.sort();

        for dep in deps {
            if let Some(degree) = remaining.get_mut(dep) {
                *degree = degree.saturating_sub(1);
                if *degree == 0 {
                    remaining.remove(dep);
                    queue.push_back(dep.clone());
                }
            }
        }
    }

    /// Cycles among the cells still waiting. The one through `preferred`
    /// comes first, the rest by their first cell.
    fn find_cycles(&self, remaining: &BTreeMap<String, usize>, preferred: Option<&str>) -> Vec<Vec<String>> {
        let mut cycles: Vec<Vec<String>> = self
            .components(remaining)
            .into_iter()
            .filter(|component| match component.as_slice() {
                [single] => self.reads(single, single),
                _ => true,
            })
            .filter_map(|component| {
                let start = match preferred {
                    Some(p) if component.iter().any(|c| *c == p) => p,
                    _ => *component.first()?,
                };
                Some(self.walk_cycle(start, &component))
            })
            .collect();

        let through_preferred = |cycle: &Vec<String>| preferred.is_some_and(|p| cycle.iter().any(|c| c == p));
        cycles.sort_by(|a, b| {
            through_preferred(b)
                .cmp(&through_preferred(a))
                .then_with(|| a.first().cmp(&b.first()))
        });
        cycles
    }

    fn reads(&self, cell: &str, target: &str) -> bool {
        self.dependencies
            .get(cell)
            .is_some_and(|deps| deps.contains(target))
    }

    /// Strongly connected components of the dependency edges inside `nodes`,
    /// using Tarjan's algorithm without recursion. Members come out sorted.
    fn components<'a>(&self, nodes: &'a BTreeMap<String, usize>) -> Vec<Vec<&'a str>> {
        let successors = |cell: &str| -> Vec<&'a str> {
            let mut next: Vec<&'a str> = self
                .dependencies
                .get(cell)
                .map(|deps| {
                    deps.iter()
                        .filter_map(|d| nodes.get_key_value(d.as_str()))
                        .map(|(key, _)| key.as_str())
                        .collect()
                })
                .unwrap_or_default();
            next.sort_unstable();
            next
        };

        let mut index: HashMap<&'a str, usize> = HashMap::new();
        let mut low: HashMap<&'a str, usize> = HashMap::new();
        let mut on_stack: HashSet<&'a str> = HashSet::new();
        let mut stack: Vec<&'a str> = Vec::new();
        let mut components = Vec::new();

        for root in nodes.keys().map(String::as_str) {
            if index.contains_key(root) {
                continue;
            }

            // (cell, its successors, next successor to visit)
            let mut work: Vec<(&'a str, Vec<&'a str>, usize)> = Vec::new();
            let mut enter = Some(root);

            loop {
                if let Some(cell) = enter.take() {
                    let n = index.len();
                    index.insert(cell, n);
                    low.insert(cell, n);
                    stack.push(cell);
                    on_stack.insert(cell);
                    work.push((cell, successors(cell), 0));
                }
                let Some((cell, next, pos)) = work.last_mut() else {
                    break;
                };
                let cell = *cell;
                let succ = next.get(*pos).copied();
                *pos += 1;

                match succ {
                    Some(succ) => match index.get(succ).copied() {
                        None => enter = Some(succ),
                        Some(succ_index) if on_stack.contains(succ) => {
                            if let Some(l) = low.get_mut(cell) {
                                *l = (*l).min(succ_index);
                            }
                        }
                        Some(_) => {}
                    },
                    None => {
                        work.pop();
                        let cell_low = low.get(cell).copied().unwrap_or_default();
                        if let Some((parent, _, _)) = work.last() {
                            if let Some(l) = low.get_mut(parent) {
                                *l = (*l).min(cell_low);
                            }
                        }
                        if index.get(cell) == Some(&cell_low) {
                            let mut component = Vec::new();
                            while let Some(member) = stack.pop() {
                                on_stack.remove(member);
                                component.push(member);
                                if member == cell {
                                    break;
                                }
                            }
                            component.sort_unstable();
                            components.push(component);
                        }
                    }
                }
            }
        }

        components
    }

    /// Lists the cells of a cyclic component depth first along dependencies,
    /// starting at `start`.
    fn walk_cycle(&self, start: &str, component: &[&str]) -> Vec<String> {
        let mut cycle = Vec::with_capacity(component.len());
        let mut seen: HashSet<&str> = HashSet::new();
        let mut stack = vec![start];

        while let Some(cell) = stack.pop() {
            if !seen.insert(cell) {
                continue;
            }
            cycle.push(cell.to_string());

            let mut next: Vec<&str> = self
                .dependencies
                .get(cell)
                .map(|deps| {
                    deps.iter()
                        .map(String::as_str)
                        .filter(|d| component.iter().any(|c| c == d) && !seen.contains(d))
                        .collect()
                })
                .unwrap_or_default();
            // Smallest name is popped first
            next.sort_unstable_by(|a, b| b.cmp(a));
            stack.extend(next);
        }

        cycle
    }

    /// Returns the total number of cells that have dependencies.
    pub fn formula_cell_count(&self) -> usize {
        self.dependencies.len()
    }

    /// Returns the total number of dependency relationships.
    pub fn dependency_count(&self) -> usize {
        self.dependencies.values().map(|v| v.len()).sum()
    }

    /// Clears the entire dependency graph.
    pub fn clear(&mut self) {
        self.dependencies.clear();
        self.dependants.clear();
    }
}

fn remove_edge(map: &mut HashMap<String, HashSet<String>>, from: &str, to: &str) {
    if let Some(set) = map.get_mut(from) {
        set.remove(to);
        // Clean up empty sets
        if set.is_empty() {
            map.remove(from);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set_of(cells: &[&str]) -> HashSet<String> {
        cells.iter().map(|c| c.to_string()).collect()
    }

    fn position(order: &[String], cell: &str) -> usize {
        order.iter().position(|c| c == cell).unwrap()
    }

    /// Checks the two maps mirror each other.
    fn assert_symmetric(graph: &DependencyGraph) {
        for (source, targets) in &graph.dependencies {
            for target in targets {
                assert!(graph.dependants[target].contains(source));
            }
        }
        for (target, sources) in &graph.dependants {
            for source in sources {
                assert!(graph.dependencies[source].contains(target));
            }
        }
    }

    #[test]
    fn test_add_and_remove_dependency() {
        let mut graph = DependencyGraph::new();
        graph.add_dependency("A3", "A1");

        assert!(graph.get_dependencies("A3").unwrap().contains("A1"));
        assert!(graph.get_dependants("A1").unwrap().contains("A3"));
        assert_symmetric(&graph);

        graph.remove_dependency("A3", "A1");
        assert!(graph.get_dependencies("A3").is_none());
        assert!(graph.get_dependants("A1").is_none());

        // Removing again is a no-op
        graph.remove_dependency("A3", "A1");
        graph.remove_dependency("Q1", "Q2");
        assert_eq!(graph.dependency_count(), 0);
    }

    #[test]
    fn test_set_and_get_dependencies() {
        let mut graph = DependencyGraph::new();

        // A3 = A1 + A2
        graph.set_dependencies("A3", set_of(&["A1", "A2"]));

        let deps = graph.get_dependencies("A3").unwrap();
        assert_eq!(deps.len(), 2);
        assert!(graph.get_dependants("A1").unwrap().contains("A3"));
        assert!(graph.get_dependants("A2").unwrap().contains("A3"));
        assert_symmetric(&graph);
    }

    #[test]
    fn test_update_dependencies() {
        let mut graph = DependencyGraph::new();

        // Initially A3 = A1 + A2, then A3 = B1
        graph.set_dependencies("A3", set_of(&["A1", "A2"]));
        graph.set_dependencies("A3", set_of(&["B1"]));

        assert_eq!(graph.get_dependencies("A3").unwrap(), &set_of(&["B1"]));
        assert!(graph.get_dependants("A1").is_none());
        assert!(graph.get_dependants("A2").is_none());
        assert!(graph.get_dependants("B1").unwrap().contains("A3"));
        assert_symmetric(&graph);
    }

    #[test]
    fn test_clear_dependencies() {
        let mut graph = DependencyGraph::new();
        graph.set_dependencies("A3", set_of(&["A1", "A2"]));
        graph.clear_dependencies("A3");

        assert!(graph.get_dependencies("A3").is_none());
        assert!(graph.get_dependants("A1").is_none());
        assert_eq!(graph.formula_cell_count(), 0);
    }

    #[test]
    fn test_cycle_detection() {
        let mut graph = DependencyGraph::new();
        assert!(graph.would_create_cycle("A1", &set_of(&["A1"])));

        // A2 = A1, A3 = A2
        graph.set_dependencies("A2", set_of(&["A1"]));
        graph.set_dependencies("A3", set_of(&["A2"]));

        // If A1 = A3, that creates A1 -> A3 -> A2 -> A1
        assert!(graph.would_create_cycle("A1", &set_of(&["A3"])));
        // B1 = A2 is fine
        assert!(!graph.would_create_cycle("B1", &set_of(&["A2"])));
    }

    #[test]
    fn test_recalc_order_chain() {
        let mut graph = DependencyGraph::new();
        graph.set_dependencies("A2", set_of(&["A1"]));
        graph.set_dependencies("A3", set_of(&["A2"]));

        let order = graph.get_recalc_order("A1").unwrap();
        assert_eq!(order, vec!["A2", "A3"]);
    }

    #[test]
    fn test_recalc_order_diamond() {
        let mut graph = DependencyGraph::new();

        //     A1
        //    /  \
        //   A2  A3
        //    \  /
        //     A4
        graph.set_dependencies("A2", set_of(&["A1"]));
        graph.set_dependencies("A3", set_of(&["A1"]));
        graph.set_dependencies("A4", set_of(&["A2", "A3"]));

        let plan = graph.plan_recalc("A1");
        assert!(!plan.has_cycles());
        assert_eq!(plan.order.len(), 3);
        assert!(position(&plan.order, "A4") > position(&plan.order, "A2"));
        assert!(position(&plan.order, "A4") > position(&plan.order, "A3"));
    }

    #[test]
    fn test_recalc_order_no_dependants() {
        let graph = DependencyGraph::new();
        assert!(graph.get_recalc_order("A1").unwrap().is_empty());
    }

    #[test]
    fn test_plan_breaks_cycle_and_continues() {
        let mut graph = DependencyGraph::new();

        // A1 = A3, A3 = A1 + A2, A4 = A3
        graph.set_dependencies("A1", set_of(&["A3"]));
        graph.set_dependencies("A3", set_of(&["A1", "A2"]));
        graph.set_dependencies("A4", set_of(&["A3"]));

        let plan = graph.plan_recalc("A1");
        assert_eq!(plan.cycles, vec![vec!["A1".to_string(), "A3".to_string()]]);
        // A4 sits behind the cycle and is still recalculated
        assert_eq!(plan.order, vec!["A4"]);
        assert_eq!(plan.cycle_cells().count(), 2);

        let err = graph.get_recalc_order("A1").unwrap_err();
        assert_eq!(err.cycle_path, vec!["A1", "A3", "A1"]);
        assert_eq!(err.to_string(), "Circular reference detected: A1 -> A3 -> A1");
    }

    #[test]
    fn test_self_reference_plan() {
        let mut graph = DependencyGraph::new();
        graph.set_dependencies("B2", set_of(&["B2"]));

        let plan = graph.plan_recalc("B2");
        assert_eq!(plan.cycles, vec![vec!["B2".to_string()]]);
        assert!(plan.order.is_empty());
    }

    #[test]
    fn test_cycle_downstream_of_changed_cell() {
        let mut graph = DependencyGraph::new();

        // B1 = A1 + C1, C1 = B1: editing A1 reaches a cycle it is not part of
        graph.set_dependencies("B1", set_of(&["A1", "C1"]));
        graph.set_dependencies("C1", set_of(&["B1"]));
        graph.set_dependencies("D1", set_of(&["A1"]));

        let plan = graph.plan_recalc("A1");
        assert_eq!(plan.order, vec!["D1"]);
        assert_eq!(plan.cycles.len(), 1);
        assert_eq!(plan.cycles[0], vec!["B1".to_string(), "C1".to_string()]);
    }

    #[test]
    fn test_two_cycles_through_one_cell() {
        let mut graph = DependencyGraph::new();

        // A1 = B1, C1 = B1, B1 = A1 + C1: both loops pass through B1
        graph.set_dependencies("A1", set_of(&["B1"]));
        graph.set_dependencies("C1", set_of(&["B1"]));
        graph.set_dependencies("B1", set_of(&["A1", "C1"]));
        graph.set_dependencies("D1", set_of(&["C1"]));

        let plan = graph.plan_recalc("B1");
        assert_eq!(plan.cycles, vec![vec!["B1".to_string(), "A1".to_string(), "C1".to_string()]]);
        assert_eq!(plan.order, vec!["D1"]);

        let mut cells: Vec<&String> = plan.cycle_cells().collect();
        cells.sort();
        assert_eq!(cells, vec!["A1", "B1", "C1"]);
    }

    #[test]
    fn test_disjoint_cycles_in_full_plan() {
        let mut graph = DependencyGraph::new();

        // A1 <-> A2, B1 -> B1, C1 reads both cycles, D1 is independent
        graph.set_dependencies("A1", set_of(&["A2"]));
        graph.set_dependencies("A2", set_of(&["A1"]));
        graph.set_dependencies("B1", set_of(&["B1"]));
        graph.set_dependencies("C1", set_of(&["A1", "B1"]));

        let plan = graph.plan_full(["A1", "A2", "B1", "C1", "D1"]);
        assert_eq!(
            plan.cycles,
            vec![
                vec!["A1".to_string(), "A2".to_string()],
                vec!["B1".to_string()],
            ]
        );
        assert_eq!(plan.order, vec!["D1", "C1"]);
    }

    #[test]
    fn test_chain_into_cycle_is_not_a_cycle() {
        let mut graph = DependencyGraph::new();

        // E1 -> E2 -> E3 <-> E4: only E3 and E4 loop
        graph.set_dependencies("E1", set_of(&["E2"]));
        graph.set_dependencies("E2", set_of(&["E3"]));
        graph.set_dependencies("E3", set_of(&["E4"]));
        graph.set_dependencies("E4", set_of(&["E3"]));

        let plan = graph.plan_full(["E1", "E2", "E3", "E4"]);
        assert_eq!(plan.cycles, vec![vec!["E3".to_string(), "E4".to_string()]]);
        assert_eq!(plan.order, vec!["E2", "E1"]);
    }

    #[test]
    fn test_plan_full() {
        let mut graph = DependencyGraph::new();
        graph.set_dependencies("A3", set_of(&["A1", "A2"]));
        graph.set_dependencies("A4", set_of(&["A3"]));

        let plan = graph.plan_full(["A1", "A2", "A3", "A4"]);
        assert!(!plan.has_cycles());
        assert_eq!(plan.order.len(), 4);
        assert!(position(&plan.order, "A3") > position(&plan.order, "A1"));
        assert!(position(&plan.order, "A4") > position(&plan.order, "A3"));
    }

    #[test]
    fn test_counts() {
        let mut graph = DependencyGraph::new();

        assert_eq!(graph.formula_cell_count(), 0);
        assert_eq!(graph.dependency_count(), 0);

        graph.set_dependencies("A2", set_of(&["A1"]));
        graph.set_dependencies("A3", set_of(&["A1", "A2"]));

        assert_eq!(graph.formula_cell_count(), 2);
        assert_eq!(graph.dependency_count(), 3);

        graph.clear();
        assert_eq!(graph.formula_cell_count(), 0);
        assert!(graph.get_dependants("A1").is_none());
    }
}
