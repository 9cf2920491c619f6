//! FILENAME: core/engine/src/dependency_extractor.rs
//! PURPOSE: Extracts cell references from a formula's token stream.
//! CONTEXT: Dependencies are collected from the tokens before the formula is
//! parsed, so a formula that fails to parse still records the cells it names
//! and is recalculated when they change. Ranges (e.g., A1:B10) are expanded to
//! include all cells within the range that exist in the grid.

use crate::coord::expand_range_within;
use parser::{Token, TokenKind};
use std::collections::HashSet;

/// Collects every referenced cell name. Duplicates collapse.
/// Ranges are clipped to a `columns` x `rows` grid.
pub fn extract_dependencies(tokens: &[Token], columns: u32, rows: u32) -> HashSet<String> {
    let mut deps = HashSet::new();
    let mut i = 0;

    while i < tokens.len() {
        let token = &tokens[i];
        if token.kind != TokenKind::CellReference {
            i += 1;
            continue;
        }

        // CELL ':' CELL
        if let (Some(colon), Some(end)) = (tokens.get(i + 1), tokens.get(i + 2)) {
            if colon.kind == TokenKind::Colon && end.kind == TokenKind::CellReference {
                match expand_range_within(&token.value, &end.value, columns, rows) {
                    Ok(cells) => deps.extend(cells),
                    Err(_) => {
                        // Reversed or oversized: the evaluator reports it; still track both ends
                        deps.insert(token.value.clone());
                        deps.insert(end.value.clone());
                    }
                }
                i += 3;
                continue;
            }
        }

        deps.insert(token.value.clone());
        i += 1;
    }

    deps
}
