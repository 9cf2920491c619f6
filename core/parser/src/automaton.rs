//! FILENAME: core/parser/src/automaton.rs
//! PURPOSE: Small finite-state acceptors used by the lexer to classify runs of characters.
//! CONTEXT: Each automaton consumes one character at a time and reports whether the
//! run so far is still being processed, already accepted, or rejected. The lexer
//! picks an automaton by asking `test_char` about the first character, then feeds
//! characters while the automaton does not reject.
//!
//! AUTOMATONS:
//! - NumberAutomaton:       digits with at most one '.', e.g. "12", "3.5", ".5", "7."
//! - CellNameAutomaton:     UPPERCASE letters followed by digits not starting with 0, e.g. "A1", "AB12"
//! - FunctionNameAutomaton: a letter followed by letters/digits, any case, e.g. "min", "MMAX", "x2"

/// Observable state of an automaton after the last inserted character.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AutomatonState {
    /// Nothing accepted yet, but the run can still become valid.
    Processing,
    Accepting,
    /// Sink state. Further input is ignored.
    Rejecting,
}

/// Common interface of the character automatons.
pub trait Automaton {
    /// Feeds one character and returns the resulting state.
    fn insert(&mut self, ch: char) -> AutomatonState;

    /// Returns the current observable state.
    fn state(&self) -> AutomatonState;

    /// Returns true if this automaton can start consuming at `ch`.
    fn test_char(&self, ch: char) -> bool;

    /// Returns the automaton to its initial state.
    fn reset(&mut self);

    /// Resets, consumes the whole string and reports whether it was accepted.
    /// The automaton is reset again afterwards.
    fn test_string(&mut self, input: &str) -> bool {
        self.reset();
        let mut accepted = true;
        for ch in input.chars() {
            if self.insert(ch) == AutomatonState::Rejecting {
                accepted = false;
                break;
            }
        }
        let accepted = accepted && self.state() == AutomatonState::Accepting;
        self.reset();
        accepted
    }
}

// ============================================================================
// NUMBER
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumberState {
    Start,
    /// Inside the digits before the dot.
    Integer,
    /// Seen the dot; only digits may follow.
    Fraction,
    Reject,
}

#[derive(Debug, Clone)]
pub struct NumberAutomaton {
    inner: NumberState,
}

impl NumberAutomaton {
    pub fn new() -> Self {
        NumberAutomaton {
            inner: NumberState::Start,
        }
    }

    pub fn inner_state(&self) -> NumberState {
        self.inner
    }
}

impl Default for NumberAutomaton {
    fn default() -> Self {
        Self::new()
    }
}

impl Automaton for NumberAutomaton {
    fn insert(&mut self, ch: char) -> AutomatonState {
        self.inner = match (self.inner, ch) {
            (NumberState::Reject, _) => NumberState::Reject,
            (NumberState::Start, c) if c.is_ascii_digit() => NumberState::Integer,
            (NumberState::Start, '.') => NumberState::Fraction,
            (NumberState::Integer, c) if c.is_ascii_digit() => NumberState::Integer,
            (NumberState::Integer, '.') => NumberState::Fraction,
            (NumberState::Fraction, c) if c.is_ascii_digit() => NumberState::Fraction,
            _ => NumberState::Reject,
        };
        self.state()
    }

    fn state(&self) -> AutomatonState {
        match self.inner {
            NumberState::Start => AutomatonState::Processing,
            NumberState::Integer | NumberState::Fraction => AutomatonState::Accepting,
            NumberState::Reject => AutomatonState::Rejecting,
        }
    }

    fn test_char(&self, ch: char) -> bool {
        ch.is_ascii_digit() || ch == '.'
    }

    fn reset(&mut self) {
        self.inner = NumberState::Start;
    }
}

/// Returns true for a number with one optional leading sign: "-1.5", "+3", "42".
pub fn is_signed_number(input: &str) -> bool {
    let unsigned = input
        .strip_prefix('-')
        .or_else(|| input.strip_prefix('+'))
        .unwrap_or(input);
    NumberAutomaton::new().test_string(unsigned)
}

// ============================================================================
// CELL NAME
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellNameState {
    /// Expecting the first column letter.
    Start,
    /// Inside the column letters; a non-zero digit starts the row.
    Letters,
    /// Inside the row digits.
    Digits,
    Reject,
}

#[derive(Debug, Clone)]
pub struct CellNameAutomaton {
    inner: CellNameState,
}

impl CellNameAutomaton {
    pub fn new() -> Self {
        CellNameAutomaton {
            inner: CellNameState::Start,
        }
    }

    pub fn inner_state(&self) -> CellNameState {
        self.inner
    }
}

impl Default for CellNameAutomaton {
    fn default() -> Self {
        Self::new()
    }
}

impl Automaton for CellNameAutomaton {
    fn insert(&mut self, ch: char) -> AutomatonState {
        self.inner = match (self.inner, ch) {
            (CellNameState::Reject, _) => CellNameState::Reject,
            (CellNameState::Start, c) if c.is_ascii_uppercase() => CellNameState::Letters,
            (CellNameState::Letters, c) if c.is_ascii_uppercase() => CellNameState::Letters,
            (CellNameState::Letters, '1'..='9') => CellNameState::Digits,
            (CellNameState::Digits, c) if c.is_ascii_digit() => CellNameState::Digits,
            _ => CellNameState::Reject,
        };
        self.state()
    }

    fn state(&self) -> AutomatonState {
        match self.inner {
            CellNameState::Start | CellNameState::Letters => AutomatonState::Processing,
            CellNameState::Digits => AutomatonState::Accepting,
            CellNameState::Reject => AutomatonState::Rejecting,
        }
    }

    /// Only uppercase letters start a reference; lowercase runs go to the
    /// function-name automaton.
    fn test_char(&self, ch: char) -> bool {
        ch.is_ascii_uppercase()
    }

    fn reset(&mut self) {
        self.inner = CellNameState::Start;
    }
}

// ============================================================================
// FUNCTION NAME
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FunctionNameState {
    Start,
    Name,
    Reject,
}

#[derive(Debug, Clone)]
pub struct FunctionNameAutomaton {
    inner: FunctionNameState,
}

impl FunctionNameAutomaton {
    pub fn new() -> Self {
        FunctionNameAutomaton {
            inner: FunctionNameState::Start,
        }
    }

    pub fn inner_state(&self) -> FunctionNameState {
        self.inner
    }
}

impl Default for FunctionNameAutomaton {
    fn default() -> Self {
        Self::new()
    }
}

impl Automaton for FunctionNameAutomaton {
    fn insert(&mut self, ch: char) -> AutomatonState {
        self.inner = match (self.inner, ch) {
            (FunctionNameState::Reject, _) => FunctionNameState::Reject,
            (FunctionNameState::Start, c) if c.is_ascii_alphabetic() => FunctionNameState::Name,
            (FunctionNameState::Name, c) if c.is_ascii_alphanumeric() => FunctionNameState::Name,
            _ => FunctionNameState::Reject,
        };
        self.state()
    }

    fn state(&self) -> AutomatonState {
        match self.inner {
            FunctionNameState::Start => AutomatonState::Processing,
            FunctionNameState::Name => AutomatonState::Accepting,
            FunctionNameState::Reject => AutomatonState::Rejecting,
        }
    }

    fn test_char(&self, ch: char) -> bool {
        ch.is_ascii_alphabetic()
    }

    fn reset(&mut self) {
        self.inner = FunctionNameState::Start;
    }
}

/// Converts a (signed) number literal accepted by the number automaton to f64.
/// A bare "." reads as zero.
pub fn parse_number(raw: &str) -> Option<f64> {
    if !is_signed_number(raw) {
        return None;
    }
    let (sign, digits) = match raw.as_bytes().first() {
        Some(b'-') => (-1.0, &raw[1..]),
        Some(b'+') => (1.0, &raw[1..]),
        _ => (1.0, raw),
    };
    let digits = if digits == "." { "0" } else { digits };
    digits
        .parse::<f64>()
        .ok()
        .filter(|n| n.is_finite())
        .map(|n| sign * n)
}
