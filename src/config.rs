//! Configuration for document parsing.

use crate::layout::Layout;

/// Which result-grammar family to try first on a candidate result line.
///
/// HY-TEK style programs print dual meets in compact multi-column form and
/// invitationals in a wide single column; the default guesses from the
/// detected layout. Callers that know the document format can pin it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GrammarOrder {
    /// Guess from the detected layout (single column ⇒ invitational first)
    #[default]
    Auto,
    /// Always try the dual-meet grammars first
    DualFirst,
    /// Always try the invitational grammars first
    InvitationalFirst,
}

/// How to interpret split sequences that carry no parenthesized diff values.
///
/// Such sequences are ambiguous between cumulative and per-segment times;
/// the two conventions both occur in the wild.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SplitConvention {
    /// Detect: a strictly increasing run of three or more values is treated
    /// as cumulative and differenced. Two-value sequences are left as
    /// recorded (monotonic by chance is too likely).
    #[default]
    Auto,
    /// Values are cumulative; difference successive values
    Cumulative,
    /// Values are already per-segment times
    Differential,
}

/// Document parsing configuration.
#[derive(Debug, Clone, Default)]
pub struct ParseConfig {
    /// Skip layout detection and use this layout and these gutter splits.
    pub layout_override: Option<(Layout, Vec<f32>)>,

    /// Result-grammar preference.
    pub grammar_order: GrammarOrder,

    /// Split interpretation, applied through
    /// [`crate::recover::derive_leg_times`] when turning recorded splits
    /// into per-leg times. Parsing itself stores splits as recorded.
    pub split_convention: SplitConvention,
}

impl ParseConfig {
    /// Create a configuration with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Force a layout instead of detecting one. `splits` are the gutter
    /// x-coordinates and must number one fewer than the columns.
    pub fn with_layout_override(mut self, layout: Layout, splits: Vec<f32>) -> Self {
        self.layout_override = Some((layout, splits));
        self
    }

    /// Set the result-grammar preference.
    pub fn with_grammar_order(mut self, order: GrammarOrder) -> Self {
        self.grammar_order = order;
        self
    }

    /// Set the split interpretation convention.
    pub fn with_split_convention(mut self, convention: SplitConvention) -> Self {
        self.split_convention = convention;
        self
    }
}
