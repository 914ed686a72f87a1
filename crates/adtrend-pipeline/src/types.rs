use adtrend_core::Ad;

/// Survivors of a dropping stage plus how many ads it discarded.
///
/// `kept.len() + dropped` always equals the stage's input length.
#[derive(Debug, Clone, Default)]
pub struct StageOutcome {
    pub kept: Vec<Ad>,
    pub dropped: usize,
}
