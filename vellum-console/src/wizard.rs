//! Registration wizard controller
//!
//! Sequences the five registration steps: select → contributors → splits →
//! review → register. All state is owned by the [`Wizard`] instance; the
//! caller feeds it the selected work and refreshed copies after contributor
//! edits. The wizard gates forward navigation (a work must be chosen to
//! leave `select`) but deliberately does not hard-block on invalid splits:
//! the verdict surfaces as a warning until the final register action, which
//! runs the submission gate for real.

use vellum_common::model::Work;
use vellum_common::splits::validate_splits;

use crate::registration::state::{submission_blockers, Blocker};

/// The five ordered wizard steps
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardStep {
    Select,
    Contributors,
    Splits,
    Review,
    Register,
}

impl WizardStep {
    /// Steps in wizard order
    pub const ALL: [WizardStep; 5] = [
        WizardStep::Select,
        WizardStep::Contributors,
        WizardStep::Splits,
        WizardStep::Review,
        WizardStep::Register,
    ];

    fn index(self) -> usize {
        Self::ALL.iter().position(|&s| s == self).unwrap_or(0)
    }

    pub fn label(self) -> &'static str {
        match self {
            WizardStep::Select => "Select Work",
            WizardStep::Contributors => "Contributors",
            WizardStep::Splits => "Royalty Splits",
            WizardStep::Review => "Review",
            WizardStep::Register => "Register",
        }
    }
}

/// Step-sequencing state for one registration flow
#[derive(Debug)]
pub struct Wizard {
    current: usize,
    selected: Option<Work>,
}

impl Wizard {
    pub fn new() -> Self {
        Self {
            current: 0,
            selected: None,
        }
    }

    pub fn current_step(&self) -> WizardStep {
        WizardStep::ALL[self.current]
    }

    pub fn selected_work(&self) -> Option<&Work> {
        self.selected.as_ref()
    }

    /// Choose the work this wizard run operates on
    pub fn select_work(&mut self, work: Work) {
        self.selected = Some(work);
    }

    /// Replace the held work with a freshly fetched copy (after edits)
    pub fn refresh_work(&mut self, work: Work) {
        if self
            .selected
            .as_ref()
            .map(|current| current.id == work.id)
            .unwrap_or(false)
        {
            self.selected = Some(work);
        }
    }

    /// Whether forward navigation is currently allowed
    ///
    /// `select` requires a chosen work; `register` is terminal. The splits
    /// step never blocks (validity is a warning until registration).
    pub fn can_advance(&self) -> bool {
        match self.current_step() {
            WizardStep::Select => self.selected.is_some(),
            WizardStep::Register => false,
            _ => true,
        }
    }

    /// Advance one step; a refused advance leaves the step unchanged
    pub fn advance(&mut self) -> WizardStep {
        if self.can_advance() {
            self.current += 1;
        }
        self.current_step()
    }

    /// Go back one step; unrestricted above `select`
    pub fn back(&mut self) -> WizardStep {
        self.current = self.current.saturating_sub(1);
        self.current_step()
    }

    /// Jump directly to a step; only backward jumps are allowed. Forward
    /// movement always goes through [`Wizard::advance`] and its gating.
    pub fn go_to(&mut self, step: WizardStep) -> bool {
        let target = step.index();
        if target <= self.current {
            self.current = target;
            true
        } else {
            false
        }
    }

    /// Split-validity warning for the selected work, None when clean
    pub fn split_warning(&self) -> Option<String> {
        let work = self.selected.as_ref()?;
        if work.contributors.is_empty() {
            return Some("Add contributors before setting royalty splits.".to_string());
        }
        validate_splits(&work.splits()).message()
    }

    /// Blockers the final register action would hit right now
    pub fn registration_blockers(&self) -> Vec<Blocker> {
        match &self.selected {
            Some(work) => submission_blockers(work),
            None => vec![Blocker::NoContributors],
        }
    }

    /// Whether the register action is currently allowed
    pub fn can_register(&self) -> bool {
        self.selected.is_some() && self.registration_blockers().is_empty()
    }
}

impl Default for Wizard {
    fn default() -> Self {
        Self::new()
    }
}
