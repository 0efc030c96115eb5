//! HedgeState enum and its lifecycle graph.

use crate::domain::foundation::StateMachine;

reference_enum! {
    /// Lifecycle state of a hedge relationship.
    #[derive(Default)]
    pub enum HedgeState {
        #[default]
        Draft => ("Draft", "Draft"),
        Designated => ("Designated", "Designated"),
        Dedesignated => ("Dedesignated", "Dedesignated"),
    }
}

impl HedgeState {
    /// Returns true while the relationship may be edited in place.
    pub fn is_editable(&self) -> bool {
        matches!(self, HedgeState::Draft)
    }
}

impl StateMachine for HedgeState {
    /// Valid edges:
    /// - Draft -> Designated (designation)
    /// - Designated -> Dedesignated (de-designation)
    /// - Designated -> Designated (re-designation starts a new cycle)
    /// - Designated -> Draft, Dedesignated -> Draft (redraft)
    fn can_transition_to(&self, target: &Self) -> bool {
        use HedgeState::*;
        matches!(
            (self, target),
            (Draft, Designated)
                | (Designated, Dedesignated)
                | (Designated, Designated)
                | (Designated, Draft)
                | (Dedesignated, Draft)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use HedgeState::*;
        match self {
            Draft => vec![Designated],
            Designated => vec![Dedesignated, Designated, Draft],
            Dedesignated => vec![Draft],
        }
    }
}
