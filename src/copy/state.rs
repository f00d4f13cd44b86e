/// Which domain, if any, currently shows the "copied" confirmation.
///
/// Every confirmation carries the generation of the expiry timer that was
/// armed for it. A timer may only clear the state it was armed for, so a
/// timer that fires after being superseded changes nothing.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CopyState {
    #[default]
    Idle,
    Confirmed { domain: String, generation: u64 },
}

/// What a successful copy did to the previous state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    /// Nothing was confirmed before.
    Armed,
    /// Same domain copied again; its window restarts.
    Rearmed,
    /// A different domain was confirmed and has been replaced.
    Superseded { previous: String },
}

impl CopyState {
    pub fn confirm(&mut self, domain: &str, generation: u64) -> Transition {
        let transition = match self {
            CopyState::Idle => Transition::Armed,
            CopyState::Confirmed { domain: current, .. } if current.as_str() == domain => {
                Transition::Rearmed
            }
            CopyState::Confirmed { domain: current, .. } => Transition::Superseded {
                previous: std::mem::take(current),
            },
        };
        *self = CopyState::Confirmed {
            domain: domain.to_string(),
            generation,
        };
        transition
    }

    /// Returns true if the state was cleared by this call.
    pub fn expire(&mut self, generation: u64) -> bool {
        match self {
            CopyState::Confirmed { generation: g, .. } if *g == generation => {
                *self = CopyState::Idle;
                true
            }
            _ => false,
        }
    }

    pub fn confirmed(&self) -> Option<&str> {
        match self {
            CopyState::Idle => None,
            CopyState::Confirmed { domain, .. } => Some(domain),
        }
    }

    pub fn is_confirmed(&self, domain: &str) -> bool {
        self.confirmed() == Some(domain)
    }
}
