use bevy::prelude::*;

use crate::capability::{SupportState, SupportStatus};

/// Which experience the gallery presents.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Hash, States)]
pub enum AppState {
    /// Capability probe has not resolved yet.
    #[default]
    CheckingSupport,
    /// AR is available; placement sessions can start.
    Interactive,
    /// AR is unavailable; the selected artwork is shown on a turntable.
    StaticPreview,
}

impl AppState {
    /// State a resolved verdict selects. `None` while unresolved.
    pub fn for_support(state: SupportState) -> Option<Self> {
        match state {
            SupportState::Unknown => None,
            SupportState::Supported => Some(Self::Interactive),
            SupportState::Unsupported => Some(Self::StaticPreview),
        }
    }
}

/// Follow the support verdict. A retry that flips the verdict moves the app
/// between the interactive and preview states.
pub fn transition_on_support_verdict(
    support: Res<SupportStatus>,
    state: Res<State<AppState>>,
    mut next_state: ResMut<NextState<AppState>>,
) {
    if !support.is_changed() {
        return;
    }
    let Some(target) = AppState::for_support(support.verdict().state) else {
        return;
    };
    if *state.get() != target {
        info!("→ Transitioning to {:?} state", target);
        next_state.set(target);
    }
}
