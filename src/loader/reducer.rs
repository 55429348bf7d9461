//! Reducer for the loader's in-flight/error state.

use crate::mvi::Reducer;

use super::intent::{LoadIntent, LoadKind};
use super::state::{LoadActivity, LoaderState};

/// Pure transitions; the guard against overlapping loads is checked by
/// the caller before dispatching `Started`.
pub struct LoadReducer;

impl Reducer for LoadReducer {
    type State = LoaderState;
    type Intent = LoadIntent;

    fn reduce(state: Self::State, intent: Self::Intent) -> Self::State {
        match intent {
            LoadIntent::Started(kind) => {
                if !state.is_idle() {
                    return state;
                }
                let activity = match kind {
                    LoadKind::Initial => LoadActivity::LoadingInitial,
                    LoadKind::More => LoadActivity::LoadingMore,
                };
                LoaderState { activity, ..state }
            }
            LoadIntent::Succeeded => LoaderState {
                activity: LoadActivity::Idle,
                last_error: None,
            },
            LoadIntent::Failed { cause } => LoaderState {
                activity: LoadActivity::Idle,
                last_error: Some(cause),
            },
            LoadIntent::Cancelled => LoaderState {
                activity: LoadActivity::Idle,
                ..state
            },
        }
    }
}
