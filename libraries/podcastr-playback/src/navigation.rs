//! Navigation resolver
//!
//! Pure derivations over `PlaybackState`: whether next/previous exist and
//! which index they land on. Randomness is injected so results are fully
//! determined by the state and the RNG.

use crate::types::PlaybackState;
use rand::Rng;

/// Whether there is an episode before the current one
pub fn has_previous(state: &PlaybackState) -> bool {
    state.current_index.is_some_and(|i| i > 0)
}

/// Whether "next" is available
///
/// Shuffling always reports true once something is loaded, even for a
/// single-episode list where the draw can only replay the same episode.
pub fn has_next(state: &PlaybackState) -> bool {
    match state.current_index {
        Some(i) => state.is_shuffling || i + 1 < state.episode_list.len(),
        None => false,
    }
}

/// Index "next" would move to, or `None` when there is nowhere to go
///
/// In shuffle mode the draw is uniform over the whole list and may return
/// the current index.
pub fn resolve_next<R: Rng + ?Sized>(state: &PlaybackState, rng: &mut R) -> Option<usize> {
    if !has_next(state) {
        return None;
    }

    if state.is_shuffling {
        Some(rng.gen_range(0..state.episode_list.len()))
    } else {
        state.current_index.map(|i| i + 1)
    }
}

/// Shuffle draw that skips the current index when another one exists
pub fn resolve_next_avoiding_repeat<R: Rng + ?Sized>(
    state: &PlaybackState,
    rng: &mut R,
) -> Option<usize> {
    let len = state.episode_list.len();
    match state.current_index {
        Some(current) if state.is_shuffling && len > 1 => {
            // Draw from len-1 slots and step over the current one
            let pick = rng.gen_range(0..len - 1);
            Some(if pick >= current { pick + 1 } else { pick })
        }
        _ => resolve_next(state, rng),
    }
}

/// Index "previous" would move to, or `None` at the start of the list
pub fn resolve_previous(state: &PlaybackState) -> Option<usize> {
    if has_previous(state) {
        state.current_index.map(|i| i - 1)
    } else {
        None
    }
}
