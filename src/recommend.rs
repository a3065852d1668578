//! Recommendation resolver: picks one catalog song for a mood.
//!
//! The catalog is reloaded on every call and a fresh uniform choice is made
//! among the matching rows, so repeated requests may return the same song.

use crate::catalog::{Mood, SongRecord};
use crate::storage::{Storage, StorageError};
use log::{debug, info};
use rand::seq::SliceRandom;
use rand::Rng;

/// Outcome of a successful catalog lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Recommendation {
    /// One song drawn from the matching rows
    Found(SongRecord),
    /// The catalog loaded but has no row for the mood
    NoMatch,
}

/// All catalog rows whose mood matches `mood`.
#[must_use]
pub fn matching_songs(catalog: &[SongRecord], mood: Mood) -> Vec<&SongRecord> {
    catalog.iter().filter(|song| song.matches_mood(mood)).collect()
}

/// Load the catalog from `storage` and draw one song for `mood`.
///
/// # Errors
///
/// Propagates [`StorageError::CatalogMissing`] and
/// [`StorageError::CatalogMalformed`]; an empty match is not an error.
pub fn resolve<S, R>(storage: &S, mood: Mood, rng: &mut R) -> Result<Recommendation, StorageError>
where
    S: Storage + ?Sized,
    R: Rng + ?Sized,
{
    let catalog = storage.load_catalog()?;
    let candidates = matching_songs(&catalog, mood);
    debug!("{} of {} catalog rows match {mood}", candidates.len(), catalog.len());

    match candidates.choose(rng) {
        Some(song) => {
            info!("Recommending '{}' by {} for {mood}", song.title, song.artist);
            Ok(Recommendation::Found((*song).clone()))
        }
        None => Ok(Recommendation::NoMatch),
    }
}
