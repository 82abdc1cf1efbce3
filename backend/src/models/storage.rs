//! Storage facility state
//!
//! Tracks the quantity of gas held in the facility. Every transition checks
//! the pre-transition volume and either moves the full quantity or nothing.
//!
//! CRITICAL: `0 <= volume <= capacity` holds after every call.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Reasons a storage transition cannot be carried out
#[derive(Debug, Error, Clone, PartialEq)]
pub enum StorageError {
    #[error("Insufficient space: requested {requested}, free {available}")]
    InsufficientCapacity { requested: f64, available: f64 },

    #[error("Insufficient gas in storage: requested {requested}, stored {available}")]
    InsufficientVolume { requested: f64, available: f64 },
}

/// Running volume of one storage facility
///
/// # Example
/// ```
/// use gas_storage_core_rs::StorageState;
///
/// let mut storage = StorageState::new(2000.0);
/// storage.inject(1000.0).unwrap();
/// storage.inject(1000.0).unwrap();
/// assert!(storage.inject(1000.0).is_err()); // full
/// assert_eq!(storage.volume(), 2000.0);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageState {
    volume: f64,
    capacity: f64,
    /// Highest volume reached so far
    peak_volume: f64,
}

impl StorageState {
    /// Empty facility with the given capacity
    pub fn new(capacity: f64) -> Self {
        Self {
            volume: 0.0,
            capacity,
            peak_volume: 0.0,
        }
    }

    pub fn volume(&self) -> f64 {
        self.volume
    }

    pub fn capacity(&self) -> f64 {
        self.capacity
    }

    pub fn peak_volume(&self) -> f64 {
        self.peak_volume
    }

    /// Space left before the facility is full
    pub fn free_space(&self) -> f64 {
        self.capacity - self.volume
    }

    pub fn can_inject(&self, quantity: f64) -> bool {
        self.volume + quantity <= self.capacity
    }

    pub fn can_withdraw(&self, quantity: f64) -> bool {
        self.volume >= quantity
    }

    /// Store `quantity` units, returning the new volume
    ///
    /// # Errors
    /// `InsufficientCapacity` if the full quantity does not fit. The state is
    /// left untouched.
    pub fn inject(&mut self, quantity: f64) -> Result<f64, StorageError> {
        if !self.can_inject(quantity) {
            return Err(StorageError::InsufficientCapacity {
                requested: quantity,
                available: self.free_space(),
            });
        }
        self.volume += quantity;
        self.peak_volume = self.peak_volume.max(self.volume);
        Ok(self.volume)
    }

    /// Remove `quantity` units, returning the new volume
    ///
    /// # Errors
    /// `InsufficientVolume` if less than `quantity` is stored. The state is
    /// left untouched.
    pub fn withdraw(&mut self, quantity: f64) -> Result<f64, StorageError> {
        if !self.can_withdraw(quantity) {
            return Err(StorageError::InsufficientVolume {
                requested: quantity,
                available: self.volume,
            });
        }
        self.volume -= quantity;
        Ok(self.volume)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inject_up_to_exact_capacity() {
        let mut storage = StorageState::new(1000.0);
        assert_eq!(storage.inject(1000.0), Ok(1000.0));
        assert_eq!(storage.free_space(), 0.0);
    }

    #[test]
    fn test_failed_withdraw_leaves_state() {
        let mut storage = StorageState::new(1000.0);
        storage.inject(200.0).unwrap();

        let err = storage.withdraw(500.0).unwrap_err();
        assert_eq!(
            err,
            StorageError::InsufficientVolume {
                requested: 500.0,
                available: 200.0
            }
        );
        assert_eq!(storage.volume(), 200.0);
    }

    #[test]
    fn test_peak_volume_tracks_maximum() {
        let mut storage = StorageState::new(3000.0);
        storage.inject(1000.0).unwrap();
        storage.inject(1000.0).unwrap();
        storage.withdraw(1500.0).unwrap();
        assert_eq!(storage.volume(), 500.0);
        assert_eq!(storage.peak_volume(), 2000.0);
    }
}
