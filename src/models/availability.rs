//! Per-role availability overrides.
//!
//! Each `(role, employee, slot)` triple is either forced on, forced off, or
//! free. The map is sparse: only overrides are stored and every other
//! triple reads back as [`Availability::Free`].

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::Role;

/// Availability of one employee for one slot in one role.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Availability {
    /// The employee must be on call.
    ForcedOn,
    /// The employee must not be on call.
    ForcedOff,
    /// The solver decides.
    #[default]
    Free,
}

/// Key of an availability override.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AvailabilityKey {
    pub role: Role,
    pub employee: String,
    pub slot: usize,
}

/// One availability override, as it appears in serialized input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailabilityEntry {
    pub role: Role,
    pub employee: String,
    pub slot: usize,
    pub availability: Availability,
}

/// Sparse availability overrides for all roles.
///
/// Serialized as a flat list of [`AvailabilityEntry`]. Setting a triple
/// twice keeps the last value; setting it to `Free` removes the override.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<AvailabilityEntry>", into = "Vec<AvailabilityEntry>")]
pub struct AvailabilityMap {
    overrides: BTreeMap<AvailabilityKey, Availability>,
}

impl AvailabilityMap {
    /// Creates an empty map (everyone free everywhere).
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the availability of a triple.
    pub fn set(
        &mut self,
        role: Role,
        employee: impl Into<String>,
        slot: usize,
        availability: Availability,
    ) {
        let key = AvailabilityKey {
            role,
            employee: employee.into(),
            slot,
        };
        match availability {
            Availability::Free => {
                self.overrides.remove(&key);
            }
            other => {
                self.overrides.insert(key, other);
            }
        }
    }

    /// Builder: forces an employee on call.
    pub fn with_forced_on(mut self, role: Role, employee: impl Into<String>, slot: usize) -> Self {
        self.set(role, employee, slot, Availability::ForcedOn);
        self
    }

    /// Builder: forces an employee off call.
    pub fn with_forced_off(mut self, role: Role, employee: impl Into<String>, slot: usize) -> Self {
        self.set(role, employee, slot, Availability::ForcedOff);
        self
    }

    /// Availability of a triple, `Free` when no override exists.
    pub fn get(&self, role: Role, employee: &str, slot: usize) -> Availability {
        let key = AvailabilityKey {
            role,
            employee: employee.to_string(),
            slot,
        };
        self.overrides.get(&key).copied().unwrap_or_default()
    }

    /// All overrides in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&AvailabilityKey, Availability)> {
        self.overrides.iter().map(|(k, &v)| (k, v))
    }

    /// Overrides for a single role.
    pub fn for_role(&self, role: Role) -> impl Iterator<Item = (&AvailabilityKey, Availability)> {
        self.iter().filter(move |(k, _)| k.role == role)
    }

    /// Number of slots for which `employee` is forced off in `role`.
    pub fn forced_off_count(&self, role: Role, employee: &str) -> usize {
        self.for_role(role)
            .filter(|(k, v)| k.employee == employee && *v == Availability::ForcedOff)
            .count()
    }

    /// Employees forced on for `slot` in `role`.
    pub fn forced_on_at(&self, role: Role, slot: usize) -> Vec<&str> {
        self.for_role(role)
            .filter(|(k, v)| k.slot == slot && *v == Availability::ForcedOn)
            .map(|(k, _)| k.employee.as_str())
            .collect()
    }

    /// Number of stored overrides.
    pub fn len(&self) -> usize {
        self.overrides.len()
    }

    /// Whether no override is stored.
    pub fn is_empty(&self) -> bool {
        self.overrides.is_empty()
    }
}

impl From<Vec<AvailabilityEntry>> for AvailabilityMap {
    fn from(entries: Vec<AvailabilityEntry>) -> Self {
        let mut map = Self::new();
        for entry in entries {
            map.set(entry.role, entry.employee, entry.slot, entry.availability);
        }
        map
    }
}

impl From<AvailabilityMap> for Vec<AvailabilityEntry> {
    fn from(map: AvailabilityMap) -> Self {
        map.overrides
            .into_iter()
            .map(|(key, availability)| AvailabilityEntry {
                role: key.role,
                employee: key.employee,
                slot: key.slot,
                availability,
            })
            .collect()
    }
}
