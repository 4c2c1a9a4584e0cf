//! `PropertySet` and related types for pass communication.
//!
//! Compilation passes share data through a [`PropertySet`]: the target's
//! [`BasisGates`] has a dedicated field, and passes can publish arbitrary
//! typed values for later passes or for the caller.
//!
//! # Examples
//!
//! ```
//! use qdice_compile::{BasisGates, PropertySet};
//!
//! let props = PropertySet::new().with_basis_gates(BasisGates::native());
//! assert!(props.basis_gates.as_ref().unwrap().contains("sx"));
//! ```
//!
//! ## Custom properties
//!
//! ```
//! use qdice_compile::PropertySet;
//!
//! #[derive(Debug, PartialEq)]
//! struct Note(&'static str);
//!
//! let mut props = PropertySet::new();
//! props.insert(Note("hello"));
//! assert_eq!(props.get::<Note>(), Some(&Note("hello")));
//! ```

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::any::{Any, TypeId};

/// Basis gates for the target device.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BasisGates {
    /// List of gate names in the basis.
    gates: Vec<String>,
}

impl BasisGates {
    /// Create a new basis gates set.
    pub fn new(gates: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            gates: gates.into_iter().map(Into::into).collect(),
        }
    }

    /// Check if a gate is in the basis.
    pub fn contains(&self, gate: &str) -> bool {
        self.gates.iter().any(|g| g == gate)
    }

    /// Get the basis gates.
    pub fn gates(&self) -> &[String] {
        &self.gates
    }

    /// Native superconducting basis (RZ + SX + SXdg + X).
    pub fn native() -> Self {
        Self::new(["rz", "sx", "sxdg", "x", "measure", "barrier"])
    }

    /// Every gate the IR can express.
    pub fn universal() -> Self {
        Self::new([
            "id", "x", "y", "z", "h", "s", "sdg", "sx", "sxdg", "rx", "ry", "rz", "measure",
            "barrier",
        ])
    }
}

/// Bookkeeping published by the optimization passes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OptimizationStats {
    /// Rotations folded into a neighbouring rotation about the same axis.
    pub rotations_merged: usize,
    /// Gates removed because they act as the identity.
    pub gates_removed: usize,
}

/// Properties shared between compilation passes.
///
/// | Field | Type | Description |
/// |-------|------|-------------|
/// | `basis_gates` | [`BasisGates`] | Native gate set for the target |
///
/// Passes can store arbitrary data using the type-safe [`insert`](Self::insert)
/// and [`get`](Self::get) methods. Each type can have at most one value stored.
#[derive(Debug, Default)]
pub struct PropertySet {
    /// Target basis gates for gate decomposition.
    ///
    /// Should be set before running translation passes.
    pub basis_gates: Option<BasisGates>,

    /// Custom properties storage (type-erased).
    custom: FxHashMap<TypeId, Box<dyn Any + Send + Sync>>,
}

impl PropertySet {
    /// Create a new empty property set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the target basis gates.
    #[must_use]
    pub fn with_basis_gates(mut self, basis_gates: BasisGates) -> Self {
        self.basis_gates = Some(basis_gates);
        self
    }

    /// Insert a custom property.
    pub fn insert<T: Any + Send + Sync>(&mut self, value: T) {
        self.custom.insert(TypeId::of::<T>(), Box::new(value));
    }

    /// Get a custom property.
    pub fn get<T: Any>(&self) -> Option<&T> {
        self.custom
            .get(&TypeId::of::<T>())
            .and_then(|v| v.downcast_ref())
    }

    /// Update a custom property in place, starting from its default if absent.
    pub fn update<T: Any + Send + Sync + Default>(&mut self, f: impl FnOnce(&mut T)) {
        let mut value = self.remove::<T>().unwrap_or_default();
        f(&mut value);
        self.insert(value);
    }

    /// Remove a custom property.
    pub fn remove<T: Any>(&mut self) -> Option<T> {
        self.custom
            .remove(&TypeId::of::<T>())
            .and_then(|v| v.downcast().ok())
            .map(|v| *v)
    }
}
