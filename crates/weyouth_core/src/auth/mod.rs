//! Identity resolution and role capabilities.
//!
//! # Responsibility
//! - Turn a typed name (and password) into a role-tagged `Session`.
//! - Map roles to the capabilities checked at every store entry point.
//!
//! # Invariants
//! - Name-set membership is decided before the password is looked at.
//! - Unknown roles never exist; every role has a fixed capability row.

pub mod capability;
pub mod resolver;
