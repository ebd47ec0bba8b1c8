pub mod artifacts;
pub mod config;
pub mod error;
pub mod lineage;
pub mod reports;
pub mod types;

pub use error::{FamilyError, FamilyResult};
pub use lineage::{Family, Member, Relationship};
