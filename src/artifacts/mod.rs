pub mod parser;

pub use parser::{ChildBatch, FamilyFile, FileFormat};
