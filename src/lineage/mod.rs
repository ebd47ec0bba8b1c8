pub mod family;
pub mod member;
pub mod relationship;
pub mod traversal;

pub use family::Family;
pub use member::Member;
pub use relationship::Relationship;
pub use traversal::Traversal;
