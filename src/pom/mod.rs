//! POM descriptor codec.
//!
//! Reading uses the quick-xml event API; writing goes through quick-xml's
//! serde serializer. Both sides cover the same schema subset: project
//! identity, direct dependencies, and dependency-management entries.

mod reader;
mod writer;

pub use reader::load_pom;
pub use writer::{render_pom, write_pom};
