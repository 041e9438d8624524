//! # Application Module
//!
//! Model metadata for the applications a project declares, and the loader
//! that reads it from a project manifest.
//!
//! A manifest is YAML (`.yaml`/`.yml`) or JSON:
//!
//! ```yaml
//! runtime:
//!   python: "3.6"
//!   django: "1.11"
//! options:
//!   format: modelviewset
//! apps:
//!   - label: blog
//!     models:
//!       - name: Post
//!         fields:
//!           - { name: id, type: AutoField }
//!           - { name: author, type: ForeignKey, to: auth.User }
//! ```

mod load;
mod types;

pub use load::*;
pub use types::*;
