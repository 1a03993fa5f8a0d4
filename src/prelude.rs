//! Prelude module for convenient imports
//!
//! This module re-exports the most commonly used types and functions from the yoshiki crate.
//!
//! # Example
//!
//! ```rust,no_run
//! use yoshiki::prelude::*;
//!
//! # fn run_example() -> Result<()> {
//! let document = FormDocument::from_file("path/to/form.json")?;
//! let values = FormValues::new();
//!
//! for field in visible_fields(&document.components, &values) {
//!     println!("{} ({})", field.name, field.kind);
//! }
//!
//! let generated = generate(&document.components, &document.name);
//! std::fs::write("schema.ts", &generated.schema)?;
//! # Ok(())
//! # }
//! ```

// Form model
pub use crate::form::{
    ComponentNode, Condition, FieldKind, FormDocument, Operator, Properties, create_component,
};

// Tree operations
pub use crate::tree::Scope;

// Conditions and preview validation
pub use crate::condition::{FormValues, TraceFormatter, VisibilityTrace, explain, visible};
pub use crate::validation::{Submission, ValidationReport, submit, validate, visible_fields};

// Code generation
pub use crate::generator::{GeneratedSource, Generator, generate};

// Session
pub use crate::session::{EditorSession, Tab};

// Error types
pub use crate::error::{FragmentError, ImportError, SessionError};

// Result type alias for convenience
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;
