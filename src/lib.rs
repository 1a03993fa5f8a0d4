//! # Yoshiki - Form Definition Model and Code Generator
//!
//! **Yoshiki** is the core of a visual form builder. A form is a forest of components: input
//! fields (text, email, select, date, ...) and layout containers (grid, flex, row, column,
//! section) that nest other components. Fields can carry visibility conditions on the values of
//! other fields.
//!
//! ## Core Workflow
//!
//! 1.  **Build the Forest**: Create components from the palette and attach them with the pure
//!     operations in [`tree`], or drive an [`session::EditorSession`] which does both.
//! 2.  **Preview**: Decide which fields are shown with [`condition::visible`] and run the preview
//!     validation pass with [`validation::validate`].
//! 3.  **Generate**: Use [`generator::Generator::builder`] to emit a zod schema module and a
//!     React form component for the forest.
//! 4.  **Persist**: Round-trip the document through JSON with [`form::FormDocument`].
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use yoshiki::prelude::*;
//! use serde_json::json;
//!
//! fn main() -> Result<()> {
//!     let mut session = EditorSession::new("Signup");
//!
//!     // 1. Drop an email field and make it required.
//!     let id = session.add_component(FieldKind::Email, None).expect("root accepts fields");
//!     if let Some(email) = session.selected().cloned() {
//!         session.update_component(email.with_prop("label", "Email").with_prop("required", true));
//!     }
//!
//!     // 2. Validate a preview submission.
//!     let mut values = FormValues::new();
//!     values.insert("email1".to_string(), json!("not-an-email"));
//!     let report = validate(session.components(), &values);
//!     println!("{:?} -> {:?}", id, report.error("email1"));
//!
//!     // 3. Generate the schema and component sources.
//!     let generated = session.generate()?;
//!     println!("{}", generated.schema);
//!
//!     Ok(())
//! }
//! ```

pub mod condition;
pub mod error;
pub mod form;
pub mod generator;
pub mod prelude;
pub mod session;
pub mod tree;
pub mod validation;
