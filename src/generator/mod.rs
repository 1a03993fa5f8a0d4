//! Turns a component forest into a zod schema module and a React form component.
//!
//! Generation is a pure function of the forest and the form name. User-authored fragments that
//! fail their checks are dropped from the output and reported in [`GeneratedSource::warnings`].
use crate::error::FragmentError;
use crate::form::ComponentNode;
use crate::tree;

mod component;
pub mod fragment;
mod schema;
pub mod script;
mod writer;

pub use script::identifier;

pub const DEFAULT_INDENT_WIDTH: usize = 2;

/// Output of one generation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedSource {
    pub schema: String,
    pub component: String,
    pub warnings: Vec<FragmentError>,
}

pub struct Generator {
    form_name: String,
    indent_width: usize,
}

pub struct GeneratorBuilder {
    form_name: String,
    indent_width: usize,
}

impl GeneratorBuilder {
    pub fn new(form_name: &str) -> Self {
        Self {
            form_name: form_name.to_string(),
            indent_width: DEFAULT_INDENT_WIDTH,
        }
    }

    /// Spaces per indentation level in both generated files. Zero falls back to the default.
    pub fn indent_width(mut self, width: usize) -> Self {
        self.indent_width = if width == 0 { DEFAULT_INDENT_WIDTH } else { width };
        self
    }

    pub fn build(self) -> Generator {
        let mut form_name = identifier(&self.form_name);
        if form_name.is_empty() {
            log::warn!(
                "Form name '{}' has no identifier characters, using 'Form'",
                self.form_name
            );
            form_name = "Form".to_string();
        }
        Generator {
            form_name,
            indent_width: self.indent_width,
        }
    }
}

impl Generator {
    pub fn builder(form_name: &str) -> GeneratorBuilder {
        GeneratorBuilder::new(form_name)
    }

    /// The identifier used for the exported schema, type and component.
    pub fn form_name(&self) -> &str {
        &self.form_name
    }

    pub fn generate(&self, forest: &[ComponentNode]) -> GeneratedSource {
        let fields = tree::leaf_fields(forest);
        log::info!(
            "Generating '{}' from {} field(s)",
            self.form_name,
            fields.len()
        );

        let mut warnings = Vec::new();
        let schema = schema::emit_schema(&fields, &self.form_name, self.indent_width, &mut warnings);

        // Custom validation warnings come from the schema pass; the component pass adds props.
        let component = component::emit_component(
            forest,
            &fields,
            &self.form_name,
            self.indent_width,
            &mut warnings,
        );

        if !warnings.is_empty() {
            log::warn!("{} fragment(s) skipped during generation", warnings.len());
        }
        log::debug!("--- Generated schema ---\n{}", schema);

        GeneratedSource {
            schema,
            component,
            warnings,
        }
    }

    pub fn generate_schema(&self, forest: &[ComponentNode]) -> String {
        let fields = tree::leaf_fields(forest);
        let mut warnings = Vec::new();
        schema::emit_schema(&fields, &self.form_name, self.indent_width, &mut warnings)
    }

    pub fn generate_component(&self, forest: &[ComponentNode]) -> String {
        let fields = tree::leaf_fields(forest);
        let mut warnings = Vec::new();
        component::emit_component(
            forest,
            &fields,
            &self.form_name,
            self.indent_width,
            &mut warnings,
        )
    }
}

/// Generates both files with default options.
pub fn generate(forest: &[ComponentNode], form_name: &str) -> GeneratedSource {
    Generator::builder(form_name).build().generate(forest)
}
