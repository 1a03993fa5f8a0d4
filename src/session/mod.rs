//! Editing-session state: the document being built, the selection and the last generated code.
use crate::error::SessionError;
use crate::form::{ComponentNode, FieldKind, FormDocument, create_component};
use crate::generator::{GeneratedSource, Generator};
use crate::tree::{self, Scope};

pub const DEFAULT_FORM_NAME: &str = "MyForm";

/// The workspace view the user is looking at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Builder,
    Preview,
    Code,
}

#[derive(Debug, Clone)]
pub struct EditorSession {
    document: FormDocument,
    selected: Option<String>,
    tab: Tab,
    generated: Option<GeneratedSource>,
    indent_width: usize,
}

impl Default for EditorSession {
    fn default() -> Self {
        Self::new(DEFAULT_FORM_NAME)
    }
}

impl EditorSession {
    pub fn new(form_name: &str) -> Self {
        Self {
            document: FormDocument::new(form_name),
            selected: None,
            tab: Tab::Builder,
            generated: None,
            indent_width: crate::generator::DEFAULT_INDENT_WIDTH,
        }
    }

    /// Starts a session on an already loaded document.
    pub fn with_document(document: FormDocument) -> Self {
        Self {
            document,
            ..Self::default()
        }
    }

    pub fn with_indent_width(mut self, width: usize) -> Self {
        self.indent_width = width;
        self
    }

    pub fn document(&self) -> &FormDocument {
        &self.document
    }

    pub fn components(&self) -> &[ComponentNode] {
        &self.document.components
    }

    pub fn form_name(&self) -> &str {
        &self.document.name
    }

    pub fn selected(&self) -> Option<&ComponentNode> {
        self.selected
            .as_deref()
            .and_then(|id| tree::find(&self.document.components, id))
    }

    pub fn selected_id(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn tab(&self) -> Tab {
        self.tab
    }

    pub fn set_tab(&mut self, tab: Tab) {
        self.tab = tab;
    }

    /// Sources from the last successful [`generate`](Self::generate).
    pub fn generated(&self) -> Option<&GeneratedSource> {
        self.generated.as_ref()
    }

    /// Drops a new palette component at the end of `parent_id` (or the root) and selects it.
    ///
    /// Returns the new id, or `None` when the parent does not exist or cannot hold children.
    pub fn add_component(&mut self, kind: FieldKind, parent_id: Option<&str>) -> Option<String> {
        let node = create_component(kind, &self.document.components, parent_id);
        let id = node.id.clone();
        let scope = Scope::from_parent(parent_id);
        self.document.components = tree::insert(&self.document.components, node, &scope);

        if tree::find(&self.document.components, &id).is_none() {
            return None;
        }
        log::info!("Added {} component '{}'", kind, id);
        self.selected = Some(id.clone());
        Some(id)
    }

    pub fn update_component(&mut self, replacement: ComponentNode) {
        self.document.components = tree::update(&self.document.components, replacement);
    }

    /// Removes a node and its subtree. The selection is cleared if it pointed into the subtree.
    pub fn remove_component(&mut self, id: &str) {
        self.document.components = tree::remove(&self.document.components, id);
        if let Some(selected) = &self.selected {
            if tree::find(&self.document.components, selected).is_none() {
                self.selected = None;
            }
        }
    }

    pub fn move_component(&mut self, from: usize, to: usize, parent_id: Option<&str>) {
        let scope = Scope::from_parent(parent_id);
        self.document.components = tree::reorder(&self.document.components, &scope, from, to);
    }

    /// Selects a node, or clears the selection with `None`. Unknown ids clear it too.
    pub fn select(&mut self, id: Option<&str>) {
        self.selected = id
            .filter(|id| tree::find(&self.document.components, id).is_some())
            .map(str::to_string);
    }

    pub fn rename_form(&mut self, name: &str) {
        self.document.name = name.to_string();
    }

    /// Empties the forest and the selection.
    pub fn clear(&mut self) {
        self.document.components.clear();
        self.selected = None;
        self.generated = None;
    }

    /// Generates code for the current form and switches to the code view.
    pub fn generate(&mut self) -> Result<&GeneratedSource, SessionError> {
        if self.document.components.is_empty() {
            return Err(SessionError::EmptyForm);
        }

        let source = Generator::builder(&self.document.name)
            .indent_width(self.indent_width)
            .build()
            .generate(&self.document.components);
        self.tab = Tab::Code;
        Ok(&*self.generated.insert(source))
    }

    pub fn export_json(&self) -> Result<String, SessionError> {
        self.document.to_json().map_err(|e| SessionError::Export {
            path: self.document.export_file_name(),
            message: e.to_string(),
        })
    }

    /// Writes the document to `path`.
    pub fn save(&self, path: &str) -> Result<(), SessionError> {
        let json = self.export_json()?;
        std::fs::write(path, json).map_err(|e| SessionError::Export {
            path: path.to_string(),
            message: e.to_string(),
        })?;
        log::info!("Saved form '{}' to '{}'", self.document.name, path);
        Ok(())
    }

    /// Replaces the whole document with the imported one and resets the selection.
    ///
    /// On error nothing changes.
    pub fn import_json(&mut self, json: &str) -> Result<(), SessionError> {
        let document = FormDocument::from_json(json)?;
        log::info!(
            "Imported form '{}' ({} root component(s))",
            document.name,
            document.components.len()
        );
        self.document = document;
        self.selected = None;
        self.generated = None;
        Ok(())
    }
}
