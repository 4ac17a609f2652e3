//! Rendered node tree and locator resolution for the mock app.
//!
//! Each render produces a flat arena of nodes in document order. Parents
//! are indices into the same arena, so scoping is an ancestor walk.

use crate::locator::{Locator, Role, Selector};
use crate::result::{GymError, GymResult};

use super::backend::Id;

/// Admin panel tab
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AdminTab {
    /// Accounts
    #[default]
    Users,
    /// Exercise library
    Exercises,
    /// Workout templates
    Templates,
}

/// Overlay dialog
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Modal {
    /// Dashboard "Start New Workout"
    StartWorkout,
    /// Workout "Add Exercise to Workout"
    AddExercise,
    /// Workout completion confirmation
    CompleteWorkout,
    /// Admin "Create New User"
    CreateUser,
    /// Admin "Create New Exercise"
    CreateExercise,
    /// Admin "Create New Template"
    CreateTemplate,
}

/// What a click does
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Client-side route change
    Navigate(String),
    /// Submit the login form
    SignIn,
    /// Submit the registration form
    Register,
    /// Drop the auth token
    Logout,
    /// Show a dialog
    Open(Modal),
    /// Hide the current dialog
    Dismiss,
    /// Create the workout named in the start dialog
    StartWorkout,
    /// Attach an exercise to the open workout
    AddExercise(Id),
    /// Confirm completion
    ConfirmComplete,
    /// Submit the profile form
    UpdateProfile,
    /// Switch admin tab
    Tab(AdminTab),
    /// Submit the user dialog
    SaveUser,
    /// Submit the exercise dialog
    SaveExercise,
    /// Submit the template dialog
    SaveTemplate,
    /// Open the template exercise picker
    OpenPicker,
    /// Pick an exercise into the template draft
    PickExercise(Id),
    /// Close the picker
    ClosePicker,
}

/// Interactive behaviour of a node
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Control {
    /// Static content
    Static,
    /// Text input bound to a form field
    Input(&'static str),
    /// `<select>` bound to a form field, options as `(value, label)`
    Select(&'static str, Vec<(String, String)>),
    /// Checkbox bound to a flag
    Checkbox(&'static str),
    /// Radio bound to a field, carrying its value
    Radio(&'static str, String),
    /// Clickable
    Action(Action),
}

/// One rendered element
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    /// ARIA role
    pub role: Option<Role>,
    /// Accessible name
    pub name: String,
    /// Associated `<label>` text
    pub label: Option<String>,
    /// Placeholder attribute
    pub placeholder: Option<String>,
    /// `id` attribute
    pub dom_id: Option<String>,
    /// Own text content
    pub text: Option<String>,
    /// Containing node
    pub parent: Option<usize>,
    /// Behaviour
    pub control: Control,
}

impl Node {
    fn bare(role: Option<Role>, control: Control) -> Self {
        Self {
            role,
            name: String::new(),
            label: None,
            placeholder: None,
            dom_id: None,
            text: None,
            parent: None,
            control,
        }
    }

    /// `<h*>`
    #[must_use]
    pub fn heading(text: impl Into<String>) -> Self {
        Self::bare(Some(Role::Heading), Control::Static).named(text)
    }

    /// Clickable heading (cards in pickers)
    #[must_use]
    pub fn heading_action(text: impl Into<String>, action: Action) -> Self {
        Self::bare(Some(Role::Heading), Control::Action(action)).named(text)
    }

    /// `<button>`
    #[must_use]
    pub fn button(text: impl Into<String>, action: Action) -> Self {
        Self::bare(Some(Role::Button), Control::Action(action)).named(text)
    }

    /// `<a href>` handled by the client router
    #[must_use]
    pub fn link(text: impl Into<String>, path: impl Into<String>) -> Self {
        Self::bare(Some(Role::Link), Control::Action(Action::Navigate(path.into()))).named(text)
    }

    /// `<p>` / `<span>`
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        let mut node = Self::bare(None, Control::Static);
        node.text = Some(text.into());
        node
    }

    /// Labelled `<input>` or `<textarea>`
    #[must_use]
    pub fn input(label: impl Into<String>, field: &'static str) -> Self {
        let label = label.into();
        let mut node = Self::bare(Some(Role::Textbox), Control::Input(field));
        node.name.clone_from(&label);
        node.label = Some(label);
        node
    }

    /// Unlabelled `<input placeholder>`
    #[must_use]
    pub fn search(placeholder: impl Into<String>, field: &'static str) -> Self {
        let placeholder = placeholder.into();
        let mut node = Self::bare(Some(Role::Textbox), Control::Input(field));
        node.name.clone_from(&placeholder);
        node.placeholder = Some(placeholder);
        node
    }

    /// Labelled `<select>`
    #[must_use]
    pub fn select(label: impl Into<String>, field: &'static str, options: &[(&str, &str)]) -> Self {
        let label = label.into();
        let options = options
            .iter()
            .map(|(v, l)| ((*v).to_string(), (*l).to_string()))
            .collect();
        let mut node = Self::bare(Some(Role::Combobox), Control::Select(field, options));
        node.name.clone_from(&label);
        node.label = Some(label);
        node
    }

    /// Labelled checkbox
    #[must_use]
    pub fn checkbox(label: impl Into<String>, field: &'static str) -> Self {
        let label = label.into();
        let mut node = Self::bare(Some(Role::Checkbox), Control::Checkbox(field));
        node.name.clone_from(&label);
        node.label = Some(label);
        node
    }

    /// Labelled radio button
    #[must_use]
    pub fn radio(label: impl Into<String>, field: &'static str, value: impl Into<String>) -> Self {
        let label = label.into();
        let mut node = Self::bare(Some(Role::Radio), Control::Radio(field, value.into()));
        node.name.clone_from(&label);
        node.label = Some(label);
        node
    }

    /// Set the `id` attribute
    #[must_use]
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.dom_id = Some(id.into());
        self
    }

    /// Set the placeholder attribute
    #[must_use]
    pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    fn named(mut self, text: impl Into<String>) -> Self {
        let text = text.into();
        self.name.clone_from(&text);
        self.text = Some(text);
        self
    }

    fn matches(&self, selector: &Selector) -> GymResult<bool> {
        match selector {
            Selector::Role { role, name } => {
                if self.role != Some(*role) {
                    return Ok(false);
                }
                name.as_ref().map_or(Ok(true), |m| m.is_match(&self.name))
            }
            Selector::Label { text } => self.label.as_ref().map_or(Ok(false), |l| text.is_match(l)),
            Selector::Placeholder { text } => self
                .placeholder
                .as_ref()
                .map_or(Ok(false), |p| text.is_match(p)),
            Selector::Text { text } => self.text.as_ref().map_or(Ok(false), |t| text.is_match(t)),
            Selector::Css { css } => match css.strip_prefix('#') {
                Some(id) if !id.contains([' ', '.', '[', '>', ':']) => {
                    Ok(self.dom_id.as_deref() == Some(id))
                }
                _ => Err(GymError::InvalidPattern {
                    pattern: css.clone(),
                    message: "only #id selectors are supported offline".to_string(),
                }),
            },
        }
    }
}

/// A rendered page
#[derive(Debug, Clone, Default)]
pub struct Dom {
    nodes: Vec<Node>,
}

impl Dom {
    /// Empty document
    #[must_use]
    pub const fn new() -> Self {
        Self { nodes: Vec::new() }
    }

    /// Append a top-level node
    pub fn push(&mut self, node: Node) -> usize {
        self.nodes.push(node);
        self.nodes.len() - 1
    }

    /// Append a node inside `parent`
    pub fn push_in(&mut self, parent: usize, mut node: Node) -> usize {
        node.parent = Some(parent);
        self.push(node)
    }

    /// Append a top-level `role="dialog"` with a heading of the same name
    pub fn dialog(&mut self, name: &str) -> usize {
        let mut node = Node::bare(Some(Role::Dialog), Control::Static);
        node.name = name.to_string();
        let dialog = self.push(node);
        self.push_in(dialog, Node::heading(name));
        dialog
    }

    /// Node by index
    #[must_use]
    pub fn node(&self, index: usize) -> Option<&Node> {
        self.nodes.get(index)
    }

    /// Number of nodes
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Document has no nodes
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    fn has_ancestor_in(&self, index: usize, containers: &[usize]) -> bool {
        let mut cursor = self.nodes.get(index).and_then(|n| n.parent);
        while let Some(parent) = cursor {
            if containers.contains(&parent) {
                return true;
            }
            cursor = self.nodes.get(parent).and_then(|n| n.parent);
        }
        false
    }

    /// Indices matching `locator`, in document order
    ///
    /// # Errors
    ///
    /// [`GymError::InvalidPattern`] for bad regexes or unsupported CSS
    pub fn resolve(&self, locator: &Locator) -> GymResult<Vec<usize>> {
        let mut found = Vec::new();
        for (index, node) in self.nodes.iter().enumerate() {
            if node.matches(locator.selector())? {
                found.push(index);
            }
        }
        if let Some(scope) = locator.scope() {
            let containers = self.resolve(scope)?;
            found.retain(|&i| self.has_ancestor_in(i, &containers));
        }
        if let Some(nth) = locator.pick() {
            found = nth.pick(&found).into_iter().collect();
        }
        Ok(found)
    }

    /// One-line-per-node outline, for logs
    #[must_use]
    pub fn outline(&self) -> String {
        let mut out = String::new();
        for (index, node) in self.nodes.iter().enumerate() {
            let mut depth = 0;
            let mut cursor = node.parent;
            while let Some(parent) = cursor {
                depth += 1;
                cursor = self.nodes.get(parent).and_then(|n| n.parent);
            }
            let role = node.role.map_or("text", |r| r.as_str());
            let shown = node
                .label
                .as_deref()
                .or(node.text.as_deref())
                .or(node.placeholder.as_deref())
                .unwrap_or(&node.name);
            out.push_str(&format!("{index:>3} {:indent$}{role} {shown:?}\n", "", indent = depth * 2));
        }
        out
    }
}
