//! Locator abstraction for element selection.
//!
//! A [`Locator`] is a semantic description of an element: an accessible
//! role and name, an associated label, a placeholder, a text pattern, or a
//! raw CSS selector, optionally scoped to a container and narrowed to an
//! ordinal position. Locators are plain data; resolving them against a live
//! page is the job of a [`crate::surface::Surface`].
//!
//! # Design
//!
//! - **Strict**: actions require exactly one match, ambiguity is an error
//! - **Zero is countable**: no match is a count of zero, not a failure
//! - **Serializable**: the browser resolver receives the locator as JSON

use regex::RegexBuilder;
use serde::{Deserialize, Serialize};

use crate::result::{GymError, GymResult};

/// Collapse whitespace runs and trim, the way accessible names are compared
#[must_use]
pub fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// How a name, label, placeholder or text is matched
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TextMatch {
    /// Whole-string, case-sensitive match after whitespace normalization
    Exact {
        /// Expected text
        value: String,
    },
    /// Case-insensitive substring match
    Contains {
        /// Substring to look for
        value: String,
    },
    /// Regular expression search
    Regex {
        /// Pattern source
        source: String,
        /// Case-insensitive flag
        ignore_case: bool,
    },
}

impl TextMatch {
    /// Exact text
    #[must_use]
    pub fn exact(value: impl Into<String>) -> Self {
        Self::Exact {
            value: value.into(),
        }
    }

    /// Case-insensitive substring
    #[must_use]
    pub fn contains(value: impl Into<String>) -> Self {
        Self::Contains {
            value: value.into(),
        }
    }

    /// Case-sensitive regular expression
    #[must_use]
    pub fn regex(source: impl Into<String>) -> Self {
        Self::Regex {
            source: source.into(),
            ignore_case: false,
        }
    }

    /// Case-insensitive regular expression
    #[must_use]
    pub fn iregex(source: impl Into<String>) -> Self {
        Self::Regex {
            source: source.into(),
            ignore_case: true,
        }
    }

    /// Test a candidate text against this matcher
    ///
    /// # Errors
    ///
    /// Returns [`GymError::InvalidPattern`] if a regex does not compile
    pub fn is_match(&self, candidate: &str) -> GymResult<bool> {
        let candidate = normalize_whitespace(candidate);
        match self {
            Self::Exact { value } => Ok(candidate == normalize_whitespace(value)),
            Self::Contains { value } => Ok(candidate
                .to_lowercase()
                .contains(&normalize_whitespace(value).to_lowercase())),
            Self::Regex {
                source,
                ignore_case,
            } => {
                let re = RegexBuilder::new(source)
                    .case_insensitive(*ignore_case)
                    .build()
                    .map_err(|e| GymError::InvalidPattern {
                        pattern: source.clone(),
                        message: e.to_string(),
                    })?;
                Ok(re.is_match(&candidate))
            }
        }
    }
}

impl From<&str> for TextMatch {
    fn from(value: &str) -> Self {
        Self::contains(value)
    }
}

impl From<String> for TextMatch {
    fn from(value: String) -> Self {
        Self::contains(value)
    }
}

impl std::fmt::Display for TextMatch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Exact { value } => write!(f, "{value:?}"),
            Self::Contains { value } => write!(f, "~{value:?}"),
            Self::Regex {
                source,
                ignore_case,
            } => {
                write!(f, "/{source}/")?;
                if *ignore_case {
                    f.write_str("i")?;
                }
                Ok(())
            }
        }
    }
}

/// ARIA roles the suite queries by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// `<button>` or `role="button"`
    Button,
    /// `<a href>` or `role="link"`
    Link,
    /// `<h1>`..`<h6>` or `role="heading"`
    Heading,
    /// `<dialog>` or `role="dialog"`
    Dialog,
    /// `<input type="radio">`
    Radio,
    /// `<input type="checkbox">`
    Checkbox,
    /// Text inputs and textareas
    Textbox,
    /// `<select>`
    Combobox,
}

impl Role {
    /// ARIA role name
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Button => "button",
            Self::Link => "link",
            Self::Heading => "heading",
            Self::Dialog => "dialog",
            Self::Radio => "radio",
            Self::Checkbox => "checkbox",
            Self::Textbox => "textbox",
            Self::Combobox => "combobox",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Selector type for locating elements
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "by", rename_all = "snake_case")]
pub enum Selector {
    /// Accessible role, optionally filtered by accessible name
    Role {
        /// Role to match
        role: Role,
        /// Accessible name filter
        #[serde(skip_serializing_if = "Option::is_none")]
        name: Option<TextMatch>,
    },
    /// Form control by its associated label text
    Label {
        /// Label matcher
        text: TextMatch,
    },
    /// Input by placeholder text
    Placeholder {
        /// Placeholder matcher
        text: TextMatch,
    },
    /// Innermost element whose own text matches
    Text {
        /// Text matcher
        text: TextMatch,
    },
    /// Raw CSS selector
    Css {
        /// CSS selector source
        css: String,
    },
}

impl Selector {
    /// Role with an accessible name
    #[must_use]
    pub fn role(role: Role, name: impl Into<TextMatch>) -> Self {
        Self::Role {
            role,
            name: Some(name.into()),
        }
    }

    /// Any element with the role
    #[must_use]
    pub const fn role_any(role: Role) -> Self {
        Self::Role { role, name: None }
    }

    /// Create a label selector
    #[must_use]
    pub fn label(text: impl Into<TextMatch>) -> Self {
        Self::Label { text: text.into() }
    }

    /// Create a placeholder selector
    #[must_use]
    pub fn placeholder(text: impl Into<TextMatch>) -> Self {
        Self::Placeholder { text: text.into() }
    }

    /// Create a text selector
    #[must_use]
    pub fn text(text: impl Into<TextMatch>) -> Self {
        Self::Text { text: text.into() }
    }

    /// Create a CSS selector
    #[must_use]
    pub fn css(css: impl Into<String>) -> Self {
        Self::Css { css: css.into() }
    }
}

impl std::fmt::Display for Selector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Role { role, name: None } => write!(f, "role={role}"),
            Self::Role {
                role,
                name: Some(name),
            } => write!(f, "role={role}[name={name}]"),
            Self::Label { text } => write!(f, "label={text}"),
            Self::Placeholder { text } => write!(f, "placeholder={text}"),
            Self::Text { text } => write!(f, "text={text}"),
            Self::Css { css } => write!(f, "css={css}"),
        }
    }
}

/// Ordinal narrowing applied after matching
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "pick", content = "index", rename_all = "snake_case")]
pub enum Nth {
    /// First match in document order
    First,
    /// Last match in document order
    Last,
    /// Zero-based position
    Index(usize),
}

impl Nth {
    /// Pick from an ordered list of candidates
    #[must_use]
    pub fn pick<T: Copy>(&self, candidates: &[T]) -> Option<T> {
        match self {
            Self::First => candidates.first().copied(),
            Self::Last => candidates.last().copied(),
            Self::Index(i) => candidates.get(*i).copied(),
        }
    }
}

/// A locator for finding elements.
///
/// Locators are strict: an action on a locator that resolves to several
/// elements fails unless the locator is scoped or narrowed with
/// [`Locator::first`], [`Locator::last`] or [`Locator::nth`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Locator {
    selector: Selector,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    scope: Option<Box<Locator>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    nth: Option<Nth>,
    #[serde(skip)]
    timeout_ms: Option<u64>,
}

impl Locator {
    /// Create a locator from a selector
    #[must_use]
    pub const fn from_selector(selector: Selector) -> Self {
        Self {
            selector,
            scope: None,
            nth: None,
            timeout_ms: None,
        }
    }

    /// `getByRole(role, { name })`
    #[must_use]
    pub fn role(role: Role, name: impl Into<TextMatch>) -> Self {
        Self::from_selector(Selector::role(role, name))
    }

    /// `getByLabel(text)`
    #[must_use]
    pub fn label(text: impl Into<TextMatch>) -> Self {
        Self::from_selector(Selector::label(text))
    }

    /// `getByPlaceholder(text)`
    #[must_use]
    pub fn placeholder(text: impl Into<TextMatch>) -> Self {
        Self::from_selector(Selector::placeholder(text))
    }

    /// `getByText(text)`
    #[must_use]
    pub fn text(text: impl Into<TextMatch>) -> Self {
        Self::from_selector(Selector::text(text))
    }

    /// `locator(css)`
    #[must_use]
    pub fn css(css: impl Into<String>) -> Self {
        Self::from_selector(Selector::css(css))
    }

    /// Only match descendants of `container`
    #[must_use]
    pub fn within(mut self, container: Self) -> Self {
        self.scope = Some(Box::new(container));
        self
    }

    /// Narrow to the first match
    #[must_use]
    pub const fn first(mut self) -> Self {
        self.nth = Some(Nth::First);
        self
    }

    /// Narrow to the last match
    #[must_use]
    pub const fn last(mut self) -> Self {
        self.nth = Some(Nth::Last);
        self
    }

    /// Narrow to the zero-based `index`-th match
    #[must_use]
    pub const fn nth(mut self, index: usize) -> Self {
        self.nth = Some(Nth::Index(index));
        self
    }

    /// Override the wait timeout for this locator
    #[must_use]
    pub const fn with_timeout(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = Some(timeout_ms);
        self
    }

    /// Get the selector
    #[must_use]
    pub const fn selector(&self) -> &Selector {
        &self.selector
    }

    /// Container this locator is scoped to
    #[must_use]
    pub fn scope(&self) -> Option<&Self> {
        self.scope.as_deref()
    }

    /// Ordinal narrowing, if any
    #[must_use]
    pub const fn pick(&self) -> Option<Nth> {
        self.nth
    }

    /// Per-locator timeout override
    #[must_use]
    pub const fn timeout_ms(&self) -> Option<u64> {
        self.timeout_ms
    }

    /// JSON descriptor consumed by the in-page resolver
    ///
    /// # Errors
    ///
    /// Returns error if serialization fails
    pub fn to_json(&self) -> GymResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// JavaScript expression running `op` against this locator in the page.
    ///
    /// The expression evaluates to a JSON string.
    ///
    /// # Errors
    ///
    /// Returns error if serialization fails
    pub fn to_query(&self, op: &str, arg: &serde_json::Value) -> GymResult<String> {
        Ok(format!(
            "window.__gymprobe.run({op:?}, {}, {})",
            self.to_json()?,
            serde_json::to_string(arg)?
        ))
    }
}

impl std::fmt::Display for Locator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(scope) = &self.scope {
            write!(f, "{scope} >> ")?;
        }
        write!(f, "{}", self.selector)?;
        match self.nth {
            Some(Nth::First) => f.write_str(" >> first"),
            Some(Nth::Last) => f.write_str(" >> last"),
            Some(Nth::Index(i)) => write!(f, " >> nth={i}"),
            None => Ok(()),
        }
    }
}

/// Option to choose in a `<select>`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "by", content = "value", rename_all = "snake_case")]
pub enum SelectOption {
    /// Match the option's `value` attribute
    Value(String),
    /// Match the option's visible label
    Label(String),
}

impl SelectOption {
    /// Check an option's value/label pair
    #[must_use]
    pub fn matches(&self, value: &str, label: &str) -> bool {
        match self {
            Self::Value(v) => v == value,
            Self::Label(l) => normalize_whitespace(l) == normalize_whitespace(label),
        }
    }
}

impl std::fmt::Display for SelectOption {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Value(v) => write!(f, "value={v:?}"),
            Self::Label(l) => write!(f, "label={l:?}"),
        }
    }
}
