#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use serde::{Deserialize, Serialize};

/// What a view is currently narrowed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope<'a> {
    /// No selection; everything is shown.
    All,
    /// A single class.
    Class(&'a str),
    /// A single subject across classes.
    Subject(&'a str),
    /// A subject within a class.
    ClassSubject(&'a str, &'a str),
}

/// Anything that belongs to a class and/or subject.
pub trait Scoped {
    /// Class identifier, if the item is tied to one.
    fn class_id(&self) -> Option<&str>;
    /// Subject identifier, if the item is tied to one.
    fn subject_id(&self) -> Option<&str>;
}

/// Selected class and subject, passed explicitly to whatever needs it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScopeContext {
    /// Selected class, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class:   Option<String>,
    /// Selected subject, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
}

impl ScopeContext {
    /// A context with nothing selected.
    pub fn all() -> Self {
        Self::default()
    }

    /// Narrows to a class.
    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.class = Some(class.into());
        self
    }

    /// Narrows to a subject.
    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }

    /// Returns the current selection.
    pub fn scope(&self) -> Scope<'_> {
        match (self.class.as_deref(), self.subject.as_deref()) {
            (None, None) => Scope::All,
            (Some(c), None) => Scope::Class(c),
            (None, Some(s)) => Scope::Subject(s),
            (Some(c), Some(s)) => Scope::ClassSubject(c, s),
        }
    }

    /// Whether `item` falls inside the selection.
    pub fn contains<T: Scoped + ?Sized>(&self, item: &T) -> bool {
        let class_ok = self
            .class
            .as_deref()
            .is_none_or(|c| item.class_id() == Some(c));
        let subject_ok = self
            .subject
            .as_deref()
            .is_none_or(|s| item.subject_id() == Some(s));
        class_ok && subject_ok
    }

    /// Keeps the items inside the selection, preserving order.
    pub fn filter<'a, T: Scoped>(&self, items: impl IntoIterator<Item = &'a T>) -> Vec<&'a T>
    where
        T: 'a,
    {
        items.into_iter().filter(|item| self.contains(*item)).collect()
    }

    /// A short label for headers, e.g. `CS-A / Data Structures`.
    pub fn label(&self) -> String {
        match self.scope() {
            Scope::All => "All classes".to_string(),
            Scope::Class(c) => c.to_string(),
            Scope::Subject(s) => s.to_string(),
            Scope::ClassSubject(c, s) => format!("{c} / {s}"),
        }
    }
}
