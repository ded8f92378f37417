//! Row model for analytics event definitions.

use serde::Serialize;
use std::fmt;

/// Namespace of the Swift enums that classify an event (`Event.Screen`, ...)
pub const EVENT_NAMESPACE: &str = "Event";

/// One of the five classification dimensions of an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    Screen,
    Section,
    Component,
    Element,
    Action,
}

impl FieldKind {
    /// All kinds in signature order
    pub const ALL: [FieldKind; 5] = [
        FieldKind::Screen,
        FieldKind::Section,
        FieldKind::Component,
        FieldKind::Element,
        FieldKind::Action,
    ];

    /// Swift enum name (`Screen`, `Section`, ...)
    pub fn type_name(self) -> &'static str {
        match self {
            FieldKind::Screen => "Screen",
            FieldKind::Section => "Section",
            FieldKind::Component => "Component",
            FieldKind::Element => "Element",
            FieldKind::Action => "Action",
        }
    }

    /// Name used for the generated parameter and the `EventDetails` label
    pub fn param_name(self) -> String {
        self.type_name().to_lowercase()
    }

    /// Fully qualified Swift type (`Event.Screen`)
    pub fn qualified_type(self) -> String {
        format!("{}.{}", EVENT_NAMESPACE, self.type_name())
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_name())
    }
}

/// A single event definition.
///
/// The five classification fields are guaranteed non-empty after trimming;
/// `event_details` and `advertisement` are empty when absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EventRow {
    screen: String,
    section: String,
    component: String,
    element: String,
    action: String,
    event_details: String,
    advertisement: String,
}

impl EventRow {
    /// Build a row from `[screen, section, component, element, action]`
    ///
    /// Values are trimmed. Returns `None` if any of them is empty.
    pub fn new(fields: [&str; 5]) -> Option<Self> {
        let [screen, section, component, element, action] = fields.map(|f| f.trim().to_string());
        if [&screen, &section, &component, &element, &action]
            .iter()
            .any(|f| f.is_empty())
        {
            return None;
        }

        Some(Self {
            screen,
            section,
            component,
            element,
            action,
            event_details: String::new(),
            advertisement: String::new(),
        })
    }

    /// Attach the event details column
    pub fn with_event_details(mut self, details: &str) -> Self {
        self.event_details = details.trim().to_string();
        self
    }

    /// Attach the advertisement column
    pub fn with_advertisement(mut self, advertisement: &str) -> Self {
        self.advertisement = advertisement.trim().to_string();
        self
    }

    /// Copy of this row with a different section, `None` if it is blank
    pub fn with_section(&self, section: &str) -> Option<Self> {
        let section = section.trim();
        if section.is_empty() {
            return None;
        }
        Some(Self {
            section: section.to_string(),
            ..self.clone()
        })
    }

    pub fn screen(&self) -> &str {
        &self.screen
    }

    pub fn section(&self) -> &str {
        &self.section
    }

    pub fn component(&self) -> &str {
        &self.component
    }

    pub fn element(&self) -> &str {
        &self.element
    }

    pub fn action(&self) -> &str {
        &self.action
    }

    pub fn event_details(&self) -> &str {
        &self.event_details
    }

    pub fn advertisement(&self) -> &str {
        &self.advertisement
    }

    /// Raw text of a classification field
    pub fn field(&self, kind: FieldKind) -> &str {
        match kind {
            FieldKind::Screen => &self.screen,
            FieldKind::Section => &self.section,
            FieldKind::Component => &self.component,
            FieldKind::Element => &self.element,
            FieldKind::Action => &self.action,
        }
    }

    pub fn has_advertisement(&self) -> bool {
        !self.advertisement.is_empty()
    }

    pub fn has_event_details(&self) -> bool {
        !self.event_details.is_empty()
    }

    /// Identity used for deduplication. `event_details` is not part of it.
    pub fn key(&self) -> EventKey {
        EventKey {
            screen: self.screen.clone(),
            section: self.section.clone(),
            component: self.component.clone(),
            element: self.element.clone(),
            action: self.action.clone(),
            advertisement: self.advertisement.clone(),
        }
    }
}

/// Deduplication identity of an [`EventRow`]
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct EventKey {
    pub screen: String,
    pub section: String,
    pub component: String,
    pub element: String,
    pub action: String,
    pub advertisement: String,
}

impl fmt::Display for EventKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "screen={}, section={}, component={}, element={}, action={}, advertisement={}",
            self.screen, self.section, self.component, self.element, self.action, self.advertisement
        )
    }
}

/// A parameter of a generated Swift function
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parameter {
    pub name: String,
    pub type_name: String,
}

impl Parameter {
    pub fn new(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_name: type_name.into(),
        }
    }
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.name, self.type_name)
    }
}
