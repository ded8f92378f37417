//! Swift tracking function generation.
//!
//! Each [`EventRow`] becomes one `static func` that builds an `EventDetails`
//! value and hands it to `trackEvent`. The layout is byte-for-byte the one
//! produced by the legacy generator, so regenerated files diff cleanly.

use crate::codegen::classifier::{classify_field, FieldValue};
use crate::codegen::types::{EventRow, FieldKind, Parameter};
use crate::codegen::utils::to_upper_camel;

/// First line of every generated file
pub const FILE_HEADER: &str = "// Auto-generated tracking functions";

/// Prefix of every generated function name
const FUNCTION_PREFIX: &str = "track";

const INDENT: &str = "    ";

fn advertisement_parameter() -> Parameter {
    Parameter::new("advertisement", "EventAdvertisementProtocol")
}

fn details_parameter() -> Parameter {
    Parameter::new("parameters", "[EventDetailsParameter]")
}

/// A tracking function ready to be rendered
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackingFunction {
    pub name: String,
    pub parameters: Vec<Parameter>,
    /// Classification of screen, section, component, element, action
    pub fields: Vec<(FieldKind, FieldValue)>,
    pub has_advertisement: bool,
    pub has_event_details: bool,
}

impl TrackingFunction {
    pub fn from_row(row: &EventRow) -> Self {
        let mut parameters = Vec::new();

        let has_advertisement = row.has_advertisement();
        if has_advertisement {
            parameters.push(advertisement_parameter());
        }

        let fields: Vec<(FieldKind, FieldValue)> = FieldKind::ALL
            .iter()
            .map(|&kind| (kind, classify_field(row.field(kind), kind, &mut parameters)))
            .collect();

        let has_event_details = row.has_event_details();
        if has_event_details {
            parameters.push(details_parameter());
        }

        let mut name = String::from(FUNCTION_PREFIX);
        for (kind, value) in &fields {
            let part = match value.declared_type() {
                Some(type_name) => type_name,
                None => row.field(*kind),
            };
            name.push_str(&to_upper_camel(part));
        }

        Self {
            name,
            parameters,
            fields,
            has_advertisement,
            has_event_details,
        }
    }

    /// Parameter list including parentheses, `()` when empty
    pub fn signature_parameters(&self) -> String {
        let joined: Vec<String> = self.parameters.iter().map(Parameter::to_string).collect();
        format!("({})", joined.join(", "))
    }

    /// Render the function followed by its trailing newline
    pub fn render(&self) -> String {
        let mut details: Vec<String> = self
            .fields
            .iter()
            .map(|(kind, value)| format!("{}: {}", kind.param_name(), value.code()))
            .collect();
        if self.has_event_details {
            details.push("details: .defined(parameters)".to_string());
        }

        let mut lines = Vec::with_capacity(details.len() + 7);
        lines.push(format!(
            "static func {}{} {{",
            self.name,
            self.signature_parameters()
        ));
        lines.push(format!("{}let eventDetails: EventDetails = EventDetails(", INDENT));
        let last = details.len().saturating_sub(1);
        for (i, line) in details.iter().enumerate() {
            let comma = if i == last { "" } else { "," };
            lines.push(format!("{}{}{}{}", INDENT, INDENT, line, comma));
        }
        lines.push(format!("{})", INDENT));
        if self.has_advertisement {
            lines.push(format!(
                "{}let event: EventModel = EventFactory.event(for: advertisement, with: eventDetails)",
                INDENT
            ));
        } else {
            lines.push(format!(
                "{}let event: EventModel = EventFactory.event(with: eventDetails)",
                INDENT
            ));
        }
        lines.push(format!("{}trackEvent(event: event)", INDENT));
        lines.push("}".to_string());
        lines.push(String::new());

        lines.join("\n")
    }
}

/// Render a single row as a Swift function
pub fn generate_function(row: &EventRow) -> String {
    TrackingFunction::from_row(row).render()
}

/// Render a complete generated file: header, blank line, then each function
/// followed by a blank line.
pub fn render_document(rows: &[EventRow]) -> String {
    let mut document = String::from(FILE_HEADER);
    document.push_str("\n\n");
    for row in rows {
        document.push_str(&generate_function(row));
        document.push('\n');
    }
    document
}
