//! Conversion of raw CSV rows into [`EventRow`]s.
//!
//! Tables come in two layouts:
//! - with a header row (`screen:`, `section:`, ..., `event_details`,
//!   `advertisement`), columns located by name
//! - without one, seven positional columns
//!   `screen, section, component, element, action, event_details, advertisement`
//!
//! Rows missing a required column are skipped, never reported as errors.

use crate::codegen::types::EventRow;
use crate::codegen::variants::split_variants;

/// Header cells that identify a header row. Only `event_details` has no colon.
const HEADER_MARKERS: [&str; 6] = [
    "screen:",
    "component:",
    "section:",
    "element:",
    "action:",
    "event_details",
];

/// Any header cell containing this is the advertisement column
const ADVERTISEMENT_MARKER: &str = "advertisement";

/// Columns needed for a positional row (screen..action)
const MIN_POSITIONAL_COLUMNS: usize = 5;

/// Columns of a complete positional row
const POSITIONAL_COLUMNS: usize = 7;

fn normalize_header(cell: &str) -> String {
    cell.trim_matches('\u{feff}').trim().to_lowercase()
}

/// Column positions read from a header row
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnMap {
    pub screen: Option<usize>,
    pub section: Option<usize>,
    pub component: Option<usize>,
    pub element: Option<usize>,
    pub action: Option<usize>,
    pub event_details: Option<usize>,
    pub advertisement: Option<usize>,
}

impl ColumnMap {
    /// Build a column map if `row` looks like a header, `None` otherwise
    pub fn detect(row: &[String]) -> Option<Self> {
        let is_header = row.iter().map(|cell| normalize_header(cell)).any(|cell| {
            HEADER_MARKERS.contains(&cell.as_str()) || cell.contains(ADVERTISEMENT_MARKER)
        });
        if !is_header {
            return None;
        }

        let mut map = ColumnMap::default();
        for (index, cell) in row.iter().enumerate() {
            let name = normalize_header(cell);
            let slot = match name.as_str() {
                "screen:" => &mut map.screen,
                "section:" => &mut map.section,
                "component:" => &mut map.component,
                "element:" => &mut map.element,
                "action:" => &mut map.action,
                "event_details" => &mut map.event_details,
                other if other.contains(ADVERTISEMENT_MARKER) => &mut map.advertisement,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(index);
            }
        }
        Some(map)
    }

    /// The seven logical fields of `row`, empty where unmapped or out of bounds
    fn read<'a>(&self, row: &'a [String]) -> [&'a str; 7] {
        let cell = |index: Option<usize>| -> &'a str {
            index
                .and_then(|i| row.get(i))
                .map(String::as_str)
                .unwrap_or("")
        };
        [
            cell(self.screen),
            cell(self.section),
            cell(self.component),
            cell(self.element),
            cell(self.action),
            cell(self.event_details),
            cell(self.advertisement),
        ]
    }
}

fn read_positional(row: &[String]) -> Option<[&str; 7]> {
    if row.len() < MIN_POSITIONAL_COLUMNS {
        return None;
    }
    let mut fields = [""; POSITIONAL_COLUMNS];
    for (slot, value) in fields.iter_mut().zip(row.iter()) {
        *slot = value.as_str();
    }
    Some(fields)
}

fn is_blank(row: &[String]) -> bool {
    row.iter().all(|cell| cell.trim().is_empty())
}

/// Parse a raw table into event rows, in row-then-variant order
pub fn parse_table(table: &[Vec<String>]) -> Vec<EventRow> {
    let Some(first) = table.first() else {
        return Vec::new();
    };

    let columns = ColumnMap::detect(first);
    let data_rows = if columns.is_some() { &table[1..] } else { table };

    let mut rows = Vec::new();
    for raw_row in data_rows {
        if is_blank(raw_row) {
            continue;
        }

        let fields = match &columns {
            Some(map) => map.read(raw_row),
            None => match read_positional(raw_row) {
                Some(fields) => fields,
                None => continue,
            },
        };

        let [screen, section, component, element, action, event_details, advertisement] = fields;
        let Some(row) = EventRow::new([screen, section, component, element, action]) else {
            continue;
        };
        let row = row
            .with_event_details(event_details)
            .with_advertisement(advertisement);

        for variant in split_variants(row.section()) {
            if let Some(expanded) = row.with_section(&variant) {
                rows.push(expanded);
            }
        }
    }

    tracing::debug!("Parsed {} event rows from {} raw rows", rows.len(), table.len());
    rows
}
