//! # trackgen: Swift Analytics Tracking Code Generation
//!
//! trackgen reads analytics event definitions from a CSV file or a Google
//! Sheets spreadsheet and generates one Swift tracking function per event.
//!
//! ## Features
//!
//! - **Two input sources**: local CSV files and public Google Sheets tabs,
//!   behind one [`InputSource`] trait
//! - **Header-aware parsing**: named columns (`screen:`, `section:`, ...) or
//!   seven positional columns
//! - **Parameterized fields**: a `|` in a cell turns that dimension into a function parameter
//! - **Deduplication**: repeated events collapse to one function, conflicting details are reported
//!
//! ## Example: CSV row
//!
//! ```text
//! my_ad,boost_photo,|,button,tap,,
//! ```
//!
//! generates
//!
//! ```swift
//! static func trackMyAdBoostPhotoComponentButtonTap(component: Event.Component) {
//!     let eventDetails: EventDetails = EventDetails(
//!         screen: Event.Screen.myAd,
//!         section: Event.Section.boostPhoto,
//!         component: component,
//!         element: Event.Element.button,
//!         action: Event.Action.tap
//!     )
//!     let event: EventModel = EventFactory.event(with: eventDetails)
//!     trackEvent(event: event)
//! }
//! ```

// Code generation framework
pub mod codegen;

// CSV and Google Sheets row sources
pub mod source;

// Re-export key types
pub use codegen::{
    DuplicateConflict, EventKey, EventRow, FieldKind, GenerateError, GenerationReport,
    ProjectConfig,
};
pub use source::{
    detect_origin, open_source, FileInputSource, GoogleSheetsInputSource, InputOrigin,
    InputSource, RawTable, SheetsOptions, SourceError,
};
