//! # formwiz
//!
//! A Cursive-based TUI wizard for form-driven data collection.
//!
//! formwiz reads a declarative form definition and walks the user through a
//! sequence of pages collecting checkbox and text-field values, including
//! nested conditional sub-sections. The answers accumulate into a structured
//! record which is exported as a paginated PDF when the last page is
//! completed.
//!
//! ## Features
//!
//! - TUI interface built with [Cursive](https://github.com/gyscos/cursive)
//! - Form definition driven UI generation from JSON or TOML files
//! - Nested sub-frames shown and hidden by their owning checkbox
//! - Step-by-step navigation with back/next and a step indicator
//! - Paginated PDF export of everything collected in a session
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! // Load the form definition and run the wizard; the exported PDF is
//! // written into the current directory.
//! formwiz::run("frames_config.json", ".").unwrap();
//! ```
//!
//! ## Modules
//!
//! - [`data`] - Form definition, live value tree and collected records
//! - [`ui`] - Cursive views and page sequencing
//! - [`report`] - PDF rendering of the collected record
//! - [`run`] - Application runner

/// Form definition, live value tree and collected records.
pub mod data;

/// PDF rendering of the collected record.
pub mod report;

/// Application runner and main entry point.
pub mod run;

/// Cursive views and page sequencing.
pub mod ui;

pub use run::*;
