//! Output module
//! Document composition, console rendering and file export

pub mod compose;
pub mod console;
pub mod export;
pub mod pdf;

pub use compose::{DocumentComposer, DocumentKind};
pub use export::{ExportOutcome, Exporter};
