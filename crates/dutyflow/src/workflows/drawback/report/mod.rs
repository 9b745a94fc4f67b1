mod summary;
mod text;

pub use summary::{AnalysisSummary, EntrySummary};
pub use text::{render_drawback_summary, render_import_summary};
