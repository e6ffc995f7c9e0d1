//! Terminal output: status lines, icons, and progress indicators.

pub mod icons;
pub mod output;
pub mod progress;
pub mod theme;

pub use icons::StatusKind;
pub use output::{Output, OutputMode};
pub use progress::{DownloadProgress, StepSpinner};
pub use theme::RigupTheme;
