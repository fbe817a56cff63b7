pub mod generation;
pub mod keyword;
pub mod scenario;
pub mod settings;
pub mod workbench;

pub use generation::*;
pub use keyword::{KEYWORD_PRESETS, KeywordOption, KeywordPreset};
pub use scenario::*;
pub use settings::*;
pub use workbench::*;
