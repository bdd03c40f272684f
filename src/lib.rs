// Module declarations
pub mod ccusage;
pub mod config;
pub mod driver;
pub mod error;
pub mod formatting;
pub mod types;
pub mod waybar;

// Re-export commonly used items
pub use ccusage::{CcusageCli, EXEC_TIMEOUT, UsageSource, parse_active_block};
pub use config::Config;
pub use driver::Driver;
pub use error::{CcbarError, Result};
pub use types::BlockUsage;
pub use waybar::Output;
