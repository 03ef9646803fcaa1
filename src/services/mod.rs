pub mod history;
pub mod intake;
pub mod rfc;
pub mod session;
pub mod storage_path;

pub use history::{HistoryLedger, DEFAULT_HISTORY_LIMIT, HISTORY_KEY};
pub use intake::FileIntakeValidator;
pub use rfc::{is_valid_rfc, normalize_rfc};
pub use session::{SatSession, SessionState, SAT_CONFIG_KEY};
pub use storage_path::plan_storage_path;
