mod match_command;
pub use match_command::*;

mod models_command;
pub use models_command::*;

mod scan_command;
pub use scan_command::*;

mod scan_session;
pub use scan_session::*;
