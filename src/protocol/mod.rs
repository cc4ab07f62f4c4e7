pub mod options;
pub mod parser;
pub mod service;

pub use options::ServiceOptions;
pub use parser::{parse_command, Command};
pub use service::{process_line, run_service_loop, serve, AiRequest, ChessService, ServiceState};
