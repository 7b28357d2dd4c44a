//! Terminal frontend for the study-abroad advisor
//!
//! Wires the session controller to a reqwest backend client, JSON files on
//! disk and a colored REPL.

pub mod cli;
pub mod config;
pub mod profile_file;
pub mod repl;
pub mod surface;
pub mod transcript;

pub use cli::Cli;
pub use config::{expand_tilde, ClientConfig};
pub use profile_file::{form_from_profile, load_profile_form, parse_profile_form};
pub use repl::run_repl_mode;
pub use surface::TerminalSurface;
pub use transcript::Transcript;

/// Initialize `env_logger`; `RUST_LOG` wins over the verbosity flag
pub fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .init();
}
