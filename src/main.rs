use std::ffi::OsString;
use std::process::ExitCode;

use complex_config::{run, FileStore};
use tracing_subscriber::EnvFilter;

fn install_panic_hook() {
    std::panic::set_hook(Box::new(|info| {
        eprintln!("panic: {info}");
        if let Some(loc) = info.location() {
            eprintln!("at: {}:{}", loc.file(), loc.line());
        }
    }));
}

fn main() -> ExitCode {
    // Keep stdout for the user-facing messages; logs go to stderr.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();
    install_panic_hook();

    let args: Vec<OsString> = std::env::args_os().collect();
    let mut stdout = std::io::stdout().lock();

    match run(&args, &FileStore, &mut stdout) {
        Ok(()) => ExitCode::SUCCESS,
        // -1 as a process status.
        Err(_) => ExitCode::from(255),
    }
}
