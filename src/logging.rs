use log::LevelFilter;

/// Dependencies that are chatty at `info` and below.
const NOISY_DEPENDENCIES: [&str; 4] = ["hyper", "reqwest", "rustls", "html5ever"];

/// Logs at `Info` by default, with the HTTP/HTML stack held at `Warn`.
/// `RUST_LOG` overrides both.
pub fn setup_logging() {
    let mut builder = env_logger::Builder::new();

    builder.filter(None, LevelFilter::Info);
    for dependency in NOISY_DEPENDENCIES {
        builder.filter(Some(dependency), LevelFilter::Warn);
    }

    if let Ok(rust_log) = std::env::var("RUST_LOG") {
        builder.parse_filters(&rust_log);
    }

    if let Err(e) = builder.try_init() {
        eprintln!("Logger was already initialized: {}", e);
    }
}
