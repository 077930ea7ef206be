use env_logger::Env;

/// Initialize the process-wide logger. Defaults to `info` unless `RUST_LOG`
/// overrides it.
pub fn init_logger() {
    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .try_init()
        .ok();
}
