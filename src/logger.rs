/// Installs the global `env_logger` backend.
///
/// `--verbose` lowers the threshold to `Debug` so every filesystem operation
/// is reported; otherwise only command steps and failures are shown.
pub fn init_logger(verbose: bool) {
    env_logger::Builder::new()
        .filter_level(if verbose { log::LevelFilter::Debug } else { log::LevelFilter::Info })
        .format_timestamp(None)
        .format_target(false)
        .init();
}
