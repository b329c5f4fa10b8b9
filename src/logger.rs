/// Initializes the global logger.
///
/// Verbose mode shows per-entry debug lines; otherwise info, warnings and errors.
pub fn init_logger(verbose: bool) {
    env_logger::Builder::new()
        .filter_level(if verbose { log::LevelFilter::Debug } else { log::LevelFilter::Info })
        .format_timestamp(None)
        .init();
}
