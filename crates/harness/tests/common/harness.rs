use rv32tb_core::circuit::{Ram, Rv32Core, Soc};
use rv32tb_core::config::GeneralConfig;
use rv32tb_core::{Config, Session};

/// Installs a test-writer subscriber once per process; later calls are no-ops.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_test_writer()
        .try_init();
}

/// Default configuration with tracing and color switched off.
pub fn quiet_config() -> Config {
    let mut config = Config::default();
    config.general = quiet_general();
    config
}

/// General options with tracing and color switched off.
pub fn quiet_general() -> GeneralConfig {
    GeneralConfig {
        trace: false,
        color: false,
        ..GeneralConfig::default()
    }
}

pub fn core_session() -> Session<Rv32Core> {
    init_tracing();
    Session::untraced(Rv32Core::default())
}

pub fn ram_session() -> Session<Ram> {
    init_tracing();
    Session::untraced(Ram::default())
}

pub fn soc_session() -> Session<Soc> {
    init_tracing();
    Session::untraced(Soc::default())
}
