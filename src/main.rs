use anyhow::{anyhow, Result};
use env_logger::Env;

use netatmo_zipabox::constants::{defaults, envvars};
use netatmo_zipabox::{command, config, helpers};

const CMD_START: &str = "start";
const CMD_READ_ONCE: &str = "read-once";

fn main() -> Result<()> {
    helpers::load_dotenv();

    let default_level = if config::verbose_from_env() {
        defaults::VERBOSE_LOG_LEVEL
    } else {
        defaults::LOG_LEVEL
    };
    env_logger::Builder::from_env(Env::default().filter_or(envvars::LOG_LEVEL, default_level))
        .init();

    let mut args = pico_args::Arguments::from_env();
    match args.subcommand()?.as_deref() {
        Some(CMD_START) => command::start(),
        Some(CMD_READ_ONCE) => command::read_once(),
        _ => Err(anyhow!("Subcommand must be one of 'start', 'read-once'")),
    }
}
