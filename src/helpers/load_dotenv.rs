use std::env;

use crate::constants::envvars;

pub fn load_dotenv() {
    if dotenv::dotenv().is_ok() {
        eprintln!("Loaded local .env")
    }
    // Also load an explicitly named env file if one is given
    if let Ok(env_file) = env::var(envvars::ENV_FILE) {
        if dotenv::from_path(&env_file).is_ok() {
            eprintln!("Loaded {env_file}");
        } else {
            eprintln!("Could not load {env_file}");
        }
    }
}
