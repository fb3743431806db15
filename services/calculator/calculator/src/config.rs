use rocket::figment::{providers::Env, Figment};
use serde::Deserialize;

use calculator_engine::MAX_INPUT_LENGTH;

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct Config {
    pub max_input_length: usize,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            max_input_length: MAX_INPUT_LENGTH,
        }
    }
}

/// Rocket's own configuration sources overlaid with `APP_` prefixed
/// environment variables, `APP_MAX_INPUT_LENGTH` for example.
pub fn figment() -> Figment {
    rocket::Config::figment().merge(Env::prefixed("APP_"))
}
