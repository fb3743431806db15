#[macro_use]
extern crate lazy_static;
#[macro_use]
extern crate rocket;

use std::error::Error;

use rocket::figment::Figment;
use rocket::{Build, Rocket};

use calculator_engine::Calculator;

mod api;
mod config;
mod error;

fn build(figment: Figment) -> Result<Rocket<Build>, rocket::figment::Error> {
    let config: config::Config = figment.extract()?;
    let calculator = Calculator::new(config.max_input_length).with_log_target("calculator::api");

    Ok(rocket::custom(figment)
        .manage(calculator)
        .mount("/", api::routes()))
}

#[rocket::main]
async fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let _ = build(config::figment())?.launch().await?;
    Ok(())
}
