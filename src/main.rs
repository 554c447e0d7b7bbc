#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod app;
mod args;
mod ui;

use std::{process, str::FromStr};

use clap::Parser;
use log::{debug, error, info, LevelFilter};

use scenario_timeline::config;

use crate::args::Args;

fn main() {
    let args = Args::parse();

    let log_level = LevelFilter::from_str(&args.log_level).unwrap_or_else(|_| {
        eprintln!(
            "Invalid log level: {}. Using 'warn' instead.",
            args.log_level
        );
        LevelFilter::Warn
    });

    env_logger::Builder::from_env(env_logger::Env::default())
        .filter_level(log_level)
        .init();

    info!(log_level:?; "Starting scenario timeline");
    debug!(args:?; "Parsed arguments");

    let config = match config::load_config(args.config.as_ref()) {
        Ok(config) => config,
        Err(err) => {
            error!("Failed to load configuration: {err}");
            process::exit(1);
        }
    };

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 720.0])
            .with_min_inner_size([800.0, 400.0])
            .with_title("Scenario Timeline"),
        ..Default::default()
    };

    if let Err(err) = eframe::run_native(
        "Scenario Timeline",
        options,
        Box::new(move |cc| Ok(Box::new(app::ScenarioApp::new(cc, config, &args)))),
    ) {
        error!("Viewer exited with an error: {err}");
        process::exit(1);
    }
}
