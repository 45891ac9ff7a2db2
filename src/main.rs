#![allow(warnings)]
//! Nestsort Frontend Entry Point

mod models;
mod commands;
mod tree;
mod context;
mod config;
mod logging;
mod components;
mod app;

use app::App;
use leptos::prelude::*;

fn main() {
    console_error_panic_hook::set_once();
    logging::init(config::debug_enabled());
    mount_to_body(App);
}
