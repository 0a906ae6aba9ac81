mod command;
mod config;
mod logging;
mod tui;
mod util;

fn main() -> anyhow::Result<()> {
    command::run()
}
