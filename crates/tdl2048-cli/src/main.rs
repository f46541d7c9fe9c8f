mod agents;
mod command;
mod config;
mod session;
mod summary;
mod util;

fn main() -> anyhow::Result<()> {
    command::run()
}
