mod console;

use std::sync::Arc;

use anyhow::Result;
use clap::Parser;

use talk::{SessionState, UdpTransport};

use console::{Console, RawModeGuard};

#[derive(Parser)]
#[command(name = "s-talk")]
#[command(about = "Two-party chat over a raw UDP socket")]
struct Args {
    /// Local UDP port to bind.
    local_port: u16,

    /// Remote peer host name or address.
    remote_host: String,

    /// Remote peer UDP port.
    remote_port: u16,
}

fn main() -> Result<()> {
    let args = Args::parse();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let transport = UdpTransport::connect(args.local_port, &args.remote_host, args.remote_port)?;
    println!(
        "s-talk: listening on {}, talking to {}",
        transport.local_addr(),
        transport.remote_addr()
    );
    println!("Type a line and press enter; start a line with '!' to end the conversation.");

    log::debug!("starting the four role threads");
    let raw = RawModeGuard::enable()?;
    let (input, mut output) = Console::new().split();
    output.draw_prompt()?;

    let state = Arc::new(SessionState::new());
    let result = talk::session::run(state, Arc::new(transport), input, output);
    drop(raw);
    println!();
    result?;

    println!("Conversation ended; all four roles joined.");
    Ok(())
}
