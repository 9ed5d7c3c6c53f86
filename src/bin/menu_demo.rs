//! Menu demo rendered to the terminal.
//!
//! Keys: `n`/down/right next field, `p`/up/left previous field,
//! `s`/space/enter select, `q` quit. Usage: `menu-demo [config.toml]`.

use anyhow::{Context, Result};
use monohal::config::{Config, MenuConfig};
use monohal::menu::{self, ByteKeys, Menu};
use monohal::FrameBuffer;
use std::io::{self, Write};
use tracing::info;
use tracing_subscriber::EnvFilter;

const HELP: &str = "n/p: next/previous field   s: select   q: quit";

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let size = match std::env::args().nth(1) {
        Some(path) => {
            Config::load(&path)
                .with_context(|| format!("loading {}", path))?
                .menu
        }
        None => MenuConfig::default(),
    };
    info!(width = size.width, height = size.height, "starting menu demo");

    let mut menu = Menu::demo();
    let mut frame = FrameBuffer::new(size.width, size.height);
    let mut keys = ByteKeys::new(io::stdin().lock());
    let stdout = io::stdout();

    menu::run(&mut menu, &mut frame, &mut keys, |frame| {
        let mut out = stdout.lock();
        writeln!(out, "\x1b[2J\x1b[H{}{}", frame.to_block_text(), HELP)?;
        out.flush()
    })
    .context("menu loop failed")?;

    info!(values = ?menu.values(), "menu demo finished");
    Ok(())
}
