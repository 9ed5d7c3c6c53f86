//! Modal menu demo: a static form table, the field behaviors, a renderer
//! and the render-then-poll event loop.

mod engine;
mod forms;
mod input;
mod render;

pub use engine::{Menu, Values};
pub use forms::{option, option_count, Field, Form, Item, TextStyle, Variable, Widget, FORMS};
pub use input::{ByteKeys, Command, Key, KeySource};
pub use render::draw_menu;

use crate::framebuffer::FrameBuffer;
use std::io;
use tracing::debug;

///
/// Runs the menu until a quit command: renders the current form into
/// `frame`, hands it to `present`, then blocks for the next key.
///
/// # Arguments
///
/// * `menu` - menu state, left as it was at quit
/// * `frame` - frame buffer the forms are drawn into
/// * `keys` - key source, polled until it yields a key
/// * `present` - shows a rendered frame
///
pub fn run<K, F>(
    menu: &mut Menu,
    frame: &mut FrameBuffer,
    keys: &mut K,
    mut present: F,
) -> io::Result<()>
where
    K: KeySource,
    F: FnMut(&FrameBuffer) -> io::Result<()>,
{
    loop {
        frame.erase();
        if let Err(never) = draw_menu(menu, frame) {
            match never {}
        }
        present(frame)?;

        let key = nb::block!(keys.poll_key())?;
        let Some(command) = Command::from_key(key) else {
            continue;
        };
        debug!(?key, ?command, form = menu.form().id, "key");
        if command == Command::Quit {
            return Ok(());
        }
        menu.apply(command);
    }
}
