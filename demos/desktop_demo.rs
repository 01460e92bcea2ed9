//! Desktop Demo: Windows, buttons and a text box in the terminal.
//!
//! Demonstrates:
//! - Draggable, raise-on-click windows with close boxes
//! - Buttons and a text box wired up through listeners
//! - A modal dialog
//! - The input pump feeding the core's input queue
//!
//! Logs go to `desktop_demo.log` (filter with `RUST_LOG`). Ctrl+Q quits.

use std::cell::Cell;
use std::fs::File;
use std::io;
use std::rc::Rc;
use std::time::Duration;

use gadgetry::backend::{InputPump, Presenter, TerminalGuard};
use gadgetry::widget::{
    Align, Button, Label, Screen, ScreenConfig, TextBox, TextBoxConfig, Window, WindowConfig,
};
use gadgetry::{Buffer, EventKind, GadgetId, Gui, GuiConfig, Rect};
use tracing_subscriber::EnvFilter;

const FRAME: Duration = Duration::from_millis(16);

fn main() -> io::Result<()> {
    let log = File::create("desktop_demo.log")?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("gadgetry=debug"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(log)
        .with_ansi(false)
        .init();

    let terminal = TerminalGuard::enter()?;
    let (width, height) = terminal.size();
    let mut gui = Gui::new(GuiConfig::with_screen(i32::from(width), i32::from(height)));
    let mut buffer = Buffer::new(width, height);
    let mut presenter = Presenter::new();
    let mut stdout = io::stdout();

    build_desktop(&mut gui);

    let pump = InputPump::spawn(gui.input_sender(), Duration::from_millis(10))?;
    while !pump.quit_requested() {
        let stats = gui.tick(&mut buffer);
        if !stats.painted.is_empty() {
            presenter.present(&buffer, &stats.painted, &mut stdout)?;
        }
        std::thread::sleep(FRAME);
    }
    pump.join();
    Ok(())
}

fn build_desktop(gui: &mut Gui) {
    let config = ScreenConfig {
        caption: "gadgetry desktop | drag windows by their frame | Ctrl+Q quits".into(),
        ..ScreenConfig::default()
    };
    let Some(screen) = Screen::spawn(gui, config) else {
        return;
    };
    if build_notes(gui, screen).is_none() || build_counter(gui, screen).is_none() {
        tracing::warn!("desktop only partly built");
    }
}

fn build_notes(gui: &mut Gui, screen: GadgetId) -> Option<()> {
    let window = Window::spawn(gui, screen, Rect::new(3, 3, 40, 10), WindowConfig::titled("Notes"))?;
    Label::spawn(gui, window, Rect::new(2, 2, 36, 1), Label::new("Type something and press Enter:"))?;
    let field = TextBox::spawn(
        gui,
        window,
        Rect::new(2, 4, 36, 1),
        TextBoxConfig {
            placeholder: "click here".into(),
            max_chars: Some(64),
        },
    )?;
    let echo = Label::spawn(gui, window, Rect::new(2, 6, 36, 1), Label::new(""))?;

    gui.add_listener(field, move |gui, event| match event.kind {
        EventKind::ValueChange => {
            let len = gui.behavior::<TextBox>(event.source).map_or(0, |t| t.content().chars().count());
            gui.update_behavior::<Label, _>(echo, |label| label.set_text(format!("{len} characters")));
        }
        EventKind::Action => {
            let text = gui.behavior::<TextBox>(event.source).map(|t| t.content().to_string());
            if let Some(text) = text {
                open_dialog(gui, &text);
            }
            gui.update_behavior::<TextBox, _>(event.source, TextBox::clear);
        }
        _ => {}
    });
    Some(())
}

fn build_counter(gui: &mut Gui, screen: GadgetId) -> Option<()> {
    let window = Window::spawn(gui, screen, Rect::new(30, 8, 30, 9), WindowConfig::titled("Counter"))?;
    let display = Label::spawn(
        gui,
        window,
        Rect::new(2, 2, 26, 1),
        Label::new("0").with_align(Align::Center),
    )?;
    let plus = Button::spawn(gui, window, Rect::new(3, 4, 10, 3), "+1")?;
    let reset = Button::spawn(gui, window, Rect::new(16, 4, 10, 3), "Reset")?;

    let count = Rc::new(Cell::new(0_u32));
    let c = count.clone();
    gui.add_listener(plus, move |gui, event| {
        if event.kind == EventKind::Action {
            c.set(c.get() + 1);
            gui.update_behavior::<Label, _>(display, |label| label.set_text(c.get().to_string()));
        }
    });
    gui.add_listener(reset, move |gui, event| {
        if event.kind == EventKind::Action {
            count.set(0);
            gui.update_behavior::<Label, _>(display, |label| label.set_text("0"));
        }
    });
    Some(())
}

fn open_dialog(gui: &mut Gui, text: &str) {
    let screen = gui.screen();
    let rect = Rect::new(screen.width / 2 - 15, screen.height / 2 - 3, 30, 7);
    let config = WindowConfig {
        title: "You typed".into(),
        draggable: false,
        closable: false,
    };
    let root = gui.root();
    let Some(dialog) = Window::spawn(gui, root, rect, config) else {
        return;
    };
    Label::spawn(gui, dialog, Rect::new(1, 2, 28, 1), Label::new(text).with_align(Align::Center));
    let Some(ok) = Button::spawn(gui, dialog, Rect::new(10, 4, 10, 1), "OK") else {
        return;
    };
    gui.add_listener(ok, move |gui, event| {
        if event.kind == EventKind::Action {
            gui.close(dialog);
        }
    });
    gui.push_modal(dialog);
    gui.focus(ok);
}
