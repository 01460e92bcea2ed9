//! Redraw benchmark: Measure a full repaint of a busy desktop.
//!
//! Target: < 1ms for 20 overlapping windows on a 200×50 buffer

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use gadgetry::widget::{Button, Window, WindowConfig};
use gadgetry::{Buffer, Gui, GuiConfig, InputEvent, Rect};

fn desktop(windows: i32) -> Gui {
    let mut gui = Gui::new(GuiConfig::with_screen(200, 50));
    let root = gui.root();
    for i in 0..windows {
        let rect = Rect::new((i * 9) % 160, (i * 5) % 38, 36, 12);
        let config = WindowConfig::titled(format!("Window {i}"));
        let Some(window) = Window::spawn(&mut gui, root, rect, config) else {
            continue;
        };
        for j in 0..3 {
            Button::spawn(&mut gui, window, Rect::new(2 + j * 11, 8, 10, 3), "OK");
        }
    }
    gui
}

fn full_redraw(c: &mut Criterion) {
    let mut gui = desktop(20);
    let mut buffer = Buffer::new(200, 50);
    gui.render(&mut buffer);

    c.bench_function("redraw_all_20_windows", |b| {
        b.iter(|| {
            gui.redraw_all();
            black_box(gui.render(&mut buffer));
        });
    });
}

fn drag_window(c: &mut Criterion) {
    let mut gui = desktop(20);
    let mut buffer = Buffer::new(200, 50);
    gui.render(&mut buffer);
    // title bar of the front window, at (11, 19)
    gui.handle_input(InputEvent::pointer_down(14, 19));

    let mut step = 0;
    c.bench_function("drag_top_window", |b| {
        b.iter(|| {
            step = (step + 1) % 20;
            gui.handle_input(InputEvent::pointer_move(14 + step * 3, 19 - step / 2));
            black_box(gui.render(&mut buffer));
        });
    });
}

criterion_group!(benches, full_redraw, drag_window);
criterion_main!(benches);
