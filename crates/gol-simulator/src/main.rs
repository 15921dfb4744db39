//! Desktop simulator for the gol-rs widget layer.
//!
//! Builds a demo screen with every widget variant and renders it in an SDL2
//! window via `embedded-graphics-simulator`. Input is routed through the
//! same message channel firmware drivers use.
//!
//! # Key bindings
//!
//! | Key             | Action                              |
//! |-----------------|-------------------------------------|
//! | Tab / Shift+Tab | Move focus                          |
//! | Space / Enter   | Activate the focused widget         |
//! | Up / Down       | Move the list box focus             |
//! | Backspace       | Delete the last entry character     |
//! | Letters, digits | Type into the focused text entry    |
//! | B               | Toggle simulated display busy state |
//! | Esc             | Quit                                |
//!
//! Mouse buttons and drags are forwarded as pointer messages.

use std::rc::Rc;
use std::time::{Duration, Instant};

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics_simulator::{
    OutputSettingsBuilder, SimulatorDisplay, SimulatorEvent, Window, sdl2::Keycode,
};
use log::{debug, info, warn};

use gol_core::framebuffer::FrameBuffer;
use gol_core::input::{message_receiver, message_sender};
use gol_core::ui::{ButtonAction, KeyPhase, ScanCode, TouchPhase};
use gol_core::{
    Action, BoundingBox, Button, Canvas, Control, DrawStatus, GolConfig, GolResult, KeyEvent,
    ListBox, Message, RadioButton, RenderStatus, StyleScheme, TextEntry, WidgetHandle, WidgetList,
};

// ---------------------------------------------------------------------------
// Display constants
// ---------------------------------------------------------------------------

const DISPLAY_WIDTH_PX: u32 = 320;
const DISPLAY_HEIGHT_PX: u32 = 240;

/// Pixel scale factor for the simulator window.
const WINDOW_SCALE: u32 = 2;

/// Target frame duration (~30 FPS).
const FRAME_DURATION: Duration = Duration::from_millis(33);

const CARET_BLINK: Duration = Duration::from_millis(500);

/// Draw passes attempted per frame before handing control back to SDL.
const DRAW_ATTEMPTS_PER_FRAME: usize = 8;

// ---------------------------------------------------------------------------
// Demo screen
// ---------------------------------------------------------------------------

mod ids {
    use gol_core::WidgetId;

    pub const TOGGLE: WidgetId = 1;
    pub const CLEAR: WidgetId = 2;
    pub const RED: WidgetId = 10;
    pub const GREEN: WidgetId = 11;
    pub const BLUE: WidgetId = 12;
    pub const FRUIT: WidgetId = 20;
    pub const NAME: WidgetId = 30;
}

struct Screen {
    list: WidgetList,
    clear: WidgetHandle,
    fruit: WidgetHandle,
    name: WidgetHandle,
}

fn build_screen(config: &GolConfig) -> GolResult<Screen> {
    let scheme = Rc::new(config.to_scheme());
    let mut list = config.widget_list();

    list.add(
        Button::new(ids::TOGGLE, BoundingBox::new(10, 10, 110, 40), scheme.clone())
            .with_text("Toggle")
            .toggle()
            .focused(),
    )?;
    let clear = list.add(
        Button::new(ids::CLEAR, BoundingBox::new(120, 10, 220, 40), scheme.clone())
            .with_text("Clear")
            .with_radius(6),
    )?;

    for (index, (id, label)) in [(ids::RED, "Red"), (ids::GREEN, "Green"), (ids::BLUE, "Blue")]
        .into_iter()
        .enumerate()
    {
        let top = 55 + index as i32 * 22;
        let mut radio =
            RadioButton::new(id, BoundingBox::new(10, top, 110, top + 18), scheme.clone())
                .with_text(label);
        if index == 0 {
            radio = radio.group_leader().checked();
        }
        list.add(radio)?;
    }

    let fruit = list.add(
        ListBox::new(ids::FRUIT, BoundingBox::new(120, 55, 310, 140), scheme.clone())
            .single_select()
            .with_lines("Apple\nBanana\nCherry\nDate\nElderberry\nFig\nGrape")?,
    )?;

    let name = list.add(
        TextEntry::new(ids::NAME, BoundingBox::new(10, 160, 310, 182), 24, scheme)?
            .with_text("gol")?,
    )?;

    Ok(Screen {
        list,
        clear,
        fruit,
        name,
    })
}

// ---------------------------------------------------------------------------
// Input mapping
// ---------------------------------------------------------------------------

fn keycode_to_scan(keycode: Keycode) -> Option<ScanCode> {
    match keycode {
        Keycode::Return | Keycode::KpEnter => Some(ScanCode::ENTER),
        Keycode::Space => Some(ScanCode::SPACE),
        Keycode::Backspace => Some(ScanCode::BACKSPACE),
        Keycode::Delete => Some(ScanCode::DELETE),
        Keycode::Up => Some(ScanCode::UP),
        Keycode::Down => Some(ScanCode::DOWN),
        Keycode::Left => Some(ScanCode::LEFT),
        Keycode::Right => Some(ScanCode::RIGHT),
        Keycode::Home => Some(ScanCode::HOME),
        Keycode::End => Some(ScanCode::END),
        Keycode::PageUp => Some(ScanCode::PAGE_UP),
        Keycode::PageDown => Some(ScanCode::PAGE_DOWN),
        _ => None,
    }
}

/// Printable character for a letter or digit key
fn keycode_to_char(keycode: Keycode, shift: bool) -> Option<char> {
    let name = keycode.name();
    let mut chars = name.chars();
    let ch = chars.next()?;
    if chars.next().is_some() || !ch.is_ascii_alphanumeric() {
        return None;
    }
    Some(if shift {
        ch.to_ascii_uppercase()
    } else {
        ch.to_ascii_lowercase()
    })
}

fn send(message: Message) {
    if message_sender().try_send(message).is_err() {
        warn!("Message queue full, dropping {:?}", message);
    }
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

fn main() {
    env_logger::init();
    info!("Starting gol-rs simulator");
    info!(
        "Display: {}×{} (scale {}×)",
        DISPLAY_WIDTH_PX, DISPLAY_HEIGHT_PX, WINDOW_SCALE
    );
    info!("Keys: Tab=Focus  Space/Enter=Activate  Up/Down=List  B=Busy  Esc=Quit");

    let config = GolConfig::default();
    let mut screen = match build_screen(&config) {
        Ok(screen) => screen,
        Err(e) => {
            log::error!("Failed to build demo screen: {}", e);
            return;
        }
    };

    let mut display =
        SimulatorDisplay::<Rgb565>::new(Size::new(DISPLAY_WIDTH_PX, DISPLAY_HEIGHT_PX));
    let background = StyleScheme::default().common_background_color;
    let mut framebuffer = FrameBuffer::new(Size::new(DISPLAY_WIDTH_PX, DISPLAY_HEIGHT_PX));
    let _ = framebuffer.clear(background);
    let mut canvas = Canvas::new(framebuffer);

    let output_settings = OutputSettingsBuilder::new().scale(WINDOW_SCALE).build();
    let mut window = Window::new("GOL Simulator", &output_settings);

    // The SDL window is lazily initialized on the first `update()` call.
    // We must call `update()` once before `events()` or it will panic.
    let _ = canvas.target_mut().flush(&mut display);
    window.update(&display);

    let receiver = message_receiver();
    let mut shift = false;
    let mut mouse_down = false;
    let mut simulate_busy = false;
    let mut caret_on = false;
    let mut last_blink = Instant::now();
    let mut frame: usize = 0;

    // -----------------------------------------------------------------------
    // Main loop
    // -----------------------------------------------------------------------
    'running: loop {
        let frame_start = Instant::now();
        frame += 1;

        // --- SDL events ---------------------------------------------------
        for event in window.events() {
            match event {
                SimulatorEvent::Quit => break 'running,

                SimulatorEvent::KeyDown { keycode, .. } => match keycode {
                    Keycode::Escape => break 'running,
                    Keycode::LShift | Keycode::RShift => shift = true,
                    Keycode::Tab => {
                        let moved = if shift {
                            screen.list.focus_prev()
                        } else {
                            screen.list.focus_next()
                        };
                        debug!("Focus → {:?}", moved);
                    }
                    Keycode::B => {
                        simulate_busy = !simulate_busy;
                        info!("Simulated busy display: {}", simulate_busy);
                    }
                    _ => {
                        let Some(target) = screen
                            .list
                            .focused()
                            .and_then(|h| screen.list.widget(h))
                            .map(|w| w.id())
                        else {
                            continue;
                        };
                        if let Some(code) = keycode_to_scan(keycode) {
                            send(Message::key(target, KeyEvent::pressed(code)));
                        } else if let Some(ch) = keycode_to_char(keycode, shift) {
                            send(Message::key(target, KeyEvent::Char(ch)));
                        }
                    }
                },

                SimulatorEvent::KeyUp { keycode, .. } => match keycode {
                    Keycode::LShift | Keycode::RShift => shift = false,
                    _ => {
                        let focused = screen.list.focused().and_then(|h| screen.list.widget(h));
                        if let (Some(widget), Some(code)) = (focused, keycode_to_scan(keycode)) {
                            let target = widget.id();
                            send(Message::key(
                                target,
                                KeyEvent::Scan {
                                    code,
                                    phase: KeyPhase::Released,
                                },
                            ));
                        }
                    }
                },

                SimulatorEvent::MouseButtonDown { point, .. } => {
                    mouse_down = true;
                    send(Message::press(point.x, point.y));
                }

                SimulatorEvent::MouseButtonUp { point, .. } => {
                    mouse_down = false;
                    send(Message::release(point.x, point.y));
                }

                SimulatorEvent::MouseMove { point } if mouse_down => {
                    send(Message::Pointer {
                        x: point.x,
                        y: point.y,
                        phase: TouchPhase::Move,
                    });
                }

                _ => {}
            }
        }

        // --- Message dispatch -----------------------------------------------
        while let Ok(message) = receiver.try_receive() {
            let mut released = Vec::new();
            screen.list.message(&message, |handle, action, _| {
                debug!("{:?} → {:?}", handle, action);
                if action == Action::Button(ButtonAction::Released) {
                    released.push(handle);
                }
                true
            });

            if released.contains(&screen.clear)
                && let Ok(entry) = screen.list.text_entry_mut(screen.name)
            {
                let _ = entry.set_text("");
            }
        }

        // --- Caret blink ------------------------------------------------------
        if last_blink.elapsed() >= CARET_BLINK {
            caret_on = !caret_on;
            if let Ok(entry) = screen.list.text_entry_mut(screen.name) {
                if caret_on {
                    entry.show_caret();
                } else {
                    entry.hide_caret();
                }
            }
            last_blink = Instant::now();
        }

        // --- Render -------------------------------------------------------
        for attempt in 0..DRAW_ATTEMPTS_PER_FRAME {
            // Every third attempt sees a busy pipeline to exercise resumption
            let busy = simulate_busy && (frame + attempt) % 3 == 0;
            canvas.set_render_status(if busy {
                RenderStatus::Busy
            } else {
                RenderStatus::Idle
            });

            let Ok(status) = screen.list.draw_all(&mut canvas);
            if status == DrawStatus::Complete {
                break;
            }
        }

        if let Ok(fruit) = screen.list.list_box(screen.fruit)
            && frame % 90 == 0
            && let Some(selected) = fruit.selection_get(None).and_then(|h| fruit.item(h))
        {
            debug!("Selected fruit: {}", selected.text());
        }

        let _ = canvas.target_mut().flush(&mut display);
        window.update(&display);

        // --- Frame pacing -------------------------------------------------
        let elapsed = frame_start.elapsed();
        if elapsed < FRAME_DURATION {
            std::thread::sleep(FRAME_DURATION - elapsed);
        }
    }

    screen.list.remove_all();
    info!("Simulator exiting");
}
