//! Recording driver shared by the integration tests.

#![allow(dead_code)]

use std::convert::Infallible;
use std::rc::Rc;

use embedded_graphics::image::ImageRaw;
use embedded_graphics::mono_font::MonoFont;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use gol_core::gfx::{LineStyle, TextAlignment};
use gol_core::{BoundingBox, DrawStatus, Gfx, RenderStatus, StyleScheme, WidgetList};

/// One primitive issued by a widget
#[derive(Debug, Clone, PartialEq)]
pub enum Op {
    Rect { area: Rectangle, color: Rgb565, style: LineStyle },
    FillRect { area: Rectangle, color: Rgb565 },
    Circle { center: Point, radius: u32, color: Rgb565, filled: bool },
    Line { start: Point, end: Point, color: Rgb565 },
    Image { top_left: Point },
    Text { area: Rectangle, text: String, color: Rgb565 },
}

impl Op {
    /// A point the primitive is anchored at, inside the issuing widget
    pub fn anchor(&self) -> Point {
        match self {
            Op::Rect { area, .. } | Op::FillRect { area, .. } | Op::Text { area, .. } => {
                area.top_left
            }
            Op::Circle { center, .. } => *center,
            Op::Line { start, .. } => *start,
            Op::Image { top_left } => *top_left,
        }
    }

    pub fn color(&self) -> Option<Rgb565> {
        match self {
            Op::Rect { color, .. }
            | Op::FillRect { color, .. }
            | Op::Circle { color, .. }
            | Op::Line { color, .. }
            | Op::Text { color, .. } => Some(*color),
            Op::Image { .. } => None,
        }
    }
}

/// `Gfx` driver that records primitives instead of drawing them.
///
/// With `busy_every(n)` every n-th readiness poll reports `Busy`, forcing
/// draw state machines to suspend and resume.
pub struct Recorder {
    pub ops: Vec<Op>,
    color: Rgb565,
    line_style: LineStyle,
    busy_every: usize,
    polls: usize,
    fail_next: bool,
}

impl Recorder {
    pub fn new() -> Self {
        Self {
            ops: Vec::new(),
            color: Rgb565::BLACK,
            line_style: LineStyle::Solid,
            busy_every: 0,
            polls: 0,
            fail_next: false,
        }
    }

    pub fn busy_every(mut self, polls: usize) -> Self {
        self.busy_every = polls;
        self
    }

    /// Report `Failed` on the next poll only
    pub fn fail_once(&mut self) {
        self.fail_next = true;
    }

    pub fn texts(&self) -> Vec<&str> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                Op::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl Gfx for Recorder {
    type Error = Infallible;

    fn render_status(&mut self) -> RenderStatus {
        self.polls += 1;
        if self.fail_next {
            self.fail_next = false;
            return RenderStatus::Failed;
        }
        if self.busy_every > 0 && self.polls % self.busy_every == 0 {
            RenderStatus::Busy
        } else {
            RenderStatus::Idle
        }
    }

    fn set_color(&mut self, color: Rgb565) {
        self.color = color;
    }

    fn set_line_style(&mut self, style: LineStyle) {
        self.line_style = style;
    }

    fn set_font(&mut self, _font: &'static MonoFont<'static>) {}

    fn rectangle(&mut self, area: Rectangle) -> Result<(), Infallible> {
        self.ops.push(Op::Rect {
            area,
            color: self.color,
            style: self.line_style,
        });
        Ok(())
    }

    fn fill_rectangle(&mut self, area: Rectangle) -> Result<(), Infallible> {
        self.ops.push(Op::FillRect {
            area,
            color: self.color,
        });
        Ok(())
    }

    fn rounded_rectangle(&mut self, area: Rectangle, _radius: u32) -> Result<(), Infallible> {
        self.rectangle(area)
    }

    fn fill_rounded_rectangle(&mut self, area: Rectangle, _radius: u32) -> Result<(), Infallible> {
        self.fill_rectangle(area)
    }

    fn circle(&mut self, center: Point, radius: u32) -> Result<(), Infallible> {
        self.ops.push(Op::Circle {
            center,
            radius,
            color: self.color,
            filled: false,
        });
        Ok(())
    }

    fn fill_circle(&mut self, center: Point, radius: u32) -> Result<(), Infallible> {
        self.ops.push(Op::Circle {
            center,
            radius,
            color: self.color,
            filled: true,
        });
        Ok(())
    }

    fn line(&mut self, start: Point, end: Point) -> Result<(), Infallible> {
        self.ops.push(Op::Line {
            start,
            end,
            color: self.color,
        });
        Ok(())
    }

    fn image(&mut self, top_left: Point, _image: &ImageRaw<'static, Rgb565>) -> Result<(), Infallible> {
        self.ops.push(Op::Image { top_left });
        Ok(())
    }

    fn text_box(
        &mut self,
        area: Rectangle,
        text: &str,
        _alignment: TextAlignment,
    ) -> Result<(), Infallible> {
        self.ops.push(Op::Text {
            area,
            text: text.to_string(),
            color: self.color,
        });
        Ok(())
    }
}

pub fn scheme() -> Rc<StyleScheme> {
    Rc::new(StyleScheme::default())
}

/// Inclusive containment, matching how outlines sit on the widget edge
pub fn within(bounds: BoundingBox, p: Point) -> bool {
    p.x >= bounds.left && p.x <= bounds.right && p.y >= bounds.top && p.y <= bounds.bottom
}

/// Call `draw_all` until the pass completes, bounded so a stuck state
/// machine fails the test instead of hanging it.
pub fn draw_to_completion(list: &mut WidgetList, gfx: &mut Recorder) -> usize {
    for calls in 1..=10_000 {
        let Ok(status) = list.draw_all(gfx);
        if status == DrawStatus::Complete {
            return calls;
        }
    }
    panic!("draw pass never completed");
}
