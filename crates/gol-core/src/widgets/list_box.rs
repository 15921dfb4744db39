//! Scrollable list box with single or multiple selection.
//!
//! Items live in an [`Arena`] and are doubly linked through handles, so
//! inserting after a known item and unlinking an item are both O(1).
//! Item text is shared through `Rc<str>`; removing an item drops only the
//! list's reference, never the caller's.

use alloc::rc::Rc;
use embedded_graphics::image::ImageRaw;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use log::debug;

use super::{Control, Header, erase};
use crate::arena::{Arena, Key};
use crate::error::{GolError, GolResult};
use crate::gfx::{DrawStatus, Gfx, LineStyle, PanelStyle, TextAlignment, draw_panel};
use crate::ui::core::{
    Action, BoundingBox, KeyEvent, KeyPhase, ListAction, ListMove, Message, TouchPhase, WidgetId,
};
use crate::ui::scan_codes::ScanCode;
use crate::ui::styling::StyleScheme;

/// Stable reference to an item inside one list box
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ItemHandle(Key);

/// Per-item status flags
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ItemStatus {
    pub selected: bool,
    /// Row must be repainted on the next items pass
    pub redraw: bool,
}

impl ItemStatus {
    pub const SELECTED: Self = Self {
        selected: true,
        redraw: false,
    };
}

pub struct ListItem {
    prev: Option<ItemHandle>,
    next: Option<ItemHandle>,
    status: ItemStatus,
    text: Rc<str>,
    image: Option<ImageRaw<'static, Rgb565>>,
    data: u16,
}

impl ListItem {
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Shared handle to the item text
    pub fn text_rc(&self) -> Rc<str> {
        self.text.clone()
    }

    pub fn image(&self) -> Option<&ImageRaw<'static, Rgb565>> {
        self.image.as_ref()
    }

    /// Opaque caller data attached at insertion
    pub fn data(&self) -> u16 {
        self.data
    }

    pub fn status(&self) -> ItemStatus {
        self.status
    }

    pub fn is_selected(&self) -> bool {
        self.status.selected
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stage {
    Start,
    Panel,
    /// Next item to visit and its position in the list
    Items {
        next: Option<ItemHandle>,
        index: i32,
    },
    Focus,
}

pub struct ListBox {
    header: Header,
    items: Arena<ListItem>,
    head: Option<ItemHandle>,
    tail: Option<ItemHandle>,
    focus_item: Option<ItemHandle>,
    /// Added to every row position; zero or negative once scrolled down
    scroll_y: i32,
    text_height: i32,
    alignment: TextAlignment,
    stage: Stage,
}

impl ListBox {
    pub fn new(id: WidgetId, bounds: BoundingBox, scheme: Rc<StyleScheme>) -> Self {
        let text_height = scheme.text_height().max(1);
        Self {
            header: Header::new(id, bounds, scheme),
            items: Arena::new(),
            head: None,
            tail: None,
            focus_item: None,
            scroll_y: 0,
            text_height,
            alignment: TextAlignment::LEFT,
            stage: Stage::Start,
        }
    }

    /// Append one item per line of `text`.
    pub fn with_lines(mut self, text: &str) -> GolResult<Self> {
        for line in text.split('\n') {
            self.item_add(None, line, None, ItemStatus::default(), 0)?;
        }
        self.focus_item = self.head;
        Ok(self)
    }

    pub fn single_select(mut self) -> Self {
        self.header.properties.single_select = true;
        self
    }

    pub fn with_alignment(mut self, alignment: TextAlignment) -> Self {
        self.alignment = alignment;
        self
    }

    pub fn disabled(mut self) -> Self {
        self.header.properties.disabled = true;
        self
    }

    pub fn focused(mut self) -> Self {
        self.header.properties.focused = true;
        self
    }

    pub fn alignment(&self) -> TextAlignment {
        self.alignment
    }

    pub fn set_alignment(&mut self, alignment: TextAlignment) {
        self.alignment = alignment;
        self.header.requests.full = true;
    }

    pub fn is_single_select(&self) -> bool {
        self.header.properties.single_select
    }

    pub fn scroll_offset(&self) -> i32 {
        self.scroll_y
    }

    pub fn text_height(&self) -> i32 {
        self.text_height
    }

    // ------------------------------------------------------------------------
    // Item list
    // ------------------------------------------------------------------------

    /// Insert an item after `after`, or at the tail when `after` is `None`.
    pub fn item_add(
        &mut self,
        after: Option<ItemHandle>,
        text: impl Into<Rc<str>>,
        image: Option<ImageRaw<'static, Rgb565>>,
        status: ItemStatus,
        data: u16,
    ) -> GolResult<ItemHandle> {
        let (prev, next) = match after {
            Some(at) => (Some(at), self.item(at).ok_or(GolError::UnknownItem)?.next),
            None => (self.tail, None),
        };

        let key = self.items.try_insert(ListItem {
            prev,
            next,
            status: ItemStatus {
                redraw: true,
                ..status
            },
            text: text.into(),
            image,
            data,
        })?;
        let handle = ItemHandle(key);

        match prev.and_then(|p| self.items.get_mut(p.0)) {
            Some(p) => p.next = Some(handle),
            None => self.head = Some(handle),
        }
        match next.and_then(|n| self.items.get_mut(n.0)) {
            Some(n) => n.prev = Some(handle),
            None => self.tail = Some(handle),
        }

        if self.focus_item.is_none() {
            self.focus_item = Some(handle);
        }
        self.header.requests.full = true;
        Ok(handle)
    }

    /// Unlink and drop one item.
    pub fn item_remove(&mut self, item: ItemHandle) -> GolResult<()> {
        let removed = self.items.remove(item.0).ok_or(GolError::UnknownItem)?;

        match removed.prev.and_then(|p| self.items.get_mut(p.0)) {
            Some(p) => p.next = removed.next,
            None => self.head = removed.next,
        }
        match removed.next.and_then(|n| self.items.get_mut(n.0)) {
            Some(n) => n.prev = removed.prev,
            None => self.tail = removed.prev,
        }

        if self.focus_item == Some(item) {
            self.focus_item = removed.next.or(removed.prev);
        }
        if self.items.is_empty() {
            self.scroll_y = 0;
        }
        self.header.requests.full = true;
        Ok(())
    }

    /// Drop every item.
    pub fn remove_all_items(&mut self) {
        self.items.clear();
        self.head = None;
        self.tail = None;
        self.focus_item = None;
        self.scroll_y = 0;
        self.header.requests.full = true;
    }

    pub fn item(&self, item: ItemHandle) -> Option<&ListItem> {
        self.items.get(item.0)
    }

    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    pub fn first_item(&self) -> Option<ItemHandle> {
        self.head
    }

    pub fn last_item(&self) -> Option<ItemHandle> {
        self.tail
    }

    /// Items from head to tail
    pub fn items(&self) -> impl Iterator<Item = (ItemHandle, &ListItem)> + '_ {
        let mut cursor = self.head;
        core::iter::from_fn(move || {
            let handle = cursor?;
            let item = self.items.get(handle.0)?;
            cursor = item.next;
            Some((handle, item))
        })
    }

    pub fn set_item_text(&mut self, item: ItemHandle, text: impl Into<Rc<str>>) -> GolResult<()> {
        let entry = self.items.get_mut(item.0).ok_or(GolError::UnknownItem)?;
        entry.text = text.into();
        entry.status.redraw = true;
        self.header.requests.items = true;
        Ok(())
    }

    pub fn set_item_image(
        &mut self,
        item: ItemHandle,
        image: Option<ImageRaw<'static, Rgb565>>,
    ) -> GolResult<()> {
        let entry = self.items.get_mut(item.0).ok_or(GolError::UnknownItem)?;
        entry.image = image;
        entry.status.redraw = true;
        self.header.requests.items = true;
        Ok(())
    }

    // ------------------------------------------------------------------------
    // Selection and focus
    // ------------------------------------------------------------------------

    /// Toggle the selection of `item`.
    ///
    /// In single-select mode every other selected item is deselected first,
    /// so at most one item is ever selected.
    pub fn selection_change(&mut self, item: ItemHandle) -> GolResult<()> {
        let was_selected = self.item(item).ok_or(GolError::UnknownItem)?.is_selected();

        if self.header.properties.single_select {
            let mut cursor = self.head;
            while let Some(handle) = cursor {
                let Some(entry) = self.items.get_mut(handle.0) else {
                    break;
                };
                if entry.status.selected {
                    entry.status.selected = false;
                    entry.status.redraw = true;
                }
                cursor = entry.next;
            }
        }

        if let Some(entry) = self.items.get_mut(item.0) {
            entry.status.selected = !was_selected;
            entry.status.redraw = true;
        }
        self.header.requests.items = true;
        Ok(())
    }

    /// First selected item at or after `from` (the head when `None`)
    pub fn selection_get(&self, from: Option<ItemHandle>) -> Option<ItemHandle> {
        let mut cursor = from.or(self.head);
        while let Some(handle) = cursor {
            let entry = self.items.get(handle.0)?;
            if entry.status.selected {
                return Some(handle);
            }
            cursor = entry.next;
        }
        None
    }

    /// Number of rows that fit entirely inside the box
    pub fn visible_item_count(&self) -> usize {
        let b = self.header.bounds;
        let inner = b.bottom - b.top - 2 * self.header.scheme.emboss();
        (inner / self.text_height).max(0) as usize
    }

    pub fn focus_item(&self) -> Option<ItemHandle> {
        self.focus_item
    }

    /// Position of the focused item
    pub fn item_focus_get(&self) -> Option<usize> {
        self.focus_item.and_then(|f| self.position_of(f))
    }

    /// Move focus to the item at `index`, clamped to the list.
    pub fn item_focus_set(&mut self, index: usize) {
        let Some(last) = self.items.len().checked_sub(1) else {
            return;
        };
        if let Some(target) = self.nth(index.min(last)) {
            self.refocus(target);
        }
    }

    fn refocus(&mut self, target: ItemHandle) {
        if self.focus_item == Some(target) {
            return;
        }
        for handle in [self.focus_item, Some(target)].into_iter().flatten() {
            if let Some(entry) = self.items.get_mut(handle.0) {
                entry.status.redraw = true;
            }
        }
        self.focus_item = Some(target);
        self.header.requests.items = true;
    }

    fn clear_redraw_from(&mut self, mut cursor: Option<ItemHandle>) {
        while let Some(entry) = cursor.and_then(|h| self.items.get_mut(h.0)) {
            entry.status.redraw = false;
            cursor = entry.next;
        }
    }

    fn nth(&self, index: usize) -> Option<ItemHandle> {
        self.items().nth(index).map(|(h, _)| h)
    }

    fn position_of(&self, item: ItemHandle) -> Option<usize> {
        self.items().position(|(h, _)| h == item)
    }

    // ------------------------------------------------------------------------
    // Drawing helpers
    // ------------------------------------------------------------------------

    fn inner(&self) -> BoundingBox {
        self.header.bounds.inset(self.header.scheme.emboss())
    }

    fn row_top(&self, index: i32) -> i32 {
        self.inner().top + self.scroll_y + index * self.text_height
    }

    /// Shift the scroll offset so the focused row is fully visible.
    fn scroll_to_focus(&mut self) -> bool {
        let Some(index) = self.item_focus_get() else {
            return false;
        };
        let inner = self.inner();
        let top = self.row_top(index as i32);
        let bottom = top + self.text_height - 1;

        let delta = if top < inner.top {
            inner.top - top
        } else if bottom > inner.bottom && top > inner.top {
            -(bottom - inner.bottom).min(top - inner.top)
        } else {
            0
        };

        if delta != 0 {
            self.scroll_y += delta;
            debug!("List box {} scrolled to {}", self.header.id, self.scroll_y);
        }
        delta != 0
    }

    fn row_colors(&self, status: ItemStatus) -> (Rgb565, Rgb565) {
        let scheme = &self.header.scheme;
        if self.header.properties.disabled {
            (scheme.color_disabled, scheme.text_color_disabled)
        } else if status.selected {
            (scheme.color1, scheme.text_color1)
        } else {
            (scheme.color0, scheme.text_color0)
        }
    }

    fn draw_row<G: Gfx>(&self, gfx: &mut G, item: &ListItem, top: i32) -> Result<(), G::Error> {
        let inner = self.inner();
        let bottom = top + self.text_height - 1;
        let (background, text_color) = self.row_colors(item.status);

        let band = BoundingBox::new(
            inner.left,
            top.max(inner.top),
            inner.right,
            bottom.min(inner.bottom),
        );
        gfx.set_line_style(LineStyle::Solid);
        gfx.set_color(background);
        gfx.fill_rectangle(band.to_rectangle())?;

        // Partially visible rows only get their background
        if top < inner.top || bottom > inner.bottom {
            return Ok(());
        }

        let mut text_left = inner.left;
        if let Some(image) = item.image() {
            let size = image.size();
            let image_top = top + (self.text_height - size.height as i32) / 2;
            gfx.image(Point::new(inner.left, image_top), image)?;
            text_left += size.width as i32 + 2;
        }

        if text_left < inner.right {
            gfx.set_font(self.header.scheme.font);
            gfx.set_color(text_color);
            let area = BoundingBox::new(text_left, top, inner.right, bottom);
            gfx.text_box(area.to_rectangle(), item.text(), self.alignment)?;
        }
        Ok(())
    }

    fn draw_focus<G: Gfx>(&self, gfx: &mut G) -> Result<(), G::Error> {
        let (Some(focus), Some(index)) = (self.focus_item, self.item_focus_get()) else {
            return Ok(());
        };
        let Some(item) = self.item(focus) else {
            return Ok(());
        };

        let inner = self.inner();
        let top = self.row_top(index as i32);
        let bottom = top + self.text_height - 1;
        if top < inner.top || bottom > inner.bottom {
            return Ok(());
        }

        let (background, text_color) = self.row_colors(item.status);
        if self.header.properties.focused {
            gfx.set_color(text_color);
            gfx.set_line_style(LineStyle::Dotted);
        } else {
            gfx.set_color(background);
            gfx.set_line_style(LineStyle::Solid);
        }
        let row = BoundingBox::new(inner.left, top, inner.right, bottom);
        gfx.rectangle(row.to_rectangle())?;
        gfx.set_line_style(LineStyle::Solid);
        Ok(())
    }
}

impl Control for ListBox {
    fn header(&self) -> &Header {
        &self.header
    }

    fn header_mut(&mut self) -> &mut Header {
        &mut self.header
    }

    fn translate(&self, message: &Message) -> Option<Action> {
        if self.header.properties.disabled {
            return None;
        }

        let action = match *message {
            Message::Pointer {
                x,
                y,
                phase: TouchPhase::Press,
            } if self.header.bounds.contains(x, y) => ListAction::Touchscreen,
            Message::Key {
                target,
                event:
                    KeyEvent::Scan {
                        code,
                        phase: KeyPhase::Pressed,
                    },
            } if target == self.header.id => match code {
                ScanCode::UP => ListAction::Move(ListMove::Up),
                ScanCode::DOWN => ListAction::Move(ListMove::Down),
                ScanCode::SPACE | ScanCode::ENTER | ScanCode::ENTER_ALT => ListAction::Selected,
                _ => return None,
            },
            _ => return None,
        };

        Some(Action::List(action))
    }

    fn apply(&mut self, action: Action, message: &Message) {
        let Action::List(action) = action else {
            return;
        };

        match action {
            ListAction::Touchscreen => {
                let Message::Pointer { y, .. } = *message else {
                    return;
                };
                let Some(last) = self.items.len().checked_sub(1) else {
                    return;
                };
                let b = self.header.bounds;
                let row = (y - self.scroll_y - b.top - self.header.scheme.emboss())
                    / self.text_height;
                let index = (row.max(0) as usize).min(last);
                if let Some(target) = self.nth(index) {
                    self.refocus(target);
                    // Handle came from our own list, so this cannot fail
                    self.selection_change(target).ok();
                }
            }
            ListAction::Selected => {
                if let Some(focus) = self.focus_item {
                    self.selection_change(focus).ok();
                }
            }
            ListAction::Move(direction) => {
                if let Some(current) = self.item_focus_get() {
                    let index = match direction {
                        ListMove::Up => current.saturating_sub(1),
                        ListMove::Down => current + 1,
                    };
                    self.item_focus_set(index);
                }
            }
        }
        self.header.requests.items = true;
    }

    fn draw<G: Gfx>(&mut self, gfx: &mut G) -> Result<DrawStatus, G::Error> {
        loop {
            if !gfx.ready() {
                return Ok(DrawStatus::Incomplete);
            }

            match self.stage {
                Stage::Start => {
                    if !self.header.requests.hide && self.scroll_to_focus() {
                        self.header.requests.full = true;
                    }
                    let requests = self.header.begin_pass();
                    if requests.hide {
                        erase(gfx, &self.header)?;
                        return Ok(self.header.end_pass());
                    }

                    self.stage = if requests.full {
                        Stage::Panel
                    } else if requests.items {
                        Stage::Items {
                            next: self.head,
                            index: 0,
                        }
                    } else if requests.focus {
                        Stage::Focus
                    } else {
                        return Ok(self.header.end_pass());
                    };
                }
                Stage::Panel => {
                    let scheme = &self.header.scheme;
                    let face = if self.header.properties.disabled {
                        scheme.color_disabled
                    } else {
                        scheme.color0
                    };
                    let panel = PanelStyle {
                        face: scheme.fill_style.face(face),
                        light: scheme.emboss_light_color,
                        dark: scheme.emboss_dark_color,
                        emboss: scheme.emboss_size,
                        radius: 0,
                    }
                    .sunken();
                    draw_panel(gfx, self.header.bounds, &panel)?;
                    self.stage = Stage::Items {
                        next: self.head,
                        index: 0,
                    };
                }
                Stage::Items { next, index } => {
                    let Some(handle) = next else {
                        self.stage = Stage::Focus;
                        continue;
                    };
                    let Some(item) = self.items.get(handle.0) else {
                        self.stage = Stage::Focus;
                        continue;
                    };

                    let top = self.row_top(index);
                    let inner = self.inner();
                    if top > inner.bottom {
                        // Rows below the band repaint once scrolled into view
                        self.clear_redraw_from(Some(handle));
                        self.stage = Stage::Focus;
                        continue;
                    }

                    let visible = top + self.text_height - 1 >= inner.top;
                    if visible && (self.header.pass_requests().full || item.status.redraw) {
                        self.draw_row(gfx, item, top)?;
                    }
                    let following = item.next;
                    if let Some(item) = self.items.get_mut(handle.0) {
                        item.status.redraw = false;
                    }
                    self.stage = Stage::Items {
                        next: following,
                        index: index + 1,
                    };
                }
                Stage::Focus => {
                    self.draw_focus(gfx)?;
                    self.stage = Stage::Start;
                    return Ok(self.header.end_pass());
                }
            }
        }
    }

    fn free(&mut self) {
        self.remove_all_items();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framebuffer::FrameBuffer;
    use crate::gfx::Canvas;
    use alloc::vec::Vec;

    fn list(lines: &str) -> ListBox {
        ListBox::new(3, BoundingBox::new(0, 0, 100, 31), Rc::new(StyleScheme::default()))
            .with_lines(lines)
            .unwrap()
    }

    fn texts(list: &ListBox) -> Vec<&str> {
        list.items().map(|(_, item)| item.text()).collect()
    }

    #[test]
    fn test_lines_become_items() {
        let lb = list("one\ntwo\nthree");
        assert_eq!(texts(&lb), ["one", "two", "three"]);
        assert_eq!(lb.item_focus_get(), Some(0));
        assert_eq!(lb.item_count(), 3);
    }

    #[test]
    fn test_insert_after_and_remove_relink() {
        let mut lb = list("a\nc");
        let a = lb.first_item().unwrap();
        let b = lb
            .item_add(Some(a), "b", None, ItemStatus::default(), 42)
            .unwrap();
        assert_eq!(texts(&lb), ["a", "b", "c"]);
        assert_eq!(lb.item(b).unwrap().data(), 42);

        lb.item_remove(a).unwrap();
        assert_eq!(texts(&lb), ["b", "c"]);
        assert_eq!(lb.focus_item(), Some(b), "focus moves to the next item");

        let c = lb.last_item().unwrap();
        lb.item_remove(c).unwrap();
        lb.item_remove(b).unwrap();
        assert!(lb.first_item().is_none());
        assert!(lb.last_item().is_none());
        assert_eq!(lb.item_remove(b), Err(GolError::UnknownItem));
    }

    #[test]
    fn test_removing_items_keeps_caller_text() {
        let shared: Rc<str> = Rc::from("shared");
        let mut lb = list("x");
        let item = lb
            .item_add(None, shared.clone(), None, ItemStatus::default(), 0)
            .unwrap();
        lb.item_remove(item).unwrap();
        lb.remove_all_items();
        assert_eq!(&*shared, "shared");
        assert_eq!(Rc::strong_count(&shared), 1);
    }

    #[test]
    fn test_multi_select_toggles_only_target() {
        let mut lb = list("a\nb\nc");
        let handles: Vec<_> = lb.items().map(|(h, _)| h).collect();
        lb.selection_change(handles[0]).unwrap();
        lb.selection_change(handles[2]).unwrap();

        let selected: Vec<bool> = lb.items().map(|(_, i)| i.is_selected()).collect();
        assert_eq!(selected, [true, false, true]);
        assert_eq!(lb.selection_get(None), Some(handles[0]));
        assert_eq!(lb.selection_get(Some(handles[1])), Some(handles[2]));
    }

    #[test]
    fn test_single_select_keeps_one() {
        let mut lb = list("a\nb\nc").single_select();
        let handles: Vec<_> = lb.items().map(|(h, _)| h).collect();
        lb.selection_change(handles[0]).unwrap();
        lb.selection_change(handles[1]).unwrap();

        let selected: Vec<bool> = lb.items().map(|(_, i)| i.is_selected()).collect();
        assert_eq!(selected, [false, true, false]);
    }

    #[test]
    fn test_touch_row_is_clamped() {
        let mut lb = list("a\nb\nc");
        let far_below = Message::press(50, 30);
        let action = lb.translate(&far_below).unwrap();

        // Row 2 is the last item; a press past the end still lands on it
        lb.scroll_y = -40;
        lb.apply(action, &far_below);
        assert_eq!(lb.item_focus_get(), Some(2));
        assert!(lb.items().nth(2).unwrap().1.is_selected());
    }

    #[test]
    fn test_move_is_clamped_without_wraparound() {
        let mut lb = list("a\nb");
        let up = Message::key(3, KeyEvent::pressed(ScanCode::UP));
        let down = Message::key(3, KeyEvent::pressed(ScanCode::DOWN));

        let action = lb.translate(&up).unwrap();
        lb.apply(action, &up);
        assert_eq!(lb.item_focus_get(), Some(0));

        for _ in 0..3 {
            let action = lb.translate(&down).unwrap();
            lb.apply(action, &down);
        }
        assert_eq!(lb.item_focus_get(), Some(1));
    }

    #[test]
    fn test_visible_item_count() {
        let lb = list("a");
        // 31 px tall, 2 px emboss, 10 px rows
        assert_eq!(lb.visible_item_count(), 2);
    }

    #[test]
    fn test_draw_scrolls_focus_into_view() {
        let mut lb = list("0\n1\n2\n3\n4");
        let mut canvas = Canvas::new(FrameBuffer::new(Size::new(128, 64)));
        assert_eq!(lb.draw(&mut canvas).unwrap(), DrawStatus::Complete);
        assert_eq!(lb.scroll_offset(), 0);

        lb.header.requests.clear();
        lb.item_focus_set(4);
        assert_eq!(lb.draw(&mut canvas).unwrap(), DrawStatus::Complete);
        assert_eq!(lb.scroll_offset(), -22);

        lb.header.requests.clear();
        lb.item_focus_set(0);
        assert_eq!(lb.draw(&mut canvas).unwrap(), DrawStatus::Complete);
        assert_eq!(lb.scroll_offset(), 0);
        assert!(lb.items().all(|(_, i)| !i.status().redraw));
    }
}
