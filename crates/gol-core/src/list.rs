//! The widget list: ownership, focus, message routing and batch drawing.
//!
//! Widgets are kept in insertion order, which is also drawing order. A
//! draw pass walks the list and stops at the first widget that reports
//! [`DrawStatus::Incomplete`]; the next call resumes at that same widget,
//! so widget N always finishes before widget N+1 starts.

use log::{debug, info, warn};

use crate::arena::{Arena, Key};
use crate::error::{GolError, GolResult};
use crate::gfx::{DrawStatus, Gfx};
use crate::ui::core::{Action, BoundingBox, Message, RadioAction, WidgetId};
use crate::widgets::{Button, Control, ListBox, RadioButton, TextEntry, Widget};

/// Stable reference to a widget in a [`WidgetList`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WidgetHandle(Key);

struct Node {
    widget: Widget,
    next: Option<WidgetHandle>,
}

pub struct WidgetList {
    nodes: Arena<Node>,
    head: Option<WidgetHandle>,
    tail: Option<WidgetHandle>,
    focused: Option<WidgetHandle>,
    /// Widget the current draw pass resumes at
    cursor: Option<WidgetHandle>,
    pass_active: bool,
    /// Head of the radio group new non-leader radio buttons join
    current_group: Option<WidgetHandle>,
    max_widgets: usize,
}

impl Default for WidgetList {
    fn default() -> Self {
        Self::new()
    }
}

macro_rules! typed_access {
    ($get:ident, $get_mut:ident, $variant:ident, $ty:ty, $name:literal) => {
        pub fn $get(&self, handle: WidgetHandle) -> GolResult<&$ty> {
            match self.widget(handle) {
                Some(Widget::$variant(w)) => Ok(w),
                Some(_) => Err(GolError::WrongVariant { expected: $name }),
                None => Err(GolError::UnknownWidget),
            }
        }

        pub fn $get_mut(&mut self, handle: WidgetHandle) -> GolResult<&mut $ty> {
            match self.widget_mut(handle) {
                Some(Widget::$variant(w)) => Ok(w),
                Some(_) => Err(GolError::WrongVariant { expected: $name }),
                None => Err(GolError::UnknownWidget),
            }
        }
    };
}

impl WidgetList {
    pub const fn new() -> Self {
        Self::with_max_widgets(usize::MAX)
    }

    /// List that refuses to grow past `max_widgets`
    pub const fn with_max_widgets(max_widgets: usize) -> Self {
        Self {
            nodes: Arena::new(),
            head: None,
            tail: None,
            focused: None,
            cursor: None,
            pass_active: false,
            current_group: None,
            max_widgets,
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn max_widgets(&self) -> usize {
        self.max_widgets
    }

    // ------------------------------------------------------------------------
    // Membership
    // ------------------------------------------------------------------------

    /// Append a widget at the tail and return its handle.
    ///
    /// On error nothing is linked. Radio buttons are wired into their group
    /// here, and a widget built with the focused flag takes the list focus.
    pub fn add(&mut self, widget: impl Into<Widget>) -> GolResult<WidgetHandle> {
        if self.nodes.len() >= self.max_widgets {
            return Err(GolError::CapacityExceeded {
                max: self.max_widgets,
            });
        }

        let mut widget = widget.into();
        let id = widget.id();
        if self.find(id).is_some() {
            warn!("Widget id {} is already in use", id);
        }

        // Focus is assigned through focus_set so the single-focus rule holds
        let wants_focus = core::mem::take(&mut widget.header_mut().properties.focused);
        let kind = widget.kind();

        let handle = WidgetHandle(self.nodes.try_insert(Node { widget, next: None })?);
        match self.tail.and_then(|t| self.nodes.get_mut(t.0)) {
            Some(tail) => tail.next = Some(handle),
            None => self.head = Some(handle),
        }
        self.tail = Some(handle);

        self.join_radio_group(handle);

        if wants_focus && self.focus_set(handle).is_err() {
            debug!("Widget {} cannot take focus", id);
        }

        info!("Added {} {}", kind.name(), id);
        Ok(handle)
    }

    fn join_radio_group(&mut self, handle: WidgetHandle) {
        let Some(radio) = self.radio(handle) else {
            return;
        };

        let group = if radio.is_group_leader() {
            None
        } else {
            self.current_group
        };
        let Some(head) = group.filter(|h| self.radio(*h).is_some()) else {
            let Some(radio) = self.radio_mut(handle) else {
                return;
            };
            if !radio.is_group_leader() {
                warn!("Radio button {} has no group, starting one", radio.id());
            }
            radio.header_mut().properties.group_leader = true;
            radio.group_head = Some(handle);
            self.current_group = Some(handle);
            return;
        };

        let mut last = head;
        while let Some(next) = self.radio(last).and_then(|r| r.next_in_group) {
            last = next;
        }
        if let Some(tail) = self.radio_mut(last) {
            tail.next_in_group = Some(handle);
        }
        if let Some(radio) = self.radio_mut(handle) {
            radio.group_head = Some(head);
        }
    }

    /// First widget with `id`, in list order
    pub fn find(&self, id: WidgetId) -> Option<WidgetHandle> {
        self.iter().find(|(_, w)| w.id() == id).map(|(h, _)| h)
    }

    pub fn contains(&self, handle: WidgetHandle) -> bool {
        self.nodes.contains(handle.0)
    }

    pub fn widget(&self, handle: WidgetHandle) -> Option<&Widget> {
        self.nodes.get(handle.0).map(|n| &n.widget)
    }

    pub fn widget_mut(&mut self, handle: WidgetHandle) -> Option<&mut Widget> {
        self.nodes.get_mut(handle.0).map(|n| &mut n.widget)
    }

    /// Widgets in drawing order
    pub fn iter(&self) -> impl Iterator<Item = (WidgetHandle, &Widget)> + '_ {
        let mut cursor = self.head;
        core::iter::from_fn(move || {
            let handle = cursor?;
            let node = self.nodes.get(handle.0)?;
            cursor = node.next;
            Some((handle, &node.widget))
        })
    }

    typed_access!(button, button_mut, Button, Button, "button");
    typed_access!(radio_button, radio_button_mut, RadioButton, RadioButton, "radio button");
    typed_access!(list_box, list_box_mut, ListBox, ListBox, "list box");
    typed_access!(text_entry, text_entry_mut, TextEntry, TextEntry, "text entry");

    /// Unlink one widget and release its auxiliary storage.
    pub fn delete(&mut self, handle: WidgetHandle) -> GolResult<()> {
        if !self.contains(handle) {
            return Err(GolError::UnknownWidget);
        }

        let mut prev = None;
        let mut cursor = self.head;
        while let Some(h) = cursor {
            if h == handle {
                break;
            }
            prev = Some(h);
            cursor = self.nodes.get(h.0).and_then(|n| n.next);
        }

        let mut node = self.nodes.remove(handle.0).ok_or(GolError::UnknownWidget)?;
        match prev.and_then(|p| self.nodes.get_mut(p.0)) {
            Some(p) => p.next = node.next,
            None => self.head = node.next,
        }
        if self.tail == Some(handle) {
            self.tail = prev;
        }
        if self.cursor == Some(handle) {
            self.cursor = node.next;
        }
        if self.focused == Some(handle) {
            self.focused = None;
        }

        if let Widget::RadioButton(radio) = &node.widget {
            self.leave_radio_group(handle, radio.group_head, radio.next_in_group);
        }

        node.widget.free();
        info!("Deleted {} {}", node.widget.kind().name(), node.widget.id());
        Ok(())
    }

    pub fn delete_by_id(&mut self, id: WidgetId) -> GolResult<()> {
        let handle = self.find(id).ok_or(GolError::UnknownWidget)?;
        self.delete(handle)
    }

    fn leave_radio_group(
        &mut self,
        handle: WidgetHandle,
        head: Option<WidgetHandle>,
        next: Option<WidgetHandle>,
    ) {
        if head == Some(handle) {
            // Promote the next member to group head
            if let Some(new_head) = next {
                let mut cursor = Some(new_head);
                while let Some(radio) = cursor.and_then(|h| self.radio_mut(h)) {
                    radio.group_head = Some(new_head);
                    cursor = radio.next_in_group;
                }
                if let Some(radio) = self.radio_mut(new_head) {
                    radio.header_mut().properties.group_leader = true;
                }
            }
            if self.current_group == Some(handle) {
                self.current_group = next;
            }
            return;
        }

        let mut cursor = head;
        while let Some(radio) = cursor.and_then(|h| self.radio_mut(h)) {
            if radio.next_in_group == Some(handle) {
                radio.next_in_group = next;
                return;
            }
            cursor = radio.next_in_group;
        }
    }

    /// Free every widget and empty the list.
    pub fn remove_all(&mut self) {
        let mut cursor = self.head;
        while let Some(node) = cursor.and_then(|h| self.nodes.get_mut(h.0)) {
            node.widget.free();
            cursor = node.next;
        }

        info!("Removed all {} widgets", self.nodes.len());
        self.nodes.clear();
        self.head = None;
        self.tail = None;
        self.focused = None;
        self.cursor = None;
        self.pass_active = false;
        self.current_group = None;
    }

    // ------------------------------------------------------------------------
    // Focus
    // ------------------------------------------------------------------------

    pub fn focused(&self) -> Option<WidgetHandle> {
        self.focused
    }

    /// Move keyboard focus to `handle`, redrawing the old and new focus.
    pub fn focus_set(&mut self, handle: WidgetHandle) -> GolResult<()> {
        let widget = self.widget(handle).ok_or(GolError::UnknownWidget)?;
        if !widget.can_focus() {
            return Err(GolError::NotFocusable);
        }
        if self.focused == Some(handle) {
            return Ok(());
        }

        self.focus_clear();
        if let Some(widget) = self.widget_mut(handle) {
            let header = widget.header_mut();
            header.properties.focused = true;
            header.requests.focus = true;
        }
        self.focused = Some(handle);
        debug!("Focus moved to widget {}", self.widget(handle).map_or(0, |w| w.id()));
        Ok(())
    }

    /// Drop focus from whichever widget holds it.
    pub fn focus_clear(&mut self) {
        if let Some(old) = self.focused.take()
            && let Some(widget) = self.widget_mut(old)
        {
            let header = widget.header_mut();
            header.properties.focused = false;
            header.requests.focus = true;
        }
    }

    /// Focus the next focusable widget, wrapping at the end of the list.
    pub fn focus_next(&mut self) -> Option<WidgetHandle> {
        let target = {
            let mut first = None;
            let mut after = None;
            let mut past_current = false;
            for (handle, _) in self.iter().filter(|(_, w)| w.can_focus()) {
                first.get_or_insert(handle);
                if past_current && after.is_none() {
                    after = Some(handle);
                }
                if Some(handle) == self.focused {
                    past_current = true;
                }
            }
            after.or(first)
        }?;
        self.focus_set(target).ok()?;
        Some(target)
    }

    /// Focus the previous focusable widget, wrapping at the start of the list.
    pub fn focus_prev(&mut self) -> Option<WidgetHandle> {
        let target = {
            let mut previous = None;
            let mut last = None;
            for (handle, widget) in self.iter() {
                if Some(handle) == self.focused && last.is_some() {
                    previous = last;
                }
                if widget.can_focus() {
                    last = Some(handle);
                }
            }
            previous.or(last)
        }?;
        self.focus_set(target).ok()?;
        Some(target)
    }

    // ------------------------------------------------------------------------
    // State helpers
    // ------------------------------------------------------------------------

    pub fn set_disabled(&mut self, handle: WidgetHandle, disabled: bool) -> GolResult<()> {
        let widget = self.widget_mut(handle).ok_or(GolError::UnknownWidget)?;
        let header = widget.header_mut();
        header.properties.disabled = disabled;
        header.requests.full = true;
        if disabled && self.focused == Some(handle) {
            self.focus_clear();
        }
        Ok(())
    }

    /// Request a full redraw of one widget.
    pub fn redraw(&mut self, handle: WidgetHandle) -> GolResult<()> {
        let widget = self.widget_mut(handle).ok_or(GolError::UnknownWidget)?;
        widget.header_mut().requests.full = true;
        Ok(())
    }

    pub fn hide(&mut self, handle: WidgetHandle) -> GolResult<()> {
        let widget = self.widget_mut(handle).ok_or(GolError::UnknownWidget)?;
        widget.header_mut().requests.hide = true;
        Ok(())
    }

    pub fn show(&mut self, handle: WidgetHandle) -> GolResult<()> {
        let widget = self.widget_mut(handle).ok_or(GolError::UnknownWidget)?;
        let requests = &mut widget.header_mut().requests;
        requests.hide = false;
        requests.full = true;
        Ok(())
    }

    /// Request hide on every widget.
    pub fn hide_all(&mut self) {
        let mut cursor = self.head;
        while let Some(node) = cursor.and_then(|h| self.nodes.get_mut(h.0)) {
            node.widget.header_mut().requests.hide = true;
            cursor = node.next;
        }
    }

    /// Request a full redraw on every widget overlapping `area`.
    pub fn redraw_rect(&mut self, area: BoundingBox) {
        let mut cursor = self.head;
        while let Some(node) = cursor.and_then(|h| self.nodes.get_mut(h.0)) {
            if node.widget.bounds().intersects(&area) {
                node.widget.header_mut().requests.full = true;
            }
            cursor = node.next;
        }
    }

    // ------------------------------------------------------------------------
    // Radio groups
    // ------------------------------------------------------------------------

    fn radio(&self, handle: WidgetHandle) -> Option<&RadioButton> {
        match self.widget(handle)? {
            Widget::RadioButton(r) => Some(r),
            _ => None,
        }
    }

    fn radio_mut(&mut self, handle: WidgetHandle) -> Option<&mut RadioButton> {
        match self.widget_mut(handle)? {
            Widget::RadioButton(r) => Some(r),
            _ => None,
        }
    }

    fn group_head_of(&self, member: WidgetHandle) -> GolResult<WidgetHandle> {
        let radio = self.radio_button(member)?;
        Ok(radio.group_head.unwrap_or(member))
    }

    /// Members of the group `member` belongs to, head first
    pub fn radio_group(
        &self,
        member: WidgetHandle,
    ) -> GolResult<impl Iterator<Item = WidgetHandle> + '_> {
        let head = self.group_head_of(member)?;
        let mut cursor = Some(head);
        Ok(core::iter::from_fn(move || {
            let handle = cursor?;
            cursor = self.radio(handle).and_then(|r| r.next_in_group);
            Some(handle)
        }))
    }

    /// Check the group member with `id`, unchecking every other member.
    ///
    /// Does nothing if no member of the group has that id.
    pub fn radio_check_set(&mut self, member: WidgetHandle, id: WidgetId) -> GolResult<()> {
        let head = self.group_head_of(member)?;
        let present = self
            .radio_group(member)?
            .any(|h| self.radio(h).is_some_and(|r| r.id() == id));
        if !present {
            debug!("Radio id {} is not in the group", id);
            return Ok(());
        }

        let mut cursor = Some(head);
        while let Some(radio) = cursor.and_then(|h| self.radio_mut(h)) {
            if radio.id() == id {
                radio.set_checked(true);
            } else if radio.is_checked() {
                radio.set_checked(false);
            }
            cursor = radio.next_in_group;
        }
        Ok(())
    }

    /// Id of the checked member of `member`'s group
    pub fn radio_check_get(&self, member: WidgetHandle) -> GolResult<Option<WidgetId>> {
        Ok(self
            .radio_group(member)?
            .filter_map(|h| self.radio(h))
            .find(|r| r.is_checked())
            .map(|r| r.id()))
    }

    fn uncheck_group(&mut self, member: WidgetHandle) {
        let Ok(head) = self.group_head_of(member) else {
            return;
        };
        let mut cursor = Some(head);
        while let Some(radio) = cursor.and_then(|h| self.radio_mut(h)) {
            if radio.is_checked() {
                radio.set_checked(false);
            }
            cursor = radio.next_in_group;
        }
    }

    // ------------------------------------------------------------------------
    // Messages
    // ------------------------------------------------------------------------

    /// Translate `message` for one widget.
    pub fn translate(&self, handle: WidgetHandle, message: &Message) -> GolResult<Option<Action>> {
        let widget = self.widget(handle).ok_or(GolError::UnknownWidget)?;
        Ok(widget.translate(message))
    }

    /// Apply a translated action to one widget.
    ///
    /// Pointer messages also move focus to the widget. A radio `Checked`
    /// action unchecks the rest of the group first.
    pub fn apply(&mut self, handle: WidgetHandle, action: Action, message: &Message) -> GolResult<()> {
        let widget = self.widget(handle).ok_or(GolError::UnknownWidget)?;
        if message.is_pointer() && widget.can_focus() {
            self.focus_set(handle).ok();
        }

        if action == Action::Radio(RadioAction::Checked) {
            self.uncheck_group(handle);
        }

        if let Some(widget) = self.widget_mut(handle) {
            widget.apply(action, message);
        }
        Ok(())
    }

    /// Offer `message` to every widget.
    ///
    /// For each widget that translates it to an action, `on_action` is
    /// called first; the default applier runs only if it returns `true`.
    pub fn message<F>(&mut self, message: &Message, mut on_action: F)
    where
        F: FnMut(WidgetHandle, Action, &Message) -> bool,
    {
        let mut cursor = self.head;
        while let Some(handle) = cursor {
            let Some(node) = self.nodes.get(handle.0) else {
                break;
            };
            cursor = node.next;

            let Some(action) = node.widget.translate(message) else {
                continue;
            };
            debug!("Widget {} translated {:?}", node.widget.id(), action);
            if on_action(handle, action, message) {
                self.apply(handle, action, message).ok();
            }
        }
    }

    // ------------------------------------------------------------------------
    // Drawing
    // ------------------------------------------------------------------------

    /// Draw one widget.
    ///
    /// Requests raised while the draw is suspended stay pending once it
    /// completes.
    pub fn draw<G: Gfx>(&mut self, handle: WidgetHandle, gfx: &mut G) -> Result<DrawStatus, G::Error> {
        let Some(widget) = self.widget_mut(handle) else {
            debug!("Draw requested for a deleted widget");
            return Ok(DrawStatus::Complete);
        };
        widget.draw(gfx)
    }

    /// Draw every widget with pending requests.
    pub fn draw_all<G: Gfx>(&mut self, gfx: &mut G) -> Result<DrawStatus, G::Error> {
        self.draw_all_with(gfx, || true)
    }

    /// Like [`draw_all`](Self::draw_all), calling `before_pass` before each
    /// new pass starts. Returning `false` skips the pass.
    pub fn draw_all_with<G, F>(&mut self, gfx: &mut G, mut before_pass: F) -> Result<DrawStatus, G::Error>
    where
        G: Gfx,
        F: FnMut() -> bool,
    {
        if !self.pass_active {
            if !before_pass() {
                return Ok(DrawStatus::Complete);
            }
            self.cursor = self.head;
            self.pass_active = true;
        }

        while let Some(handle) = self.cursor {
            let Some(node) = self.nodes.get_mut(handle.0) else {
                break;
            };
            if node.widget.needs_draw()
                && node.widget.draw(gfx)? == DrawStatus::Incomplete
            {
                return Ok(DrawStatus::Incomplete);
            }
            self.cursor = node.next;
        }

        self.cursor = None;
        self.pass_active = false;
        Ok(DrawStatus::Complete)
    }
}
