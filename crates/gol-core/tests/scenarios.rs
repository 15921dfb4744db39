//! End-to-end flows through the widget list with a recording driver.

mod support;

use gol_core::ui::{ButtonAction, ListAction, ListMove, RadioAction, ScanCode, TextAction};
use gol_core::widgets::ItemStatus;
use gol_core::{
    Action, BoundingBox, Button, Control, DrawStatus, KeyEvent, ListBox, Message, RadioButton,
    StyleScheme, TextEntry, WidgetList,
};
use support::{Op, Recorder, draw_to_completion, scheme, within};

fn deliver(list: &mut WidgetList, message: Message) -> Vec<Action> {
    let mut actions = Vec::new();
    list.message(&message, |_, action, _| {
        actions.push(action);
        true
    });
    actions
}

#[test]
fn test_button_press_and_release() {
    let mut list = WidgetList::new();
    let bounds = BoundingBox::new(10, 10, 50, 30);
    let button = list
        .add(Button::new(1, bounds, scheme()).with_text("OK"))
        .unwrap();

    let mut gfx = Recorder::new();
    draw_to_completion(&mut list, &mut gfx);
    assert_eq!(gfx.texts(), ["OK"]);

    let actions = deliver(&mut list, Message::press(20, 20));
    assert_eq!(actions, [Action::Button(ButtonAction::Pressed)]);
    assert!(list.button(button).unwrap().is_pressed());
    assert_eq!(list.focused(), Some(button));

    let mut gfx = Recorder::new();
    draw_to_completion(&mut list, &mut gfx);
    let pressed_face = StyleScheme::default().color1;
    assert!(gfx.ops.iter().any(|op| matches!(
        op,
        Op::FillRect { color, .. } if *color == pressed_face
    )));

    let actions = deliver(&mut list, Message::release(20, 20));
    assert_eq!(actions, [Action::Button(ButtonAction::Released)]);
    assert!(!list.button(button).unwrap().is_pressed());
}

#[test]
fn test_single_select_list_toggles() {
    let mut list = WidgetList::new();
    let handle = list
        .add(
            ListBox::new(2, BoundingBox::new(0, 0, 100, 100), scheme())
                .single_select()
                .with_lines("A\nB\nC")
                .unwrap(),
        )
        .unwrap();

    let lb = list.list_box_mut(handle).unwrap();
    let items: Vec<_> = lb.items().map(|(h, _)| h).collect();
    lb.selection_change(items[1]).unwrap();
    assert_eq!(lb.selection_get(None), Some(items[1]));
    assert_eq!(lb.items().filter(|(_, i)| i.is_selected()).count(), 1);

    lb.selection_change(items[1]).unwrap();
    assert_eq!(lb.selection_get(None), None);

    lb.selection_change(items[0]).unwrap();
    lb.selection_change(items[2]).unwrap();
    let selected: Vec<_> = lb.items().map(|(_, i)| i.is_selected()).collect();
    assert_eq!(selected, [false, false, true]);
}

#[test]
fn test_list_touch_and_keys() {
    let mut list = WidgetList::new();
    let handle = list
        .add(
            ListBox::new(2, BoundingBox::new(0, 0, 100, 100), scheme())
                .single_select()
                .with_lines("A\nB\nC")
                .unwrap(),
        )
        .unwrap();
    let mut gfx = Recorder::new();
    draw_to_completion(&mut list, &mut gfx);

    // Below the last row clamps to the last item
    let actions = deliver(&mut list, Message::press(50, 90));
    assert_eq!(actions, [Action::List(ListAction::Touchscreen)]);
    let lb = list.list_box(handle).unwrap();
    assert_eq!(lb.item_focus_get(), Some(2));
    assert_eq!(lb.selection_get(None), lb.last_item());

    let up = Message::key(2, KeyEvent::pressed(ScanCode::UP));
    assert_eq!(deliver(&mut list, up), [Action::List(ListAction::Move(ListMove::Up))]);
    assert_eq!(list.list_box(handle).unwrap().item_focus_get(), Some(1));

    let enter = Message::key(2, KeyEvent::pressed(ScanCode::ENTER));
    assert_eq!(deliver(&mut list, enter), [Action::List(ListAction::Selected)]);
    let lb = list.list_box(handle).unwrap();
    assert_eq!(lb.selection_get(None), lb.focus_item());

    let mut gfx = Recorder::new();
    draw_to_completion(&mut list, &mut gfx);
    assert!(!list.list_box(handle).unwrap().items().any(|(_, i)| i.status().redraw));
}

#[test]
fn test_list_item_insert_after() {
    let mut lb = ListBox::new(3, BoundingBox::new(0, 0, 100, 60), scheme());
    let first = lb.item_add(None, "first", None, ItemStatus::default(), 10).unwrap();
    lb.item_add(None, "last", None, ItemStatus::default(), 30).unwrap();
    lb.item_add(Some(first), "middle", None, ItemStatus::SELECTED, 20).unwrap();

    let data: Vec<_> = lb.items().map(|(_, i)| i.data()).collect();
    assert_eq!(data, [10, 20, 30]);
    let selected = lb.selection_get(None).unwrap();
    assert_eq!(lb.item(selected).unwrap().text(), "middle");
}

#[test]
fn test_radio_group_check_by_id() {
    let mut list = WidgetList::new();
    let members: Vec<_> = (1..=3)
        .map(|id| {
            let top = (id as i32 - 1) * 20;
            let mut radio = RadioButton::new(id, BoundingBox::new(0, top, 80, top + 18), scheme());
            if id == 1 {
                radio = radio.group_leader();
            }
            list.add(radio).unwrap()
        })
        .collect();

    list.radio_check_set(members[0], 2).unwrap();
    assert_eq!(list.radio_check_get(members[2]).unwrap(), Some(2));

    let actions = deliver(&mut list, Message::press(10, 50));
    assert_eq!(actions, [Action::Radio(RadioAction::Checked)]);
    assert_eq!(list.radio_check_get(members[0]).unwrap(), Some(3));

    let space = Message::key(1, KeyEvent::pressed(ScanCode::SPACE));
    deliver(&mut list, space);
    assert_eq!(list.radio_check_get(members[1]).unwrap(), Some(1));

    let checked = members
        .iter()
        .filter(|h| list.radio_button(**h).unwrap().is_checked())
        .count();
    assert_eq!(checked, 1);
}

#[test]
fn test_text_entry_typing() {
    let mut list = WidgetList::new();
    let handle = list
        .add(TextEntry::new(4, BoundingBox::new(0, 0, 100, 20), 5, scheme()).unwrap())
        .unwrap();

    for ch in "hi".chars() {
        let actions = deliver(&mut list, Message::key(4, KeyEvent::Char(ch)));
        assert_eq!(actions, [Action::Text(TextAction::AddChar(ch))]);
    }
    assert_eq!(list.text_entry(handle).unwrap().text(), "hi");

    let backspace = Message::key(4, KeyEvent::pressed(ScanCode::BACKSPACE));
    assert_eq!(deliver(&mut list, backspace), [Action::Text(TextAction::DelChar)]);
    assert_eq!(list.text_entry(handle).unwrap().text(), "h");

    for ch in "ello world".chars() {
        deliver(&mut list, Message::key(4, KeyEvent::Char(ch)));
    }
    assert_eq!(list.text_entry(handle).unwrap().text(), "hello");

    let mut gfx = Recorder::new();
    draw_to_completion(&mut list, &mut gfx);
    assert_eq!(gfx.texts(), ["hello"]);
}

#[test]
fn test_draw_all_keeps_list_order_while_busy() {
    let mut list = WidgetList::new();
    let bounds: Vec<_> = (0..3)
        .map(|i| BoundingBox::new(i * 60, 0, i * 60 + 50, 30))
        .collect();
    for (id, b) in bounds.iter().enumerate() {
        list.add(Button::new(id as u16, *b, scheme()).with_text("go"))
            .unwrap();
    }

    let mut gfx = Recorder::new().busy_every(3);
    let calls = draw_to_completion(&mut list, &mut gfx);
    assert!(calls > 1, "busy driver should force resumption");

    let owners: Vec<usize> = gfx
        .ops
        .iter()
        .map(|op| {
            bounds
                .iter()
                .position(|b| within(*b, op.anchor()))
                .expect("primitive outside every widget")
        })
        .collect();
    assert!(owners.windows(2).all(|w| w[0] <= w[1]));
    assert_eq!(owners.first(), Some(&0));
    assert_eq!(owners.last(), Some(&2));
    assert_eq!(gfx.texts(), ["go", "go", "go"]);
}

#[test]
fn test_failed_render_retries() {
    let mut list = WidgetList::new();
    list.add(Button::new(1, BoundingBox::new(0, 0, 40, 20), scheme()))
        .unwrap();

    let mut gfx = Recorder::new();
    gfx.fail_once();
    let Ok(status) = list.draw_all(&mut gfx);
    assert_eq!(status, DrawStatus::Incomplete);
    assert!(gfx.ops.is_empty());

    let Ok(status) = list.draw_all(&mut gfx);
    assert_eq!(status, DrawStatus::Complete);
    assert!(!gfx.ops.is_empty());
}

#[test]
fn test_hide_erases_with_background() {
    let mut list = WidgetList::new();
    let bounds = BoundingBox::new(5, 5, 45, 25);
    let handle = list.add(Button::new(1, bounds, scheme())).unwrap();
    let mut gfx = Recorder::new();
    draw_to_completion(&mut list, &mut gfx);

    list.hide(handle).unwrap();
    let mut gfx = Recorder::new();
    draw_to_completion(&mut list, &mut gfx);
    let background = StyleScheme::default().common_background_color;
    assert_eq!(
        gfx.ops,
        [Op::FillRect {
            area: bounds.to_rectangle(),
            color: background
        }]
    );
}

#[test]
fn test_hide_wins_over_full_redraw() {
    let mut list = WidgetList::new();
    let bounds = BoundingBox::new(5, 5, 45, 25);
    let handle = list
        .add(Button::new(1, bounds, scheme()).with_text("OK"))
        .unwrap();
    let mut gfx = Recorder::new();
    draw_to_completion(&mut list, &mut gfx);

    list.redraw(handle).unwrap();
    list.hide(handle).unwrap();
    assert!(list.widget(handle).unwrap().requests().full);

    let mut gfx = Recorder::new();
    draw_to_completion(&mut list, &mut gfx);
    let background = StyleScheme::default().common_background_color;
    assert_eq!(
        gfx.ops,
        [Op::FillRect {
            area: bounds.to_rectangle(),
            color: background
        }]
    );
    assert!(!list.widget(handle).unwrap().needs_draw());
}

#[test]
fn test_list_scrolls_up_by_the_deficit() {
    let mut list = WidgetList::new();
    let handle = list
        .add(
            ListBox::new(2, BoundingBox::new(0, 0, 100, 31), scheme())
                .with_lines("0\n1\n2\n3\n4")
                .unwrap(),
        )
        .unwrap();
    let mut gfx = Recorder::new();
    draw_to_completion(&mut list, &mut gfx);
    assert_eq!(list.list_box(handle).unwrap().scroll_offset(), 0);

    list.list_box_mut(handle).unwrap().item_focus_set(4);
    draw_to_completion(&mut list, &mut gfx);
    let lb = list.list_box(handle).unwrap();
    let row = lb.text_height();
    let scrolled = lb.scroll_offset();
    assert!(scrolled < -row, "row 1 is now above the visible band");

    // Row 1 ends up flush with the top of the band: offset moves by exactly
    // the distance row 1 sat above it
    list.list_box_mut(handle).unwrap().item_focus_set(1);
    let mut gfx = Recorder::new();
    draw_to_completion(&mut list, &mut gfx);
    assert_eq!(list.list_box(handle).unwrap().scroll_offset(), -row);
    assert_eq!(gfx.texts(), ["1", "2"]);
}

#[test]
fn test_toggle_button_latches_through_messages() {
    let mut list = WidgetList::new();
    let button = list
        .add(
            Button::new(1, BoundingBox::new(10, 10, 50, 30), scheme())
                .with_text("On")
                .toggle(),
        )
        .unwrap();

    assert!(deliver(&mut list, Message::press(20, 20)).is_empty());
    let actions = deliver(&mut list, Message::release(20, 20));
    assert_eq!(actions, [Action::Button(ButtonAction::Pressed)]);
    assert!(list.button(button).unwrap().is_pressed());

    // Drawing in between leaves the latch alone
    let mut gfx = Recorder::new();
    draw_to_completion(&mut list, &mut gfx);
    assert!(list.button(button).unwrap().is_pressed());

    assert!(deliver(&mut list, Message::press(20, 20)).is_empty());
    let actions = deliver(&mut list, Message::release(20, 20));
    assert_eq!(actions, [Action::Button(ButtonAction::Released)]);
    assert!(!list.button(button).unwrap().is_pressed());

    // The alternate enter code toggles it from the keyboard
    let enter = Message::key(1, KeyEvent::released(ScanCode::ENTER_ALT));
    assert_eq!(deliver(&mut list, enter), [Action::Button(ButtonAction::Pressed)]);
    assert!(list.button(button).unwrap().is_pressed());
}

#[test]
fn test_press_during_suspended_draw_is_repainted() {
    let mut list = WidgetList::new();
    let button = list
        .add(Button::new(1, BoundingBox::new(10, 10, 50, 30), scheme()).with_text("OK"))
        .unwrap();

    // The pass starts, then the display turns busy on the second poll
    let mut gfx = Recorder::new().busy_every(2);
    let Ok(status) = list.draw_all(&mut gfx);
    assert_eq!(status, DrawStatus::Incomplete);

    deliver(&mut list, Message::press(20, 20));
    assert!(list.button(button).unwrap().is_pressed());

    draw_to_completion(&mut list, &mut gfx);
    assert!(
        list.widget(button).unwrap().requests().full,
        "the press waits for the next pass"
    );

    gfx.ops.clear();
    draw_to_completion(&mut list, &mut gfx);
    let pressed_face = StyleScheme::default().color1;
    assert!(gfx.ops.iter().any(|op| matches!(
        op,
        Op::FillRect { color, .. } if *color == pressed_face
    )));
    assert!(!list.widget(button).unwrap().needs_draw());
}

#[test]
fn test_hide_during_suspended_draw_erases_next_pass() {
    let mut list = WidgetList::new();
    let bounds = BoundingBox::new(5, 5, 45, 25);
    let handle = list
        .add(Button::new(1, bounds, scheme()).with_text("OK"))
        .unwrap();

    let mut gfx = Recorder::new().busy_every(2);
    let Ok(status) = list.draw_all(&mut gfx);
    assert_eq!(status, DrawStatus::Incomplete);

    list.hide(handle).unwrap();
    draw_to_completion(&mut list, &mut gfx);
    assert!(list.widget(handle).unwrap().requests().hide);

    gfx.ops.clear();
    draw_to_completion(&mut list, &mut gfx);
    let background = StyleScheme::default().common_background_color;
    assert_eq!(
        gfx.ops,
        [Op::FillRect {
            area: bounds.to_rectangle(),
            color: background
        }]
    );
    assert!(!list.widget(handle).unwrap().needs_draw());
}

#[test]
fn test_single_widget_draw_keeps_late_requests() {
    let mut list = WidgetList::new();
    let handle = list
        .add(TextEntry::new(4, BoundingBox::new(0, 0, 100, 20), 8, scheme()).unwrap())
        .unwrap();

    let mut gfx = Recorder::new().busy_every(2);
    let Ok(status) = list.draw(handle, &mut gfx);
    assert_eq!(status, DrawStatus::Incomplete);
    assert!(list.widget(handle).unwrap().needs_draw());

    deliver(&mut list, Message::key(4, KeyEvent::Char('a')));
    let mut calls = 0;
    while list.draw(handle, &mut gfx) != Ok(DrawStatus::Complete) {
        calls += 1;
        assert!(calls < 100, "draw never completed");
    }
    assert!(list.widget(handle).unwrap().requests().full);

    gfx.ops.clear();
    while list.draw(handle, &mut gfx) != Ok(DrawStatus::Complete) {}
    assert_eq!(gfx.texts(), ["a"]);
    assert!(!list.widget(handle).unwrap().needs_draw());
}
