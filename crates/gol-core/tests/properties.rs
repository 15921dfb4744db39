//! Property tests for the widget-layer invariants.

mod support;

use gol_core::ui::{KeyPhase, ScanCode, TouchPhase};
use gol_core::{
    BoundingBox, Button, Control, KeyEvent, ListBox, Message, RadioButton, TextEntry, Widget,
    WidgetList,
};
use proptest::prelude::*;
use support::{Recorder, draw_to_completion, scheme, within};

fn touch_phase() -> impl Strategy<Value = TouchPhase> {
    prop_oneof![
        Just(TouchPhase::Press),
        Just(TouchPhase::Release),
        Just(TouchPhase::StillPress),
        Just(TouchPhase::Move),
    ]
}

fn message() -> impl Strategy<Value = Message> {
    prop_oneof![
        (-20i32..140, -20i32..140, touch_phase())
            .prop_map(|(x, y, phase)| Message::Pointer { x, y, phase }),
        (0u16..4, any::<u8>()).prop_map(|(target, raw)| Message::key(target, KeyEvent::from_raw(raw))),
        (0u16..4, prop::char::range('a', 'z'))
            .prop_map(|(target, ch)| Message::key(target, KeyEvent::Char(ch))),
        (0u16..4, any::<bool>()).prop_map(|(target, pressed)| {
            let phase = if pressed { KeyPhase::Pressed } else { KeyPhase::Released };
            Message::key(target, KeyEvent::Scan { code: ScanCode::ENTER, phase })
        }),
    ]
}

fn disabled_widgets() -> Vec<Widget> {
    let bounds = BoundingBox::new(0, 0, 120, 120);
    vec![
        Button::new(1, bounds, scheme()).disabled().into(),
        RadioButton::new(1, bounds, scheme()).disabled().into(),
        ListBox::new(1, bounds, scheme())
            .with_lines("a\nb\nc")
            .unwrap()
            .disabled()
            .into(),
        TextEntry::new(1, bounds, 8, scheme()).unwrap().disabled().into(),
    ]
}

proptest! {
    #[test]
    fn prop_disabled_widgets_ignore_input(messages in prop::collection::vec(message(), 1..32)) {
        for widget in disabled_widgets() {
            for m in &messages {
                prop_assert_eq!(widget.translate(m), None);
            }
        }
    }

    #[test]
    fn prop_radio_group_has_one_checked(
        ops in prop::collection::vec((any::<bool>(), 0usize..4), 1..40)
    ) {
        let mut list = WidgetList::new();
        let members: Vec<_> = (0..4u16)
            .map(|i| {
                let top = i as i32 * 20;
                let mut radio = RadioButton::new(i, BoundingBox::new(0, top, 80, top + 18), scheme());
                if i == 0 {
                    radio = radio.group_leader();
                }
                list.add(radio).unwrap()
            })
            .collect();

        for (by_touch, index) in ops {
            if by_touch {
                list.message(&Message::press(10, index as i32 * 20 + 9), |_, _, _| true);
            } else {
                list.radio_check_set(members[0], index as u16).unwrap();
            }
            let checked: Vec<_> = members
                .iter()
                .filter(|h| list.radio_button(**h).unwrap().is_checked())
                .collect();
            prop_assert_eq!(checked.len(), 1);
            prop_assert_eq!(list.radio_check_get(members[3]).unwrap(), Some(index as u16));
        }
    }

    #[test]
    fn prop_single_select_at_most_one(toggles in prop::collection::vec(0usize..5, 1..40)) {
        let mut lb = ListBox::new(1, BoundingBox::new(0, 0, 100, 100), scheme())
            .single_select()
            .with_lines("a\nb\nc\nd\ne")
            .unwrap();
        let items: Vec<_> = lb.items().map(|(h, _)| h).collect();

        for index in toggles {
            let was = lb.item(items[index]).unwrap().is_selected();
            lb.selection_change(items[index]).unwrap();
            let selected: Vec<_> = lb.items().filter(|(_, i)| i.is_selected()).map(|(h, _)| h).collect();
            prop_assert!(selected.len() <= 1);
            prop_assert_eq!(lb.item(items[index]).unwrap().is_selected(), !was);
        }
    }

    #[test]
    fn prop_multi_select_toggles_only_target(toggles in prop::collection::vec(0usize..5, 1..40)) {
        let mut lb = ListBox::new(1, BoundingBox::new(0, 0, 100, 100), scheme())
            .with_lines("a\nb\nc\nd\ne")
            .unwrap();
        let items: Vec<_> = lb.items().map(|(h, _)| h).collect();
        let mut model = [false; 5];

        for index in toggles {
            lb.selection_change(items[index]).unwrap();
            model[index] = !model[index];
            let selected: Vec<bool> = lb.items().map(|(_, i)| i.is_selected()).collect();
            prop_assert_eq!(&selected[..], &model[..]);
        }
    }

    #[test]
    fn prop_text_entry_keeps_prefix(text in "\\PC{0,24}", capacity in 1usize..16) {
        let mut entry = TextEntry::new(1, BoundingBox::new(0, 0, 100, 20), capacity, scheme()).unwrap();
        entry.set_text(&text).unwrap();

        let expected: String = text.chars().take(capacity).collect();
        prop_assert_eq!(entry.text(), expected.as_str());
        prop_assert_eq!(entry.len(), expected.chars().count());
    }

    #[test]
    fn prop_char_add_remove_inverse(chars in prop::collection::vec(prop::char::range('!', '~'), 0..10)) {
        let mut entry = TextEntry::new(1, BoundingBox::new(0, 0, 100, 20), 10, scheme()).unwrap();
        entry.set_text("seed").unwrap();
        let mut added = 0;
        for ch in &chars {
            if entry.char_add(*ch).is_ok() {
                added += 1;
            }
        }
        for _ in 0..added {
            entry.char_remove().unwrap();
        }
        prop_assert_eq!(entry.text(), "seed");
    }

    #[test]
    fn prop_list_membership_matches_model(ops in prop::collection::vec((any::<bool>(), 0u16..8), 1..40)) {
        let mut list = WidgetList::new();
        let mut model: Vec<u16> = Vec::new();

        for (add, id) in ops {
            if add {
                list.add(Button::new(id, BoundingBox::new(0, 0, 10, 10), scheme())).unwrap();
                model.push(id);
            } else if let Some(pos) = model.iter().position(|m| *m == id) {
                list.delete_by_id(id).unwrap();
                model.remove(pos);
            } else {
                prop_assert!(list.delete_by_id(id).is_err());
            }
            let ids: Vec<u16> = list.iter().map(|(_, w)| w.id()).collect();
            prop_assert_eq!(&ids, &model);
        }
    }

    #[test]
    fn prop_draw_order_survives_busy(busy in 2usize..7, count in 1usize..5) {
        let mut list = WidgetList::new();
        let bounds: Vec<_> = (0..count as i32)
            .map(|i| BoundingBox::new(i * 40, 0, i * 40 + 30, 20))
            .collect();
        for (id, b) in bounds.iter().enumerate() {
            list.add(Button::new(id as u16, *b, scheme()).with_text("x")).unwrap();
        }

        let mut gfx = Recorder::new().busy_every(busy);
        draw_to_completion(&mut list, &mut gfx);

        let owners: Vec<Option<usize>> = gfx
            .ops
            .iter()
            .map(|op| bounds.iter().position(|b| within(*b, op.anchor())))
            .collect();
        prop_assert!(owners.iter().all(Option::is_some));
        prop_assert!(owners.windows(2).all(|w| w[0] <= w[1]));
        prop_assert_eq!(gfx.texts().len(), count);
        prop_assert!(list.iter().all(|(_, w)| !w.requests().any()));
    }
}
