//! Input queue between interrupt-driven drivers and the UI loop.
//!
//! Touch and keypad drivers push [`Message`]s from their tasks; the UI loop
//! drains them and hands each one to [`WidgetList::message`].
//!
//! [`WidgetList::message`]: crate::list::WidgetList::message

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::{Channel, Receiver, Sender};

use crate::ui::core::Message;

/// Messages buffered before senders start failing
pub const MESSAGE_CAPACITY: usize = 8;

pub static MESSAGE_CHANNEL: Channel<CriticalSectionRawMutex, Message, MESSAGE_CAPACITY> =
    Channel::new();

pub fn message_sender() -> Sender<'static, CriticalSectionRawMutex, Message, MESSAGE_CAPACITY> {
    MESSAGE_CHANNEL.sender()
}

pub fn message_receiver() -> Receiver<'static, CriticalSectionRawMutex, Message, MESSAGE_CAPACITY>
{
    MESSAGE_CHANNEL.receiver()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channel_is_fifo_and_bounded() {
        let sender = message_sender();
        let receiver = message_receiver();
        while receiver.try_receive().is_ok() {}

        for x in 0..MESSAGE_CAPACITY as i32 {
            sender.try_send(Message::press(x, 0)).unwrap();
        }
        assert!(sender.try_send(Message::press(99, 0)).is_err());

        assert_eq!(receiver.try_receive().unwrap(), Message::press(0, 0));
        while receiver.try_receive().is_ok() {}
    }
}
