use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Once;

use timeline_core::Channel;

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(viewer_logging::initialize_for_tests);
}

#[test]
fn emit_reaches_every_handler_in_registration_order() {
    init_logging();
    let mut channel: Channel<u32> = Channel::new();
    let calls = Rc::new(RefCell::new(Vec::new()));

    for tag in ["first", "second", "third"] {
        let sink = calls.clone();
        channel.subscribe(move |value| sink.borrow_mut().push((tag, *value)));
    }

    channel.emit(&7);

    assert_eq!(
        *calls.borrow(),
        vec![("first", 7), ("second", 7), ("third", 7)]
    );
}

#[test]
fn every_emit_invokes_each_handler_exactly_once() {
    init_logging();
    let mut channel: Channel<i32> = Channel::new();
    let count = Rc::new(RefCell::new(0));

    let sink = count.clone();
    channel.subscribe(move |_| *sink.borrow_mut() += 1);

    channel.emit(&1);
    channel.emit(&2);
    channel.emit(&3);

    assert_eq!(*count.borrow(), 3);
}

#[test]
fn late_subscribers_miss_earlier_emits() {
    init_logging();
    let mut channel: Channel<&str> = Channel::new();
    channel.emit(&"lost");

    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = seen.clone();
    channel.subscribe(move |value| sink.borrow_mut().push(*value));

    channel.emit(&"kept");

    assert_eq!(*seen.borrow(), vec!["kept"]);
}

#[test]
fn unsubscribed_handlers_are_no_longer_invoked() {
    init_logging();
    let mut channel: Channel<u32> = Channel::new();
    let kept = Rc::new(RefCell::new(0));
    let dropped = Rc::new(RefCell::new(0));

    let sink = kept.clone();
    channel.subscribe(move |_| *sink.borrow_mut() += 1);
    let sink = dropped.clone();
    let subscription = channel.subscribe(move |_| *sink.borrow_mut() += 1);

    channel.emit(&1);
    assert!(channel.unsubscribe(subscription));
    channel.emit(&2);

    assert_eq!(*kept.borrow(), 2);
    assert_eq!(*dropped.borrow(), 1);
    assert_eq!(channel.subscriber_count(), 1);
}

#[test]
fn unsubscribe_with_stale_token_reports_false() {
    init_logging();
    let mut channel: Channel<u32> = Channel::new();
    let subscription = channel.subscribe(|_| {});

    assert!(channel.unsubscribe(subscription));
    assert!(!channel.unsubscribe(subscription));
}

#[test]
fn emit_on_empty_channel_is_a_no_op() {
    init_logging();
    let mut channel: Channel<u32> = Channel::new();
    assert_eq!(channel.subscriber_count(), 0);
    channel.emit(&42);
}
