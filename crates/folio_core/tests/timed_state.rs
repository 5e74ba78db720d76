use folio_core::{StateMachine, TimerQueue};
use std::cell::Cell;
use std::rc::Rc;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
enum Banner {
    Hidden,
    Shown,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
enum Signal {
    Show,
    Elapsed,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
enum Timer {
    Banner,
    Other,
}

#[test]
fn rescheduled_timer_drives_state_once() {
    let entered = Rc::new(Cell::new(0));
    let counter = Rc::clone(&entered);
    let mut banner = StateMachine::builder(Banner::Hidden)
        .on(Banner::Hidden, Signal::Show, Banner::Shown)
        .on(Banner::Shown, Signal::Show, Banner::Shown)
        .on(Banner::Shown, Signal::Elapsed, Banner::Hidden)
        .on_enter(Banner::Shown, move || counter.set(counter.get() + 1))
        .build();
    let mut timers = TimerQueue::new();

    banner.send(Signal::Show);
    timers.schedule(Timer::Banner, 2_000);
    timers.schedule(Timer::Other, 1_000);

    // Showing again restarts the window
    banner.send(Signal::Show);
    timers.schedule(Timer::Banner, 3_500);
    assert_eq!(timers.len(), 2);

    assert_eq!(timers.drain_due(2_000), vec![Timer::Other]);
    assert!(banner.is_in(Banner::Shown));

    for timer in timers.drain_due(3_500) {
        if timer == Timer::Banner {
            banner.send(Signal::Elapsed);
        }
    }
    assert!(banner.is_in(Banner::Hidden));
    assert!(timers.is_empty());
    assert_eq!(entered.get(), 2);
    assert!(!banner.can_send(Signal::Elapsed));
}

#[test]
fn cancelled_timer_never_fires() {
    let mut timers = TimerQueue::new();
    timers.schedule(Timer::Banner, 5_000);
    assert!(timers.cancel(&Timer::Banner));
    assert!(!timers.cancel(&Timer::Banner));
    assert!(timers.drain_due(10_000).is_empty());
}
