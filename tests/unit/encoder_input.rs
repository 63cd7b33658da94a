//! Unit tests for the encoder input path: pins, decoder, queue and pump.

use macro_rail::config::DecoderOptions;
use macro_rail::input::{EncoderDecoder, EncoderEvent, EncoderPins, EventPump, EventQueue};
use macro_rail::sim::{SimClock, SimInputPin};
use macro_rail::Clock;

/// One clockwise detent starting from the resting state (A and B high).
const CW_DETENT: [(bool, bool); 4] = [(false, true), (false, false), (true, false), (true, true)];

#[test]
fn test_detent_becomes_one_rotate_event() {
    let queue = EventQueue::new();
    let mut decoder = EncoderDecoder::new(&queue, &DecoderOptions::default());

    for (a, b) in CW_DETENT {
        decoder.on_channels(a, b);
    }
    for (a, b) in CW_DETENT.iter().rev().skip(1).chain(core::iter::once(&(true, true))) {
        decoder.on_channels(*a, *b);
    }

    assert_eq!(queue.pop(), Some(EncoderEvent::Rotate(1)));
    assert_eq!(queue.pop(), Some(EncoderEvent::Rotate(-1)));
    assert_eq!(queue.pop(), None);
}

#[test]
fn test_pins_sampled_into_queue() {
    let queue = EventQueue::new();
    let mut decoder = EncoderDecoder::new(&queue, &DecoderOptions::default());
    let (a, b, sw) = (SimInputPin::new(true), SimInputPin::new(true), SimInputPin::new(true));
    let mut pins = EncoderPins::new(a.clone(), b.clone(), sw.clone());

    let mut now = 0;
    for (level_a, level_b) in CW_DETENT {
        a.set(level_a);
        b.set(level_b);
        pins.sample(&mut decoder, now).unwrap();
        now += 1;
    }

    sw.set(false);
    pins.sample(&mut decoder, 100).unwrap();
    // Bounce inside the refractory window
    sw.set(true);
    pins.sample(&mut decoder, 110).unwrap();
    sw.set(false);
    pins.sample(&mut decoder, 120).unwrap();

    assert_eq!(queue.pop(), Some(EncoderEvent::Rotate(1)));
    assert_eq!(queue.pop(), Some(EncoderEvent::ButtonPressed));
    assert_eq!(queue.pop(), None);
}

#[test]
fn test_full_queue_drops_newest() {
    let queue = EventQueue::new();
    let mut decoder = EncoderDecoder::new(&queue, &DecoderOptions::default());

    for _ in 0..20 {
        for (a, b) in CW_DETENT {
            decoder.on_channels(a, b);
        }
    }
    decoder.on_button(false, 1000);

    assert_eq!(queue.dropped(), 5);
    let mut delivered = 0;
    while let Some(event) = queue.pop() {
        assert_eq!(event, EncoderEvent::Rotate(1));
        delivered += 1;
    }
    assert_eq!(delivered, 16);
}

#[test]
fn test_coalesced_burst_flushes_before_press() {
    let queue = EventQueue::new();
    let clock = SimClock::new();
    let mut pump = EventPump::new(&queue, clock.clone()).with_coalescing(150);

    queue.push(EncoderEvent::Rotate(1));
    queue.push(EncoderEvent::Rotate(1));
    queue.push(EncoderEvent::Rotate(1));
    queue.push(EncoderEvent::ButtonPressed);

    assert_eq!(pump.next(0), Some(EncoderEvent::Rotate(1)));
    assert_eq!(pump.next(0), Some(EncoderEvent::ButtonPressed));
    assert_eq!(pump.next(0), None);
}

#[test]
fn test_pump_times_out_on_quiet_queue() {
    let queue = EventQueue::new();
    let clock = SimClock::new();
    let mut pump = EventPump::new(&queue, clock.clone());

    assert_eq!(pump.next(50), None);
    assert!(clock.now_ms() >= 50);
    assert!(!pump.wait_for_press(Some(200)));
}
