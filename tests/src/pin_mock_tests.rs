//! The engine driving embedded-hal pins, checked against pin transactions

use embedded_hal_mock::eh1::delay::NoopDelay;
use embedded_hal_mock::eh1::pin::{Mock as PinMock, State, Transaction};
use morse_core::{validate, EmbeddedHalSink, MorseConfig, MorseSequencer, TimingUnit, Transmitter};

fn sets(states: &[State]) -> Vec<Transaction> {
    states.iter().map(|state| Transaction::set(*state)).collect()
}

#[test]
fn test_letter_e_on_pin() {
    let pin = PinMock::new(&sets(&[State::Low, State::High, State::Low]));
    let mut sink = EmbeddedHalSink::new(pin, false);
    let mut sequencer = MorseSequencer::new(TimingUnit::DEFAULT);

    sequencer
        .emit(&validate("E").unwrap(), &mut sink, &mut NoopDelay::new())
        .unwrap();

    sink.into_inner().done();
}

#[test]
fn test_inverted_pin_idles_high() {
    let pin = PinMock::new(&sets(&[State::High, State::Low, State::High]));
    let mut sink = EmbeddedHalSink::new(pin, true);
    let mut sequencer = MorseSequencer::default();

    sequencer
        .emit(&validate("e").unwrap(), &mut sink, &mut NoopDelay::new())
        .unwrap();

    sink.into_inner().done();
}

#[test]
fn test_sos_on_pin() {
    use State::{High as On, Low as Off};

    let s = [Off, On, Off, On, Off, On, Off];
    let o = s;
    let expected: Vec<State> = s.iter().chain(&o).chain(&s).copied().collect();
    let pin = PinMock::new(&sets(&expected));
    let mut sink = EmbeddedHalSink::new(pin, false);

    MorseSequencer::default()
        .emit(&validate("SOS").unwrap(), &mut sink, &mut NoopDelay::new())
        .unwrap();

    sink.into_inner().done();
}

#[test]
fn test_rejected_message_leaves_pin_alone() {
    let pin = PinMock::new(&sets(&[State::Low, State::High, State::Low]));
    let mut sink = EmbeddedHalSink::new(pin, false);
    let mut transmitter = Transmitter::new(MorseConfig::default());

    let report = transmitter
        .transmit_all(["73", "t", "a1"], &mut sink, &mut NoopDelay::new())
        .unwrap();

    assert_eq!(report.sent, 1);
    assert_eq!(report.rejected, 2);
    sink.into_inner().done();
}
