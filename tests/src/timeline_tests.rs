//! Signal timelines of whole messages, interval by interval

use morse_core::test_utils::scenarios::{PANGRAM, SOS, WITH_DIGITS, WITH_PUNCTUATION};
use morse_core::test_utils::timeline::{Event, Recorder};
use morse_core::{
    message_duration_us, validate, Level, MorseConfig, MorseSequencer, RejectPolicy, SequencerState,
    TimingUnit, TransmitReport, Transmitter,
};
use rstest::rstest;

const T: u32 = 150_000;

fn off(units: u32) -> (Option<Level>, u32) {
    (Some(Level::Inactive), units * T)
}

fn on(units: u32) -> (Option<Level>, u32) {
    (Some(Level::Active), units * T)
}

fn record(message: &str) -> Recorder {
    let recorder = Recorder::new();
    let mut sequencer = MorseSequencer::new(TimingUnit::DEFAULT);
    let message = validate(message).unwrap();

    sequencer
        .emit(&message, &mut recorder.sink(), &mut recorder.delay())
        .unwrap();

    assert_eq!(sequencer.current_state(), SequencerState::Done);
    recorder
}

#[test]
fn test_sos_timeline() {
    let recorder = record(SOS);

    let s = [off(1), on(1), off(1), on(1), off(1), on(1)];
    let o = [off(1), on(3), off(1), on(3), off(1), on(3)];
    let mut expected = Vec::new();
    expected.extend_from_slice(&s);
    expected.push(off(3));
    expected.extend_from_slice(&o);
    expected.push(off(3));
    expected.extend_from_slice(&s);
    expected.push(off(3));
    expected.push((None, 4 * T));

    assert_eq!(recorder.intervals(), expected);
    assert_eq!(recorder.total_us(), 5_550_000);
}

#[test]
fn test_message_ends_with_seven_units_of_silence() {
    for message in [SOS, "e", "paris", PANGRAM] {
        let recorder = record(message);
        assert_eq!(recorder.trailing_silence_us(), 7 * T as u64, "message {:?}", message);
    }
}

#[test]
fn test_level_written_before_delay() {
    let recorder = record("e");

    assert_eq!(
        recorder.events(),
        [
            Event::Write(Level::Inactive),
            Event::DelayUs(T),
            Event::Write(Level::Active),
            Event::DelayUs(T),
            Event::Write(Level::Inactive),
            Event::DelayUs(3 * T),
            Event::DelayUs(4 * T),
        ]
    );
}

#[test]
fn test_space_is_silent_letter_gap() {
    let recorder = record("e e");

    // The space writes inactive and waits 3T on top of the letter gap before it
    let intervals = recorder.intervals();
    assert_eq!(
        intervals,
        [
            off(1),
            on(1),
            off(3),
            off(3),
            off(1),
            on(1),
            off(3),
            (None, 4 * T),
        ]
    );
}

#[rstest]
#[case("", 4 * T as u64)]
#[case("e", 9 * T as u64)]
#[case("t", 11 * T as u64)]
#[case(SOS, 37 * T as u64)]
fn test_duration_matches_recording(#[case] message: &str, #[case] expected_us: u64) {
    let recorder = record(message);

    assert_eq!(recorder.total_us(), expected_us);
    assert_eq!(
        message_duration_us(&validate(message).unwrap(), TimingUnit::DEFAULT),
        expected_us
    );
}

#[test]
fn test_empty_message_only_holds() {
    let recorder = record("");

    assert_eq!(recorder.write_count(), 0);
    assert_eq!(recorder.events(), [Event::DelayUs(4 * T)]);
}

#[test]
fn test_rejected_messages_never_touch_the_line() {
    for message in WITH_DIGITS {
        let recorder = Recorder::new();
        let mut transmitter = Transmitter::new(MorseConfig::default());

        let report = transmitter
            .transmit_all([*message], &mut recorder.sink(), &mut recorder.delay())
            .unwrap();

        assert_eq!(report, TransmitReport { sent: 0, rejected: 1 });
        assert!(recorder.events().is_empty(), "message {:?}", message);
    }
}

#[test]
fn test_punctuation_is_silent() {
    for message in WITH_PUNCTUATION {
        let recorder = record(message);
        let letters = message.chars().filter(char::is_ascii_alphabetic).count();
        let active = recorder
            .events()
            .iter()
            .filter(|e| **e == Event::Write(Level::Active))
            .count();

        if letters == 0 {
            assert_eq!(active, 0, "message {:?}", message);
        } else {
            assert!(active > 0, "message {:?}", message);
        }
    }
}

#[test]
fn test_abort_policy_keeps_earlier_messages() {
    let recorder = Recorder::new();
    let config = MorseConfig {
        on_reject: RejectPolicy::Abort,
        ..MorseConfig::default()
    };
    let mut transmitter = Transmitter::new(config);

    let result = transmitter.transmit_all(
        ["e", "x9", "t"],
        &mut recorder.sink(),
        &mut recorder.delay(),
    );

    assert!(result.is_err());
    assert_eq!(recorder.intervals(), [off(1), on(1), off(3), (None, 4 * T)]);
}

#[test]
fn test_sink_failure_mid_message() {
    let recorder = Recorder::failing_after(3);
    let mut sequencer = MorseSequencer::new(TimingUnit::DEFAULT);
    let message = validate(SOS).unwrap();

    let result = sequencer.emit(&message, &mut recorder.sink(), &mut recorder.delay());

    assert!(result.is_err());
    assert_eq!(sequencer.current_state(), SequencerState::Failed);
    assert_eq!(recorder.write_count(), 3);
    assert_eq!(recorder.intervals(), [off(1), on(1), off(1)]);
}
