//! Properties that hold for any message

use morse_core::encoder::symbols_for;
use morse_core::test_utils::timeline::{Event, Recorder};
use morse_core::{
    message_duration_us, validate, Level, MorseConfig, MorseSequencer, TimingUnit, TransmitReport,
    Transmitter, ValidationError,
};
use proptest::prelude::*;

fn record(message: &str, unit: TimingUnit) -> Recorder {
    let recorder = Recorder::new();
    let mut sequencer = MorseSequencer::new(unit);
    let message = validate(message).unwrap();
    sequencer
        .emit(&message, &mut recorder.sink(), &mut recorder.delay())
        .unwrap();
    recorder
}

fn writes(recorder: &Recorder) -> Vec<Level> {
    recorder
        .events()
        .into_iter()
        .filter_map(|e| match e {
            Event::Write(level) => Some(level),
            Event::DelayUs(_) => None,
        })
        .collect()
}

proptest! {
    #[test]
    fn prop_case_does_not_change_signal(message in "[a-zA-Z ,.!?]{0,24}") {
        let lower = record(&message.to_ascii_lowercase(), TimingUnit::DEFAULT);
        let upper = record(&message.to_ascii_uppercase(), TimingUnit::DEFAULT);

        prop_assert_eq!(lower.events(), upper.events());
    }

    #[test]
    fn prop_digit_anywhere_is_rejected(
        prefix in "[a-z ]{0,10}",
        digit in 0u32..10,
        suffix in "[a-z0-9 ]{0,10}",
    ) {
        let message = format!("{}{}{}", prefix, digit, suffix);
        let position = prefix.chars().count();

        prop_assert_eq!(
            validate(&message).unwrap_err(),
            ValidationError::UnsupportedCharacter {
                ch: char::from_digit(digit, 10).unwrap(),
                position,
            }
        );

        let recorder = Recorder::new();
        let mut transmitter = Transmitter::new(MorseConfig::default());
        let report = transmitter
            .transmit_all([message.as_str()], &mut recorder.sink(), &mut recorder.delay())
            .unwrap();
        prop_assert_eq!(report, TransmitReport { sent: 0, rejected: 1 });
        prop_assert_eq!(recorder.write_count(), 0);
    }

    #[test]
    fn prop_write_count_follows_symbols(message in "[a-zA-Z ]{0,24}") {
        let recorder = record(&message, TimingUnit::DEFAULT);
        let expected: usize = message
            .chars()
            .map(|ch| symbols_for(ch).map_or(0, |symbols| 2 * symbols.len()) + 1)
            .sum();

        prop_assert_eq!(recorder.write_count(), expected);
    }

    #[test]
    fn prop_line_returns_inactive(message in "[a-zA-Z ]{1,24}") {
        let writes = writes(&record(&message, TimingUnit::DEFAULT));

        prop_assert_eq!(writes.last(), Some(&Level::Inactive));
        for pair in writes.windows(2) {
            prop_assert!(!(pair[0].is_active() && pair[1].is_active()));
        }
    }

    #[test]
    fn prop_duration_scales_with_unit(message in "[a-z ]{0,16}", unit_us in 1u32..10_000) {
        let unit = TimingUnit::from_micros(unit_us).unwrap();
        let validated = validate(&message).unwrap();
        let base = message_duration_us(&validated, TimingUnit::from_micros(1).unwrap());

        prop_assert_eq!(message_duration_us(&validated, unit), base * unit_us as u64);
        prop_assert_eq!(record(&message, unit).total_us(), base * unit_us as u64);
    }

    #[test]
    fn prop_repeat_emission_is_identical(message in "[a-z ]{0,16}") {
        let recorder = Recorder::new();
        let mut sequencer = MorseSequencer::default();
        let validated = validate(&message).unwrap();

        sequencer.emit(&validated, &mut recorder.sink(), &mut recorder.delay()).unwrap();
        let first = recorder.events();
        sequencer.emit(&validated, &mut recorder.sink(), &mut recorder.delay()).unwrap();
        let both = recorder.events();

        prop_assert_eq!(&both[..first.len()], &first[..]);
        prop_assert_eq!(&both[first.len()..], &first[..]);
    }
}
