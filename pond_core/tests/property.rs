use pond_core::{Domain, RangeSelector, Zone, classify, codec, needle_angle};
use pond_core::settings::UserSettings;
use proptest::prelude::*;

const TEMP: Domain = Domain { min: 0.0, max: 50.0 };

fn finite_f32() -> impl Strategy<Value = f32> {
    -1.0e6f32..1.0e6
}

proptest! {
    // The selector invariant holds after any sequence of handle moves.
    #[test]
    fn selector_never_crosses_handles(
        moves in prop::collection::vec((any::<bool>(), -1000.0f32..1000.0), 1..40)
    ) {
        let mut sel = RangeSelector::new(TEMP, 1.0, 20.0, 35.0).unwrap();
        for (is_lower, value) in moves {
            if is_lower {
                sel.set_lower(value);
            } else {
                sel.set_upper(value);
            }
            prop_assert!(sel.lower() >= TEMP.min);
            prop_assert!(sel.upper() <= TEMP.max);
            prop_assert!(
                sel.upper() - sel.lower() >= 1.0 - 1e-4,
                "handles too close: {} .. {}",
                sel.lower(),
                sel.upper()
            );
        }
    }

    #[test]
    fn needle_angle_is_bounded_and_monotone(a in finite_f32(), b in finite_f32()) {
        let ang_a = needle_angle(a, TEMP.min, TEMP.max);
        let ang_b = needle_angle(b, TEMP.min, TEMP.max);
        prop_assert!((-45.0..=225.0).contains(&ang_a));
        prop_assert!((-45.0..=225.0).contains(&ang_b));
        if a <= b {
            prop_assert!(ang_a <= ang_b);
        }
    }

    // Zone classification agrees with the defining inequalities.
    #[test]
    fn classify_matches_definition(value in -20.0f32..70.0) {
        let (lower, upper, span) = (20.0f32, 35.0f32, 50.0f32);
        let zone = classify(value, lower, upper, span);
        let band = 0.1 * span;
        if value < lower || value > upper {
            prop_assert_eq!(zone, Zone::OutOfRange);
        } else if (lower - band..=lower + band).contains(&value) {
            prop_assert_eq!(zone, Zone::NearLower);
        } else if (upper - band..=upper + band).contains(&value) {
            prop_assert_eq!(zone, Zone::NearUpper);
        } else {
            prop_assert_eq!(zone, Zone::Normal);
        }
    }

    #[test]
    fn token_round_trip(
        temp_lower in 0.0f32..25.0,
        temp_upper in 26.0f32..50.0,
        humidity_lower in 0.0f32..49.0,
        humidity_upper in 50.0f32..100.0,
        notif_active in any::<bool>(),
    ) {
        let s = UserSettings {
            temp_lower,
            temp_upper,
            humidity_lower,
            humidity_upper,
            notif_active,
        };
        let token = codec::encode(&s).unwrap();
        prop_assert_eq!(codec::decode(&token).unwrap(), s);
    }
}
