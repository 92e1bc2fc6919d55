//! Wire encodings for a settings record.
//!
//! Three encodings share the same field names:
//! - the handoff token: base64 (standard alphabet, padded) over the JSON
//!   record, embedded in the mini-app deep link as `?start=<token>`;
//! - the mini-app save message: `{"action":"saveSettings","settings":{..}}`;
//! - the device query string: the five fields as GET query parameters with
//!   the notify flag flattened to 0/1.

use crate::error::DecodeError;
use crate::settings::UserSettings;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;

/// Encode a settings record into a handoff token.
///
/// # Errors
/// Returns a JSON serialization error if encoding fails.
pub fn encode(settings: &UserSettings) -> serde_json::Result<String> {
    serde_json::to_vec(settings).map(|bytes| STANDARD.encode(bytes))
}

/// Decode a handoff token back into a settings record.
///
/// # Errors
/// `DecodeError::InvalidBase64` on malformed base64,
/// `DecodeError::InvalidJson` on malformed JSON or missing/mistyped fields.
/// Callers fall back to `UserSettings::default()` rather than propagating.
pub fn decode(token: &str) -> Result<UserSettings, DecodeError> {
    let bytes = STANDARD
        .decode(token.trim())
        .map_err(|_| DecodeError::InvalidBase64)?;
    serde_json::from_slice(&bytes).map_err(|_| DecodeError::InvalidJson)
}

#[derive(serde::Deserialize)]
struct MiniAppWire {
    action: String,
    settings: UserSettings,
}

/// Parse the mini-app data message `{ action: "saveSettings", settings }`.
///
/// # Errors
/// `DecodeError::InvalidJson` on a malformed payload,
/// `DecodeError::UnknownAction` when the action is not `saveSettings`.
pub fn parse_mini_app(payload: &str) -> Result<UserSettings, DecodeError> {
    let wire: MiniAppWire =
        serde_json::from_str(payload).map_err(|_| DecodeError::InvalidJson)?;
    if wire.action != "saveSettings" {
        return Err(DecodeError::UnknownAction(wire.action));
    }
    Ok(wire.settings)
}

/// Query string for the device push, field order fixed.
///
/// Float formatting follows `Display`, so whole-number bounds render
/// without a fractional part (`25`, not `25.0`) exactly as the device
/// firmware expects.
pub fn device_query(s: &UserSettings) -> String {
    format!(
        "temp_lower={}&temp_upper={}&humidity_lower={}&humidity_upper={}&notif_active={}",
        s.temp_lower,
        s.temp_upper,
        s.humidity_lower,
        s.humidity_upper,
        u8::from(s.notif_active)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trip_preserves_settings() {
        let s = UserSettings {
            temp_lower: 18.5,
            temp_upper: 31.0,
            humidity_lower: 42.0,
            humidity_upper: 77.5,
            notif_active: false,
        };
        let token = encode(&s).unwrap();
        assert_eq!(decode(&token).unwrap(), s);
    }

    #[test]
    fn decode_rejects_garbage() {
        assert_eq!(decode("not base64!!!"), Err(DecodeError::InvalidBase64));
        // valid base64, but not JSON
        let token = STANDARD.encode(b"hello world");
        assert_eq!(decode(&token), Err(DecodeError::InvalidJson));
        // valid JSON missing required numeric fields
        let token = STANDARD.encode(br#"{"temp_lower": 20}"#);
        assert_eq!(decode(&token), Err(DecodeError::InvalidJson));
        // numeric field with the wrong type
        let token = STANDARD.encode(
            br#"{"temp_lower":"x","temp_upper":35,"humidity_lower":40,"humidity_upper":80,"notif_active":true}"#,
        );
        assert_eq!(decode(&token), Err(DecodeError::InvalidJson));
    }

    #[test]
    fn mini_app_message_requires_save_action() {
        let ok = r#"{"action":"saveSettings","settings":{"temp_lower":25,"temp_upper":30,"humidity_lower":40,"humidity_upper":80,"notif_active":true}}"#;
        let s = parse_mini_app(ok).unwrap();
        assert_eq!(s.temp_lower, 25.0);
        assert_eq!(s.temp_upper, 30.0);

        let other = r#"{"action":"reboot","settings":{"temp_lower":25,"temp_upper":30,"humidity_lower":40,"humidity_upper":80,"notif_active":true}}"#;
        assert_eq!(
            parse_mini_app(other),
            Err(DecodeError::UnknownAction("reboot".to_string()))
        );
        assert_eq!(parse_mini_app("{"), Err(DecodeError::InvalidJson));
    }

    #[test]
    fn device_query_flattens_notify_flag() {
        let s = UserSettings {
            temp_lower: 25.0,
            temp_upper: 30.0,
            humidity_lower: 40.0,
            humidity_upper: 80.0,
            notif_active: true,
        };
        assert_eq!(
            device_query(&s),
            "temp_lower=25&temp_upper=30&humidity_lower=40&humidity_upper=80&notif_active=1"
        );
        let s = UserSettings {
            notif_active: false,
            ..s
        };
        assert!(device_query(&s).ends_with("notif_active=0"));
    }
}
