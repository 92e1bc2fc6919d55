use pond_config::load_toml;
use rstest::rstest;

fn base_toml() -> String {
    r#"
[device]
endpoint = "http://192.168.1.50/settings"

[source]
endpoint = "https://script.example.com/exec"

[access]
allowed_users = [123]
"#
    .to_string()
}

#[test]
fn accepts_minimal_config_with_defaults() {
    let cfg = load_toml(&base_toml()).expect("parse TOML");
    cfg.validate().expect("valid config should pass");

    assert_eq!(cfg.device.push_timeout_ms, 2_000);
    assert_eq!(cfg.source.poll_secs, 30);
    assert_eq!(cfg.source.fetch_timeout_ms, 5_000);
    assert_eq!(cfg.limits.temp_max, 50.0);
    assert_eq!(cfg.access.allowed_users, vec![123]);
}

#[test]
fn rejects_non_http_device_endpoint() {
    let toml = base_toml().replace("http://192.168.1.50/settings", "ftp://192.168.1.50");
    let cfg = load_toml(&toml).expect("parse TOML");
    let err = cfg.validate().expect_err("should reject ftp endpoint");
    assert!(format!("{err}").contains("device.endpoint must start with http:// or https://"));
}

#[rstest]
#[case("poll_secs = 0", "source.poll_secs must be >= 1")]
#[case("poll_secs = 90000", "unreasonably large")]
#[case("fetch_timeout_ms = 0", "source.fetch_timeout_ms must be >= 1")]
fn rejects_bad_source_settings(#[case] line: &str, #[case] needle: &str) {
    let toml = format!(
        r#"
[device]
endpoint = "http://192.168.1.50/settings"

[source]
endpoint = "https://script.example.com/exec"
{line}
"#
    );
    let cfg = load_toml(&toml).expect("parse TOML");
    let err = cfg.validate().expect_err("should reject bad source setting");
    assert!(
        format!("{err}").contains(needle),
        "unexpected message: {err}"
    );
}

#[rstest]
#[case("temp_min = 50.0\ntemp_max = 10.0", "limits.temp_min must be < limits.temp_max")]
#[case(
    "humidity_min = 80.0\nhumidity_max = 40.0",
    "limits.humidity_min must be < limits.humidity_max"
)]
#[case("min_separation = 0.0", "limits.min_separation must be > 0")]
#[case("min_separation = 60.0", "smaller than the narrowest domain")]
#[case("temp_max = nan", "must be a finite number")]
fn rejects_bad_limits(#[case] lines: &str, #[case] needle: &str) {
    let toml = format!("{}\n[limits]\n{lines}\n", base_toml());
    let cfg = load_toml(&toml).expect("parse TOML");
    let err = cfg.validate().expect_err("should reject bad limits");
    assert!(
        format!("{err}").contains(needle),
        "unexpected message: {err}"
    );
}

#[test]
fn missing_access_table_means_empty_allow_list() {
    let toml = r#"
[device]
endpoint = "http://192.168.1.50/settings"

[source]
endpoint = "https://script.example.com/exec"
"#;
    let cfg = load_toml(toml).expect("parse TOML");
    cfg.validate().expect("valid config should pass");
    assert!(cfg.access.allowed_users.is_empty());
}
