use std::env;
use std::fs;
use std::sync::{Mutex, OnceLock};

use goodscart_cli::commands::{config, show, simulate, summary};
use goodscart_core::config::{ConfigOverrides, LoadOptions};
use rust_decimal::Decimal;
use serde_json::Value;
use tempfile::TempDir;

const CATALOG: &str = r#"[
  {"title": "Fruit tea", "desc": "Seasonal fruit", "pic": "g1.png", "price": 10, "sellNumber": 12, "favorRate": 90},
  {"title": "Milk tea", "desc": "Brown sugar", "pic": "g2.png", "price": 25, "sellNumber": 8, "favorRate": 95}
]"#;

#[test]
fn show_renders_every_row_and_empty_footer() {
    with_env(&[], || {
        let (_dir, options) = catalog_options();
        let result = show::run(options);
        assert_eq!(result.exit_code, 0);

        let lines: Vec<&str> = result.output.lines().collect();
        assert_eq!(lines[0], "[ ] #0 Fruit tea $10 (Selling 12, Rate 90%) [-] 0 [+]");
        assert_eq!(lines[1], "[ ] #1 Milk tea $25 (Selling 8, Rate 95%) [-] 0 [+]");
        assert!(result.output.contains("Cart (empty)  Total $0.00"));
        assert!(result.output.contains("Delivery fee: $5  |  Still need $30 to deliver"));
    });
}

#[test]
fn simulate_applies_events_in_order() {
    with_env(&[], || {
        let (_dir, options) = catalog_options();
        let events = tokens(&["+0", "+1", "-1"]);
        let result = simulate::run(options, &events);
        assert_eq!(result.exit_code, 0, "unexpected failure: {}", result.output);

        assert!(result.output.contains("[*] #0 Fruit tea"));
        assert!(result.output.contains("[ ] #1 Milk tea $25 (Selling 8, Rate 95%) [-] 0 [+]"));
        assert!(result.output.contains("Cart (1)  Total $10.00"));
        assert!(result.output.contains("Still need $20 to deliver"));
        assert!(!result.output.contains("~bounce~"));
    });
}

#[test]
fn simulate_reports_out_of_range_index() {
    with_env(&[], || {
        let (_dir, options) = catalog_options();
        let result = simulate::run(options, &tokens(&["+0", "+7"]));
        assert_eq!(result.exit_code, 5);

        let payload = parse_payload(&result.output);
        assert_eq!(payload["command"], "simulate");
        assert_eq!(payload["status"], "error");
        assert_eq!(payload["error_class"], "index_out_of_range");
    });
}

#[test]
fn simulate_rejects_unknown_event_syntax() {
    with_env(&[], || {
        let (_dir, options) = catalog_options();
        let result = simulate::run(options, &tokens(&["add 1"]));
        assert_eq!(result.exit_code, 4);

        let payload = parse_payload(&result.output);
        assert_eq!(payload["error_class"], "invalid_event");
    });
}

#[test]
fn summary_json_reports_threshold_met() {
    with_env(&[], || {
        let (_dir, options) = catalog_options();
        let result = summary::run(options, &tokens(&["inc:0", "inc:1"]), true);
        assert_eq!(result.exit_code, 0);

        let payload = parse_payload(&result.output);
        assert_eq!(payload["command"], "summary");
        assert_eq!(payload["status"], "ok");
        assert_eq!(payload["data"]["total_selected_count"], 2);
        assert_eq!(payload["data"]["has_items_in_cart"], true);
        assert_eq!(payload["data"]["meets_delivery_threshold"], true);
        assert_eq!(payload["message"], "2 item(s), total $35.00, free delivery threshold met");
    });
}

#[test]
fn summary_uses_threshold_from_env() {
    with_env(&[("GOODSCART_CART_DELIVERY_THRESHOLD", "50")], || {
        let (_dir, options) = catalog_options();
        let result = summary::run(options, &tokens(&["+0", "+1"]), false);
        assert_eq!(result.exit_code, 0);
        assert_eq!(result.output, "2 item(s), total $35.00, 15 more for free delivery");
    });
}

#[test]
fn missing_catalog_file_fails_with_catalog_class() {
    with_env(&[], || {
        let dir = TempDir::new().expect("tempdir");
        let options = LoadOptions {
            overrides: ConfigOverrides {
                catalog_path: Some(dir.path().join("missing.json")),
                ..ConfigOverrides::default()
            },
            ..LoadOptions::default()
        };

        let result = show::run(options);
        assert_eq!(result.exit_code, 3);
        assert_eq!(parse_payload(&result.output)["error_class"], "catalog");
    });
}

#[test]
fn invalid_config_fails_with_config_class() {
    with_env(&[], || {
        let options = LoadOptions {
            overrides: ConfigOverrides {
                delivery_fee: Some(Decimal::new(-5, 0)),
                ..ConfigOverrides::default()
            },
            ..LoadOptions::default()
        };

        let result = summary::run(options, &[], true);
        assert_eq!(result.exit_code, 2);
        assert_eq!(parse_payload(&result.output)["error_class"], "config_validation");
    });
}

#[test]
fn config_reports_sources() {
    with_env(&[("GOODSCART_CART_DELIVERY_FEE", "4")], || {
        let options = LoadOptions {
            overrides: ConfigOverrides {
                delivery_threshold: Some(Decimal::from(45)),
                ..ConfigOverrides::default()
            },
            ..LoadOptions::default()
        };

        let output = config::run(options);
        assert!(output.contains("- cart.delivery_threshold = 45 (source: flag)"));
        assert!(output
            .contains("- cart.delivery_fee = 4 (source: env (GOODSCART_CART_DELIVERY_FEE))"));
        assert!(output.contains("- catalog.path = <demo catalog> (source: default)"));
    });
}

fn catalog_options() -> (TempDir, LoadOptions) {
    let dir = TempDir::new().expect("tempdir");
    let path = dir.path().join("catalog.json");
    fs::write(&path, CATALOG).expect("write catalog");

    let options = LoadOptions {
        overrides: ConfigOverrides { catalog_path: Some(path), ..ConfigOverrides::default() },
        ..LoadOptions::default()
    };
    (dir, options)
}

fn tokens(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| value.to_string()).collect()
}

fn parse_payload(output: &str) -> Value {
    serde_json::from_str(output).expect("command output should be valid JSON")
}

fn with_env(vars: &[(&str, &str)], test_fn: impl FnOnce()) {
    static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();
    let _guard =
        ENV_LOCK.get_or_init(|| Mutex::new(())).lock().expect("env mutex should not be poisoned");

    let keys = [
        "GOODSCART_CART_DELIVERY_THRESHOLD",
        "GOODSCART_CART_DELIVERY_FEE",
        "GOODSCART_CATALOG_PATH",
        "GOODSCART_LOGGING_LEVEL",
        "GOODSCART_LOGGING_FORMAT",
        "GOODSCART_LOG_LEVEL",
        "GOODSCART_LOG_FORMAT",
    ];

    let previous_values: Vec<(&str, Option<String>)> =
        keys.iter().map(|key| (*key, env::var(key).ok())).collect();

    for key in &keys {
        env::remove_var(key);
    }
    for (key, value) in vars {
        env::set_var(key, value);
    }

    test_fn();

    for (key, value) in previous_values {
        if let Some(value) = value {
            env::set_var(key, value);
        } else {
            env::remove_var(key);
        }
    }
}
