use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use goodscart_core::config::{AppConfig, LoadOptions};
use toml::Value;

pub fn run(options: LoadOptions) -> String {
    let explicit_path = options.config_path.clone();
    let overrides = options.overrides.clone();
    let config = match AppConfig::load(options) {
        Ok(config) => config,
        Err(error) => return format!("config validation failed: {error}"),
    };

    let config_file_path = detect_config_path(explicit_path.as_deref());
    let config_file_doc = load_config_file_doc(config_file_path.as_deref());
    let source = |key_path: &str, env_key: &str, overridden: bool| {
        field_source(
            key_path,
            env_key,
            overridden,
            config_file_doc.as_ref(),
            config_file_path.as_deref(),
        )
    };

    let mut lines =
        vec!["effective config (source precedence: flag > env > file > default):".to_string()];

    lines.push(render_line(
        "cart.delivery_threshold",
        &config.cart.delivery_threshold.to_string(),
        source(
            "cart.delivery_threshold",
            "GOODSCART_CART_DELIVERY_THRESHOLD",
            overrides.delivery_threshold.is_some(),
        ),
    ));
    lines.push(render_line(
        "cart.delivery_fee",
        &config.cart.delivery_fee.to_string(),
        source(
            "cart.delivery_fee",
            "GOODSCART_CART_DELIVERY_FEE",
            overrides.delivery_fee.is_some(),
        ),
    ));

    let catalog_path = config
        .catalog
        .path
        .as_ref()
        .map(|path| path.display().to_string())
        .unwrap_or_else(|| "<demo catalog>".to_string());
    lines.push(render_line(
        "catalog.path",
        &catalog_path,
        source("catalog.path", "GOODSCART_CATALOG_PATH", overrides.catalog_path.is_some()),
    ));

    lines.push(render_line(
        "logging.level",
        &config.logging.level,
        source("logging.level", "GOODSCART_LOGGING_LEVEL", overrides.log_level.is_some()),
    ));
    lines.push(render_line(
        "logging.format",
        &format!("{:?}", config.logging.format),
        source("logging.format", "GOODSCART_LOGGING_FORMAT", overrides.log_format.is_some()),
    ));

    lines.join("\n")
}

fn detect_config_path(explicit_path: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit_path {
        return path.exists().then(|| path.to_path_buf());
    }

    let root = PathBuf::from("goodscart.toml");
    if root.exists() {
        return Some(root);
    }

    let nested = PathBuf::from("config/goodscart.toml");
    if nested.exists() {
        return Some(nested);
    }

    None
}

fn load_config_file_doc(path: Option<&Path>) -> Option<Value> {
    let path = path?;
    let raw = fs::read_to_string(path).ok()?;
    raw.parse::<Value>().ok()
}

fn field_source(
    key_path: &str,
    env_key: &str,
    overridden: bool,
    config_file_doc: Option<&Value>,
    config_file_path: Option<&Path>,
) -> String {
    if overridden {
        return "flag".to_string();
    }

    if env::var_os(env_key).is_some() {
        return format!("env ({env_key})");
    }

    if let Some(doc) = config_file_doc {
        if contains_path(doc, key_path) {
            let file_path = config_file_path
                .map(|path| path.display().to_string())
                .unwrap_or_else(|| "config file".to_string());
            return format!("file ({file_path})");
        }
    }

    "default".to_string()
}

fn contains_path(root: &Value, key_path: &str) -> bool {
    let mut current = root;
    for key in key_path.split('.') {
        let Some(next) = current.get(key) else {
            return false;
        };
        current = next;
    }
    true
}

fn render_line(key: &str, value: &str, source: String) -> String {
    format!("- {key} = {value} (source: {source})")
}
