use std::env;
use std::sync::OnceLock;

pub const OUTPUT_PRETTY_ENV: &str = "KEYWORDS_OUTPUT_PRETTY";

static JSON_MODE: OnceLock<bool> = OnceLock::new();

pub fn set_json_mode(v: bool) {
    let _ = JSON_MODE.set(v);
}

pub fn json_mode() -> bool {
    *JSON_MODE.get().unwrap_or(&false)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OutputConfig {
    pub pretty: bool,
}

impl OutputConfig {
    pub fn from_env() -> Self {
        let pretty = is_truthy(env::var(OUTPUT_PRETTY_ENV).ok().as_deref());
        OutputConfig { pretty }
    }
}

fn is_truthy(v: Option<&str>) -> bool {
    match v {
        Some(v) => v.eq_ignore_ascii_case("1") || v.eq_ignore_ascii_case("true") || v.eq_ignore_ascii_case("yes"),
        None => false,
    }
}
