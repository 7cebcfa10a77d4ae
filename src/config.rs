use url::Url;

use crate::active_section::DEFAULT_REFERENCE_LINE;
use crate::contact::RelaySettings;
use crate::telemetry::{LogLevel, DEFAULT_LOG_LEVEL};

pub const DEFAULT_RELAY_ENDPOINT: &str = "https://api.emailjs.com/api/v1.0/email/send";
pub const DEFAULT_SCROLLED_THRESHOLD: f64 = 50.0;

const REFERENCE_LINE_BOUNDS: (f64, f64) = (0.0, 1_000.0);
const SCROLLED_THRESHOLD_BOUNDS: (f64, f64) = (0.0, 1_000.0);

#[derive(Clone, Debug, PartialEq)]
pub struct SiteConfig {
    /// `None` when any relay credential is missing.
    pub relay: Option<RelaySettings>,
    pub log_level: LogLevel,
    pub reference_line: f64,
    pub scrolled_threshold: f64,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

impl SiteConfig {
    /// Values baked in at compile time, the way a bundler inlines its
    /// build environment.
    pub fn from_build_env() -> Self {
        Self::from_lookup(|name| {
            let value = match name {
                "EMAILJS_SERVICE_ID" => option_env!("EMAILJS_SERVICE_ID"),
                "EMAILJS_TEMPLATE_ID" => option_env!("EMAILJS_TEMPLATE_ID"),
                "EMAILJS_PUBLIC_KEY" => option_env!("EMAILJS_PUBLIC_KEY"),
                "EMAILJS_ENDPOINT" => option_env!("EMAILJS_ENDPOINT"),
                "FOLIO_LOG_LEVEL" => option_env!("FOLIO_LOG_LEVEL"),
                "FOLIO_NAV_REFERENCE_LINE_PX" => option_env!("FOLIO_NAV_REFERENCE_LINE_PX"),
                "FOLIO_NAV_SCROLLED_THRESHOLD_PX" => option_env!("FOLIO_NAV_SCROLLED_THRESHOLD_PX"),
                _ => None,
            };
            value.map(str::to_string)
        })
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let relay = parse_relay_settings(&lookup);
        let log_level = parse_non_empty_string(&lookup, "FOLIO_LOG_LEVEL")
            .and_then(|value| LogLevel::parse(&value))
            .unwrap_or(DEFAULT_LOG_LEVEL);
        let reference_line = parse_f64_with_bounds(
            &lookup,
            "FOLIO_NAV_REFERENCE_LINE_PX",
            DEFAULT_REFERENCE_LINE,
            REFERENCE_LINE_BOUNDS,
        );
        let scrolled_threshold = parse_f64_with_bounds(
            &lookup,
            "FOLIO_NAV_SCROLLED_THRESHOLD_PX",
            DEFAULT_SCROLLED_THRESHOLD,
            SCROLLED_THRESHOLD_BOUNDS,
        );

        Self {
            relay,
            log_level,
            reference_line,
            scrolled_threshold,
        }
    }
}

fn parse_relay_settings(lookup: &impl Fn(&str) -> Option<String>) -> Option<RelaySettings> {
    let service_id = parse_non_empty_string(lookup, "EMAILJS_SERVICE_ID")?;
    let template_id = parse_non_empty_string(lookup, "EMAILJS_TEMPLATE_ID")?;
    let public_key = parse_non_empty_string(lookup, "EMAILJS_PUBLIC_KEY")?;
    let endpoint = parse_http_url(lookup, "EMAILJS_ENDPOINT").or_else(|| Url::parse(DEFAULT_RELAY_ENDPOINT).ok())?;

    Some(RelaySettings {
        service_id,
        template_id,
        public_key,
        endpoint,
    })
}

fn parse_non_empty_string(lookup: &impl Fn(&str) -> Option<String>, name: &str) -> Option<String> {
    lookup(name)
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn parse_f64_with_bounds(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &str,
    default: f64,
    bounds: (f64, f64),
) -> f64 {
    lookup(name)
        .and_then(|value| value.trim().parse::<f64>().ok())
        .filter(|value| (bounds.0..=bounds.1).contains(value))
        .unwrap_or(default)
}

fn parse_http_url(lookup: &impl Fn(&str) -> Option<String>, name: &str) -> Option<Url> {
    let value = parse_non_empty_string(lookup, name)?;
    let parsed = Url::parse(&value).ok()?;

    if parsed.scheme() == "http" || parsed.scheme() == "https" {
        Some(parsed)
    } else {
        None
    }
}
