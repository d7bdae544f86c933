//! Request header values

/// User agent identifying this client, with an optional configured suffix
pub fn user_agent(suffix: Option<&str>) -> String {
    let base = format!("TuneSearch/{}", crate::VERSION);
    match suffix.map(str::trim) {
        Some(s) if !s.is_empty() => format!("{} {}", base, s),
        _ => base,
    }
}

/// Accept header for JSON requests
pub fn accept_json() -> &'static str {
    "application/json,text/javascript,*/*;q=0.01"
}
