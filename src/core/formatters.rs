/// Converts a duration string to a total number of seconds.
///
/// Accepted shapes are `H:MM:SS`, `MM:SS`, and `SS`. Missing input and
/// anything that fails to parse degrade to `0` — this function never
/// reports an error, since duration strings come from a third-party
/// search backend and a zero duration is harmless downstream.
///
/// # Example
///
/// ```
/// use melodika::core::formatters::time_to_seconds;
///
/// assert_eq!(time_to_seconds(Some("1:02:03")), 3723);
/// assert_eq!(time_to_seconds(Some("2:30")), 150);
/// assert_eq!(time_to_seconds(None), 0);
/// ```
pub fn time_to_seconds(time_str: Option<&str>) -> u64 {
    let Some(time_str) = time_str else {
        return 0;
    };
    if time_str.is_empty() {
        return 0;
    }
    parse_colon_parts(time_str).unwrap_or(0)
}

fn parse_colon_parts(time_str: &str) -> Option<u64> {
    let parts: Vec<&str> = time_str.split(':').collect();
    match parts.as_slice() {
        [h, m, s] => Some(h.trim().parse::<u64>().ok()? * 3600 + m.trim().parse::<u64>().ok()? * 60 + s.trim().parse::<u64>().ok()?),
        [m, s] => Some(m.trim().parse::<u64>().ok()? * 60 + s.trim().parse::<u64>().ok()?),
        [s] => s.trim().parse::<u64>().ok(),
        // Four or more parts is not a duration we recognize
        _ => None,
    }
}
