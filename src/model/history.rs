//! Prior-callsign summaries built from the service's `call_history` field.

/// Returns the callsigns in `history` other than `current`, in service order.
///
/// Every occurrence of the current callsign is removed, wherever it sits in
/// the list. Blank tokens are skipped.
pub fn prior_callsigns<'a>(history: &'a str, current: &str) -> Vec<&'a str> {
    let current = current.trim();
    history
        .split(',')
        .map(str::trim)
        .filter(|call| !call.is_empty() && !call.eq_ignore_ascii_case(current))
        .collect()
}

/// Formats the prior-callsign line shown in an expanded record.
///
/// Returns `None` when the operator has only ever held one callsign. The
/// count comes from `call_count`, not from the number of listed priors.
pub fn prior_callsign_summary(call_count: u32, history: &str, current: &str) -> Option<String> {
    if call_count <= 1 {
        return None;
    }
    let prior = call_count - 1;
    let plural = if prior > 1 { "s" } else { "" };
    let list = prior_callsigns(history, current).join(", ");
    Some(format!("{prior} Prior Callsign{plural}: {list}"))
}
