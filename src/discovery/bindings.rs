// `show ip dhcp binding` parsing

use std::sync::LazyLock;

use regex::Regex;

static BINDING_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*(\d+\.\d+\.\d+\.\d+)\s+").expect("binding pattern"));

/// Leased addresses in output order. Headers and blank lines are ignored; no leases yields an empty list.
pub fn parse_bindings(text: &str) -> Vec<String> {
    text.lines()
        .filter_map(|line| BINDING_RE.captures(line).map(|caps| caps[1].to_string()))
        .collect()
}
