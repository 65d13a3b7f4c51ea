//! Published port mappings as printed by the runtime's `port` command.

/// Bind addresses meaning "every interface", shown as loopback URLs.
const WILDCARD_ADDRESSES: &[&str] = &["0.0.0.0", "[::]"];

const LOOPBACK_URL: &str = "http://localhost";

/// One line of port output, e.g. `80/tcp -> 0.0.0.0:8080`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortMapping {
    line: String,
}

impl PortMapping {
    #[must_use]
    pub fn new(line: &str) -> Self {
        Self {
            line: line.trim().to_string(),
        }
    }

    /// The raw line.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.line
    }

    /// The line with a wildcard bind address replaced by `http://localhost`.
    ///
    /// Only a side of the arrow whose host is exactly a wildcard is rewritten.
    #[must_use]
    pub fn display(&self) -> String {
        self.line
            .split("->")
            .map(rewrite_wildcard_host)
            .collect::<Vec<_>>()
            .join("->")
    }

    /// The `http://…` side of the arrow, if the host address was a wildcard.
    #[must_use]
    pub fn url(&self) -> Option<String> {
        self.display()
            .split("->")
            .map(str::trim)
            .find(|side| side.starts_with(LOOPBACK_URL))
            .map(str::to_owned)
    }
}

/// `0.0.0.0:8080` becomes `http://localhost:8080`; leading whitespace is kept.
fn rewrite_wildcard_host(side: &str) -> String {
    let address = side.trim_start();
    let lead = &side[..side.len() - address.len()];
    WILDCARD_ADDRESSES
        .iter()
        .find_map(|wildcard| {
            address
                .strip_prefix(*wildcard)
                .and_then(|rest| rest.strip_prefix(':'))
        })
        .map_or_else(
            || side.to_string(),
            |port| format!("{lead}{LOOPBACK_URL}:{port}"),
        )
}

/// Split port output into mappings, skipping blank lines.
#[must_use]
pub fn parse_port_output(output: &str) -> Vec<PortMapping> {
    output
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(PortMapping::new)
        .collect()
}
