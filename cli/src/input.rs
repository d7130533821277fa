//! Referral edge files
//!
//! `.json` files hold an array of `{"referrer": .., "candidate": ..}` objects.
//! Anything else is read as lines of `referrer,candidate`; blank lines, `#`
//! comments and a `referrer,candidate` header are ignored.

use anyhow::{bail, Context, Result};
use referral_graph::ReferralEdge;
use std::path::Path;

pub fn load_edges(path: &Path) -> Result<Vec<ReferralEdge>> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("reading referral file {}", path.display()))?;

    let is_json = path
        .extension()
        .map_or(false, |ext| ext.eq_ignore_ascii_case("json"));

    if is_json {
        serde_json::from_str(&contents)
            .with_context(|| format!("parsing JSON referrals in {}", path.display()))
    } else {
        parse_lines(&contents)
    }
}

fn parse_lines(contents: &str) -> Result<Vec<ReferralEdge>> {
    let mut edges = Vec::new();

    for (line_no, line) in contents.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let Some((referrer, candidate)) = line.split_once(',') else {
            bail!("line {}: expected `referrer,candidate`, got {:?}", line_no + 1, line);
        };
        let (referrer, candidate) = (referrer.trim(), candidate.trim());

        if line_no == 0 && referrer == "referrer" && candidate == "candidate" {
            continue;
        }
        if referrer.is_empty() || candidate.is_empty() {
            bail!("line {}: empty user id", line_no + 1);
        }

        edges.push(ReferralEdge::new(referrer, candidate));
    }

    Ok(edges)
}
