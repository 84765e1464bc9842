//! Memory usage from `free -m`.

use super::*;
use tracing::warn;

const FIELD_COUNT: usize = 6;

impl StatsCollector {
    /// Memory usage in MB, or an empty [`MemoryInfo`] on any failure.
    pub async fn collect_memory(&self) -> MemoryInfo {
        let result = self
            .run(HostCommand::MemoryReport)
            .await
            .and_then(|out| parse_memory(&out.stdout));
        match result {
            Ok(values) => MemoryInfo::from_megabytes(values),
            Err(e) => {
                warn!(error = %e, "memory report unavailable");
                MemoryInfo::empty()
            }
        }
    }
}

/// Parse `[total, used, free, shared, buff/cache, available]`.
///
/// Reads the `Mem:` row of a full `free -m` report; output without such a
/// row is read from its first non-empty line. Exactly six integer fields are
/// required.
pub(crate) fn parse_memory(output: &str) -> Result<[u64; FIELD_COUNT]> {
    let row = match output.lines().find_map(|l| l.trim_start().strip_prefix("Mem:")) {
        Some(rest) => rest,
        None => output
            .lines()
            .find(|l| !l.trim().is_empty())
            .ok_or_else(|| CollectError::Parse("empty memory report".into()))?,
    };

    let fields: Vec<u64> = row
        .split_whitespace()
        .map(|f| {
            f.parse::<u64>()
                .map_err(|_| CollectError::Parse(format!("non-numeric memory field: {f}")))
        })
        .collect::<Result<_>>()?;

    <[u64; FIELD_COUNT]>::try_from(fields).map_err(|fields| {
        CollectError::Parse(format!(
            "expected {FIELD_COUNT} memory fields, got {}",
            fields.len()
        ))
    })
}
