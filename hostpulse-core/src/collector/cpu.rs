//! CPU utilization from a single `top -bn1` sample.
//!
//! The value is instantaneous, not an interval average, so it can be noisy.

use super::*;
use tracing::warn;

impl StatsCollector {
    /// CPU usage as e.g. `"12.3%"`, or `"N/A"` on any failure.
    pub async fn collect_cpu(&self) -> String {
        let result = self
            .run(HostCommand::CpuSample)
            .await
            .and_then(|out| parse_cpu_usage(&out.stdout));
        match result {
            Ok(usage) => usage,
            Err(e) => {
                warn!(error = %e, "cpu sample unavailable");
                CPU_UNAVAILABLE.to_string()
            }
        }
    }
}

/// Extract the idle share from the `Cpu(s)` line and render `100 - idle`.
///
/// Accepts both procps layouts:
/// `%Cpu(s):  2.0 us,  1.0 sy,  0.0 ni, 97.0 id, ...` and
/// `Cpu(s):  2.0%us,  1.0%sy,  0.0%ni, 97.0%id, ...`.
pub(crate) fn parse_cpu_usage(output: &str) -> Result<String> {
    let line = output
        .lines()
        .find(|l| l.contains("Cpu(s)"))
        .ok_or_else(|| CollectError::Parse("no Cpu(s) line".into()))?;
    let (_, fields) = line
        .split_once(':')
        .ok_or_else(|| CollectError::Parse(format!("malformed cpu line: {line}")))?;

    let idle = fields
        .split(',')
        .find_map(|field| {
            let field = field.trim();
            let value = field
                .strip_suffix("%id")
                .or_else(|| field.strip_suffix("id"))?;
            value.trim().parse::<f64>().ok()
        })
        .ok_or_else(|| CollectError::Parse(format!("no idle value in: {line}")))?;

    if !(0.0..=100.0).contains(&idle) {
        return Err(CollectError::Parse(format!("idle out of range: {idle}")));
    }
    Ok(format!("{}%", format_percent(100.0 - idle)))
}

/// One decimal place, no trailing `.0`.
fn format_percent(value: f64) -> String {
    let rounded = (value * 10.0).round() / 10.0;
    if rounded.fract() == 0.0 {
        format!("{}", rounded as i64)
    } else {
        format!("{rounded:.1}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fake::{Scripted, ScriptedRunner};

    const TOP_OUTPUT: &str = "\
top - 10:15:01 up 12 days,  3:02,  1 user,  load average: 0.08, 0.03, 0.01
Tasks: 123 total,   1 running, 122 sleeping,   0 stopped,   0 zombie
%Cpu(s):  6.0 us,  3.0 sy,  0.0 ni, 90.0 id,  1.0 wa,  0.0 hi,  0.0 si,  0.0 st
MiB Mem :   1000.0 total,    500.0 free,    400.0 used,     90.0 buff/cache
";

    #[test]
    fn idle_ninety_is_ten_percent() {
        assert_eq!(parse_cpu_usage(TOP_OUTPUT).unwrap(), "10%");
    }

    #[test]
    fn keeps_one_decimal() {
        let out = "%Cpu(s):  1.5 us,  0.6 sy,  0.0 ni, 97.9 id,  0.0 wa";
        assert_eq!(parse_cpu_usage(out).unwrap(), "2.1%");
    }

    #[test]
    fn fully_idle_without_space() {
        let out = "%Cpu(s):  0.0 us,  0.0 sy,  0.0 ni,100.0 id,  0.0 wa";
        assert_eq!(parse_cpu_usage(out).unwrap(), "0%");
    }

    #[test]
    fn legacy_percent_layout() {
        let out = "Cpu(s):  2.0%us,  1.0%sy,  0.0%ni, 95.5%id,  1.5%wa";
        assert_eq!(parse_cpu_usage(out).unwrap(), "4.5%");
    }

    #[test]
    fn rejects_output_without_cpu_line() {
        assert!(parse_cpu_usage("garbage").is_err());
        assert!(parse_cpu_usage("%Cpu(s): lots of noise").is_err());
    }

    #[tokio::test]
    async fn failure_degrades_to_sentinel() {
        let collector = StatsCollector::new(Arc::new(ScriptedRunner::new()));
        assert_eq!(collector.collect_cpu().await, "N/A");

        let collector = StatsCollector::new(Arc::new(
            ScriptedRunner::new().with(HostCommand::CpuSample, Scripted::Ok("nonsense".into())),
        ));
        assert_eq!(collector.collect_cpu().await, "N/A");
    }
}
