use anyhow::{Context, Result};
use chrono::{DateTime, FixedOffset};
use gitflower_core::domain::{RepoRecord, Timestamp};
use gitflower_core::ports::Clock;
use std::io::Write;

const MINUTE: i64 = 60;
const HOUR: i64 = 60 * MINUTE;
const DAY: i64 = 24 * HOUR;

/// Renders repository records for the terminal
pub struct Renderer<'a> {
    clock: &'a dyn Clock,
}

impl<'a> Renderer<'a> {
    pub fn new(clock: &'a dyn Clock) -> Self {
        Self { clock }
    }

    pub fn table<W: Write>(&self, out: &mut W, repos: &[RepoRecord]) -> Result<()> {
        if repos.is_empty() {
            writeln!(out, "No repositories found")?;
            return Ok(());
        }

        let headers = ["PATH", "BRANCHES", "MR", "SIZE", "LAST UPDATE", "STATUS"];
        let rows: Vec<[String; 6]> = repos
            .iter()
            .map(|repo| {
                [
                    repo.relative_path.clone(),
                    repo.branch_count.to_string(),
                    repo.mr_count.to_string(),
                    format_size(repo.size),
                    self.last_update(repo.last_update),
                    status(repo),
                ]
            })
            .collect();

        let mut widths = headers.map(str::len);
        for row in &rows {
            for (width, cell) in widths.iter_mut().zip(row) {
                *width = (*width).max(cell.chars().count());
            }
        }

        write_row(out, &headers.map(String::from), &widths)?;
        write_row(out, &headers.map(|h| "-".repeat(h.len())), &widths)?;
        for row in &rows {
            write_row(out, row, &widths)?;
        }
        Ok(())
    }

    /// Multi-line detail view of one repository
    pub fn detail<W: Write>(&self, out: &mut W, repo: &RepoRecord) -> Result<()> {
        writeln!(out, "{}", repo.relative_path)?;
        writeln!(out, "  Path: {}", repo.path.display())?;

        if !repo.is_valid {
            writeln!(out, "  Error: {}", repo.error.as_deref().unwrap_or("unknown error"))?;
            return Ok(());
        }

        writeln!(out, "  Size: {}", format_size(repo.size))?;
        match repo.last_update {
            Some(ts) => writeln!(
                out,
                "  Last update: {} ({})",
                self.last_update(Some(ts)),
                format_rfc3339(ts)
            )?,
            None => writeln!(out, "  Last update: never")?,
        }
        writeln!(out, "  Branches: {}", repo.branch_count)?;
        writeln!(out, "  Merge requests: {}", repo.mr_count)?;
        Ok(())
    }

    fn last_update(&self, timestamp: Option<Timestamp>) -> String {
        match timestamp {
            Some(ts) => format_relative(ts, self.clock.now()),
            None => "never".to_string(),
        }
    }
}

pub fn json<W: Write, T: serde::Serialize + ?Sized>(out: &mut W, value: &T) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, value).context("Failed to serialize to JSON")?;
    writeln!(out)?;
    Ok(())
}

fn write_row<W: Write>(out: &mut W, cells: &[String; 6], widths: &[usize; 6]) -> Result<()> {
    let line = cells
        .iter()
        .zip(widths)
        .map(|(cell, &width)| format!("{cell:<width$}"))
        .collect::<Vec<_>>()
        .join("  ");
    writeln!(out, "{}", line.trim_end())?;
    Ok(())
}

fn status(repo: &RepoRecord) -> String {
    match (repo.is_valid, &repo.error) {
        (true, _) => "OK".to_string(),
        (false, Some(error)) => format!("ERROR: {error}"),
        (false, None) => "ERROR".to_string(),
    }
}

/// Human readable byte size: `512 B`, `1.5 KB`, `3.2 MB`, ...
pub fn format_size(bytes: u64) -> String {
    const UNIT: u64 = 1024;
    if bytes < UNIT {
        return format!("{bytes} B");
    }

    let mut div = UNIT;
    let mut exp = 0;
    let mut n = bytes / UNIT;
    while n >= UNIT && exp < 5 {
        div *= UNIT;
        exp += 1;
        n /= UNIT;
    }

    let prefix = ['K', 'M', 'G', 'T', 'P', 'E'][exp];
    format!("{:.1} {}B", bytes as f64 / div as f64, prefix)
}

/// "just now", "5 minutes ago", ... up to 30 days, then the calendar date in
/// the committer's own timezone.
pub fn format_relative(ts: Timestamp, now: i64) -> String {
    let elapsed = now - ts.seconds;

    let ago = |n: i64, unit: &str| {
        if n == 1 {
            format!("1 {unit} ago")
        } else {
            format!("{n} {unit}s ago")
        }
    };

    match elapsed {
        e if e < MINUTE => "just now".to_string(),
        e if e < HOUR => ago(e / MINUTE, "minute"),
        e if e < DAY => ago(e / HOUR, "hour"),
        e if e < 30 * DAY => ago(e / DAY, "day"),
        _ => format_date(ts),
    }
}

/// RFC 3339 rendering of a commit timestamp
pub fn format_rfc3339(ts: Timestamp) -> String {
    to_datetime(ts)
        .map(|dt| dt.to_rfc3339())
        .unwrap_or_else(|| ts.to_string())
}

fn format_date(ts: Timestamp) -> String {
    to_datetime(ts)
        .map(|dt| dt.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| ts.to_string())
}

fn to_datetime(ts: Timestamp) -> Option<DateTime<FixedOffset>> {
    let offset = FixedOffset::east_opt(ts.offset_minutes * 60)?;
    DateTime::from_timestamp(ts.seconds, 0).map(|utc| utc.with_timezone(&offset))
}

#[cfg(test)]
mod tests {
    use super::*;
    use gitflower_core::ports::FixedClock;
    use std::path::Path;

    const NOW: i64 = 1_700_000_000;

    fn record(relative: &str) -> RepoRecord {
        RepoRecord::new(&Path::new("/srv/repos").join(relative), relative)
    }

    fn render_table(repos: &[RepoRecord]) -> Result<String> {
        let clock = FixedClock(NOW);
        let mut out = Vec::new();
        Renderer::new(&clock).table(&mut out, repos)?;
        Ok(String::from_utf8(out)?)
    }

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(0), "0 B");
        assert_eq!(format_size(1023), "1023 B");
        assert_eq!(format_size(1024), "1.0 KB");
        assert_eq!(format_size(1536), "1.5 KB");
        assert_eq!(format_size(5 * 1024 * 1024), "5.0 MB");
        assert_eq!(format_size(u64::MAX), "16.0 EB");
    }

    #[test]
    fn test_format_relative() {
        let at = |secs_ago: i64| format_relative(Timestamp::new(NOW - secs_ago, 0), NOW);

        assert_eq!(at(5), "just now");
        assert_eq!(at(60), "1 minute ago");
        assert_eq!(at(45 * MINUTE), "45 minutes ago");
        assert_eq!(at(HOUR), "1 hour ago");
        assert_eq!(at(5 * HOUR), "5 hours ago");
        assert_eq!(at(DAY), "1 day ago");
        assert_eq!(at(12 * DAY), "12 days ago");
        // 2023-10-14 22:13:20 UTC
        assert_eq!(at(31 * DAY), "2023-10-14");
    }

    #[test]
    fn test_date_uses_committer_offset() {
        // 2023-11-14 22:13:20 UTC is already the 15th two hours east
        let ts = Timestamp::new(NOW, 120);
        assert_eq!(format_date(ts), "2023-11-15");
        assert_eq!(format_rfc3339(ts), "2023-11-15T00:13:20+02:00");
    }

    #[test]
    fn test_table_output() -> Result<()> {
        let mut ok = record("org/proj.git");
        ok.branch_count = 2;
        ok.mr_count = 1;
        ok.size = 2048;
        ok.last_update = Some(Timestamp::new(NOW - 2 * HOUR, 0));

        let broken = record("broken.git").into_invalid("not a valid git repository: boom");

        let table = render_table(&[ok, broken])?;
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("PATH"));
        assert!(lines[0].contains("BRANCHES"));
        assert!(lines[1].starts_with("----"));
        assert!(lines[2].contains("org/proj.git"));
        assert!(lines[2].contains("2.0 KB"));
        assert!(lines[2].contains("2 hours ago"));
        assert!(lines[2].ends_with("OK"));
        assert!(lines[3].contains("never"));
        assert!(lines[3].ends_with("ERROR: not a valid git repository: boom"));
        Ok(())
    }

    #[test]
    fn test_detail_output() -> Result<()> {
        let clock = FixedClock(NOW);
        let renderer = Renderer::new(&clock);

        let mut repo = record("org/proj.git");
        repo.last_update = Some(Timestamp::new(NOW - 3 * DAY, 0));
        let mut out = Vec::new();
        renderer.detail(&mut out, &repo)?;
        let text = String::from_utf8(out)?;
        assert!(text.starts_with("org/proj.git\n"));
        assert!(text.contains("Last update: 3 days ago (2023-11-11T22:13:20+00:00)"));
        assert!(text.contains("Merge requests: 0"));

        let broken = record("broken.git").into_invalid("boom");
        let mut out = Vec::new();
        renderer.detail(&mut out, &broken)?;
        let text = String::from_utf8(out)?;
        assert!(text.contains("Error: boom"));
        assert!(!text.contains("Branches"));
        Ok(())
    }

    #[test]
    fn test_table_empty() -> Result<()> {
        assert_eq!(render_table(&[])?, "No repositories found\n");
        Ok(())
    }

    #[test]
    fn test_json_output_uses_camel_case() -> Result<()> {
        let mut out = Vec::new();
        json(&mut out, &[record("proj.git")])?;
        let text = String::from_utf8(out)?;

        assert!(text.contains("\"relativePath\": \"proj.git\""));
        assert!(text.contains("\"branchCount\": 0"));
        assert!(text.contains("\"isValid\": true"));
        assert!(!text.contains("\"error\""));
        Ok(())
    }
}
