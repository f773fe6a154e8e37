// ── Entry-point helpers ───────────────────────────────────────────────────────
//
// The probe binaries are one-liners around `run_to_stdout`.  `probe_all` uses
// `capture` + `Snapshot` to collect every probe into one JSON document.
//
// Exit status is always 0: a probe communicates only through its printed
// fields, and output failures are logged to stderr.

use std::{
    fs,
    io::{self, Write},
    path::Path,
};

use serde::Serialize;

use crate::{
    error::Result,
    probe::{self, Probe},
    report::Report,
};

// ── Single probe → stdout ─────────────────────────────────────────────────────

/// Run `probe` against stdout, logging (not propagating) output failures.
pub fn run_to_stdout<P: Probe>(probe: &P) {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    if let Err(e) = probe::run(probe, &mut out) {
        tracing::error!(probe = P::NAME, error = %e, "could not write probe output");
    }
}

/// Stand-in for `main` on hosts without the native layer.
pub fn unsupported(name: &str) {
    tracing::error!(probe = name, "native probes are only available on Windows");
}

// ── Snapshot ──────────────────────────────────────────────────────────────────

/// Current snapshot format.
pub const SNAPSHOT_VERSION: u32 = 1;

/// Everything one probe printed, as text and as typed fields.
#[derive(Debug, Clone, Serialize)]
pub struct Entry {
    pub probe: &'static str,
    /// Raw stdout lines, marker included, exactly as the binary prints them.
    pub lines: Vec<String>,
    pub report: Option<Report>,
}

/// Root of the `probe_all` JSON document.
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub version: u32,
    pub probes: Vec<Entry>,
}

impl Snapshot {
    pub fn new(probes: Vec<Entry>) -> Self {
        Self {
            version: SNAPSHOT_VERSION,
            probes,
        }
    }

    /// Write pretty JSON to `path`, or to stdout when `path` is `None`.
    ///
    /// Creates missing parent directories.
    pub fn write(&self, path: Option<&Path>) -> Result<()> {
        match path {
            Some(path) => {
                if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
                    fs::create_dir_all(dir)?;
                }
                let file = fs::File::create(path)?;
                self.write_to(file)
            }
            None => self.write_to(io::stdout().lock()),
        }
    }

    fn write_to(&self, mut out: impl Write) -> Result<()> {
        serde_json::to_writer_pretty(&mut out, self)?;
        writeln!(out)?;
        out.flush()?;
        Ok(())
    }
}

/// Run `probe` into memory and keep both its text and its typed report.
pub fn capture<P: Probe>(probe: &P) -> Result<Entry> {
    let mut buf = Vec::new();
    let transcript = probe::run(probe, &mut buf)?;
    let text = String::from_utf8_lossy(&buf);
    Ok(Entry {
        probe: transcript.probe,
        lines: text.lines().map(str::to_owned).collect(),
        report: transcript.report,
    })
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        probe::Session,
        report::{Address, FieldValue},
    };

    struct Fixed;

    impl Probe for Fixed {
        const NAME: &'static str = "fixed_debug";

        fn exercise(&self, session: &mut Session<'_>) -> Result<()> {
            session.report(
                Report::new()
                    .field("tick", FieldValue::U32(9))
                    .field("module", FieldValue::Address(Address::NULL)),
            )
        }
    }

    #[test]
    fn capture_keeps_marker_and_line() {
        let entry = capture(&Fixed).expect("capture");
        assert_eq!(entry.probe, "fixed_debug");
        assert_eq!(entry.lines.len(), 2);
        assert_eq!(entry.lines[0], "fixed_debug start");
        assert!(entry.lines[1].starts_with("tick=9 module=0"));
    }

    #[test]
    fn snapshot_json_shape() {
        let snap = Snapshot::new(vec![capture(&Fixed).expect("capture")]);
        let json = serde_json::to_value(&snap).expect("serialize");
        assert_eq!(json["version"], SNAPSHOT_VERSION);
        let probe = &json["probes"][0];
        assert_eq!(probe["probe"], "fixed_debug");
        assert_eq!(probe["report"]["fields"][0]["name"], "tick");
        assert_eq!(probe["report"]["fields"][0]["kind"], "u32");
        assert_eq!(probe["report"]["fields"][0]["value"], 9);
        assert_eq!(probe["report"]["fields"][1]["kind"], "address");
        assert_eq!(probe["report"]["fields"][1]["value"], 0);
    }

    #[test]
    fn snapshot_writes_file_and_creates_dirs() {
        let dir = std::env::temp_dir().join(format!("winprobe-test-{}", std::process::id()));
        let path = dir.join("nested").join("snapshot.json");

        let snap = Snapshot::new(vec![capture(&Fixed).expect("capture")]);
        snap.write(Some(&path)).expect("write");

        let data = fs::read_to_string(&path).expect("read back");
        let parsed: serde_json::Value = serde_json::from_str(&data).expect("valid json");
        assert_eq!(parsed["probes"][0]["lines"][0], "fixed_debug start");

        let _ = fs::remove_dir_all(&dir);
    }
}
