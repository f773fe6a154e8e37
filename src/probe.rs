// ── Probe execution protocol ──────────────────────────────────────────────────
//
// Every probe runs the same five steps:
//   1. announce   – `run` prints "<name> start" before any native call
//   2. exercise   – the probe's fixed call sequence
//   3. capture    – values worth comparing go into a `Report`
//   4. report     – `Session::report` prints the single line
//   5. release    – RAII handles held by `exercise` drop after the report
//
// Only output failures are errors.  A native call that fails is captured as
// whatever it returned (usually a null sentinel) and the sequence continues.

use std::io::Write;

use serde::Serialize;

use crate::{error::Result, report::Report};

/// One self-contained probe.
pub trait Probe {
    /// Probe identifier; the start marker is `"{NAME} start"`.
    const NAME: &'static str;

    /// Run the fixed call sequence and hand the summary to `session.report`.
    ///
    /// Resources acquired here must stay alive until after the report is
    /// written and must release themselves on drop.
    fn exercise(&self, session: &mut Session<'_>) -> Result<()>;
}

/// Output sink for one probe invocation.
pub struct Session<'a> {
    out: &'a mut dyn Write,
    report: Option<Report>,
}

impl<'a> Session<'a> {
    fn new(out: &'a mut dyn Write) -> Self {
        Self { out, report: None }
    }

    /// Print the report line and keep a copy for the transcript.
    ///
    /// A probe reports once; a second call is a bug in the probe and is
    /// ignored so the output stays a single line.
    pub fn report(&mut self, report: Report) -> Result<()> {
        if self.report.is_some() {
            tracing::error!("probe reported twice; extra report dropped");
            return Ok(());
        }
        writeln!(self.out, "{report}")?;
        self.out.flush()?;
        self.report = Some(report);
        Ok(())
    }
}

/// What one probe invocation produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Transcript {
    pub probe: &'static str,
    /// `None` only if the probe never reached its report step.
    pub report: Option<Report>,
}

/// The start-marker line for `name`.
pub fn marker(name: &str) -> String {
    format!("{name} start")
}

/// Announce, exercise and report `probe`, writing to `out`.
pub fn run<P: Probe>(probe: &P, out: &mut dyn Write) -> Result<Transcript> {
    let _span = tracing::info_span!("probe", name = P::NAME).entered();

    // Flushed so the marker is visible even if a native call takes the
    // process down.
    writeln!(out, "{}", marker(P::NAME))?;
    out.flush()?;

    let mut session = Session::new(out);
    probe.exercise(&mut session)?;

    if session.report.is_none() {
        tracing::warn!("probe finished without a report line");
    }
    Ok(Transcript {
        probe: P::NAME,
        report: session.report,
    })
}

// ── Tests ─────────────────────────────────────────────────────────────────────
