// Runs every probe in sequence and emits one JSON snapshot.
//
// Usage: probe_all [OUTPUT.json]   (stdout when no path is given)

use std::path::PathBuf;

fn main() {
    winprobe::logging::init();

    let path = std::env::args_os().nth(1).map(PathBuf::from);

    #[cfg(windows)]
    run(path);

    #[cfg(not(windows))]
    {
        let _ = path;
        winprobe::runner::unsupported("probe_all");
    }
}

#[cfg(windows)]
fn run(path: Option<PathBuf>) {
    use winprobe::{
        platform::win32::Win32,
        probes::{CursorProbe, InputProbe, RuntimeProbe, ThreadTimeProbe},
        runner::{capture, Snapshot},
    };

    let results = [
        capture(&InputProbe::new(Win32)),
        capture(&RuntimeProbe::new(Win32)),
        capture(&CursorProbe::new(Win32)),
        capture(&ThreadTimeProbe::new(Win32)),
    ];

    let mut entries = Vec::with_capacity(results.len());
    for result in results {
        match result {
            Ok(entry) => entries.push(entry),
            Err(e) => tracing::error!(error = %e, "probe capture failed"),
        }
    }

    if let Err(e) = Snapshot::new(entries).write(path.as_deref()) {
        tracing::error!(error = %e, "could not write snapshot");
    }
}
