// ── Central error type ────────────────────────────────────────────────────────
//
// Probes never fail on a native call: a failed acquisition is logged and the
// probe carries on with a null handle.  The only errors that travel upward are
// output failures (stdout, the runner's snapshot file).

use thiserror::Error;

/// Every error that winprobe can produce.
#[derive(Debug, Error)]
pub enum ProbeError {
    /// A Win32 API call returned a failure code.
    #[error("{function} failed (error {code:#010x})")]
    Win32 {
        /// The name of the failing function, for display purposes.
        function: &'static str,
        /// The raw Win32 error code (`GetLastError()` value) or HRESULT.
        code: u32,
    },

    /// Writing a marker, a report line or a snapshot failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialising the runner snapshot failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ProbeError {
    /// Attach the failing function name to a windows-crate error.
    #[cfg(windows)]
    pub(crate) fn win32(function: &'static str, e: &windows::core::Error) -> Self {
        // HRESULT.0 is i32; reinterpret bits as u32 for display purposes.
        // Win32 errors appear as 0x8007xxxx HRESULTs.
        Self::Win32 {
            function,
            code: e.code().0 as u32,
        }
    }
}

// Lets `?` work on `windows::core::Result<T>` in the native layer.
#[cfg(windows)]
impl From<windows::core::Error> for ProbeError {
    fn from(e: windows::core::Error) -> Self {
        Self::win32("windows", &e)
    }
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, ProbeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn win32_display_is_hex_padded() {
        let e = ProbeError::Win32 {
            function: "LoadLibraryA",
            code: 0x8007_007e,
        };
        assert_eq!(e.to_string(), "LoadLibraryA failed (error 0x8007007e)");
    }

    #[test]
    fn io_error_converts() {
        let io = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "closed");
        let e: ProbeError = io.into();
        assert!(matches!(e, ProbeError::Io(_)));
        assert_eq!(e.to_string(), "I/O error: closed");
    }
}
