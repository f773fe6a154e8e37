// Prints "input_debug start" and one report line, then exits 0.

fn main() {
    winprobe::logging::init();

    #[cfg(windows)]
    {
        use winprobe::{platform::win32::Win32, probes::InputProbe, runner};
        runner::run_to_stdout(&InputProbe::new(Win32));
    }

    #[cfg(not(windows))]
    winprobe::runner::unsupported("input_debug");
}
