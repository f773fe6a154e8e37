// Prints "thread_time_debug start" and one report line, then exits 0.

fn main() {
    winprobe::logging::init();

    #[cfg(windows)]
    {
        use winprobe::{platform::win32::Win32, probes::ThreadTimeProbe, runner};
        runner::run_to_stdout(&ThreadTimeProbe::new(Win32));
    }

    #[cfg(not(windows))]
    winprobe::runner::unsupported("thread_time_debug");
}
