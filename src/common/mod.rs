use std::io;

/// Reset SIGPIPE to default behavior (SIG_DFL). Rust installs SIG_IGN
/// before main(), which turns a closed-pipe write into an error instead
/// of the silent exit shell pipelines expect. Call at the start of
/// main().
#[inline]
pub fn reset_sigpipe() {
    #[cfg(unix)]
    unsafe {
        libc::signal(libc::SIGPIPE, libc::SIG_DFL);
    }
}

/// Format an I/O error message without the " (os error N)" suffix that
/// the std Display impl appends.
pub fn io_error_msg(e: &io::Error) -> String {
    if let Some(raw) = e.raw_os_error() {
        let msg = io::Error::from_raw_os_error(raw).to_string();
        msg.replace(&format!(" (os error {})", raw), "")
    } else {
        e.to_string()
    }
}
