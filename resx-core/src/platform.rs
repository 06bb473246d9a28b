//! Platform-specific abstractions
//!
//! Supports: Linux, BSDs, macOS, Windows

/// Command used to hand a file to the desktop's default application
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Opener {
    pub program: &'static str,
    /// Arguments placed before the file path
    pub args: &'static [&'static str],
}

impl Opener {
    pub fn detect() -> Option<Self> {
        #[cfg(target_os = "macos")]
        return Some(Self::macos());

        #[cfg(target_os = "windows")]
        return Some(Self::windows());

        #[cfg(any(
            target_os = "linux",
            target_os = "freebsd",
            target_os = "openbsd",
            target_os = "netbsd",
            target_os = "dragonfly"
        ))]
        return Some(Self::freedesktop());

        #[cfg(not(any(
            target_os = "macos",
            target_os = "windows",
            target_os = "linux",
            target_os = "freebsd",
            target_os = "openbsd",
            target_os = "netbsd",
            target_os = "dragonfly"
        )))]
        return None;
    }

    pub fn freedesktop() -> Self {
        Self { program: "xdg-open", args: &[] }
    }

    pub fn macos() -> Self {
        Self { program: "open", args: &[] }
    }

    pub fn windows() -> Self {
        // empty title argument so a quoted path is not taken as the window title
        Self { program: "cmd", args: &["/C", "start", ""] }
    }
}
