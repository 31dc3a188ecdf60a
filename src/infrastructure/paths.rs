//! Sandbox path helpers.
//!
//! Zellij plugins run in a WASI sandbox where the host's home directory is
//! mounted at `/host`. These helpers map user-facing paths onto that mount.

use std::path::PathBuf;

/// Directory for the plugin's trace output, inside the sandbox mount.
///
/// ```
/// use countrydex::infrastructure::get_data_dir;
///
/// assert!(get_data_dir().ends_with("zellij/countrydex"));
/// ```
#[must_use]
pub fn get_data_dir() -> PathBuf {
    PathBuf::from("/host/.local/share/zellij").join("countrydex")
}

/// Maps a `~`-prefixed path onto the `/host` mount; other paths pass through.
///
/// ```
/// use countrydex::infrastructure::expand_tilde;
///
/// assert_eq!(expand_tilde("~/themes/nord.toml"), "/host/themes/nord.toml");
/// assert_eq!(expand_tilde("~"), "/host");
/// assert_eq!(expand_tilde("/etc/theme.toml"), "/etc/theme.toml");
/// ```
#[must_use]
pub fn expand_tilde(path: &str) -> String {
    if path.starts_with("~/") {
        path.replacen('~', "/host", 1)
    } else if path == "~" {
        "/host".to_string()
    } else {
        path.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_leading_tilde_is_expanded() {
        assert_eq!(expand_tilde("themes/~dark.toml"), "themes/~dark.toml");
        assert_eq!(expand_tilde("~user/theme.toml"), "~user/theme.toml");
    }
}
