use std::path::PathBuf;

pub const DEFAULT_SERVER_PORT: u16 = 5002;
pub const DEFAULT_PINNED_PLAYERS_PATH: &str = "data/pinned_players.json";
pub const DEFAULT_STATIC_DIR: &str = "client/dist";
pub const MAX_PLAYER_NAME_LEN: usize = 64;
pub const MAX_MESSAGE_LEN: usize = 1024;

pub fn server_port() -> u16 {
    std::env::var("FPL_SERVER_PORT")
        .ok()
        .and_then(|value| value.trim().parse::<u16>().ok())
        .filter(|value| *value > 0)
        .unwrap_or(DEFAULT_SERVER_PORT)
}

pub fn pinned_players_path() -> PathBuf {
    non_empty_var("PINNED_PLAYERS_PATH")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_PINNED_PLAYERS_PATH))
}

pub fn static_dir() -> PathBuf {
    non_empty_var("STATIC_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_STATIC_DIR))
}

fn non_empty_var(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn port_falls_back_on_missing_or_invalid_values() {
        temp_env::with_var_unset("FPL_SERVER_PORT", || {
            assert_eq!(server_port(), DEFAULT_SERVER_PORT);
        });
        temp_env::with_var("FPL_SERVER_PORT", Some("not-a-port"), || {
            assert_eq!(server_port(), DEFAULT_SERVER_PORT);
        });
        temp_env::with_var("FPL_SERVER_PORT", Some("0"), || {
            assert_eq!(server_port(), DEFAULT_SERVER_PORT);
        });
        temp_env::with_var("FPL_SERVER_PORT", Some(" 8080 "), || {
            assert_eq!(server_port(), 8080);
        });
    }

    #[test]
    fn paths_ignore_blank_overrides() {
        temp_env::with_vars(
            [("PINNED_PLAYERS_PATH", Some("  ")), ("STATIC_DIR", None::<&str>)],
            || {
                assert_eq!(
                    pinned_players_path(),
                    PathBuf::from(DEFAULT_PINNED_PLAYERS_PATH)
                );
                assert_eq!(static_dir(), PathBuf::from(DEFAULT_STATIC_DIR));
            },
        );
        temp_env::with_var("PINNED_PLAYERS_PATH", Some("/var/lib/fpl/pins.json"), || {
            assert_eq!(
                pinned_players_path(),
                PathBuf::from("/var/lib/fpl/pins.json")
            );
        });
    }
}
