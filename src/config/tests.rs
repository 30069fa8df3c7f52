use super::load::{default_config_path, resolve_config_path};
use super::schema::*;
use std::sync::{Mutex, OnceLock};

static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

fn env_lock() -> std::sync::MutexGuard<'static, ()> {
    ENV_LOCK.get_or_init(|| Mutex::new(())).lock().unwrap()
}

struct EnvGuard {
    key: &'static str,
    old: Option<std::ffi::OsString>,
}

impl EnvGuard {
    fn set(key: &'static str, val: &str) -> Self {
        let old = std::env::var_os(key);
        unsafe {
            std::env::set_var(key, val);
        }
        Self { key, old }
    }

    fn remove(key: &'static str) -> Self {
        let old = std::env::var_os(key);
        unsafe {
            std::env::remove_var(key);
        }
        Self { key, old }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        match self.old.take() {
            Some(v) => unsafe {
                std::env::set_var(self.key, v);
            },
            None => unsafe {
                std::env::remove_var(self.key);
            },
        }
    }
}

#[test]
fn resolve_config_path_prefers_caravel_config_path() {
    let _lock = env_lock();
    let _g1 = EnvGuard::set("CARAVEL_CONFIG_PATH", "/tmp/caravel-test-config.toml");
    assert_eq!(
        resolve_config_path().unwrap(),
        std::path::PathBuf::from("/tmp/caravel-test-config.toml")
    );
}

#[test]
fn default_config_path_prefers_xdg_config_home() {
    let _lock = env_lock();
    let _g1 = EnvGuard::set("XDG_CONFIG_HOME", "/tmp/xdg-config-home");
    let _g2 = EnvGuard::set("HOME", "/tmp/home-should-not-win");

    let p = default_config_path().unwrap();
    assert_eq!(
        p,
        std::path::PathBuf::from("/tmp/xdg-config-home")
            .join("caravel")
            .join("config.toml")
    );
}

#[test]
fn default_config_path_falls_back_to_home_dot_config() {
    let _lock = env_lock();
    let _g1 = EnvGuard::remove("XDG_CONFIG_HOME");
    let _g2 = EnvGuard::set("HOME", "/tmp/home-dir");

    let p = default_config_path().unwrap();
    assert_eq!(
        p,
        std::path::PathBuf::from("/tmp/home-dir")
            .join(".config")
            .join("caravel")
            .join("config.toml")
    );
}

#[test]
fn settings_load_from_config_file() {
    let _lock = env_lock();

    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("config.toml");
    std::fs::write(
        &cfg_path,
        r#"
[scan]
max_tracks = 500
max_depth = 4
follow_links = false

[convert]
bitrate_kbps = 192
sample_rate_hz = 44100
car_sample_rate_hz = 22050

[download]
dir = "dl"
"#,
    )
    .unwrap();

    let _g1 = EnvGuard::set("CARAVEL_CONFIG_PATH", cfg_path.to_str().unwrap());
    let _g2 = EnvGuard::remove("CARAVEL__SCAN__MAX_TRACKS");

    let s = Settings::load().unwrap();
    assert_eq!(s.scan.max_tracks, 500);
    assert_eq!(s.scan.max_depth, 4);
    assert!(!s.scan.follow_links);
    assert_eq!(s.convert.bitrate_kbps, 192);
    assert_eq!(s.convert.sample_rate_hz, 44_100);
    assert_eq!(s.convert.car_sample_rate_hz, 22_050);
    assert_eq!(s.download.dir, "dl");
}

#[test]
fn settings_env_overrides_config_file() {
    let _lock = env_lock();

    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("config.toml");
    std::fs::write(
        &cfg_path,
        r#"
[scan]
max_tracks = 500
"#,
    )
    .unwrap();

    let _g1 = EnvGuard::set("CARAVEL_CONFIG_PATH", cfg_path.to_str().unwrap());
    let _g2 = EnvGuard::set("CARAVEL__SCAN__MAX_TRACKS", "7");

    let s = Settings::load().unwrap();
    assert_eq!(s.scan.max_tracks, 7);
}

#[test]
fn defaults_are_sane_and_validate() {
    let s = Settings::default();
    assert_eq!(s.scan.max_tracks, 20_000);
    assert_eq!(s.scan.max_depth, 16);
    assert!(s.scan.follow_links);
    assert_eq!(s.convert.bitrate_kbps, 320);
    assert!(s.validate().is_ok());
}

#[test]
fn validate_rejects_zero_ceilings() {
    let mut s = Settings::default();
    s.scan.max_tracks = 0;
    assert!(s.validate().is_err());

    let mut s = Settings::default();
    s.scan.max_depth = 0;
    assert!(s.validate().is_err());

    let mut s = Settings::default();
    s.download.dir = "  ".to_string();
    assert!(s.validate().is_err());
}
