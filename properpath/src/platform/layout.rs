//! Base-directory layouts.
//!
//! A layout answers "where does this kind of directory live" before any
//! application components are appended. [`NativeLayout`] follows the
//! conventions of the running OS; [`UnixLayout`] follows the XDG base
//! directory specification everywhere.

use std::collections::HashMap;
use std::env;
use std::fmt;
use std::path::{Path, PathBuf};

use crate::platform::DirName;

/// Source of base directories for [`PlatformDirs`](crate::PlatformDirs).
pub trait DirLayout: fmt::Debug + Send + Sync {
    /// The preferred base directory for `which`, if it can be determined.
    ///
    /// `roaming` selects the roaming profile on Windows and is ignored
    /// elsewhere.
    fn base(&self, which: DirName, roaming: bool) -> Option<PathBuf>;

    /// Every base directory for `which`, most preferred first.
    ///
    /// Only the site config and data directories have more than one entry,
    /// and only on layouts with a search path.
    fn search_path(&self, which: DirName) -> Vec<PathBuf> {
        self.base(which, false).into_iter().collect()
    }

    /// Component appended to `which` when opinionated layouts are enabled.
    fn opinion_suffix(&self, which: DirName) -> Option<&'static str>;

    /// Whether the application author is part of app-specific paths.
    fn includes_author(&self) -> bool {
        false
    }
}

/// XDG variables consulted by [`UnixLayout::from_env`].
const XDG_VARS: [&str; 13] = [
    "XDG_CONFIG_HOME",
    "XDG_DATA_HOME",
    "XDG_CACHE_HOME",
    "XDG_STATE_HOME",
    "XDG_RUNTIME_DIR",
    "XDG_CONFIG_DIRS",
    "XDG_DATA_DIRS",
    "XDG_DESKTOP_DIR",
    "XDG_DOCUMENTS_DIR",
    "XDG_DOWNLOAD_DIR",
    "XDG_MUSIC_DIR",
    "XDG_PICTURES_DIR",
    "XDG_VIDEOS_DIR",
];

/// XDG base-directory layout.
///
/// The layout is a snapshot: variables are read once, by
/// [`from_env`](Self::from_env), so later environment changes need a new
/// layout.
///
/// # Examples
///
/// ```
/// use properpath::platform::{DirLayout, DirName, UnixLayout};
/// use std::collections::HashMap;
/// use std::path::PathBuf;
///
/// let mut vars = HashMap::new();
/// vars.insert("XDG_CACHE_HOME".to_string(), "/scratch/cache".to_string());
/// let layout = UnixLayout::new(Some(PathBuf::from("/home/ada")), vars);
///
/// assert_eq!(layout.base(DirName::UserCache, false), Some(PathBuf::from("/scratch/cache")));
/// assert_eq!(layout.base(DirName::UserConfig, false), Some(PathBuf::from("/home/ada/.config")));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnixLayout {
    home: Option<PathBuf>,
    vars: HashMap<String, String>,
    uid: Option<u32>,
}

impl UnixLayout {
    /// A layout over an explicit home directory and variable set.
    #[must_use]
    pub fn new(home: Option<PathBuf>, vars: HashMap<String, String>) -> Self {
        Self {
            home,
            vars,
            uid: process_uid(),
        }
    }

    /// A layout over the current home directory and `XDG_*` variables.
    #[must_use]
    pub fn from_env() -> Self {
        let vars = XDG_VARS
            .iter()
            .filter_map(|name| env::var(name).ok().map(|v| ((*name).to_string(), v)))
            .collect();
        Self::new(home::home_dir(), vars)
    }

    /// Set the user id used for the `/run/user/<uid>` fallback.
    ///
    /// Defaults to the real user id of the running process.
    #[must_use]
    pub fn with_uid(mut self, uid: Option<u32>) -> Self {
        self.uid = uid;
        self
    }

    /// A non-blank variable, with a leading `~` or `$HOME` expanded.
    fn var(&self, name: &str) -> Option<PathBuf> {
        let value = self.vars.get(name)?.trim();
        if value.is_empty() {
            return None;
        }
        for prefix in ["$HOME", "~"] {
            if let Some(rest) = value.strip_prefix(prefix) {
                if rest.is_empty() || rest.starts_with('/') {
                    let home = self.home.as_ref()?;
                    return Some(home.join(rest.trim_start_matches('/')));
                }
            }
        }
        Some(PathBuf::from(value))
    }

    fn var_list(&self, name: &str, default: &[&str]) -> Vec<PathBuf> {
        let listed: Vec<PathBuf> = self
            .vars
            .get(name)
            .map(|v| {
                v.split(':')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(PathBuf::from)
                    .collect()
            })
            .unwrap_or_default();
        if listed.is_empty() {
            default.iter().map(PathBuf::from).collect()
        } else {
            listed
        }
    }

    fn home_or(&self, var: &str, relative: &str) -> Option<PathBuf> {
        self.var(var)
            .or_else(|| self.home.as_ref().map(|home| home.join(relative)))
    }

    fn run_dir() -> &'static str {
        if cfg!(any(
            target_os = "freebsd",
            target_os = "openbsd",
            target_os = "netbsd"
        )) {
            "/var/run"
        } else {
            "/run"
        }
    }
}

impl DirLayout for UnixLayout {
    fn base(&self, which: DirName, _roaming: bool) -> Option<PathBuf> {
        match which {
            DirName::UserConfig => self.home_or("XDG_CONFIG_HOME", ".config"),
            DirName::UserData => self.home_or("XDG_DATA_HOME", ".local/share"),
            DirName::UserCache => self.home_or("XDG_CACHE_HOME", ".cache"),
            DirName::UserState | DirName::UserLog => {
                self.home_or("XDG_STATE_HOME", ".local/state")
            }
            DirName::UserRuntime => self.var("XDG_RUNTIME_DIR").or_else(|| {
                self.uid
                    .map(|uid| Path::new(Self::run_dir()).join("user").join(uid.to_string()))
            }),
            DirName::UserDesktop => self.home_or("XDG_DESKTOP_DIR", "Desktop"),
            DirName::UserDocuments => self.home_or("XDG_DOCUMENTS_DIR", "Documents"),
            DirName::UserDownloads => self.home_or("XDG_DOWNLOAD_DIR", "Downloads"),
            DirName::UserMusic => self.home_or("XDG_MUSIC_DIR", "Music"),
            DirName::UserPictures => self.home_or("XDG_PICTURES_DIR", "Pictures"),
            DirName::UserVideos => self.home_or("XDG_VIDEOS_DIR", "Videos"),
            DirName::SiteConfig | DirName::SiteData => {
                self.search_path(which).into_iter().next()
            }
            DirName::SiteCache => Some(PathBuf::from("/var/cache")),
            DirName::SiteState => Some(PathBuf::from("/var/lib")),
            DirName::SiteLog => Some(PathBuf::from("/var/log")),
            DirName::SiteRuntime => self
                .var("XDG_RUNTIME_DIR")
                .or_else(|| Some(PathBuf::from(Self::run_dir()))),
        }
    }

    fn search_path(&self, which: DirName) -> Vec<PathBuf> {
        match which {
            DirName::SiteConfig => self.var_list("XDG_CONFIG_DIRS", &["/etc/xdg"]),
            DirName::SiteData => {
                self.var_list("XDG_DATA_DIRS", &["/usr/local/share", "/usr/share"])
            }
            _ => self.base(which, false).into_iter().collect(),
        }
    }

    fn opinion_suffix(&self, which: DirName) -> Option<&'static str> {
        match which {
            DirName::UserLog => Some("log"),
            _ => None,
        }
    }
}

/// The running OS's own conventions.
///
/// User directories come from the `dirs` crate; Linux and the BSDs defer to
/// [`UnixLayout`] for everything `dirs` does not cover. Site-wide directories
/// use `/Library` on macOS and `%PROGRAMDATA%` on Windows.
#[derive(Debug, Clone)]
pub struct NativeLayout {
    unix: UnixLayout,
}

impl NativeLayout {
    /// The layout for the running OS.
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            unix: UnixLayout::from_env(),
        }
    }

    fn program_data() -> PathBuf {
        env::var_os("PROGRAMDATA").map_or_else(|| PathBuf::from(r"C:\ProgramData"), PathBuf::from)
    }

    fn windows_base(which: DirName, roaming: bool) -> Option<PathBuf> {
        let app_data = || {
            if roaming {
                dirs::data_dir()
            } else {
                dirs::data_local_dir()
            }
        };
        match which {
            DirName::UserConfig | DirName::UserData | DirName::UserState => app_data(),
            DirName::UserCache | DirName::UserLog => dirs::data_local_dir(),
            DirName::UserRuntime => dirs::data_local_dir().map(|p| p.join("Temp")),
            DirName::SiteConfig
            | DirName::SiteData
            | DirName::SiteCache
            | DirName::SiteLog
            | DirName::SiteState
            | DirName::SiteRuntime => Some(Self::program_data()),
            _ => Self::media_base(which),
        }
    }

    fn macos_base(which: DirName) -> Option<PathBuf> {
        let library = |sub: &str| dirs::home_dir().map(|home| home.join("Library").join(sub));
        match which {
            DirName::UserConfig | DirName::UserData | DirName::UserState => dirs::data_dir(),
            DirName::UserCache => dirs::cache_dir(),
            DirName::UserLog => library("Logs"),
            DirName::UserRuntime => library("Caches/TemporaryItems"),
            DirName::SiteConfig | DirName::SiteData | DirName::SiteState => {
                Some(PathBuf::from("/Library/Application Support"))
            }
            DirName::SiteCache => Some(PathBuf::from("/Library/Caches")),
            DirName::SiteLog => Some(PathBuf::from("/Library/Logs")),
            DirName::SiteRuntime => Some(PathBuf::from("/var/run")),
            _ => Self::media_base(which),
        }
    }

    fn linux_base(&self, which: DirName, roaming: bool) -> Option<PathBuf> {
        match which {
            DirName::UserConfig => dirs::config_dir(),
            DirName::UserData => dirs::data_dir(),
            DirName::UserCache => dirs::cache_dir(),
            DirName::UserState | DirName::UserLog => dirs::state_dir(),
            // `dirs` only reads XDG_RUNTIME_DIR
            DirName::UserRuntime => dirs::runtime_dir().or_else(|| self.unix.base(which, roaming)),
            DirName::UserDesktop
            | DirName::UserDocuments
            | DirName::UserDownloads
            | DirName::UserMusic
            | DirName::UserPictures
            | DirName::UserVideos => Self::media_base(which),
            _ => self.unix.base(which, roaming),
        }
    }

    fn media_base(which: DirName) -> Option<PathBuf> {
        match which {
            DirName::UserDesktop => dirs::desktop_dir(),
            DirName::UserDocuments => dirs::document_dir(),
            DirName::UserDownloads => dirs::download_dir(),
            DirName::UserMusic => dirs::audio_dir(),
            DirName::UserPictures => dirs::picture_dir(),
            DirName::UserVideos => dirs::video_dir(),
            _ => None,
        }
    }
}

impl DirLayout for NativeLayout {
    fn base(&self, which: DirName, roaming: bool) -> Option<PathBuf> {
        if cfg!(windows) {
            Self::windows_base(which, roaming)
        } else if cfg!(target_os = "macos") {
            Self::macos_base(which)
        } else {
            self.linux_base(which, roaming)
        }
    }

    fn search_path(&self, which: DirName) -> Vec<PathBuf> {
        if cfg!(any(windows, target_os = "macos")) {
            self.base(which, false).into_iter().collect()
        } else {
            self.unix.search_path(which)
        }
    }

    fn opinion_suffix(&self, which: DirName) -> Option<&'static str> {
        if cfg!(windows) {
            match which {
                DirName::UserCache | DirName::SiteCache => Some("Cache"),
                DirName::UserLog | DirName::SiteLog => Some("Logs"),
                _ => None,
            }
        } else if cfg!(target_os = "macos") {
            None
        } else {
            self.unix.opinion_suffix(which)
        }
    }

    fn includes_author(&self) -> bool {
        cfg!(windows)
    }
}

/// Real user id of the running process.
#[cfg(unix)]
#[allow(unsafe_code)]
fn process_uid() -> Option<u32> {
    // SAFETY: getuid takes no arguments and always succeeds
    Some(unsafe { libc::getuid() })
}

#[cfg(not(unix))]
fn process_uid() -> Option<u32> {
    None
}
