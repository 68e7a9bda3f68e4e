//! OS-standard application directories as [`PathHandle`]s.
//!
//! [`PlatformDirs`] combines a [`DirLayout`] with [`AppDirsOptions`] to
//! produce named directories such as `user_config_dir` or `site_data_dir`.
//! App-specific directories get the application name (and, on Windows, its
//! author) and version appended; user media folders such as
//! `user_music_dir` never do.
//!
//! # Examples
//!
//! ```no_run
//! use properpath::{AppDirsOptions, PlatformDirs};
//!
//! let dirs = PlatformDirs::new(AppDirsOptions::new("MyApp").with_version("1.0"));
//! let config = dirs.user_config_dir().unwrap();
//! // ~/.config/MyApp/1.0 on Linux,
//! // ~/Library/Application Support/MyApp/1.0 on macOS
//! println!("{config}");
//!
//! // Unix-style paths on macOS as well
//! let unix = PlatformDirs::new(AppDirsOptions::new("MyApp").with_follow_unix(true));
//! println!("{}", unix.user_data_dir().unwrap()); // ~/.local/share/MyApp
//! ```

pub mod layout;

use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use crate::error::{Error, Result};
use crate::kind::Kind;
use crate::logging::{default_sink, ErrorSink};
use crate::path::{GuardedMutator, PathHandle};

pub use layout::{DirLayout, NativeLayout, UnixLayout};

/// A named platform directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DirName {
    /// Per-user configuration.
    UserConfig,
    /// Per-user data.
    UserData,
    /// Per-user cache.
    UserCache,
    /// Per-user logs.
    UserLog,
    /// Per-user state (history, recently used files).
    UserState,
    /// Per-user runtime files (sockets, pid files).
    UserRuntime,
    /// The user's desktop folder.
    UserDesktop,
    /// The user's documents folder.
    UserDocuments,
    /// The user's downloads folder.
    UserDownloads,
    /// The user's music folder.
    UserMusic,
    /// The user's pictures folder.
    UserPictures,
    /// The user's videos folder.
    UserVideos,
    /// System-wide configuration.
    SiteConfig,
    /// System-wide data.
    SiteData,
    /// System-wide cache.
    SiteCache,
    /// System-wide logs.
    SiteLog,
    /// System-wide state.
    SiteState,
    /// System-wide runtime files.
    SiteRuntime,
}

impl DirName {
    /// Every named directory.
    pub const ALL: [Self; 18] = [
        Self::UserConfig,
        Self::UserData,
        Self::UserCache,
        Self::UserLog,
        Self::UserState,
        Self::UserRuntime,
        Self::UserDesktop,
        Self::UserDocuments,
        Self::UserDownloads,
        Self::UserMusic,
        Self::UserPictures,
        Self::UserVideos,
        Self::SiteConfig,
        Self::SiteData,
        Self::SiteCache,
        Self::SiteLog,
        Self::SiteState,
        Self::SiteRuntime,
    ];

    /// The accessor name, e.g. `user_config_dir`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::UserConfig => "user_config_dir",
            Self::UserData => "user_data_dir",
            Self::UserCache => "user_cache_dir",
            Self::UserLog => "user_log_dir",
            Self::UserState => "user_state_dir",
            Self::UserRuntime => "user_runtime_dir",
            Self::UserDesktop => "user_desktop_dir",
            Self::UserDocuments => "user_documents_dir",
            Self::UserDownloads => "user_downloads_dir",
            Self::UserMusic => "user_music_dir",
            Self::UserPictures => "user_pictures_dir",
            Self::UserVideos => "user_videos_dir",
            Self::SiteConfig => "site_config_dir",
            Self::SiteData => "site_data_dir",
            Self::SiteCache => "site_cache_dir",
            Self::SiteLog => "site_log_dir",
            Self::SiteState => "site_state_dir",
            Self::SiteRuntime => "site_runtime_dir",
        }
    }

    /// Whether application components are appended to this directory.
    #[must_use]
    pub const fn is_app_specific(self) -> bool {
        !matches!(
            self,
            Self::UserDesktop
                | Self::UserDocuments
                | Self::UserDownloads
                | Self::UserMusic
                | Self::UserPictures
                | Self::UserVideos
        )
    }
}

impl fmt::Display for DirName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Who publishes the application, for layouts that include it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum AppAuthor {
    /// Same as the application name.
    #[default]
    Inherit,
    /// An explicit author, typically the owning company.
    Named(String),
    /// Leave the author out.
    Disabled,
}

/// Options shaping the app-specific part of platform directories.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppDirsOptions {
    /// Application name; `None` yields the bare base directories.
    pub appname: Option<String>,
    /// Application author (only used on Windows).
    pub appauthor: AppAuthor,
    /// Version component appended after the application name.
    pub version: Option<String>,
    /// Use the roaming profile on Windows.
    pub roaming: bool,
    /// Append conventional components such as `log` or `Cache`.
    pub opinion: bool,
    /// Create directories when they are looked up.
    pub ensure_exists: bool,
    /// Use the XDG layout on macOS too.
    pub follow_unix: bool,
}

impl Default for AppDirsOptions {
    fn default() -> Self {
        Self {
            appname: None,
            appauthor: AppAuthor::Inherit,
            version: None,
            roaming: false,
            opinion: true,
            ensure_exists: false,
            follow_unix: false,
        }
    }
}

impl AppDirsOptions {
    /// Options for the application `appname`, everything else default.
    #[must_use]
    pub fn new(appname: impl Into<String>) -> Self {
        Self {
            appname: Some(appname.into()),
            ..Self::default()
        }
    }

    /// Set the author.
    #[must_use]
    pub fn with_author(mut self, author: AppAuthor) -> Self {
        self.appauthor = author;
        self
    }

    /// Set the version component.
    #[must_use]
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    /// Use the roaming profile on Windows.
    #[must_use]
    pub fn with_roaming(mut self, roaming: bool) -> Self {
        self.roaming = roaming;
        self
    }

    /// Toggle opinionated components.
    #[must_use]
    pub fn with_opinion(mut self, opinion: bool) -> Self {
        self.opinion = opinion;
        self
    }

    /// Create directories on lookup.
    #[must_use]
    pub fn with_ensure_exists(mut self, ensure_exists: bool) -> Self {
        self.ensure_exists = ensure_exists;
        self
    }

    /// Use the XDG layout on macOS.
    #[must_use]
    pub fn with_follow_unix(mut self, follow_unix: bool) -> Self {
        self.follow_unix = follow_unix;
        self
    }

    fn author_name(&self) -> Option<&str> {
        match &self.appauthor {
            AppAuthor::Inherit => self.appname.as_deref(),
            AppAuthor::Named(name) => Some(name),
            AppAuthor::Disabled => None,
        }
    }
}

/// Named application directories, returned as directory handles.
#[derive(Debug)]
pub struct PlatformDirs {
    options: AppDirsOptions,
    layout: Box<dyn DirLayout>,
    sink: Arc<dyn ErrorSink>,
}

impl PlatformDirs {
    /// Directories for `options` using the layout of the running OS.
    ///
    /// With `follow_unix`, macOS uses the XDG layout instead. Linux is XDG
    /// already, and Windows is never remapped.
    #[must_use]
    pub fn new(options: AppDirsOptions) -> Self {
        let layout: Box<dyn DirLayout> = if options.follow_unix && cfg!(target_os = "macos") {
            Box::new(UnixLayout::from_env())
        } else {
            Box::new(NativeLayout::from_env())
        };
        Self {
            options,
            layout,
            sink: default_sink(),
        }
    }

    /// Directories for `options` using an explicit layout.
    #[must_use]
    pub fn with_layout(options: AppDirsOptions, layout: impl DirLayout + 'static) -> Self {
        Self {
            options,
            layout: Box::new(layout),
            sink: default_sink(),
        }
    }

    /// Sink handed to every returned handle.
    #[must_use]
    pub fn with_sink(mut self, sink: Arc<dyn ErrorSink>) -> Self {
        self.sink = sink;
        self
    }

    /// The options in effect.
    #[must_use]
    pub fn options(&self) -> &AppDirsOptions {
        &self.options
    }

    /// Look up `which`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DirectoryUnavailable`] if the layout cannot place
    /// the directory, or the creation error when `ensure_exists` is set.
    pub fn get(&self, which: DirName) -> Result<PathHandle> {
        let base = self
            .layout
            .base(which, self.options.roaming)
            .ok_or_else(|| Error::DirectoryUnavailable {
                name: which.as_str().to_string(),
            })?;
        self.finish(which, base)
    }

    /// Every entry of the search path for `which`, most preferred first.
    ///
    /// # Errors
    ///
    /// Same as [`get`](Self::get), for any entry.
    pub fn get_all(&self, which: DirName) -> Result<Vec<PathHandle>> {
        let bases = self.layout.search_path(which);
        if bases.is_empty() {
            return Err(Error::DirectoryUnavailable {
                name: which.as_str().to_string(),
            });
        }
        bases
            .into_iter()
            .map(|base| self.finish(which, base))
            .collect()
    }

    fn finish(&self, which: DirName, base: PathBuf) -> Result<PathHandle> {
        let mut path = base;
        if which.is_app_specific() {
            if let Some(app) = &self.options.appname {
                if self.layout.includes_author() {
                    if let Some(author) = self.options.author_name() {
                        path.push(author);
                    }
                }
                path.push(app);
                if let Some(version) = &self.options.version {
                    path.push(version);
                }
            }
            if self.options.opinion {
                if let Some(suffix) = self.layout.opinion_suffix(which) {
                    path.push(suffix);
                }
            }
        }

        let handle = PathHandle::from_path(path)?
            .with_kind(Kind::Dir)
            .with_sink(Arc::clone(&self.sink));
        if self.options.ensure_exists {
            handle.create()?;
        }
        Ok(handle)
    }
}

macro_rules! named_dirs {
    ($($(#[$doc:meta])* $method:ident => $name:ident;)*) => {
        impl PlatformDirs {
            $(
                $(#[$doc])*
                ///
                /// # Errors
                ///
                /// See [`PlatformDirs::get`].
                pub fn $method(&self) -> Result<PathHandle> {
                    self.get(DirName::$name)
                }
            )*
        }
    };
}

named_dirs! {
    /// Per-user configuration directory.
    user_config_dir => UserConfig;
    /// Per-user data directory.
    user_data_dir => UserData;
    /// Per-user cache directory.
    user_cache_dir => UserCache;
    /// Per-user log directory.
    user_log_dir => UserLog;
    /// Per-user state directory.
    user_state_dir => UserState;
    /// Per-user runtime directory.
    user_runtime_dir => UserRuntime;
    /// The user's desktop folder.
    user_desktop_dir => UserDesktop;
    /// The user's documents folder.
    user_documents_dir => UserDocuments;
    /// The user's downloads folder.
    user_downloads_dir => UserDownloads;
    /// The user's music folder.
    user_music_dir => UserMusic;
    /// The user's pictures folder.
    user_pictures_dir => UserPictures;
    /// The user's videos folder.
    user_videos_dir => UserVideos;
    /// System-wide configuration directory (first search-path entry).
    site_config_dir => SiteConfig;
    /// System-wide data directory (first search-path entry).
    site_data_dir => SiteData;
    /// System-wide cache directory.
    site_cache_dir => SiteCache;
    /// System-wide log directory.
    site_log_dir => SiteLog;
    /// System-wide state directory.
    site_state_dir => SiteState;
    /// System-wide runtime directory.
    site_runtime_dir => SiteRuntime;
}

impl PlatformDirs {
    /// Every system-wide configuration directory on the search path.
    ///
    /// # Errors
    ///
    /// See [`PlatformDirs::get_all`].
    pub fn site_config_dirs(&self) -> Result<Vec<PathHandle>> {
        self.get_all(DirName::SiteConfig)
    }

    /// Every system-wide data directory on the search path.
    ///
    /// # Errors
    ///
    /// See [`PlatformDirs::get_all`].
    pub fn site_data_dirs(&self) -> Result<Vec<PathHandle>> {
        self.get_all(DirName::SiteData)
    }
}
