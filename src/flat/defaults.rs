//! Compiled-in application settings
//!
//! Used when `app.cfg` is missing, and as the base layer under whatever
//! the file does contain.

/// Default `[Section]Key` → value pairs for the mod manager front-end
pub const DEFAULT_APP_SETTINGS: &[(&str, &str)] = &[
    ("[Dev]IsDevBuild", "false"),
    ("[General]Language", "en_US"),
    ("[General]Theme", "dark"),
    ("[General]CheckForUpdates", "true"),
    ("[Game]Executable", ""),
    ("[Game]LaunchArguments", ""),
    ("[Game]CloseManagerOnLaunch", "false"),
    ("[Mods]Directory", "mods"),
    ("[Mods]ConfirmUninstall", "true"),
    ("[Server]Port", "5000"),
    ("[Server]OpenBrowserOnStart", "true"),
];
