//! Centralized icon definitions.
//!
//! Icon theme is configured in `config.rs` via `ICON_THEME`.
//! This module maps semantic icon names to the selected theme's icons.

use icondata::Icon;

use crate::config::IconTheme;

// =============================================================================
// Theme Imports
// =============================================================================

mod lucide {
    pub use icondata::{
        LuChevronLeft as ChevronLeft, LuChevronRight as ChevronRight,
        LuCircleAlert as Alert, LuCircleCheck as Success, LuEye as View, LuFile as File,
        LuHash as Hash, LuInbox as Empty, LuLock as Lock, LuLogOut as Logout, LuMail as Mail,
        LuPencil as Edit, LuSearch as Search, LuShare2 as Share, LuTrash2 as Delete,
        LuUser as User, LuX as Close,
    };
}

mod bootstrap {
    pub use icondata::{
        BsBoxArrowRight as Logout, BsCheckCircleFill as Success, BsChevronLeft as ChevronLeft,
        BsChevronRight as ChevronRight, BsEnvelope as Mail, BsExclamationCircleFill as Alert,
        BsEye as View, BsFileEarmark as File, BsHash as Hash, BsInbox as Empty,
        BsLockFill as Lock, BsPencil as Edit, BsPerson as User, BsSearch as Search,
        BsShare as Share, BsTrash as Delete, BsXLg as Close,
    };
}

// =============================================================================
// Icon Constants (selected based on theme)
// =============================================================================

macro_rules! themed_icon {
    ($name:ident, $theme_name:ident) => {
        pub const $name: Icon = match crate::config::ICON_THEME {
            IconTheme::Lucide => lucide::$theme_name,
            IconTheme::Bootstrap => bootstrap::$theme_name,
        };
    };
}

themed_icon!(CHEVRON_LEFT, ChevronLeft);
themed_icon!(CHEVRON_RIGHT, ChevronRight);
themed_icon!(SHARE, Share);
themed_icon!(USER, User);
themed_icon!(LOGOUT, Logout);
themed_icon!(MAIL, Mail);
themed_icon!(LOCK, Lock);
themed_icon!(SEARCH, Search);
themed_icon!(HASH, Hash);
themed_icon!(FILE, File);
themed_icon!(VIEW, View);
themed_icon!(EDIT, Edit);
themed_icon!(DELETE, Delete);
themed_icon!(CLOSE, Close);
themed_icon!(EMPTY, Empty);
themed_icon!(SUCCESS, Success);
themed_icon!(ALERT, Alert);
