//! UI models that should be available on both wasm and native.
//!
//! Keeping these out of the wasm-only `web` module allows us to unit-test
//! which parts of the page are visible for a given state on the host.

use rembg::session::{DownloadTier, Session};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalKind {
    Login,
    Register,
}

impl ModalKind {
    pub fn title(self) -> &'static str {
        match self {
            ModalKind::Login => "Log in",
            ModalKind::Register => "Create an account",
        }
    }

    pub fn submit_label(self) -> &'static str {
        match self {
            ModalKind::Login => "Log in",
            ModalKind::Register => "Register",
        }
    }
}

/// Which header and download controls are on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TierVisibility {
    pub auth_buttons: bool,
    pub user_info: bool,
    pub free_account_info: bool,
    pub guest_downloads: bool,
    pub member_downloads: bool,
}

impl TierVisibility {
    pub fn for_session(session: &Session) -> Self {
        let member = session.tier() == DownloadTier::Member;
        Self {
            auth_buttons: !member,
            user_info: member,
            free_account_info: session.shows_free_account_info(),
            guest_downloads: !member,
            member_downloads: member,
        }
    }
}

/// What the single-image result panel shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultView {
    Placeholder,
    Loading,
    Image,
}

impl ResultView {
    pub fn from_state(loading: bool, has_image: bool) -> Self {
        if loading {
            ResultView::Loading
        } else if has_image {
            ResultView::Image
        } else {
            ResultView::Placeholder
        }
    }

    /// Download controls only accompany a finished image.
    pub fn shows_downloads(self) -> bool {
        self == ResultView::Image
    }
}

pub fn drop_zone_class(active: bool) -> &'static str {
    if active {
        "drop-zone active"
    } else {
        "drop-zone"
    }
}

pub fn modal_class(open: bool) -> &'static str {
    if open {
        "modal active"
    } else {
        "modal"
    }
}
