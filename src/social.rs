use crate::api::NO_STREAM;

/// Icons the sidebar knows how to draw
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SocialIcon {
    Mail,
    MessageCircle,
    Facebook,
    Instagram,
    Youtube,
    Twitter,
    Send,
    Share2,
    ShieldCheck,
}

impl SocialIcon {
    pub fn glyph(&self) -> &'static str {
        match self {
            SocialIcon::Mail => "✉",
            SocialIcon::MessageCircle => "◌",
            SocialIcon::Facebook => "f",
            SocialIcon::Instagram => "◎",
            SocialIcon::Youtube => "▶",
            SocialIcon::Twitter => "𝕏",
            SocialIcon::Send => "➤",
            SocialIcon::Share2 => "⇪",
            SocialIcon::ShieldCheck => "✓",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SocialLink {
    pub name: &'static str,
    pub icon: SocialIcon,
    pub url: &'static str,
}

impl SocialLink {
    /// Links still pointing at the placeholder do nothing when activated
    pub fn is_openable(&self) -> bool {
        self.url != NO_STREAM && !self.url.is_empty()
    }
}

pub const SOCIAL_LINKS: &[SocialLink] = &[
    SocialLink {
        name: "Contact us",
        icon: SocialIcon::Mail,
        url: "#",
    },
    SocialLink {
        name: "Telegram",
        icon: SocialIcon::Send,
        url: "#",
    },
    SocialLink {
        name: "Share app",
        icon: SocialIcon::Share2,
        url: "#",
    },
    SocialLink {
        name: "Privacy policy",
        icon: SocialIcon::ShieldCheck,
        url: "#",
    },
];

/// Open `link` in the system browser. Returns false when nothing was opened.
pub fn open_link(link: &SocialLink) -> bool {
    if !link.is_openable() {
        tracing::debug!("Social link {} has no target yet", link.name);
        return false;
    }
    match webbrowser::open(link.url) {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!("Failed to open {}: {}", link.url, e);
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholder_links_do_not_open() {
        assert_eq!(SOCIAL_LINKS.len(), 4);
        for link in SOCIAL_LINKS {
            assert!(!link.is_openable());
            assert!(!open_link(link));
        }
    }

    #[test]
    fn test_every_icon_has_a_glyph() {
        let icons = [
            SocialIcon::Mail,
            SocialIcon::MessageCircle,
            SocialIcon::Facebook,
            SocialIcon::Instagram,
            SocialIcon::Youtube,
            SocialIcon::Twitter,
            SocialIcon::Send,
            SocialIcon::Share2,
            SocialIcon::ShieldCheck,
        ];
        assert!(icons.iter().all(|i| !i.glyph().is_empty()));
    }
}
