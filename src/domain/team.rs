//! src/domain/team.rs

use std::sync::RwLock;

use crate::slack::{TeamIcon, TeamInfo};

/// The cached profile of the Slack team, refreshed by the background poller
/// and read by the homepage.
#[derive(Debug, Default)]
pub struct TeamDirectory {
    inner: RwLock<TeamSnapshot>,
}

#[derive(Debug, Default, Clone)]
pub struct TeamSnapshot {
    pub name: String,
    pub domain: String,
    pub icon_url: String,
}

impl TeamDirectory {
    pub fn update(&self, info: &TeamInfo) {
        let icon_url = if info.icon.image_default {
            // teams still on the default avatar get no icon at all
            String::new()
        } else {
            match preferred_icon(&info.icon) {
                Some(url) => url,
                None => {
                    tracing::warn!("Unable to determine the team icon image");
                    String::new()
                }
            }
        };

        let mut inner = self.inner.write().expect("team directory lock poisoned");
        inner.name = info.name.clone();
        inner.domain = info.domain.clone();
        inner.icon_url = icon_url;
    }

    pub fn snapshot(&self) -> TeamSnapshot {
        self.inner
            .read()
            .expect("team directory lock poisoned")
            .clone()
    }
}

/// Largest icon first; Slack serves a handful of fixed sizes.
fn preferred_icon(icon: &TeamIcon) -> Option<String> {
    [
        &icon.image_132,
        &icon.image_102,
        &icon.image_88,
        &icon.image_68,
        &icon.image_44,
        &icon.image_34,
    ]
    .into_iter()
    .find_map(|candidate| candidate.clone())
}
