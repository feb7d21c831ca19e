//! # Click Dispatch
//!
//! Rules are an ordered list of `(target name, action)` pairs. A click walks
//! its hit list nearest first and applies the first rule whose target equals
//! the hit node's canonical name, then stops; nothing further along the ray
//! is looked at once a rule has fired.
//!
//! Toggle rules carry per-target state. The first click on an untoggled
//! target only marks it toggled; every click after that opens the URL.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::caster::RayCaster;
use super::ray::RayHit;
use crate::camera::{Camera, Viewport};
use crate::config::ClickConfig;
use crate::scene::SceneGraph;

/// What a matching click does
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum ClickAction {
    /// Open `url` on every click
    OpenUrl {
        /// Page to open
        url: String,
    },
    /// Mark the target toggled on the first click, open `url` afterwards
    ToggleThenOpen {
        /// Page to open once toggled
        url: String,
    },
}

/// Target name paired with an action
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClickRule {
    /// Canonical node name the rule matches
    pub target: String,
    /// Action run on a match
    pub action: ClickAction,
}

impl ClickRule {
    /// Create a rule
    pub fn new(target: impl Into<String>, action: ClickAction) -> Self {
        Self {
            target: target.into(),
            action,
        }
    }
}

/// Receiver of click side effects
pub trait ClickSink {
    /// Open an external page
    fn open_url(&mut self, url: &str);

    /// A toggle target changed to toggled
    fn toggled(&mut self, target: &str);
}

/// Sink that remembers every side effect
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordingSink {
    /// URLs opened, in order
    pub opened: Vec<String>,
    /// Targets toggled, in order
    pub toggled: Vec<String>,
}

impl RecordingSink {
    /// `true` when nothing was recorded
    pub fn is_empty(&self) -> bool {
        self.opened.is_empty() && self.toggled.is_empty()
    }
}

impl ClickSink for RecordingSink {
    fn open_url(&mut self, url: &str) {
        self.opened.push(url.to_string());
    }

    fn toggled(&mut self, target: &str) {
        self.toggled.push(target.to_string());
    }
}

/// Result of one click
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClickOutcome {
    /// Nothing under the pointer
    Miss,
    /// Hits, but no rule matched any of them
    NoMatch,
    /// A URL was opened
    Opened {
        /// Matched target
        target: String,
        /// Opened URL
        url: String,
    },
    /// A toggle target became toggled
    Toggled {
        /// Matched target
        target: String,
    },
}

/// Applies click rules to hit lists
#[derive(Debug, Clone, Default)]
pub struct ClickDispatcher {
    rules: Vec<ClickRule>,
    toggled: HashSet<String>,
}

impl ClickDispatcher {
    /// Dispatcher over `rules`, all targets untoggled
    pub fn new(rules: Vec<ClickRule>) -> Self {
        Self {
            rules,
            toggled: HashSet::new(),
        }
    }

    /// Dispatcher over the configured rules
    pub fn from_config(config: &ClickConfig) -> Self {
        Self::new(config.rules.clone())
    }

    /// Rules in priority order
    pub fn rules(&self) -> &[ClickRule] {
        &self.rules
    }

    /// Whether a toggle target has been toggled
    pub fn is_toggled(&self, target: &str) -> bool {
        self.toggled.contains(target)
    }

    /// Dispatch against canonical names ordered nearest first
    pub fn dispatch<'a, I, S>(&mut self, names: I, sink: &mut S) -> ClickOutcome
    where
        I: IntoIterator<Item = &'a str>,
        S: ClickSink + ?Sized,
    {
        let mut any_hit = false;
        for name in names {
            any_hit = true;
            let Some(rule) = self.rules.iter().find(|rule| rule.target == name) else {
                continue;
            };
            let target = rule.target.clone();

            return match &rule.action {
                ClickAction::OpenUrl { url } => {
                    let url = url.clone();
                    log::info!("Click on '{}' opens {}", target, url);
                    sink.open_url(&url);
                    ClickOutcome::Opened { target, url }
                }
                ClickAction::ToggleThenOpen { url } => {
                    if self.toggled.contains(&target) {
                        let url = url.clone();
                        log::info!("Click on toggled '{}' opens {}", target, url);
                        sink.open_url(&url);
                        ClickOutcome::Opened { target, url }
                    } else {
                        log::info!("Click toggles '{}'", target);
                        self.toggled.insert(target.clone());
                        sink.toggled(&target);
                        ClickOutcome::Toggled { target }
                    }
                }
            };
        }

        if any_hit {
            ClickOutcome::NoMatch
        } else {
            ClickOutcome::Miss
        }
    }

    /// Dispatch a caster's hit list, resolving names through `scene`
    pub fn dispatch_hits<S>(&mut self, hits: &[RayHit], scene: &SceneGraph, sink: &mut S) -> ClickOutcome
    where
        S: ClickSink + ?Sized,
    {
        let names = hits
            .iter()
            .filter_map(|hit| scene.get(hit.node))
            .map(|node| node.name.as_str());
        self.dispatch(names, sink)
    }

    /// Full click pipeline from a pixel position.
    ///
    /// A click whose ray cannot be built is logged and treated as a miss.
    pub fn click<C, S>(
        &mut self,
        screen_x: f32,
        screen_y: f32,
        camera: &Camera,
        viewport: &Viewport,
        scene: &SceneGraph,
        caster: &C,
        sink: &mut S,
    ) -> ClickOutcome
    where
        C: RayCaster + ?Sized,
        S: ClickSink + ?Sized,
    {
        let (ndc_x, ndc_y) = viewport.screen_to_ndc(screen_x, screen_y);
        let Some(ray) = camera.screen_to_world_ray(ndc_x, ndc_y) else {
            log::warn!("No pick ray for click at ({}, {})", screen_x, screen_y);
            return ClickOutcome::Miss;
        };
        let hits = caster.intersect(&ray, scene);
        log::debug!("Click at ({}, {}) hit {} node(s)", screen_x, screen_y, hits.len());
        self.dispatch_hits(&hits, scene, sink)
    }
}
