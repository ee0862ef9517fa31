//! Reload Decision Engine
//!
//! Per-element state lives in an explicit map keyed by [`ElementId`];
//! nothing is attached to the document itself. A record is created lazily
//! on first encounter and pruned once the host stops reporting the
//! element.

use std::collections::hash_map::Entry;
use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use vario_dom::{Action, ElementId, ImageConfig, ImageHost};
use vario_loader::render_url;
use vario_quantize::{quantize, FeatureFlags, Size, TruncationStrategy, STEP_MIN};

use crate::SweepEvent;

/// Rendered-vs-requested ratio divergence that forces a reload
/// (except for the plain `resize` action, which changes ratio freely).
pub const RATIO_EPSILON: f64 = 0.1;

/// What to request for one element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReloadRequest {
    pub action: Action,
    pub width: u32,
    pub height: u32,
}

/// A decided reload with its rendered URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReloadIntent {
    pub element: ElementId,
    pub url: String,
    pub request: ReloadRequest,
}

/// Tracked state of one managed element.
#[derive(Debug, Clone, Copy)]
struct TrackedState {
    /// Original declared bounds, captured once and never changed.
    max_size: Size,
    /// Size most recently requested; updated only when a reload fires.
    last_requested: Option<Size>,
}

/// Decides, per element and per event, whether a reload is warranted and
/// at what quantized size.
#[derive(Debug, Default)]
pub struct DecisionEngine {
    states: HashMap<ElementId, TrackedState>,
    strategy: TruncationStrategy,
}

impl DecisionEngine {
    pub fn new(strategy: TruncationStrategy) -> Self {
        Self {
            states: HashMap::new(),
            strategy,
        }
    }

    /// Construct with the strategy the flag service currently selects.
    pub fn from_flags(flags: &dyn FeatureFlags) -> Self {
        Self::new(TruncationStrategy::from_flags(flags))
    }

    /// Original bounds captured for an element, if it has been seen.
    pub fn max_size(&self, id: ElementId) -> Option<Size> {
        self.states.get(&id).map(|s| s.max_size)
    }

    /// Size most recently requested for an element.
    pub fn last_requested(&self, id: ElementId) -> Option<Size> {
        self.states.get(&id).and_then(|s| s.last_requested)
    }

    /// Run one full pass over every managed element.
    ///
    /// Elements fail in isolation: a misconfigured element is logged and
    /// skipped, never aborting the rest of the sweep. State for elements
    /// the host no longer reports is dropped afterwards.
    pub fn sweep(&mut self, host: &dyn ImageHost, event: SweepEvent) -> Vec<ReloadIntent> {
        let elements = host.managed_elements();
        tracing::debug!(?event, elements = elements.len(), "sweep start");

        let mut intents = Vec::new();
        for &id in &elements {
            let config = match ImageConfig::read(host, id) {
                Ok(config) => config,
                Err(err) => {
                    tracing::warn!(?id, %err, "skipping misconfigured element");
                    continue;
                }
            };
            if let Some(request) = self.evaluate(host, id, &config, event) {
                let url = render_url(&config.url_template, request.action, request.width, request.height);
                intents.push(ReloadIntent {
                    element: id,
                    url,
                    request,
                });
            }
        }

        self.states.retain(|id, _| elements.contains(id));
        tracing::debug!(?event, reloads = intents.len(), "sweep done");
        intents
    }

    /// Decide one element.
    ///
    /// Returns the request to issue, updating `last_requested` in the same
    /// breath; `None` means the element is hidden, unusable, or not worth
    /// reloading yet.
    pub fn evaluate(
        &mut self,
        host: &dyn ImageHost,
        id: ElementId,
        config: &ImageConfig,
        event: SweepEvent,
    ) -> Option<ReloadRequest> {
        let client = host.client_size(id);
        if client.is_empty() {
            // Hidden element: skip without touching state.
            tracing::trace!(?id, "hidden, skipped");
            return None;
        }

        let state = match self.states.entry(id) {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => {
                let max_size = host.static_size(id);
                if max_size.is_empty() {
                    tracing::warn!(?id, "no usable width/height attributes, skipped");
                    return None;
                }
                entry.insert(TrackedState {
                    max_size,
                    last_requested: None,
                })
            }
        };

        // With a locked aspect ratio the requested height follows the
        // rendered width, not the rendered box.
        let mut requested = client;
        if let Some(ar) = config.aspect_ratio {
            requested.height = (client.width as f64 / ar.ratio()) as u32;
        }

        let allow_undersized = config.allow_undersized();
        let mut quantized = quantize(requested, state.max_size, allow_undersized, self.strategy);

        let needs_load = match (event, state.last_requested) {
            // First encounter and page load always refresh.
            (_, None) | (SweepEvent::PageLoad, _) => true,
            (SweepEvent::Resize, Some(last)) => {
                if !allow_undersized {
                    // Never request more than the known source resolution.
                    quantized = quantized.clamp_to(state.max_size);
                }

                let w_delta = quantized.width.abs_diff(last.width);
                let h_delta = quantized.height.abs_diff(last.height);
                let mut load = w_delta > STEP_MIN || h_delta > STEP_MIN;

                if config.action != Action::Resize {
                    let (old_ratio, new_ratio) = match config.aspect_ratio {
                        // Locked: the ratio cannot diverge.
                        Some(ar) => (ar.ratio(), ar.ratio()),
                        None => (last.ratio(), client.ratio()),
                    };
                    if (old_ratio - new_ratio).abs() > RATIO_EPSILON {
                        load = true;
                    }
                }
                load
            }
        };

        if !needs_load {
            return None;
        }

        state.last_requested = Some(quantized);
        tracing::debug!(
            ?id,
            width = quantized.width,
            height = quantized.height,
            action = config.action.as_str(),
            "reload"
        );
        Some(ReloadRequest {
            action: config.action,
            width: quantized.width,
            height: quantized.height,
        })
    }

    #[cfg(test)]
    fn seed(&mut self, id: ElementId, max_size: Size, last_requested: Size) {
        self.states.insert(
            id,
            TrackedState {
                max_size,
                last_requested: Some(last_requested),
            },
        );
    }
}
