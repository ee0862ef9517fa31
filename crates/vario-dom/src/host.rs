//! Document Host
//!
//! The engine never touches a real DOM; everything it needs from the page
//! goes through [`ImageHost`]. A browser embedding implements it over live
//! nodes; [`MemoryHost`] implements it over plain records for tests and
//! headless use.

use std::collections::BTreeMap;

use vario_quantize::Size;

use crate::ElementId;

/// Host-side view of the document, scoped to managed images.
pub trait ImageHost {
    /// Elements currently bearing the marker class, in document order.
    fn managed_elements(&self) -> Vec<ElementId>;

    /// The element's current rendered box. Zero in either dimension means
    /// the element is hidden.
    fn client_size(&self, id: ElementId) -> Size;

    /// The element's static width/height attributes, i.e. the original
    /// declared bounds of the source image.
    fn static_size(&self, id: ElementId) -> Size;

    /// One of the author-supplied configuration strings
    /// (`urltemplate`, `action`, `aspectratio`).
    fn config_value(&self, id: ElementId, key: &str) -> Option<String>;

    /// Swap the element's visible source. Called only once a fetched
    /// variant has fully decoded.
    fn set_source(&mut self, id: ElementId, url: &str);
}

/// One element's record in a [`MemoryHost`].
#[derive(Debug, Clone, Default)]
struct HostedImage {
    client: Size,
    static_attrs: Size,
    config: BTreeMap<String, String>,
    source: Option<String>,
}

/// In-memory [`ImageHost`] implementation.
#[derive(Debug, Default)]
pub struct MemoryHost {
    elements: BTreeMap<ElementId, HostedImage>,
    next_id: u32,
}

impl MemoryHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a managed element with its static width/height attributes and
    /// initial rendered box.
    pub fn insert(&mut self, static_attrs: Size, client: Size) -> ElementId {
        let id = ElementId(self.next_id);
        self.next_id += 1;
        self.elements.insert(
            id,
            HostedImage {
                client,
                static_attrs,
                ..Default::default()
            },
        );
        id
    }

    /// Set a configuration string on an element.
    pub fn set_config(&mut self, id: ElementId, key: &str, value: &str) {
        if let Some(el) = self.elements.get_mut(&id) {
            el.config.insert(key.to_string(), value.to_string());
        }
    }

    /// Change an element's rendered box, as a layout pass would.
    pub fn set_client_size(&mut self, id: ElementId, client: Size) {
        if let Some(el) = self.elements.get_mut(&id) {
            el.client = client;
        }
    }

    /// Rewrite an element's static width/height attributes.
    pub fn set_static_size(&mut self, id: ElementId, static_attrs: Size) {
        if let Some(el) = self.elements.get_mut(&id) {
            el.static_attrs = static_attrs;
        }
    }

    /// Remove an element from the document.
    pub fn remove(&mut self, id: ElementId) {
        self.elements.remove(&id);
    }

    /// Currently visible source, if any variant has been swapped in.
    pub fn source(&self, id: ElementId) -> Option<&str> {
        self.elements.get(&id).and_then(|el| el.source.as_deref())
    }
}

impl ImageHost for MemoryHost {
    fn managed_elements(&self) -> Vec<ElementId> {
        self.elements.keys().copied().collect()
    }

    fn client_size(&self, id: ElementId) -> Size {
        self.elements.get(&id).map(|el| el.client).unwrap_or_default()
    }

    fn static_size(&self, id: ElementId) -> Size {
        self.elements
            .get(&id)
            .map(|el| el.static_attrs)
            .unwrap_or_default()
    }

    fn config_value(&self, id: ElementId, key: &str) -> Option<String> {
        self.elements.get(&id)?.config.get(key).cloned()
    }

    fn set_source(&mut self, id: ElementId, url: &str) {
        if let Some(el) = self.elements.get_mut(&id) {
            el.source = Some(url.to_string());
        }
    }
}
