//! Variant Loader
//!
//! Out-of-band image fetches. The visible source is swapped only once the
//! new variant has fully decoded, so a failed fetch never disturbs what is
//! already on screen. No retry here: a later reload-triggering sweep
//! naturally issues a fresh request.

use vario_dom::{ElementId, ImageHost};

/// Fetch/decode error for a variant request.
#[derive(Debug, Clone, thiserror::Error)]
pub enum LoadError {
    #[error("Fetch failed for {url}: {message}")]
    Fetch { url: String, message: String },

    #[error("Decode failed for {url}: {message}")]
    Decode { url: String, message: String },
}

/// Fetches and decodes an image resource.
///
/// Returning `Ok` means the resource is fully decoded and safe to show.
/// Single-threaded embedding; futures need not be `Send`.
#[allow(async_fn_in_trait)]
pub trait VariantFetcher {
    async fn fetch(&self, url: &str) -> Result<(), LoadError>;
}

/// Loads variants and swaps element sources.
pub struct VariantLoader<F> {
    fetcher: F,
}

impl<F: VariantFetcher> VariantLoader<F> {
    pub fn new(fetcher: F) -> Self {
        Self { fetcher }
    }

    /// Fetch `url` and, on successful decode, swap it in as `element`'s
    /// visible source. On failure the visible source is left untouched.
    pub async fn load(
        &self,
        host: &mut dyn ImageHost,
        element: ElementId,
        url: &str,
    ) -> Result<(), LoadError> {
        tracing::info!(?element, url, "loading variant");
        match self.fetcher.fetch(url).await {
            Ok(()) => {
                host.set_source(element, url);
                Ok(())
            }
            Err(err) => {
                tracing::debug!(?element, url, %err, "variant fetch failed, keeping current source");
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vario_dom::MemoryHost;
    use vario_quantize::Size;

    struct OkFetcher;

    impl VariantFetcher for OkFetcher {
        async fn fetch(&self, _url: &str) -> Result<(), LoadError> {
            Ok(())
        }
    }

    struct FailingFetcher;

    impl VariantFetcher for FailingFetcher {
        async fn fetch(&self, url: &str) -> Result<(), LoadError> {
            Err(LoadError::Fetch {
                url: url.to_string(),
                message: "connection reset".into(),
            })
        }
    }

    #[test]
    fn test_successful_load_swaps_source() {
        let mut host = MemoryHost::new();
        let id = host.insert(Size::new(800, 600), Size::new(400, 300));
        let loader = VariantLoader::new(OkFetcher);

        smol::block_on(loader.load(&mut host, id, "/lt/thumbnail/450/img.jpg")).unwrap();
        assert_eq!(host.source(id), Some("/lt/thumbnail/450/img.jpg"));
    }

    #[test]
    fn test_failed_load_keeps_source() {
        let mut host = MemoryHost::new();
        let id = host.insert(Size::new(800, 600), Size::new(400, 300));
        host.set_source(id, "/lt/thumbnail/400/img.jpg");
        let loader = VariantLoader::new(FailingFetcher);

        let result = smol::block_on(loader.load(&mut host, id, "/lt/thumbnail/450/img.jpg"));
        assert!(result.is_err());
        assert_eq!(host.source(id), Some("/lt/thumbnail/400/img.jpg"));
    }
}
