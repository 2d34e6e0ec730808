//! Browser creation once the engine runtime is up.

use log::{info, warn};
use osr_core::BrowserEngine;
use osr_renderer::TextureBackend;

use crate::config::BridgeConfig;
use crate::error::SurfaceError;
use crate::surface::BrowserSurface;

/// Creates engine browsers and the texture backends they paint into.
pub trait EngineFactory {
    type Engine: BrowserEngine;
    type Backend: TextureBackend;

    /// Open a browser on `url`.
    ///
    /// # Errors
    /// `SurfaceError::EngineCreation` when the engine refuses.
    fn create_engine(&mut self, url: &str, transparent: bool) -> Result<Self::Engine, SurfaceError>;

    fn create_backend(&mut self) -> Self::Backend;

    /// Tear down the engine runtime.
    fn shutdown(&mut self) {}
}

/// Entry point for hosts: initialize once, then create browsers.
pub struct SurfaceFactory<F: EngineFactory> {
    factory: Option<F>,
    config: BridgeConfig,
}

impl<F: EngineFactory> SurfaceFactory<F> {
    pub fn new(config: BridgeConfig) -> Self {
        Self { factory: None, config }
    }

    pub fn config(&self) -> &BridgeConfig {
        &self.config
    }

    /// Install the engine factory. Returns false, leaving the current one in
    /// place, when already initialized.
    pub fn initialize(&mut self, factory: F) -> bool {
        if self.factory.is_some() {
            warn!(target: "osr_surface", "factory already initialized");
            return false;
        }
        self.factory = Some(factory);
        info!(target: "osr_surface", "browser factory initialized");
        true
    }

    pub fn is_initialized(&self) -> bool {
        self.factory.is_some()
    }

    /// Create a browser at the configured size.
    ///
    /// # Errors
    /// `SurfaceError::NotInitialized` before `initialize`, or whatever the
    /// engine or backend report.
    pub fn create_browser(
        &mut self,
        url: &str,
        transparent: bool,
    ) -> Result<BrowserSurface<F::Engine, F::Backend>, SurfaceError> {
        let (width, height) = (self.config.width, self.config.height);
        self.create_browser_sized(url, transparent, width, height)
    }

    /// Create a browser at `width` x `height`.
    ///
    /// # Errors
    /// `SurfaceError::NotInitialized` before `initialize`, or whatever the
    /// engine or backend report.
    pub fn create_browser_sized(
        &mut self,
        url: &str,
        transparent: bool,
        width: u32,
        height: u32,
    ) -> Result<BrowserSurface<F::Engine, F::Backend>, SurfaceError> {
        let factory = self.factory.as_mut().ok_or(SurfaceError::NotInitialized)?;
        let engine = factory.create_engine(url, transparent)?;
        let backend = factory.create_backend();
        let config = self.config.clone().with_transparent(transparent);
        BrowserSurface::create_sized(engine, backend, &config, width, height)
    }

    /// Shut the engine runtime down. Browsers must be closed first.
    pub fn shutdown(&mut self) {
        if let Some(mut factory) = self.factory.take() {
            factory.shutdown();
            info!(target: "osr_surface", "browser factory shut down");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use osr_core::test_support::{EngineCall, RecordingEngine};
    use osr_renderer::MemoryBackend;

    #[derive(Default)]
    struct Recording {
        urls: Vec<String>,
        shut_down: bool,
    }

    impl EngineFactory for Recording {
        type Engine = RecordingEngine;
        type Backend = MemoryBackend;

        fn create_engine(&mut self, url: &str, _transparent: bool) -> Result<RecordingEngine, SurfaceError> {
            if url.is_empty() {
                return Err(SurfaceError::EngineCreation {
                    url: url.to_owned(),
                    reason: String::from("empty url"),
                });
            }
            self.urls.push(url.to_owned());
            Ok(RecordingEngine::new())
        }

        fn create_backend(&mut self) -> MemoryBackend {
            MemoryBackend::new()
        }

        fn shutdown(&mut self) {
            self.shut_down = true;
        }
    }

    #[test]
    fn create_before_initialize_fails() {
        let mut factory = SurfaceFactory::<Recording>::new(BridgeConfig::default());
        assert!(!factory.is_initialized());
        assert!(matches!(
            factory.create_browser("about:blank", false),
            Err(SurfaceError::NotInitialized)
        ));
    }

    #[test]
    fn created_browser_uses_configured_size() {
        let mut factory = SurfaceFactory::new(BridgeConfig::default().with_size(300, 150));
        assert!(factory.initialize(Recording::default()));
        assert!(!factory.initialize(Recording::default()));
        let browser = factory.create_browser("https://example.com", true).unwrap();
        assert!(browser.is_transparent());
        assert_eq!(browser.size(), (300, 150));
        assert_eq!(
            browser.engine().calls,
            vec![EngineCall::CreateImmediately, EngineCall::WasResized(300, 150)]
        );
    }

    #[test]
    fn engine_errors_propagate() {
        let mut factory = SurfaceFactory::new(BridgeConfig::default());
        factory.initialize(Recording::default());
        assert!(matches!(
            factory.create_browser_sized("", false, 10, 10),
            Err(SurfaceError::EngineCreation { .. })
        ));
    }

    #[test]
    fn shutdown_uninitializes() {
        let mut factory = SurfaceFactory::new(BridgeConfig::default());
        factory.initialize(Recording::default());
        factory.shutdown();
        assert!(!factory.is_initialized());
        factory.shutdown();
    }
}
