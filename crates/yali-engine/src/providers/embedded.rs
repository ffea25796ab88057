//! Models compiled into the binary with `rust-embed`

use rust_embed::Embed;
use std::marker::PhantomData;
use yali_core::{CorpusProvider, Error, Result};

/// Serves the assets of a `#[derive(Embed)]` folder.
///
/// ```ignore
/// #[derive(rust_embed::Embed)]
/// #[folder = "models/"]
/// struct Models;
///
/// let provider = EmbeddedProvider::<Models>::new();
/// ```
pub struct EmbeddedProvider<E> {
    _assets: PhantomData<fn() -> E>,
}

impl<E: Embed> EmbeddedProvider<E> {
    pub fn new() -> Self {
        Self {
            _assets: PhantomData,
        }
    }
}

impl<E: Embed> Default for EmbeddedProvider<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> std::fmt::Debug for EmbeddedProvider<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EmbeddedProvider")
            .field("assets", &std::any::type_name::<E>())
            .finish()
    }
}

#[async_trait::async_trait]
impl<E: Embed + 'static> CorpusProvider for EmbeddedProvider<E> {
    async fn list_locators(&self) -> Result<Vec<String>> {
        let mut locators: Vec<String> = E::iter().map(|name| name.into_owned()).collect();
        locators.sort();
        Ok(locators)
    }

    async fn read_locator(&self, locator: &str) -> Result<Vec<u8>> {
        let asset = <E as Embed>::get(locator).ok_or_else(|| {
            Error::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("embedded asset {} not found", locator),
            ))
        })?;
        Ok(asset.data.into_owned())
    }

    fn describe(&self) -> String {
        format!("embedded assets {}", std::any::type_name::<E>())
    }
}
