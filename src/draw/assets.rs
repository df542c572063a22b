//! Card art preloading with the cover -> default cover -> placeholder fallback chain.

use futures::future::{BoxFuture, join_all};
use tracing::warn;

use crate::{draw::error::AssetError, dto::game::GameRecord};

/// Loads images for a drawing surface.
pub trait ImageLoader: Clone + Send + Sync + 'static {
    type Image: Send + Sync + 'static;

    /// Start loading `url`. The future owns everything it needs.
    fn load(&self, url: &str) -> BoxFuture<'static, Result<Self::Image, AssetError>>;
}

/// Image drawn on a card, or the placeholder glyph when nothing could be loaded.
#[derive(Debug, Clone, PartialEq)]
pub enum CardArt<I> {
    Loaded(I),
    Placeholder,
}

impl<I> CardArt<I> {
    pub fn image(&self) -> Option<&I> {
        match self {
            CardArt::Loaded(image) => Some(image),
            CardArt::Placeholder => None,
        }
    }
}

/// Load art for every card of `pool`, in pool order.
///
/// All loads run concurrently and are joined before returning. A failed load never surfaces as
/// an error: it falls back to `default_cover`, then to [`CardArt::Placeholder`].
pub async fn preload_card_art<L: ImageLoader>(
    loader: &L,
    pool: &[GameRecord],
    default_cover: &str,
) -> Vec<CardArt<L::Image>> {
    let loads = pool.iter().map(|game| {
        load_with_fallback(
            loader.clone(),
            game.cover_image.clone(),
            default_cover.to_owned(),
        )
    });
    join_all(loads).await
}

async fn load_with_fallback<L: ImageLoader>(
    loader: L,
    cover: Option<String>,
    default_cover: String,
) -> CardArt<L::Image> {
    if let Some(url) = cover.filter(|url| !url.is_empty() && *url != default_cover) {
        match loader.load(&url).await {
            Ok(image) => return CardArt::Loaded(image),
            Err(err) => warn!(error = %err, "cover failed to load; using default cover"),
        }
    }

    match loader.load(&default_cover).await {
        Ok(image) => CardArt::Loaded(image),
        Err(err) => {
            warn!(error = %err, "default cover failed to load; drawing placeholder");
            CardArt::Placeholder
        }
    }
}
