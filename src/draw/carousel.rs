//! Geometry of the circular card carousel.
//!
//! Every frame is derived from a single scroll offset: positions are recomputed from scratch
//! rather than accumulated, so rounding never drifts the landing card.

use crate::draw::config::DrawConfig;

/// Reference width that `rpx` units are expressed against.
const RPX_REFERENCE_WIDTH: f64 = 750.0;

/// Logical size of the drawing surface, in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
    /// Device window width, used to convert `rpx` to pixels.
    pub window_width: f64,
}

impl Viewport {
    pub fn rpx(&self, value: f64) -> f64 {
        value * self.window_width / RPX_REFERENCE_WIDTH
    }
}

/// Where and how one card is drawn in a frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CardPlacement {
    /// Index into the pool, already wrapped.
    pub index: usize,
    /// Horizontal centre of the card.
    pub x: f64,
    /// Vertical centre of the card.
    pub y: f64,
    pub scale: f64,
    pub opacity: f64,
    /// Absolute horizontal distance from the viewport centre.
    pub distance: f64,
}

/// Carousel metrics resolved against a concrete viewport.
#[derive(Debug, Clone, PartialEq)]
pub struct CarouselLayout {
    center_x: f64,
    center_y: f64,
    card_width: f64,
    card_height: f64,
    spacing: f64,
    visible_range: i64,
    min_scale: f64,
    edge_opacity: f64,
    opacity_floor: f64,
}

impl CarouselLayout {
    pub fn from_viewport(viewport: Viewport, config: &DrawConfig) -> Self {
        let card_width = viewport.rpx(config.card_width_rpx);
        Self {
            center_x: viewport.width / 2.0,
            center_y: viewport.height / 2.0,
            card_width,
            card_height: viewport.rpx(config.card_height_rpx),
            spacing: card_width * (1.0 - config.card_overlap),
            visible_range: i64::from(config.visible_range),
            min_scale: config.min_scale,
            edge_opacity: config.edge_opacity,
            opacity_floor: config.opacity_floor,
        }
    }

    /// Horizontal distance between neighbouring card centres.
    pub fn spacing(&self) -> f64 {
        self.spacing
    }

    pub fn card_size(&self) -> (f64, f64) {
        (self.card_width, self.card_height)
    }

    /// Pool index shown in the centre for a given scroll offset.
    pub fn center_index(&self, offset: f64, pool_len: usize) -> Option<usize> {
        if pool_len == 0 || self.spacing <= 0.0 {
            return None;
        }
        let raw = -offset / self.spacing;
        Some(wrap(round_half_up(raw), pool_len))
    }

    /// Cards visible at `offset`, ordered back to front (farthest first).
    ///
    /// Returns nothing for an empty pool. Indices wrap around the pool so the carousel reads as
    /// endless; small pools therefore show the same card more than once.
    pub fn layout(&self, offset: f64, pool_len: usize) -> Vec<CardPlacement> {
        if pool_len == 0 || self.spacing <= 0.0 {
            return Vec::new();
        }

        let raw = -offset / self.spacing;
        let center = round_half_up(raw);

        let mut cards: Vec<CardPlacement> = (-self.visible_range..=self.visible_range)
            .map(|step| {
                let relative = raw - (center - step) as f64;
                let x = self.center_x - relative * self.spacing;
                let distance = (x - self.center_x).abs();
                let normalized = (distance / (self.spacing * 2.0)).min(1.0);
                CardPlacement {
                    index: wrap(center + step, pool_len),
                    x,
                    y: self.center_y,
                    scale: 1.0 - normalized * (1.0 - self.min_scale),
                    opacity: (1.0 - normalized * (1.0 - self.edge_opacity)).max(self.opacity_floor),
                    distance,
                }
            })
            .collect();

        cards.sort_by(|a, b| b.distance.total_cmp(&a.distance));
        cards
    }
}

/// Round to nearest, halves towards positive infinity.
fn round_half_up(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}

fn wrap(index: i64, len: usize) -> usize {
    index.rem_euclid(len as i64) as usize
}
