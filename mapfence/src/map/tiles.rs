//! XYZ basemap tile URLs.

use crate::coord::{to_tile_coords, CoordError, Coordinate, TileCoord};

/// OpenStreetMap standard tile layer.
pub const DEFAULT_TILE_URL: &str = "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png";

/// Attribution required by the OpenStreetMap tile usage policy.
pub const DEFAULT_ATTRIBUTION: &str = "© OpenStreetMap contributors";

/// A raster tile server described by a URL template.
///
/// The template may contain `{z}`, `{x}`, `{y}` and an optional `{s}`
/// subdomain placeholder. Subdomains are picked per tile so neighbouring
/// tiles spread across hosts while a given tile always maps to the same URL.
#[derive(Debug, Clone, PartialEq)]
pub struct TileSource {
    template: String,
    subdomains: Vec<String>,
    attribution: String,
}

impl TileSource {
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
            subdomains: vec!["a".into(), "b".into(), "c".into()],
            attribution: DEFAULT_ATTRIBUTION.to_string(),
        }
    }

    pub fn with_subdomains(mut self, subdomains: &[&str]) -> Self {
        self.subdomains = subdomains.iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn with_attribution(mut self, attribution: impl Into<String>) -> Self {
        self.attribution = attribution.into();
        self
    }

    pub fn template(&self) -> &str {
        &self.template
    }

    pub fn attribution(&self) -> &str {
        &self.attribution
    }

    /// URL for a specific tile.
    pub fn tile_url(&self, tile: &TileCoord) -> String {
        let mut url = self
            .template
            .replace("{z}", &tile.zoom.to_string())
            .replace("{x}", &tile.x.to_string())
            .replace("{y}", &tile.y.to_string());

        if url.contains("{s}") {
            let subdomain = match self.subdomains.len() {
                0 => "",
                n => {
                    let index = (tile.x as u64 + tile.y as u64) % n as u64;
                    self.subdomains[index as usize].as_str()
                }
            };
            url = url.replace("{s}", subdomain);
        }
        url
    }

    /// URL of the tile containing `coordinate` at `zoom`.
    pub fn tile_url_for(&self, coordinate: &Coordinate, zoom: u8) -> Result<String, CoordError> {
        to_tile_coords(coordinate, zoom).map(|tile| self.tile_url(&tile))
    }
}

impl Default for TileSource {
    fn default() -> Self {
        Self::new(DEFAULT_TILE_URL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholders_substituted() {
        let source = TileSource::new("https://tiles.test/{z}/{x}/{y}.png");
        let url = source.tile_url(&TileCoord { x: 3, y: 5, zoom: 4 });
        assert_eq!(url, "https://tiles.test/4/3/5.png");
    }

    #[test]
    fn test_subdomain_rotation_is_stable() {
        let source = TileSource::default();
        let a = source.tile_url(&TileCoord { x: 0, y: 0, zoom: 1 });
        let b = source.tile_url(&TileCoord { x: 1, y: 0, zoom: 1 });
        let c = source.tile_url(&TileCoord { x: 1, y: 1, zoom: 1 });

        assert!(a.starts_with("https://a."));
        assert!(b.starts_with("https://b."));
        assert!(c.starts_with("https://c."));
        assert_eq!(a, source.tile_url(&TileCoord { x: 0, y: 0, zoom: 1 }));
    }

    #[test]
    fn test_out_of_mercator_range_rejected() {
        let source = TileSource::default();
        let pole = Coordinate::new(89.0, 0.0).unwrap();
        assert!(matches!(
            source.tile_url_for(&pole, 5),
            Err(CoordError::InvalidLatitude(_))
        ));
        let ok = Coordinate::new(0.0, 0.0).unwrap();
        assert!(matches!(
            source.tile_url_for(&ok, 20),
            Err(CoordError::InvalidZoom(20))
        ));
    }
}
