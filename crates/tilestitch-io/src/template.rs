//! Tile URL templates.
//!
//! A template is a URL with single-character tokens in braces:
//! - `{z}` zoom level
//! - `{x}` tile column
//! - `{y}` tile row
//! - `{s}` a random subdomain letter `a`-`c`
//!
//! Any other single character in braces is rejected. Longer brace groups are
//! copied through unchanged.

use crate::preset::resolve_source;
use crate::{Result, StitchIoError};
use rand::Rng;
use tilestitch_geo::TileCoord;

const SUBDOMAINS: [char; 3] = ['a', 'b', 'c'];

/// A tile URL template, resolved from a preset name or given literally.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlTemplate {
    template: String,
}

impl UrlTemplate {
    /// Build a template from a preset name or a literal URL template.
    pub fn new(source: &str) -> Self {
        Self {
            template: resolve_source(source).to_string(),
        }
    }

    /// Substitute the tokens for `tile`.
    pub fn expand(&self, tile: TileCoord) -> Result<String> {
        self.expand_with(tile, &mut rand::thread_rng())
    }

    /// Substitute the tokens for `tile`, drawing subdomains from `rng`.
    pub fn expand_with<R: Rng>(&self, tile: TileCoord, rng: &mut R) -> Result<String> {
        let chars: Vec<char> = self.template.chars().collect();
        let mut url = String::with_capacity(self.template.len() + 16);

        let mut i = 0;
        while i < chars.len() {
            if chars[i] == '{' && chars.get(i + 2) == Some(&'}') {
                match chars[i + 1] {
                    'z' => url.push_str(&tile.z.to_string()),
                    'x' => url.push_str(&tile.x.to_string()),
                    'y' => url.push_str(&tile.y.to_string()),
                    's' => url.push(SUBDOMAINS[rng.gen_range(0..SUBDOMAINS.len())]),
                    other => return Err(StitchIoError::UnknownTemplateToken(other)),
                }
                i += 3;
            } else {
                url.push(chars[i]);
                i += 1;
            }
        }

        Ok(url)
    }
}
