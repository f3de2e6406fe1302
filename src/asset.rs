//! Symbolic asset identifiers and the texture manifest built from them.
//!
//! Everything in the game addresses assets by enum variant; the mapping to
//! on-disk paths lives here alone.

use std::collections::HashMap;

use sdl2::image::LoadTexture;
use sdl2::render::{Texture, TextureCreator};
use sdl2::video::WindowContext;
use strum::IntoEnumIterator;
use strum_macros::EnumIter;
use tracing::debug;

use crate::error::AssetError;

/// Every loadable asset in the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter)]
pub enum Asset {
    /// The player's character sheet: one row of walk frames per facing.
    PlayerSheet,
    GrassTile,
    FlowersTile,
    WallTile,
    DoorwayTile,
    TownTheme,
    CenterTheme,
    RuinsTheme,
}

impl Asset {
    /// The path this asset loads from, relative to the working directory.
    pub const fn path(self) -> &'static str {
        match self {
            Asset::PlayerSheet => "assets/textures/characters/player.png",
            Asset::GrassTile => "assets/textures/world/grass.png",
            Asset::FlowersTile => "assets/textures/world/flowers.png",
            Asset::WallTile => "assets/textures/world/wall.png",
            Asset::DoorwayTile => "assets/textures/world/doorway.png",
            Asset::TownTheme => "assets/audio/town.ogg",
            Asset::CenterTheme => "assets/audio/center.ogg",
            Asset::RuinsTheme => "assets/audio/ruins.ogg",
        }
    }

    /// Whether this asset belongs in the texture manifest (music is loaded
    /// by the audio thread instead).
    pub const fn is_texture(self) -> bool {
        !matches!(self, Asset::TownTheme | Asset::CenterTheme | Asset::RuinsTheme)
    }
}

/// All textures the game draws with, loaded once at startup and looked up by
/// [`Asset`]. Lives in the world as a non-send resource since SDL textures
/// must stay on the main thread.
pub struct TextureManifest {
    textures: HashMap<Asset, Texture>,
}

impl TextureManifest {
    /// Loads every texture asset through the given creator.
    ///
    /// # Errors
    ///
    /// Returns an error naming the first asset that failed to load.
    pub fn load(texture_creator: &TextureCreator<WindowContext>) -> Result<Self, AssetError> {
        let mut textures = HashMap::new();

        for asset in Asset::iter().filter(|asset| asset.is_texture()) {
            let texture = texture_creator.load_texture(asset.path()).map_err(|message| {
                AssetError::LoadFailed {
                    path: asset.path(),
                    message,
                }
            })?;
            debug!(?asset, path = asset.path(), "Loaded texture");
            textures.insert(asset, texture);
        }

        Ok(Self { textures })
    }

    /// The texture for an asset, if it was loaded into the manifest.
    pub fn get(&self, asset: Asset) -> Option<&Texture> {
        self.textures.get(&asset)
    }
}
