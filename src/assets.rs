use carsim::SimError;
use rust_embed::RustEmbed;
use std::borrow::Cow;

#[derive(RustEmbed)]
#[folder = "assets/"]
pub struct Asset;

pub fn get_asset_bytes(name: &str) -> Result<Cow<'static, [u8]>, SimError> {
    Asset::get(name)
        .map(|f| f.data)
        .ok_or_else(|| SimError::MissingAsset(name.to_string()))
}
