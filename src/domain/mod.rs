//! Domain types - asset patterns and release descriptors, independent of git operations

pub mod asset;
pub mod release;

pub use asset::{AssetPath, AssetPattern, StructuredAsset};
pub use release::{LastRelease, NextRelease, ReleaseContext};
