//! Ad-type classification from source kind and campaign name.

use ppc_core::{AdType, SourceKind};

/// Campaign-name fragments (lower-case) that mark an SB campaign as video.
pub const VIDEO_MARKERS: &[&str] = &["video", "sbv"];

/// SP is always Sponsored Products. SB is Sponsored Brands Video when the
/// lower-cased campaign name contains any of [`VIDEO_MARKERS`] as a bare
/// substring, Sponsored Brands otherwise.
pub fn classify_ad_type(kind: SourceKind, campaign: &str) -> AdType {
    match kind {
        SourceKind::Sp => AdType::SponsoredProducts,
        SourceKind::Sb => {
            let lower = campaign.to_lowercase();
            if VIDEO_MARKERS.iter().any(|m| lower.contains(m)) {
                AdType::SponsoredBrandsVideo
            } else {
                AdType::SponsoredBrands
            }
        }
    }
}
