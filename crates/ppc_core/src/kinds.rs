//! Source schema tags and ad-type variants.

label_enum! {
    /// Report schema of an uploaded file. Supplied by the caller per upload
    /// slot; never inferred from file content.
    SourceKind => {
        Sp = "SP",
        Sb = "SB",
    }
}

label_enum! {
    /// Ad-type variant of a record. Always derived, never read from a source column.
    AdType => {
        SponsoredProducts = "SPONSORED PRODUCTS",
        SponsoredBrands = "SPONSORED BRANDS",
        SponsoredBrandsVideo = "SPONSORED BRANDS VIDEO",
    }
}
