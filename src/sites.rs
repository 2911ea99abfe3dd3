/// Site registry for the AquaSmart dashboards.
///
/// Defines the canonical list of dashboard sites: where to request the
/// precipitation forecast for, and which operator reservoir (if any) to look
/// up by name. All other modules should reference sites from here rather
/// than hardcoding coordinates.

// ---------------------------------------------------------------------------
// Site metadata
// ---------------------------------------------------------------------------

/// Metadata for a single dashboard site.
#[derive(Debug)]
pub struct Site {
    /// URL-safe identifier used by the CLI and the HTTP endpoint.
    pub slug: &'static str,
    /// Display name.
    pub name: &'static str,
    /// WGS84 latitude.
    pub latitude: f64,
    /// WGS84 longitude.
    pub longitude: f64,
    /// IANA timezone the forecast days are aligned to.
    pub timezone: &'static str,
    /// Name of the reservoir in the operator's public API. `None` means the
    /// site has no live reservoir feed and relies on the simulated level.
    pub reservoir: Option<&'static str>,
}

/// All sites served by the dashboard.
///
/// Sources:
///   - Coordinates: municipal centroids
///   - Reservoir names: SABESP public reservoir listing
pub static SITE_REGISTRY: &[Site] = &[
    Site {
        slug: "janauba",
        name: "Janaúba/MG",
        latitude: -15.8024,
        longitude: -43.3086,
        timezone: "America/Sao_Paulo",
        reservoir: None,
    },
    Site {
        slug: "sao-paulo",
        name: "São Paulo/SP",
        latitude: -23.5505,
        longitude: -46.6333,
        timezone: "America/Sao_Paulo",
        reservoir: Some("Cantareira"),
    },
];

/// Slug used when the caller does not name a site.
pub const DEFAULT_SITE: &str = "janauba";

/// Looks up a site by slug. Returns `None` if not found.
pub fn find_site(slug: &str) -> Option<&'static Site> {
    SITE_REGISTRY.iter().find(|s| s.slug == slug)
}

/// Returns the slugs of all registered sites.
pub fn all_site_slugs() -> Vec<&'static str> {
    SITE_REGISTRY.iter().map(|s| s.slug).collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
