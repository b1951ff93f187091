//! Place-name lookup for birth locations.
//!
//! Geocoding itself lives outside this crate; [`LocationResolver`] is the
//! seam an application plugs its geocoder into.

use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

use crate::ephemeris::GeoLocation;

/// Maps a free-text place to coordinates.
#[async_trait]
pub trait LocationResolver: Send + Sync {
    /// `None` when the place is unknown or the lookup failed.
    async fn resolve(&self, query: &str) -> Option<GeoLocation>;
}

/// `"city, country"`, or just the city when no country is given.
pub fn place_query(city: &str, country: Option<&str>) -> String {
    let city = city.trim();
    match country.map(str::trim) {
        Some(country) if !country.is_empty() => format!("{city}, {country}"),
        _ => city.to_string(),
    }
}

/// Resolve `query`, defaulting to (0, 0) when nothing is found.
pub async fn resolve_or_default<R: LocationResolver + ?Sized>(resolver: &R, query: &str) -> GeoLocation {
    match resolver.resolve(query).await {
        Some(location) => location,
        None => {
            log::warn!("could not resolve '{query}', using (0, 0)");
            GeoLocation::default()
        }
    }
}

fn place_key(query: &str) -> String {
    query.trim().to_lowercase()
}

/// Case-insensitive lookup in a fixed table of places.
#[derive(Debug, Clone, Default)]
pub struct StaticLocationResolver {
    places: HashMap<String, GeoLocation>,
}

impl StaticLocationResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_place(mut self, name: &str, location: GeoLocation) -> Self {
        self.insert(name, location);
        self
    }

    pub fn insert(&mut self, name: &str, location: GeoLocation) {
        self.places.insert(place_key(name), location);
    }

    pub fn len(&self) -> usize {
        self.places.len()
    }

    pub fn is_empty(&self) -> bool {
        self.places.is_empty()
    }
}

impl<'a> FromIterator<(&'a str, GeoLocation)> for StaticLocationResolver {
    fn from_iter<I: IntoIterator<Item = (&'a str, GeoLocation)>>(iter: I) -> Self {
        let mut resolver = Self::new();
        for (name, location) in iter {
            resolver.insert(name, location);
        }
        resolver
    }
}

#[async_trait]
impl LocationResolver for StaticLocationResolver {
    async fn resolve(&self, query: &str) -> Option<GeoLocation> {
        self.places.get(&place_key(query)).copied()
    }
}

/// Remembers successful lookups of an inner resolver.
///
/// Misses are not cached, so a place can resolve later.
pub struct CachedLocationResolver<R> {
    inner: R,
    cache: RwLock<HashMap<String, GeoLocation>>,
}

impl<R: LocationResolver> CachedLocationResolver<R> {
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            cache: RwLock::new(HashMap::new()),
        }
    }

    pub async fn cached(&self) -> usize {
        self.cache.read().await.len()
    }
}

#[async_trait]
impl<R: LocationResolver> LocationResolver for CachedLocationResolver<R> {
    async fn resolve(&self, query: &str) -> Option<GeoLocation> {
        let key = place_key(query);
        if let Some(hit) = self.cache.read().await.get(&key) {
            return Some(*hit);
        }
        let found = self.inner.resolve(query).await?;
        self.cache.write().await.insert(key, found);
        Some(found)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct Counting(AtomicUsize);

    #[async_trait]
    impl LocationResolver for Counting {
        async fn resolve(&self, query: &str) -> Option<GeoLocation> {
            self.0.fetch_add(1, Ordering::SeqCst);
            (query != "atlantis").then_some(GeoLocation { lat: 1.0, lon: 2.0 })
        }
    }

    #[test]
    fn test_place_query() {
        assert_eq!(place_query("Lagos", Some("Nigeria")), "Lagos, Nigeria");
        assert_eq!(place_query(" Lagos ", Some("  ")), "Lagos");
        assert_eq!(place_query("Lagos", None), "Lagos");
    }

    #[tokio::test]
    async fn test_static_lookup_is_case_insensitive() {
        let resolver = StaticLocationResolver::new()
            .with_place("Lagos, Nigeria", GeoLocation { lat: 6.5244, lon: 3.3792 });
        let found = resolver.resolve("  LAGOS, nigeria").await.unwrap();
        assert_eq!(found.lat, 6.5244);
        assert!(resolver.resolve("Abuja").await.is_none());
    }

    #[tokio::test]
    async fn test_unresolved_defaults_to_origin() {
        let resolver = StaticLocationResolver::new();
        assert_eq!(resolve_or_default(&resolver, "nowhere").await, GeoLocation::default());
    }

    #[tokio::test]
    async fn test_cache_hits_skip_inner() {
        let cached = CachedLocationResolver::new(Counting(AtomicUsize::new(0)));
        assert!(cached.resolve("Paris").await.is_some());
        assert!(cached.resolve("paris").await.is_some());
        assert!(cached.resolve("atlantis").await.is_none());
        assert!(cached.resolve("atlantis").await.is_none());
        assert_eq!(cached.inner.0.load(Ordering::SeqCst), 3);
        assert_eq!(cached.cached().await, 1);
    }
}
