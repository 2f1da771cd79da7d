use crate::core::player::PlayerRecord;
use crate::matching::ratio::sequence_ratio;
use crate::matching::MatchError;
use crate::roster::store::PlayerStore;

/// Default minimum similarity ratio for a fuzzy match
pub const DEFAULT_CUTOFF: f64 = 0.8;

/// Configuration for name resolution
#[derive(Debug, Clone, Copy, serde::Serialize, serde::Deserialize)]
pub struct ResolverConfig {
    /// Candidates below this ratio are never returned
    pub cutoff: f64,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            cutoff: DEFAULT_CUTOFF,
        }
    }
}

/// How an input was matched to a canonical name
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ResolutionKind {
    Exact,
    Fuzzy { ratio: f64 },
}

/// A resolved player
#[derive(Debug, Clone, Copy)]
pub struct Resolution<'a> {
    pub record: &'a PlayerRecord,
    pub kind: ResolutionKind,
}

impl Resolution<'_> {
    /// Canonical name of the resolved player
    #[must_use]
    pub fn key(&self) -> &str {
        &self.record.name
    }
}

/// Maps free-text input to a canonical player in the store
pub struct NameResolver<'a> {
    store: &'a PlayerStore,
    config: ResolverConfig,
}

impl<'a> NameResolver<'a> {
    pub fn new(store: &'a PlayerStore) -> Self {
        Self {
            store,
            config: ResolverConfig::default(),
        }
    }

    pub fn with_config(store: &'a PlayerStore, config: ResolverConfig) -> Self {
        Self { store, config }
    }

    /// Resolve raw input to a player: exact (case-insensitive) first, then the
    /// closest name whose ratio clears the cutoff.
    ///
    /// # Errors
    ///
    /// Returns [`MatchError::NotFound`] when neither step finds a player.
    pub fn resolve(&self, raw: &str) -> Result<Resolution<'a>, MatchError> {
        let normalized = normalize_input(raw);
        let not_found = || MatchError::NotFound {
            input: raw.to_string(),
        };

        if normalized.is_empty() {
            return Err(not_found());
        }

        if let Some(record) = self.store.lookup_exact(&normalized) {
            tracing::debug!("'{}' matched '{}' exactly", raw, record.name);
            return Ok(Resolution {
                record,
                kind: ResolutionKind::Exact,
            });
        }

        let mut best: Option<(&'a PlayerRecord, f64)> = None;
        for record in self.store.iter() {
            let ratio = sequence_ratio(&record.name.to_lowercase(), &normalized);
            if ratio < self.config.cutoff {
                continue;
            }
            // Strictly greater keeps the first player seen on ties
            if best.map_or(true, |(_, best_ratio)| ratio > best_ratio) {
                best = Some((record, ratio));
            }
        }

        match best {
            Some((record, ratio)) => {
                tracing::debug!("'{}' matched '{}' (ratio {:.3})", raw, record.name, ratio);
                Ok(Resolution {
                    record,
                    kind: ResolutionKind::Fuzzy { ratio },
                })
            }
            None => {
                tracing::debug!("'{}' matched nothing above {:.2}", raw, self.config.cutoff);
                Err(not_found())
            }
        }
    }

    /// The `limit` closest names regardless of the cutoff, best first
    pub fn closest(&self, raw: &str, limit: usize) -> Vec<(&'a str, f64)> {
        let normalized = normalize_input(raw);
        let mut scored: Vec<(&'a str, f64)> = self
            .store
            .iter()
            .map(|r| {
                (
                    r.name.as_str(),
                    sequence_ratio(&r.name.to_lowercase(), &normalized),
                )
            })
            .collect();

        scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
        scored.truncate(limit);
        scored
    }
}

/// Trim surrounding whitespace and lower-case
fn normalize_input(raw: &str) -> String {
    raw.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_store(names: &[&str]) -> PlayerStore {
        let mut store = PlayerStore::new();
        for name in names {
            store.add_player(PlayerRecord::new(*name)).unwrap();
        }
        store
    }

    #[test]
    fn test_resolve_is_case_insensitive() {
        let store = PlayerStore::load_embedded().unwrap();
        let resolver = NameResolver::new(&store);

        let a = resolver.resolve("LeBron James").unwrap();
        let b = resolver.resolve("lebron james").unwrap();
        let c = resolver.resolve("  LEBRON JAMES\t").unwrap();
        assert_eq!(a.key(), "LeBron James");
        assert_eq!(a.key(), b.key());
        assert_eq!(b.key(), c.key());
        assert_eq!(a.kind, ResolutionKind::Exact);
    }

    #[test]
    fn test_resolve_tolerates_typo() {
        let store = PlayerStore::load_embedded().unwrap();
        let resolver = NameResolver::new(&store);

        let resolved = resolver.resolve("Lebron Jamess").unwrap();
        assert_eq!(resolved.key(), "LeBron James");
        assert!(matches!(resolved.kind, ResolutionKind::Fuzzy { ratio } if ratio >= 0.8));
    }

    #[test]
    fn test_resolve_rejects_fragment() {
        let store = PlayerStore::load_embedded().unwrap();
        let resolver = NameResolver::new(&store);

        let err = resolver.resolve("Bron").unwrap_err();
        assert_eq!(
            err,
            MatchError::NotFound {
                input: "Bron".to_string()
            }
        );
    }

    #[test]
    fn test_resolve_empty_input() {
        let store = make_store(&["Anyone"]);
        let resolver = NameResolver::new(&store);
        assert!(resolver.resolve("   ").is_err());
    }

    #[test]
    fn test_fuzzy_tie_goes_to_first_in_store() {
        // "jon smith" is one substitution away from both names
        let store = make_store(&["Jon Smyth", "Jon Smita"]);
        let resolver = NameResolver::new(&store);

        let resolved = resolver.resolve("jon smith").unwrap();
        assert_eq!(resolved.key(), "Jon Smyth");
    }

    #[test]
    fn test_fuzzy_picks_highest_ratio() {
        let store = make_store(&["Marcus Morris", "Markieff Morris"]);
        let resolver = NameResolver::new(&store);

        let resolved = resolver.resolve("markief morris").unwrap();
        assert_eq!(resolved.key(), "Markieff Morris");
    }

    #[test]
    fn test_custom_cutoff() {
        let store = make_store(&["LeBron James"]);
        let strict = NameResolver::with_config(&store, ResolverConfig { cutoff: 0.99 });
        assert!(strict.resolve("lebron jamess").is_err());

        let loose = NameResolver::with_config(&store, ResolverConfig { cutoff: 0.4 });
        assert_eq!(loose.resolve("bron").unwrap().key(), "LeBron James");
    }

    #[test]
    fn test_closest_orders_by_ratio() {
        let store = make_store(&["Kevin Love", "Kevin Durant", "Kawhi Leonard"]);
        let resolver = NameResolver::new(&store);

        let closest = resolver.closest("kevin durrant", 2);
        assert_eq!(closest.len(), 2);
        assert_eq!(closest[0].0, "Kevin Durant");
        assert!(closest[0].1 >= closest[1].1);
    }
}
