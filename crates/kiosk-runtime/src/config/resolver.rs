//! Configuration resolver trait for layered overrides.
//!
//! ```text
//! ConfigLoader.load()  →  KioskConfig (base)
//!                              │
//!                     ConfigResolver.apply()   (CLI flags)
//!                              │
//!                              ▼
//!                     KioskConfig (final)
//! ```

use super::KioskConfig;

/// Applies overrides on top of a loaded configuration.
///
/// Only values the caller actually set should be applied.
pub trait ConfigResolver {
    /// Applies overrides to the given configuration.
    fn apply(&self, config: &mut KioskConfig);
}

/// Resolver that changes nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpResolver;

impl ConfigResolver for NoOpResolver {
    fn apply(&self, _config: &mut KioskConfig) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn noop_resolver_does_nothing() {
        let mut config = KioskConfig::default();
        NoOpResolver.apply(&mut config);
        assert_eq!(config, KioskConfig::default());
    }

    #[test]
    fn custom_resolver() {
        struct RolesOverride(Option<&'static str>);

        impl ConfigResolver for RolesOverride {
            fn apply(&self, config: &mut KioskConfig) {
                if let Some(path) = self.0 {
                    config.roles.file = Some(path.into());
                }
            }
        }

        let mut config = KioskConfig::default();
        RolesOverride(Some("roles.json")).apply(&mut config);
        assert_eq!(config.roles.file, Some("roles.json".into()));
    }
}
