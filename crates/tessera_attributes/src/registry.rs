//! # Attribute Tag Registry
//!
//! Process-wide map from wire tag to [`AttributeKind`]. The table starts
//! with the 16 built-in tags already in place, so a decode can never see
//! an uninitialized registry.
//!
//! ## Lifecycle
//!
//! ```text
//! startup ──► register_attribute(tag, kind)* ──► seal ──► decode, decode, ...
//!                                                 ▲
//!                        first decode seals implicitly
//! ```
//!
//! Extra tags alias one of the built-in kinds. A value decoded through an
//! alias re-encodes with the built-in tag of its kind.

use parking_lot::{const_rwlock, RwLock};

use crate::attribute::AttributeKind;
use crate::error::{AttributeError, AttributeResult};

/// Tag to kind table.
#[derive(Clone, Copy, Debug)]
pub struct AttributeRegistry {
    kinds: [Option<AttributeKind>; 256],
    sealed: bool,
}

impl AttributeRegistry {
    /// Table holding exactly the built-in tags 1-16, unsealed.
    #[must_use]
    pub const fn with_builtins() -> Self {
        let mut kinds = [None; 256];
        let mut i = 0;
        while i < AttributeKind::ALL.len() {
            let kind = AttributeKind::ALL[i];
            kinds[kind.tag() as usize] = Some(kind);
            i += 1;
        }
        Self { kinds, sealed: false }
    }

    /// Maps `tag` to `kind`.
    ///
    /// Registering the same pair twice is a no-op.
    ///
    /// # Errors
    ///
    /// - [`AttributeError::ReservedTag`] for tag 0
    /// - [`AttributeError::RegistrySealed`] once sealed
    /// - [`AttributeError::TagConflict`] if the tag maps to another kind
    pub fn register(&mut self, tag: u8, kind: AttributeKind) -> AttributeResult<()> {
        if tag == 0 {
            return Err(AttributeError::ReservedTag);
        }
        if self.sealed {
            return Err(AttributeError::RegistrySealed { tag });
        }
        match self.kinds[usize::from(tag)] {
            Some(existing) if existing == kind => Ok(()),
            Some(existing) => Err(AttributeError::TagConflict {
                tag,
                existing: existing.name(),
            }),
            None => {
                self.kinds[usize::from(tag)] = Some(kind);
                Ok(())
            }
        }
    }

    /// Kind registered for `tag`.
    #[inline]
    #[must_use]
    pub const fn resolve(&self, tag: u8) -> Option<AttributeKind> {
        self.kinds[tag as usize]
    }

    /// Rejects all further registration.
    pub fn seal(&mut self) {
        self.sealed = true;
    }

    /// Whether registration is closed.
    #[inline]
    #[must_use]
    pub const fn is_sealed(&self) -> bool {
        self.sealed
    }

    /// Number of registered tags.
    #[must_use]
    pub fn len(&self) -> usize {
        self.kinds.iter().filter(|k| k.is_some()).count()
    }

    /// Always false; the built-ins cannot be removed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for AttributeRegistry {
    fn default() -> Self {
        Self::with_builtins()
    }
}

// ============================================================================
// PROCESS-WIDE TABLE
// ============================================================================

static REGISTRY: RwLock<AttributeRegistry> = const_rwlock(AttributeRegistry::with_builtins());

/// Registers an extra tag in the process-wide table.
///
/// # Errors
///
/// See [`AttributeRegistry::register`].
pub fn register_attribute(tag: u8, kind: AttributeKind) -> AttributeResult<()> {
    REGISTRY.write().register(tag, kind)?;
    tracing::debug!(tag, kind = kind.name(), "Registered attribute tag");
    Ok(())
}

/// Closes the process-wide table.
pub fn seal_registry() {
    let mut registry = REGISTRY.write();
    if !registry.is_sealed() {
        registry.seal();
        tracing::debug!(tags = registry.len(), "Sealed attribute registry");
    }
}

/// Whether the process-wide table is closed.
#[must_use]
pub fn is_registry_sealed() -> bool {
    REGISTRY.read().is_sealed()
}

/// Kind for `tag` in the process-wide table.
#[must_use]
pub fn resolve_tag(tag: u8) -> Option<AttributeKind> {
    REGISTRY.read().resolve(tag)
}

/// Seals the process-wide table and returns a copy for one decode. The
/// copy is taken so no lock is held while recursing.
pub(crate) fn decode_registry() -> AttributeRegistry {
    if !is_registry_sealed() {
        seal_registry();
    }
    *REGISTRY.read()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtins_present() {
        let registry = AttributeRegistry::with_builtins();
        assert_eq!(registry.len(), 16);
        assert_eq!(registry.resolve(0), None);
        assert_eq!(registry.resolve(6), Some(AttributeKind::Tree));
        assert_eq!(registry.resolve(16), Some(AttributeKind::BoolArray));
        assert_eq!(registry.resolve(17), None);
    }

    #[test]
    fn test_register_alias() {
        let mut registry = AttributeRegistry::with_builtins();
        registry.register(40, AttributeKind::Int).unwrap();
        assert_eq!(registry.resolve(40), Some(AttributeKind::Int));
        // Same pair again is fine
        registry.register(40, AttributeKind::Int).unwrap();
        assert_eq!(registry.len(), 17);
    }

    #[test]
    fn test_register_rejections() {
        let mut registry = AttributeRegistry::with_builtins();
        assert_eq!(
            registry.register(0, AttributeKind::Int),
            Err(AttributeError::ReservedTag)
        );
        assert_eq!(
            registry.register(1, AttributeKind::Long),
            Err(AttributeError::TagConflict {
                tag: 1,
                existing: "int"
            })
        );
        registry.seal();
        assert!(registry.is_sealed());
        assert_eq!(
            registry.register(41, AttributeKind::Bool),
            Err(AttributeError::RegistrySealed { tag: 41 })
        );
    }

    #[test]
    fn test_decode_seals_global() {
        let snapshot = decode_registry();
        assert!(snapshot.is_sealed());
        assert!(is_registry_sealed());
        assert_eq!(resolve_tag(5), Some(AttributeKind::String));
        assert!(matches!(
            register_attribute(200, AttributeKind::Int),
            Err(AttributeError::RegistrySealed { tag: 200 })
        ));
    }
}
