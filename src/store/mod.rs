// CLASSIFICATION: COMMUNITY
// Filename: mod.rs v0.1
// Author: Lukas Bower
// Date Modified: 2026-10-18

//! Persistent variable store interface.
//!
//! Variables are keyed by a [`Namespace`] and a name. The platform owns the
//! real non-volatile backend; this crate only needs `get`/`set` and ships an
//! in-memory store for host runs and tests plus a JSON snapshot store in
//! [`file`].

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use bitflags::bitflags;

use crate::error::StoreError;

pub mod file;

/// Every setting handled by this crate is a little-endian `u32`.
pub const VARIABLE_WIDTH: usize = 4;

/// Opaque 128-bit scope key grouping related variables.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Namespace([u8; 16]);

impl Namespace {
    pub const fn from_bytes(bytes: [u8; 16]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 16] {
        &self.0
    }
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let b = &self.0;
        write!(
            f,
            "{}-{}-{}-{}-{}",
            hex::encode(&b[0..4]),
            hex::encode(&b[4..6]),
            hex::encode(&b[6..8]),
            hex::encode(&b[8..10]),
            hex::encode(&b[10..16])
        )
    }
}

impl fmt::Debug for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Namespace({self})")
    }
}

impl FromStr for Namespace {
    type Err = hex::FromHexError;

    /// Accepts the dashed GUID form produced by `Display`, or 32 bare hex digits.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits: String = s.chars().filter(|c| *c != '-').collect();
        let mut bytes = [0u8; 16];
        hex::decode_to_slice(digits, &mut bytes)?;
        Ok(Self(bytes))
    }
}

bitflags! {
    /// Storage attributes requested when writing a variable.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct VariableAttributes: u32 {
        const NON_VOLATILE = 0x0000_0001;
        const BOOTSERVICE_ACCESS = 0x0000_0002;
        const RUNTIME_ACCESS = 0x0000_0004;
    }
}

impl VariableAttributes {
    /// Survives reboot and stays readable/writable by the setup forms and the OS.
    pub const CONFIG: Self = Self::NON_VOLATILE
        .union(Self::BOOTSERVICE_ACCESS)
        .union(Self::RUNTIME_ACCESS);
}

/// Narrow view of the platform's variable services.
pub trait VariableStore {
    /// Copy the variable into `buf` and return the stored size.
    ///
    /// Fails with [`StoreError::SizeMismatch`] when the payload is larger
    /// than `buf`. No attribute filtering is applied.
    fn get(&self, namespace: &Namespace, name: &str, buf: &mut [u8]) -> Result<usize, StoreError>;

    /// Create or replace the variable.
    fn set(
        &mut self,
        namespace: &Namespace,
        name: &str,
        data: &[u8],
        attributes: VariableAttributes,
    ) -> Result<(), StoreError>;
}

impl<S: VariableStore + ?Sized> VariableStore for &mut S {
    fn get(&self, namespace: &Namespace, name: &str, buf: &mut [u8]) -> Result<usize, StoreError> {
        (**self).get(namespace, name, buf)
    }

    fn set(
        &mut self,
        namespace: &Namespace,
        name: &str,
        data: &[u8],
        attributes: VariableAttributes,
    ) -> Result<(), StoreError> {
        (**self).set(namespace, name, data, attributes)
    }
}

/// Read a 4-byte setting. Anything other than exactly four bytes is a
/// size mismatch.
pub fn read_u32<S: VariableStore + ?Sized>(
    store: &S,
    namespace: &Namespace,
    name: &str,
) -> Result<u32, StoreError> {
    let mut buf = [0u8; VARIABLE_WIDTH];
    let actual = store.get(namespace, name, &mut buf)?;
    if actual != VARIABLE_WIDTH {
        return Err(StoreError::SizeMismatch {
            expected: VARIABLE_WIDTH,
            actual,
        });
    }
    Ok(u32::from_le_bytes(buf))
}

/// Write a 4-byte setting with [`VariableAttributes::CONFIG`].
pub fn write_u32<S: VariableStore + ?Sized>(
    store: &mut S,
    namespace: &Namespace,
    name: &str,
    value: u32,
) -> Result<(), StoreError> {
    store.set(namespace, name, &value.to_le_bytes(), VariableAttributes::CONFIG)
}

/// A stored payload and the attributes it was written with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredVariable {
    pub attributes: VariableAttributes,
    pub data: Vec<u8>,
}

/// Volatile map-backed store used on the host and in tests.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    vars: BTreeMap<(Namespace, String), StoredVariable>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a `u32` value directly, bypassing attribute handling.
    pub fn with_u32(mut self, namespace: Namespace, name: &str, value: u32) -> Self {
        self.vars.insert(
            (namespace, name.to_string()),
            StoredVariable {
                attributes: VariableAttributes::CONFIG,
                data: value.to_le_bytes().to_vec(),
            },
        );
        self
    }

    pub fn variable(&self, namespace: &Namespace, name: &str) -> Option<&StoredVariable> {
        self.vars.get(&(*namespace, name.to_string()))
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Namespace, &str, &StoredVariable)> {
        self.vars
            .iter()
            .map(|((ns, name), var)| (ns, name.as_str(), var))
    }

    pub(crate) fn insert(&mut self, namespace: Namespace, name: String, var: StoredVariable) {
        self.vars.insert((namespace, name), var);
    }
}

impl VariableStore for MemoryStore {
    fn get(&self, namespace: &Namespace, name: &str, buf: &mut [u8]) -> Result<usize, StoreError> {
        let var = self.variable(namespace, name).ok_or(StoreError::NotFound)?;
        if var.data.len() > buf.len() {
            return Err(StoreError::SizeMismatch {
                expected: buf.len(),
                actual: var.data.len(),
            });
        }
        buf[..var.data.len()].copy_from_slice(&var.data);
        Ok(var.data.len())
    }

    fn set(
        &mut self,
        namespace: &Namespace,
        name: &str,
        data: &[u8],
        attributes: VariableAttributes,
    ) -> Result<(), StoreError> {
        self.insert(
            *namespace,
            name.to_string(),
            StoredVariable {
                attributes,
                data: data.to_vec(),
            },
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NS: Namespace = Namespace::from_bytes([
        0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08, 0x09, 0x0a, 0x0b, 0x0c, 0x0d, 0x0e, 0x0f,
        0x10,
    ]);

    #[test]
    fn namespace_display_parses_back() {
        let text = NS.to_string();
        assert_eq!(text, "01020304-0506-0708-090a-0b0c0d0e0f10");
        assert_eq!(text.parse::<Namespace>().unwrap(), NS);
        assert!("0102".parse::<Namespace>().is_err());
    }

    #[test]
    fn read_u32_rejects_short_payload() {
        let mut store = MemoryStore::new();
        store
            .set(&NS, "Short", &[1, 2], VariableAttributes::CONFIG)
            .unwrap();
        assert_eq!(
            read_u32(&store, &NS, "Short"),
            Err(StoreError::SizeMismatch {
                expected: 4,
                actual: 2
            })
        );
    }

    #[test]
    fn read_u32_rejects_long_payload() {
        let mut store = MemoryStore::new();
        store
            .set(&NS, "Long", &[0; 8], VariableAttributes::CONFIG)
            .unwrap();
        assert_eq!(
            read_u32(&store, &NS, "Long"),
            Err(StoreError::SizeMismatch {
                expected: 4,
                actual: 8
            })
        );
    }

    #[test]
    fn write_then_read_uses_config_attributes() {
        let mut store = MemoryStore::new();
        write_u32(&mut store, &NS, "CpuClock", 2).unwrap();
        assert_eq!(read_u32(&store, &NS, "CpuClock"), Ok(2));
        let var = store.variable(&NS, "CpuClock").unwrap();
        assert!(var.attributes.contains(VariableAttributes::NON_VOLATILE));
        assert!(var.attributes.contains(VariableAttributes::RUNTIME_ACCESS));
    }

    #[test]
    fn missing_variable_is_not_found() {
        let store = MemoryStore::new();
        let err = read_u32(&store, &NS, "HypEnable").unwrap_err();
        assert!(err.is_not_found());
    }
}
